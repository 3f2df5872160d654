//! Pattern reducibility: the fixed-point engine tying the SAT core, the 3-coloring
//! reducer and the NCPQM reducer together.
//!
//! A pattern is a small plane graph (its "line graph") together with a cyclically
//! ordered frontier of outgoing edges and a set of symmetries acting on that frontier.
//! A pattern is reducible if every frontier 3-coloring, up to color permutation and
//! pattern symmetry, is either directly extensible to a proper 3-coloring of the
//! interior, or reducible via a Kempe-chain argument to coloring(s) of strictly lower
//! rank that are themselves reducible.

use std::collections::{BTreeSet, HashMap, HashSet};

use itertools::Itertools;
use rayon::prelude::*;

use crate::coloring::{self, Color};
use crate::error::PatternError;
use crate::matching::{self, PseudoGraph, Vertex};

/// A frontier coloring: an assignment of colors to the outgoing positions 0..k.
pub type Coloring = Vec<Color>;

/// The reducibility status of a representative coloring. `rank = 0` corresponds to
/// `Extendable`; `rank = r > 0` to `Reducible`; `rank = infinity` to `Unknown`. Folding
/// the rank/reason pair into one enum makes the invariant from the data model ("rank=0
/// iff reason=extendable") structural rather than an assertion to maintain by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reducibility {
    Extendable,
    Reducible { rank: u32, color_pair: (Color, Color) },
    Unknown,
}

impl Reducibility {
    pub fn rank(&self) -> Option<u32> {
        match self {
            Reducibility::Extendable => Some(0),
            Reducibility::Reducible { rank, .. } => Some(*rank),
            Reducibility::Unknown => None,
        }
    }

    fn reason(&self) -> String {
        match self {
            Reducibility::Extendable => "extendable".to_string(),
            Reducibility::Reducible { color_pair, .. } => {
                format!("reducible with color pair {}/{}", color_pair.0, color_pair.1)
            }
            Reducibility::Unknown => String::new(),
        }
    }
}

/// An immutable pattern, together with its coloring quotient and rank map.
///
/// The quotient maps (`color_repr_map`, `repr_map`) and the rank-0 tier of `rank_map`
/// are computed once at construction and never change afterwards; `rank_map` entries
/// beyond rank 0 are filled in monotonically by [`PatternReducibility::is_pattern_reducible`].
pub struct PatternReducibility {
    line_graph: Vec<Vec<usize>>,
    outgoing: Vec<usize>,
    symmetries: Vec<Vec<usize>>,
    k: usize,
    color_repr_map: HashMap<Coloring, Coloring>,
    repr_map: HashMap<Coloring, Coloring>,
    rank_map: HashMap<Coloring, Reducibility>,
}

impl PatternReducibility {
    pub fn new(
        line_graph: Vec<Vec<usize>>,
        outgoing: Vec<usize>,
        symmetries: Vec<Vec<usize>>,
    ) -> Result<Self, PatternError> {
        let k = outgoing.len();
        validate(&line_graph, &outgoing, &symmetries, k)?;

        let mut pattern = PatternReducibility {
            line_graph,
            outgoing,
            symmetries,
            k,
            color_repr_map: HashMap::new(),
            repr_map: HashMap::new(),
            rank_map: HashMap::new(),
        };
        pattern.build_quotient();
        pattern.initialize_ranks();
        Ok(pattern)
    }

    pub fn line_graph(&self) -> &[Vec<usize>] {
        &self.line_graph
    }

    pub fn outgoing(&self) -> &[usize] {
        &self.outgoing
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// The representative of a coloring: the lexicographically (integer-order)
    /// minimal coloring equal to `c` up to a color permutation and a pattern symmetry.
    pub fn representative(&self, c: &Coloring) -> Coloring {
        let color_repr = &self.color_repr_map[c];
        self.repr_map[color_repr].clone()
    }

    fn build_quotient(&mut self) {
        let perms = color_permutations();
        for c in all_colorings(self.k) {
            let color_repr = perms
                .iter()
                .map(|sigma| apply_color_perm(&c, sigma))
                .min_by_key(coloring_to_int)
                .expect("color_permutations is never empty");
            debug_assert!(coloring_to_int(&color_repr) <= coloring_to_int(&c));
            let is_color_repr = color_repr == c;
            self.color_repr_map.insert(c.clone(), color_repr);
            if is_color_repr {
                self.repr_map.insert(c, Vec::new());
            }
        }

        let color_representatives: Vec<Coloring> = self.repr_map.keys().cloned().collect();
        for c in color_representatives {
            let repr = self
                .symmetries
                .iter()
                .map(|sym| apply_symmetry(&c, sym))
                .map(|c_sym| self.color_repr_map[&c_sym].clone())
                .min_by_key(|cc| coloring_to_int(cc))
                .expect("symmetries is never empty");
            self.repr_map.insert(c, repr);
        }
    }

    fn initialize_ranks(&mut self) {
        let full_representatives: Vec<Coloring> = self
            .repr_map
            .iter()
            .filter(|(c, repr)| *c == *repr)
            .map(|(c, _)| c.clone())
            .collect();

        for c in full_representatives {
            let mut constraints = HashMap::with_capacity(self.k);
            for i in 0..self.k {
                constraints.insert(self.outgoing[i], c[i]);
            }
            let status = if coloring::colorable(&self.line_graph, &constraints) {
                Reducibility::Extendable
            } else {
                Reducibility::Unknown
            };
            self.rank_map.insert(c, status);
        }
    }

    fn rank_at_least(&self, representative: &Coloring, r: u32) -> bool {
        match self
            .rank_map
            .get(representative)
            .expect("representative is missing from the rank map")
        {
            Reducibility::Unknown => true,
            Reducibility::Extendable => 0 >= r,
            Reducibility::Reducible { rank, .. } => *rank >= r,
        }
    }

    /// Builds the auxiliary pseudo-graph of `c` with respect to the set of colorings
    /// already proven of rank `< r`, under `color_pair`.
    fn make_aux_graph(&self, c: &Coloring, r: u32, color_pair: (Color, Color)) -> PseudoGraph {
        let swap = |indices: &[usize]| -> Coloring {
            let mut res = c.clone();
            for &index in indices {
                if res[index] == color_pair.0 {
                    res[index] = color_pair.1;
                } else if res[index] == color_pair.1 {
                    res[index] = color_pair.0;
                }
            }
            res
        };

        let vertices: Vec<usize> = (0..self.k)
            .filter(|&i| c[i] == color_pair.0 || c[i] == color_pair.1)
            .collect();

        let mut graph = PseudoGraph::new();
        for &u in &vertices {
            graph.insert(u as Vertex, BTreeSet::new());
        }

        for &u in &vertices {
            for &v in &vertices {
                let swapped = if u == v { swap(&[u]) } else { swap(&[u, v]) };
                let rep = self.representative(&swapped);
                if self.rank_at_least(&rep, r) {
                    graph.get_mut(&(u as Vertex)).unwrap().insert(v as Vertex);
                    graph.get_mut(&(v as Vertex)).unwrap().insert(u as Vertex);
                }
            }
        }
        graph
    }

    /// Determines whether `c` is reducible to the set of colorings known of rank `< r`,
    /// returning the witness Kempe color pair on success.
    fn is_coloring_reducible(&self, c: &Coloring, r: u32) -> Option<(Color, Color)> {
        for &color in &Color::ALL {
            let (i, j) = color.others();
            if c.iter().all(|&cc| cc == color) {
                // The auxiliary graph would be empty and is trivially matchable; this
                // color pair cannot witness a reduction.
                continue;
            }
            let aux_graph = self.make_aux_graph(c, r, (i, j));
            if !matching::matchable(&aux_graph) {
                return Some((i, j));
            }
        }
        None
    }

    /// Runs the fixed point, assigning a finite rank to every representative coloring
    /// that is reducible, and returns whether the pattern itself is reducible (every
    /// representative ends up with a finite rank). If `display` is true, prints a
    /// human-readable report of the representatives grouped by rank.
    pub fn is_pattern_reducible(&mut self, display: bool) -> bool {
        let mut r: u32 = 1;
        let any_unknown = loop {
            let pending: Vec<Coloring> = self
                .rank_map
                .iter()
                .filter(|(_, red)| matches!(red, Reducibility::Unknown))
                .map(|(c, _)| c.clone())
                .collect();

            log::debug!(
                "fixed-point iteration r={r}: {} representative(s) still unknown",
                pending.len()
            );

            // Each test only reads `self` (the "known-reducible" set is the snapshot
            // of `rank_map` as of the start of this iteration), so independent
            // representatives can be evaluated concurrently; updates are published
            // only once the whole batch has been decided. Reborrow as shared so the
            // closure below is `Sync` rather than capturing the unique `&mut self`.
            let this: &Self = self;
            let updates: Vec<(Coloring, (Color, Color))> = pending
                .par_iter()
                .filter_map(|c| this.is_coloring_reducible(c, r).map(|pair| (c.clone(), pair)))
                .collect();

            if updates.is_empty() {
                break !pending.is_empty();
            }

            for (c, color_pair) in updates {
                log::debug!("representative {c:?} reduced at rank {r} via {color_pair:?}");
                self.rank_map
                    .insert(c, Reducibility::Reducible { rank: r, color_pair });
            }
            r += 1;
        };

        if display {
            self.print_report();
        }

        !any_unknown
    }

    fn print_report(&self) {
        let max_rank = self
            .rank_map
            .values()
            .filter_map(Reducibility::rank)
            .max()
            .unwrap_or(0);

        for rank in 0..=max_rank {
            let entries: Vec<(&Coloring, &Reducibility)> = self
                .rank_map
                .iter()
                .filter(|(_, red)| red.rank() == Some(rank))
                .collect();
            let count = entries.len();
            let verb = if count == 1 { "is" } else { "are" };
            let plural = if count == 1 { "" } else { "s" };
            println!("\nThere {verb} {count} coloration{plural} of rank {rank}:\n");
            for (c, red) in entries {
                println!("{} because {}.", format_coloring(c), red.reason());
            }
        }

        println!("\nNon reducible colorations:\n");
        for (c, red) in self.rank_map.iter() {
            if matches!(red, Reducibility::Unknown) {
                println!("{}", format_coloring(c));
            }
        }
    }
}

fn format_coloring(c: &Coloring) -> String {
    let digits: Vec<String> = c.iter().map(|col| col.as_i64().to_string()).collect();
    format!("({})", digits.join(", "))
}

fn validate(
    line_graph: &[Vec<usize>],
    outgoing: &[usize],
    symmetries: &[Vec<usize>],
    k: usize,
) -> Result<(), PatternError> {
    if symmetries.is_empty() {
        return Err(PatternError::NoSymmetries);
    }
    let identity: Vec<usize> = (0..k).collect();
    if symmetries[0] != identity {
        return Err(PatternError::FirstSymmetryNotIdentity(symmetries[0].clone()));
    }
    for (index, sym) in symmetries.iter().enumerate() {
        let mut sorted = sym.clone();
        sorted.sort_unstable();
        if sorted != identity {
            return Err(PatternError::NotAPermutation {
                index,
                k,
                permutation: sym.clone(),
            });
        }
    }

    let n = line_graph.len();
    let mut seen = HashSet::with_capacity(outgoing.len());
    for &v in outgoing {
        if v >= n {
            return Err(PatternError::OutgoingVertexOutOfRange { vertex: v, n });
        }
        if !seen.insert(v) {
            return Err(PatternError::DuplicateOutgoingVertex(v));
        }
    }

    Ok(())
}

fn all_colorings(k: usize) -> Vec<Coloring> {
    (0..k)
        .map(|_| Color::ALL.to_vec())
        .multi_cartesian_product()
        .collect()
}

fn color_index(c: Color) -> usize {
    match c {
        Color::One => 0,
        Color::Two => 1,
        Color::Three => 2,
    }
}

/// The six bijections of {1,2,3}, represented as `sigma[color_index(c)] = sigma(c)`.
fn color_permutations() -> Vec<[Color; 3]> {
    Color::ALL
        .iter()
        .copied()
        .permutations(3)
        .map(|v| [v[0], v[1], v[2]])
        .collect()
}

fn apply_color_perm(c: &Coloring, sigma: &[Color; 3]) -> Coloring {
    c.iter().map(|&col| sigma[color_index(col)]).collect()
}

fn apply_symmetry(c: &Coloring, sym: &[usize]) -> Coloring {
    sym.iter().map(|&i| c[i]).collect()
}

fn coloring_to_int(c: &Coloring) -> u64 {
    c.iter().fold(0u64, |acc, col| acc * 10 + col.as_i64() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p22() -> PatternReducibility {
        PatternReducibility::new(vec![vec![1], vec![0, 2], vec![1]], vec![0, 2], vec![
            vec![0, 1],
            vec![1, 0],
        ])
        .unwrap()
    }

    #[test]
    fn rejects_non_identity_first_symmetry() {
        let err = PatternReducibility::new(vec![vec![1], vec![0, 2], vec![1]], vec![0, 2], vec![
            vec![1, 0],
        ])
        .unwrap_err();
        assert!(matches!(err, PatternError::FirstSymmetryNotIdentity(_)));
    }

    #[test]
    fn rejects_duplicate_outgoing_vertex() {
        let err = PatternReducibility::new(vec![vec![1], vec![0, 2], vec![1]], vec![0, 0], vec![
            vec![0, 1],
        ])
        .unwrap_err();
        assert!(matches!(err, PatternError::DuplicateOutgoingVertex(0)));
    }

    #[test]
    fn rejects_out_of_range_outgoing_vertex() {
        let err = PatternReducibility::new(vec![vec![1], vec![0, 2], vec![1]], vec![0, 5], vec![
            vec![0, 1],
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            PatternError::OutgoingVertexOutOfRange { vertex: 5, n: 3 }
        ));
    }

    #[test]
    fn rejects_malformed_symmetry_permutation() {
        let err = PatternReducibility::new(vec![vec![1], vec![0, 2], vec![1]], vec![0, 2], vec![
            vec![0, 1],
            vec![0, 0],
        ])
        .unwrap_err();
        assert!(matches!(err, PatternError::NotAPermutation { index: 1, .. }));
    }

    #[test]
    fn color_repr_is_idempotent() {
        let p = p22();
        for c in all_colorings(p.k) {
            let once = p.color_repr_map[&c].clone();
            let twice = p.color_repr_map[&once].clone();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn representative_is_idempotent() {
        let p = p22();
        for c in all_colorings(p.k) {
            let once = p.representative(&c);
            let twice = p.representative(&once);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn representative_is_equivariant_under_color_and_symmetry_action() {
        let p = p22();
        let perms = color_permutations();
        for c in all_colorings(p.k) {
            let base = p.representative(&c);
            for sigma in &perms {
                for sym in &p.symmetries {
                    let moved = apply_symmetry(&apply_color_perm(&c, sigma), sym);
                    assert_eq!(p.representative(&moved), base);
                }
            }
        }
    }

    #[test]
    fn p22_is_reducible() {
        assert!(p22().is_pattern_reducible(false));
    }
}
