//! 3-Coloration: partially pre-colored graphs reduced to CNF-SAT.
//!
//! An instance is positive if the partial coloring can be extended to a proper
//! 3-coloring of the whole graph.

use std::collections::{BTreeSet, HashMap};

use crate::dpll::{self, Clause, Literal};

/// One of the three colors a vertex or frontier position may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Color {
    One,
    Two,
    Three,
}

impl Color {
    /// All three colors, in ascending order - this order is load-bearing: it is the
    /// iteration order used to enumerate colorings and color permutations.
    pub const ALL: [Color; 3] = [Color::One, Color::Two, Color::Three];

    /// Integer projection used for display and for the "integer ordering" tie-break.
    pub fn as_i64(self) -> i64 {
        match self {
            Color::One => 1,
            Color::Two => 2,
            Color::Three => 3,
        }
    }

    /// The two colors other than `self`, in ascending order.
    pub fn others(self) -> (Color, Color) {
        let mut rest = Color::ALL.into_iter().filter(|&c| c != self);
        (rest.next().unwrap(), rest.next().unwrap())
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_i64())
    }
}

/// A 3-Coloration instance: a graph given by adjacency list, plus a partial map from
/// vertex to a fixed color.
pub struct ThreeColoring<'a> {
    adjacency: &'a [Vec<usize>],
    constraints: &'a HashMap<usize, Color>,
    edges: BTreeSet<(usize, usize)>,
}

impl<'a> ThreeColoring<'a> {
    pub fn new(adjacency: &'a [Vec<usize>], constraints: &'a HashMap<usize, Color>) -> Self {
        let mut edges = BTreeSet::new();
        for (u, neighbors) in adjacency.iter().enumerate() {
            for &v in neighbors {
                edges.insert((u.min(v), u.max(v)));
            }
        }
        Self {
            adjacency,
            constraints,
            edges,
        }
    }

    /// The propositional variable x_{vertex,color}, representing `vertex` being
    /// colored by `color`. The encoding must be injective; `3 * vertex + color` is.
    fn var(&self, vertex: usize, color: Color) -> Literal {
        debug_assert!(vertex < self.adjacency.len());
        (3 * vertex) as Literal + color.as_i64()
    }

    /// Builds the CNF formula whose satisfiability is equivalent to `self` admitting a
    /// proper 3-coloring extending the input constraints.
    pub fn clauses(&self) -> Vec<Clause> {
        let mut clauses = Vec::new();

        for v in 0..self.adjacency.len() {
            match self.constraints.get(&v) {
                Some(&color) => {
                    clauses.push(Clause::from([self.var(v, color)]));
                    let (c1, c2) = color.others();
                    clauses.push(Clause::from([-self.var(v, c1)]));
                    clauses.push(Clause::from([-self.var(v, c2)]));
                }
                None => {
                    clauses.push(Clause::from_iter(
                        Color::ALL.iter().map(|&c| self.var(v, c)),
                    ));
                    for i in 0..3 {
                        for j in (i + 1)..3 {
                            clauses.push(Clause::from([
                                -self.var(v, Color::ALL[i]),
                                -self.var(v, Color::ALL[j]),
                            ]));
                        }
                    }
                }
            }
        }

        for &(u, v) in &self.edges {
            for &color in &Color::ALL {
                clauses.push(Clause::from([-self.var(u, color), -self.var(v, color)]));
            }
        }

        clauses
    }

    pub fn colorable(&self) -> bool {
        dpll::decide(&self.clauses())
    }
}

/// Decides whether `adjacency`, with `constraints` fixing some vertices, admits a
/// proper 3-coloring.
pub fn colorable(adjacency: &[Vec<usize>], constraints: &HashMap<usize, Color>) -> bool {
    ThreeColoring::new(adjacency, constraints).colorable()
}

/// Builds the DIMACS-style clause list (as signed `isize` literals) for the 3-coloring
/// instance of `adjacency` under `constraints`, for use by DIMACS CNF export tooling.
pub fn dimacs_clauses(adjacency: &[Vec<usize>], constraints: &HashMap<usize, Color>) -> Vec<Vec<isize>> {
    ThreeColoring::new(adjacency, constraints)
        .clauses()
        .iter()
        .map(|clause| clause.iter().map(|&lit| lit as isize).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_constraints() -> HashMap<usize, Color> {
        HashMap::new()
    }

    #[test]
    fn triangle_is_not_3_colorable_with_two_colors_pinned_equal() {
        let adj = vec![vec![1, 2], vec![0, 2], vec![0, 1]];
        let mut constraints = HashMap::new();
        constraints.insert(0, Color::One);
        constraints.insert(1, Color::One);
        assert!(!colorable(&adj, &constraints));
    }

    #[test]
    fn triangle_is_3_colorable_unconstrained() {
        let adj = vec![vec![1, 2], vec![0, 2], vec![0, 1]];
        assert!(colorable(&adj, &empty_constraints()));
    }

    #[test]
    fn odd_cycle_is_3_colorable_unconstrained() {
        // A 5-cycle: 0-1-2-3-4-0.
        let adj = vec![
            vec![1, 4],
            vec![0, 2],
            vec![1, 3],
            vec![2, 4],
            vec![3, 0],
        ];
        assert!(colorable(&adj, &empty_constraints()));
    }

    #[test]
    fn k4_is_not_3_colorable() {
        let adj = vec![
            vec![1, 2, 3],
            vec![0, 2, 3],
            vec![0, 1, 3],
            vec![0, 1, 2],
        ];
        assert!(!colorable(&adj, &empty_constraints()));
    }

    #[test]
    fn consistent_constraints_are_extendable() {
        let adj = vec![vec![1], vec![0, 2], vec![1]];
        let mut constraints = HashMap::new();
        constraints.insert(0, Color::One);
        constraints.insert(2, Color::One);
        assert!(colorable(&adj, &constraints));
    }

    #[test]
    fn contradictory_single_vertex_constraint_cannot_apply_two_colors() {
        // Not expressible directly (constraints map one color per vertex), but a
        // constraint combined with an adjacent identical constraint over an edge must
        // fail.
        let adj = vec![vec![1], vec![0]];
        let mut constraints = HashMap::new();
        constraints.insert(0, Color::Two);
        constraints.insert(1, Color::Two);
        assert!(!colorable(&adj, &constraints));
    }
}
