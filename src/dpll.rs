//! A recursive DPLL solver for propositional CNF-SAT.
//!
//! CNF-SAT is the problem whose instances are formulas of propositional logic in
//! Conjunctive Normal Form, and an instance is positive if it is satisfiable, i.e. if
//! there exists a valuation for which it is true.

use std::collections::BTreeSet;

/// A propositional literal. A positive integer `n` represents the variable `x_n`; a
/// negative integer `-n` represents its negation. Zero is never a valid literal.
pub type Literal = i64;

/// A clause: a disjunction of literals, represented as the set of literals it contains.
/// The empty clause is falsum; a formula with no clauses is verum.
pub type Clause = BTreeSet<Literal>;

/// Decides whether the given CNF formula is satisfiable.
///
/// This does not extract a satisfying model - only the boolean decision is needed by
/// the rest of the engine.
pub fn decide(clauses: &[Clause]) -> bool {
    dpll(clauses.to_vec())
}

fn dpll(mut clauses: Vec<Clause>) -> bool {
    if clauses.is_empty() {
        return true;
    }
    if clauses.iter().any(Clause::is_empty) {
        return false;
    }

    while let Some(lit) = find_unit_literal(&clauses) {
        unit_propagate(&mut clauses, lit);
    }
    while let Some(lit) = find_pure_literal(&clauses) {
        pure_literal_assign(&mut clauses, lit);
    }

    if clauses.is_empty() {
        return true;
    }
    if clauses.iter().any(Clause::is_empty) {
        return false;
    }

    // Simplification could not decide the formula on its own: branch on an arbitrary
    // literal still present. The two branches are tried in sequence; the left branch
    // must not observe any simplification performed while exploring the right one, so
    // it gets an independent clone of the clause set.
    let lit = choose_literal(&clauses);

    let mut left = clauses.clone();
    left.push(Clause::from([lit]));
    if dpll(left) {
        return true;
    }

    clauses.push(Clause::from([-lit]));
    dpll(clauses)
}

/// A unit literal is one that appears alone in a clause.
fn find_unit_literal(clauses: &[Clause]) -> Option<Literal> {
    clauses
        .iter()
        .find(|c| c.len() == 1)
        .map(|c| *c.iter().next().unwrap())
}

/// A pure literal appears in the formula while its negation does not.
fn find_pure_literal(clauses: &[Clause]) -> Option<Literal> {
    let literals: BTreeSet<Literal> = clauses.iter().flatten().copied().collect();
    literals.iter().find(|&&lit| !literals.contains(&-lit)).copied()
}

/// Sets `lit` to true: drops every clause it satisfies, and strikes its negation from
/// every remaining clause.
fn unit_propagate(clauses: &mut Vec<Clause>, lit: Literal) {
    clauses.retain(|c| !c.contains(&lit));
    for clause in clauses.iter_mut() {
        clause.remove(&-lit);
    }
}

/// Sets `lit` to true: since its negation never appears, this can only satisfy clauses.
fn pure_literal_assign(clauses: &mut Vec<Clause>, lit: Literal) {
    clauses.retain(|c| !c.contains(&lit));
}

/// Picks an arbitrary literal still present in the formula. The selection strategy has
/// no bearing on correctness, only on running time; the smallest literal by absolute
/// value is chosen for determinism.
fn choose_literal(clauses: &[Clause]) -> Literal {
    clauses
        .iter()
        .flatten()
        .min_by_key(|lit| lit.abs())
        .copied()
        .expect("choose_literal called on a formula with no literals")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn clause(lits: &[Literal]) -> Clause {
        lits.iter().copied().collect()
    }

    #[test]
    fn empty_formula_is_satisfiable() {
        assert!(decide(&[]));
    }

    #[test]
    fn formula_with_empty_clause_is_unsatisfiable() {
        assert!(!decide(&[Clause::new()]));
    }

    #[test]
    fn literal_and_its_negation_is_unsatisfiable() {
        for lit in [1, 2, -3, 42] {
            let clauses = [clause(&[lit]), clause(&[-lit])];
            assert!(!decide(&clauses), "failed for literal {lit}");
        }
    }

    #[test]
    fn single_unit_clause_is_satisfiable() {
        assert!(decide(&[clause(&[5])]));
    }

    #[test]
    fn three_variable_xor_like_formula() {
        // (x1 OR x2) AND (-x1 OR -x2) AND (x1 OR -x2) -- satisfiable with x1=T, x2=F.
        let clauses = [clause(&[1, 2]), clause(&[-1, -2]), clause(&[1, -2])];
        assert!(decide(&clauses));
    }

    #[test]
    fn pigeonhole_two_into_one_is_unsatisfiable() {
        // Two pigeons (x1, x2) into one hole; both can't be true, and at least one
        // must be (at-least-one plus at-most-one encodes an impossible pigeonhole).
        let clauses = [clause(&[1]), clause(&[2]), clause(&[-1, -2])];
        assert!(!decide(&clauses));
    }

    /// Brute-force truth-table evaluation used as an oracle to spot-check `decide`.
    fn brute_force_sat(clauses: &[Clause], num_vars: usize) -> bool {
        if num_vars == 0 {
            return clauses.iter().all(|c| !c.is_empty()) || clauses.is_empty();
        }
        for assignment in 0..(1u32 << num_vars) {
            let value = |v: usize| (assignment >> (v - 1)) & 1 == 1;
            let satisfied = clauses.iter().all(|clause| {
                clause.iter().any(|&lit| {
                    let v = lit.unsigned_abs() as usize;
                    let truth = value(v);
                    if lit > 0 { truth } else { !truth }
                })
            });
            if satisfied {
                return true;
            }
        }
        false
    }

    #[test]
    fn dpll_matches_brute_force_on_random_small_formulas() {
        let mut rng = rand::rng();
        for _ in 0..500 {
            let num_vars = rng.random_range(1..=5);
            let num_clauses = rng.random_range(0..=6);
            let mut clauses = Vec::new();
            for _ in 0..num_clauses {
                let clause_len = rng.random_range(1..=3);
                let mut c = Clause::new();
                for _ in 0..clause_len {
                    let v = rng.random_range(1..=num_vars as i64);
                    let lit = if rng.random_bool(0.5) { v } else { -v };
                    c.insert(lit);
                }
                clauses.push(c);
            }
            assert_eq!(
                decide(&clauses),
                brute_force_sat(&clauses, num_vars),
                "mismatch on {clauses:?}"
            );
        }
    }
}
