//! Decides pattern reducibility: whether every frontier 3-coloring of a small plane
//! graph is either directly extensible to a proper 3-coloring of the interior, or
//! reducible via a Kempe-chain argument to strictly-lower-rank colorings that are
//! themselves reducible.
//!
//! Three layers, leaves first:
//! - [`dpll`]: a CNF-SAT solver (DPLL with unit propagation and pure-literal elimination).
//! - [`coloring`] and [`matching`]: two NP-hard problems reduced to CNF-SAT - partial
//!   3-coloring extensibility, and non-crossing perfect quasi-matching.
//! - [`pattern`]: the fixed-point engine that ties them together over the quotient of
//!   frontier colorings by color permutation and pattern symmetry.

pub mod catalog;
pub mod coloring;
pub mod dpll;
pub mod error;
pub mod matching;
pub mod pattern;

pub use error::PatternError;
pub use pattern::PatternReducibility;

use anyhow::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

fn num_vars(clauses: &[Vec<isize>]) -> usize {
    clauses
        .iter()
        .flat_map(|clause| clause.iter())
        .map(|&lit| lit.unsigned_abs())
        .max()
        .unwrap_or(0)
}

/// Writes `clauses` to `output` in DIMACS CNF format.
pub fn write_clauses<P: AsRef<Path>>(output: P, clauses: &[Vec<isize>]) -> Result<()> {
    let num_vars = num_vars(clauses);

    let file = File::create(&output)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "p cnf {num_vars} {}", clauses.len())?;
    for clause in clauses {
        for literal in clause {
            write!(writer, "{literal} ")?;
        }
        writeln!(writer, "0")?;
    }
    writer.flush()?;

    println!(
        "Successfully wrote problem to '{}' ({num_vars} variables, {} clauses)",
        output.as_ref().display(),
        clauses.len()
    );
    Ok(())
}
