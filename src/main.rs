use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use pattern_reducibility::{catalog, coloring, coloring::Color, write_clauses};

#[derive(Parser)]
#[command(author, version, about = "Pattern reducibility decision engine")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the named patterns in the built-in catalog
    List,
    /// Decide whether a catalog pattern is reducible
    Check {
        /// Name of the catalog pattern (see `list`)
        name: String,
        /// Print a per-rank listing of representative colorings
        #[arg(short, long)]
        display: bool,
    },
    /// Write the all-one-color frontier 3-coloring instance of a catalog pattern to a
    /// DIMACS CNF file
    Dimacs {
        /// Name of the catalog pattern (see `list`)
        name: String,
        /// Output .cnf file path
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::List => {
            for entry in catalog::ENTRIES {
                println!(
                    "{} (expected reducible: {})",
                    entry.name, entry.expected_reducible
                );
            }
        }
        Commands::Check { name, display } => {
            let Some(built) = catalog::build(&name) else {
                bail!("no such pattern '{name}' - see `patreduce list`");
            };
            let mut pattern = built?;
            println!("Checking pattern '{name}'...");
            let reducible = pattern.is_pattern_reducible(display);
            println!("Pattern '{name}' is reducible: {reducible}");
        }
        Commands::Dimacs { name, output } => {
            let Some(built) = catalog::build(&name) else {
                bail!("no such pattern '{name}' - see `patreduce list`");
            };
            let pattern = built?;
            let mut constraints = HashMap::with_capacity(pattern.k());
            for &vertex in pattern.outgoing() {
                constraints.insert(vertex, Color::One);
            }
            let clauses = coloring::dimacs_clauses(pattern.line_graph(), &constraints);
            write_clauses(&output, &clauses)?;
        }
    }

    Ok(())
}
