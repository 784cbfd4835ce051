use anyhow::Result;
use clap::{ArgGroup, Parser};
use tracing_subscriber::EnvFilter;

use crate::mutation_table::MutationTable;

mod analysis;
mod intersection;
mod line_resolver;
mod models;
mod mutation_locator;
mod mutation_table;
mod record_parser;
mod report;
mod uniprot;

/// Find mutations shared across tumor cell lines and locate each one in the
/// protein's annotated domain map.
#[derive(Parser)]
#[command(
    name = "mutation_mapper",
    group(ArgGroup::new("mode").required(true).args(["lines", "proteins"]))
)]
struct Cli {
    /// Cell-line name fragments to intersect (e.g. "hela mcf7")
    #[arg(short = 'l', long = "lines", num_args = 1..)]
    lines: Vec<String>,

    /// Gene/protein symbols to analyze
    #[arg(short = 'p', long = "proteins", num_args = 1..)]
    proteins: Vec<String>,

    /// Path to the mutation annotation table
    #[arg(long, default_value = "ccle_optimized.csv")]
    table: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let table = MutationTable::from_csv(&cli.table)?;

    if !cli.lines.is_empty() {
        analysis::analyze_lines(&cli.lines, &table)
    } else {
        analysis::analyze_prots(&cli.proteins, &table)
    }
}
