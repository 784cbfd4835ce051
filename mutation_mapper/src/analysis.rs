use std::collections::HashSet;

use anyhow::Result;
use tracing::{error, info, warn};

use crate::intersection::{near_shared_genes, shared_genes};
use crate::line_resolver::resolve_lines;
use crate::mutation_locator::MutationLocator;
use crate::mutation_table::MutationTable;
use crate::record_parser::RecordParser;
use crate::report;
use crate::uniprot::UniprotClient;

/// Line-analysis mode: find genes mutated in every requested cell line and
/// report where each mutation falls in the protein's domain map.
pub fn analyze_lines(fragments: &[String], table: &MutationTable) -> Result<()> {
    let resolved = resolve_lines(fragments, &table.tumors()?);
    if resolved.lines.is_empty() {
        warn!("None of the requested lines matched the mutation table");
        return Ok(());
    }

    let mut gene_sets: Vec<HashSet<String>> = Vec::with_capacity(resolved.lines.len());
    for line in &resolved.lines {
        gene_sets.push(table.genes_for(line)?);
    }

    let shared = shared_genes(&gene_sets);
    if shared.is_empty() {
        expand_search(&resolved.lines, &gene_sets);
        return Ok(());
    }

    info!(
        "Found {} genes mutated across all {} lines",
        shared.len(),
        resolved.lines.len()
    );
    println!(
        "Found common mutations in {}\n",
        shared.iter().cloned().collect::<Vec<_>>().join(" ")
    );

    let client = UniprotClient::new()?;
    let parser = RecordParser::new();
    let locator = MutationLocator::new();

    // A failed fetch or parse drops that gene only; the rest still report.
    for gene in &shared {
        if let Err(e) = report_gene(gene, table, &resolved.lines, &client, &parser, &locator) {
            error!("Skipping {}: {}", gene, e);
        }
    }

    Ok(())
}

fn report_gene(
    gene: &str,
    table: &MutationTable,
    lines: &[String],
    client: &UniprotClient,
    parser: &RecordParser,
    locator: &MutationLocator,
) -> Result<()> {
    let raw = client.fetch_record(gene)?;
    let protein = parser.parse(&raw)?;
    let rows = table.mutations_in(gene, lines)?;
    report::assemble(gene, &protein, rows, locator)?.print();
    Ok(())
}

/// Empty-intersection fallback: relax "mutated in all n lines" to "mutated
/// in at least n-1 of them" and name the lines each near-shared gene is
/// missing from. Diagnostic only; no protein records are fetched here.
fn expand_search(lines: &[String], gene_sets: &[HashSet<String>]) {
    if lines.len() < 2 {
        println!("No shared mutations found.");
        return;
    }

    let near = near_shared_genes(lines, gene_sets, lines.len() - 1);
    if near.is_empty() {
        println!(
            "No gene is mutated in {} or more of the {} requested lines.",
            lines.len() - 1,
            lines.len()
        );
        return;
    }

    println!("No gene is mutated in every line. Genes mutated in all but one line:");
    for (gene, missing) in &near {
        println!("  {} (absent from {})", gene, missing.join(", "));
    }
}

/// Protein-analysis mode: resolve the requested symbols against the table.
pub fn analyze_prots(names: &[String], table: &MutationTable) -> Result<()> {
    let known = table.known_genes()?;
    let mut resolved = Vec::new();
    let mut unknown = Vec::new();

    for name in names {
        let symbol = name.to_uppercase();
        if known.contains(&symbol) {
            resolved.push(symbol);
        } else {
            unknown.push(name.clone());
        }
    }

    if !unknown.is_empty() {
        warn!(
            "Proteins {} not found in the mutation table",
            unknown.join(", ")
        );
    }
    if resolved.is_empty() {
        return Ok(());
    }

    println!("Resolved proteins: {}", resolved.join(" "));
    // TODO: report, per resolved protein, the cell lines carrying mutations
    // in it and their domain locations.
    info!("Per-protein reporting is not implemented yet");
    Ok(())
}
