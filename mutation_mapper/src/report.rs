use polars::prelude::*;

use crate::models::{LocationResult, ProteinRecord};
use crate::mutation_locator::MutationLocator;

/// One shared gene's report: protein metadata above a per-line mutation
/// table with a computed domain-location column.
pub struct GeneReport {
    pub gene: String,
    pub protein_name: String,
    pub function: String,
    pub table: DataFrame,
}

/// Join mutation rows with their domain locations. Bookkeeping columns are
/// dropped from display; rows are sorted by tumor for a stable report.
pub fn assemble(
    gene: &str,
    protein: &ProteinRecord,
    rows: DataFrame,
    locator: &MutationLocator,
) -> PolarsResult<GeneReport> {
    let pchanges = rows.column("PChange")?.str()?;
    let locations: Vec<String> = pchanges
        .into_iter()
        .map(|change| match change {
            Some(change) => locator.locate(change, protein).to_string(),
            None => LocationResult::Unparseable.to_string(),
        })
        .collect();

    let mut table = rows.clone();
    table.with_column(Series::new("Loc".into(), locations))?;
    let table = table
        .select(["Tumor", "PChange", "Loc"])?
        .sort(["Tumor"], SortMultipleOptions::default())?;

    Ok(GeneReport {
        gene: gene.to_string(),
        protein_name: protein.name.clone(),
        function: protein.function.clone(),
        table,
    })
}

impl GeneReport {
    pub fn print(&self) {
        println!("{}: {}", self.gene, self.protein_name);
        println!("{}\n", self.function);
        println!("{}\n", self.table);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Domain;
    use polars::df;

    fn protein() -> ProteinRecord {
        ProteinRecord {
            name: "Serine/threonine-protein kinase B-raf".to_string(),
            function: "Transduces mitogenic signals.".to_string(),
            domains: vec![
                Domain {
                    start: 1,
                    end: 50,
                    name: "DomainA".to_string(),
                },
                Domain {
                    start: 51,
                    end: 100,
                    name: "DomainB".to_string(),
                },
            ],
        }
    }

    fn rows() -> DataFrame {
        df![
            "Tumor" => &["MCF7_BREAST", "HELA_CERVIX", "A549_LUNG"],
            "Gene" => &["BRAF", "BRAF", "BRAF"],
            "PChange" => &["A25T", "A75T", "fs*12"],
            "Type" => &["Missense", "Missense", "Frameshift"],
            "OChange" => &["c.1", "c.2", "c.3"],
            "GChange" => &["g.1", "g.2", "g.3"],
        ]
        .unwrap()
    }

    #[test]
    fn two_domain_round_trip() {
        let report = assemble("BRAF", &protein(), rows(), &MutationLocator::new()).unwrap();
        assert_eq!(report.gene, "BRAF");
        let loc = report.table.column("Loc").unwrap().str().unwrap();
        let tumor = report.table.column("Tumor").unwrap().str().unwrap();

        // Sorted by tumor: A549_LUNG, HELA_CERVIX, MCF7_BREAST.
        assert_eq!(tumor.get(0), Some("A549_LUNG"));
        assert_eq!(loc.get(0), Some("-"));
        assert_eq!(tumor.get(1), Some("HELA_CERVIX"));
        assert_eq!(loc.get(1), Some("DomainB: 25"));
        assert_eq!(tumor.get(2), Some("MCF7_BREAST"));
        assert_eq!(loc.get(2), Some("DomainA: 25"));
    }

    #[test]
    fn bookkeeping_columns_are_dropped() {
        let report = assemble("BRAF", &protein(), rows(), &MutationLocator::new()).unwrap();
        let names: Vec<&str> = report
            .table
            .get_column_names()
            .iter()
            .map(|c| c.as_str())
            .collect();
        assert_eq!(names, vec!["Tumor", "PChange", "Loc"]);
    }
}
