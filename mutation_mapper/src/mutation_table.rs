use std::collections::{BTreeSet, HashSet};
use std::path::PathBuf;

use polars::prelude::*;
use tracing::{debug, info};

fn read_csv(file_path: &str) -> PolarsResult<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(PathBuf::from(file_path)))?
        .finish()
}

/// Read-only view over the mutation annotation table. Expected columns:
/// Tumor, Gene, PChange, Type, OChange, GChange.
pub struct MutationTable {
    df: DataFrame,
}

impl MutationTable {
    pub fn from_csv(path: &str) -> PolarsResult<Self> {
        info!("Reading mutation table from {}", path);
        let df = read_csv(path)?;
        debug!("Loaded {} mutation rows", df.height());
        Ok(Self { df })
    }

    pub fn from_dataframe(df: DataFrame) -> Self {
        Self { df }
    }

    /// Distinct tumor identifiers, sorted.
    pub fn tumors(&self) -> PolarsResult<BTreeSet<String>> {
        let tumors = self.df.column("Tumor")?.str()?;
        Ok(tumors.into_iter().flatten().map(str::to_string).collect())
    }

    /// Distinct gene symbols across the whole table, sorted.
    pub fn known_genes(&self) -> PolarsResult<BTreeSet<String>> {
        let genes = self.df.column("Gene")?.str()?;
        Ok(genes.into_iter().flatten().map(str::to_string).collect())
    }

    /// Genes with at least one mutation row for the given tumor.
    pub fn genes_for(&self, tumor: &str) -> PolarsResult<HashSet<String>> {
        let rows = self
            .df
            .clone()
            .lazy()
            .filter(col("Tumor").eq(lit(tumor)))
            .collect()?;
        let genes = rows.column("Gene")?.str()?;
        Ok(genes.into_iter().flatten().map(str::to_string).collect())
    }

    /// All mutation rows for one gene, restricted to the given tumors.
    pub fn mutations_in(&self, gene: &str, tumors: &[String]) -> PolarsResult<DataFrame> {
        let tumor_mask = tumors
            .iter()
            .map(|t| col("Tumor").eq(lit(t.as_str())))
            .reduce(|a, b| a.or(b))
            .unwrap_or_else(|| lit(false));
        self.df
            .clone()
            .lazy()
            .filter(col("Gene").eq(lit(gene)).and(tumor_mask))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;
    use std::io::Write;

    fn fixture() -> MutationTable {
        MutationTable::from_dataframe(
            df![
                "Tumor" => &["HELA_CERVIX", "HELA_CERVIX", "MCF7_BREAST", "MCF7_BREAST"],
                "Gene" => &["TP53", "BRAF", "TP53", "PTEN"],
                "PChange" => &["R175H", "V600E", "R273C", "R130Q"],
                "Type" => &["Missense", "Missense", "Missense", "Missense"],
                "OChange" => &["c.524G>A", "c.1799T>A", "c.817C>T", "c.389G>A"],
                "GChange" => &["g.7578406C>T", "g.140453136A>T", "g.7577121G>A", "g.89692905G>A"],
            ]
            .unwrap(),
        )
    }

    #[test]
    fn tumors_are_distinct_and_sorted() {
        let tumors = fixture().tumors().unwrap();
        let expected: Vec<&str> = vec!["HELA_CERVIX", "MCF7_BREAST"];
        assert_eq!(tumors.iter().map(String::as_str).collect::<Vec<_>>(), expected);
    }

    #[test]
    fn genes_for_one_tumor() {
        let genes = fixture().genes_for("HELA_CERVIX").unwrap();
        assert_eq!(genes.len(), 2);
        assert!(genes.contains("TP53"));
        assert!(genes.contains("BRAF"));
    }

    #[test]
    fn mutations_in_restricts_to_requested_tumors() {
        let table = fixture();
        let rows = table
            .mutations_in(
                "TP53",
                &["HELA_CERVIX".to_string(), "MCF7_BREAST".to_string()],
            )
            .unwrap();
        assert_eq!(rows.height(), 2);

        let rows = table.mutations_in("TP53", &["HELA_CERVIX".to_string()]).unwrap();
        assert_eq!(rows.height(), 1);
        let pchange = rows.column("PChange").unwrap().str().unwrap();
        assert_eq!(pchange.get(0), Some("R175H"));
    }

    #[test]
    fn loads_from_csv() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Tumor,Gene,PChange,Type,OChange,GChange").unwrap();
        writeln!(file, "HELA_CERVIX,TP53,R175H,Missense,c.524G>A,g.1").unwrap();
        writeln!(file, "MCF7_BREAST,TP53,R273C,Missense,c.817C>T,g.2").unwrap();
        file.flush().unwrap();

        let table = MutationTable::from_csv(file.path().to_str().unwrap()).unwrap();
        let tumors = table.tumors().unwrap();
        assert!(tumors.contains("HELA_CERVIX"));
        assert!(tumors.contains("MCF7_BREAST"));
        assert_eq!(table.known_genes().unwrap().len(), 1);
    }
}
