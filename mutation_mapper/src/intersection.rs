use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Genes mutated in every line. Sorted so downstream reports are
/// deterministic. One line degenerates to that line's own gene set.
pub fn shared_genes(gene_sets: &[HashSet<String>]) -> BTreeSet<String> {
    let mut sets = gene_sets.iter();
    let mut shared: BTreeSet<String> = match sets.next() {
        Some(first) => first.iter().cloned().collect(),
        None => return BTreeSet::new(),
    };
    for set in sets {
        shared.retain(|gene| set.contains(gene));
    }
    shared
}

/// Expansion path for an empty intersection: genes mutated in at least
/// `min_lines` of the lines (but not all of them), mapped to the lines
/// they are absent from.
pub fn near_shared_genes(
    lines: &[String],
    gene_sets: &[HashSet<String>],
    min_lines: usize,
) -> BTreeMap<String, Vec<String>> {
    let mut carriers: BTreeMap<&String, usize> = BTreeMap::new();
    for set in gene_sets {
        for gene in set {
            *carriers.entry(gene).or_default() += 1;
        }
    }

    let mut near = BTreeMap::new();
    for (gene, count) in carriers {
        if count >= min_lines && count < gene_sets.len() {
            let missing: Vec<String> = lines
                .iter()
                .zip(gene_sets)
                .filter(|(_, set)| !set.contains(gene))
                .map(|(line, _)| line.clone())
                .collect();
            near.insert(gene.clone(), missing);
        }
    }
    near
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(genes: &[&str]) -> HashSet<String> {
        genes.iter().map(|g| g.to_string()).collect()
    }

    #[test]
    fn intersection_matches_mathematical_definition() {
        let a = set(&["TP53", "BRAF", "KRAS"]);
        let b = set(&["TP53", "KRAS", "PTEN"]);
        let c = set(&["KRAS", "TP53", "EGFR"]);

        let shared = shared_genes(&[a.clone(), b.clone(), c.clone()]);
        let expected: BTreeSet<String> = ["TP53", "KRAS"].iter().map(|s| s.to_string()).collect();
        assert_eq!(shared, expected);

        // Order of lines must not matter.
        assert_eq!(shared, shared_genes(&[c, a, b]));
    }

    #[test]
    fn single_line_degenerates_to_its_own_set() {
        let a = set(&["TP53", "BRAF"]);
        let shared = shared_genes(&[a.clone()]);
        assert_eq!(shared.len(), 2);
        assert!(shared.contains("TP53"));
        assert!(shared.contains("BRAF"));
    }

    #[test]
    fn disjoint_sets_yield_empty_intersection() {
        let shared = shared_genes(&[set(&["TP53"]), set(&["BRAF"])]);
        assert!(shared.is_empty());
    }

    #[test]
    fn near_shared_reports_the_absent_lines() {
        let lines = vec![
            "HELA_CERVIX".to_string(),
            "MCF7_BREAST".to_string(),
            "A549_LUNG".to_string(),
        ];
        let sets = vec![
            set(&["TP53", "BRAF"]),
            set(&["TP53", "PTEN"]),
            set(&["BRAF", "TP53"]),
        ];
        // TP53 is in all three lines, so the intersection is not empty here,
        // but the near-shared view must still exclude it.
        let near = near_shared_genes(&lines, &sets, 2);
        assert!(!near.contains_key("TP53"));
        assert_eq!(near["BRAF"], vec!["MCF7_BREAST"]);
        assert!(!near.contains_key("PTEN"));
    }
}
