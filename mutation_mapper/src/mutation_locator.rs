use regex::Regex;

use crate::models::{LocationResult, ProteinRecord};

/// Maps protein-change descriptors like "V600E" onto the domain list of a
/// parsed protein record.
pub struct MutationLocator {
    position_re: Regex,
}

impl MutationLocator {
    pub fn new() -> Self {
        Self {
            // Residue position sits between the reference and the variant
            // amino-acid letter.
            position_re: Regex::new(r"[A-Z]([0-9]+)[A-Z]").expect("valid pattern"),
        }
    }

    /// Residue position of a point-mutation descriptor, if it has one.
    pub fn position(&self, pchange: &str) -> Option<u32> {
        self.position_re
            .captures(pchange)?
            .get(1)?
            .as_str()
            .parse()
            .ok()
    }

    /// First domain (in record order) containing the mutated residue.
    /// Overlapping domains resolve to the earlier one in the source text.
    pub fn locate(&self, pchange: &str, protein: &ProteinRecord) -> LocationResult {
        let position = match self.position(pchange) {
            Some(p) => p,
            None => return LocationResult::Unparseable,
        };
        for domain in &protein.domains {
            if domain.contains(position) {
                return LocationResult::Located {
                    domain: domain.name.clone(),
                    offset: position - domain.start + 1,
                };
            }
        }
        LocationResult::NotInDomain
    }
}

impl Default for MutationLocator {
    fn default() -> Self {
        Self::new()
    }
}
