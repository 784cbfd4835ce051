use std::fmt;

/// One annotated protein region, with inclusive residue bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    pub start: u32,
    pub end: u32,
    pub name: String,
}

impl Domain {
    /// Invariant: start <= end, both inclusive.
    pub fn contains(&self, position: u32) -> bool {
        self.start <= position && position <= self.end
    }
}

/// Structured description of one protein record. Domain order follows the
/// source text; it defines first-match priority for overlapping domains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProteinRecord {
    pub name: String,
    pub function: String,
    pub domains: Vec<Domain>,
}

/// Where a point mutation landed, if anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationResult {
    /// Position falls inside a domain; offset is 1-based within it.
    Located { domain: String, offset: u32 },
    NotInDomain,
    Unparseable,
}

impl fmt::Display for LocationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationResult::Located { domain, offset } => write!(f, "{}: {}", domain, offset),
            LocationResult::NotInDomain => write!(f, "NID"),
            LocationResult::Unparseable => write!(f, "-"),
        }
    }
}
