use regex::Regex;
use thiserror::Error;
use tracing::warn;

use crate::models::{Domain, ProteinRecord};

const DOMAIN_MARKER: &str = "DOMAIN";
const CHAIN_MARKER: &str = "CHAIN";
const NP_BIND_MARKER: &str = "NP_BIND";
const CONTINUATION_PREFIX: &str = "\nCC       ";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordParseError {
    #[error("mandatory marker `{0}` not found in record")]
    MissingMarker(&'static str),
}

/// One DOMAIN feature instance from the scan. Instances whose span or note
/// cannot be extracted are tagged rather than failing the whole record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainCandidate {
    Parsed(Domain),
    Skipped(&'static str),
}

/// Parser for UniProtKB flat-text records. Patterns are compiled once at
/// construction and owned here.
pub struct RecordParser {
    name_re: Regex,
    function_re: Regex,
    span_re: Regex,
    note_re: Regex,
}

impl RecordParser {
    pub fn new() -> Self {
        Self {
            name_re: Regex::new(r"RecName: Full=(.*?);").expect("valid pattern"),
            function_re: Regex::new(r"FUNCTION: (.*?) \{").expect("valid pattern"),
            span_re: Regex::new(r"([0-9]+)\.\.([0-9]+)\nFT").expect("valid pattern"),
            note_re: Regex::new(r#"/note="(.*?)"\nFT"#).expect("valid pattern"),
        }
    }

    /// Parse one raw flat-text record into a protein description. Missing
    /// name or function markers are fatal for the record; malformed DOMAIN
    /// instances are skipped with a warning.
    pub fn parse(&self, raw: &str) -> Result<ProteinRecord, RecordParseError> {
        // Comment continuation lines wrap the function summary; collapse
        // them so it reads as one sentence.
        let text = raw.replace(CONTINUATION_PREFIX, " ");

        let name = self
            .capture(&self.name_re, &text)
            .ok_or(RecordParseError::MissingMarker("RecName: Full="))?;
        let function = self
            .capture(&self.function_re, &text)
            .ok_or(RecordParseError::MissingMarker("FUNCTION:"))?;

        let mut domains = Vec::new();
        for candidate in self.scan_domains(&text) {
            match candidate {
                DomainCandidate::Parsed(domain) => domains.push(domain),
                DomainCandidate::Skipped(reason) => {
                    warn!("Skipping malformed DOMAIN feature ({})", reason);
                }
            }
        }

        Ok(ProteinRecord {
            name,
            function,
            domains,
        })
    }

    /// Lazy cursor over the DOMAIN features of a record. The scan window is
    /// the feature-table sub-range from CHAIN to the first NP_BIND marker;
    /// records without a CHAIN feature scan nothing, records without
    /// NP_BIND scan to the end.
    pub fn scan_domains<'a>(&'a self, text: &'a str) -> DomainScan<'a> {
        let window = match text.find(CHAIN_MARKER) {
            Some(chain) => {
                let tail = &text[chain..];
                match tail.find(NP_BIND_MARKER) {
                    Some(np_bind) => &tail[..np_bind],
                    None => tail,
                }
            }
            None => "",
        };
        DomainScan {
            window,
            span_re: &self.span_re,
            note_re: &self.note_re,
        }
    }

    fn capture(&self, re: &Regex, text: &str) -> Option<String> {
        re.captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    }
}

impl Default for RecordParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over successive DOMAIN markers in the scan window. Each step
/// finds the next marker, extracts the start..end span and the quoted
/// /note= name from the text following it, and advances past the marker.
pub struct DomainScan<'a> {
    window: &'a str,
    span_re: &'a Regex,
    note_re: &'a Regex,
}

impl<'a> Iterator for DomainScan<'a> {
    type Item = DomainCandidate;

    fn next(&mut self) -> Option<DomainCandidate> {
        let window = self.window;
        let at = window.find(DOMAIN_MARKER)?;
        let tail = &window[at..];
        let rest = &tail[DOMAIN_MARKER.len()..];
        self.window = rest;

        // Bound the search to this instance; a garbled feature must not
        // capture the span or note of the one after it.
        let instance = match rest.find(DOMAIN_MARKER) {
            Some(next) => &tail[..DOMAIN_MARKER.len() + next],
            None => tail,
        };

        let span = match self.span_re.captures(instance) {
            Some(c) => c,
            None => return Some(DomainCandidate::Skipped("no start..end span")),
        };
        let name = match self.note_re.captures(instance).and_then(|c| c.get(1)) {
            Some(m) => m.as_str().to_string(),
            None => return Some(DomainCandidate::Skipped("no /note= name")),
        };
        let start: u32 = match span[1].parse() {
            Ok(v) => v,
            Err(_) => return Some(DomainCandidate::Skipped("span start out of range")),
        };
        let end: u32 = match span[2].parse() {
            Ok(v) => v,
            Err(_) => return Some(DomainCandidate::Skipped("span end out of range")),
        };
        if start > end {
            return Some(DomainCandidate::Skipped("inverted span"));
        }

        Some(DomainCandidate::Parsed(Domain { start, end, name }))
    }
}
