//! The engine's search report, treated as a versioned line-oriented wire format.
//!
//! Version 1:
//!
//! ```text
//! Found <N> results:
//! <rank>. Document: <path> (Score: <decimal>)
//! ...
//! ```
//!
//! Everything before the header is ignored. After it, lines that do not match
//! the entry shape are rejected one by one without failing the report, so the
//! engine may interleave diagnostics. A report with no header has no entries.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref V1_HEADER: Regex = Regex::new(r"^Found (\d+) results:$").expect("v1 header pattern");
    static ref V1_ENTRY: Regex = Regex::new(r"^(\d+)\. Document: (.*?) \(Score: ([0-9.]+)\)$").expect("v1 entry pattern");
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    pub rank: usize,
    pub path: String,
    pub score: f64,
}

/// Why a single line after the header was not accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineRejection {
    /// Not shaped like an entry at all.
    Unmatched,
    BadRank(String),
    BadScore(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    /// `N` from the header; `None` when no header was found.
    pub declared: Option<usize>,
    pub entries: Vec<ReportEntry>,
    pub rejected: Vec<(String, LineRejection)>,
}

#[derive(Debug, Clone, Copy)]
pub struct ReportSchema {
    pub version: u32,
    header: &'static Regex,
    entry: &'static Regex,
}

impl Default for ReportSchema {
    fn default() -> Self { Self::v1() }
}

impl ReportSchema {
    pub fn v1() -> Self {
        Self { version: 1, header: &*V1_HEADER, entry: &*V1_ENTRY }
    }

    /// The declared result count if `line` is a header.
    pub fn match_header(&self, line: &str) -> Option<usize> {
        let caps = self.header.captures(line)?;
        // A count too large for usize still marks the header.
        Some(caps[1].parse().unwrap_or(usize::MAX))
    }

    pub fn parse_entry(&self, line: &str) -> Result<ReportEntry, LineRejection> {
        let caps = self.entry.captures(line).ok_or(LineRejection::Unmatched)?;
        let rank = caps[1].parse().map_err(|_| LineRejection::BadRank(caps[1].to_string()))?;
        let score: f64 = caps[3].parse().map_err(|_| LineRejection::BadScore(caps[3].to_string()))?;
        if !score.is_finite() || score < 0.0 {
            return Err(LineRejection::BadScore(caps[3].to_string()));
        }
        Ok(ReportEntry { rank, path: caps[2].to_string(), score })
    }

    /// Split into trimmed non-empty lines, find the header, then keep every
    /// accepted entry after it in emitted order.
    pub fn parse(&self, raw: &str) -> Report {
        let mut lines = raw.lines().map(str::trim).filter(|l| !l.is_empty());
        let mut report = Report::default();
        for line in lines.by_ref() {
            if let Some(n) = self.match_header(line) {
                report.declared = Some(n);
                break;
            }
        }
        if report.declared.is_none() {
            return report;
        }
        for line in lines {
            match self.parse_entry(line) {
                Ok(entry) => report.entries.push(entry),
                Err(rejection) => report.rejected.push((line.to_string(), rejection)),
            }
        }
        report
    }
}
