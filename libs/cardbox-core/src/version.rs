//! Version-log parsing.
//!
//! The changelog is a `version|date|description` blob with the newest entry
//! first; descriptions are rendered verbatim by the frontend.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One changelog row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionEntry {
    pub version: String,
    pub date: NaiveDate,
    pub description: String,
}

/// Parse changelog text, keeping source order. Rows with fewer than three
/// fields or an unparseable `YYYY-MM-DD` date are dropped.
pub fn parse_versions(text: &str) -> Vec<VersionEntry> {
    text.lines()
        .filter_map(|line| {
            let fields: Vec<&str> = line.trim().split('|').collect();
            if fields.len() < 3 {
                return None;
            }
            let date = NaiveDate::parse_from_str(fields[1].trim(), "%Y-%m-%d").ok()?;
            Some(VersionEntry {
                version: fields[0].trim().to_string(),
                date,
                description: fields[2].trim().to_string(),
            })
        })
        .collect()
}

/// Whether entries are ordered newest first.
pub fn is_newest_first(entries: &[VersionEntry]) -> bool {
    entries.windows(2).all(|pair| pair[0].date >= pair[1].date)
}
