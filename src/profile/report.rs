//! Reading saved profile CSVs back.
//!
//! Dashboards consume the saved file keyed by region label, so the reader
//! checks the same layout [`Profile::write_csv`](super::Profile::write_csv)
//! produces.

use crate::errors::{Error, Result};
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Header text of the weight column.
pub const LOC_HEADER: &str = "Lines Of Code";

/// Ordered `(label, weight)` pairs of a profile.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProfileReport {
    pub name: String,
    pub entries: Vec<(String, f64)>,
}

impl ProfileReport {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers = reader.headers()?;
        let name = match (headers.get(0), headers.get(1), headers.len()) {
            (Some(name), Some(LOC_HEADER), 2) => name.to_string(),
            _ => {
                return Err(Error::InvalidHeader(format!(
                    "expected [<profile name>, \"{}\"], found {:?}",
                    LOC_HEADER,
                    headers.iter().collect::<Vec<_>>()
                )))
            }
        };

        let mut entries = Vec::new();
        for record in reader.records() {
            let record = record?;
            let label = record.get(0).unwrap_or_default();
            let raw = record.get(1).unwrap_or_default();
            let weight = raw
                .trim()
                .parse::<f64>()
                .map_err(|_| Error::invalid_value(label, raw))?;
            entries.push((label.to_string(), weight));
        }

        Ok(Self { name, entries })
    }

    /// Weight recorded for `label`.
    pub fn weight_of(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, weight)| *weight)
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, weight)| weight).sum()
    }
}

/// Read a profile CSV written by [`Profile::save`](super::Profile::save).
pub fn read_profile(path: impl AsRef<Path>) -> Result<ProfileReport> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| Error::file_system("Failed to open profile report", path, e))?;
    ProfileReport::from_reader(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_reads_entries_in_order() {
        let data = indoc! {r#"
            "Complexity","Lines Of Code"
            "0-5","120"
            "6-10","45"
            "11-25","0"
            "25+","310"
        "#};

        let report = ProfileReport::from_reader(data.as_bytes()).unwrap();

        assert_eq!(report.name, "Complexity");
        assert_eq!(report.entries.len(), 4);
        assert_eq!(report.entries[0], ("0-5".to_string(), 120.0));
        assert_eq!(report.weight_of("25+"), Some(310.0));
        assert_eq!(report.weight_of("missing"), None);
        assert_eq!(report.total(), 475.0);
    }

    #[test]
    fn test_rejects_foreign_header() {
        let data = "\"Filename\",\"Language\"\n\"a.rs\",\"Rust\"\n";
        let err = ProfileReport::from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidHeader(_)));
    }

    #[test]
    fn test_rejects_non_numeric_weight() {
        let data = "\"Fan in\",\"Lines Of Code\"\n\"1-10\",\"many\"\n";
        let err = ProfileReport::from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidMetricValue { column, value } if column == "1-10" && value == "many"));
    }
}
