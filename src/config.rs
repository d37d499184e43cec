use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Names of the columns the dashboard filters and aggregates on.
///
/// Different exports of the same report disagree on these (some call the
/// sector column "Business Vertical"), so they are configuration rather
/// than constants. Defaults match the common export schema; a
/// `columns.json` next to the working directory overrides them.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ColumnMap {
    pub sector: String,
    pub location: String,
    pub job_type: String,
    pub customer: String,
    pub cost: String,
    pub revenue: String,
    pub margin: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            sector: "Sector Name".to_string(),
            location: "Location".to_string(),
            job_type: "Job Type".to_string(),
            customer: "Customer Name".to_string(),
            cost: "Actual Cost".to_string(),
            revenue: "Actual Revenue".to_string(),
            margin: "Actual Margin %".to_string(),
        }
    }
}

impl ColumnMap {
    /// Read a column map from a JSON file. Unspecified fields keep their
    /// defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// Load `columns.json` from the working directory if present,
    /// otherwise the defaults.
    pub fn load_or_default() -> Self {
        let path = Path::new("columns.json");
        if !path.exists() {
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(map) => {
                log::info!("Loaded column map from {}", path.display());
                map
            }
            Err(e) => {
                log::warn!("Ignoring {}: {e:#}", path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_the_export_schema() {
        let map = ColumnMap::default();
        assert_eq!(map.sector, "Sector Name");
        assert_eq!(map.margin, "Actual Margin %");
    }

    #[test]
    fn partial_override_keeps_remaining_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"sector": "Business Vertical"}}"#).unwrap();
        file.flush().unwrap();

        let map = ColumnMap::from_file(file.path()).unwrap();
        assert_eq!(map.sector, "Business Vertical");
        assert_eq!(map.cost, "Actual Cost");
    }
}
