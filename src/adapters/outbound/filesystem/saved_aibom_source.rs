use crate::aibom_aggregation::domain::TargetDescriptor;
use crate::ports::outbound::AibomSource;
use crate::shared::error::AibomError;
use crate::shared::security::read_regular_file;
use crate::shared::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// Organization id reported for targets read from a saved report
const SAVED_ORG_ID: &str = "saved-report";

#[derive(Debug, Deserialize)]
struct SavedReport {
    all_aibom_data: Vec<SavedEntry>,
}

#[derive(Debug, Deserialize)]
struct SavedEntry {
    #[serde(default = "unknown_target_name")]
    target_name: String,
    aibom_data: Value,
}

fn unknown_target_name() -> String {
    "Unknown Target".to_string()
}

/// FileAibomSource adapter serving AI-BOMs from a saved legacy JSON report
///
/// Lets a previous run's `{"all_aibom_data": [...]}` output be
/// re-aggregated offline with a different filter, grouping or policy.
pub struct FileAibomSource {
    entries: Vec<(TargetDescriptor, Value)>,
}

impl FileAibomSource {
    /// Reads and parses the saved report at `path`
    ///
    /// # Errors
    /// Returns an error if the file is unreadable or is not an
    /// `all_aibom_data` report.
    pub fn load(path: &Path) -> Result<Self> {
        let content = read_regular_file(path, "saved AI-BOM report")?;
        let report: SavedReport =
            serde_json::from_str(&content).map_err(|e| AibomError::FileReadError {
                path: path.to_path_buf(),
                details: format!("Not a saved AI-BOM report (expected all_aibom_data): {}", e),
            })?;

        let entries = report
            .all_aibom_data
            .into_iter()
            .enumerate()
            .map(|(i, entry)| {
                let descriptor = TargetDescriptor::new(
                    format!("saved-{}", i),
                    entry.target_name,
                    SAVED_ORG_ID,
                    None,
                );
                (descriptor, entry.aibom_data)
            })
            .collect();

        Ok(Self { entries })
    }
}

#[async_trait]
impl AibomSource for FileAibomSource {
    async fn list_targets(&self) -> Result<Vec<TargetDescriptor>> {
        Ok(self.entries.iter().map(|(d, _)| d.clone()).collect())
    }

    async fn fetch_aibom(&self, target: &TargetDescriptor) -> Result<Value> {
        self.entries
            .iter()
            .find(|(d, _)| d.id == target.id)
            .map(|(_, document)| document.clone())
            .ok_or_else(|| anyhow::anyhow!("Target {} is not in the saved report", target.name))
    }
}
