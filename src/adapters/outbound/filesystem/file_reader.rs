use crate::aibom_aggregation::policies::Policy;
use crate::ports::outbound::PolicyReader;
use crate::shared::error::AibomError;
use crate::shared::security::read_regular_file;
use crate::shared::Result;
use serde::Deserialize;
use std::path::Path;

/// On-disk shape of a forbidden-model policy
#[derive(Debug, Deserialize)]
struct PolicyDocument {
    reject: Vec<String>,
}

/// FileSystemReader adapter for reading policy files
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl PolicyReader for FileSystemReader {
    fn load_policy(&self, path: &Path) -> Result<Policy> {
        let invalid = |details: String| AibomError::InvalidPolicy {
            path: path.to_path_buf(),
            details,
        };

        let content =
            read_regular_file(path, "policy file").map_err(|e| invalid(format!("{:#}", e)))?;

        let document: PolicyDocument =
            serde_yaml_ng::from_str(&content).map_err(|e| invalid(e.to_string()))?;

        let policy = Policy::from_reject_list(path, document.reject)?;
        tracing::debug!(path = %path.display(), entries = policy.len(), "loaded policy");
        Ok(policy)
    }
}
