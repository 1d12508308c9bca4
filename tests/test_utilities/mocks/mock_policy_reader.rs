use aibom_tools::prelude::*;
use std::path::Path;

/// Mock PolicyReader returning a fixed reject list
pub struct MockPolicyReader {
    pub reject: Vec<String>,
}

impl MockPolicyReader {
    pub fn new(reject: &[&str]) -> Self {
        Self {
            reject: reject.iter().map(|r| r.to_string()).collect(),
        }
    }
}

impl PolicyReader for MockPolicyReader {
    fn load_policy(&self, path: &Path) -> Result<Policy> {
        Ok(Policy::from_reject_list(path, self.reject.clone())?)
    }
}
