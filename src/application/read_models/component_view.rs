//! Component view struct for the read model

use crate::aibom_aggregation::domain::PolicyStatus;
use serde::Serialize;
use serde_json::{Map, Value};

/// Flattened, serializable view of one component record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentView {
    pub name: String,
    pub identifier: String,
    pub version: String,
    /// Component type label, e.g. `ML Model`
    #[serde(rename = "type")]
    pub component_type: String,
    pub target_name: String,
    pub locations: Vec<String>,
    pub metadata: Map<String, Value>,
    pub policy: PolicyStatus,
}

impl ComponentView {
    pub fn is_violation(&self) -> bool {
        self.policy.is_violation()
    }

    /// The reject-list entry this component matched, if any
    pub fn matched_rule(&self) -> Option<&str> {
        self.policy.violation().map(|v| v.matched_rule.as_str())
    }
}
