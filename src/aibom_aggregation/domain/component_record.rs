use super::component_type::ComponentType;
use serde::Serialize;
use serde_json::{Map, Value};

/// The reject-list entry a model identifier matched
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyViolation {
    pub matched_rule: String,
}

/// Outcome of policy evaluation for a single record
///
/// `NotEvaluated` covers both "no policy supplied" and "policy does not
/// apply to this component type"; it is kept distinct from `Compliant`
/// even though reports only highlight violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PolicyStatus {
    #[default]
    NotEvaluated,
    Compliant,
    Violation(PolicyViolation),
}

impl PolicyStatus {
    pub fn violation(&self) -> Option<&PolicyViolation> {
        match self {
            PolicyStatus::Violation(violation) => Some(violation),
            _ => None,
        }
    }

    pub fn is_violation(&self) -> bool {
        matches!(self, PolicyStatus::Violation(_))
    }
}

/// One AI component discovered within a target
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentRecord {
    target_name: String,
    component_type: ComponentType,
    name: String,
    identifier: String,
    version: String,
    locations: Vec<String>,
    metadata: Map<String, Value>,
    policy: PolicyStatus,
}

impl ComponentRecord {
    pub fn new(
        target_name: impl Into<String>,
        component_type: ComponentType,
        name: impl Into<String>,
        identifier: impl Into<String>,
    ) -> Self {
        Self {
            target_name: target_name.into(),
            component_type,
            name: name.into(),
            identifier: identifier.into(),
            version: String::new(),
            locations: Vec::new(),
            metadata: Map::new(),
            policy: PolicyStatus::NotEvaluated,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_locations(mut self, locations: Vec<String>) -> Self {
        self.locations = locations;
        self
    }

    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    pub fn component_type(&self) -> &ComponentType {
        &self.component_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    pub fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }

    pub fn policy(&self) -> &PolicyStatus {
        &self.policy
    }

    /// The only mutation allowed after normalization
    pub(crate) fn set_policy(&mut self, status: PolicyStatus) {
        self.policy = status;
    }
}
