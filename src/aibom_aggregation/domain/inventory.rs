use super::component_record::ComponentRecord;
use super::target::Target;
use serde::Serialize;
use std::fmt;

/// Stage of a scan in which a target was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    /// The AI-BOM document could not be retrieved
    Fetch,
    /// The document was retrieved but could not be normalized
    Normalize,
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureStage::Fetch => write!(f, "fetch"),
            FailureStage::Normalize => write!(f, "normalize"),
        }
    }
}

/// A target excluded from the inventory, with the reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetFailure {
    pub target_name: String,
    pub stage: FailureStage,
    pub reason: String,
}

impl TargetFailure {
    pub fn new(target_name: impl Into<String>, stage: FailureStage, reason: impl Into<String>) -> Self {
        Self {
            target_name: target_name.into(),
            stage,
            reason: reason.into(),
        }
    }
}

/// Inventory aggregate: every retained record of a scan run plus the targets
/// that contributed them
///
/// Built once by the aggregator and read-only afterwards. Every record's
/// `target_name` names one of `targets`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Inventory {
    records: Vec<ComponentRecord>,
    targets: Vec<Target>,
    failures: Vec<TargetFailure>,
}

impl Inventory {
    pub(crate) fn new(
        records: Vec<ComponentRecord>,
        targets: Vec<Target>,
        failures: Vec<TargetFailure>,
    ) -> Self {
        debug_assert!(records
            .iter()
            .all(|r| targets.iter().any(|t| t.name() == r.target_name())));
        Self {
            records,
            targets,
            failures,
        }
    }

    pub fn records(&self) -> &[ComponentRecord] {
        &self.records
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn failures(&self) -> &[TargetFailure] {
        &self.failures
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn violation_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.policy().is_violation())
            .count()
    }
}
