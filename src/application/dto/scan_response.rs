use crate::aibom_aggregation::domain::{ReportMetadata, Target};
use crate::aibom_aggregation::services::ScanOutcome;

/// ScanResponse - everything the scan use case produced
///
/// `documents` holds every fetched AI-BOM as received, including those
/// that later failed normalization, so a saved legacy report can be fed
/// back through `--input` and reproduce the same run.
#[derive(Debug, Clone)]
pub struct ScanResponse {
    pub outcome: ScanOutcome,
    pub documents: Vec<Target>,
    /// Names of targets skipped because their integration is not an SCM
    pub skipped_targets: Vec<String>,
    pub metadata: ReportMetadata,
}

impl ScanResponse {
    pub fn new(
        outcome: ScanOutcome,
        documents: Vec<Target>,
        skipped_targets: Vec<String>,
        metadata: ReportMetadata,
    ) -> Self {
        Self {
            outcome,
            documents,
            skipped_targets,
            metadata,
        }
    }

    pub fn has_violations(&self) -> bool {
        self.outcome.summary.has_violations()
    }
}
