use crate::aibom_aggregation::services::ScanSummary;
use crate::application::read_models::{ComponentView, ReportReadModel};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use indexmap::IndexMap;
use serde::Serialize;

#[derive(Serialize)]
struct GroupedDocument<'a> {
    groups: &'a IndexMap<String, Vec<ComponentView>>,
    summary: SummarySection<'a>,
}

#[derive(Serialize)]
struct SummarySection<'a> {
    #[serde(flatten)]
    scan: &'a ScanSummary,
    skipped_targets: &'a [String],
}

/// GroupedJsonFormatter adapter for the `{"groups", "summary"}` JSON shape
///
/// Carries no timestamp or report id, so identical inputs render
/// byte-identical output.
pub struct GroupedJsonFormatter;

impl GroupedJsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GroupedJsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for GroupedJsonFormatter {
    fn format(&self, model: &ReportReadModel) -> Result<String> {
        let document = GroupedDocument {
            groups: &model.groups,
            summary: SummarySection {
                scan: &model.summary,
                skipped_targets: &model.skipped_targets,
            },
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }
}
