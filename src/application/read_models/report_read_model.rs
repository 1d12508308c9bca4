//! Report read model consumed by every formatter

use super::component_view::ComponentView;
use crate::aibom_aggregation::services::{GroupBy, ScanSummary};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// Query-optimized view of one scan run
#[derive(Debug, Clone)]
pub struct ReportReadModel {
    pub metadata: ReportMetadataView,
    pub group_by: GroupBy,
    /// Group key -> components, in first-seen order
    pub groups: IndexMap<String, Vec<ComponentView>>,
    pub summary: ScanSummary,
    /// Counts per component type, keyed by the display label with icon
    pub type_breakdown: IndexMap<String, usize>,
    pub skipped_targets: Vec<String>,
    /// Raw fetched documents, in fetch order
    pub documents: Vec<DocumentView>,
}

impl ReportReadModel {
    /// All components, group by group
    pub fn components(&self) -> impl Iterator<Item = &ComponentView> {
        self.groups.values().flatten()
    }
}

/// View representation of report metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportMetadataView {
    pub timestamp: String,
    pub tool_name: String,
    pub tool_version: String,
    pub report_id: String,
}

/// One fetched AI-BOM as it appears in the legacy JSON shape
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentView {
    pub target_name: String,
    pub aibom_data: Value,
}
