//! Builder for constructing ReportReadModel from a scan response

use super::component_view::ComponentView;
use super::report_read_model::{DocumentView, ReportMetadataView, ReportReadModel};
use crate::aibom_aggregation::domain::{ComponentRecord, ComponentType, Inventory, ReportMetadata};
use crate::application::dto::ScanResponse;
use indexmap::IndexMap;
use std::collections::BTreeMap;

/// Transforms a [`ScanResponse`] into the read model the formatters share
pub struct ReportReadModelBuilder;

impl ReportReadModelBuilder {
    pub fn build(response: &ScanResponse) -> ReportReadModel {
        let outcome = &response.outcome;

        let groups = outcome
            .report
            .groups()
            .iter()
            .map(|(key, records)| {
                (
                    key.clone(),
                    records.iter().map(Self::build_component).collect(),
                )
            })
            .collect();

        let documents = response
            .documents
            .iter()
            .map(|target| DocumentView {
                target_name: target.name().to_string(),
                aibom_data: target.raw_aibom().clone(),
            })
            .collect();

        ReportReadModel {
            metadata: Self::build_metadata(&response.metadata),
            group_by: outcome.report.group_by(),
            groups,
            summary: outcome.summary.clone(),
            type_breakdown: Self::build_type_breakdown(&outcome.inventory),
            skipped_targets: response.skipped_targets.clone(),
            documents,
        }
    }

    fn build_metadata(metadata: &ReportMetadata) -> ReportMetadataView {
        ReportMetadataView {
            timestamp: metadata.timestamp().to_string(),
            tool_name: metadata.tool_name().to_string(),
            tool_version: metadata.tool_version().to_string(),
            report_id: metadata.report_id().to_string(),
        }
    }

    fn build_component(record: &ComponentRecord) -> ComponentView {
        ComponentView {
            name: record.name().to_string(),
            identifier: record.identifier().to_string(),
            version: record.version().to_string(),
            component_type: record.component_type().label(),
            target_name: record.target_name().to_string(),
            locations: record.locations().to_vec(),
            metadata: record.metadata().clone(),
            policy: record.policy().clone(),
        }
    }

    /// Per-type counts, ordered by raw type string
    fn build_type_breakdown(inventory: &Inventory) -> IndexMap<String, usize> {
        let mut counts: BTreeMap<String, (&ComponentType, usize)> = BTreeMap::new();
        for record in inventory.records() {
            let component_type = record.component_type();
            counts
                .entry(component_type.raw().to_string())
                .or_insert((component_type, 0))
                .1 += 1;
        }

        let mut breakdown = IndexMap::with_capacity(counts.len());
        for (component_type, count) in counts.into_values() {
            let mut label = component_type.breakdown_label();
            if breakdown.contains_key(&label) {
                label = format!("{} ({})", label, component_type.raw());
            }
            breakdown.insert(label, count);
        }
        breakdown
    }
}
