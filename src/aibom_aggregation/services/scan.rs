use super::{Aggregator, GroupBy, GroupedReport, ReportGrouper};
use crate::aibom_aggregation::domain::{Inventory, Target, TargetFailure, TypeFilter};
use crate::aibom_aggregation::policies::Policy;
use indexmap::IndexMap;
use serde::Serialize;

/// A violating record, flattened for reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViolationView {
    pub identifier: String,
    pub matched_rule: String,
    pub target_name: String,
}

/// Counts and violation list of one scan run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanSummary {
    pub total_components: usize,
    pub targets_scanned: usize,
    pub group_by: GroupBy,
    pub group_counts: IndexMap<String, usize>,
    pub violation_count: usize,
    pub violations: Vec<ViolationView>,
    pub failures: Vec<TargetFailure>,
}

impl ScanSummary {
    fn from_report(inventory: &Inventory, report: &GroupedReport) -> Self {
        let violations: Vec<ViolationView> = inventory
            .records()
            .iter()
            .filter_map(|record| {
                record.policy().violation().map(|violation| ViolationView {
                    identifier: record.identifier().to_string(),
                    matched_rule: violation.matched_rule.clone(),
                    target_name: record.target_name().to_string(),
                })
            })
            .collect();

        Self {
            total_components: inventory.records().len(),
            targets_scanned: inventory.targets().len(),
            group_by: report.group_by(),
            group_counts: report.group_counts(),
            violation_count: violations.len(),
            violations,
            failures: inventory.failures().to_vec(),
        }
    }

    /// Prepends failures that happened before aggregation (e.g. fetch errors)
    pub fn add_failures(&mut self, earlier: Vec<TargetFailure>) {
        if earlier.is_empty() {
            return;
        }
        let mut failures = earlier;
        failures.append(&mut self.failures);
        self.failures = failures;
    }

    pub fn has_violations(&self) -> bool {
        self.violation_count > 0
    }
}

/// Everything a scan run produces
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub inventory: Inventory,
    pub report: GroupedReport,
    pub summary: ScanSummary,
}

/// Aggregates the targets and projects the inventory into one grouping
///
/// Pure: the same inputs always yield the same outcome.
pub fn run_scan(
    targets: Vec<Target>,
    policy: Option<&Policy>,
    type_filter: Option<&TypeFilter>,
    group_by: GroupBy,
) -> ScanOutcome {
    let inventory = Aggregator::aggregate(targets, policy, type_filter);
    let report = ReportGrouper::group(&inventory, group_by);
    let summary = ScanSummary::from_report(&inventory, &report);

    ScanOutcome {
        inventory,
        report,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aibom_aggregation::domain::{ComponentType, FailureStage};
    use serde_json::json;
    use std::path::Path;

    fn policy(entries: &[&str]) -> Policy {
        Policy::from_reject_list(
            Path::new("policy.yml"),
            entries.iter().map(|e| e.to_string()).collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_two_repositories_one_forbidden_model() {
        let targets = vec![
            Target::new("org/repoA", json!({"models": [{"id": "gpt-4"}]})),
            Target::new("org/repoB", json!({"models": [{"id": "llama-2-7b"}]})),
        ];
        let policy = policy(&["gpt-4"]);

        let outcome = run_scan(targets, Some(&policy), None, GroupBy::Repository);

        assert_eq!(outcome.inventory.records().len(), 2);
        assert!(outcome
            .inventory
            .records()
            .iter()
            .all(|r| r.component_type() == &ComponentType::MlModel));
        assert_eq!(outcome.summary.violation_count, 1);
        assert_eq!(
            outcome.summary.violations[0],
            ViolationView {
                identifier: "gpt-4".to_string(),
                matched_rule: "gpt-4".to_string(),
                target_name: "org/repoA".to_string(),
            }
        );
        assert_eq!(outcome.report.groups().len(), 2);
        assert!(outcome.report.groups().values().all(|records| records.len() == 1));
    }

    #[test]
    fn test_summary_counts() {
        let targets = vec![
            Target::new(
                "org/a",
                json!({"components": [
                    {"type": "machine-learning-model", "name": "GPT-4"},
                    {"type": "library", "name": "torch"}
                ]}),
            ),
            Target::new("org/broken", json!("not a document")),
        ];
        let policy = policy(&["gpt-4"]);

        let outcome = run_scan(targets, Some(&policy), None, GroupBy::Component);
        let summary = &outcome.summary;

        assert_eq!(summary.total_components, 2);
        assert_eq!(summary.targets_scanned, 1);
        assert_eq!(summary.group_counts["ML Model"], 1);
        assert_eq!(summary.group_counts["Library"], 1);
        assert_eq!(summary.violations[0].identifier, "GPT-4");
        assert_eq!(summary.violations[0].matched_rule, "gpt-4");
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].target_name, "org/broken");
    }

    #[test]
    fn test_add_failures_keeps_fetch_failures_first() {
        let targets = vec![Target::new("org/broken", json!({}))];
        let mut outcome = run_scan(targets, None, None, GroupBy::Component);

        outcome.summary.add_failures(vec![TargetFailure::new(
            "org/unreachable",
            FailureStage::Fetch,
            "timeout",
        )]);

        let stages: Vec<FailureStage> = outcome.summary.failures.iter().map(|f| f.stage).collect();
        assert_eq!(stages, vec![FailureStage::Fetch, FailureStage::Normalize]);
    }

    #[test]
    fn test_empty_run() {
        let outcome = run_scan(vec![], None, None, GroupBy::Repository);
        assert_eq!(outcome.summary.total_components, 0);
        assert_eq!(outcome.summary.targets_scanned, 0);
        assert!(outcome.summary.group_counts.is_empty());
        assert!(!outcome.summary.has_violations());
    }

    #[test]
    fn test_summary_serialization_shape() {
        let targets = vec![Target::new("org/a", json!({"models": [{"id": "m"}]}))];
        let outcome = run_scan(targets, None, None, GroupBy::Component);
        let value = serde_json::to_value(&outcome.summary).unwrap();

        assert_eq!(value["group_by"], "component");
        assert_eq!(value["group_counts"]["ML Model"], 1);
        assert_eq!(value["violation_count"], 0);
    }
}
