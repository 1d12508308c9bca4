use super::ComponentNormalizer;
use crate::aibom_aggregation::domain::{FailureStage, Inventory, Target, TargetFailure, TypeFilter};
use crate::aibom_aggregation::policies::{ForbiddenModelPolicy, Policy};

/// Aggregator - merges normalized, policy-annotated records of every target
///
/// Per target: normalize, evaluate against the policy, then apply the type
/// filter. Evaluation runs before filtering so the two stay independent.
/// A target that fails normalization is recorded as a failure and the
/// remaining targets are still aggregated.
pub struct Aggregator;

impl Aggregator {
    pub fn aggregate(
        targets: Vec<Target>,
        policy: Option<&Policy>,
        type_filter: Option<&TypeFilter>,
    ) -> Inventory {
        let mut records = Vec::new();
        let mut healthy_targets = Vec::with_capacity(targets.len());
        let mut failures = Vec::new();

        for target in targets {
            let normalized = match ComponentNormalizer::normalize(&target) {
                Ok(normalized) => normalized,
                Err(e) => {
                    tracing::debug!(target_name = target.name(), error = %e, "skipping malformed AI-BOM");
                    failures.push(TargetFailure::new(
                        target.name(),
                        FailureStage::Normalize,
                        e.to_string(),
                    ));
                    continue;
                }
            };

            let evaluated = ForbiddenModelPolicy::evaluate(normalized, policy);
            records.extend(
                evaluated
                    .into_iter()
                    .filter(|record| type_filter.map_or(true, |f| f.contains(record.component_type()))),
            );
            healthy_targets.push(target);
        }

        Inventory::new(records, healthy_targets, failures)
    }
}
