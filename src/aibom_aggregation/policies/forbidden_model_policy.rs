use crate::aibom_aggregation::domain::{ComponentRecord, PolicyStatus, PolicyViolation};
use crate::shared::error::AibomError;
use indexmap::IndexMap;
use std::path::Path;

/// Forbidden-model policy: a set of rejected model identifiers
///
/// Entries are trimmed and case-folded once at load time. Duplicates (after
/// folding) collapse onto the first spelling seen, which is the one reported
/// as the matched rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    /// folded identifier -> entry as written in the policy file
    reject: IndexMap<String, String>,
}

impl Policy {
    /// Builds a policy from raw reject entries
    ///
    /// # Errors
    /// Returns `InvalidPolicy` if an entry is empty or whitespace only.
    pub fn from_reject_list(path: &Path, entries: Vec<String>) -> Result<Self, AibomError> {
        let mut reject = IndexMap::new();
        for (i, entry) in entries.into_iter().enumerate() {
            let trimmed = entry.trim();
            if trimmed.is_empty() {
                return Err(AibomError::InvalidPolicy {
                    path: path.to_path_buf(),
                    details: format!("reject[{}] must not be empty", i),
                });
            }
            reject
                .entry(fold_case(trimmed))
                .or_insert_with(|| trimmed.to_string());
        }
        Ok(Self { reject })
    }

    pub fn len(&self) -> usize {
        self.reject.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reject.is_empty()
    }

    /// Returns the matching reject entry for a model identifier, if any
    pub fn match_identifier(&self, identifier: &str) -> Option<&str> {
        self.reject
            .get(&fold_case(identifier.trim()))
            .map(String::as_str)
    }
}

/// Caseless comparison key
///
/// Upper-casing first expands characters such as `ß` and `ﬁ` into their
/// multi-letter forms, so `ß` and `SS` fold to the same key.
fn fold_case(value: &str) -> String {
    value.to_uppercase().to_lowercase()
}

/// ForbiddenModelPolicy - evaluates records against an optional [`Policy`]
///
/// Only `ML Model` records are checked. Without a policy every record stays
/// `NotEvaluated`.
pub struct ForbiddenModelPolicy;

impl ForbiddenModelPolicy {
    /// Annotates records with their policy status
    pub fn evaluate(mut records: Vec<ComponentRecord>, policy: Option<&Policy>) -> Vec<ComponentRecord> {
        let Some(policy) = policy else {
            return records;
        };

        for record in records.iter_mut() {
            if !record.component_type().is_model() {
                continue;
            }
            let status = match policy.match_identifier(record.identifier()) {
                Some(rule) => PolicyStatus::Violation(PolicyViolation {
                    matched_rule: rule.to_string(),
                }),
                None => PolicyStatus::Compliant,
            };
            record.set_policy(status);
        }

        records
    }
}
