use crate::aibom_aggregation::domain::TypeFilter;
use crate::aibom_aggregation::policies::Policy;
use crate::aibom_aggregation::services::GroupBy;

/// Default number of AI-BOM fetches in flight
pub const DEFAULT_CONCURRENCY: usize = 4;

/// ScanRequest - validated input of the scan use case
///
/// Policy and filter are already parsed, so every fatal input error has
/// surfaced before any target is fetched.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    pub policy: Option<Policy>,
    pub type_filter: Option<TypeFilter>,
    pub group_by: GroupBy,
    /// Maximum concurrent fetches, at least 1
    pub concurrency: usize,
    /// Fail when no target yields a usable AI-BOM
    pub fail_on_empty: bool,
}

impl ScanRequest {
    pub fn new(group_by: GroupBy) -> Self {
        Self {
            policy: None,
            type_filter: None,
            group_by,
            concurrency: DEFAULT_CONCURRENCY,
            fail_on_empty: false,
        }
    }

    pub fn with_policy(mut self, policy: Option<Policy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_type_filter(mut self, type_filter: Option<TypeFilter>) -> Self {
        self.type_filter = type_filter;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_fail_on_empty(mut self, fail_on_empty: bool) -> Self {
        self.fail_on_empty = fail_on_empty;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_request_defaults() {
        let request = ScanRequest::new(GroupBy::Component);
        assert!(request.policy.is_none());
        assert!(request.type_filter.is_none());
        assert_eq!(request.concurrency, DEFAULT_CONCURRENCY);
        assert!(!request.fail_on_empty);
    }

    #[test]
    fn test_scan_request_concurrency_floor() {
        let request = ScanRequest::new(GroupBy::Repository).with_concurrency(0);
        assert_eq!(request.concurrency, 1);
    }
}
