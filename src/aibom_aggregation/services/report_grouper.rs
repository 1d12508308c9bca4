use crate::aibom_aggregation::domain::{ComponentRecord, ComponentType, Inventory};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Partition key of a grouped report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    /// One bucket per component type
    #[default]
    Component,
    /// One bucket per target (source repository)
    Repository,
}

impl FromStr for GroupBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "component" | "components" | "type" => Ok(GroupBy::Component),
            "repository" | "repositories" | "repo" | "target" => Ok(GroupBy::Repository),
            _ => Err(format!(
                "Invalid group-by value: {}. Please specify 'component' or 'repository'",
                s
            )),
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupBy::Component => write!(f, "component"),
            GroupBy::Repository => write!(f, "repository"),
        }
    }
}

/// A read-only projection of an [`Inventory`] into ordered buckets
///
/// Buckets appear in first-seen order, and records keep their inventory
/// order inside each bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedReport {
    group_by: GroupBy,
    groups: IndexMap<String, Vec<ComponentRecord>>,
}

impl GroupedReport {
    pub fn group_by(&self) -> GroupBy {
        self.group_by
    }

    pub fn groups(&self) -> &IndexMap<String, Vec<ComponentRecord>> {
        &self.groups
    }

    /// Number of records per bucket, in bucket order
    pub fn group_counts(&self) -> IndexMap<String, usize> {
        self.groups
            .iter()
            .map(|(key, records)| (key.clone(), records.len()))
            .collect()
    }

    pub fn total_records(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// All records, bucket by bucket
    pub fn records(&self) -> impl Iterator<Item = &ComponentRecord> {
        self.groups.values().flatten()
    }
}

/// ReportGrouper - stable single-pass partition of an inventory
pub struct ReportGrouper;

impl ReportGrouper {
    pub fn group(inventory: &Inventory, group_by: GroupBy) -> GroupedReport {
        match group_by {
            GroupBy::Component => Self::group_by_component(inventory),
            GroupBy::Repository => Self::group_by_repository(inventory),
        }
    }

    /// Partitions on the component type itself; labels only name the buckets
    pub fn group_by_component(inventory: &Inventory) -> GroupedReport {
        let mut by_type: IndexMap<&ComponentType, Vec<ComponentRecord>> = IndexMap::new();
        for record in inventory.records() {
            by_type
                .entry(record.component_type())
                .or_default()
                .push(record.clone());
        }

        let mut groups = IndexMap::with_capacity(by_type.len());
        for (component_type, records) in by_type {
            let mut key = component_type.label();
            // Distinct unrecognized spellings can share a title-cased label
            if groups.contains_key(&key) {
                key = format!("{} ({})", key, component_type.raw());
            }
            groups.insert(key, records);
        }
        GroupedReport {
            group_by: GroupBy::Component,
            groups,
        }
    }

    pub fn group_by_repository(inventory: &Inventory) -> GroupedReport {
        Self::partition(inventory, GroupBy::Repository, |record| {
            record.target_name().to_string()
        })
    }

    fn partition(
        inventory: &Inventory,
        group_by: GroupBy,
        key_of: impl Fn(&ComponentRecord) -> String,
    ) -> GroupedReport {
        let mut groups: IndexMap<String, Vec<ComponentRecord>> = IndexMap::new();
        for record in inventory.records() {
            groups.entry(key_of(record)).or_default().push(record.clone());
        }
        GroupedReport { group_by, groups }
    }
}
