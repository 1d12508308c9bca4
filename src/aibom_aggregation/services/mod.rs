mod aggregator;
mod component_normalizer;
mod report_grouper;
mod report_metadata_generator;
mod scan;

pub use aggregator::Aggregator;
pub use component_normalizer::ComponentNormalizer;
pub use report_grouper::{GroupBy, GroupedReport, ReportGrouper};
pub use report_metadata_generator::{ReportMetadataGenerator, TOOL_NAME};
pub use scan::{run_scan, ScanOutcome, ScanSummary, ViolationView};
