use crate::aibom_aggregation::domain::ReportMetadata;
use chrono::Utc;
use uuid::Uuid;

/// Tool name stamped into every report
pub const TOOL_NAME: &str = "aibom-tools";

/// ReportMetadataGenerator - timestamps and identifies a report run
pub struct ReportMetadataGenerator;

impl ReportMetadataGenerator {
    /// Builds metadata with the current UTC time and a fresh `urn:uuid` id
    pub fn generate(tool_name: &str, tool_version: &str) -> ReportMetadata {
        ReportMetadata::new(
            Utc::now().to_rfc3339(),
            tool_name.to_string(),
            tool_version.to_string(),
            format!("urn:uuid:{}", Uuid::new_v4()),
        )
    }

    /// Metadata for this build of aibom-tools
    pub fn generate_default() -> ReportMetadata {
        Self::generate(TOOL_NAME, env!("CARGO_PKG_VERSION"))
    }
}
