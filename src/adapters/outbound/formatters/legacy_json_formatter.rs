use crate::application::read_models::{DocumentView, ReportReadModel};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use serde::Serialize;

#[derive(Serialize)]
struct LegacyDocument<'a> {
    all_aibom_data: &'a [DocumentView],
}

/// LegacyJsonFormatter adapter for the flat `{"all_aibom_data": [...]}` shape
///
/// Writes the fetched documents untouched, one entry per target, indented
/// with four spaces. The output is accepted back by `scan --input`.
pub struct LegacyJsonFormatter;

impl LegacyJsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LegacyJsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for LegacyJsonFormatter {
    fn format(&self, model: &ReportReadModel) -> Result<String> {
        let document = LegacyDocument {
            all_aibom_data: &model.documents,
        };

        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        document.serialize(&mut serializer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::formatters::test_support::{empty_model, sample_model};
    use crate::aibom_aggregation::services::GroupBy;
    use serde_json::Value;

    #[test]
    fn test_legacy_shape_keeps_raw_documents() {
        let output = LegacyJsonFormatter::new()
            .format(&sample_model(GroupBy::Component))
            .unwrap();
        let json: Value = serde_json::from_str(&output).unwrap();

        let entries = json["all_aibom_data"].as_array().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0]["target_name"], "org/repoA");
        assert_eq!(
            entries[0]["aibom_data"]["data"]["attributes"]["components"][0]["name"],
            "Root"
        );
        assert_eq!(entries[2]["target_name"], "org/broken");
    }

    #[test]
    fn test_four_space_indent() {
        let output = LegacyJsonFormatter::new().format(&empty_model()).unwrap();
        assert_eq!(output, "{\n    \"all_aibom_data\": []\n}");
    }
}
