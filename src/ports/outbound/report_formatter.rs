use crate::application::read_models::ReportReadModel;
use crate::shared::Result;

/// ReportFormatter port for rendering a scan report
///
/// Implementations never mutate the model; rendering the same model twice
/// yields the same output.
pub trait ReportFormatter {
    /// Renders the report read model into its output format
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, model: &ReportReadModel) -> Result<String>;
}
