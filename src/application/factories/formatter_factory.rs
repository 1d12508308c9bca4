use crate::adapters::outbound::formatters::{
    ConsoleSummaryFormatter, GroupedJsonFormatter, HtmlFormatter, LegacyJsonFormatter,
};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::ReportFormatter;

/// Factory for creating report formatters
///
/// Selects the formatter adapter for an [`OutputFormat`] so the CLI never
/// names concrete adapters.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified output format
    ///
    /// # Examples
    /// ```
    /// use aibom_tools::application::dto::OutputFormat;
    /// use aibom_tools::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Html);
    /// ```
    pub fn create(format: OutputFormat) -> Box<dyn ReportFormatter> {
        match format {
            OutputFormat::GroupedJson => Box::new(GroupedJsonFormatter::new()),
            OutputFormat::LegacyJson => Box::new(LegacyJsonFormatter::new()),
            OutputFormat::Html => Box::new(HtmlFormatter::new()),
            OutputFormat::ConsoleSummary => Box::new(ConsoleSummaryFormatter::new()),
        }
    }

    /// Returns the progress message for the specified output format
    ///
    /// # Examples
    /// ```
    /// use aibom_tools::application::dto::OutputFormat;
    /// use aibom_tools::application::factories::FormatterFactory;
    ///
    /// let message = FormatterFactory::progress_message(OutputFormat::Html);
    /// assert_eq!(message, "🌐 Generating HTML report...");
    /// ```
    pub fn progress_message(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::GroupedJson => "📝 Generating grouped JSON report...",
            OutputFormat::LegacyJson => "📝 Generating JSON report...",
            OutputFormat::Html => "🌐 Generating HTML report...",
            OutputFormat::ConsoleSummary => "📋 Preparing AI components summary...",
        }
    }
}
