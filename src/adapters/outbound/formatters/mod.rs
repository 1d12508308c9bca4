/// Formatter adapters for the report output formats
mod console_summary_formatter;
mod escape;
mod grouped_json_formatter;
mod html_formatter;
mod legacy_json_formatter;

pub use console_summary_formatter::ConsoleSummaryFormatter;
pub use grouped_json_formatter::GroupedJsonFormatter;
pub use html_formatter::HtmlFormatter;
pub use legacy_json_formatter::LegacyJsonFormatter;
