/// Report formats a scan can be rendered into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `{"groups": ..., "summary": ...}`
    GroupedJson,
    /// `{"all_aibom_data": [...]}`, the raw fetched documents
    LegacyJson,
    /// Static HTML page
    Html,
    /// Colored table and breakdown for the terminal
    ConsoleSummary,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" | "grouped-json" => Ok(OutputFormat::GroupedJson),
            "legacy-json" | "legacy" => Ok(OutputFormat::LegacyJson),
            "html" => Ok(OutputFormat::Html),
            "console" => Ok(OutputFormat::ConsoleSummary),
            _ => Err(format!(
                "Invalid format: {}. Please specify 'json', 'legacy-json', 'html' or 'console'",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::GroupedJson => write!(f, "json"),
            OutputFormat::LegacyJson => write!(f, "legacy-json"),
            OutputFormat::Html => write!(f, "html"),
            OutputFormat::ConsoleSummary => write!(f, "console"),
        }
    }
}
