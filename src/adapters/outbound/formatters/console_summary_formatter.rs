use crate::application::read_models::{ComponentView, ReportReadModel};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use owo_colors::OwoColorize;
use std::fmt::Write;

/// Locations shown per component in the terminal table
const MAX_CONSOLE_LOCATIONS: usize = 3;

const NAME_WIDTH: usize = 40;
const TARGET_WIDTH: usize = 25;
const TYPE_WIDTH: usize = 15;

/// ConsoleSummaryFormatter adapter for the colored terminal summary
///
/// Renders one table row per component, the per-type breakdown and the
/// policy violations. Intended for stderr.
pub struct ConsoleSummaryFormatter;

impl ConsoleSummaryFormatter {
    pub fn new() -> Self {
        Self
    }

    fn render_table(out: &mut String, model: &ReportReadModel) {
        let header = format!(
            "{:<nw$} {:<tw$} {:<yw$} {}",
            "AI Component",
            "Target Name",
            "Type",
            "Locations",
            nw = NAME_WIDTH,
            tw = TARGET_WIDTH,
            yw = TYPE_WIDTH
        );
        let _ = writeln!(out, "{}", header.bold().magenta());
        let _ = writeln!(out, "{}", "─".repeat(NAME_WIDTH + TARGET_WIDTH + TYPE_WIDTH + 33).dimmed());

        for component in model.components() {
            Self::render_row(out, component);
        }
    }

    fn render_row(out: &mut String, component: &ComponentView) {
        let locations = display_locations(&component.locations);
        let name = if component.is_violation() {
            format!("{:<w$}", fit(&component.name, NAME_WIDTH), w = NAME_WIDTH)
                .red()
                .bold()
                .to_string()
        } else {
            format!("{:<w$}", fit(&component.name, NAME_WIDTH), w = NAME_WIDTH)
                .cyan()
                .to_string()
        };

        let _ = writeln!(
            out,
            "{} {} {} {}",
            name,
            format!("{:<w$}", fit(&component.target_name, TARGET_WIDTH), w = TARGET_WIDTH).yellow(),
            format!("{:<w$}", fit(&component.component_type, TYPE_WIDTH), w = TYPE_WIDTH).blue(),
            locations[0].dimmed()
        );

        let indent = " ".repeat(NAME_WIDTH + TARGET_WIDTH + TYPE_WIDTH + 3);
        for line in &locations[1..] {
            let _ = writeln!(out, "{}{}", indent, line.dimmed());
        }
    }

    fn render_breakdown(out: &mut String, model: &ReportReadModel) {
        if model.type_breakdown.is_empty() {
            return;
        }

        let _ = writeln!(out, "\n{}", "📊 Component Types Breakdown:".bold().cyan());
        for (label, count) in &model.type_breakdown {
            let _ = writeln!(out, "   {:<24} {}", label, count.green());
        }
    }

    fn render_violations(out: &mut String, model: &ReportReadModel) {
        let violations = &model.summary.violations;
        if violations.is_empty() {
            return;
        }

        let _ = writeln!(
            out,
            "\n{}",
            format!("🚫 Policy Violations: {}", violations.len()).bold().red()
        );
        for violation in violations {
            let _ = writeln!(
                out,
                "   {} (rule: {}) in {}",
                violation.identifier.red(),
                violation.matched_rule,
                violation.target_name.yellow()
            );
        }
    }

    fn render_failures(out: &mut String, model: &ReportReadModel) {
        let failures = &model.summary.failures;
        if !failures.is_empty() {
            let _ = writeln!(
                out,
                "\n{}",
                format!("⚠️  Targets without a usable AI-BOM: {}", failures.len())
                    .bold()
                    .yellow()
            );
            for failure in failures {
                let _ = writeln!(out, "   {} ({})", failure.target_name, failure.stage);
            }
        }

        if !model.skipped_targets.is_empty() {
            let _ = writeln!(
                out,
                "{}",
                format!(
                    "⏭️  Skipped {} unsupported target(s)",
                    model.skipped_targets.len()
                )
                .dimmed()
            );
        }
    }
}

impl Default for ConsoleSummaryFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for ConsoleSummaryFormatter {
    fn format(&self, model: &ReportReadModel) -> Result<String> {
        let mut out = String::new();

        if model.summary.total_components == 0 {
            let _ = writeln!(
                out,
                "{}",
                "⚠️  No AI components found in any targets.".bold().yellow()
            );
            Self::render_failures(&mut out, model);
            return Ok(out);
        }

        let _ = writeln!(
            out,
            "\n{}\n",
            "🤖 AI Components Summary - All Targets 🎯".bold().green()
        );
        Self::render_table(&mut out, model);

        let _ = writeln!(
            out,
            "\n{}",
            format!(
                "📈 Total AI Components Found: {}",
                model.summary.total_components
            )
            .bold()
            .green()
        );
        Self::render_breakdown(&mut out, model);
        Self::render_violations(&mut out, model);
        Self::render_failures(&mut out, model);

        Ok(out)
    }
}

/// At most three locations plus an overflow line; never empty
fn display_locations(locations: &[String]) -> Vec<String> {
    if locations.is_empty() {
        return vec!["No source locations".to_string()];
    }

    let mut lines: Vec<String> = locations
        .iter()
        .take(MAX_CONSOLE_LOCATIONS)
        .cloned()
        .collect();
    if locations.len() > MAX_CONSOLE_LOCATIONS {
        lines.push(format!(
            "... and {} more",
            locations.len() - MAX_CONSOLE_LOCATIONS
        ));
    }
    lines
}

/// Truncates to `width` characters, marking the cut with an ellipsis
fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", kept)
}
