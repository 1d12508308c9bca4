use super::escape::escape_html;
use crate::aibom_aggregation::domain::PolicyStatus;
use crate::application::read_models::{ComponentView, ReportReadModel};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use std::fmt::Write;

/// Locations listed per component before the rest are summarized
const MAX_HTML_LOCATIONS: usize = 5;

const STYLE: &str = r#"
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; margin: 0; padding: 20px; background-color: #f5f5f5; color: #333; }
        .container { max-width: 1200px; margin: 0 auto; background: white; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); overflow: hidden; }
        .header { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 30px; text-align: center; }
        .header h1 { margin: 0; font-size: 2.5em; font-weight: 300; }
        .header p { margin: 10px 0 0 0; opacity: 0.9; font-size: 1.1em; }
        .stats { display: flex; justify-content: space-around; padding: 20px; background: #f8f9fa; border-bottom: 1px solid #e9ecef; }
        .stat-item { text-align: center; }
        .stat-number { font-size: 2em; font-weight: bold; color: #667eea; }
        .stat-number.alert { color: #d32f2f; }
        .stat-label { color: #666; font-size: 0.9em; margin-top: 5px; }
        .section { padding: 20px; }
        .breakdown { display: flex; gap: 20px; margin-bottom: 20px; flex-wrap: wrap; }
        .breakdown-item { background: #f8f9fa; padding: 15px; border-radius: 8px; text-align: center; min-width: 120px; }
        .breakdown-count { font-size: 1.5em; font-weight: bold; color: #667eea; }
        .breakdown-label { color: #666; font-size: 0.9em; }
        table { width: 100%; border-collapse: collapse; margin-top: 10px; margin-bottom: 30px; }
        th { background: #667eea; color: white; padding: 15px; text-align: left; font-weight: 600; }
        td { padding: 12px 15px; border-bottom: 1px solid #e9ecef; }
        tr:hover { background-color: #f8f9fa; }
        tr.violation { background-color: #fdecea; }
        .type-badge { display: inline-block; padding: 4px 8px; border-radius: 12px; font-size: 0.8em; font-weight: 600; text-transform: uppercase; background: #fff3e0; color: #f57c00; }
        .type-ml-model { background: #e3f2fd; color: #1976d2; }
        .type-dataset { background: #f3e5f5; color: #7b1fa2; }
        .type-library { background: #e8f5e8; color: #388e3c; }
        .policy-violation { color: #d32f2f; font-weight: 600; }
        .policy-compliant { color: #388e3c; }
        .policy-not-evaluated { color: #999; }
        .locations { font-family: 'Monaco', 'Menlo', 'Ubuntu Mono', monospace; font-size: 0.9em; color: #666; max-width: 300px; word-break: break-all; }
        .violations { border-left: 4px solid #d32f2f; background: #fdecea; padding: 10px 20px; border-radius: 4px; }
        .failures { border-left: 4px solid #f57c00; background: #fff8e1; padding: 10px 20px; border-radius: 4px; }
        .no-data { text-align: center; padding: 60px 20px; color: #666; }
        .no-data h2 { color: #999; margin-bottom: 10px; }
        .footer { padding: 20px; text-align: center; color: #666; border-top: 1px solid #e9ecef; background: #f8f9fa; }
"#;

/// HtmlFormatter adapter for a self-contained static HTML report
///
/// Every AI-BOM-derived string is HTML-escaped before it is embedded.
pub struct HtmlFormatter;

impl HtmlFormatter {
    pub fn new() -> Self {
        Self
    }

    fn render_stats(html: &mut String, model: &ReportReadModel) {
        let summary = &model.summary;
        let violation_class = if summary.violation_count > 0 {
            "stat-number alert"
        } else {
            "stat-number"
        };

        html.push_str("        <div class=\"stats\">\n");
        for (class, value, label) in [
            ("stat-number", summary.total_components, "Total AI Components"),
            ("stat-number", summary.targets_scanned, "Targets Scanned"),
            ("stat-number", model.groups.len(), "Groups"),
            (violation_class, summary.violation_count, "Policy Violations"),
        ] {
            let _ = writeln!(
                html,
                "            <div class=\"stat-item\"><div class=\"{}\">{}</div><div class=\"stat-label\">{}</div></div>",
                class, value, label
            );
        }
        html.push_str("        </div>\n");
    }

    fn render_breakdown(html: &mut String, model: &ReportReadModel) {
        if model.type_breakdown.is_empty() {
            return;
        }

        html.push_str("            <h3>📊 Component Types Breakdown</h3>\n            <div class=\"breakdown\">\n");
        for (label, count) in &model.type_breakdown {
            let _ = writeln!(
                html,
                "                <div class=\"breakdown-item\"><div class=\"breakdown-count\">{}</div><div class=\"breakdown-label\">{}</div></div>",
                count,
                escape_html(label)
            );
        }
        html.push_str("            </div>\n");
    }

    fn render_violations(html: &mut String, model: &ReportReadModel) {
        let violations = &model.summary.violations;
        if violations.is_empty() {
            return;
        }

        let _ = writeln!(
            html,
            "            <h3>🚫 Forbidden Models ({})</h3>\n            <div class=\"violations\"><ul>",
            violations.len()
        );
        for violation in violations {
            let _ = writeln!(
                html,
                "                <li><strong>{}</strong> matched rule <code>{}</code> in {}</li>",
                escape_html(&violation.identifier),
                escape_html(&violation.matched_rule),
                escape_html(&violation.target_name)
            );
        }
        html.push_str("            </ul></div>\n");
    }

    fn render_groups(html: &mut String, model: &ReportReadModel) {
        let _ = writeln!(
            html,
            "            <h3>🔍 AI Components by {}</h3>",
            model.group_by
        );

        for (key, components) in &model.groups {
            let _ = writeln!(
                html,
                "            <h4>{} ({})</h4>",
                escape_html(key),
                components.len()
            );
            html.push_str(
                "            <table>\n                <thead>\n                    <tr><th>AI Component</th><th>Target Name</th><th>Type</th><th>Version</th><th>Locations</th><th>Policy</th></tr>\n                </thead>\n                <tbody>\n",
            );
            for component in components {
                Self::render_row(html, component);
            }
            html.push_str("                </tbody>\n            </table>\n");
        }
    }

    fn render_row(html: &mut String, component: &ComponentView) {
        let row_class = if component.is_violation() {
            " class=\"violation\""
        } else {
            ""
        };
        let version = if component.version.is_empty() {
            "-".to_string()
        } else {
            escape_html(&component.version)
        };

        let _ = writeln!(
            html,
            "                    <tr{}><td><strong>{}</strong></td><td>{}</td><td><span class=\"type-badge {}\">{}</span></td><td>{}</td><td class=\"locations\">{}</td><td>{}</td></tr>",
            row_class,
            escape_html(&component.name),
            escape_html(&component.target_name),
            type_css_class(&component.component_type),
            escape_html(&component.component_type),
            version,
            format_locations(&component.locations),
            policy_cell(component)
        );
    }

    fn render_failures(html: &mut String, model: &ReportReadModel) {
        let failures = &model.summary.failures;
        if failures.is_empty() && model.skipped_targets.is_empty() {
            return;
        }

        html.push_str("            <h3>⚠️ Targets Not Included</h3>\n            <div class=\"failures\"><ul>\n");
        for failure in failures {
            let _ = writeln!(
                html,
                "                <li><strong>{}</strong> ({} failed): {}</li>",
                escape_html(&failure.target_name),
                failure.stage,
                escape_html(&failure.reason)
            );
        }
        for name in &model.skipped_targets {
            let _ = writeln!(
                html,
                "                <li><strong>{}</strong> (skipped: unsupported integration)</li>",
                escape_html(name)
            );
        }
        html.push_str("            </ul></div>\n");
    }
}

impl Default for HtmlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for HtmlFormatter {
    fn format(&self, model: &ReportReadModel) -> Result<String> {
        let mut html = String::with_capacity(16 * 1024);

        let _ = write!(
            html,
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n    <meta charset=\"UTF-8\">\n    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n    <title>AI Bill of Materials Report</title>\n    <style>{}    </style>\n</head>\n<body>\n    <div class=\"container\">\n        <div class=\"header\">\n            <h1>🤖 AI Bill of Materials Report</h1>\n            <p>Comprehensive analysis of AI components across all targets</p>\n        </div>\n",
            STYLE
        );

        Self::render_stats(&mut html, model);

        html.push_str("        <div class=\"section\">\n");
        if model.groups.is_empty() {
            html.push_str("            <div class=\"no-data\">\n                <h2>⚠️ No AI Components Found</h2>\n                <p>No AI components were detected in any of the scanned targets.</p>\n            </div>\n");
        } else {
            Self::render_breakdown(&mut html, model);
            Self::render_violations(&mut html, model);
            Self::render_groups(&mut html, model);
        }
        Self::render_failures(&mut html, model);
        html.push_str("        </div>\n");

        let _ = write!(
            html,
            "        <div class=\"footer\">\n            <p>Generated by {} v{} • {} • {}</p>\n        </div>\n    </div>\n</body>\n</html>\n",
            escape_html(&model.metadata.tool_name),
            escape_html(&model.metadata.tool_version),
            escape_html(&model.metadata.timestamp),
            escape_html(&model.metadata.report_id)
        );

        Ok(html)
    }
}

/// `ML Model` -> `type-ml-model`
fn type_css_class(label: &str) -> String {
    let slug: String = label
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    format!("type-{}", slug)
}

fn format_locations(locations: &[String]) -> String {
    if locations.is_empty() {
        return "No source locations".to_string();
    }

    let shown: Vec<String> = locations
        .iter()
        .take(MAX_HTML_LOCATIONS)
        .map(|l| escape_html(l))
        .collect();
    let mut cell = shown.join("; ");
    if locations.len() > MAX_HTML_LOCATIONS {
        let _ = write!(cell, " ... and {} more", locations.len() - MAX_HTML_LOCATIONS);
    }
    cell
}

fn policy_cell(component: &ComponentView) -> String {
    match component.matched_rule() {
        Some(rule) => format!(
            "<span class=\"policy-violation\">🚫 Forbidden ({})</span>",
            escape_html(rule)
        ),
        None if component.policy == PolicyStatus::NotEvaluated => {
            "<span class=\"policy-not-evaluated\">-</span>".to_string()
        }
        None => "<span class=\"policy-compliant\">✅ Allowed</span>".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::formatters::test_support::{empty_model, sample_model};
    use crate::aibom_aggregation::services::GroupBy;

    fn render(model: &ReportReadModel) -> String {
        HtmlFormatter::new().format(model).unwrap()
    }

    #[test]
    fn test_html_document_structure() {
        let html = render(&sample_model(GroupBy::Component));
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>AI Bill of Materials Report</title>"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_html_stats_and_groups() {
        let html = render(&sample_model(GroupBy::Repository));
        assert!(html.contains("<div class=\"stat-number\">3</div><div class=\"stat-label\">Total AI Components</div>"));
        assert!(html.contains("<div class=\"stat-number\">2</div><div class=\"stat-label\">Targets Scanned</div>"));
        assert!(html.contains("<h4>org/repoA (2)</h4>"));
        assert!(html.contains("<h4>org/repoB (1)</h4>"));
        assert!(html.contains("AI Components by repository"));
    }

    #[test]
    fn test_html_highlights_violations() {
        let html = render(&sample_model(GroupBy::Component));
        assert!(html.contains("<tr class=\"violation\"><td><strong>gpt-4</strong>"));
        assert!(html.contains("Forbidden Models (1)"));
        assert!(html.contains("matched rule <code>GPT-4</code> in org/repoA"));
        assert!(html.contains("stat-number alert"));
    }

    #[test]
    fn test_html_escapes_component_values() {
        let html = render(&sample_model(GroupBy::Component));
        assert!(html.contains("&lt;script&gt;transformers&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_html_lists_failed_and_skipped_targets() {
        let html = render(&sample_model(GroupBy::Component));
        assert!(html.contains("<strong>org/broken</strong> (normalize failed)"));
        assert!(html.contains("<strong>docker/image</strong> (skipped"));
    }

    #[test]
    fn test_html_truncates_locations() {
        let locations: Vec<String> = (1..=7).map(|i| format!("f.py:{}", i)).collect();
        let cell = format_locations(&locations);
        assert!(cell.starts_with("f.py:1; f.py:2"));
        assert!(cell.ends_with(" ... and 2 more"));
        assert_eq!(format_locations(&[]), "No source locations");
    }

    #[test]
    fn test_html_footer_metadata() {
        let html = render(&sample_model(GroupBy::Component));
        assert!(html.contains("Generated by aibom-tools v0.2.0"));
        assert!(html.contains("urn:uuid:00000000-0000-4000-8000-000000000000"));
    }

    #[test]
    fn test_html_empty_report() {
        let html = render(&empty_model());
        assert!(html.contains("No AI Components Found"));
        assert!(!html.contains("<table>"));
    }

    #[test]
    fn test_type_css_class() {
        assert_eq!(type_css_class("ML Model"), "type-ml-model");
        assert_eq!(type_css_class("MCP Server"), "type-mcp-server");
    }
}
