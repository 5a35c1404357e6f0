//! Report rendering.
//!
//! Renderers are looked up by format name; callers fall back to the always
//! available JSON renderer when the lookup returns nothing. Rendering only
//! reads the finalized report, it never re-derives an ingestion decision.

use color_eyre::Result;
use rr_core::value::format_value;
use rr_protocol::Report;

pub trait ReportRenderer {
    fn render(&self, report: &Report) -> Result<String>;
}

/// Look up a renderer by format name. `None` means the caller should fall
/// back to [`JsonRenderer`].
pub fn renderer_for(format: &str) -> Option<Box<dyn ReportRenderer>> {
    match format {
        "json" => Some(Box::new(JsonRenderer)),
        "md" | "markdown" => Some(Box::new(MarkdownRenderer)),
        _ => None,
    }
}

/// Baseline renderer: the report serialized as pretty JSON.
pub struct JsonRenderer;

impl ReportRenderer for JsonRenderer {
    fn render(&self, report: &Report) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}

/// Compact human-readable summary tables.
pub struct MarkdownRenderer;

impl ReportRenderer for MarkdownRenderer {
    fn render(&self, report: &Report) -> Result<String> {
        let mut out = String::new();

        out.push_str("# Run report\n\n");
        out.push_str(&format!(
            "- generated: {}\n- runs: {}\n",
            report.generated_at.format("%Y-%m-%d %H:%M UTC"),
            report.runs.len()
        ));
        if let Some(baseline) = &report.baseline {
            out.push_str(&format!("- config baseline: {}\n", baseline.run_name));
        }
        out.push('\n');

        if !report.metrics.is_empty() {
            out.push_str("## Final metrics\n\n");
            out.push_str(&header_row(
                std::iter::once("metric").chain(report.runs.iter().map(|r| r.name.as_str())),
            ));
            for metric in &report.metrics {
                let mut row = vec![cell(metric)];
                for run in &report.runs {
                    row.push(match run.finals.get(metric) {
                        Some(value) => cell(&format_value(*value)),
                        None => String::new(),
                    });
                }
                out.push_str(&format!("| {} |\n", row.join(" | ")));
            }
            out.push('\n');
        }

        if !report.config_keys.is_empty() {
            out.push_str("## Config\n\n");
            out.push_str(&header_row(
                std::iter::once("key").chain(report.runs.iter().map(|r| r.name.as_str())),
            ));
            for key in &report.config_keys {
                let mut row = vec![cell(key)];
                for run in &report.runs {
                    row.push(match run.config_summary.get(key) {
                        Some(value) => cell(value),
                        None => String::new(),
                    });
                }
                out.push_str(&format!("| {} |\n", row.join(" | ")));
            }
            out.push('\n');
        }

        let warned: Vec<&rr_protocol::RunRecord> =
            report.runs.iter().filter(|r| !r.warnings.is_empty()).collect();
        if !warned.is_empty() {
            out.push_str("## Warnings\n\n");
            for run in warned {
                for warning in &run.warnings {
                    out.push_str(&format!("- {}: {}\n", run.name, cell(warning)));
                }
            }
            out.push('\n');
        }

        Ok(out)
    }
}

fn header_row<'a>(columns: impl Iterator<Item = &'a str>) -> String {
    let names: Vec<String> = columns.map(cell).collect();
    let rule: Vec<&str> = names.iter().map(|_| "---").collect();
    format!("| {} |\n| {} |\n", names.join(" | "), rule.join(" | "))
}

/// Pipe-safe, single-line, bounded table cell.
fn cell(text: &str) -> String {
    let s = text.replace('\n', " ").trim().replace('|', "\\|");
    if s.chars().count() > 80 {
        let mut short: String = s.chars().take(77).collect();
        short.push_str("...");
        return short;
    }
    s
}
