//! Output formatting helpers for CLI commands

use crate::enrich::{EnrichTask, EnrichmentReport, TaskOutcome};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde::Serialize;
use serde_json::json;
use std::path::Path;

/// View model for one food's enrichment results
#[derive(Debug, Clone, Serialize)]
pub struct ReportView {
    pub food_id: String,
    pub food_name: String,
    pub tasks: Vec<TaskView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskView {
    pub task: EnrichTask,
    pub success: bool,
    pub items: usize,
    pub elapsed_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&TaskOutcome> for TaskView {
    fn from(outcome: &TaskOutcome) -> Self {
        Self {
            task: outcome.task,
            success: outcome.is_success(),
            items: outcome.items,
            elapsed_ms: outcome.elapsed_ms,
            error: outcome.failure.as_ref().map(ToString::to_string),
        }
    }
}

impl From<&EnrichmentReport> for ReportView {
    fn from(report: &EnrichmentReport) -> Self {
        Self {
            food_id: report.food_id.clone(),
            food_name: report.food_name.clone(),
            tasks: report.outcomes.iter().map(TaskView::from).collect(),
        }
    }
}

fn outcome_cell(outcome: Option<&TaskOutcome>) -> String {
    match outcome {
        None => "-".dimmed().to_string(),
        Some(o) if o.is_success() && o.items > 0 => format!("✓ {}", o.items).green().to_string(),
        Some(o) if o.is_success() => "✓ 0".yellow().to_string(),
        Some(o) => match &o.failure {
            Some(failure) => format!("✗ {}", failure.kind).red().to_string(),
            None => "✗".red().to_string(),
        },
    }
}

/// Format reports as a table, one row per food
pub fn format_reports_table(reports: &[EnrichmentReport]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Food", "ID", "Nutrients", "Bioactive", "Impacts", "Time"]);

    for report in reports {
        let elapsed: u64 = report.outcomes.iter().map(|o| o.elapsed_ms).sum();
        table.add_row(vec![
            Cell::new(&report.food_name),
            Cell::new(&report.food_id),
            Cell::new(outcome_cell(report.outcome(EnrichTask::Nutrients))),
            Cell::new(outcome_cell(report.outcome(EnrichTask::Bioactive))),
            Cell::new(outcome_cell(report.outcome(EnrichTask::Impacts))),
            Cell::new(format!("{}ms", elapsed)),
        ]);
    }

    table.to_string()
}

/// Format reports as JSON
pub fn format_reports_json(reports: &[EnrichmentReport]) -> serde_json::Result<String> {
    let views: Vec<ReportView> = reports.iter().map(ReportView::from).collect();
    serde_json::to_string_pretty(&json!({ "foods": views }))
}

/// One-line summary printed under the table
pub fn format_summary_line(reports: &[EnrichmentReport], output: &Path) -> String {
    let failed = reports.iter().filter(|r| !r.is_success()).count();
    let status = if failed == 0 {
        format!("{} foods enriched", reports.len()).green().to_string()
    } else {
        format!("{} of {} foods had failures", failed, reports.len())
            .yellow()
            .to_string()
    };
    format!("{} → {}", status, output.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::{FailureKind, PredictionFailure};

    fn reports() -> Vec<EnrichmentReport> {
        vec![
            EnrichmentReport {
                food_id: "f1".into(),
                food_name: "Salmon".into(),
                outcomes: vec![TaskOutcome {
                    task: EnrichTask::Nutrients,
                    elapsed_ms: 12,
                    items: 5,
                    failure: None,
                }],
            },
            EnrichmentReport {
                food_id: "f2".into(),
                food_name: "Kale".into(),
                outcomes: vec![TaskOutcome {
                    task: EnrichTask::Impacts,
                    elapsed_ms: 3,
                    items: 0,
                    failure: Some(PredictionFailure {
                        kind: FailureKind::Completion,
                        message: "Request timed out after 60000ms".into(),
                        raw_response: None,
                    }),
                }],
            },
        ]
    }

    #[test]
    fn test_format_reports_table() {
        colored::control::set_override(false);
        let table = format_reports_table(&reports());
        assert!(table.contains("Salmon"));
        assert!(table.contains("✓ 5"));
        assert!(table.contains("✗ completion"));
        assert!(table.contains("12ms"));
    }

    #[test]
    fn test_format_reports_json() {
        let json = format_reports_json(&reports()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["foods"][0]["tasks"][0]["task"], "nutrients");
        assert_eq!(value["foods"][1]["tasks"][0]["success"], false);
        assert!(value["foods"][1]["tasks"][0]["error"]
            .as_str()
            .unwrap()
            .contains("timed out"));
        assert!(value["foods"][0]["tasks"][0].get("error").is_none());
    }

    #[test]
    fn test_summary_line_counts_failures() {
        colored::control::set_override(false);
        let line = format_summary_line(&reports(), Path::new("out.json"));
        assert_eq!(line, "1 of 2 foods had failures → out.json");
    }
}
