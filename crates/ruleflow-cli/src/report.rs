//! Rendering of pipeline results for the terminal.

use clap::ValueEnum;
use ruleflow_core::PipelineResult;

/// Output format for the validation report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Render `result` in the requested format.
pub fn render(result: &PipelineResult, format: ReportFormat) -> serde_json::Result<String> {
    match format {
        ReportFormat::Text => Ok(render_text(result)),
        ReportFormat::Json => serde_json::to_string_pretty(result),
    }
}

fn render_text(result: &PipelineResult) -> String {
    let mut out = String::from("=== RuleFlow: Validation Report ===\n");

    out.push_str(&format!("Success: {}\n", result.is_success()));
    if !result.is_success() {
        out.push_str("Errors:\n");
        for error in result.errors() {
            out.push_str(&format!(" - [{}] {}\n", error.code(), error.message()));
        }
    }

    out.push_str("===================================\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ruleflow_core::{RuleError, RuleOutcome};

    fn failed() -> PipelineResult {
        PipelineResult::from_outcomes(vec![
            RuleOutcome::fail(RuleError::new("NULL", "Email must not be null.")),
            RuleOutcome::success(),
            RuleOutcome::fail(RuleError::new(
                "MINLEN",
                "Password must be at least 8 characters long.",
            )),
        ])
    }

    #[test]
    fn test_text_report_lists_errors() {
        let text = render(&failed(), ReportFormat::Text).unwrap();

        assert_eq!(
            text,
            "=== RuleFlow: Validation Report ===\n\
             Success: false\n\
             Errors:\n \
             - [NULL] Email must not be null.\n \
             - [MINLEN] Password must be at least 8 characters long.\n\
             ===================================\n"
        );
    }

    #[test]
    fn test_text_report_success_has_no_errors_section() {
        let passed = PipelineResult::from_outcomes(vec![RuleOutcome::success()]);
        let text = render(&passed, ReportFormat::Text).unwrap();

        assert!(text.contains("Success: true"));
        assert!(!text.contains("Errors:"));
    }

    #[test]
    fn test_json_report() {
        let json = render(&failed(), ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["success"], false);
        assert_eq!(value["errors"].as_array().unwrap().len(), 2);
        assert_eq!(value["errors"][1]["code"], "MINLEN");
    }
}
