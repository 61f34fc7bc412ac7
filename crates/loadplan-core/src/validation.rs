//! Report validation and completion

use loadplan_parser::RowGrammar;
use serde::Serialize;
use shared_types::{Report, ReportStatus};
use tracing::info;

use crate::error::PipelineError;
use crate::pipeline::LoadPlanService;
use crate::store::ReportStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationOutcome {
    pub valid: bool,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionOutcome {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// Problems that keep a report from being submitted
pub fn check_report(report: &Report) -> Vec<String> {
    let mut errors = Vec::new();

    if report.disciplines.is_empty() {
        errors.push("Report has no disciplines".to_string());
    }

    for discipline in &report.disciplines {
        if discipline.record.name.trim().is_empty() {
            errors.push(format!("Discipline {} has no name", discipline.id));
        }
    }

    errors
}

impl<S: ReportStore, G: RowGrammar> LoadPlanService<S, G> {
    /// Check a report; a valid one moves to `Validated`.
    ///
    /// A completed report stays completed.
    pub async fn validate_report(&self, report_id: &str) -> Result<ValidationOutcome, PipelineError> {
        let mut report = self.report(report_id).await?;
        let errors = check_report(&report);
        let valid = errors.is_empty();

        if valid && report.status != ReportStatus::Completed {
            report.status = ReportStatus::Validated;
            self.store.update(report).await?;
        }

        Ok(ValidationOutcome { valid, errors })
    }

    /// Validate, then mark the report `Completed`. An invalid report keeps
    /// its status and the errors are returned.
    pub async fn complete_report(&self, report_id: &str) -> Result<CompletionOutcome, PipelineError> {
        let validation = self.validate_report(report_id).await?;
        if !validation.valid {
            return Ok(CompletionOutcome {
                success: false,
                message: "Report has errors".to_string(),
                errors: validation.errors,
            });
        }

        let mut report = self.report(report_id).await?;
        report.status = ReportStatus::Completed;
        self.store.update(report).await?;
        info!("Report {} completed", report_id);

        Ok(CompletionOutcome {
            success: true,
            message: "Report completed".to_string(),
            errors: Vec::new(),
        })
    }
}
