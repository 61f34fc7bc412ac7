//! The two pipeline entry points and report bookkeeping

use std::sync::Arc;

use loadplan_extract::TextExtractor;
use loadplan_parser::{parse_table, CompiledGrammar, RowGrammar, DEFAULT_GRAMMAR};
use serde::Serialize;
use shared_types::{DisciplineRecord, RawDocument, Report, ReportStatus, StoredDiscipline};
use tracing::{debug, info, warn};

use crate::error::PipelineError;
use crate::store::ReportStore;

/// Largest upload accepted, 10 MiB
pub const DEFAULT_MAX_BYTES: usize = 10 * 1024 * 1024;

/// Result of `extract_and_store`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedReport {
    pub report_id: String,
    pub file_name: String,
    pub text: String,
}

/// Result of `parse_report`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseSummary {
    pub report_id: String,
    pub count: usize,
    pub status: ReportStatus,
}

/// Extraction, parsing and the report lifecycle over one store
pub struct LoadPlanService<S, G = CompiledGrammar> {
    pub(crate) store: S,
    grammar: G,
    extractor: Arc<TextExtractor>,
    max_bytes: usize,
}

impl<S: ReportStore> LoadPlanService<S> {
    /// Service using the built-in electronics faculty grammar
    pub fn with_default_grammar(store: S) -> Self {
        Self::new(store, DEFAULT_GRAMMAR.clone())
    }
}

impl<S: ReportStore, G: RowGrammar> LoadPlanService<S, G> {
    pub fn new(store: S, grammar: G) -> Self {
        Self {
            store,
            grammar,
            extractor: Arc::new(TextExtractor::new()),
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }

    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn grammar(&self) -> &G {
        &self.grammar
    }

    /// Decode a document on the blocking pool
    pub async fn extract_text(&self, document: RawDocument) -> Result<String, PipelineError> {
        let size = document.bytes.len();
        if size > self.max_bytes {
            return Err(PipelineError::DocumentTooLarge {
                size,
                limit: self.max_bytes,
            });
        }

        let extractor = Arc::clone(&self.extractor);
        let text = tokio::task::spawn_blocking(move || extractor.extract(&document))
            .await
            .map_err(|join_error| PipelineError::Task(join_error.to_string()))??;
        Ok(text)
    }

    /// Extract a document's text and keep it in a new draft report.
    ///
    /// Nothing is stored when extraction fails.
    pub async fn extract_and_store(
        &self,
        document: RawDocument,
        academic_year: &str,
    ) -> Result<ExtractedReport, PipelineError> {
        let file_name = document.file_name.clone();
        let text = self.extract_text(document).await?;

        let mut report = Report::new(file_name.clone(), academic_year);
        report.raw_text = Some(text.clone());
        let report_id = report.id.clone();
        self.store.insert(report).await?;

        info!(
            "Stored draft report {} for '{}' ({} characters)",
            report_id,
            file_name,
            text.chars().count()
        );

        Ok(ExtractedReport {
            report_id,
            file_name,
            text,
        })
    }

    /// Parse extracted text, failing when there is nothing to show for it
    pub fn parse_text(&self, text: &str) -> Result<Vec<DisciplineRecord>, PipelineError> {
        if text.trim().is_empty() {
            return Err(PipelineError::EmptyText);
        }

        let records = parse_table(&self.grammar, text);
        if records.is_empty() {
            warn!("Text of {} bytes produced no discipline records", text.len());
            return Err(PipelineError::NoRecordsFound);
        }
        Ok(records)
    }

    /// Parse a stored report's text into its disciplines.
    ///
    /// Re-parsing replaces the disciplines from any earlier parse.
    pub async fn parse_report(&self, report_id: &str) -> Result<ParseSummary, PipelineError> {
        let mut report = self.report(report_id).await?;
        ensure_editable(&report)?;

        let text = report.raw_text.as_deref().unwrap_or_default();
        let records = self.parse_text(text)?;

        if !report.disciplines.is_empty() {
            debug!(
                "Replacing {} disciplines of report {}",
                report.disciplines.len(),
                report_id
            );
        }
        report.disciplines = records.into_iter().map(StoredDiscipline::new).collect();
        report.status = ReportStatus::Parsed;

        let summary = ParseSummary {
            report_id: report.id.clone(),
            count: report.disciplines.len(),
            status: report.status,
        };
        self.store.update(report).await?;

        info!(
            "Parsed report {}: {} disciplines",
            summary.report_id, summary.count
        );
        Ok(summary)
    }

    pub async fn report(&self, report_id: &str) -> Result<Report, PipelineError> {
        self.store
            .get(report_id)
            .await?
            .ok_or_else(|| PipelineError::ReportNotFound(report_id.to_string()))
    }

    /// All reports, newest first
    pub async fn reports(&self) -> Result<Vec<Report>, PipelineError> {
        self.store.list().await
    }

    pub async fn delete_report(&self, report_id: &str) -> Result<(), PipelineError> {
        if self.store.delete(report_id).await? {
            Ok(())
        } else {
            Err(PipelineError::ReportNotFound(report_id.to_string()))
        }
    }
}

/// Completed reports are frozen
pub(crate) fn ensure_editable(report: &Report) -> Result<(), PipelineError> {
    if report.status == ReportStatus::Completed {
        return Err(PipelineError::InvalidStatus {
            id: report.id.clone(),
            status: report.status,
        });
    }
    Ok(())
}
