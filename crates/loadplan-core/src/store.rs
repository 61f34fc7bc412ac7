//! Report persistence seam

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use shared_types::Report;
use tokio::sync::RwLock;

use crate::error::PipelineError;

/// Where reports live between pipeline calls
#[async_trait]
pub trait ReportStore: Send + Sync {
    async fn insert(&self, report: Report) -> Result<(), PipelineError>;

    async fn get(&self, id: &str) -> Result<Option<Report>, PipelineError>;

    /// Replace a stored report; fails with `ReportNotFound` if it is absent
    async fn update(&self, report: Report) -> Result<(), PipelineError>;

    /// Returns whether a report was removed
    async fn delete(&self, id: &str) -> Result<bool, PipelineError>;

    /// Every report, newest first
    async fn list(&self) -> Result<Vec<Report>, PipelineError>;
}

/// Process-local store, used by the CLI and tests
#[derive(Debug, Clone, Default)]
pub struct InMemoryReportStore {
    reports: Arc<RwLock<HashMap<String, Report>>>,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.reports.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.reports.read().await.is_empty()
    }
}

#[async_trait]
impl ReportStore for InMemoryReportStore {
    async fn insert(&self, report: Report) -> Result<(), PipelineError> {
        let mut reports = self.reports.write().await;
        reports.insert(report.id.clone(), report);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Report>, PipelineError> {
        let reports = self.reports.read().await;
        Ok(reports.get(id).cloned())
    }

    async fn update(&self, report: Report) -> Result<(), PipelineError> {
        let mut reports = self.reports.write().await;
        match reports.get_mut(&report.id) {
            Some(slot) => {
                *slot = report;
                Ok(())
            }
            None => Err(PipelineError::ReportNotFound(report.id)),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool, PipelineError> {
        let mut reports = self.reports.write().await;
        Ok(reports.remove(id).is_some())
    }

    async fn list(&self) -> Result<Vec<Report>, PipelineError> {
        let reports = self.reports.read().await;
        let mut all: Vec<Report> = reports.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }
}
