//! Manual corrections to a report's disciplines

use loadplan_parser::RowGrammar;
use shared_types::{DisciplinePatch, DisciplineRecord, StoredDiscipline};
use tracing::debug;

use crate::error::PipelineError;
use crate::pipeline::{ensure_editable, LoadPlanService};
use crate::store::ReportStore;

impl<S: ReportStore, G: RowGrammar> LoadPlanService<S, G> {
    /// A report's disciplines sorted by name
    pub async fn disciplines(&self, report_id: &str) -> Result<Vec<StoredDiscipline>, PipelineError> {
        let mut disciplines = self.report(report_id).await?.disciplines;
        disciplines.sort_by(|a, b| a.record.name.cmp(&b.record.name));
        Ok(disciplines)
    }

    /// Apply a patch; the total is recomputed from the merged hour columns
    pub async fn update_discipline(
        &self,
        report_id: &str,
        discipline_id: &str,
        patch: &DisciplinePatch,
    ) -> Result<StoredDiscipline, PipelineError> {
        let mut report = self.report(report_id).await?;
        ensure_editable(&report)?;

        let discipline = report
            .discipline_mut(discipline_id)
            .ok_or_else(|| PipelineError::DisciplineNotFound(discipline_id.to_string()))?;
        discipline.record.apply_patch(patch);
        let updated = discipline.clone();

        debug!(
            "Updated discipline {} of report {}: total {}",
            discipline_id, report_id, updated.record.total_hours
        );
        self.store.update(report).await?;
        Ok(updated)
    }

    /// Add a discipline that was missed by the parser
    pub async fn add_discipline(
        &self,
        report_id: &str,
        patch: &DisciplinePatch,
    ) -> Result<StoredDiscipline, PipelineError> {
        let mut report = self.report(report_id).await?;
        ensure_editable(&report)?;

        let added = StoredDiscipline::new(DisciplineRecord::from_patch(patch));
        report.disciplines.push(added.clone());
        self.store.update(report).await?;

        debug!("Added discipline {} to report {}", added.id, report_id);
        Ok(added)
    }

    pub async fn delete_discipline(
        &self,
        report_id: &str,
        discipline_id: &str,
    ) -> Result<(), PipelineError> {
        let mut report = self.report(report_id).await?;
        ensure_editable(&report)?;

        let before = report.disciplines.len();
        report.disciplines.retain(|d| d.id != discipline_id);
        if report.disciplines.len() == before {
            return Err(PipelineError::DisciplineNotFound(discipline_id.to_string()));
        }

        self.store.update(report).await?;
        debug!("Deleted discipline {} from report {}", discipline_id, report_id);
        Ok(())
    }
}
