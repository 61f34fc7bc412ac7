use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::DisciplineRecord;

/// Lifecycle of an uploaded plan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportStatus {
    #[default]
    Draft,
    Parsed,
    Validated,
    Completed,
}

/// A discipline as held by a report, with its own id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDiscipline {
    pub id: String,
    #[serde(flatten)]
    pub record: DisciplineRecord,
}

impl StoredDiscipline {
    pub fn new(record: DisciplineRecord) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            record,
        }
    }
}

/// One uploaded teaching-load plan and everything derived from it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub academic_year: String,
    pub original_file_name: String,
    pub status: ReportStatus,
    /// Text recovered at upload time; parsing re-reads it
    pub raw_text: Option<String>,
    pub disciplines: Vec<StoredDiscipline>,
    pub created_at: DateTime<Utc>,
}

impl Report {
    pub fn new(original_file_name: impl Into<String>, academic_year: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            academic_year: academic_year.into(),
            original_file_name: original_file_name.into(),
            status: ReportStatus::Draft,
            raw_text: None,
            disciplines: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn discipline_mut(&mut self, id: &str) -> Option<&mut StoredDiscipline> {
        self.disciplines.iter_mut().find(|d| d.id == id)
    }

    /// Sum of `total_hours` across every discipline
    pub fn total_hours(&self) -> u64 {
        self.disciplines
            .iter()
            .map(|d| u64::from(d.record.total_hours))
            .sum()
    }
}
