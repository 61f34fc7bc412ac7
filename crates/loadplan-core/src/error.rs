use loadplan_extract::ExtractionError;
use shared_types::ReportStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Document is {size} bytes, the limit is {limit}")]
    DocumentTooLarge { size: usize, limit: usize },

    #[error("No text to parse")]
    EmptyText,

    #[error("No discipline rows found in the document")]
    NoRecordsFound,

    #[error("Report not found: {0}")]
    ReportNotFound(String),

    #[error("Discipline not found: {0}")]
    DisciplineNotFound(String),

    #[error("Report {id} is {status:?} and can no longer be changed")]
    InvalidStatus { id: String, status: ReportStatus },

    #[error("Report store error: {0}")]
    Store(String),

    #[error("Extraction task failed: {0}")]
    Task(String),
}
