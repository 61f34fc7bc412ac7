//! Teaching-load plan pipeline
//!
//! Ties the extract and parse crates to a [`ReportStore`]:
//!
//! - [`LoadPlanService::extract_and_store`] decodes an upload on the
//!   blocking pool and keeps its text in a draft report
//! - [`LoadPlanService::parse_report`] turns that text into disciplines
//! - editing, validation and completion act on the stored report
//!
//! Every failure is terminal for the document it concerns; nothing is
//! retried and partial results are never stored.

pub mod disciplines;
pub mod error;
pub mod pipeline;
pub mod store;
pub mod validation;

pub use error::PipelineError;
pub use pipeline::{ExtractedReport, LoadPlanService, ParseSummary, DEFAULT_MAX_BYTES};
pub use store::{InMemoryReportStore, ReportStore};
pub use validation::{check_report, CompletionOutcome, ValidationOutcome};
