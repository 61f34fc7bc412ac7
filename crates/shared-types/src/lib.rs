//! Domain types shared across the loadplan workspace
//!
//! Documents coming in, discipline records going out, and the report
//! entity that owns both between the extract and parse phases.

pub mod document;
pub mod report;
pub mod types;

pub use document::{DocumentKind, RawDocument};
pub use report::{Report, ReportStatus, StoredDiscipline};
pub use types::{DisciplinePatch, DisciplineRecord, StudyForm};
