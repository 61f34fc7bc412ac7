use serde::{Deserialize, Serialize};
use std::path::Path;

/// Declared content type of an uploaded document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Word,
}

impl DocumentKind {
    pub const PDF_MIME: &'static str = "application/pdf";
    pub const DOCX_MIME: &'static str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
    pub const DOC_MIME: &'static str = "application/msword";

    pub fn from_mime_type(mime: &str) -> Option<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            Self::PDF_MIME => Some(DocumentKind::Pdf),
            Self::DOCX_MIME | Self::DOC_MIME => Some(DocumentKind::Word),
            _ => None,
        }
    }

    /// Resolve by file extension (`.pdf`, `.doc`, `.docx`)
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "doc" | "docx" => Some(DocumentKind::Word),
            _ => None,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => Self::PDF_MIME,
            DocumentKind::Word => Self::DOCX_MIME,
        }
    }
}

/// Uploaded bytes plus the type they were declared as.
///
/// Lives only for the duration of extraction.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub file_name: String,
    pub kind: DocumentKind,
    pub bytes: Vec<u8>,
}

impl RawDocument {
    pub fn new(file_name: impl Into<String>, kind: DocumentKind, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            kind,
            bytes,
        }
    }
}
