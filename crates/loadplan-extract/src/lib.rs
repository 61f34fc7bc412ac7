//! Text extraction for uploaded teaching-load plans
//!
//! Two backends, picked by the document's declared type:
//! - [`PdfExtractor`]: walks each page's content stream with lopdf, decodes
//!   every text run through its font (see [`font`]) and emits it followed
//!   by a space, one newline per page
//! - [`WordExtractor`]: reads `word/document.xml` out of the DOCX archive
//!   and emits raw text, one line per paragraph
//!
//! Extraction is attempted once. Any failure is terminal for the document.

pub mod error;
pub mod font;
pub mod pdf;
pub mod word;

pub use error::ExtractionError;
pub use pdf::PdfExtractor;
pub use word::WordExtractor;

use shared_types::{DocumentKind, RawDocument};
use tracing::{debug, info};

/// A text extraction backend
pub trait TextBackend {
    /// Backend identifier
    fn name(&self) -> &'static str;

    /// Cheap magic-byte check that the data is this backend's format
    fn can_handle(&self, data: &[u8]) -> bool;

    /// Decode the whole document into plain text
    fn extract(&self, data: &[u8]) -> Result<String, ExtractionError>;
}

/// Routes a document to the backend for its declared type
#[derive(Default)]
pub struct TextExtractor {
    pdf: PdfExtractor,
    word: WordExtractor,
}

impl TextExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    fn backend_for(&self, kind: DocumentKind) -> &dyn TextBackend {
        match kind {
            DocumentKind::Pdf => &self.pdf,
            DocumentKind::Word => &self.word,
        }
    }

    /// Extract plain text from an uploaded document
    pub fn extract(&self, document: &RawDocument) -> Result<String, ExtractionError> {
        let backend = self.backend_for(document.kind);
        debug!(
            "Extracting '{}' ({} bytes) with {} backend",
            document.file_name,
            document.bytes.len(),
            backend.name()
        );

        if !backend.can_handle(&document.bytes) {
            return Err(ExtractionError::ContentMismatch {
                expected: backend.name(),
            });
        }

        let text = backend.extract(&document.bytes)?;
        info!(
            "Extracted {} characters from '{}'",
            text.chars().count(),
            document.file_name
        );
        Ok(text)
    }
}

/// Resolve a declared MIME type, mapping unknown types to an extraction error
pub fn kind_for_mime(mime: &str) -> Result<DocumentKind, ExtractionError> {
    DocumentKind::from_mime_type(mime).ok_or_else(|| ExtractionError::UnsupportedType(mime.into()))
}
