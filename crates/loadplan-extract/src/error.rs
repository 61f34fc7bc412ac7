use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Unsupported document type: {0}")]
    UnsupportedType(String),

    #[error("Content is not a {expected} document")]
    ContentMismatch { expected: &'static str },

    #[error("Failed to parse PDF: {0}")]
    PdfParse(String),

    #[error("Failed to open Word archive: {0}")]
    Archive(String),

    #[error("Malformed Word document: {0}")]
    MalformedWord(String),
}
