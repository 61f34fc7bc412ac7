//! Word backend: raw text out of a DOCX archive
//!
//! DOCX files are ZIP archives; the body lives in `word/document.xml`.
//! Formatting is discarded. Each `<w:p>` ends with a newline, `<w:tab/>`
//! becomes a tab and `<w:br/>`/`<w:cr/>` a newline. Table cells are
//! paragraphs too, so every cell lands on its own line.

use crate::error::ExtractionError;
use crate::TextBackend;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use zip::ZipArchive;

const DOCUMENT_PART: &str = "word/document.xml";

pub struct WordExtractor;

impl WordExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Pull the raw text out of a `document.xml` body
    pub fn text_from_document_xml(&self, xml: &str) -> Result<String, ExtractionError> {
        let mut reader = Reader::from_str(xml);
        let mut buf = Vec::new();
        let mut text = String::new();
        let mut in_text = false;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    if e.local_name().as_ref() == b"t" {
                        in_text = true;
                    }
                }
                Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                    b"t" => in_text = false,
                    b"p" => text.push('\n'),
                    _ => {}
                },
                Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                    b"tab" => text.push('\t'),
                    b"br" | b"cr" => text.push('\n'),
                    b"p" => text.push('\n'),
                    _ => {}
                },
                Ok(Event::Text(e)) => {
                    if in_text {
                        let chunk = e
                            .unescape()
                            .map_err(|e| ExtractionError::MalformedWord(e.to_string()))?;
                        text.push_str(&chunk);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(ExtractionError::MalformedWord(format!(
                        "XML parse error at {}: {}",
                        reader.buffer_position(),
                        e
                    )));
                }
                _ => {}
            }
            buf.clear();
        }

        Ok(text)
    }
}

impl Default for WordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBackend for WordExtractor {
    fn name(&self) -> &'static str {
        "word"
    }

    fn can_handle(&self, data: &[u8]) -> bool {
        data.len() > 4 && &data[0..4] == b"PK\x03\x04"
    }

    fn extract(&self, data: &[u8]) -> Result<String, ExtractionError> {
        let mut archive = ZipArchive::new(Cursor::new(data))
            .map_err(|e| ExtractionError::Archive(e.to_string()))?;

        let mut xml = String::new();
        archive
            .by_name(DOCUMENT_PART)
            .map_err(|e| ExtractionError::MalformedWord(format!("{}: {}", DOCUMENT_PART, e)))?
            .read_to_string(&mut xml)
            .map_err(|e| ExtractionError::MalformedWord(format!("{}: {}", DOCUMENT_PART, e)))?;

        self.text_from_document_xml(&xml)
    }
}
