//! PDF backend using lopdf content-stream parsing
//!
//! Pages are visited in page-number order. Inside a page every text-showing
//! operator (`Tj`, `TJ`, `'`, `"`) is one run, decoded through the font
//! selected by the last `Tf`. Runs are appended in stream order with a
//! trailing space, and each page ends with a newline. No geometry is
//! consulted.

use crate::error::ExtractionError;
use crate::font::FontDecoder;
use crate::TextBackend;
use lazy_static::lazy_static;
use lopdf::{Document, Object};
use regex::Regex;
use std::borrow::Cow;
use std::collections::HashMap;
use tracing::{debug, warn};

/// TJ kerning offsets below this are rendered as a word gap
const KERNING_GAP: i64 = -100;

lazy_static! {
    static ref PERCENT_ESCAPE: Regex = Regex::new(r"%([0-9A-Fa-f]{2})").unwrap();
}

pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract from an already parsed document
    pub fn extract_from_document(&self, doc: &Document) -> String {
        let mut text = String::new();
        let fallback = FontDecoder::Unknown;

        for (&page_num, &page_id) in doc.get_pages().iter() {
            let fonts: HashMap<Vec<u8>, FontDecoder> = doc
                .get_page_fonts(page_id)
                .into_iter()
                .map(|(name, font)| (name, FontDecoder::from_font(doc, font)))
                .collect();
            debug!("Page {}: {} font(s)", page_num, fonts.len());

            match doc.get_page_content(page_id) {
                Ok(content) => match lopdf::content::Content::decode(&content) {
                    Ok(operations) => {
                        let mut font = &fallback;
                        for op in operations.operations {
                            match op.operator.as_str() {
                                "Tf" => {
                                    font = op
                                        .operands
                                        .first()
                                        .and_then(|name| name.as_name().ok())
                                        .and_then(|name| fonts.get(name))
                                        .unwrap_or(&fallback);
                                }
                                "Tj" | "TJ" | "'" | "\"" => {
                                    let mut run = String::new();
                                    for operand in &op.operands {
                                        if let Some(s) = text_from_operand(operand, font) {
                                            run.push_str(&s);
                                        }
                                    }
                                    if !run.is_empty() {
                                        text.push_str(&decode_escapes(&run));
                                        text.push(' ');
                                    }
                                }
                                _ => {}
                            }
                        }
                    }
                    Err(e) => warn!("Page {}: undecodable content stream: {}", page_num, e),
                },
                Err(e) => warn!("Page {}: no content: {}", page_num, e),
            }

            text.push('\n');
        }

        text
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBackend for PdfExtractor {
    fn name(&self) -> &'static str {
        "pdf"
    }

    fn can_handle(&self, data: &[u8]) -> bool {
        data.len() > 4 && &data[0..4] == b"%PDF"
    }

    fn extract(&self, data: &[u8]) -> Result<String, ExtractionError> {
        let doc = Document::load_mem(data).map_err(|e| ExtractionError::PdfParse(e.to_string()))?;
        Ok(self.extract_from_document(&doc))
    }
}

/// Decode `%XX` escapes inside a run when at least one of them is a
/// non-ASCII byte and the whole run decodes to valid UTF-8. Anything else,
/// including a literal `50%30`, is kept verbatim.
pub fn decode_escapes(run: &str) -> Cow<'_, str> {
    let multibyte = PERCENT_ESCAPE.captures_iter(run).any(|caps| {
        u8::from_str_radix(&caps[1], 16)
            .map(|b| b >= 0x80)
            .unwrap_or(false)
    });
    if !multibyte {
        return Cow::Borrowed(run);
    }
    match urlencoding::decode(run) {
        Ok(decoded) => decoded,
        Err(e) => {
            warn!("Keeping run with invalid percent escapes: {}", e);
            Cow::Borrowed(run)
        }
    }
}

fn text_from_operand(operand: &Object, font: &FontDecoder) -> Option<String> {
    match operand {
        Object::String(bytes, _) => Some(font.decode(bytes)),
        Object::Array(arr) => {
            let mut text = String::new();
            for item in arr {
                match item {
                    Object::String(bytes, _) => text.push_str(&font.decode(bytes)),
                    Object::Integer(n) if *n < KERNING_GAP => text.push(' '),
                    Object::Real(n) if (*n as i64) < KERNING_GAP => text.push(' '),
                    _ => {}
                }
            }
            Some(text)
        }
        _ => None,
    }
}
