//! Whitespace flattening and the semester boundary

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NEWLINE_RUN: Regex = Regex::new(r"\n+").unwrap();
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Extracted text collapsed onto one line. Never contains `\n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenedText(String);

impl FlattenedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Collapse newline runs, then whitespace runs, to single spaces and trim
pub fn flatten(text: &str) -> FlattenedText {
    let text = NEWLINE_RUN.replace_all(text, " ");
    let text = WHITESPACE_RUN.replace_all(&text, " ");
    FlattenedText(text.trim().to_string())
}

/// Byte offset of the first-semester closing phrase, if present
pub fn find_semester_boundary(flattened: &FlattenedText, marker: &str) -> Option<usize> {
    if marker.is_empty() {
        return None;
    }
    flattened.as_str().find(marker)
}

/// Rows starting after the boundary belong to the second semester
pub fn semester_for(row_start: usize, boundary: Option<usize>) -> u8 {
    match boundary {
        Some(offset) if row_start > offset => 2,
        _ => 1,
    }
}
