//! Discipline name cleanup
//!
//! The first row match drags the printed table header in front of the
//! first real discipline name; every row may carry footer totals. What
//! survives cleanup must look like a name, or the row is noise.

use lazy_static::lazy_static;
use regex::Regex;

use crate::grammar::RowGrammar;

const MIN_NAME_CHARS: usize = 3;

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
    /// Anything outside Latin/Cyrillic letters, digits, `_`, whitespace, `-()/.`
    static ref DISALLOWED: Regex =
        Regex::new(r"[^A-Za-z0-9_А-Яа-яІіЇїЄєҐґ\s\-()/.]").unwrap();
    static ref ALL_DIGITS: Regex = Regex::new(r"^[0-9]+$").unwrap();
}

/// Cut everything up to and including the last occurrence of each marker,
/// markers applied in order
pub fn strip_header(fragment: &str, markers: &[String]) -> String {
    let mut name = fragment.to_string();
    for marker in markers.iter().filter(|m| !m.is_empty()) {
        if let Some(idx) = name.rfind(marker.as_str()) {
            name = name[idx + marker.len()..].trim().to_string();
        }
    }
    name
}

/// Remove every footer phrase anywhere in the name
pub fn strip_footers(name: &str, footers: &[Regex]) -> String {
    let mut name = name.to_string();
    for footer in footers {
        name = footer.replace_all(&name, "").into_owned();
    }
    name.trim().to_string()
}

/// Collapse whitespace and drop disallowed characters
pub fn clean_name(name: &str) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(name, " ");
    DISALLOWED.replace_all(&collapsed, "").trim().to_string()
}

/// Full cleanup; `None` means the fragment is not a discipline
pub fn normalize_name<G: RowGrammar + ?Sized>(
    grammar: &G,
    fragment: &str,
    is_first_row: bool,
) -> Option<String> {
    let name = if is_first_row {
        strip_header(fragment, grammar.header_markers())
    } else {
        fragment.to_string()
    };

    let name = strip_footers(&name, grammar.footer_patterns());
    let name = clean_name(&name);

    if name.chars().count() < MIN_NAME_CHARS
        || ALL_DIGITS.is_match(&name)
        || grammar.is_residual_header(&name)
    {
        return None;
    }

    Some(name)
}
