//! Record segmentation over flattened text

use crate::grammar::RowGrammar;
use crate::normalize::FlattenedText;

/// One occurrence of the row grammar, borrowed from the flattened text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisciplineRowMatch<'t> {
    /// Byte offset where the match (its name fragment) starts
    pub start: usize,
    pub name_fragment: &'t str,
    pub specialty: &'t str,
    /// Digits and interior spaces following the code
    pub digit_run: &'t str,
}

impl DisciplineRowMatch<'_> {
    /// Course/year digit(s) after the last hyphen of the specialty code
    pub fn course(&self) -> Option<u32> {
        let (_, course) = self.specialty.rsplit_once('-')?;
        course.trim().parse().ok()
    }
}

/// Scan left to right for non-overlapping rows, in document order
pub fn segment<'t, G: RowGrammar + ?Sized>(
    grammar: &G,
    flattened: &'t FlattenedText,
) -> Vec<DisciplineRowMatch<'t>> {
    let text = flattened.as_str();
    grammar
        .row_pattern()
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(DisciplineRowMatch {
                start: whole.start(),
                name_fragment: caps.name("name").map_or("", |m| m.as_str().trim()),
                specialty: caps.name("specialty")?.as_str(),
                digit_run: caps.name("digits").map_or("", |m| m.as_str()),
            })
        })
        .collect()
}
