//! Teaching-load plan table parser
//!
//! Works on the text stream alone, never on page geometry:
//!
//! 1. [`normalize::flatten`] collapses the extracted text onto one line and
//!    the semester boundary is located in it
//! 2. [`segment::segment`] finds every discipline row in document order
//! 3. per row, [`names::normalize_name`] cleans the name and
//!    [`builder::build_records`] splits the numbers into one or two records
//!
//! Everything template-specific comes from a [`RowGrammar`].

pub mod builder;
pub mod error;
pub mod grammar;
pub mod names;
pub mod normalize;
pub mod numbers;
pub mod segment;

pub use error::GrammarError;
pub use grammar::{
    CompiledGrammar, GrammarDescriptor, HourColumn, RowGrammar, DEFAULT_GRAMMAR,
};
pub use normalize::{find_semester_boundary, flatten, FlattenedText};
pub use segment::{segment, DisciplineRowMatch};

use shared_types::DisciplineRecord;
use tracing::{debug, info};

/// Parse extracted text into discipline records, in document order.
///
/// An empty result is not an error here; callers decide what it means.
pub fn parse_table<G: RowGrammar + ?Sized>(grammar: &G, text: &str) -> Vec<DisciplineRecord> {
    let flattened = flatten(text);
    let boundary = find_semester_boundary(&flattened, grammar.semester_marker());
    let rows = segment(grammar, &flattened);

    debug!(
        "Found {} candidate rows, semester boundary at {:?}",
        rows.len(),
        boundary
    );

    let mut records: Vec<DisciplineRecord> = Vec::new();

    for row in &rows {
        let semester = normalize::semester_for(row.start, boundary);

        // Header stripping applies until the first row is accepted
        let Some(name) = names::normalize_name(grammar, row.name_fragment, records.is_empty())
        else {
            debug!(
                "Dropping row at {} ({}): name fragment is not a discipline",
                row.start, row.specialty
            );
            continue;
        };

        let built = builder::build_records(grammar, row, semester, &name);
        if built.is_empty() {
            debug!(
                "Dropping row '{}': no course number in '{}'",
                name, row.specialty
            );
        }
        records.extend(built);
    }

    info!(
        "Parsed {} discipline records from {} rows",
        records.len(),
        rows.len()
    );
    records
}

/// [`parse_table`] with the built-in electronics faculty template
pub fn parse_with_default_grammar(text: &str) -> Vec<DisciplineRecord> {
    parse_table(&*DEFAULT_GRAMMAR, text)
}
