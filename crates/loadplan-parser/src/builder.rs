//! Assembles discipline records from a matched row

use shared_types::DisciplineRecord;

use crate::grammar::RowGrammar;
use crate::numbers::{classify, split_numbers, HourValues};
use crate::segment::DisciplineRowMatch;

/// One record, or two when the row holds full-time and part-time halves.
///
/// Returns an empty vec when the specialty code carries no course number.
pub fn build_records<G: RowGrammar + ?Sized>(
    grammar: &G,
    row: &DisciplineRowMatch<'_>,
    semester: u8,
    name: &str,
) -> Vec<DisciplineRecord> {
    let Some(course) = row.course() else {
        return Vec::new();
    };

    let numbers = split_numbers(row.digit_run);
    let course_work = grammar.is_course_work(name);
    let thesis_work = grammar.is_thesis_work(name);

    classify(&numbers, grammar.split_threshold())
        .iter()
        .map(|window| {
            let hours = HourValues::from_window(window, grammar.columns());
            DisciplineRecord {
                name: name.to_string(),
                faculty: grammar.faculty().to_string(),
                specialty: row.specialty.to_string(),
                course,
                semester,
                study_form: window.study_form,
                students_count: hours.students_count,
                lectures: hours.lectures,
                practicals: hours.practicals,
                labs: hours.labs,
                consultations: hours.consultations,
                exams: hours.exams,
                credits: hours.credits,
                control_works: 0,
                course_works: if course_work { hours.total_hours } else { 0 },
                thesis_works: if thesis_work { hours.total_hours } else { 0 },
                total_hours: hours.total_hours,
            }
        })
        .collect()
}
