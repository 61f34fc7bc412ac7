//! Numeric run tokenizing and full-time/part-time splitting

use lazy_static::lazy_static;
use regex::Regex;
use shared_types::StudyForm;

use crate::grammar::HourColumn;

lazy_static! {
    static ref DIGITS: Regex = Regex::new(r"[0-9]+").unwrap();
}

/// Every maximal digit sequence as one integer; spaces only separate.
/// Values too large for `u32` saturate.
pub fn split_numbers(digit_run: &str) -> Vec<u32> {
    DIGITS
        .find_iter(digit_run)
        .map(|m| m.as_str().parse().unwrap_or(u32::MAX))
        .collect()
}

/// The numbers belonging to one study form of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormWindow<'a> {
    pub study_form: StudyForm,
    pub numbers: &'a [u32],
    /// True when the row carried both forms back to back
    pub split: bool,
}

/// One full-time window, or a full-time and a part-time half when the
/// run is longer than `threshold`
pub fn classify(numbers: &[u32], threshold: usize) -> Vec<FormWindow<'_>> {
    if numbers.len() <= threshold {
        return vec![FormWindow {
            study_form: StudyForm::FullTime,
            numbers,
            split: false,
        }];
    }

    let (full_time, part_time) = numbers.split_at(numbers.len() / 2);
    vec![
        FormWindow {
            study_form: StudyForm::FullTime,
            numbers: full_time,
            split: true,
        },
        FormWindow {
            study_form: StudyForm::PartTime,
            numbers: part_time,
            split: true,
        },
    ]
}

/// Numeric columns of one record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HourValues {
    pub students_count: u32,
    pub lectures: u32,
    pub practicals: u32,
    pub labs: u32,
    pub consultations: u32,
    pub exams: u32,
    pub credits: u32,
    pub total_hours: u32,
}

impl HourValues {
    /// Map window positions onto `columns`; positions past the end are ignored.
    ///
    /// A split half takes its total from its last number. A single-form row
    /// has no total column in this template, so its total only records
    /// whether any numbers were printed.
    pub fn from_window(window: &FormWindow<'_>, columns: &[HourColumn]) -> Self {
        let mut values = HourValues::default();

        for (column, &value) in columns.iter().zip(window.numbers) {
            let slot = match column {
                HourColumn::StudentsCount => &mut values.students_count,
                HourColumn::Lectures => &mut values.lectures,
                HourColumn::Practicals => &mut values.practicals,
                HourColumn::Labs => &mut values.labs,
                HourColumn::Consultations => &mut values.consultations,
                HourColumn::Exams => &mut values.exams,
                HourColumn::Credits => &mut values.credits,
                HourColumn::Skip => continue,
            };
            *slot = value;
        }

        values.total_hours = if window.split {
            match window.numbers {
                [_, .., last] => *last,
                _ => 0,
            }
        } else if window.numbers.is_empty() {
            0
        } else {
            1
        };

        values
    }
}
