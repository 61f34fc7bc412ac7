//! Row grammars: what a discipline row looks like in one plan template
//!
//! A [`GrammarDescriptor`] is plain data (serde-loadable) naming the markers,
//! the specialty-code shape and the order of the numeric columns. It is
//! compiled once into a [`CompiledGrammar`], which implements [`RowGrammar`].
//! The segmenter, splitter and builder only talk to the trait.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::GrammarError;

/// Header/legend phrases of the electronics faculty template, in the order
/// they are stripped from the first row
pub const HEADER_MARKERS: &[&str] = &[
    "Різне",
    "Заняття з асп.",
    "ДЕК",
    "Виробн. практика",
    "Навчальна практика",
    "Педпрактика",
    "Дипл. роботи",
    "Курсові роботи",
    "Контр. роботи",
    "заочне",
    "денне",
    "К-ть студентів",
    "Спеціальність",
    "Факультет",
    "Дисципліни",
    "Разом",
];

/// Footer/summary phrases removed from every name (regex, case-insensitive)
pub const FOOTER_PATTERNS: &[&str] = &[
    "Всього за І семестр",
    "Всього за ІІ семестр",
    "Всього за рік",
    r"\bРазом\b",
    "Викладача.*?навантаження",
];

/// A cleaned name containing any of these is leftover table header
pub const RESIDUAL_HEADER_KEYWORDS: &[&str] = &["факультет", "спеціальність", "дисципліни"];

/// Destination of one position in a row's numeric run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HourColumn {
    StudentsCount,
    Lectures,
    Practicals,
    Labs,
    Consultations,
    Exams,
    Credits,
    /// Printed but not mapped
    Skip,
}

pub const DEFAULT_COLUMNS: &[HourColumn] = &[
    HourColumn::StudentsCount,
    HourColumn::Lectures,
    HourColumn::Practicals,
    HourColumn::Labs,
    HourColumn::Consultations,
    HourColumn::Exams,
    HourColumn::Credits,
];

/// Declarative description of one plan template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrammarDescriptor {
    pub name: String,
    /// Literal faculty abbreviation that anchors every row
    pub faculty_marker: String,
    /// Regex for the specialty code; the course is the number after its last hyphen
    pub specialty_pattern: String,
    /// Literal phrase closing the first semester
    pub semester_marker: String,
    /// Runs with more tokens than this hold full-time and part-time halves
    pub split_threshold: usize,
    pub columns: Vec<HourColumn>,
    pub header_markers: Vec<String>,
    pub footer_patterns: Vec<String>,
    pub residual_header_keywords: Vec<String>,
    pub course_work_keyword: String,
    pub thesis_work_keyword: String,
}

impl Default for GrammarDescriptor {
    fn default() -> Self {
        Self {
            name: "electronics-faculty".to_string(),
            faculty_marker: "Ел.".to_string(),
            specialty_pattern: r"[0-9]{3}-[0-9]".to_string(),
            semester_marker: "Всього за І семестр".to_string(),
            split_threshold: 10,
            columns: DEFAULT_COLUMNS.to_vec(),
            header_markers: HEADER_MARKERS.iter().map(|s| s.to_string()).collect(),
            footer_patterns: FOOTER_PATTERNS.iter().map(|s| s.to_string()).collect(),
            residual_header_keywords: RESIDUAL_HEADER_KEYWORDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            course_work_keyword: "курсов".to_string(),
            thesis_work_keyword: "дипл".to_string(),
        }
    }
}

impl GrammarDescriptor {
    pub fn from_json(json: &str) -> Result<Self, GrammarError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn compile(self) -> Result<CompiledGrammar, GrammarError> {
        CompiledGrammar::new(self)
    }
}

/// What the pipeline needs to know about a plan template
pub trait RowGrammar {
    /// Faculty value written into every record
    fn faculty(&self) -> &str;

    /// Row pattern with groups `name`, `specialty` and `digits`
    fn row_pattern(&self) -> &Regex;

    fn semester_marker(&self) -> &str;

    fn split_threshold(&self) -> usize;

    fn columns(&self) -> &[HourColumn];

    /// Phrases whose last occurrence (and everything before it) is cut from
    /// the first row
    fn header_markers(&self) -> &[String];

    fn footer_patterns(&self) -> &[Regex];

    /// True when a cleaned name is really leftover header text
    fn is_residual_header(&self, name: &str) -> bool;

    fn is_course_work(&self, name: &str) -> bool;

    fn is_thesis_work(&self, name: &str) -> bool;
}

/// A descriptor with its regexes built
#[derive(Debug, Clone)]
pub struct CompiledGrammar {
    descriptor: GrammarDescriptor,
    row: Regex,
    footers: Vec<Regex>,
    residual_header: Option<Regex>,
    course_work: Regex,
    thesis_work: Regex,
}

impl CompiledGrammar {
    pub fn new(descriptor: GrammarDescriptor) -> Result<Self, GrammarError> {
        if descriptor.faculty_marker.trim().is_empty() {
            return Err(GrammarError::EmptyField("faculty_marker"));
        }
        if descriptor.specialty_pattern.is_empty() {
            return Err(GrammarError::EmptyField("specialty_pattern"));
        }
        if descriptor.columns.is_empty() {
            return Err(GrammarError::EmptyField("columns"));
        }
        if descriptor.course_work_keyword.is_empty() {
            return Err(GrammarError::EmptyField("course_work_keyword"));
        }
        if descriptor.thesis_work_keyword.is_empty() {
            return Err(GrammarError::EmptyField("thesis_work_keyword"));
        }

        // Validate the code pattern on its own so errors point at it
        compile("specialty_pattern", &descriptor.specialty_pattern)?;

        let row = compile(
            "faculty_marker",
            &format!(
                r"(?P<name>.*?)\s+{}\s+(?P<specialty>{})\s*(?P<digits>[0-9\s]*)",
                regex::escape(&descriptor.faculty_marker),
                descriptor.specialty_pattern
            ),
        )?;

        let footers = descriptor
            .footer_patterns
            .iter()
            .map(|p| compile("footer_patterns", &format!("(?i){}", p)))
            .collect::<Result<Vec<_>, _>>()?;

        let residual_header = if descriptor.residual_header_keywords.is_empty() {
            None
        } else {
            Some(compile(
                "residual_header_keywords",
                &keyword_alternation(&descriptor.residual_header_keywords),
            )?)
        };

        let course_work = compile(
            "course_work_keyword",
            &keyword_alternation(std::slice::from_ref(&descriptor.course_work_keyword)),
        )?;
        let thesis_work = compile(
            "thesis_work_keyword",
            &keyword_alternation(std::slice::from_ref(&descriptor.thesis_work_keyword)),
        )?;

        Ok(Self {
            descriptor,
            row,
            footers,
            residual_header,
            course_work,
            thesis_work,
        })
    }

    pub fn descriptor(&self) -> &GrammarDescriptor {
        &self.descriptor
    }
}

fn compile(field: &'static str, pattern: &str) -> Result<Regex, GrammarError> {
    Regex::new(pattern).map_err(|source| GrammarError::InvalidPattern { field, source })
}

/// Case-insensitive literal alternation
fn keyword_alternation(keywords: &[String]) -> String {
    let alternatives: Vec<String> = keywords.iter().map(|k| regex::escape(k)).collect();
    format!("(?i)(?:{})", alternatives.join("|"))
}

impl RowGrammar for CompiledGrammar {
    fn faculty(&self) -> &str {
        &self.descriptor.faculty_marker
    }

    fn row_pattern(&self) -> &Regex {
        &self.row
    }

    fn semester_marker(&self) -> &str {
        &self.descriptor.semester_marker
    }

    fn split_threshold(&self) -> usize {
        self.descriptor.split_threshold
    }

    fn columns(&self) -> &[HourColumn] {
        &self.descriptor.columns
    }

    fn header_markers(&self) -> &[String] {
        &self.descriptor.header_markers
    }

    fn footer_patterns(&self) -> &[Regex] {
        &self.footers
    }

    fn is_residual_header(&self, name: &str) -> bool {
        self.residual_header
            .as_ref()
            .is_some_and(|re| re.is_match(name))
    }

    fn is_course_work(&self, name: &str) -> bool {
        self.course_work.is_match(name)
    }

    fn is_thesis_work(&self, name: &str) -> bool {
        self.thesis_work.is_match(name)
    }
}

lazy_static! {
    /// The electronics faculty template, compiled once
    pub static ref DEFAULT_GRAMMAR: CompiledGrammar = GrammarDescriptor::default()
        .compile()
        .expect("default grammar compiles");
}
