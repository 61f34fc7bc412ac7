use serde::{Deserialize, Serialize};

/// Cohort study form. Some printed rows carry both back to back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StudyForm {
    #[default]
    FullTime,
    PartTime,
}

/// One taught course entry of a teaching-load plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisciplineRecord {
    pub name: String,
    pub faculty: String,
    pub specialty: String, // e.g. "121-2"
    pub course: u32,
    pub semester: u8,
    pub study_form: StudyForm,
    pub students_count: u32,
    pub lectures: u32,
    pub practicals: u32,
    pub labs: u32,
    pub consultations: u32,
    pub exams: u32,
    pub credits: u32,
    pub control_works: u32,
    pub course_works: u32,
    pub thesis_works: u32,
    pub total_hours: u32,
}

impl DisciplineRecord {
    /// Sum of the classroom and assessment columns.
    ///
    /// This is what an edited discipline's `total_hours` is recomputed from;
    /// parsed records keep the value the table printed.
    pub fn contact_hours(&self) -> u32 {
        [
            self.lectures,
            self.practicals,
            self.labs,
            self.consultations,
            self.exams,
            self.credits,
        ]
        .iter()
        .fold(0u32, |acc, h| acc.saturating_add(*h))
    }

    /// Build a manually added discipline, filling anything missing with defaults
    pub fn from_patch(patch: &DisciplinePatch) -> Self {
        let mut record = DisciplineRecord {
            name: String::new(),
            faculty: String::new(),
            specialty: String::new(),
            course: 1,
            semester: 1,
            study_form: StudyForm::FullTime,
            students_count: 0,
            lectures: 0,
            practicals: 0,
            labs: 0,
            consultations: 0,
            exams: 0,
            credits: 0,
            control_works: 0,
            course_works: 0,
            thesis_works: 0,
            total_hours: 0,
        };
        record.apply_patch(patch);
        record
    }

    /// Overwrite the fields present in `patch`, then recompute `total_hours`
    pub fn apply_patch(&mut self, patch: &DisciplinePatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(faculty) = &patch.faculty {
            self.faculty = faculty.clone();
        }
        if let Some(specialty) = &patch.specialty {
            self.specialty = specialty.clone();
        }
        set_if(&mut self.course, patch.course);
        set_if(&mut self.semester, patch.semester);
        set_if(&mut self.study_form, patch.study_form);
        set_if(&mut self.students_count, patch.students_count);
        set_if(&mut self.lectures, patch.lectures);
        set_if(&mut self.practicals, patch.practicals);
        set_if(&mut self.labs, patch.labs);
        set_if(&mut self.consultations, patch.consultations);
        set_if(&mut self.exams, patch.exams);
        set_if(&mut self.credits, patch.credits);
        set_if(&mut self.control_works, patch.control_works);
        set_if(&mut self.course_works, patch.course_works);
        set_if(&mut self.thesis_works, patch.thesis_works);

        self.total_hours = self.contact_hours();
    }
}

fn set_if<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}

/// Partial update of a discipline; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisciplinePatch {
    pub name: Option<String>,
    pub faculty: Option<String>,
    pub specialty: Option<String>,
    pub course: Option<u32>,
    pub semester: Option<u8>,
    pub study_form: Option<StudyForm>,
    pub students_count: Option<u32>,
    pub lectures: Option<u32>,
    pub practicals: Option<u32>,
    pub labs: Option<u32>,
    pub consultations: Option<u32>,
    pub exams: Option<u32>,
    pub credits: Option<u32>,
    pub control_works: Option<u32>,
    pub course_works: Option<u32>,
    pub thesis_works: Option<u32>,
}
