use serde::{Deserialize, Serialize};

use crate::student::StudentId;
use crate::validation::{ValidationErrors, BLANK, REQUIRED};

pub type CourseId = i64;

/// Payload field holding the course name.
pub const NAME: &str = "name";
/// Payload field holding the enrolled students.
pub const STUDENTS: &str = "students";

/// A persisted course.
///
/// `students` is kept sorted and free of duplicates by every store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    pub students: Vec<StudentId>,
}

/// A validated course ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourse {
    pub name: String,
    pub students: Vec<StudentId>,
}

impl NewCourse {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            students: Vec::new(),
        }
    }

    pub fn with_students(mut self, students: impl IntoIterator<Item = StudentId>) -> Self {
        self.students = normalize_students(students);
        self
    }
}

/// Changes to apply to an existing course. Fields set to `None` are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseChanges {
    pub name: Option<String>,
    pub students: Option<Vec<StudentId>>,
}

impl CourseChanges {
    /// Applies the changes to a course in place.
    pub fn apply(self, course: &mut Course) {
        if let Some(name) = self.name {
            course.name = name;
        }
        if let Some(students) = self.students {
            course.students = students;
        }
    }
}

/// Course payload as received from a client on create, update and partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CoursePayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub students: Option<Vec<StudentId>>,
}

impl CoursePayload {
    /// Validates a creation payload.
    pub fn into_new_course(self, max_students: usize) -> Result<NewCourse, ValidationErrors> {
        let CourseChanges { name, students } = self.validate(true, max_students)?;
        Ok(NewCourse {
            name: name.unwrap_or_default(),
            students: students.unwrap_or_default(),
        })
    }

    /// Validates a full replacement: the name is required and a missing
    /// `students` list clears the enrollment.
    pub fn into_replacement(self, max_students: usize) -> Result<CourseChanges, ValidationErrors> {
        let changes = self.validate(true, max_students)?;
        Ok(CourseChanges {
            students: Some(changes.students.unwrap_or_default()),
            ..changes
        })
    }

    /// Validates a partial update: only the provided fields are changed.
    pub fn into_changes(self, max_students: usize) -> Result<CourseChanges, ValidationErrors> {
        self.validate(false, max_students)
    }

    /// The distinct student ids referenced by the payload, in ascending order.
    pub fn requested_students(&self) -> Vec<StudentId> {
        self.students
            .as_ref()
            .map(|students| normalize_students(students.iter().copied()))
            .unwrap_or_default()
    }

    fn validate(
        self,
        name_required: bool,
        max_students: usize,
    ) -> Result<CourseChanges, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let name = match self.name.as_deref().map(str::trim) {
            None => {
                if name_required {
                    errors.add(NAME, REQUIRED);
                }
                None
            }
            Some("") => {
                errors.add(NAME, BLANK);
                None
            }
            Some(name) => Some(name.to_owned()),
        };

        let students = self.students.map(normalize_students);
        if let Some(students) = &students {
            if students.len() > max_students {
                errors.add(
                    STUDENTS,
                    format!("A course can have at most {max_students} students."),
                );
            }
        }

        errors.into_result(CourseChanges { name, students })
    }
}

/// Sorts the student ids and drops duplicates.
pub fn normalize_students(students: impl IntoIterator<Item = StudentId>) -> Vec<StudentId> {
    let mut students: Vec<_> = students.into_iter().collect();
    students.sort_unstable();
    students.dedup();
    students
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};

    fn payload(name: Option<&str>, students: Option<Vec<StudentId>>) -> CoursePayload {
        CoursePayload {
            name: name.map(str::to_owned),
            students,
        }
    }

    #[test]
    fn it_creates_a_new_course() {
        let course = payload(Some("Python-Developer"), None).into_new_course(20);

        check!(course == Ok(NewCourse::new("Python-Developer")));
    }

    #[test]
    fn it_trims_the_course_name() {
        let course = payload(Some("  Java-Developer "), None).into_new_course(20);

        check!(course == Ok(NewCourse::new("Java-Developer")));
    }

    #[test]
    fn it_should_not_create_a_course_without_name() {
        let_assert!(Err(errors) = payload(None, None).into_new_course(20));

        check!(errors.get(NAME) == Some(&[REQUIRED.to_string()][..]));
    }

    #[test]
    fn it_should_not_create_a_course_when_the_provided_name_is_blank() {
        let_assert!(Err(errors) = payload(Some(" "), None).into_new_course(20));

        check!(errors.get(NAME) == Some(&[BLANK.to_string()][..]));
    }

    #[test]
    fn it_collapses_duplicated_students() {
        let course = payload(Some("C#-Developer"), Some(vec![3, 1, 3, 2])).into_new_course(3);

        check!(course == Ok(NewCourse::new("C#-Developer").with_students([1, 2, 3])));
    }

    #[test]
    fn it_accepts_exactly_the_maximum_number_of_students() {
        let students = (1..=20).collect();

        check!(payload(Some("Android-Developer"), Some(students))
            .into_new_course(20)
            .is_ok());
    }

    #[test]
    fn it_should_not_enroll_more_than_the_maximum_number_of_students() {
        let students = (1..=21).collect();
        let_assert!(Err(errors) = payload(Some("Android-Developer"), Some(students)).into_new_course(20));

        check!(
            errors.get(STUDENTS)
                == Some(&["A course can have at most 20 students.".to_string()][..])
        );
    }

    #[test]
    fn it_reports_every_invalid_field() {
        let_assert!(Err(errors) = payload(Some(""), Some(vec![1, 2])).into_new_course(1));

        check!(errors.contains(NAME));
        check!(errors.contains(STUDENTS));
    }

    #[test]
    fn it_clears_the_enrollment_on_replacement() {
        let changes = payload(Some("Rust-Developer"), None).into_replacement(20);

        check!(
            changes
                == Ok(CourseChanges {
                    name: Some("Rust-Developer".into()),
                    students: Some(vec![]),
                })
        );
    }

    #[test]
    fn it_should_require_the_name_on_replacement() {
        let_assert!(Err(errors) = payload(None, Some(vec![1])).into_replacement(20));

        check!(errors.contains(NAME));
    }

    #[test]
    fn it_only_changes_the_provided_fields() {
        let changes = payload(None, Some(vec![2, 1])).into_changes(20);

        check!(
            changes
                == Ok(CourseChanges {
                    name: None,
                    students: Some(vec![1, 2]),
                })
        );
    }

    #[test]
    fn it_applies_changes_to_a_course() {
        let mut course = Course {
            id: 1,
            name: "old name".into(),
            students: vec![1],
        };
        CourseChanges {
            name: Some("new name".into()),
            students: None,
        }
        .apply(&mut course);

        check!(course.name == "new name");
        check!(course.students == vec![1]);
    }

    #[test]
    fn it_lists_the_requested_students() {
        check!(payload(None, Some(vec![5, 4, 5])).requested_students() == vec![4, 5]);
        check!(payload(None, None).requested_students().is_empty());
    }
}
