//! # Coursebook
//!
//! Domain layer of the course catalogue service: the `Course` and `Student` records,
//! payload validation, the list filter of the course collection, and the `CourseStore`
//! abstraction implemented by the storage backends.
mod course;
mod filter;
mod settings;
mod store;
mod student;
pub mod testing;
mod validation;

#[doc(inline)]
pub use crate::course::{
    normalize_students, Course, CourseChanges, CourseId, CoursePayload, NewCourse, NAME, STUDENTS,
};
#[doc(inline)]
pub use crate::filter::{CourseFilter, ID_PARAM, NAME_PARAM};
#[doc(inline)]
pub use crate::settings::{Settings, SettingsError};
#[doc(inline)]
pub use crate::store::{CourseStore, MemoryCourseStore};
#[doc(inline)]
pub use crate::student::{NewStudent, Student, StudentId, StudentPayload};
#[doc(inline)]
pub use crate::validation::{ValidationErrors, BLANK, NOT_AN_INTEGER, REQUIRED};

pub type BoxDynError = Box<dyn std::error::Error + 'static + Send + Sync>;
