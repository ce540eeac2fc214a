//! Course store is responsible for persisting courses and students.
//!
//! It is designed to be implemented by different storage backends. Every implementation
//! must assign ids itself, never reuse the id of a deleted record, and apply each
//! single-record mutation atomically.
mod memory;

pub use memory::MemoryCourseStore;

use std::error::Error as StdError;

use async_trait::async_trait;

use crate::course::{Course, CourseChanges, CourseId, NewCourse};
use crate::filter::CourseFilter;
use crate::student::{NewStudent, Student, StudentId};

/// A course store.
#[async_trait]
pub trait CourseStore: Send + Sync {
    type Error: StdError + Send + Sync + 'static;

    /// Lists the courses matching `filter`.
    ///
    /// Courses are returned in creation order, unless the filter selects ids: in that case
    /// they follow the order of the requested ids.
    async fn courses(&self, filter: &CourseFilter) -> Result<Vec<Course>, Self::Error>;

    /// Looks up a course by id.
    async fn course(&self, id: CourseId) -> Result<Option<Course>, Self::Error>;

    /// Persists a new course and returns it with the id assigned by the store.
    async fn create_course(&self, course: NewCourse) -> Result<Course, Self::Error>;

    /// Applies `changes` to the course identified by `id`.
    ///
    /// # Returns
    ///
    /// The updated course, or `None` if there is no course with the given id.
    async fn update_course(
        &self,
        id: CourseId,
        changes: CourseChanges,
    ) -> Result<Option<Course>, Self::Error>;

    /// Deletes a course together with its enrollments.
    ///
    /// # Returns
    ///
    /// `true` if a course was deleted, `false` if there was no course with the given id.
    async fn delete_course(&self, id: CourseId) -> Result<bool, Self::Error>;

    /// Lists every student in creation order.
    async fn students(&self) -> Result<Vec<Student>, Self::Error>;

    /// Looks up a student by id.
    async fn student(&self, id: StudentId) -> Result<Option<Student>, Self::Error>;

    /// Persists a new student and returns it with the id assigned by the store.
    async fn create_student(&self, student: NewStudent) -> Result<Student, Self::Error>;

    /// Returns the ids, among `ids`, that do not belong to any student.
    async fn missing_students(&self, ids: &[StudentId]) -> Result<Vec<StudentId>, Self::Error>;
}
