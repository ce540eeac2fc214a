//! In-memory course store.
//!
//! Records live in ordered maps guarded by a single `RwLock`, so ids grow with creation
//! order and iteration order equals creation order.
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::CourseStore;
use crate::course::{Course, CourseChanges, CourseId, NewCourse};
use crate::filter::CourseFilter;
use crate::student::{NewStudent, Student, StudentId};

/// Course store keeping every record in process memory.
///
/// Cloning the store is cheap and every clone shares the same records.
#[derive(Clone, Default)]
pub struct MemoryCourseStore {
    inner: Arc<RwLock<Records>>,
}

#[derive(Default)]
struct Records {
    courses: BTreeMap<CourseId, Course>,
    students: BTreeMap<StudentId, Student>,
    last_course_id: CourseId,
    last_student_id: StudentId,
}

impl MemoryCourseStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CourseStore for MemoryCourseStore {
    type Error = Infallible;

    async fn courses(&self, filter: &CourseFilter) -> Result<Vec<Course>, Self::Error> {
        let records = self.inner.read().await;
        let courses = match filter.ids() {
            Some(ids) => ids
                .iter()
                .filter_map(|id| records.courses.get(id))
                .filter(|course| filter.matches(course))
                .cloned()
                .collect(),
            None => records
                .courses
                .values()
                .filter(|course| filter.matches(course))
                .cloned()
                .collect(),
        };
        Ok(courses)
    }

    async fn course(&self, id: CourseId) -> Result<Option<Course>, Self::Error> {
        Ok(self.inner.read().await.courses.get(&id).cloned())
    }

    async fn create_course(&self, course: NewCourse) -> Result<Course, Self::Error> {
        let mut records = self.inner.write().await;
        records.last_course_id += 1;
        let course = Course {
            id: records.last_course_id,
            name: course.name,
            students: course.students,
        };
        records.courses.insert(course.id, course.clone());
        Ok(course)
    }

    async fn update_course(
        &self,
        id: CourseId,
        changes: CourseChanges,
    ) -> Result<Option<Course>, Self::Error> {
        let mut records = self.inner.write().await;
        Ok(records.courses.get_mut(&id).map(|course| {
            changes.apply(course);
            course.clone()
        }))
    }

    async fn delete_course(&self, id: CourseId) -> Result<bool, Self::Error> {
        Ok(self.inner.write().await.courses.remove(&id).is_some())
    }

    async fn students(&self) -> Result<Vec<Student>, Self::Error> {
        Ok(self.inner.read().await.students.values().cloned().collect())
    }

    async fn student(&self, id: StudentId) -> Result<Option<Student>, Self::Error> {
        Ok(self.inner.read().await.students.get(&id).cloned())
    }

    async fn create_student(&self, student: NewStudent) -> Result<Student, Self::Error> {
        let mut records = self.inner.write().await;
        records.last_student_id += 1;
        let student = Student {
            id: records.last_student_id,
            name: student.name,
        };
        records.students.insert(student.id, student.clone());
        Ok(student)
    }

    async fn missing_students(&self, ids: &[StudentId]) -> Result<Vec<StudentId>, Self::Error> {
        let records = self.inner.read().await;
        Ok(ids
            .iter()
            .copied()
            .filter(|id| !records.students.contains_key(id))
            .collect())
    }
}
