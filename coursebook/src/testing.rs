//! Fixture factory for tests.
//!
//! `CourseFactory` persists courses and students with generated names into any
//! `CourseStore`, so tests only spell out the fields they care about.
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::course::{Course, NewCourse};
use crate::store::CourseStore;
use crate::student::{NewStudent, Student, StudentId};

/// Creates records with generated names.
pub struct CourseFactory<'a, S> {
    store: &'a S,
    sequence: AtomicUsize,
}

impl<'a, S: CourseStore> CourseFactory<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            sequence: AtomicUsize::new(0),
        }
    }

    /// Creates a course with a generated name and no students.
    pub async fn course(&self) -> Result<Course, S::Error> {
        let name = format!("course-{}", self.next());
        self.course_named(&name).await
    }

    /// Creates a course with the given name and no students.
    pub async fn course_named(&self, name: &str) -> Result<Course, S::Error> {
        self.store.create_course(NewCourse::new(name)).await
    }

    /// Creates one course per name, in order.
    pub async fn courses_named(&self, names: &[&str]) -> Result<Vec<Course>, S::Error> {
        let mut courses = Vec::with_capacity(names.len());
        for name in names {
            courses.push(self.course_named(name).await?);
        }
        Ok(courses)
    }

    /// Creates a course with a generated name enrolling the given students.
    pub async fn course_with_students(
        &self,
        students: impl IntoIterator<Item = StudentId>,
    ) -> Result<Course, S::Error> {
        let name = format!("course-{}", self.next());
        self.store
            .create_course(NewCourse::new(name).with_students(students))
            .await
    }

    /// Creates a student with a generated name.
    pub async fn student(&self) -> Result<Student, S::Error> {
        let name = format!("student-{}", self.next());
        self.store.create_student(NewStudent::new(name)).await
    }

    /// Creates `count` students with generated names.
    pub async fn students(&self, count: usize) -> Result<Vec<Student>, S::Error> {
        let mut students = Vec::with_capacity(count);
        for _ in 0..count {
            students.push(self.student().await?);
        }
        Ok(students)
    }

    fn next(&self) -> usize {
        self.sequence.fetch_add(1, Ordering::Relaxed) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CourseFilter, MemoryCourseStore};

    #[tokio::test]
    async fn it_generates_distinct_names() {
        let store = MemoryCourseStore::new();
        let factory = CourseFactory::new(&store);

        let first = factory.course().await.unwrap();
        let second = factory.course().await.unwrap();

        assert_ne!(first.name, second.name);
        assert_eq!(store.courses(&CourseFilter::all()).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn it_enrolls_students() {
        let store = MemoryCourseStore::new();
        let factory = CourseFactory::new(&store);
        let students = factory.students(2).await.unwrap();

        let course = factory
            .course_with_students(students.iter().map(|s| s.id))
            .await
            .unwrap();

        assert_eq!(course.students, vec![1, 2]);
    }
}
