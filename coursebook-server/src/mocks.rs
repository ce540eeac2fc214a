use async_trait::async_trait;
use coursebook::{
    Course, CourseChanges, CourseFilter, CourseId, CourseStore, NewCourse, NewStudent, Student,
    StudentId,
};
use mockall::mock;

#[derive(Debug, thiserror::Error)]
#[error("connection refused")]
pub struct StoreDown;

mock! {
        pub CourseStore{}
        #[async_trait]
        impl CourseStore for CourseStore {
            type Error = StoreDown;

            async fn courses(&self, filter: &CourseFilter) -> Result<Vec<Course>, StoreDown>;
            async fn course(&self, id: CourseId) -> Result<Option<Course>, StoreDown>;
            async fn create_course(&self, course: NewCourse) -> Result<Course, StoreDown>;
            async fn update_course(&self, id: CourseId, changes: CourseChanges) -> Result<Option<Course>, StoreDown>;
            async fn delete_course(&self, id: CourseId) -> Result<bool, StoreDown>;
            async fn students(&self) -> Result<Vec<Student>, StoreDown>;
            async fn student(&self, id: StudentId) -> Result<Option<Student>, StoreDown>;
            async fn create_student(&self, student: NewStudent) -> Result<Student, StoreDown>;
            async fn missing_students(&self, ids: &[StudentId]) -> Result<Vec<StudentId>, StoreDown>;
        }
}
