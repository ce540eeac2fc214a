use coursebook::{Course, CourseFilter, CourseId, CourseStore, Student, StudentId};
use tracing::instrument;

use super::{store_error, Application, Error};

impl<S: CourseStore> Application<S> {
    #[instrument(skip(self))]
    pub async fn courses(&self, filter: &CourseFilter) -> Result<Vec<Course>, Error> {
        self.store.courses(filter).await.map_err(store_error)
    }

    #[instrument(skip(self))]
    pub async fn course_by_id(&self, id: CourseId) -> Result<Course, Error> {
        self.store
            .course(id)
            .await
            .map_err(store_error)?
            .ok_or(Error::NotFound)
    }

    #[instrument(skip(self))]
    pub async fn students(&self) -> Result<Vec<Student>, Error> {
        self.store.students().await.map_err(store_error)
    }

    #[instrument(skip(self))]
    pub async fn student_by_id(&self, id: StudentId) -> Result<Student, Error> {
        self.store
            .student(id)
            .await
            .map_err(store_error)?
            .ok_or(Error::NotFound)
    }
}
