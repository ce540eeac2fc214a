use coursebook::{
    Course, CourseChanges, CourseId, CoursePayload, CourseStore, Student, StudentId,
    StudentPayload, ValidationErrors, STUDENTS,
};
use tracing::{info, instrument};

use super::{store_error, Application, Error};

impl<S: CourseStore> Application<S> {
    #[instrument(skip(self))]
    pub async fn create_course(&self, payload: CoursePayload) -> Result<Course, Error> {
        let requested = payload.requested_students();
        let course = payload.into_new_course(self.settings.max_students_per_course);
        let course = self.check_students(&requested, course).await?;

        let course = self
            .store
            .create_course(course)
            .await
            .map_err(store_error)?;
        info!(course_id = course.id, "course created");
        Ok(course)
    }

    /// Replaces the name and the enrollment of a course.
    #[instrument(skip(self))]
    pub async fn update_course(
        &self,
        id: CourseId,
        payload: CoursePayload,
    ) -> Result<Course, Error> {
        self.ensure_course_exists(id).await?;
        let requested = payload.requested_students();
        let changes = payload.into_replacement(self.settings.max_students_per_course);
        let changes = self.check_students(&requested, changes).await?;
        self.apply_changes(id, changes).await
    }

    /// Changes only the fields present in the payload.
    #[instrument(skip(self))]
    pub async fn patch_course(&self, id: CourseId, payload: CoursePayload) -> Result<Course, Error> {
        self.ensure_course_exists(id).await?;
        let requested = payload.requested_students();
        let changes = payload.into_changes(self.settings.max_students_per_course);
        let changes = self.check_students(&requested, changes).await?;
        self.apply_changes(id, changes).await
    }

    #[instrument(skip(self))]
    pub async fn delete_course(&self, id: CourseId) -> Result<(), Error> {
        if !self.store.delete_course(id).await.map_err(store_error)? {
            return Err(Error::NotFound);
        }
        info!(course_id = id, "course deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn create_student(&self, payload: StudentPayload) -> Result<Student, Error> {
        let student = payload.into_new_student()?;
        let student = self
            .store
            .create_student(student)
            .await
            .map_err(store_error)?;
        info!(student_id = student.id, "student registered");
        Ok(student)
    }

    async fn ensure_course_exists(&self, id: CourseId) -> Result<(), Error> {
        match self.store.course(id).await.map_err(store_error)? {
            Some(_) => Ok(()),
            None => Err(Error::NotFound),
        }
    }

    async fn apply_changes(&self, id: CourseId, changes: CourseChanges) -> Result<Course, Error> {
        let course = self
            .store
            .update_course(id, changes)
            .await
            .map_err(store_error)?
            .ok_or(Error::NotFound)?;
        info!(course_id = id, "course updated");
        Ok(course)
    }

    /// Adds an error for every requested student that does not exist.
    ///
    /// The lookup is skipped when the students field is already invalid, so that the
    /// store is not queried for a payload that is going to be rejected anyway.
    async fn check_students<T>(
        &self,
        requested: &[StudentId],
        validated: Result<T, ValidationErrors>,
    ) -> Result<T, Error> {
        let mut errors = match &validated {
            Ok(_) => ValidationErrors::default(),
            Err(errors) => errors.clone(),
        };

        if !requested.is_empty() && !errors.contains(STUDENTS) {
            let missing = self
                .store
                .missing_students(requested)
                .await
                .map_err(store_error)?;
            for id in missing {
                errors.add(
                    STUDENTS,
                    format!("Invalid pk \"{id}\" - object does not exist."),
                );
            }
        }

        match validated {
            Ok(value) if errors.is_empty() => Ok(value),
            _ => Err(Error::Validation(errors)),
        }
    }
}
