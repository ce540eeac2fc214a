//! PostgreSQL Course Store
//!
//! This module provides an implementation of the `CourseStore` trait using PostgreSQL as the
//! underlying storage. Ids come from `BIGSERIAL` sequences, so they are never reused, and every
//! mutation touching more than one table runs in a single transaction.
mod query;

use async_trait::async_trait;
use coursebook::{
    Course, CourseChanges, CourseFilter, CourseId, CourseStore, NewCourse, NewStudent, Student,
    StudentId,
};
use sqlx::{FromRow, PgConnection, PgPool};

use crate::Error;
use query::courses_query;

/// PostgreSQL course store implementation.
#[derive(Clone)]
pub struct PgCourseStore {
    pool: PgPool,
}

impl PgCourseStore {
    /// Initializes the PostgreSQL DB and returns a new instance of `PgCourseStore`.
    ///
    /// # Arguments
    ///
    /// * `pool` - The PostgreSQL connection pool.
    pub async fn try_new(pool: PgPool) -> Result<Self, Error> {
        setup(&pool).await?;
        Ok(Self::new_uninitialized(pool))
    }

    /// Creates a new instance of `PgCourseStore`.
    ///
    /// This constructor does not initialize the database. If you need to initialize the
    /// database, use `PgCourseStore::try_new` instead.
    pub fn new_uninitialized(pool: PgPool) -> Self {
        Self { pool }
    }
}

pub async fn setup(pool: &PgPool) -> Result<(), Error> {
    sqlx::query(include_str!("course_store/sql/table_student.sql"))
        .execute(pool)
        .await?;
    sqlx::query(include_str!("course_store/sql/table_course.sql"))
        .execute(pool)
        .await?;
    sqlx::query(include_str!("course_store/sql/idx_course_name.sql"))
        .execute(pool)
        .await?;
    sqlx::query(include_str!("course_store/sql/table_course_student.sql"))
        .execute(pool)
        .await?;
    Ok(())
}

#[derive(FromRow)]
struct CourseRow {
    id: CourseId,
    name: String,
    students: Vec<StudentId>,
}

impl From<CourseRow> for Course {
    fn from(row: CourseRow) -> Self {
        Course {
            id: row.id,
            name: row.name,
            students: row.students,
        }
    }
}

async fn enroll(
    conn: &mut PgConnection,
    course_id: CourseId,
    students: &[StudentId],
) -> Result<(), sqlx::Error> {
    if students.is_empty() {
        return Ok(());
    }
    sqlx::query(
        "INSERT INTO course_student (course_id, student_id) SELECT $1, unnest($2::BIGINT[]) ON CONFLICT DO NOTHING",
    )
    .bind(course_id)
    .bind(students)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

#[async_trait]
impl CourseStore for PgCourseStore {
    type Error = Error;

    async fn courses(&self, filter: &CourseFilter) -> Result<Vec<Course>, Self::Error> {
        let mut query = courses_query(filter);
        let rows = query
            .build_query_as::<CourseRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Course::from).collect())
    }

    async fn course(&self, id: CourseId) -> Result<Option<Course>, Self::Error> {
        let filter = CourseFilter::all().with_ids([id]);
        Ok(self.courses(&filter).await?.into_iter().next())
    }

    /// Inserts the course and its enrollment in one transaction.
    async fn create_course(&self, course: NewCourse) -> Result<Course, Self::Error> {
        let mut tx = self.pool.begin().await?;
        let id: CourseId = sqlx::query_scalar("INSERT INTO course (name) VALUES ($1) RETURNING id")
            .bind(&course.name)
            .fetch_one(&mut *tx)
            .await?;
        enroll(&mut tx, id, &course.students).await?;
        tx.commit().await?;

        Ok(Course {
            id,
            name: course.name,
            students: course.students,
        })
    }

    /// Updates the course row and rewrites its enrollment in one transaction.
    ///
    /// The course row is locked first, so concurrent updates of the same course are applied
    /// one after the other.
    async fn update_course(
        &self,
        id: CourseId,
        changes: CourseChanges,
    ) -> Result<Option<Course>, Self::Error> {
        let mut tx = self.pool.begin().await?;
        let found = match &changes.name {
            Some(name) => {
                sqlx::query("UPDATE course SET name = $2 WHERE id = $1")
                    .bind(id)
                    .bind(name)
                    .execute(&mut *tx)
                    .await?
                    .rows_affected()
                    > 0
            }
            None => sqlx::query_scalar::<_, CourseId>("SELECT id FROM course WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .is_some(),
        };
        if !found {
            return Ok(None);
        }

        if let Some(students) = &changes.students {
            sqlx::query("DELETE FROM course_student WHERE course_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            enroll(&mut tx, id, students).await?;
        }
        tx.commit().await?;

        self.course(id).await
    }

    async fn delete_course(&self, id: CourseId) -> Result<bool, Self::Error> {
        let result = sqlx::query("DELETE FROM course WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn students(&self) -> Result<Vec<Student>, Self::Error> {
        let rows = sqlx::query_as::<_, (StudentId, String)>("SELECT id, name FROM student ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(id, name)| Student { id, name })
            .collect())
    }

    async fn student(&self, id: StudentId) -> Result<Option<Student>, Self::Error> {
        let row = sqlx::query_as::<_, (StudentId, String)>("SELECT id, name FROM student WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(id, name)| Student { id, name }))
    }

    async fn create_student(&self, student: NewStudent) -> Result<Student, Self::Error> {
        let id: StudentId =
            sqlx::query_scalar("INSERT INTO student (name) VALUES ($1) RETURNING id")
                .bind(&student.name)
                .fetch_one(&self.pool)
                .await?;
        Ok(Student {
            id,
            name: student.name,
        })
    }

    async fn missing_students(&self, ids: &[StudentId]) -> Result<Vec<StudentId>, Self::Error> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let existing: Vec<StudentId> = sqlx::query_scalar("SELECT id FROM student WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(ids
            .iter()
            .copied()
            .filter(|id| !existing.contains(id))
            .collect())
    }
}
