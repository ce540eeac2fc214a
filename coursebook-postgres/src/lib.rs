//! # PostgreSQL Coursebook Backend Library
mod course_store;
mod error;

pub use crate::course_store::PgCourseStore;
pub use error::Error;

/// Initializes the PostgreSQL DB
///
/// It creates the tables and indexes used by the Postgres course store. Every statement is
/// idempotent, so it is safe to run it on each startup.
pub async fn setup(pool: &sqlx::PgPool) -> Result<(), Error> {
    crate::course_store::setup(pool).await
}
