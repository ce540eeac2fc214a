use coursebook::CourseFilter;
use sqlx::{Postgres, QueryBuilder};

const SELECT_COURSES: &str = "SELECT c.id, c.name, \
    COALESCE(array_agg(cs.student_id ORDER BY cs.student_id) FILTER (WHERE cs.student_id IS NOT NULL), '{}') AS students \
    FROM course c LEFT JOIN course_student cs ON cs.course_id = c.id";

/// Builds the course list query for the given filter.
///
/// Without ids the courses come out in creation order; with ids they follow the
/// position of their id in the requested list.
pub fn courses_query(filter: &CourseFilter) -> QueryBuilder<'_, Postgres> {
    let mut builder = QueryBuilder::new(SELECT_COURSES);

    let mut separator = " WHERE ";
    if let Some(ids) = filter.ids() {
        builder
            .push(separator)
            .push("c.id = ANY(")
            .push_bind(ids.to_vec())
            .push(")");
        separator = " AND ";
    }
    if let Some(name) = filter.name() {
        builder.push(separator).push("c.name = ").push_bind(name);
    }

    builder.push(" GROUP BY c.id");

    match filter.ids() {
        Some(ids) => builder
            .push(" ORDER BY array_position(")
            .push_bind(ids.to_vec())
            .push(", c.id)"),
        None => builder.push(" ORDER BY c.id"),
    };
    builder
}
