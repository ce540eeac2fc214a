//! Runtime settings.
//!
//! Settings are read from the process environment. Binaries are expected to load a
//! `.env` file beforehand.
use std::str::FromStr;

pub const BIND_VAR: &str = "COURSEBOOK_BIND";
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
pub const MAX_STUDENTS_PER_COURSE_VAR: &str = "MAX_STUDENTS_PER_COURSE";

/// Represents the ways settings can fail to load.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SettingsError {
    /// A variable holds a value that cannot be parsed.
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Address the HTTP server listens on.
    pub bind: String,
    /// PostgreSQL connection string. Without it the service keeps its data in memory.
    pub database_url: Option<String>,
    /// Upper bound on the number of students enrolled in a single course.
    pub max_students_per_course: usize,
}

impl Settings {
    pub const DEFAULT_BIND: &'static str = "127.0.0.1:8000";
    pub const DEFAULT_MAX_STUDENTS_PER_COURSE: usize = 20;

    /// Loads the settings from the process environment.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads the settings using `lookup` to resolve variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let defaults = Self::default();
        Ok(Self {
            bind: lookup(BIND_VAR).unwrap_or(defaults.bind),
            database_url: lookup(DATABASE_URL_VAR).filter(|url| !url.is_empty()),
            max_students_per_course: parse(
                MAX_STUDENTS_PER_COURSE_VAR,
                lookup(MAX_STUDENTS_PER_COURSE_VAR),
            )?
            .unwrap_or(defaults.max_students_per_course),
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind: Self::DEFAULT_BIND.to_owned(),
            database_url: None,
            max_students_per_course: Self::DEFAULT_MAX_STUDENTS_PER_COURSE,
        }
    }
}

fn parse<T>(key: &'static str, value: Option<String>) -> Result<Option<T>, SettingsError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|err: T::Err| SettingsError::Invalid {
                    key,
                    reason: err.to_string(),
                    value,
                })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn it_caps_courses_at_twenty_students_by_default() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();

        assert_eq!(settings.max_students_per_course, 20);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn it_reads_the_variables() {
        let settings = Settings::from_lookup(lookup(&[
            (BIND_VAR, "0.0.0.0:9000"),
            (DATABASE_URL_VAR, "postgres://localhost/coursebook"),
            (MAX_STUDENTS_PER_COURSE_VAR, " 25 "),
        ]))
        .unwrap();

        assert_eq!(settings.bind, "0.0.0.0:9000");
        assert_eq!(
            settings.database_url.as_deref(),
            Some("postgres://localhost/coursebook")
        );
        assert_eq!(settings.max_students_per_course, 25);
    }

    #[test]
    fn it_treats_an_empty_database_url_as_unset() {
        let settings = Settings::from_lookup(lookup(&[(DATABASE_URL_VAR, "")])).unwrap();

        assert_eq!(settings.database_url, None);
    }

    #[test]
    fn it_should_reject_an_invalid_student_limit() {
        let err =
            Settings::from_lookup(lookup(&[(MAX_STUDENTS_PER_COURSE_VAR, "twenty")])).unwrap_err();

        assert!(matches!(
            err,
            SettingsError::Invalid { key: MAX_STUDENTS_PER_COURSE_VAR, ref value, .. } if value == "twenty"
        ));
    }
}
