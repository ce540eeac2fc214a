//! Course list filter.
//!
//! A `CourseFilter` restricts the course list to a set of ids, to an exact name, or both.
//! When ids are given the result follows the order in which the ids were requested,
//! not the store order.
//!
//! # Examples
//!
//! ```
//! use coursebook::CourseFilter;
//!
//! let filter = CourseFilter::from_query_pairs([("id", "3"), ("id", "1"), ("id", "3")]).unwrap();
//! assert_eq!(filter.ids(), Some(&[3, 1][..]));
//! assert_eq!(filter.name(), None);
//! ```
use std::collections::HashSet;

use crate::course::{Course, CourseId};
use crate::validation::{ValidationErrors, NOT_AN_INTEGER};

/// Query parameter selecting courses by id. It may be repeated.
pub const ID_PARAM: &str = "id";
/// Query parameter selecting courses by exact name.
pub const NAME_PARAM: &str = "name";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseFilter {
    ids: Option<Vec<CourseId>>,
    name: Option<String>,
}

impl CourseFilter {
    /// A filter matching every course.
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts the filter to the given ids.
    ///
    /// The request order is kept and repeated ids are only reported once.
    pub fn with_ids(mut self, ids: impl IntoIterator<Item = CourseId>) -> Self {
        let mut seen = HashSet::new();
        self.ids = Some(ids.into_iter().filter(|id| seen.insert(*id)).collect());
        self
    }

    /// Restricts the filter to courses named exactly `name`.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builds a filter out of the decoded query string pairs.
    ///
    /// Blank values and unknown parameters are ignored. When `name` is repeated the
    /// last value wins.
    pub fn from_query_pairs<K, V>(
        pairs: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self, ValidationErrors>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut ids = Vec::new();
        let mut name = None;
        let mut errors = ValidationErrors::default();

        for (key, value) in pairs {
            let value = value.as_ref().trim();
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                ID_PARAM => match value.parse::<CourseId>() {
                    Ok(id) => ids.push(id),
                    Err(_) => {
                        if !errors.contains(ID_PARAM) {
                            errors.add(ID_PARAM, NOT_AN_INTEGER);
                        }
                    }
                },
                NAME_PARAM => name = Some(value.to_owned()),
                _ => {}
            }
        }

        let mut filter = errors.into_result(Self::all())?;
        if !ids.is_empty() {
            filter = filter.with_ids(ids);
        }
        if let Some(name) = name {
            filter = filter.with_name(name);
        }
        Ok(filter)
    }

    pub fn ids(&self) -> Option<&[CourseId]> {
        self.ids.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns `true` if the course satisfies every predicate of the filter.
    pub fn matches(&self, course: &Course) -> bool {
        self.ids.as_ref().map_or(true, |ids| ids.contains(&course.id))
            && self.name.as_ref().map_or(true, |name| *name == course.name)
    }
}
