use serde::{Deserialize, Serialize};

use crate::validation::{ValidationErrors, BLANK, REQUIRED};

pub type StudentId = i64;

/// A persisted student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
}

/// A validated student ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
}

impl NewStudent {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Student creation payload as received from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StudentPayload {
    #[serde(default)]
    pub name: Option<String>,
}

impl StudentPayload {
    pub fn into_new_student(self) -> Result<NewStudent, ValidationErrors> {
        match self.name.as_deref().map(str::trim) {
            None => Err(ValidationErrors::single("name", REQUIRED)),
            Some("") => Err(ValidationErrors::single("name", BLANK)),
            Some(name) => Ok(NewStudent::new(name)),
        }
    }
}
