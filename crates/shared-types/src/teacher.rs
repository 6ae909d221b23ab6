use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

/// A teacher as listed by `GET /cours/enseignants/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: i64,
    #[serde(rename = "nom")]
    pub last_name: String,
    #[serde(rename = "prenom")]
    pub first_name: String,
}

impl Teacher {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.last_name, self.first_name)
    }
}

/// Request DTO for creating or renaming a teacher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct TeacherRequest {
    #[serde(rename = "nom")]
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 2, max = 20, message = "Last name must be 2 to 20 characters"))
    )]
    pub last_name: String,
    #[serde(rename = "prenom")]
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 2, max = 20, message = "First name must be 2 to 20 characters"))
    )]
    pub first_name: String,
}
