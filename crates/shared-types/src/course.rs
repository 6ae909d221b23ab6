use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

use crate::student::is_valid_level;
use crate::AppError;

/// Course types: intensive and semi-intensive.
pub const COURSE_TYPES: &[(&str, &str)] = &[("I", "Intensive"), ("S", "Semi-intensive")];

/// Upper bound on teaching hours in one week.
pub const MAX_HOURS_PER_WEEK: u32 = 40;

pub fn is_valid_course_type(s: &str) -> bool {
    COURSE_TYPES.iter().any(|(code, _)| *code == s)
}

pub fn course_type_label(code: &str) -> &str {
    COURSE_TYPES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
        .unwrap_or(code)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    #[serde(flatten)]
    pub details: CourseRequest,
}

/// Request DTO for creating or updating a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct CourseRequest {
    #[serde(rename = "nom")]
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 2, max = 100, message = "Course name must be at least 2 characters"))
    )]
    pub name: String,
    #[serde(rename = "type_cours")]
    pub course_type: String,
    #[serde(rename = "niveau")]
    pub level: String,
    #[serde(rename = "heures_par_semaine", default)]
    #[cfg_attr(
        feature = "validation",
        validate(range(min = 1, message = "Hours per week must be at least 1"))
    )]
    pub hours_per_week: Option<u32>,
    #[serde(rename = "duree_semaines", default)]
    #[cfg_attr(
        feature = "validation",
        validate(range(min = 1, message = "Duration must be at least 1 week"))
    )]
    pub duration_weeks: Option<u32>,
    #[serde(rename = "tarif")]
    #[cfg_attr(
        feature = "validation",
        validate(range(min = 0.01, message = "Rate must be positive"))
    )]
    pub rate: f64,
}

impl CourseRequest {
    pub fn check(&self) -> Result<(), AppError> {
        if !is_valid_course_type(&self.course_type) {
            return Err(AppError::field("course_type", "Unknown course type"));
        }
        if !is_valid_level(&self.level) {
            return Err(AppError::field("level", "Unknown level"));
        }
        if self.rate <= 0.0 {
            return Err(AppError::field("rate", "Rate must be positive"));
        }
        if self.hours_per_week.is_some_and(|h| h > MAX_HOURS_PER_WEEK) {
            return Err(AppError::field(
                "hours_per_week",
                format!("At most {MAX_HOURS_PER_WEEK} hours per week"),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CourseRequest {
        CourseRequest {
            name: "Français intensif".into(),
            course_type: "I".into(),
            level: "A2".into(),
            hours_per_week: Some(20),
            duration_weeks: Some(4),
            rate: 850.0,
        }
    }

    #[test]
    fn valid_course_passes() {
        assert!(request().check().is_ok());
    }

    #[test]
    fn weekly_hours_are_capped() {
        let mut r = request();
        r.hours_per_week = Some(41);
        assert!(r.check().is_err());
    }

    #[test]
    fn rejects_unknown_type_and_zero_rate() {
        let mut r = request();
        r.course_type = "X".into();
        assert!(r.check().is_err());
        let mut r = request();
        r.rate = 0.0;
        assert!(r.check().is_err());
    }

    #[test]
    fn decodes_backend_course() {
        let json = r#"{"id":2,"nom":"Soir B1","type_cours":"S","niveau":"B1","heures_par_semaine":null,"duree_semaines":null,"tarif":320.5}"#;
        let course: Course = serde_json::from_str(json).unwrap();
        assert_eq!(course.details.level, "B1");
        assert_eq!(course.details.hours_per_week, None);
        assert_eq!(course_type_label(&course.details.course_type), "Semi-intensive");
    }
}
