use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

use crate::AppError;

/// Where a private lesson takes place: at the school or at home.
pub const LESSON_LOCATIONS: &[(&str, &str)] = &[("E", "School"), ("D", "At home")];

pub fn is_valid_location(s: &str) -> bool {
    LESSON_LOCATIONS.iter().any(|(code, _)| *code == s)
}

pub fn location_label(code: &str) -> &str {
    LESSON_LOCATIONS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
        .unwrap_or(code)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivateLesson {
    pub id: i64,
    #[serde(rename = "date_cours_prive")]
    pub date: NaiveDate,
    #[serde(rename = "heure_debut")]
    pub start_time: NaiveTime,
    #[serde(rename = "heure_fin")]
    pub end_time: NaiveTime,
    #[serde(rename = "tarif")]
    pub rate: f64,
    #[serde(rename = "lieu")]
    pub location: String,
    #[serde(rename = "enseignant")]
    pub teacher_id: i64,
    #[serde(rename = "enseignant__nom")]
    pub teacher_last_name: String,
    #[serde(rename = "enseignant__prenom")]
    pub teacher_first_name: String,
    /// Display names, "Last First".
    #[serde(rename = "eleves", default)]
    pub students: Vec<String>,
    #[serde(rename = "eleves_ids", default)]
    pub student_ids: Vec<i64>,
}

impl PrivateLesson {
    pub fn time_range(&self) -> String {
        format!(
            "{} – {}",
            self.start_time.format("%H:%M"),
            self.end_time.format("%H:%M")
        )
    }

    /// Participant ids paired with their display names. An id the backend
    /// sent no name for is labelled by its number.
    pub fn participants(&self) -> Vec<(i64, String)> {
        self.student_ids
            .iter()
            .enumerate()
            .map(|(i, id)| {
                let name = self
                    .students
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| format!("Student #{id}"));
                (*id, name)
            })
            .collect()
    }
}

/// Raw page as returned by `GET /cours/cours_prive/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivateLessonPage {
    #[serde(rename = "cours_prives")]
    pub lessons: Vec<PrivateLesson>,
    #[serde(rename = "nombre_total")]
    pub total: i64,
}

/// Request DTO for scheduling a private lesson.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct PrivateLessonRequest {
    #[serde(rename = "date_cours_prive")]
    pub date: NaiveDate,
    #[serde(rename = "heure_debut")]
    pub start_time: NaiveTime,
    #[serde(rename = "heure_fin")]
    pub end_time: NaiveTime,
    #[serde(rename = "tarif")]
    #[cfg_attr(
        feature = "validation",
        validate(range(min = 0.01, message = "Rate must be positive"))
    )]
    pub rate: f64,
    #[serde(rename = "lieu")]
    pub location: String,
    #[serde(rename = "eleves_ids")]
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Select at least one student"))
    )]
    pub student_ids: Vec<i64>,
    #[serde(rename = "enseignant")]
    pub teacher_id: i64,
}

impl PrivateLessonRequest {
    pub fn check(&self) -> Result<(), AppError> {
        if self.end_time <= self.start_time {
            return Err(AppError::field(
                "end_time",
                "End time must be after the start time",
            ));
        }
        if self.rate <= 0.0 {
            return Err(AppError::field("rate", "Rate must be positive"));
        }
        if self.student_ids.is_empty() {
            return Err(AppError::field("student_ids", "Select at least one student"));
        }
        if !is_valid_location(&self.location) {
            return Err(AppError::field("location", "Select a location"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PrivateLessonRequest {
        PrivateLessonRequest {
            date: NaiveDate::from_ymd_opt(2024, 11, 4).unwrap(),
            start_time: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(15, 30, 0).unwrap(),
            rate: 90.0,
            location: "E".into(),
            student_ids: vec![3],
            teacher_id: 1,
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(request().check().is_ok());
    }

    #[test]
    fn end_time_must_follow_start() {
        let mut r = request();
        r.end_time = r.start_time;
        assert!(r.check().unwrap_err().field_errors.contains_key("end_time"));
    }

    #[test]
    fn needs_students_and_known_location() {
        let mut r = request();
        r.student_ids.clear();
        assert!(r.check().is_err());
        let mut r = request();
        r.location = "X".into();
        assert!(r.check().is_err());
    }

    #[test]
    fn wire_times_are_hh_mm_ss() {
        let value = serde_json::to_value(request()).unwrap();
        assert_eq!(value["heure_debut"], "14:00:00");
        assert_eq!(value["eleves_ids"], serde_json::json!([3]));
    }

    #[test]
    fn participants_pair_ids_with_names() {
        let json = r#"{"id":4,"date_cours_prive":"2024-11-04","heure_debut":"14:00:00",
            "heure_fin":"15:30:00","tarif":90.0,"lieu":"E","enseignant":1,
            "enseignant__nom":"Rochat","enseignant__prenom":"Luc",
            "eleves":["Muller Anna"],"eleves_ids":[7,9]}"#;
        let lesson: PrivateLesson = serde_json::from_str(json).unwrap();
        assert_eq!(
            lesson.participants(),
            vec![(7, "Muller Anna".to_string()), (9, "Student #9".to_string())]
        );
    }
}
