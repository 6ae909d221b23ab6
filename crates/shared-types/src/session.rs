use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

use crate::AppError;

/// Time-of-day slots a session can run in.
pub const DAY_PERIODS: &[(&str, &str)] = &[("M", "Morning"), ("A", "Afternoon"), ("S", "Evening")];

/// Session status values. New sessions start open.
pub const SESSION_STATUSES: &[(&str, &str)] = &[("O", "Open"), ("F", "Closed")];

pub const SESSION_OPEN: &str = "O";

pub fn is_valid_day_period(s: &str) -> bool {
    DAY_PERIODS.iter().any(|(code, _)| *code == s)
}

pub fn day_period_label(code: &str) -> &str {
    DAY_PERIODS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
        .unwrap_or(code)
}

/// A scheduled offering of a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: i64,
    #[serde(rename = "id_cours")]
    pub course_id: i64,
    #[serde(rename = "id_enseignant", default)]
    pub teacher_id: Option<i64>,
    #[serde(rename = "enseignant__nom", default)]
    pub teacher_last_name: Option<String>,
    #[serde(rename = "enseignant__prenom", default)]
    pub teacher_first_name: Option<String>,
    #[serde(rename = "cours__nom")]
    pub course_name: String,
    #[serde(rename = "cours__type_cours")]
    pub course_type: String,
    #[serde(rename = "cours__niveau")]
    pub level: String,
    #[serde(rename = "date_debut")]
    pub start_date: NaiveDate,
    #[serde(rename = "date_fin")]
    pub end_date: NaiveDate,
    #[serde(rename = "periode_journee", default)]
    pub day_period: Option<String>,
    #[serde(rename = "statut")]
    pub status: String,
    #[serde(rename = "capacite_max")]
    pub capacity: u32,
    #[serde(rename = "seances_mois")]
    pub meetings_per_month: u32,
}

impl Session {
    pub fn is_open(&self) -> bool {
        self.status == SESSION_OPEN
    }

    pub fn teacher_name(&self) -> String {
        match (&self.teacher_last_name, &self.teacher_first_name) {
            (Some(last), Some(first)) => format!("{last} {first}"),
            (Some(last), None) => last.clone(),
            _ => "Unassigned".to_string(),
        }
    }

    pub fn label(&self) -> String {
        format!("{} ({} → {})", self.course_name, self.start_date, self.end_date)
    }
}

/// Raw page as returned by `GET /cours/sessions/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionPage {
    pub sessions: Vec<Session>,
    #[serde(rename = "nombre_total")]
    pub total: i64,
}

/// Filters for the session list. `None` and `"tous"` both mean no filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub course_type: Option<String>,
    pub level: Option<String>,
    pub status: Option<String>,
}

/// Request DTO for creating a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct SessionRequest {
    #[serde(rename = "id_cours")]
    pub course_id: i64,
    #[serde(rename = "id_enseignant")]
    pub teacher_id: i64,
    #[serde(rename = "date_debut")]
    pub start_date: NaiveDate,
    #[serde(rename = "date_fin")]
    pub end_date: NaiveDate,
    #[serde(rename = "periode_journee")]
    pub day_period: String,
    #[serde(rename = "capacite_max")]
    #[cfg_attr(
        feature = "validation",
        validate(range(min = 1, message = "Capacity must be at least 1"))
    )]
    pub capacity: u32,
    #[serde(rename = "seances_mois")]
    #[cfg_attr(
        feature = "validation",
        validate(range(min = 1, message = "At least one meeting per month is required"))
    )]
    pub meetings_per_month: u32,
}

impl SessionRequest {
    pub fn check(&self) -> Result<(), AppError> {
        if self.end_date <= self.start_date {
            return Err(AppError::field(
                "end_date",
                "End date must be after the start date",
            ));
        }
        if !is_valid_day_period(&self.day_period) {
            return Err(AppError::field("day_period", "Select a time of day"));
        }
        if self.capacity < 1 {
            return Err(AppError::field("capacity", "Capacity must be at least 1"));
        }
        if self.meetings_per_month < 1 {
            return Err(AppError::field(
                "meetings_per_month",
                "At least one meeting per month is required",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn request() -> SessionRequest {
        SessionRequest {
            course_id: 1,
            teacher_id: 2,
            start_date: date(2024, 9, 2),
            end_date: date(2024, 12, 20),
            day_period: "M".into(),
            capacity: 12,
            meetings_per_month: 8,
        }
    }

    #[test]
    fn end_must_follow_start() {
        assert!(request().check().is_ok());
        let mut r = request();
        r.end_date = r.start_date;
        let err = r.check().unwrap_err();
        assert!(err.field_errors.contains_key("end_date"));
    }

    #[test]
    fn capacity_and_meetings_must_be_positive() {
        let mut r = request();
        r.capacity = 0;
        assert!(r.check().is_err());
        let mut r = request();
        r.meetings_per_month = 0;
        assert!(r.check().is_err());
    }

    #[test]
    fn decodes_session_without_teacher() {
        let json = r#"{
            "id": 5, "id_cours": 1, "id_enseignant": null,
            "enseignant__nom": null, "enseignant__prenom": null,
            "cours__nom": "Intensif A1", "cours__type_cours": "I", "cours__niveau": "A1",
            "date_debut": "2024-09-02", "date_fin": "2024-12-20",
            "periode_journee": "M", "statut": "O", "capacite_max": 14, "seances_mois": 12
        }"#;
        let session: Session = serde_json::from_str(json).unwrap();
        assert!(session.is_open());
        assert_eq!(session.teacher_name(), "Unassigned");
        assert_eq!(day_period_label("M"), "Morning");
    }
}
