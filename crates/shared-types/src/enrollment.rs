use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

use crate::AppError;

pub const ENROLLMENT_STATUSES: &[(&str, &str)] = &[("A", "Active"), ("I", "Inactive")];

pub fn enrollment_status_label(code: &str) -> &str {
    ENROLLMENT_STATUSES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
        .unwrap_or(code)
}

/// A student's enrollment in a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: i64,
    #[serde(rename = "date_inscription")]
    pub enrolled_on: NaiveDate,
    #[serde(rename = "frais_inscription")]
    pub fee: f64,
    #[serde(rename = "but", default)]
    pub goal: Option<String>,
    #[serde(rename = "statut")]
    pub status: String,
    #[serde(rename = "date_sortie", default)]
    pub left_on: Option<NaiveDate>,
    #[serde(rename = "motif_sortie", default)]
    pub leave_reason: Option<String>,
    #[serde(rename = "preinscription")]
    pub pre_enrollment: bool,
    #[serde(rename = "id_session")]
    pub session_id: i64,
}

/// Request DTO for enrolling a student in a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct EnrollmentRequest {
    #[serde(rename = "frais_inscription")]
    #[cfg_attr(
        feature = "validation",
        validate(range(min = 0.0, message = "Enrollment fee cannot be negative"))
    )]
    pub fee: f64,
    #[serde(rename = "but", default)]
    pub goal: Option<String>,
    #[serde(rename = "preinscription", default)]
    pub pre_enrollment: Option<bool>,
    #[serde(rename = "id_session")]
    pub session_id: i64,
}

impl EnrollmentRequest {
    pub fn check(&self) -> Result<(), AppError> {
        if !self.fee.is_finite() || self.fee < 0.0 {
            return Err(AppError::field(
                "fee",
                "Enrollment fee cannot be negative",
            ));
        }
        Ok(())
    }
}

/// Request DTO for editing an enrollment. Every field is written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentUpdate {
    #[serde(rename = "frais_inscription")]
    pub fee: f64,
    #[serde(rename = "but", default)]
    pub goal: Option<String>,
    #[serde(rename = "statut")]
    pub status: String,
    #[serde(rename = "date_sortie", default)]
    pub left_on: Option<NaiveDate>,
    #[serde(rename = "motif_sortie", default)]
    pub leave_reason: Option<String>,
    #[serde(rename = "preinscription")]
    pub pre_enrollment: bool,
    #[serde(rename = "id_session")]
    pub session_id: i64,
}

impl EnrollmentUpdate {
    pub fn from_enrollment(e: &Enrollment) -> Self {
        Self {
            fee: e.fee,
            goal: e.goal.clone(),
            status: e.status.clone(),
            left_on: e.left_on,
            leave_reason: e.leave_reason.clone(),
            pre_enrollment: e.pre_enrollment,
            session_id: e.session_id,
        }
    }

    pub fn check(&self, enrolled_on: NaiveDate) -> Result<(), AppError> {
        let mut errors = HashMap::new();
        if !self.fee.is_finite() || self.fee < 0.0 {
            errors.insert("fee".to_string(), "Enrollment fee cannot be negative".to_string());
        }
        if !ENROLLMENT_STATUSES.iter().any(|(c, _)| *c == self.status) {
            errors.insert("status".to_string(), "Unknown status".to_string());
        }
        let has_reason = self.leave_reason.as_deref().is_some_and(|r| !r.trim().is_empty());
        match self.left_on {
            Some(left) if left < enrolled_on => {
                errors.insert(
                    "left_on".to_string(),
                    "Leave date cannot precede the enrollment date".to_string(),
                );
            }
            None if has_reason => {
                errors.insert(
                    "left_on".to_string(),
                    "A leave reason needs a leave date".to_string(),
                );
            }
            _ => {}
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::validation("Validation failed", errors))
        }
    }
}
