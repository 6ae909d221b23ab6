use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[cfg(feature = "validation")]
use validator::Validate;

use crate::AppError;

// ── Student validation constants ───────────────────────────────────

/// Valid values for `sexe`.
pub const SEXES: &[(&str, &str)] = &[("F", "Female"), ("H", "Male")];

/// CEFR levels taught by the school.
pub const LEVELS: &[&str] = &["A1", "A2", "B1", "B2", "C1"];

/// Residence permit types. "P" means no permit.
pub const PERMIT_TYPES: &[(&str, &str)] = &[
    ("E", "Student permit"),
    ("B", "Permit B"),
    ("S", "Permit S"),
    ("P", "No permit"),
];

pub const NO_PERMIT: &str = "P";

/// Status filter values accepted by the student list endpoint.
pub const STUDENT_STATUS_FILTERS: &[(&str, &str)] = &[
    ("tous", "All"),
    ("A", "Active"),
    ("I", "Inactive"),
    ("P", "Pre-enrolled"),
];

pub fn is_valid_level(s: &str) -> bool {
    LEVELS.contains(&s)
}

pub fn is_valid_sex(s: &str) -> bool {
    SEXES.iter().any(|(code, _)| *code == s)
}

pub fn is_valid_permit_type(s: &str) -> bool {
    PERMIT_TYPES.iter().any(|(code, _)| *code == s)
}

/// At least 7 characters, only digits, spaces and `-+().`.
pub fn is_valid_phone(s: &str) -> bool {
    s.chars().count() >= 7
        && s
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_whitespace() || "-+().".contains(c))
}

/// Swiss postal code: exactly four digits.
pub fn is_valid_npa(s: &str) -> bool {
    s.len() == 4 && s.chars().all(|c| c.is_ascii_digit())
}

pub fn is_valid_street_number(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

fn filled(value: &Option<String>) -> bool {
    value.as_deref().map(|v| !v.trim().is_empty()).unwrap_or(false)
}

// ── Student API shapes ─────────────────────────────────────────────

/// Row of the paginated student list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentSummary {
    pub id: i64,
    #[serde(rename = "nom")]
    pub last_name: String,
    #[serde(rename = "prenom")]
    pub first_name: String,
    #[serde(rename = "date_naissance")]
    pub birth_date: NaiveDate,
    #[serde(rename = "telephone")]
    pub phone: String,
    pub email: String,
    #[serde(rename = "pays__nom")]
    pub country_name: String,
}

impl StudentSummary {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.last_name, self.first_name)
    }
}

/// Raw page as returned by `GET /eleves/eleves/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentPage {
    #[serde(rename = "eleves")]
    pub students: Vec<StudentSummary>,
    #[serde(rename = "nombre_total")]
    pub total: i64,
}

/// Query for the student list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    pub status: Option<String>,
}

/// Editable student record, used for create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct StudentProfile {
    #[serde(rename = "nom")]
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 2, max = 100, message = "Last name must be at least 2 characters"))
    )]
    pub last_name: String,
    #[serde(rename = "prenom")]
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 2, max = 100, message = "First name must be at least 2 characters"))
    )]
    pub first_name: String,
    #[serde(rename = "date_naissance")]
    pub birth_date: NaiveDate,
    #[serde(rename = "lieu_naissance")]
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 100, message = "Place of birth is required"))
    )]
    pub birth_place: String,
    #[serde(rename = "sexe")]
    pub sex: String,
    #[serde(rename = "rue", default)]
    pub street: Option<String>,
    #[serde(rename = "numero", default)]
    pub street_number: Option<String>,
    #[serde(default)]
    pub npa: Option<String>,
    #[serde(rename = "localite", default)]
    pub locality: Option<String>,
    #[serde(rename = "telephone")]
    pub phone: String,
    #[cfg_attr(
        feature = "validation",
        validate(email(message = "Valid email is required"))
    )]
    pub email: String,
    #[serde(rename = "adresse_facturation", default)]
    pub billing_address: Option<String>,
    #[serde(rename = "type_permis", default)]
    pub permit_type: Option<String>,
    #[serde(rename = "date_permis", default)]
    pub permit_date: Option<NaiveDate>,
    #[serde(rename = "niveau", default)]
    pub level: Option<String>,
    #[serde(rename = "langue_maternelle", default)]
    pub native_language: Option<String>,
    #[serde(rename = "autres_langues", default)]
    pub other_languages: Option<String>,
    #[serde(rename = "src_decouverte", default)]
    pub referral_source: Option<String>,
    #[serde(rename = "commentaires", default)]
    pub comments: Option<String>,
    #[serde(rename = "pays_id")]
    pub country_id: i64,
}

impl StudentProfile {
    /// Cross-field and format rules the backend enforces on a student.
    pub fn check(&self, today: NaiveDate) -> Result<(), AppError> {
        let mut errors: HashMap<String, String> = HashMap::new();
        let mut fail = |field: &str, msg: &str| {
            errors
                .entry(field.to_string())
                .or_insert_with(|| msg.to_string());
        };

        if !is_valid_phone(&self.phone) {
            fail("phone", "Invalid phone number");
        }
        if !is_valid_sex(&self.sex) {
            fail("sex", "Select a valid sex");
        }
        if self.birth_date > today {
            fail("birth_date", "Birth date cannot be in the future");
        }
        if let Some(level) = self.level.as_deref().filter(|l| !l.is_empty()) {
            if !is_valid_level(level) {
                fail("level", "Unknown level");
            }
        }

        let address = [&self.street, &self.street_number, &self.npa, &self.locality];
        let filled_parts = address.iter().filter(|part| filled(part)).count();
        if filled_parts != 0 && filled_parts != address.len() {
            fail(
                "address",
                "All address fields must be filled in or left empty",
            );
        }
        if let Some(npa) = self.npa.as_deref().filter(|v| !v.is_empty()) {
            if !is_valid_npa(npa) {
                fail("npa", "NPA must be exactly 4 digits");
            }
        }
        if let Some(number) = self.street_number.as_deref().filter(|v| !v.is_empty()) {
            if !is_valid_street_number(number) {
                fail("street_number", "Street number must contain digits only");
            }
        }

        match self.permit_type.as_deref() {
            None | Some("") => fail("permit_type", "Permit type is required"),
            Some(permit) if !is_valid_permit_type(permit) => {
                fail("permit_type", "Unknown permit type")
            }
            Some(permit) if permit != NO_PERMIT && self.permit_date.is_none() => {
                fail("permit_date", "Permit date is required for this permit type")
            }
            _ => {}
        }
        if let Some(permit_date) = self.permit_date {
            if permit_date < today {
                fail("permit_date", "Permit date cannot be in the past");
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::validation("Validation failed", errors))
        }
    }
}

/// Full student record from `GET /eleves/eleve/{id}/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentDetail {
    pub id: i64,
    #[serde(flatten)]
    pub profile: StudentProfile,
    #[serde(rename = "pays__nom")]
    pub country_name: String,
}

impl StudentDetail {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.profile.last_name, self.profile.first_name)
    }
}

/// Country reference entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub id: i64,
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(rename = "indicatif")]
    pub dialing_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn profile() -> StudentProfile {
        StudentProfile {
            last_name: "Dupont".into(),
            first_name: "Marie".into(),
            birth_date: NaiveDate::from_ymd_opt(1995, 3, 2).unwrap(),
            birth_place: "Lyon".into(),
            sex: "F".into(),
            street: None,
            street_number: None,
            npa: None,
            locality: None,
            phone: "+41 79 123 45 67".into(),
            email: "marie@example.ch".into(),
            billing_address: None,
            permit_type: Some("P".into()),
            permit_date: None,
            level: Some("B1".into()),
            native_language: None,
            other_languages: None,
            referral_source: None,
            comments: None,
            country_id: 1,
        }
    }

    #[test]
    fn valid_profile_passes() {
        assert!(profile().check(today()).is_ok());
    }

    #[test]
    fn phone_format() {
        assert!(is_valid_phone("(022) 700.11.22"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("079 abc 11 22"));
    }

    #[test]
    fn partial_address_is_rejected() {
        let mut p = profile();
        p.street = Some("Rue du Lac".into());
        p.npa = Some("1201".into());
        let err = p.check(today()).unwrap_err();
        assert!(err.field_errors.contains_key("address"));

        p.street_number = Some("12".into());
        p.locality = Some("Genève".into());
        assert!(p.check(today()).is_ok());
    }

    #[test]
    fn npa_must_be_four_digits() {
        let mut p = profile();
        p.street = Some("Rue du Lac".into());
        p.street_number = Some("12".into());
        p.npa = Some("12011".into());
        p.locality = Some("Genève".into());
        let err = p.check(today()).unwrap_err();
        assert_eq!(err.field_errors.get("npa").unwrap(), "NPA must be exactly 4 digits");
    }

    #[test]
    fn birth_date_in_future_is_rejected() {
        let mut p = profile();
        p.birth_date = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let err = p.check(today()).unwrap_err();
        assert!(err.field_errors.contains_key("birth_date"));
    }

    #[test]
    fn permit_date_required_unless_no_permit() {
        let mut p = profile();
        p.permit_type = Some("B".into());
        let err = p.check(today()).unwrap_err();
        assert!(err.field_errors.contains_key("permit_date"));

        p.permit_date = Some(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert!(p.check(today()).is_ok());

        p.permit_date = Some(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert!(p.check(today()).is_err());
    }

    #[test]
    fn list_page_decodes_backend_names() {
        let json = r#"{
            "eleves": [{
                "id": 3, "nom": "Dupont", "prenom": "Marie",
                "date_naissance": "1995-03-02", "telephone": "0791234567",
                "email": "m@example.ch", "pays__nom": "France"
            }],
            "nombre_total": 41
        }"#;
        let page: StudentPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.total, 41);
        assert_eq!(page.students[0].full_name(), "Dupont Marie");
        assert_eq!(page.students[0].country_name, "France");
    }

    #[test]
    fn detail_flattens_profile() {
        let detail = StudentDetail {
            id: 9,
            profile: profile(),
            country_name: "Suisse".into(),
        };
        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["nom"], "Dupont");
        assert_eq!(value["pays__nom"], "Suisse");
        let back: StudentDetail = serde_json::from_value(value).unwrap();
        assert_eq!(back, detail);
    }
}
