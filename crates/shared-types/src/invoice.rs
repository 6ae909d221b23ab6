use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

use crate::AppError;

/// Who pays: the student personally, or a third-party funder.
pub const PAYMENT_MODES: &[(&str, &str)] = &[
    ("PER", "Personal"),
    ("BPA", "Training voucher"),
    ("CAF", "Training cheque"),
    ("HOS", "Hospice général"),
    ("AUT", "Other"),
];

/// How a personal payment was made.
pub const PAYMENT_METHODS: &[(&str, &str)] = &[
    ("ESP", "Cash"),
    ("CAR", "Card"),
    ("VIR", "Bank transfer"),
    ("TWI", "Twint"),
    ("TEL", "Phone"),
    ("PAY", "PayPal"),
    ("AUT", "Other"),
];

/// The only payment mode that records a method.
pub const PERSONAL_MODE: &str = "PER";

pub fn is_valid_payment_mode(s: &str) -> bool {
    PAYMENT_MODES.iter().any(|(code, _)| *code == s)
}

pub fn is_valid_payment_method(s: &str) -> bool {
    PAYMENT_METHODS.iter().any(|(code, _)| *code == s)
}

/// Amount in whole cents, for exact comparisons of CHF values.
pub fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

pub fn format_chf(amount: f64) -> String {
    let cents = to_cents(amount);
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();
    format!("CHF {sign}{}.{:02}", cents / 100, cents % 100)
}

/// Which slice of invoices the list shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceFilter {
    #[default]
    All,
    Unpaid,
    Paid,
}

impl InvoiceFilter {
    pub const ALL: [InvoiceFilter; 3] = [InvoiceFilter::All, InvoiceFilter::Unpaid, InvoiceFilter::Paid];

    /// Backend path for this slice.
    pub fn path(self) -> &'static str {
        match self {
            InvoiceFilter::All => "/factures/factures/",
            InvoiceFilter::Unpaid => "/factures/factures/impayees/",
            InvoiceFilter::Paid => "/factures/factures/payees/",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            InvoiceFilter::All => "all",
            InvoiceFilter::Unpaid => "unpaid",
            InvoiceFilter::Paid => "paid",
        }
    }

    pub fn from_key(s: &str) -> Self {
        match s {
            "unpaid" => InvoiceFilter::Unpaid,
            "paid" => InvoiceFilter::Paid,
            _ => InvoiceFilter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            InvoiceFilter::All => "All",
            InvoiceFilter::Unpaid => "Unpaid",
            InvoiceFilter::Paid => "Paid",
        }
    }
}

/// Row of the invoice list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceSummary {
    pub id: i64,
    #[serde(rename = "date_emission")]
    pub issued_on: NaiveDate,
    #[serde(rename = "montant_total")]
    pub total: f64,
    #[serde(rename = "montant_restant")]
    pub remaining: f64,
}

impl InvoiceSummary {
    pub fn is_paid(&self) -> bool {
        to_cents(self.remaining) <= 0
    }
}

/// Raw page as returned by the invoice list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoicePage {
    #[serde(rename = "factures")]
    pub invoices: Vec<InvoiceSummary>,
    #[serde(rename = "nombre_total")]
    pub total: i64,
}

/// Invoice header from `GET /factures/facture/{id}/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: i64,
    #[serde(rename = "date_emission")]
    pub issued_on: NaiveDate,
    #[serde(rename = "montant_total")]
    pub total: f64,
    #[serde(rename = "montant_restant")]
    pub remaining: f64,
    #[serde(rename = "eleve_nom")]
    pub student_last_name: String,
    #[serde(rename = "eleve_prenom")]
    pub student_first_name: String,
}

impl Invoice {
    pub fn is_paid(&self) -> bool {
        to_cents(self.remaining) <= 0
    }

    pub fn amount_paid(&self) -> f64 {
        (to_cents(self.total) - to_cents(self.remaining)) as f64 / 100.0
    }
}

/// One billed line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub id: i64,
    pub description: String,
    #[serde(rename = "date_debut_periode", default)]
    pub period_start: Option<NaiveDate>,
    #[serde(rename = "date_fin_periode", default)]
    pub period_end: Option<NaiveDate>,
    #[serde(rename = "montant")]
    pub amount: f64,
}

/// Invoice header plus its lines, as the detail page shows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDetail {
    pub invoice: Invoice,
    pub lines: Vec<InvoiceLine>,
}

/// Request DTO for recording a payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct PaymentRequest {
    #[serde(rename = "montant")]
    #[cfg_attr(
        feature = "validation",
        validate(range(min = 0.01, message = "Amount must be positive"))
    )]
    pub amount: f64,
    #[serde(rename = "mode_paiement")]
    pub mode: String,
    #[serde(rename = "methode_paiement", default)]
    pub method: Option<String>,
    #[serde(rename = "id_facture")]
    pub invoice_id: i64,
}

impl PaymentRequest {
    /// Check the payment against the invoice's remaining balance.
    ///
    /// Returns the request as it must be sent: the method is dropped for
    /// every mode except personal payments.
    pub fn checked(mut self, remaining: f64) -> Result<Self, AppError> {
        let remaining_cents = to_cents(remaining);
        if remaining_cents <= 0 {
            return Err(AppError::conflict("This invoice is already fully paid"));
        }
        let amount_cents = to_cents(self.amount);
        if !self.amount.is_finite() || amount_cents <= 0 {
            return Err(AppError::field("amount", "Amount must be positive"));
        }
        if amount_cents > remaining_cents {
            return Err(AppError::field(
                "amount",
                format!(
                    "Amount cannot exceed the remaining {}",
                    format_chf(remaining)
                ),
            ));
        }
        if !is_valid_payment_mode(&self.mode) {
            return Err(AppError::field("mode", "Select a payment mode"));
        }

        if self.mode == PERSONAL_MODE {
            match self.method.as_deref() {
                Some(m) if is_valid_payment_method(m) => {}
                Some(_) => {
                    return Err(AppError::field("method", "Unknown payment method"))
                }
                None => {
                    return Err(AppError::field(
                        "method",
                        "A payment method is required for personal payments",
                    ))
                }
            }
        } else {
            self.method = None;
        }
        Ok(self)
    }
}

/// What a new invoice bills: one enrollment, or one private lesson for a
/// given student.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceBasis {
    Enrollment(i64),
    PrivateLesson { lesson_id: i64, student_id: i64 },
}

/// One line of a new invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLineRequest {
    pub description: String,
    #[serde(rename = "date_debut_periode", default)]
    pub period_start: Option<NaiveDate>,
    #[serde(rename = "date_fin_periode", default)]
    pub period_end: Option<NaiveDate>,
    #[serde(rename = "montant")]
    pub amount: f64,
}

pub const MAX_LINE_DESCRIPTION: usize = 100;

/// Request DTO for `POST /factures/facture/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRequest {
    #[serde(rename = "id_inscription", default, skip_serializing_if = "Option::is_none")]
    pub enrollment_id: Option<i64>,
    #[serde(rename = "id_cours_prive", default, skip_serializing_if = "Option::is_none")]
    pub private_lesson_id: Option<i64>,
    #[serde(rename = "id_eleve", default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<i64>,
    #[serde(rename = "details_facture")]
    pub lines: Vec<InvoiceLineRequest>,
}

impl InvoiceRequest {
    pub fn new(basis: InvoiceBasis, lines: Vec<InvoiceLineRequest>) -> Self {
        match basis {
            InvoiceBasis::Enrollment(id) => Self {
                enrollment_id: Some(id),
                private_lesson_id: None,
                student_id: None,
                lines,
            },
            InvoiceBasis::PrivateLesson { lesson_id, student_id } => Self {
                enrollment_id: None,
                private_lesson_id: Some(lesson_id),
                student_id: Some(student_id),
                lines,
            },
        }
    }

    pub fn total(&self) -> f64 {
        self.lines.iter().map(|l| to_cents(l.amount)).sum::<i64>() as f64 / 100.0
    }

    /// Line errors are keyed `lines.<index>.<field>`.
    pub fn check(&self) -> Result<(), AppError> {
        let mut errors = HashMap::new();
        match (self.enrollment_id, self.private_lesson_id) {
            (Some(_), None) => {}
            (None, Some(_)) if self.student_id.is_some() => {}
            _ => {
                errors.insert(
                    "basis".to_string(),
                    "Select the enrollment or private lesson to bill".to_string(),
                );
            }
        }
        if self.lines.is_empty() {
            errors.insert("lines".to_string(), "Add at least one line".to_string());
        }
        for (i, line) in self.lines.iter().enumerate() {
            let description = line.description.trim();
            if description.is_empty() {
                errors.insert(format!("lines.{i}.description"), "Description is required".to_string());
            } else if description.chars().count() > MAX_LINE_DESCRIPTION {
                errors.insert(
                    format!("lines.{i}.description"),
                    format!("At most {MAX_LINE_DESCRIPTION} characters"),
                );
            }
            if !line.amount.is_finite() || to_cents(line.amount) <= 0 {
                errors.insert(format!("lines.{i}.amount"), "Amount must be positive".to_string());
            }
            if let (Some(start), Some(end)) = (line.period_start, line.period_end) {
                if end < start {
                    errors.insert(
                        format!("lines.{i}.period_end"),
                        "Period end cannot precede its start".to_string(),
                    );
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::validation("Validation failed", errors))
        }
    }
}
