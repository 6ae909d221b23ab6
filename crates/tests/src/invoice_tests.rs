use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use shared_types::{AppErrorKind, InvoiceBasis, InvoiceLineRequest, InvoiceRequest};
use crate::common::{self, FakeSchool};

fn line(description: &str, amount: f64) -> InvoiceLineRequest {
    InvoiceLineRequest {
        description: description.into(),
        period_start: None,
        period_end: None,
        amount,
    }
}

#[tokio::test]
async fn test_enrollment_invoice_is_created_with_its_lines() {
    let (api, state) = common::fake_school(FakeSchool::default()).await;
    let mut term = line("Autumn term", 600.0);
    term.period_start = NaiveDate::from_ymd_opt(2024, 9, 2);
    term.period_end = NaiveDate::from_ymd_opt(2024, 12, 20);
    let req = InvoiceRequest::new(
        InvoiceBasis::Enrollment(3),
        vec![line("Enrollment fee", 50.0), term],
    );

    let id = api.create_invoice(&req).await.unwrap();

    let state = state.lock().await;
    let body = &state.created_invoices[0];
    assert_eq!(body["id_inscription"], 3);
    assert!(body.get("id_cours_prive").is_none());
    assert_eq!(body["details_facture"][1]["date_debut_periode"], "2024-09-02");
    assert_eq!(state.invoices[&id].total, 650.0);
}

#[tokio::test]
async fn test_invalid_lines_never_reach_the_backend() {
    let (api, state) = common::fake_school(FakeSchool::default()).await;
    let req = InvoiceRequest::new(
        InvoiceBasis::PrivateLesson { lesson_id: 4, student_id: 7 },
        vec![line("", -5.0)],
    );

    let err = api.create_invoice(&req).await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::ValidationError);
    assert!(err.field_errors.contains_key("lines.0.amount"));
    assert!(state.lock().await.created_invoices.is_empty());
}

#[tokio::test]
async fn test_deleted_invoice_is_gone() {
    let (api, state) = common::fake_school(FakeSchool::default()).await;
    let id = api
        .create_invoice(&InvoiceRequest::new(
            InvoiceBasis::Enrollment(3),
            vec![line("Enrollment fee", 50.0)],
        ))
        .await
        .unwrap();

    api.delete_invoice(id).await.unwrap();
    assert!(state.lock().await.invoices.is_empty());

    let err = api.delete_invoice(id).await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::NotFound);
}
