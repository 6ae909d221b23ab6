use chrono::NaiveDate;
use shared_types::{AppErrorKind, Invoice, PaymentRequest, PERSONAL_MODE};
use crate::common::{self, FakeSchool};

const INVOICE: i64 = 31;

fn school(remaining: f64) -> FakeSchool {
    let mut school = FakeSchool::default();
    school.invoices.insert(
        INVOICE,
        Invoice {
            id: INVOICE,
            issued_on: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            total: 600.0,
            remaining,
            student_last_name: "Muller".into(),
            student_first_name: "Anna".into(),
        },
    );
    school
}

fn payment(amount: f64, mode: &str, method: Option<&str>) -> PaymentRequest {
    PaymentRequest {
        amount,
        mode: mode.into(),
        method: method.map(str::to_string),
        invoice_id: INVOICE,
    }
}

#[tokio::test]
async fn test_personal_payment_is_recorded() {
    let (api, state) = common::fake_school(school(600.0)).await;
    api.record_payment(payment(250.0, PERSONAL_MODE, Some("TWI")))
        .await
        .unwrap();

    let state = state.lock().await;
    assert_eq!(state.payments.len(), 1);
    assert_eq!(state.payments[0]["methode_paiement"], "TWI");
    assert_eq!(state.invoices[&INVOICE].remaining, 350.0);
}

#[tokio::test]
async fn test_third_party_payment_drops_the_method() {
    let (api, state) = common::fake_school(school(600.0)).await;
    api.record_payment(payment(600.0, "BPA", Some("CAR")))
        .await
        .unwrap();

    let state = state.lock().await;
    assert!(state.payments[0]["methode_paiement"].is_null());
}

#[tokio::test]
async fn test_overpayment_never_reaches_the_backend() {
    let (api, state) = common::fake_school(school(100.0)).await;
    let err = api
        .record_payment(payment(100.01, PERSONAL_MODE, Some("ESP")))
        .await
        .unwrap_err();
    assert_eq!(err.kind, AppErrorKind::ValidationError);
    assert!(err.field_errors.contains_key("amount"));
    assert!(state.lock().await.payments.is_empty());
}

#[tokio::test]
async fn test_paid_invoice_conflicts() {
    let (api, _state) = common::fake_school(school(0.0)).await;
    let err = api
        .record_payment(payment(10.0, PERSONAL_MODE, Some("ESP")))
        .await
        .unwrap_err();
    assert_eq!(err.kind, AppErrorKind::Conflict);
}

#[tokio::test]
async fn test_unknown_invoice_is_not_found() {
    let (api, _state) = common::fake_school(FakeSchool::default()).await;
    let err = api
        .record_payment(payment(10.0, "CAF", None))
        .await
        .unwrap_err();
    assert_eq!(err.kind, AppErrorKind::NotFound);
}
