use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use shared_types::{AppErrorKind, EnrollmentUpdate, StudentProfile, StudentQuery};
use crate::common::{self, FakeSchool, TOKEN};

fn school() -> FakeSchool {
    FakeSchool {
        students: vec![
            common::student_summary(1, "Muller", "Anna"),
            common::student_summary(2, "Rossi", "Luca"),
            common::student_summary(3, "Mulhouse", "Jean"),
        ],
        ..FakeSchool::default()
    }
}

#[tokio::test]
async fn test_search_is_trimmed_and_all_status_dropped() {
    let (api, state) = common::fake_school(school()).await;
    let page = api
        .with_token(TOKEN)
        .list_students(&StudentQuery {
            page: None,
            limit: None,
            search: Some("  mul ".into()),
            status: Some("tous".into()),
        })
        .await
        .unwrap();
    assert_eq!(page.total, 2);

    let state = state.lock().await;
    let query = &state.student_queries[0];
    assert_eq!(query.get("recherche").map(String::as_str), Some("mul"));
    assert_eq!(query.get("page").map(String::as_str), Some("1"));
    assert_eq!(query.get("taille").map(String::as_str), Some("10"));
    assert!(!query.contains_key("statut"));
    assert_eq!(state.bearer_tokens, vec![TOKEN.to_string()]);
}

#[tokio::test]
async fn test_status_filter_is_forwarded() {
    let (api, state) = common::fake_school(school()).await;
    api.list_students(&StudentQuery {
        status: Some("A".into()),
        ..StudentQuery::default()
    })
    .await
    .unwrap();
    let state = state.lock().await;
    assert_eq!(state.student_queries[0].get("statut").map(String::as_str), Some("A"));
}

#[tokio::test]
async fn test_unknown_student_maps_to_not_found() {
    let (api, _state) = common::fake_school(school()).await;
    let err = api.get_student(77).await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::NotFound);
    assert!(err.message.contains("77"));
}

fn profile(last_name: &str) -> StudentProfile {
    StudentProfile {
        last_name: last_name.into(),
        first_name: "Anna".into(),
        birth_date: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
        birth_place: "Bern".into(),
        sex: "F".into(),
        street: Some("Rue du Lac".into()),
        street_number: Some("12".into()),
        npa: Some("1200".into()),
        locality: Some("Genève".into()),
        phone: "+41 79 123 45 67".into(),
        email: "anna@example.ch".into(),
        billing_address: None,
        permit_type: Some("B".into()),
        permit_date: NaiveDate::from_ymd_opt(2026, 1, 31),
        level: Some("B1".into()),
        native_language: None,
        other_languages: None,
        referral_source: None,
        comments: None,
        country_id: 12,
    }
}

#[tokio::test]
async fn test_student_update_sends_the_wire_profile() {
    let (api, state) = common::fake_school(school()).await;
    api.with_token(TOKEN)
        .update_student(2, &profile("Rossi-Bianchi"))
        .await
        .unwrap();

    let state = state.lock().await;
    let (id, body) = &state.student_updates[0];
    assert_eq!(*id, 2);
    assert_eq!(body["nom"], "Rossi-Bianchi");
    assert_eq!(body["date_naissance"], "1990-05-17");
    assert_eq!(body["pays_id"], 12);
    assert_eq!(state.bearer_tokens, vec![TOKEN.to_string()]);
}

#[tokio::test]
async fn test_refused_update_keeps_field_errors() {
    let (api, state) = common::fake_school(school()).await;
    let err = api.update_student(2, &profile("  ")).await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::ValidationError);
    assert!(err.field_errors.contains_key("nom"));
    assert!(state.lock().await.student_updates.is_empty());
}

fn enrollment_update(session_id: i64) -> EnrollmentUpdate {
    EnrollmentUpdate {
        fee: 50.0,
        goal: None,
        status: "I".into(),
        left_on: NaiveDate::from_ymd_opt(2024, 12, 20),
        leave_reason: Some("Moved away".into()),
        pre_enrollment: false,
        session_id,
    }
}

#[tokio::test]
async fn test_enrollment_update_is_forwarded() {
    let (api, state) = common::fake_school(school()).await;
    api.update_enrollment(1, 11, &enrollment_update(4))
        .await
        .unwrap();

    let state = state.lock().await;
    let (id, body) = &state.enrollment_updates[0];
    assert_eq!(*id, 11);
    assert_eq!(body["statut"], "I");
    assert_eq!(body["date_sortie"], "2024-12-20");
    assert_eq!(body["motif_sortie"], "Moved away");
}

#[tokio::test]
async fn test_moving_to_a_full_session_is_a_conflict() {
    let (api, state) = common::fake_school(FakeSchool {
        full_sessions: vec![9],
        ..school()
    })
    .await;
    let err = api
        .update_enrollment(1, 11, &enrollment_update(9))
        .await
        .unwrap_err();
    assert_eq!(err.kind, AppErrorKind::Conflict);
    assert!(err.message.contains("Capacité maximale"));
    assert!(state.lock().await.enrollment_updates.is_empty());
}

#[tokio::test]
async fn test_session_delete_reaches_the_backend() {
    let (api, state) = common::fake_school(school()).await;
    api.delete_session(5).await.unwrap();
    assert_eq!(state.lock().await.deleted_sessions, vec![5]);
}
