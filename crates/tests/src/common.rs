//! In-process fake of the school backend.
//!
//! Each test gets its own axum server on an ephemeral port and a real
//! `SchoolApi` pointed at it, so requests go through reqwest exactly as in
//! production. The fake keeps its data behind a tokio `Mutex` that tests can
//! inspect after the call.

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde_json::{json, Value};
use server::school_api::SchoolApi;
use shared_types::{
    dates_of_month, AttendanceRecord, AttendanceSheet, AttendanceSheetSummary, AttendanceStatus,
    CreateSheetRequest, Invoice, RecordUpdate, RosterStudent, SchoolApiConfig, StudentSummary,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

pub const PASSWORD: &str = "ecole-2024";
pub const TOKEN: &str = "tok-fake-123";

pub struct StoredSheet {
    pub session_id: i64,
    pub sheet: AttendanceSheet,
}

#[derive(Default)]
pub struct FakeSchool {
    pub rosters: HashMap<i64, Vec<RosterStudent>>,
    pub sheets: Vec<StoredSheet>,
    pub students: Vec<StudentSummary>,
    pub invoices: HashMap<i64, Invoice>,
    pub payments: Vec<Value>,
    /// Query string of every student list request, in arrival order.
    pub student_queries: Vec<HashMap<String, String>>,
    /// Authorization header of every request that carried one.
    pub bearer_tokens: Vec<String>,
    /// Bodies of accepted student updates, by student id.
    pub student_updates: Vec<(i64, Value)>,
    /// Bodies of accepted invoice creations.
    pub created_invoices: Vec<Value>,
    /// Sessions that refuse new enrollments.
    pub full_sessions: Vec<i64>,
    pub enrollment_updates: Vec<(i64, Value)>,
    pub deleted_sessions: Vec<i64>,
    pub(crate) next_id: i64,
}

impl FakeSchool {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        1000 + self.next_id
    }

    pub fn sheet(&self, id: i64) -> Option<&AttendanceSheet> {
        self.sheets.iter().map(|s| &s.sheet).find(|s| s.id == id)
    }
}

pub type Shared = Arc<Mutex<FakeSchool>>;

pub fn roster_student(id: i64, last: &str, first: &str) -> RosterStudent {
    RosterStudent {
        id,
        last_name: last.to_string(),
        first_name: first.to_string(),
    }
}

pub fn student_summary(id: i64, last: &str, first: &str) -> StudentSummary {
    StudentSummary {
        id,
        last_name: last.to_string(),
        first_name: first.to_string(),
        birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        phone: "+41 22 000 00 00".to_string(),
        email: format!("{}@example.ch", last.to_lowercase()),
        country_name: "Suisse".to_string(),
    }
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

fn record_token(state: &mut FakeSchool, headers: &HeaderMap) -> bool {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string);
    match token {
        Some(t) => {
            let ok = t == TOKEN;
            state.bearer_tokens.push(t);
            ok
        }
        None => false,
    }
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["mot_de_passe"] == PASSWORD {
        let cookie = format!("access_token={TOKEN}; Path=/; HttpOnly; SameSite=Lax");
        ([(header::SET_COOKIE, cookie)], Json(json!({ "message": "Connecté" }))).into_response()
    } else {
        detail(StatusCode::UNAUTHORIZED, "Mot de passe incorrect")
    }
}

async fn is_authenticated(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let mut state = state.lock().await;
    if record_token(&mut state, &headers) {
        Json(json!({ "authentifie": true })).into_response()
    } else {
        detail(StatusCode::FORBIDDEN, "Not authenticated")
    }
}

async fn roster(State(state): State<Shared>, Path(session_id): Path<i64>) -> Response {
    let state = state.lock().await;
    Json(state.rosters.get(&session_id).cloned().unwrap_or_default()).into_response()
}

async fn list_sheets(State(state): State<Shared>, Path(session_id): Path<i64>) -> Response {
    let state = state.lock().await;
    let sheets: Vec<AttendanceSheetSummary> = state
        .sheets
        .iter()
        .filter(|s| s.session_id == session_id)
        .map(|s| AttendanceSheetSummary {
            id: s.sheet.id,
            month: s.sheet.month,
            year: s.sheet.year,
        })
        .collect();
    Json(sheets).into_response()
}

/// Mirrors the backend: one ABSENT record per enrolled student and day, and
/// a 200 with an error body when the month already has a sheet.
async fn create_sheet(
    State(state): State<Shared>,
    Path(session_id): Path<i64>,
    Json(req): Json<CreateSheetRequest>,
) -> Response {
    let mut state = state.lock().await;
    let duplicate = state
        .sheets
        .iter()
        .any(|s| s.session_id == session_id && s.sheet.month == req.month && s.sheet.year == req.year);
    if duplicate {
        return Json(json!({
            "message": "Erreur lors de la création de la fiche de présence",
            "detail": "UNIQUE constraint failed"
        }))
        .into_response();
    }

    let sheet_id = state.next_id();
    let roster = state.rosters.get(&session_id).cloned().unwrap_or_default();
    let mut records = Vec::new();
    for student in &roster {
        for date in dates_of_month(req.year, req.month) {
            let id = state.next_id();
            records.push(AttendanceRecord {
                id,
                student_id: student.id,
                date: date.format("%Y-%m-%d").to_string(),
                status: AttendanceStatus::Absent,
            });
        }
    }
    state.sheets.push(StoredSheet {
        session_id,
        sheet: AttendanceSheet {
            id: sheet_id,
            month: req.month,
            year: req.year,
            records,
        },
    });
    Json(json!({ "id": sheet_id })).into_response()
}

async fn get_sheet(State(state): State<Shared>, Path(sheet_id): Path<i64>) -> Response {
    let state = state.lock().await;
    match state.sheet(sheet_id) {
        Some(sheet) => Json(sheet.clone()).into_response(),
        None => detail(StatusCode::NOT_FOUND, "Not Found"),
    }
}

/// All-or-nothing bulk update.
async fn save_sheet(
    State(state): State<Shared>,
    Path(sheet_id): Path<i64>,
    Json(updates): Json<Vec<RecordUpdate>>,
) -> Response {
    let mut state = state.lock().await;
    let Some(stored) = state.sheets.iter_mut().find(|s| s.sheet.id == sheet_id) else {
        return detail(StatusCode::NOT_FOUND, "Not Found");
    };
    let records = &mut stored.sheet.records;
    if let Some(foreign) = updates.iter().find(|u| !records.iter().any(|r| r.id == u.id)) {
        return detail(
            StatusCode::NOT_FOUND,
            &format!("Présence {} introuvable", foreign.id),
        );
    }
    for update in &updates {
        if let Some(record) = records.iter_mut().find(|r| r.id == update.id) {
            record.status = update.status;
        }
    }
    Json(json!({ "message": "Présences mises à jour" })).into_response()
}

async fn delete_sheet(State(state): State<Shared>, Path(sheet_id): Path<i64>) -> Response {
    let mut state = state.lock().await;
    let before = state.sheets.len();
    state.sheets.retain(|s| s.sheet.id != sheet_id);
    if state.sheets.len() == before {
        detail(StatusCode::NOT_FOUND, "Not Found")
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}

async fn list_students(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let mut state = state.lock().await;
    record_token(&mut state, &headers);
    let needle = params.get("recherche").map(|s| s.to_lowercase());
    let matching: Vec<StudentSummary> = state
        .students
        .iter()
        .filter(|s| match &needle {
            Some(n) => s.full_name().to_lowercase().contains(n),
            None => true,
        })
        .cloned()
        .collect();
    state.student_queries.push(params);
    Json(json!({ "eleves": matching, "nombre_total": matching.len() })).into_response()
}

async fn get_student(Path(id): Path<i64>) -> Response {
    Json(json!({ "Erreur": format!("Élève {id} introuvable") })).into_response()
}

/// Answers like the backend: 200 with `erreurs` when a model rule fails.
async fn update_student(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().await;
    if body["nom"].as_str().map_or(true, |n| n.trim().is_empty()) {
        return Json(json!({
            "message": "Erreurs de validation.",
            "erreurs": { "nom": ["Ce champ ne peut pas être vide."] }
        }))
        .into_response();
    }
    state.student_updates.push((id, body));
    Json(json!({ "id": id })).into_response()
}

async fn update_enrollment(
    State(state): State<Shared>,
    Path((_student_id, id)): Path<(i64, i64)>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().await;
    let session = body["id_session"].as_i64().unwrap_or_default();
    if state.full_sessions.contains(&session) {
        return Json(json!({ "detail": "Capacité maximale atteinte pour la nouvelle session" }))
            .into_response();
    }
    state.enrollment_updates.push((id, body));
    Json(json!({ "id": id })).into_response()
}

async fn delete_session(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    state.lock().await.deleted_sessions.push(id);
    StatusCode::NO_CONTENT.into_response()
}

/// Creates the invoice header with the sum of its lines as total.
async fn create_invoice(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().await;
    let total: f64 = body["details_facture"]
        .as_array()
        .map(|lines| lines.iter().filter_map(|l| l["montant"].as_f64()).sum())
        .unwrap_or_default();
    let id = state.next_id();
    state.invoices.insert(
        id,
        Invoice {
            id,
            issued_on: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            total,
            remaining: total,
            student_last_name: "Muller".into(),
            student_first_name: "Anna".into(),
        },
    );
    state.created_invoices.push(body);
    Json(json!({ "id": id })).into_response()
}

async fn delete_invoice(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let mut state = state.lock().await;
    match state.invoices.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => detail(StatusCode::NOT_FOUND, "Facture introuvable"),
    }
}

async fn get_invoice(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let state = state.lock().await;
    match state.invoices.get(&id) {
        Some(invoice) => Json(invoice.clone()).into_response(),
        None => detail(StatusCode::NOT_FOUND, "Facture introuvable"),
    }
}

async fn record_payment(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().await;
    let invoice_id = body["id_facture"].as_i64().unwrap_or_default();
    let amount = body["montant"].as_f64().unwrap_or_default();
    let Some(invoice) = state.invoices.get_mut(&invoice_id) else {
        return detail(StatusCode::NOT_FOUND, "Facture introuvable");
    };
    invoice.remaining -= amount;
    state.payments.push(body);
    let id = state.next_id();
    Json(json!({ "id": id })).into_response()
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/auth/login/", post(login))
        .route("/auth/est_authentifie/", get(is_authenticated))
        .route("/cours/session/{id}/eleves/", get(roster))
        .route("/cours/session/{id}/fiches_presences/", get(list_sheets))
        .route("/cours/session/{id}/fiche_presences/", post(create_sheet))
        .route(
            "/cours/fiche_presences/{id}/",
            get(get_sheet).put(save_sheet).delete(delete_sheet),
        )
        .route("/eleves/eleves/", get(list_students))
        .route("/eleves/eleve/{id}/", get(get_student))
        .route("/eleves/eleves/{id}/", put(update_student))
        .route("/cours/{student_id}/inscriptions/{id}/", put(update_enrollment))
        .route("/cours/sessions/{id}/", delete(delete_session))
        .route("/factures/facture/", post(create_invoice))
        .route("/factures/facture/{id}/", get(get_invoice).delete(delete_invoice))
        .route("/factures/paiement/", post(record_payment))
        .with_state(state)
}

/// Start a fake backend seeded with `school` and return a client for it.
pub async fn fake_school(school: FakeSchool) -> (SchoolApi, Shared) {
    let state: Shared = Arc::new(Mutex::new(school));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let api = SchoolApi::new(&SchoolApiConfig {
        base_url: format!("http://{addr}/"),
        timeout_secs: 5,
    });
    (api, state)
}

/// A session with two enrolled students and no sheets.
pub fn school_with_roster(session_id: i64) -> FakeSchool {
    let mut school = FakeSchool::default();
    school.rosters.insert(
        session_id,
        vec![
            roster_student(1, "Muller", "Anna"),
            roster_student(2, "Rossi", "Luca"),
        ],
    );
    school
}
