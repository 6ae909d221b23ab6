use dioxus::prelude::*;
use shared_types::{
    Country, Enrollment, EnrollmentRequest, EnrollmentUpdate, PaginatedResponse, StudentDetail,
    StudentProfile, StudentQuery, StudentSummary,
};

#[cfg(feature = "server")]
use crate::error_convert::{AppErrorExt, ValidateRequest};

#[cfg(feature = "server")]
use super::auth::*;

// ── Student Server Functions ───────────────────────────

#[server]
pub async fn list_students(
    query: StudentQuery,
) -> Result<PaginatedResponse<StudentSummary>, ServerFnError> {
    use shared_types::normalize_pagination;

    let (page, limit) = normalize_pagination(query.page, query.limit);
    let result = school()?.list_students(&query).await.map_err(forward)?;
    Ok(PaginatedResponse::new(result.students, page, limit, result.total))
}

#[server]
pub async fn get_student(id: i64) -> Result<StudentDetail, ServerFnError> {
    school()?.get_student(id).await.map_err(forward)
}

#[cfg_attr(feature = "server", tracing::instrument(skip(profile)))]
#[server]
pub async fn create_student(profile: StudentProfile) -> Result<i64, ServerFnError> {
    profile
        .validate_request()
        .map_err(|e| e.into_server_fn_error())?;
    profile
        .check(chrono::Local::now().date_naive())
        .map_err(|e| e.into_server_fn_error())?;

    school()?.create_student(&profile).await.map_err(forward)
}

#[cfg_attr(feature = "server", tracing::instrument(skip(profile)))]
#[server]
pub async fn update_student(id: i64, profile: StudentProfile) -> Result<(), ServerFnError> {
    profile
        .validate_request()
        .map_err(|e| e.into_server_fn_error())?;
    profile
        .check(chrono::Local::now().date_naive())
        .map_err(|e| e.into_server_fn_error())?;

    school()?.update_student(id, &profile).await.map_err(forward)
}

#[server]
pub async fn delete_student(id: i64) -> Result<(), ServerFnError> {
    school()?.delete_student(id).await.map_err(forward)
}

#[server]
pub async fn list_countries() -> Result<Vec<Country>, ServerFnError> {
    school()?.list_countries().await.map_err(forward)
}

// ── Enrollments ────────────────────────────────────────

#[server]
pub async fn list_enrollments(student_id: i64) -> Result<Vec<Enrollment>, ServerFnError> {
    school()?
        .list_enrollments(student_id)
        .await
        .map_err(forward)
}

#[server]
pub async fn enroll_student(
    student_id: i64,
    body: EnrollmentRequest,
) -> Result<i64, ServerFnError> {
    body.validate_request()
        .map_err(|e| e.into_server_fn_error())?;
    body.check().map_err(|e| e.into_server_fn_error())?;

    school()?
        .create_enrollment(student_id, &body)
        .await
        .map_err(forward)
}

#[server]
pub async fn get_enrollment(student_id: i64, id: i64) -> Result<Enrollment, ServerFnError> {
    school()?
        .get_enrollment(student_id, id)
        .await
        .map_err(forward)
}

/// The leave date is checked against the enrollment date the backend holds.
#[server]
pub async fn update_enrollment(
    student_id: i64,
    id: i64,
    body: EnrollmentUpdate,
) -> Result<(), ServerFnError> {
    let api = school()?;
    let current = api.get_enrollment(student_id, id).await.map_err(forward)?;
    body.check(current.enrolled_on)
        .map_err(|e| e.into_server_fn_error())?;

    api.update_enrollment(student_id, id, &body)
        .await
        .map_err(forward)
}

#[server]
pub async fn delete_enrollment(student_id: i64, id: i64) -> Result<(), ServerFnError> {
    school()?
        .delete_enrollment(student_id, id)
        .await
        .map_err(forward)
}
