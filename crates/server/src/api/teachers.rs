use dioxus::prelude::*;
use shared_types::{Course, CourseRequest, Teacher, TeacherRequest};

#[cfg(feature = "server")]
use crate::error_convert::{AppErrorExt, ValidateRequest};

#[cfg(feature = "server")]
use super::auth::*;

// ── Teachers ───────────────────────────────────────────

#[server]
pub async fn list_teachers(search: Option<String>) -> Result<Vec<Teacher>, ServerFnError> {
    school()?.list_teachers(search).await.map_err(forward)
}

#[server]
pub async fn create_teacher(body: TeacherRequest) -> Result<i64, ServerFnError> {
    let body = TeacherRequest {
        last_name: body.last_name.trim().to_string(),
        first_name: body.first_name.trim().to_string(),
    };
    body.validate_request()
        .map_err(|e| e.into_server_fn_error())?;

    school()?.create_teacher(&body).await.map_err(forward)
}

#[server]
pub async fn delete_teacher(id: i64) -> Result<(), ServerFnError> {
    school()?.delete_teacher(id).await.map_err(forward)
}

// ── Courses ────────────────────────────────────────────

#[server]
pub async fn list_courses() -> Result<Vec<Course>, ServerFnError> {
    school()?.list_courses().await.map_err(forward)
}

#[server]
pub async fn create_course(body: CourseRequest) -> Result<i64, ServerFnError> {
    body.validate_request()
        .map_err(|e| e.into_server_fn_error())?;
    body.check().map_err(|e| e.into_server_fn_error())?;

    school()?.create_course(&body).await.map_err(forward)
}

#[server]
pub async fn get_course(id: i64) -> Result<Course, ServerFnError> {
    school()?.get_course(id).await.map_err(forward)
}

#[server]
pub async fn update_course(id: i64, body: CourseRequest) -> Result<(), ServerFnError> {
    body.validate_request()
        .map_err(|e| e.into_server_fn_error())?;
    body.check().map_err(|e| e.into_server_fn_error())?;

    school()?.update_course(id, &body).await.map_err(forward)
}

#[server]
pub async fn delete_course(id: i64) -> Result<(), ServerFnError> {
    school()?.delete_course(id).await.map_err(forward)
}
