use dioxus::prelude::*;
use shared_types::{PaginatedResponse, PrivateLesson, PrivateLessonRequest};

#[cfg(feature = "server")]
use crate::error_convert::{AppErrorExt, ValidateRequest};

#[cfg(feature = "server")]
use super::auth::*;

#[server]
pub async fn list_private_lessons(
    page: Option<i64>,
    limit: Option<i64>,
) -> Result<PaginatedResponse<PrivateLesson>, ServerFnError> {
    use shared_types::normalize_pagination;

    let (page, limit) = normalize_pagination(page, limit);
    let result = school()?
        .list_private_lessons(Some(page), Some(limit))
        .await
        .map_err(forward)?;
    Ok(PaginatedResponse::new(result.lessons, page, limit, result.total))
}

#[server]
pub async fn create_private_lesson(body: PrivateLessonRequest) -> Result<i64, ServerFnError> {
    body.validate_request()
        .map_err(|e| e.into_server_fn_error())?;
    body.check().map_err(|e| e.into_server_fn_error())?;

    school()?.create_private_lesson(&body).await.map_err(forward)
}

#[server]
pub async fn get_private_lesson(id: i64) -> Result<PrivateLesson, ServerFnError> {
    school()?.get_private_lesson(id).await.map_err(forward)
}

#[server]
pub async fn list_student_private_lessons(
    student_id: i64,
) -> Result<Vec<PrivateLesson>, ServerFnError> {
    school()?
        .student_private_lessons(student_id)
        .await
        .map_err(forward)
}

#[server]
pub async fn update_private_lesson(
    id: i64,
    body: PrivateLessonRequest,
) -> Result<(), ServerFnError> {
    body.validate_request()
        .map_err(|e| e.into_server_fn_error())?;
    body.check().map_err(|e| e.into_server_fn_error())?;

    school()?
        .update_private_lesson(id, &body)
        .await
        .map_err(forward)
}

#[server]
pub async fn delete_private_lesson(id: i64) -> Result<(), ServerFnError> {
    school()?.delete_private_lesson(id).await.map_err(forward)
}
