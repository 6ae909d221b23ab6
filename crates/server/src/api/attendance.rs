use dioxus::prelude::*;
use shared_types::{AttendanceSheet, AttendanceSheetSummary, CreateSheetRequest, RecordUpdate};

#[cfg(feature = "server")]
use super::auth::*;

// ── Attendance Sheet Server Functions ──────────────────

#[server]
pub async fn list_sheets(session_id: i64) -> Result<Vec<AttendanceSheetSummary>, ServerFnError> {
    let mut sheets = school()?.list_sheets(session_id).await.map_err(forward)?;
    sheets.sort_by_key(|s| (s.year, s.month));
    Ok(sheets)
}

#[server]
pub async fn get_sheet(sheet_id: i64) -> Result<AttendanceSheet, ServerFnError> {
    school()?.get_sheet(sheet_id).await.map_err(forward)
}

/// Create the sheet for one month of a session. Returns the new sheet id.
#[server]
pub async fn create_sheet(
    session_id: i64,
    body: CreateSheetRequest,
) -> Result<i64, ServerFnError> {
    school()?
        .create_sheet(session_id, &body)
        .await
        .map_err(forward)
}

#[server]
pub async fn delete_sheet(sheet_id: i64) -> Result<(), ServerFnError> {
    school()?.delete_sheet(sheet_id).await.map_err(forward)
}

/// Persist every record status of a sheet in one bulk update.
#[cfg_attr(feature = "server", tracing::instrument(skip(updates), fields(records = updates.len())))]
#[server]
pub async fn save_sheet(sheet_id: i64, updates: Vec<RecordUpdate>) -> Result<(), ServerFnError> {
    if updates.is_empty() {
        tracing::info!(sheet_id, "Nothing to save");
        return Ok(());
    }
    school()?
        .save_sheet(sheet_id, &updates)
        .await
        .map_err(forward)
}
