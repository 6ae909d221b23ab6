use shared_types::{
    AppError, AttendanceSheet, AttendanceSheetSummary, CreateSheetRequest, RecordUpdate,
};

use super::SchoolApi;

impl SchoolApi {
    #[tracing::instrument(skip(self))]
    pub async fn list_sheets(&self, session_id: i64) -> Result<Vec<AttendanceSheetSummary>, AppError> {
        self.get(&format!("/cours/session/{session_id}/fiches_presences/"))
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_sheet(&self, sheet_id: i64) -> Result<AttendanceSheet, AppError> {
        self.get(&format!("/cours/fiche_presences/{sheet_id}/"))
            .await
    }

    /// Create a sheet. The backend fills it with an ABSENT record for every
    /// enrolled student and every day of the month.
    ///
    /// A session holds at most one sheet per month; asking for a second one
    /// is a `Conflict`.
    #[tracing::instrument(skip(self))]
    pub async fn create_sheet(
        &self,
        session_id: i64,
        req: &CreateSheetRequest,
    ) -> Result<i64, AppError> {
        req.check()?;
        let existing = self.list_sheets(session_id).await?;
        if let Some(sheet) = existing
            .iter()
            .find(|s| s.month == req.month && s.year == req.year)
        {
            tracing::info!(session_id, sheet_id = sheet.id, "Sheet already exists for this month");
            return Err(AppError::conflict(format!(
                "A sheet already exists for {}",
                sheet.label()
            )));
        }

        let id = self
            .create(&format!("/cours/session/{session_id}/fiche_presences/"), req)
            .await?;
        tracing::info!(session_id, sheet_id = id, month = req.month.number(), year = req.year, "Attendance sheet created");
        Ok(id)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_sheet(&self, sheet_id: i64) -> Result<(), AppError> {
        self.delete(&format!("/cours/fiche_presences/{sheet_id}/"))
            .await?;
        tracing::info!(sheet_id, "Attendance sheet deleted");
        Ok(())
    }

    /// Bulk update of record statuses. An id that does not belong to the
    /// sheet makes the backend reject the whole batch with 404.
    #[tracing::instrument(skip(self, updates), fields(records = updates.len()))]
    pub async fn save_sheet(&self, sheet_id: i64, updates: &[RecordUpdate]) -> Result<(), AppError> {
        self.put_json(&format!("/cours/fiche_presences/{sheet_id}/"), updates)
            .await?;
        tracing::info!(sheet_id, records = updates.len(), "Attendance saved");
        Ok(())
    }
}
