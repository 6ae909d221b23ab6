use shared_types::{
    non_empty, normalize_pagination, AppError, RosterStudent, Session, SessionPage, SessionQuery,
    SessionRequest,
};

use super::SchoolApi;

/// Query string for `GET /cours/sessions/`.
pub fn session_list_params(query: &SessionQuery) -> Vec<(&'static str, String)> {
    let (page, limit) = normalize_pagination(query.page, query.limit);
    let mut params = vec![("page", page.to_string()), ("taille", limit.to_string())];
    let filters = [
        ("type", &query.course_type),
        ("niveau", &query.level),
        ("statut", &query.status),
    ];
    for (key, value) in filters {
        if let Some(v) = non_empty(value.clone()).filter(|v| v != "tous") {
            params.push((key, v));
        }
    }
    params
}

impl SchoolApi {
    #[tracing::instrument(skip(self))]
    pub async fn list_sessions(&self, query: &SessionQuery) -> Result<SessionPage, AppError> {
        self.get_json("/cours/sessions/", &session_list_params(query))
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_session(&self, id: i64) -> Result<Session, AppError> {
        self.get(&format!("/cours/sessions/{id}/")).await
    }

    #[tracing::instrument(skip(self, req))]
    pub async fn create_session(&self, req: &SessionRequest) -> Result<i64, AppError> {
        let id = self.create("/cours/session/", req).await?;
        tracing::info!(session_id = id, "Session created");
        Ok(id)
    }

    #[tracing::instrument(skip(self, req))]
    pub async fn update_session(&self, id: i64, req: &SessionRequest) -> Result<(), AppError> {
        self.update(&format!("/cours/sessions/{id}/"), req).await?;
        tracing::info!(session_id = id, "Session updated");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_session(&self, id: i64) -> Result<(), AppError> {
        self.delete(&format!("/cours/sessions/{id}/")).await?;
        tracing::info!(session_id = id, "Session deleted");
        Ok(())
    }

    /// Students enrolled in the session.
    #[tracing::instrument(skip(self))]
    pub async fn session_roster(&self, session_id: i64) -> Result<Vec<RosterStudent>, AppError> {
        self.get(&format!("/cours/session/{session_id}/eleves/"))
            .await
    }
}
