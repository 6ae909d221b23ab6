use shared_types::{
    non_empty, normalize_pagination, AppError, Country, StudentDetail, StudentPage, StudentProfile,
    StudentQuery,
};

use super::SchoolApi;

/// Query string for `GET /eleves/eleves/`. "tous" and blank filters are left out.
pub fn student_list_params(query: &StudentQuery) -> Vec<(&'static str, String)> {
    let (page, limit) = normalize_pagination(query.page, query.limit);
    let mut params = vec![("page", page.to_string()), ("taille", limit.to_string())];
    if let Some(search) = non_empty(query.search.clone()) {
        params.push(("recherche", search));
    }
    if let Some(status) = non_empty(query.status.clone()).filter(|s| s != "tous") {
        params.push(("statut", status));
    }
    params
}

impl SchoolApi {
    #[tracing::instrument(skip(self))]
    pub async fn list_students(&self, query: &StudentQuery) -> Result<StudentPage, AppError> {
        self.get_json("/eleves/eleves/", &student_list_params(query))
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_student(&self, id: i64) -> Result<StudentDetail, AppError> {
        let value: serde_json::Value = self.get(&format!("/eleves/eleve/{id}/")).await?;
        // A missing student comes back as 200 {"Erreur": ".."}.
        if let Some(message) = value.get("Erreur").and_then(|v| v.as_str()) {
            return Err(AppError::not_found(message));
        }
        serde_json::from_value(value).map_err(|e| {
            tracing::error!(student_id = id, error = %e, "Undecodable student record");
            AppError::upstream(format!("Unexpected student record: {e}"))
        })
    }

    #[tracing::instrument(skip(self, profile))]
    pub async fn create_student(&self, profile: &StudentProfile) -> Result<i64, AppError> {
        let id = self.create("/eleves/eleve/", profile).await?;
        tracing::info!(student_id = id, "Student created");
        Ok(id)
    }

    #[tracing::instrument(skip(self, profile))]
    pub async fn update_student(&self, id: i64, profile: &StudentProfile) -> Result<(), AppError> {
        self.update(&format!("/eleves/eleves/{id}/"), profile).await?;
        tracing::info!(student_id = id, "Student updated");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_student(&self, id: i64) -> Result<(), AppError> {
        self.delete(&format!("/eleves/eleves/{id}/")).await?;
        tracing::info!(student_id = id, "Student deleted");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_countries(&self) -> Result<Vec<Country>, AppError> {
        self.get("/eleves/pays/").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_status_and_blank_search_are_omitted() {
        let params = student_list_params(&StudentQuery {
            page: Some(2),
            limit: None,
            search: Some("  ".into()),
            status: Some("tous".into()),
        });
        assert_eq!(params, vec![("page", "2".to_string()), ("taille", "10".to_string())]);
    }

    #[test]
    fn search_and_status_are_forwarded() {
        let params = student_list_params(&StudentQuery {
            page: None,
            limit: Some(25),
            search: Some(" Dupont ".into()),
            status: Some("A".into()),
        });
        assert!(params.contains(&("recherche", "Dupont".to_string())));
        assert!(params.contains(&("statut", "A".to_string())));
        assert!(params.contains(&("taille", "25".to_string())));
    }
}
