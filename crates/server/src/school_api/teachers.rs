use shared_types::{non_empty, AppError, Teacher, TeacherRequest};

use super::SchoolApi;

impl SchoolApi {
    #[tracing::instrument(skip(self))]
    pub async fn list_teachers(&self, search: Option<String>) -> Result<Vec<Teacher>, AppError> {
        match non_empty(search) {
            Some(term) => self.get_json("/cours/enseignants/", &[("search", term)]).await,
            None => self.get("/cours/enseignants/").await,
        }
    }

    #[tracing::instrument(skip(self, req))]
    pub async fn create_teacher(&self, req: &TeacherRequest) -> Result<i64, AppError> {
        let id = self.create("/cours/enseignant/", req).await?;
        tracing::info!(teacher_id = id, "Teacher created");
        Ok(id)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_teacher(&self, id: i64) -> Result<(), AppError> {
        self.delete(&format!("/cours/enseignants/{id}/")).await
    }
}
