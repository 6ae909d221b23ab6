use shared_types::{
    normalize_pagination, AppError, PrivateLesson, PrivateLessonPage, PrivateLessonRequest,
};

use super::SchoolApi;

impl SchoolApi {
    #[tracing::instrument(skip(self))]
    pub async fn list_private_lessons(
        &self,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> Result<PrivateLessonPage, AppError> {
        let (page, limit) = normalize_pagination(page, limit);
        self.get_json(
            "/cours/cours_prive/",
            &[("page", page.to_string()), ("taille", limit.to_string())],
        )
        .await
    }

    #[tracing::instrument(skip(self, req))]
    pub async fn create_private_lesson(&self, req: &PrivateLessonRequest) -> Result<i64, AppError> {
        let id = self.create("/cours/cours_prive/", req).await?;
        tracing::info!(lesson_id = id, students = req.student_ids.len(), "Private lesson created");
        Ok(id)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_private_lesson(&self, id: i64) -> Result<PrivateLesson, AppError> {
        self.get(&format!("/cours/cours_prive/{id}/")).await
    }

    /// Lessons the student takes part in.
    #[tracing::instrument(skip(self))]
    pub async fn student_private_lessons(&self, student_id: i64) -> Result<Vec<PrivateLesson>, AppError> {
        self.get(&format!("/cours/eleves/{student_id}/cours_prives/")).await
    }

    /// An unknown student id comes back as a `Conflict`.
    #[tracing::instrument(skip(self, req))]
    pub async fn update_private_lesson(
        &self,
        id: i64,
        req: &PrivateLessonRequest,
    ) -> Result<(), AppError> {
        self.update(&format!("/cours/cours_prive/{id}/"), req).await?;
        tracing::info!(lesson_id = id, students = req.student_ids.len(), "Private lesson updated");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_private_lesson(&self, id: i64) -> Result<(), AppError> {
        self.delete(&format!("/cours/cours_prive/{id}/")).await?;
        tracing::info!(lesson_id = id, "Private lesson deleted");
        Ok(())
    }
}
