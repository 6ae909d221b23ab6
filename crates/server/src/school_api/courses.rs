use shared_types::{AppError, Course, CourseRequest};

use super::SchoolApi;

impl SchoolApi {
    #[tracing::instrument(skip(self))]
    pub async fn list_courses(&self) -> Result<Vec<Course>, AppError> {
        self.get("/cours/cours/").await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_course(&self, id: i64) -> Result<Course, AppError> {
        self.get(&format!("/cours/cours/{id}/")).await
    }

    #[tracing::instrument(skip(self, req))]
    pub async fn update_course(&self, id: i64, req: &CourseRequest) -> Result<(), AppError> {
        self.update(&format!("/cours/cours/{id}/"), req).await
    }

    #[tracing::instrument(skip(self, req))]
    pub async fn create_course(&self, req: &CourseRequest) -> Result<i64, AppError> {
        let id = self.create("/cours/cour/", req).await?;
        tracing::info!(course_id = id, "Course created");
        Ok(id)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_course(&self, id: i64) -> Result<(), AppError> {
        self.delete(&format!("/cours/cours/{id}/")).await
    }
}
