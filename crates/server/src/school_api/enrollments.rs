use shared_types::{AppError, Enrollment, EnrollmentRequest, EnrollmentUpdate};

use super::SchoolApi;

impl SchoolApi {
    #[tracing::instrument(skip(self))]
    pub async fn list_enrollments(&self, student_id: i64) -> Result<Vec<Enrollment>, AppError> {
        self.get(&format!("/cours/{student_id}/inscriptions/")).await
    }

    /// Enroll a student. A full session or a duplicate enrollment comes back
    /// as a `Conflict` carrying the backend's message.
    #[tracing::instrument(skip(self, req))]
    pub async fn create_enrollment(
        &self,
        student_id: i64,
        req: &EnrollmentRequest,
    ) -> Result<i64, AppError> {
        let id = self
            .create(&format!("/cours/{student_id}/inscription/"), req)
            .await?;
        tracing::info!(student_id, session_id = req.session_id, enrollment_id = id, "Student enrolled");
        Ok(id)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_enrollment(&self, student_id: i64, id: i64) -> Result<Enrollment, AppError> {
        self.get(&format!("/cours/{student_id}/inscriptions/{id}/")).await
    }

    /// Moving to another session is refused with a `Conflict` when that
    /// session is full or already holds the student.
    #[tracing::instrument(skip(self, req))]
    pub async fn update_enrollment(
        &self,
        student_id: i64,
        id: i64,
        req: &EnrollmentUpdate,
    ) -> Result<(), AppError> {
        self.update(&format!("/cours/{student_id}/inscriptions/{id}/"), req)
            .await?;
        tracing::info!(student_id, enrollment_id = id, session_id = req.session_id, "Enrollment updated");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_enrollment(&self, student_id: i64, id: i64) -> Result<(), AppError> {
        self.delete(&format!("/cours/{student_id}/inscriptions/{id}/"))
            .await?;
        tracing::info!(student_id, enrollment_id = id, "Enrollment deleted");
        Ok(())
    }
}
