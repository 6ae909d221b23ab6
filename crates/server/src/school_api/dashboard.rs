use shared_types::{AppError, DashboardStats, InvoiceFilter, SessionQuery, StudentQuery, SESSION_OPEN};

use super::SchoolApi;

impl SchoolApi {
    /// Headline counts, read from the totals of three one-row list queries.
    #[tracing::instrument(skip(self))]
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, AppError> {
        let students = StudentQuery {
            limit: Some(1),
            ..Default::default()
        };
        let open_sessions = SessionQuery {
            limit: Some(1),
            status: Some(SESSION_OPEN.to_string()),
            ..Default::default()
        };
        let (students, sessions, unpaid) = tokio::try_join!(
            self.list_students(&students),
            self.list_sessions(&open_sessions),
            self.list_invoices(InvoiceFilter::Unpaid, Some(1), Some(1)),
        )?;
        Ok(DashboardStats {
            students: students.total,
            open_sessions: sessions.total,
            unpaid_invoices: unpaid.total,
        })
    }
}
