use dioxus::prelude::*;
use shared_types::DashboardStats;

#[cfg(feature = "server")]
use super::auth::*;

#[server]
pub async fn dashboard_stats() -> Result<DashboardStats, ServerFnError> {
    school()?.dashboard_stats().await.map_err(forward)
}
