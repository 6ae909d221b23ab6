use dioxus::prelude::*;
use shared_types::{AppError, DashboardStats};
use shared_ui::{
    Card, CardContent, CardDescription, CardHeader, CardTitle, ErrorCard, PageHeader, PageSubtitle,
    PageTitle, SkeletonCards,
};

use crate::routes::Route;

/// Landing page with the school's headline counts.
#[component]
pub fn Dashboard() -> Element {
    let mut stats = use_resource(move || async move { server::api::dashboard_stats().await });

    rsx! {
        div { class: "container",
            PageHeader {
                PageTitle { "Dashboard" }
                PageSubtitle { "Overview of the school" }
            }

            match &*stats.read() {
                Some(Ok(s)) => rsx! { StatCards { stats: s.clone() } },
                Some(Err(e)) => rsx! {
                    ErrorCard {
                        message: AppError::friendly_message(&e.to_string()),
                        on_retry: move |_| stats.restart(),
                    }
                },
                None => rsx! { SkeletonCards { count: 3 } },
            }
        }
    }
}

#[component]
fn StatCards(stats: DashboardStats) -> Element {
    rsx! {
        div { class: "stat-grid",
            StatCard {
                title: "Students",
                description: "Registered students",
                value: stats.students,
                to: Route::StudentList {},
            }
            StatCard {
                title: "Open sessions",
                description: "Sessions accepting attendance",
                value: stats.open_sessions,
                to: Route::SessionList {},
            }
            StatCard {
                title: "Unpaid invoices",
                description: "Invoices with a remaining balance",
                value: stats.unpaid_invoices,
                to: Route::InvoiceList {},
            }
        }
    }
}

#[component]
fn StatCard(title: &'static str, description: &'static str, value: i64, to: Route) -> Element {
    rsx! {
        Card {
            CardHeader {
                CardTitle { "{title}" }
                CardDescription { "{description}" }
            }
            CardContent {
                Link { to: to, class: "stat-value", "{value}" }
            }
        }
    }
}
