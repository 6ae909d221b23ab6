use dioxus::prelude::*;
use shared_types::{
    course_type_label, day_period_label, non_empty, AppError, ConsoleSettings, Session,
    SessionQuery, COURSE_TYPES, LEVELS, SESSION_STATUSES,
};
use shared_ui::{
    code_options, Badge, BadgeVariant, Button, ButtonVariant, DataTable, DataTableBody,
    DataTableCell, DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow, ErrorCard,
    FilterBar, FormSelect, PageActions, PageHeader, PageTitle, Pagination, SkeletonRows,
};

use crate::format_helpers::{count_label, format_date};
use crate::routes::Route;

#[component]
pub fn SessionListPage() -> Element {
    let settings = use_context::<ConsoleSettings>();
    let page_size = settings.page_size;

    let mut course_type = use_signal(String::new);
    let mut level = use_signal(String::new);
    let mut status = use_signal(String::new);
    let mut page = use_signal(|| 1i64);

    let mut data = use_resource(move || {
        let query = SessionQuery {
            page: Some(*page.read()),
            limit: Some(page_size),
            course_type: non_empty(Some(course_type.read().clone())),
            level: non_empty(Some(level.read().clone())),
            status: non_empty(Some(status.read().clone())),
        };
        async move { server::api::list_sessions(query).await }
    });

    let summary = match &*data.read() {
        Some(Ok(resp)) => Some(count_label(resp.meta.total, "session", "sessions")),
        _ => None,
    };

    let level_options: Vec<(String, String)> = LEVELS
        .iter()
        .map(|l| (l.to_string(), l.to_string()))
        .collect();

    rsx! {
        div { class: "container",
            PageHeader {
                PageTitle { "Sessions" }
                PageActions {
                    Link { to: Route::SessionCreate {},
                        Button { variant: ButtonVariant::Primary, "New session" }
                    }
                }
            }

            FilterBar { summary: summary,
                FormSelect {
                    placeholder: "All types",
                    value: course_type(),
                    options: code_options(COURSE_TYPES),
                    onchange: move |e: FormEvent| {
                        course_type.set(e.value());
                        page.set(1);
                    },
                }
                FormSelect {
                    placeholder: "All levels",
                    value: level(),
                    options: level_options,
                    onchange: move |e: FormEvent| {
                        level.set(e.value());
                        page.set(1);
                    },
                }
                FormSelect {
                    placeholder: "Any status",
                    value: status(),
                    options: code_options(SESSION_STATUSES),
                    onchange: move |e: FormEvent| {
                        status.set(e.value());
                        page.set(1);
                    },
                }
            }

            match &*data.read() {
                Some(Ok(resp)) => rsx! {
                    SessionTable { sessions: resp.data.clone() }
                    Pagination { total: resp.meta.total, page: page, page_size: page_size }
                },
                Some(Err(e)) => rsx! {
                    ErrorCard {
                        message: AppError::friendly_message(&e.to_string()),
                        on_retry: move |_| data.restart(),
                    }
                },
                None => rsx! { SkeletonRows { rows: 6, columns: 8 } },
            }
        }
    }
}

#[component]
fn SessionTable(sessions: Vec<Session>) -> Element {
    rsx! {
        DataTable {
            DataTableHeader {
                DataTableColumn { "Course" }
                DataTableColumn { "Type" }
                DataTableColumn { "Level" }
                DataTableColumn { "Teacher" }
                DataTableColumn { "Dates" }
                DataTableColumn { "Time of day" }
                DataTableColumn { numeric: true, "Capacity" }
                DataTableColumn { "Status" }
            }
            DataTableBody {
                if sessions.is_empty() {
                    DataTableEmpty { colspan: 8, message: "No sessions match these filters" }
                }
                for session in sessions {
                    SessionRow { session: session }
                }
            }
        }
    }
}

#[component]
fn SessionRow(session: Session) -> Element {
    let id = session.id;
    let dates = format!("{} – {}", format_date(session.start_date), format_date(session.end_date));
    let period = session
        .day_period
        .as_deref()
        .map(day_period_label)
        .unwrap_or("–")
        .to_string();
    let status_variant = if session.is_open() {
        BadgeVariant::Success
    } else {
        BadgeVariant::Secondary
    };

    rsx! {
        DataTableRow {
            onclick: move |_| {
                navigator().push(Route::SessionDetail { id });
            },
            DataTableCell { "{session.course_name}" }
            DataTableCell { "{course_type_label(&session.course_type)}" }
            DataTableCell { "{session.level}" }
            DataTableCell { "{session.teacher_name()}" }
            DataTableCell { "{dates}" }
            DataTableCell { "{period}" }
            DataTableCell { numeric: true, "{session.capacity}" }
            DataTableCell {
                Badge { variant: status_variant,
                    if session.is_open() { "Open" } else { "Closed" }
                }
            }
        }
    }
}
