use dioxus::prelude::*;
use shared_types::{
    course_type_label, day_period_label, AppError, AttendanceSheetSummary, RosterStudent, Session,
};
use shared_ui::{
    use_toast, Badge, BadgeVariant, Button, ButtonVariant, Card, CardContent, CardHeader,
    CardTitle, ConfirmDialog, DataTable, DataTableBody, DataTableCell, DataTableColumn,
    DataTableEmpty, DataTableHeader, DataTableRow, DetailGrid, DetailItem, DetailList, ErrorCard,
    PageActions, PageHeader, PageSubtitle, PageTitle, SkeletonRows, ToastOptions,
};

use crate::format_helpers::format_date;
use crate::routes::Route;

#[component]
pub fn SessionDetailPage(id: i64) -> Element {
    let toast = use_toast();
    let mut confirm_delete = use_signal(|| false);
    let mut session = use_resource(move || async move { server::api::get_session(id).await });

    let handle_delete = move |_| {
        spawn(async move {
            match server::api::delete_session(id).await {
                Ok(()) => {
                    toast.success("Session deleted".to_string(), ToastOptions::new());
                    navigator().push(Route::SessionList {});
                }
                Err(e) => {
                    toast.error(AppError::friendly_message(&e.to_string()), ToastOptions::new());
                }
            }
        });
    };

    rsx! {
        div { class: "container",
            match &*session.read() {
                Some(Ok(s)) => rsx! {
                    PageHeader {
                        PageTitle { "{s.course_name}" }
                        PageSubtitle { "{s.teacher_name()} · {format_date(s.start_date)} – {format_date(s.end_date)}" }
                        PageActions {
                            Link { to: Route::SessionList {},
                                Button { variant: ButtonVariant::Ghost, "Back" }
                            }
                            Link { to: Route::SessionEdit { id },
                                Button { variant: ButtonVariant::Outline, "Edit" }
                            }
                            Button {
                                variant: ButtonVariant::Destructive,
                                onclick: move |_| confirm_delete.set(true),
                                "Delete"
                            }
                            Link { to: Route::SheetCreate { id },
                                Button { variant: ButtonVariant::Primary, "New attendance sheet" }
                            }
                        }
                    }
                    DetailGrid {
                        SessionInfoCard { session: s.clone() }
                        SheetsCard { session_id: id }
                        RosterCard { session_id: id }
                    }
                },
                Some(Err(e)) => rsx! {
                    ErrorCard {
                        message: AppError::friendly_message(&e.to_string()),
                        on_retry: move |_| session.restart(),
                    }
                },
                None => rsx! { SkeletonRows { rows: 6 } },
            }

            ConfirmDialog {
                open: confirm_delete,
                title: "Delete this session?",
                description: "Its enrollments and attendance sheets will be removed with it.",
                confirm_label: "Delete",
                on_confirm: handle_delete,
            }
        }
    }
}

#[component]
fn SessionInfoCard(session: Session) -> Element {
    let period = session
        .day_period
        .as_deref()
        .map(day_period_label)
        .unwrap_or_default()
        .to_string();

    rsx! {
        Card {
            CardHeader { CardTitle { "Session" } }
            CardContent {
                DetailList {
                    DetailItem { label: "Course type", value: course_type_label(&session.course_type).to_string() }
                    DetailItem { label: "Level", value: session.level.clone() }
                    DetailItem { label: "Time of day", value: period }
                    DetailItem { label: "Capacity", value: session.capacity.to_string() }
                    DetailItem { label: "Meetings per month", value: session.meetings_per_month.to_string() }
                    DetailItem { label: "Status",
                        Badge {
                            variant: if session.is_open() { BadgeVariant::Success } else { BadgeVariant::Secondary },
                            if session.is_open() { "Open" } else { "Closed" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn SheetsCard(session_id: i64) -> Element {
    let toast = use_toast();
    let mut sheets = use_resource(move || async move { server::api::list_sheets(session_id).await });
    let mut confirm_open = use_signal(|| false);
    let mut pending_delete = use_signal(|| Option::<AttendanceSheetSummary>::None);

    let handle_delete = move |_| {
        let Some(sheet) = pending_delete.write().take() else {
            return;
        };
        spawn(async move {
            match server::api::delete_sheet(sheet.id).await {
                Ok(()) => {
                    toast.success(format!("Sheet for {} deleted", sheet.label()), ToastOptions::new());
                    sheets.restart();
                }
                Err(e) => {
                    tracing::warn!(sheet_id = sheet.id, error = %e, "Sheet delete failed");
                    toast.error(AppError::friendly_message(&e.to_string()), ToastOptions::new());
                }
            }
        });
    };

    let confirm_text = pending_delete
        .read()
        .as_ref()
        .map(|s| format!("All attendance recorded for {} will be lost.", s.label()))
        .unwrap_or_default();

    rsx! {
        Card {
            CardHeader { CardTitle { "Attendance sheets" } }
            CardContent {
                match &*sheets.read() {
                    Some(Ok(list)) => rsx! {
                        DataTable {
                            DataTableHeader {
                                DataTableColumn { "Month" }
                                DataTableColumn { "" }
                            }
                            DataTableBody {
                                if list.is_empty() {
                                    DataTableEmpty { colspan: 2, message: "No attendance sheets yet" }
                                }
                                for sheet in list.iter().cloned() {
                                    SheetRow {
                                        session_id: session_id,
                                        sheet: sheet,
                                        on_remove: move |s: AttendanceSheetSummary| {
                                            pending_delete.set(Some(s));
                                            confirm_open.set(true);
                                        },
                                    }
                                }
                            }
                        }
                    },
                    Some(Err(e)) => rsx! {
                        ErrorCard {
                            message: AppError::friendly_message(&e.to_string()),
                            on_retry: move |_| sheets.restart(),
                        }
                    },
                    None => rsx! { SkeletonRows { rows: 3 } },
                }
            }
        }

        ConfirmDialog {
            open: confirm_open,
            title: "Delete this attendance sheet?",
            description: confirm_text,
            confirm_label: "Delete",
            on_confirm: handle_delete,
        }
    }
}

#[component]
fn SheetRow(
    session_id: i64,
    sheet: AttendanceSheetSummary,
    on_remove: EventHandler<AttendanceSheetSummary>,
) -> Element {
    let sheet_id = sheet.id;
    let target = sheet.clone();

    rsx! {
        DataTableRow {
            onclick: move |_| {
                navigator().push(Route::AttendanceSheet { id: session_id, sheet_id });
            },
            DataTableCell { "{sheet.label()}" }
            DataTableCell {
                Button {
                    variant: ButtonVariant::Ghost,
                    onclick: move |evt: MouseEvent| {
                        evt.stop_propagation();
                        on_remove.call(target.clone());
                    },
                    "Delete"
                }
            }
        }
    }
}

#[component]
fn RosterCard(session_id: i64) -> Element {
    let mut roster = use_resource(move || async move { server::api::session_roster(session_id).await });

    rsx! {
        Card {
            CardHeader { CardTitle { "Enrolled students" } }
            CardContent {
                match &*roster.read() {
                    Some(Ok(students)) => rsx! { RosterTable { students: students.clone() } },
                    Some(Err(e)) => rsx! {
                        ErrorCard {
                            message: AppError::friendly_message(&e.to_string()),
                            on_retry: move |_| roster.restart(),
                        }
                    },
                    None => rsx! { SkeletonRows { rows: 4 } },
                }
            }
        }
    }
}

#[component]
fn RosterTable(students: Vec<RosterStudent>) -> Element {
    rsx! {
        DataTable {
            DataTableHeader {
                DataTableColumn { "Name" }
            }
            DataTableBody {
                if students.is_empty() {
                    DataTableEmpty { colspan: 1, message: "Nobody is enrolled yet" }
                }
                for student in students {
                    DataTableRow {
                        onclick: move |_| {
                            navigator().push(Route::StudentDetail { id: student.id });
                        },
                        DataTableCell { "{student.full_name()}" }
                    }
                }
            }
        }
    }
}
