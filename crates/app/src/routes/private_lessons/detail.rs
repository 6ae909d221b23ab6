use dioxus::prelude::*;
use shared_types::{format_chf, location_label, AppError, PrivateLesson};
use shared_ui::{
    use_toast, Button, ButtonVariant, Card, CardContent, CardHeader, CardTitle, ConfirmDialog,
    DataTable, DataTableBody, DataTableCell, DataTableColumn, DataTableEmpty, DataTableHeader,
    DataTableRow, DetailGrid, DetailItem, DetailList, ErrorCard, PageActions, PageHeader,
    PageSubtitle, PageTitle, SkeletonRows, ToastOptions,
};

use crate::format_helpers::format_date;
use crate::routes::Route;

#[component]
pub fn PrivateLessonDetailPage(id: i64) -> Element {
    let toast = use_toast();
    let mut confirm_delete = use_signal(|| false);
    let mut lesson = use_resource(move || async move { server::api::get_private_lesson(id).await });

    let handle_delete = move |_| {
        spawn(async move {
            match server::api::delete_private_lesson(id).await {
                Ok(()) => {
                    toast.success("Private lesson deleted".to_string(), ToastOptions::new());
                    navigator().push(Route::PrivateLessonList {});
                }
                Err(e) => {
                    toast.error(AppError::friendly_message(&e.to_string()), ToastOptions::new());
                }
            }
        });
    };

    rsx! {
        div { class: "container",
            match &*lesson.read() {
                Some(Ok(l)) => rsx! {
                    PageHeader {
                        PageTitle { "Private lesson of {format_date(l.date)}" }
                        PageSubtitle { "{l.time_range()} · {l.teacher_last_name} {l.teacher_first_name}" }
                        PageActions {
                            Link { to: Route::PrivateLessonList {},
                                Button { variant: ButtonVariant::Ghost, "Back" }
                            }
                            Link { to: Route::PrivateLessonEdit { id },
                                Button { variant: ButtonVariant::Outline, "Edit" }
                            }
                            Button {
                                variant: ButtonVariant::Destructive,
                                onclick: move |_| confirm_delete.set(true),
                                "Delete"
                            }
                        }
                    }
                    DetailGrid {
                        LessonCard { lesson: l.clone() }
                        ParticipantsCard { lesson: l.clone() }
                    }
                },
                Some(Err(e)) => rsx! {
                    ErrorCard {
                        message: AppError::friendly_message(&e.to_string()),
                        on_retry: move |_| lesson.restart(),
                    }
                },
                None => rsx! { SkeletonRows { rows: 5 } },
            }

            ConfirmDialog {
                open: confirm_delete,
                title: "Delete this private lesson?",
                description: "Invoices already issued for it stay on the school server.",
                confirm_label: "Delete",
                on_confirm: handle_delete,
            }
        }
    }
}

#[component]
fn LessonCard(lesson: PrivateLesson) -> Element {
    rsx! {
        Card {
            CardHeader { CardTitle { "Lesson" } }
            CardContent {
                DetailList {
                    DetailItem { label: "Date", value: format_date(lesson.date) }
                    DetailItem { label: "Time", value: lesson.time_range() }
                    DetailItem { label: "Location", value: location_label(&lesson.location).to_string() }
                    DetailItem { label: "Rate", value: format_chf(lesson.rate) }
                    DetailItem {
                        label: "Teacher",
                        value: format!("{} {}", lesson.teacher_last_name, lesson.teacher_first_name),
                    }
                }
            }
        }
    }
}

#[component]
fn ParticipantsCard(lesson: PrivateLesson) -> Element {
    let participants = lesson.participants();

    rsx! {
        Card {
            CardHeader { CardTitle { "Students" } }
            CardContent {
                DataTable {
                    DataTableHeader {
                        DataTableColumn { "Name" }
                    }
                    DataTableBody {
                        if participants.is_empty() {
                            DataTableEmpty { colspan: 1, message: "No students on this lesson" }
                        }
                        for (student_id, name) in participants {
                            DataTableRow {
                                onclick: move |_| {
                                    navigator().push(Route::StudentDetail { id: student_id });
                                },
                                DataTableCell { "{name}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
