use dioxus::prelude::*;
use shared_types::{AppError, Teacher, TeacherRequest};
use shared_ui::{
    use_toast, Button, ButtonVariant, Card, CardContent, CardHeader, CardTitle, ConfirmDialog,
    DataTable, DataTableBody, DataTableCell, DataTableColumn, DataTableEmpty, DataTableHeader,
    DataTableRow, ErrorCard, FilterBar, Input, PageHeader, PageTitle, SkeletonRows, ToastOptions,
};
use std::collections::HashMap;

use crate::debounce::use_debounced_search;

#[component]
pub fn TeacherList() -> Element {
    let toast = use_toast();
    let search = use_debounced_search();

    let mut data = use_resource(move || {
        let term = search.term.read().clone();
        async move { server::api::list_teachers(term).await }
    });

    let mut last_name = use_signal(String::new);
    let mut first_name = use_signal(String::new);
    let mut errors = use_signal(HashMap::<String, String>::new);
    let mut saving = use_signal(|| false);

    let mut confirm_open = use_signal(|| false);
    let mut pending_delete = use_signal(|| Option::<Teacher>::None);

    let handle_create = move |evt: FormEvent| async move {
        evt.prevent_default();
        errors.set(HashMap::new());
        saving.set(true);

        let body = TeacherRequest {
            last_name: last_name(),
            first_name: first_name(),
        };
        match server::api::create_teacher(body).await {
            Ok(_) => {
                toast.success("Teacher added".to_string(), ToastOptions::new());
                last_name.set(String::new());
                first_name.set(String::new());
                data.restart();
            }
            Err(e) => {
                let err_str = e.to_string();
                let fe = AppError::parse_field_errors(&err_str);
                if fe.is_empty() {
                    toast.error(AppError::friendly_message(&err_str), ToastOptions::new());
                } else {
                    errors.set(fe);
                }
            }
        }
        saving.set(false);
    };

    let handle_delete = move |_| {
        let Some(teacher) = pending_delete.write().take() else {
            return;
        };
        spawn(async move {
            match server::api::delete_teacher(teacher.id).await {
                Ok(()) => {
                    toast.success(format!("{} removed", teacher.full_name()), ToastOptions::new());
                    data.restart();
                }
                Err(e) => {
                    toast.error(AppError::friendly_message(&e.to_string()), ToastOptions::new());
                }
            }
        });
    };

    let confirm_text = pending_delete
        .read()
        .as_ref()
        .map(|t| format!("{} will no longer be available for sessions and lessons.", t.full_name()))
        .unwrap_or_default();

    rsx! {
        div { class: "container",
            PageHeader {
                PageTitle { "Teachers" }
            }

            FilterBar { pending: *search.pending.read(),
                Input {
                    value: search.input.read().clone(),
                    placeholder: "Search by name...",
                    on_input: move |evt: FormEvent| search.on_input(evt.value()),
                }
            }

            match &*data.read() {
                Some(Ok(teachers)) => rsx! {
                    DataTable {
                        DataTableHeader {
                            DataTableColumn { "Last name" }
                            DataTableColumn { "First name" }
                            DataTableColumn { "" }
                        }
                        DataTableBody {
                            if teachers.is_empty() {
                                DataTableEmpty { colspan: 3, message: "No teachers found" }
                            }
                            for teacher in teachers.iter().cloned() {
                                TeacherRow {
                                    teacher: teacher,
                                    on_remove: move |t: Teacher| {
                                        pending_delete.set(Some(t));
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
                        on_retry: move |_| data.restart(),
                    }
                },
                None => rsx! { SkeletonRows {} },
            }

            Card {
                CardHeader { CardTitle { "Add a teacher" } }
                CardContent {
                    form { onsubmit: handle_create,
                        div { class: "form-grid",
                            Input {
                                label: "Last name",
                                value: last_name(),
                                error: errors.read().get("last_name").cloned(),
                                on_input: move |e: FormEvent| last_name.set(e.value()),
                            }
                            Input {
                                label: "First name",
                                value: first_name(),
                                error: errors.read().get("first_name").cloned(),
                                on_input: move |e: FormEvent| first_name.set(e.value()),
                            }
                        }
                        div { class: "form-actions",
                            Button {
                                variant: ButtonVariant::Primary,
                                button_type: "submit",
                                busy: saving(),
                                "Add teacher"
                            }
                        }
                    }
                }
            }

            ConfirmDialog {
                open: confirm_open,
                title: "Remove this teacher?",
                description: confirm_text,
                confirm_label: "Remove",
                on_confirm: handle_delete,
            }
        }
    }
}

#[component]
fn TeacherRow(teacher: Teacher, on_remove: EventHandler<Teacher>) -> Element {
    let target = teacher.clone();

    rsx! {
        DataTableRow {
            DataTableCell { "{teacher.last_name}" }
            DataTableCell { "{teacher.first_name}" }
            DataTableCell {
                Button {
                    variant: ButtonVariant::Ghost,
                    onclick: move |_| on_remove.call(target.clone()),
                    "Remove"
                }
            }
        }
    }
}
