use dioxus::prelude::*;
use shared_types::{AppError, ConsoleSettings, StudentQuery, StudentSummary, STUDENT_STATUS_FILTERS};
use shared_ui::{
    code_options, Button, ButtonVariant, DataTable, DataTableBody, DataTableCell, DataTableColumn,
    DataTableEmpty, DataTableHeader, DataTableRow, ErrorCard, FilterBar, FormSelect, Input, PageActions,
    PageHeader, PageTitle, Pagination, SkeletonRows,
};

use crate::debounce::use_debounced_search;
use crate::format_helpers::{count_label, format_date};
use crate::routes::Route;

#[component]
pub fn StudentListPage() -> Element {
    let settings = use_context::<ConsoleSettings>();
    let page_size = settings.page_size;

    let search = use_debounced_search();
    let mut status = use_signal(|| "tous".to_string());
    let mut page = use_signal(|| 1i64);

    // Re-runs whenever the settled term, the filter or the page changes.
    // A superseded fetch is dropped by the resource, so late answers never land.
    let mut data = use_resource(move || {
        let query = StudentQuery {
            page: Some(*page.read()),
            limit: Some(page_size),
            search: search.term.read().clone(),
            status: Some(status.read().clone()),
        };
        async move { server::api::list_students(query).await }
    });

    let summary = match &*data.read() {
        Some(Ok(resp)) => Some(count_label(resp.meta.total, "student", "students")),
        _ => None,
    };

    rsx! {
        div { class: "container",
            PageHeader {
                PageTitle { "Students" }
                PageActions {
                    Link { to: Route::StudentCreate {},
                        Button { variant: ButtonVariant::Primary, "New student" }
                    }
                }
            }

            FilterBar { pending: *search.pending.read(), summary: summary,
                Input {
                    value: search.input.read().clone(),
                    placeholder: "Search by name...",
                    on_input: move |evt: FormEvent| {
                        page.set(1);
                        search.on_input(evt.value());
                    },
                }
                FormSelect {
                    value: status.read().clone(),
                    options: code_options(STUDENT_STATUS_FILTERS),
                    onchange: move |evt: FormEvent| {
                        status.set(evt.value());
                        page.set(1);
                    },
                }
                if !search.input.read().is_empty() {
                    Button {
                        variant: ButtonVariant::Secondary,
                        onclick: move |_| {
                            search.clear();
                            page.set(1);
                        },
                        "Clear"
                    }
                }
            }

            match &*data.read() {
                Some(Ok(resp)) => rsx! {
                    StudentTable { students: resp.data.clone() }
                    Pagination { total: resp.meta.total, page: page, page_size: page_size }
                },
                Some(Err(e)) => rsx! {
                    ErrorCard {
                        message: AppError::friendly_message(&e.to_string()),
                        on_retry: move |_| data.restart(),
                    }
                },
                None => rsx! { SkeletonRows { rows: 6, columns: 5 } },
            }
        }
    }
}

#[component]
fn StudentTable(students: Vec<StudentSummary>) -> Element {
    rsx! {
        DataTable {
            DataTableHeader {
                DataTableColumn { "Name" }
                DataTableColumn { "Birth date" }
                DataTableColumn { "Phone" }
                DataTableColumn { "Email" }
                DataTableColumn { "Country" }
            }
            DataTableBody {
                if students.is_empty() {
                    DataTableEmpty { colspan: 5, message: "No students found" }
                }
                for student in students {
                    StudentRow { student: student }
                }
            }
        }
    }
}

#[component]
fn StudentRow(student: StudentSummary) -> Element {
    let id = student.id;
    let birth_date = format_date(student.birth_date);

    rsx! {
        DataTableRow {
            onclick: move |_| {
                navigator().push(Route::StudentDetail { id });
            },
            DataTableCell { "{student.full_name()}" }
            DataTableCell { "{birth_date}" }
            DataTableCell { "{student.phone}" }
            DataTableCell { "{student.email}" }
            DataTableCell { "{student.country_name}" }
        }
    }
}
