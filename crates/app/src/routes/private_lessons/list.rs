use dioxus::prelude::*;
use shared_types::{format_chf, location_label, AppError, ConsoleSettings, PrivateLesson};
use shared_ui::{
    Button, ButtonVariant, DataTable, DataTableBody, DataTableCell, DataTableColumn,
    DataTableEmpty, DataTableHeader, DataTableRow, ErrorCard, PageActions, PageHeader, PageTitle,
    Pagination, SkeletonRows,
};

use crate::format_helpers::format_date;
use crate::routes::Route;

#[component]
pub fn PrivateLessonListPage() -> Element {
    let settings = use_context::<ConsoleSettings>();
    let page_size = settings.page_size;
    let page = use_signal(|| 1i64);

    let mut data = use_resource(move || {
        let current = *page.read();
        async move { server::api::list_private_lessons(Some(current), Some(page_size)).await }
    });

    rsx! {
        div { class: "container",
            PageHeader {
                PageTitle { "Private lessons" }
                PageActions {
                    Link { to: Route::PrivateLessonCreate {},
                        Button { variant: ButtonVariant::Primary, "New private lesson" }
                    }
                }
            }

            match &*data.read() {
                Some(Ok(resp)) => rsx! {
                    LessonTable { lessons: resp.data.clone() }
                    Pagination { total: resp.meta.total, page: page, page_size: page_size }
                },
                Some(Err(e)) => rsx! {
                    ErrorCard {
                        message: AppError::friendly_message(&e.to_string()),
                        on_retry: move |_| data.restart(),
                    }
                },
                None => rsx! { SkeletonRows { rows: 6 } },
            }
        }
    }
}

#[component]
fn LessonTable(lessons: Vec<PrivateLesson>) -> Element {
    rsx! {
        DataTable {
            DataTableHeader {
                DataTableColumn { "Date" }
                DataTableColumn { "Time" }
                DataTableColumn { "Teacher" }
                DataTableColumn { "Students" }
                DataTableColumn { "Location" }
                DataTableColumn { numeric: true, "Rate" }
            }
            DataTableBody {
                if lessons.is_empty() {
                    DataTableEmpty { colspan: 6, message: "No private lessons scheduled" }
                }
                for lesson in lessons {
                    DataTableRow {
                        onclick: move |_| {
                            navigator().push(Route::PrivateLessonDetail { id: lesson.id });
                        },
                        DataTableCell { "{format_date(lesson.date)}" }
                        DataTableCell { "{lesson.time_range()}" }
                        DataTableCell { "{lesson.teacher_last_name} {lesson.teacher_first_name}" }
                        DataTableCell { {lesson.students.join(", ")} }
                        DataTableCell { "{location_label(&lesson.location)}" }
                        DataTableCell { numeric: true, "{format_chf(lesson.rate)}" }
                    }
                }
            }
        }
    }
}
