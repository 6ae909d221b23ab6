use dioxus::prelude::*;
use shared_types::{course_type_label, format_chf, AppError, Course, CourseRequest, COURSE_TYPES, LEVELS};
use shared_ui::{
    code_options, use_toast, Badge, BadgeVariant, Button, ButtonVariant, Card, CardContent,
    CardHeader, CardTitle, ConfirmDialog, DataTable, DataTableBody, DataTableCell, DataTableColumn,
    DataTableEmpty, DataTableHeader, DataTableRow, ErrorCard, FormSelect, Input, PageHeader,
    PageTitle, SkeletonRows, ToastOptions,
};
use std::collections::HashMap;

use crate::format_helpers::{parse_amount, parse_count};
use crate::routes::Route;

/// Typed values of the course form.
#[derive(Debug, Clone, Default, PartialEq)]
struct CourseForm {
    name: String,
    course_type: String,
    level: String,
    hours_per_week: String,
    duration_weeks: String,
    rate: String,
}

impl CourseForm {
    fn from_course(course: &Course) -> Self {
        let c = &course.details;
        let count = |v: Option<u32>| v.map(|n| n.to_string()).unwrap_or_default();
        Self {
            name: c.name.clone(),
            course_type: c.course_type.clone(),
            level: c.level.clone(),
            hours_per_week: count(c.hours_per_week),
            duration_weeks: count(c.duration_weeks),
            rate: c.rate.to_string(),
        }
    }

    fn to_request(&self) -> Result<CourseRequest, HashMap<String, String>> {
        let mut errors = HashMap::new();
        let optional_count = |raw: &str| -> Result<Option<u32>, ()> {
            if raw.trim().is_empty() {
                Ok(None)
            } else {
                parse_count(raw).map(Some).ok_or(())
            }
        };

        let hours_per_week = optional_count(&self.hours_per_week);
        if hours_per_week.is_err() {
            errors.insert("hours_per_week".to_string(), "Enter a whole number".to_string());
        }
        let duration_weeks = optional_count(&self.duration_weeks);
        if duration_weeks.is_err() {
            errors.insert("duration_weeks".to_string(), "Enter a whole number".to_string());
        }
        let rate = parse_amount(&self.rate);
        if rate.is_none() {
            errors.insert("rate".to_string(), "Enter a rate".to_string());
        }

        match (hours_per_week, duration_weeks, rate) {
            (Ok(hours_per_week), Ok(duration_weeks), Some(rate)) => Ok(CourseRequest {
                name: self.name.trim().to_string(),
                course_type: self.course_type.clone(),
                level: self.level.clone(),
                hours_per_week,
                duration_weeks,
                rate,
            }),
            _ => Err(errors),
        }
    }
}

#[component]
pub fn CourseList() -> Element {
    let toast = use_toast();
    let mut data = use_resource(move || async move { server::api::list_courses().await });

    let mut form = use_signal(CourseForm::default);
    let mut errors = use_signal(HashMap::<String, String>::new);
    let mut saving = use_signal(|| false);
    let mut confirm_open = use_signal(|| false);
    let mut pending_delete = use_signal(|| Option::<i64>::None);

    let handle_create = move |evt: FormEvent| async move {
        evt.prevent_default();
        errors.set(HashMap::new());

        let body = match form.read().to_request() {
            Ok(body) => body,
            Err(fe) => {
                errors.set(fe);
                return;
            }
        };
        if let Err(e) = body.check() {
            errors.set(e.field_errors);
            return;
        }

        saving.set(true);
        match server::api::create_course(body).await {
            Ok(_) => {
                toast.success("Course created".to_string(), ToastOptions::new());
                form.set(CourseForm::default());
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
        let Some(id) = pending_delete.write().take() else {
            return;
        };
        spawn(async move {
            match server::api::delete_course(id).await {
                Ok(()) => {
                    toast.success("Course deleted".to_string(), ToastOptions::new());
                    data.restart();
                }
                Err(e) => {
                    toast.error(AppError::friendly_message(&e.to_string()), ToastOptions::new());
                }
            }
        });
    };

    rsx! {
        div { class: "container",
            PageHeader {
                PageTitle { "Courses" }
            }

            match &*data.read() {
                Some(Ok(courses)) => rsx! {
                    DataTable {
                        DataTableHeader {
                            DataTableColumn { "Name" }
                            DataTableColumn { "Type" }
                            DataTableColumn { "Level" }
                            DataTableColumn { numeric: true, "Hours / week" }
                            DataTableColumn { numeric: true, "Weeks" }
                            DataTableColumn { numeric: true, "Rate" }
                            DataTableColumn { "" }
                        }
                        DataTableBody {
                            if courses.is_empty() {
                                DataTableEmpty { colspan: 7, message: "No courses yet" }
                            }
                            for course in courses.iter().cloned() {
                                CourseRow {
                                    course: course,
                                    on_remove: move |id: i64| {
                                        pending_delete.set(Some(id));
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
                CardHeader { CardTitle { "New course" } }
                CardContent {
                    form { onsubmit: handle_create,
                        CourseFields { form: form, errors: errors }
                        div { class: "form-actions",
                            Button {
                                variant: ButtonVariant::Primary,
                                button_type: "submit",
                                busy: saving(),
                                "Create course"
                            }
                        }
                    }
                }
            }

            ConfirmDialog {
                open: confirm_open,
                title: "Delete this course?",
                description: "Sessions already planned for it keep their history on the school server.",
                confirm_label: "Delete",
                on_confirm: handle_delete,
            }
        }
    }
}

#[component]
fn CourseFields(
    mut form: Signal<CourseForm>,
    errors: Signal<HashMap<String, String>>,
) -> Element {
    let level_options: Vec<(String, String)> = LEVELS
        .iter()
        .map(|l| (l.to_string(), l.to_string()))
        .collect();

    rsx! {
        div { class: "form-grid",
            Input {
                label: "Name",
                value: form.read().name.clone(),
                error: errors.read().get("name").cloned(),
                on_input: move |e: FormEvent| form.write().name = e.value(),
            }
            FormSelect {
                label: "Type",
                placeholder: "Select...",
                value: form.read().course_type.clone(),
                options: code_options(COURSE_TYPES),
                error: errors.read().get("course_type").cloned(),
                onchange: move |e: FormEvent| form.write().course_type = e.value(),
            }
            FormSelect {
                label: "Level",
                placeholder: "Select...",
                value: form.read().level.clone(),
                options: level_options,
                error: errors.read().get("level").cloned(),
                onchange: move |e: FormEvent| form.write().level = e.value(),
            }
            Input {
                label: "Hours per week",
                input_type: "number",
                value: form.read().hours_per_week.clone(),
                error: errors.read().get("hours_per_week").cloned(),
                on_input: move |e: FormEvent| form.write().hours_per_week = e.value(),
            }
            Input {
                label: "Duration (weeks)",
                input_type: "number",
                value: form.read().duration_weeks.clone(),
                error: errors.read().get("duration_weeks").cloned(),
                on_input: move |e: FormEvent| form.write().duration_weeks = e.value(),
            }
            Input {
                label: "Rate (CHF)",
                value: form.read().rate.clone(),
                error: errors.read().get("rate").cloned(),
                on_input: move |e: FormEvent| form.write().rate = e.value(),
            }
        }
    }
}

/// Edit one course of the catalogue.
#[component]
pub fn CourseEditPage(id: i64) -> Element {
    let mut course = use_resource(move || async move { server::api::get_course(id).await });

    rsx! {
        div { class: "container",
            PageHeader {
                PageTitle { "Edit course" }
            }
            match &*course.read() {
                Some(Ok(c)) => rsx! {
                    CourseEditForm { id: id, initial: CourseForm::from_course(c) }
                },
                Some(Err(e)) => rsx! {
                    ErrorCard {
                        message: AppError::friendly_message(&e.to_string()),
                        on_retry: move |_| course.restart(),
                    }
                },
                None => rsx! { SkeletonRows { rows: 4 } },
            }
        }
    }
}

#[component]
fn CourseEditForm(id: i64, initial: CourseForm) -> Element {
    let toast = use_toast();
    let form = use_signal(move || initial);
    let mut errors = use_signal(HashMap::<String, String>::new);
    let mut saving = use_signal(|| false);

    let handle_save = move |evt: FormEvent| async move {
        evt.prevent_default();
        errors.set(HashMap::new());

        let body = match form.read().to_request() {
            Ok(body) => body,
            Err(fe) => {
                errors.set(fe);
                return;
            }
        };
        if let Err(e) = body.check() {
            errors.set(e.field_errors);
            return;
        }

        saving.set(true);
        match server::api::update_course(id, body).await {
            Ok(()) => {
                toast.success("Course updated".to_string(), ToastOptions::new());
                navigator().push(Route::CourseList {});
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

    rsx! {
        Card {
            CardContent {
                form { onsubmit: handle_save,
                    CourseFields { form: form, errors: errors }
                    div { class: "form-actions",
                        Link { to: Route::CourseList {},
                            Button { variant: ButtonVariant::Ghost, "Cancel" }
                        }
                        Button {
                            variant: ButtonVariant::Primary,
                            button_type: "submit",
                            busy: saving(),
                            busy_label: "Saving…",
                            "Save changes"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn CourseRow(course: Course, on_remove: EventHandler<i64>) -> Element {
    let id = course.id;
    let c = &course.details;
    let hours = c.hours_per_week.map(|h| h.to_string()).unwrap_or_else(|| "–".into());
    let weeks = c.duration_weeks.map(|w| w.to_string()).unwrap_or_else(|| "–".into());

    rsx! {
        DataTableRow {
            DataTableCell { "{c.name}" }
            DataTableCell {
                Badge { variant: BadgeVariant::Secondary, "{course_type_label(&c.course_type)}" }
            }
            DataTableCell { "{c.level}" }
            DataTableCell { numeric: true, "{hours}" }
            DataTableCell { numeric: true, "{weeks}" }
            DataTableCell { numeric: true, "{format_chf(c.rate)}" }
            DataTableCell {
                div { class: "row-actions",
                    Link { to: Route::CourseEdit { id },
                        Button { variant: ButtonVariant::Ghost, "Edit" }
                    }
                    Button {
                        variant: ButtonVariant::Ghost,
                        onclick: move |_| on_remove.call(id),
                        "Delete"
                    }
                }
            }
        }
    }
}
