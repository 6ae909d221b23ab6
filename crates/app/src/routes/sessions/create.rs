use dioxus::prelude::*;
use shared_types::{AppError, Session, SessionRequest, DAY_PERIODS};
use shared_ui::{
    code_options, use_toast, Button, ButtonVariant, Card, CardContent, ErrorCard, FormSelect,
    Input, PageHeader, PageTitle, SkeletonRows, ToastOptions,
};
use std::collections::HashMap;

use crate::format_helpers::{input_date, parse_count, parse_input_date, FormMode};
use crate::routes::Route;

#[derive(Debug, Clone, PartialEq)]
pub struct SessionForm {
    course_id: String,
    teacher_id: String,
    start_date: String,
    end_date: String,
    day_period: String,
    capacity: String,
    meetings_per_month: String,
}

impl Default for SessionForm {
    fn default() -> Self {
        Self {
            course_id: String::new(),
            teacher_id: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            day_period: String::new(),
            capacity: "12".to_string(),
            meetings_per_month: "8".to_string(),
        }
    }
}

impl SessionForm {
    pub fn from_session(session: &Session) -> Self {
        Self {
            course_id: session.course_id.to_string(),
            teacher_id: session.teacher_id.map(|t| t.to_string()).unwrap_or_default(),
            start_date: input_date(session.start_date),
            end_date: input_date(session.end_date),
            day_period: session.day_period.clone().unwrap_or_default(),
            capacity: session.capacity.to_string(),
            meetings_per_month: session.meetings_per_month.to_string(),
        }
    }

    fn to_request(&self) -> Result<SessionRequest, HashMap<String, String>> {
        let mut errors = HashMap::new();
        let mut require = |field: &str, message: &str, ok: bool| {
            if !ok {
                errors.insert(field.to_string(), message.to_string());
            }
        };

        let course_id = self.course_id.parse::<i64>().ok();
        require("course_id", "Select a course", course_id.is_some());
        let teacher_id = self.teacher_id.parse::<i64>().ok();
        require("teacher_id", "Select a teacher", teacher_id.is_some());
        let start_date = parse_input_date(&self.start_date);
        require("start_date", "Enter a valid date", start_date.is_some());
        let end_date = parse_input_date(&self.end_date);
        require("end_date", "Enter a valid date", end_date.is_some());
        let capacity = parse_count(&self.capacity);
        require("capacity", "Enter a whole number", capacity.is_some());
        let meetings = parse_count(&self.meetings_per_month);
        require("meetings_per_month", "Enter a whole number", meetings.is_some());

        match (course_id, teacher_id, start_date, end_date, capacity, meetings) {
            (Some(course_id), Some(teacher_id), Some(start_date), Some(end_date), Some(capacity), Some(meetings_per_month)) => {
                Ok(SessionRequest {
                    course_id,
                    teacher_id,
                    start_date,
                    end_date,
                    day_period: self.day_period.clone(),
                    capacity,
                    meetings_per_month,
                })
            }
            _ => Err(errors),
        }
    }
}

#[component]
pub fn SessionCreatePage() -> Element {
    rsx! {
        SessionEditor { mode: FormMode::Create, initial: SessionForm::default() }
    }
}

#[component]
pub fn SessionEditPage(id: i64) -> Element {
    let mut session = use_resource(move || async move { server::api::get_session(id).await });

    match &*session.read() {
        Some(Ok(s)) => rsx! {
            SessionEditor { mode: FormMode::Edit(id), initial: SessionForm::from_session(s) }
        },
        Some(Err(e)) => rsx! {
            div { class: "container",
                ErrorCard {
                    message: AppError::friendly_message(&e.to_string()),
                    on_retry: move |_| session.restart(),
                }
            }
        },
        None => rsx! {
            div { class: "container", SkeletonRows { rows: 5 } }
        },
    }
}

#[component]
fn SessionEditor(mode: FormMode, initial: SessionForm) -> Element {
    let toast = use_toast();
    let mut form = use_signal(move || initial);
    let mut errors = use_signal(HashMap::<String, String>::new);
    let mut saving = use_signal(|| false);

    let courses = use_resource(move || async move { server::api::list_courses().await });
    let teachers = use_resource(move || async move { server::api::list_teachers(None).await });

    let course_options: Vec<(String, String)> = match &*courses.read() {
        Some(Ok(list)) => list
            .iter()
            .map(|c| (c.id.to_string(), format!("{} ({})", c.details.name, c.details.level)))
            .collect(),
        _ => Vec::new(),
    };
    let teacher_options: Vec<(String, String)> = match &*teachers.read() {
        Some(Ok(list)) => list
            .iter()
            .map(|t| (t.id.to_string(), t.full_name()))
            .collect(),
        _ => Vec::new(),
    };

    let handle_submit = move |evt: FormEvent| async move {
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
        let result = match mode {
            FormMode::Create => server::api::create_session(body).await,
            FormMode::Edit(id) => server::api::update_session(id, body).await.map(|_| id),
        };
        match result {
            Ok(id) => {
                let message = if mode.is_edit() { "Session updated" } else { "Session created" };
                toast.success(message.to_string(), ToastOptions::new());
                navigator().push(Route::SessionDetail { id });
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

    let (title, submit_label) = match mode {
        FormMode::Create => ("New session", "Create session"),
        FormMode::Edit(_) => ("Edit session", "Save changes"),
    };
    let cancel_to = match mode {
        FormMode::Create => Route::SessionList {},
        FormMode::Edit(id) => Route::SessionDetail { id },
    };

    rsx! {
        div { class: "container",
            PageHeader {
                PageTitle { "{title}" }
            }

            Card {
                CardContent {
                    form { onsubmit: handle_submit,
                        div { class: "form-grid",
                            FormSelect {
                                label: "Course",
                                placeholder: "Select a course...",
                                value: form.read().course_id.clone(),
                                options: course_options,
                                error: errors.read().get("course_id").cloned(),
                                onchange: move |e: FormEvent| form.write().course_id = e.value(),
                            }
                            FormSelect {
                                label: "Teacher",
                                placeholder: "Select a teacher...",
                                value: form.read().teacher_id.clone(),
                                options: teacher_options,
                                error: errors.read().get("teacher_id").cloned(),
                                onchange: move |e: FormEvent| form.write().teacher_id = e.value(),
                            }
                            Input {
                                label: "Start date",
                                input_type: "date",
                                value: form.read().start_date.clone(),
                                error: errors.read().get("start_date").cloned(),
                                on_input: move |e: FormEvent| form.write().start_date = e.value(),
                            }
                            Input {
                                label: "End date",
                                input_type: "date",
                                value: form.read().end_date.clone(),
                                error: errors.read().get("end_date").cloned(),
                                on_input: move |e: FormEvent| form.write().end_date = e.value(),
                            }
                            FormSelect {
                                label: "Time of day",
                                placeholder: "Select...",
                                value: form.read().day_period.clone(),
                                options: code_options(DAY_PERIODS),
                                error: errors.read().get("day_period").cloned(),
                                onchange: move |e: FormEvent| form.write().day_period = e.value(),
                            }
                            Input {
                                label: "Capacity",
                                input_type: "number",
                                value: form.read().capacity.clone(),
                                error: errors.read().get("capacity").cloned(),
                                on_input: move |e: FormEvent| form.write().capacity = e.value(),
                            }
                            Input {
                                label: "Meetings per month",
                                input_type: "number",
                                value: form.read().meetings_per_month.clone(),
                                error: errors.read().get("meetings_per_month").cloned(),
                                on_input: move |e: FormEvent| form.write().meetings_per_month = e.value(),
                            }
                        }
                        div { class: "form-actions",
                            Link { to: cancel_to,
                                Button { variant: ButtonVariant::Ghost, "Cancel" }
                            }
                            Button {
                                variant: ButtonVariant::Primary,
                                button_type: "submit",
                                busy: saving(),
                                "{submit_label}"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_form_builds_a_request() {
        let form = SessionForm {
            course_id: "3".into(),
            teacher_id: "7".into(),
            start_date: "2024-09-02".into(),
            end_date: "2024-12-20".into(),
            day_period: "M".into(),
            ..SessionForm::default()
        };
        let req = form.to_request().unwrap();
        assert_eq!(req.course_id, 3);
        assert_eq!(req.capacity, 12);
        assert!(req.check().is_ok());
    }

    #[test]
    fn session_without_teacher_needs_one_on_save() {
        let session = Session {
            id: 9,
            course_id: 3,
            teacher_id: None,
            teacher_last_name: None,
            teacher_first_name: None,
            course_name: "Français".into(),
            course_type: "S".into(),
            level: "B1".into(),
            start_date: chrono::NaiveDate::from_ymd_opt(2024, 9, 2).unwrap(),
            end_date: chrono::NaiveDate::from_ymd_opt(2024, 12, 20).unwrap(),
            day_period: Some("S".into()),
            status: "O".into(),
            capacity: 10,
            meetings_per_month: 4,
        };
        let form = SessionForm::from_session(&session);
        assert_eq!(form.start_date, "2024-09-02");
        assert_eq!(form.capacity, "10");
        let errors = form.to_request().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key("teacher_id"));
    }

    #[test]
    fn missing_selections_are_reported() {
        let errors = SessionForm::default().to_request().unwrap_err();
        assert!(errors.contains_key("course_id"));
        assert!(errors.contains_key("teacher_id"));
        assert!(errors.contains_key("start_date"));
        assert!(!errors.contains_key("capacity"));
    }
}
