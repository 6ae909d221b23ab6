use dioxus::prelude::*;
use shared_types::{
    AppError, Enrollment, EnrollmentUpdate, Session, SessionQuery, ENROLLMENT_STATUSES,
    SESSION_OPEN,
};
use shared_ui::{
    code_options, use_toast, Button, ButtonVariant, Card, CardContent, CheckboxField, ErrorCard,
    FormSelect, Input, PageHeader, PageSubtitle, PageTitle, SkeletonRows, ToastOptions,
};
use std::collections::HashMap;

use super::create::{StudentEditor, StudentForm};
use crate::format_helpers::{format_date, input_date, parse_amount, parse_input_date, FormMode};
use crate::routes::Route;

#[component]
pub fn StudentEditPage(id: i64) -> Element {
    let mut student = use_resource(move || async move { server::api::get_student(id).await });

    match &*student.read() {
        Some(Ok(detail)) => rsx! {
            StudentEditor { mode: FormMode::Edit(id), initial: StudentForm::from_detail(detail) }
        },
        Some(Err(e)) => rsx! {
            div { class: "container",
                ErrorCard {
                    message: AppError::friendly_message(&e.to_string()),
                    on_retry: move |_| student.restart(),
                }
            }
        },
        None => rsx! {
            div { class: "container", SkeletonRows { rows: 8 } }
        },
    }
}

/// Typed values of the enrollment edit form.
#[derive(Debug, Clone, PartialEq)]
struct EnrollmentForm {
    session_id: String,
    fee: String,
    goal: String,
    status: String,
    left_on: String,
    leave_reason: String,
    pre_enrollment: bool,
}

impl EnrollmentForm {
    fn from_enrollment(e: &Enrollment) -> Self {
        Self {
            session_id: e.session_id.to_string(),
            fee: e.fee.to_string(),
            goal: e.goal.clone().unwrap_or_default(),
            status: e.status.clone(),
            left_on: e.left_on.map(input_date).unwrap_or_default(),
            leave_reason: e.leave_reason.clone().unwrap_or_default(),
            pre_enrollment: e.pre_enrollment,
        }
    }

    fn to_update(&self) -> Result<EnrollmentUpdate, HashMap<String, String>> {
        let mut errors = HashMap::new();
        let session_id = self.session_id.parse::<i64>().ok();
        if session_id.is_none() {
            errors.insert("session_id".to_string(), "Select a session".to_string());
        }
        let fee = parse_amount(&self.fee);
        if fee.is_none() {
            errors.insert("fee".to_string(), "Enter an amount".to_string());
        }
        let left_on = match self.left_on.trim() {
            "" => Ok(None),
            raw => parse_input_date(raw).map(Some).ok_or(()),
        };
        if left_on.is_err() {
            errors.insert("left_on".to_string(), "Enter a valid date".to_string());
        }
        let text = |v: &str| Some(v.trim().to_string()).filter(|v| !v.is_empty());

        match (session_id, fee, left_on) {
            (Some(session_id), Some(fee), Ok(left_on)) => Ok(EnrollmentUpdate {
                fee,
                goal: text(&self.goal),
                status: self.status.clone(),
                left_on,
                leave_reason: text(&self.leave_reason),
                pre_enrollment: self.pre_enrollment,
                session_id,
            }),
            _ => Err(errors),
        }
    }
}

#[component]
pub fn EnrollmentEditPage(student_id: i64, enrollment_id: i64) -> Element {
    let mut enrollment = use_resource(move || async move {
        server::api::get_enrollment(student_id, enrollment_id).await
    });

    rsx! {
        div { class: "container",
            match &*enrollment.read() {
                Some(Ok(e)) => rsx! {
                    PageHeader {
                        PageTitle { "Edit enrollment" }
                        PageSubtitle { "Enrolled on {format_date(e.enrolled_on)}" }
                    }
                    EnrollmentEditForm { student_id: student_id, enrollment: e.clone() }
                },
                Some(Err(e)) => rsx! {
                    ErrorCard {
                        message: AppError::friendly_message(&e.to_string()),
                        on_retry: move |_| enrollment.restart(),
                    }
                },
                None => rsx! { SkeletonRows { rows: 5 } },
            }
        }
    }
}

#[component]
fn EnrollmentEditForm(student_id: i64, enrollment: Enrollment) -> Element {
    let toast = use_toast();
    let enrollment_id = enrollment.id;
    let enrolled_on = enrollment.enrolled_on;
    let current_session = enrollment.session_id;
    let initial = EnrollmentForm::from_enrollment(&enrollment);
    let mut form = use_signal(move || initial);
    let mut errors = use_signal(HashMap::<String, String>::new);
    let mut saving = use_signal(|| false);

    // Open sessions plus the current one, which may be closed by now.
    let sessions = use_resource(move || async move {
        let open = server::api::list_sessions(SessionQuery {
            page: Some(1),
            limit: Some(100),
            status: Some(SESSION_OPEN.to_string()),
            ..SessionQuery::default()
        })
        .await?;
        let mut list: Vec<Session> = open.data;
        if !list.iter().any(|s| s.id == current_session) {
            list.push(server::api::get_session(current_session).await?);
        }
        Ok::<_, ServerFnError>(list)
    });
    let session_options: Vec<(String, String)> = match &*sessions.read() {
        Some(Ok(list)) => list.iter().map(|s| (s.id.to_string(), s.label())).collect(),
        _ => Vec::new(),
    };

    let handle_save = move |evt: FormEvent| async move {
        evt.prevent_default();
        errors.set(HashMap::new());

        let body = match form.read().to_update() {
            Ok(body) => body,
            Err(fe) => {
                errors.set(fe);
                return;
            }
        };
        if let Err(e) = body.check(enrolled_on) {
            errors.set(e.field_errors);
            return;
        }

        saving.set(true);
        match server::api::update_enrollment(student_id, enrollment_id, body).await {
            Ok(()) => {
                toast.success("Enrollment updated".to_string(), ToastOptions::new());
                navigator().push(Route::StudentDetail { id: student_id });
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
                    div { class: "form-grid",
                        FormSelect {
                            label: "Session",
                            placeholder: "Select a session...",
                            value: form.read().session_id.clone(),
                            options: session_options,
                            error: errors.read().get("session_id").cloned(),
                            onchange: move |e: FormEvent| form.write().session_id = e.value(),
                        }
                        Input {
                            label: "Enrollment fee (CHF)",
                            value: form.read().fee.clone(),
                            error: errors.read().get("fee").cloned(),
                            on_input: move |e: FormEvent| form.write().fee = e.value(),
                        }
                        Input {
                            label: "Goal",
                            value: form.read().goal.clone(),
                            on_input: move |e: FormEvent| form.write().goal = e.value(),
                        }
                        FormSelect {
                            label: "Status",
                            value: form.read().status.clone(),
                            options: code_options(ENROLLMENT_STATUSES),
                            error: errors.read().get("status").cloned(),
                            onchange: move |e: FormEvent| form.write().status = e.value(),
                        }
                        Input {
                            label: "Left on",
                            input_type: "date",
                            hint: "Needed when a reason is given".to_string(),
                            value: form.read().left_on.clone(),
                            error: errors.read().get("left_on").cloned(),
                            on_input: move |e: FormEvent| form.write().left_on = e.value(),
                        }
                        Input {
                            label: "Reason for leaving",
                            value: form.read().leave_reason.clone(),
                            on_input: move |e: FormEvent| form.write().leave_reason = e.value(),
                        }
                        CheckboxField {
                            label: "Pre-enrollment",
                            checked: form.read().pre_enrollment,
                            on_change: move |on: bool| form.write().pre_enrollment = on,
                        }
                    }
                    div { class: "form-actions",
                        Link { to: Route::StudentDetail { id: student_id },
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
