use dioxus::prelude::*;
use shared_types::{
    enrollment_status_label, format_chf, location_label, AppError, Enrollment, EnrollmentRequest,
    Session, SessionQuery, StudentDetail, SESSION_OPEN,
};
use shared_ui::{
    use_toast, Badge, BadgeVariant, Button, ButtonVariant, Card, CardContent, CardHeader,
    CardTitle, CheckboxField, ConfirmDialog, DataTable, DataTableBody, DataTableCell, DataTableColumn,
    DataTableEmpty, DataTableHeader, DataTableRow, DetailGrid, DetailItem, DetailList, ErrorCard,
    FormSelect, Input, PageActions, PageHeader, PageSubtitle, PageTitle, SkeletonRows,
    ToastOptions,
};
use std::collections::HashMap;

use crate::format_helpers::{format_date, format_optional_date, parse_amount};
use crate::routes::Route;

#[component]
pub fn StudentDetailPage(id: i64) -> Element {
    let toast = use_toast();
    let mut confirm_delete = use_signal(|| false);

    let mut student = use_resource(move || async move { server::api::get_student(id).await });

    let handle_delete = move |_| {
        spawn(async move {
            match server::api::delete_student(id).await {
                Ok(()) => {
                    toast.success("Student deleted".to_string(), ToastOptions::new());
                    navigator().push(Route::StudentList {});
                }
                Err(e) => {
                    toast.error(AppError::friendly_message(&e.to_string()), ToastOptions::new());
                }
            }
        });
    };

    rsx! {
        div { class: "container",
            match &*student.read() {
                Some(Ok(detail)) => rsx! {
                    PageHeader {
                        PageTitle { "{detail.full_name()}" }
                        PageSubtitle { "{detail.profile.email}" }
                        PageActions {
                            Link { to: Route::StudentList {},
                                Button { variant: ButtonVariant::Ghost, "Back" }
                            }
                            Link { to: Route::StudentEdit { id },
                                Button { variant: ButtonVariant::Outline, "Edit" }
                            }
                            Link { to: Route::StudentInvoiceCreate { id },
                                Button { variant: ButtonVariant::Outline, "New invoice" }
                            }
                            Button {
                                variant: ButtonVariant::Destructive,
                                onclick: move |_| confirm_delete.set(true),
                                "Delete"
                            }
                        }
                    }
                    DetailGrid {
                        ProfileCard { detail: detail.clone() }
                        EnrollmentsCard { student_id: id }
                        PrivateLessonsCard { student_id: id }
                    }
                },
                Some(Err(e)) => rsx! {
                    ErrorCard {
                        message: AppError::friendly_message(&e.to_string()),
                        on_retry: move |_| student.restart(),
                    }
                },
                None => rsx! { SkeletonRows { rows: 8 } },
            }

            ConfirmDialog {
                open: confirm_delete,
                title: "Delete this student?",
                description: "The student record and its enrollments will be removed from the school.",
                confirm_label: "Delete",
                on_confirm: handle_delete,
            }
        }
    }
}

#[component]
fn ProfileCard(detail: StudentDetail) -> Element {
    let p = &detail.profile;
    let address = match (&p.street, &p.street_number, &p.npa, &p.locality) {
        (Some(street), Some(number), Some(npa), Some(locality)) => {
            format!("{street} {number}, {npa} {locality}")
        }
        _ => String::new(),
    };

    rsx! {
        Card {
            CardHeader { CardTitle { "Profile" } }
            CardContent {
                DetailList {
                    DetailItem { label: "Birth date", value: format_date(p.birth_date) }
                    DetailItem { label: "Place of birth", value: p.birth_place.clone() }
                    DetailItem { label: "Sex", value: p.sex.clone() }
                    DetailItem { label: "Country", value: detail.country_name.clone() }
                    DetailItem { label: "Phone", value: p.phone.clone() }
                    DetailItem { label: "Address", value: address }
                    DetailItem { label: "Billing address", value: p.billing_address.clone().unwrap_or_default() }
                    DetailItem { label: "Permit", value: p.permit_type.clone().unwrap_or_default() }
                    DetailItem { label: "Permit valid until", value: format_optional_date(p.permit_date) }
                    DetailItem { label: "Level", value: p.level.clone().unwrap_or_default() }
                    DetailItem { label: "Native language", value: p.native_language.clone().unwrap_or_default() }
                    DetailItem { label: "Other languages", value: p.other_languages.clone().unwrap_or_default() }
                    DetailItem { label: "Comments", value: p.comments.clone().unwrap_or_default() }
                }
            }
        }
    }
}

#[component]
fn EnrollmentsCard(student_id: i64) -> Element {
    let toast = use_toast();
    let mut enrollments =
        use_resource(move || async move { server::api::list_enrollments(student_id).await });

    // Open sessions feed both the enroll form and the session labels.
    let sessions = use_resource(move || async move {
        server::api::list_sessions(SessionQuery {
            page: Some(1),
            limit: Some(100),
            status: Some(SESSION_OPEN.to_string()),
            ..SessionQuery::default()
        })
        .await
    });

    let mut session_id = use_signal(String::new);
    let mut fee = use_signal(|| "0".to_string());
    let mut goal = use_signal(String::new);
    let mut pre_enrollment = use_signal(|| false);
    let mut errors = use_signal(HashMap::<String, String>::new);
    let mut saving = use_signal(|| false);
    let mut confirm_remove = use_signal(|| false);
    let mut pending_remove = use_signal(|| Option::<i64>::None);

    let handle_remove = move |_| {
        let Some(enrollment_id) = pending_remove.write().take() else {
            return;
        };
        spawn(async move {
            match server::api::delete_enrollment(student_id, enrollment_id).await {
                Ok(()) => {
                    toast.success("Enrollment removed".to_string(), ToastOptions::new());
                    enrollments.restart();
                }
                Err(e) => {
                    toast.error(AppError::friendly_message(&e.to_string()), ToastOptions::new());
                }
            }
        });
    };

    let open_sessions: Vec<Session> = match &*sessions.read() {
        Some(Ok(page)) => page.data.clone(),
        _ => Vec::new(),
    };
    let labels: HashMap<i64, String> = open_sessions
        .iter()
        .map(|s| (s.id, s.label()))
        .collect();
    let session_options: Vec<(String, String)> = open_sessions
        .iter()
        .map(|s| (s.id.to_string(), s.label()))
        .collect();

    let handle_enroll = move |evt: FormEvent| async move {
        evt.prevent_default();
        errors.set(HashMap::new());

        let mut fe = HashMap::new();
        let session = session_id.read().parse::<i64>().ok();
        if session.is_none() {
            fe.insert("session_id".to_string(), "Select a session".to_string());
        }
        let amount = parse_amount(&fee.read());
        if amount.is_none() {
            fe.insert("fee".to_string(), "Enter an amount".to_string());
        }
        let (Some(session), Some(amount)) = (session, amount) else {
            errors.set(fe);
            return;
        };

        let body = EnrollmentRequest {
            fee: amount,
            goal: Some(goal.read().trim().to_string()).filter(|g| !g.is_empty()),
            pre_enrollment: Some(pre_enrollment()),
            session_id: session,
        };
        if let Err(e) = body.check() {
            errors.set(e.field_errors);
            return;
        }

        saving.set(true);
        match server::api::enroll_student(student_id, body).await {
            Ok(_) => {
                toast.success("Student enrolled".to_string(), ToastOptions::new());
                session_id.set(String::new());
                goal.set(String::new());
                pre_enrollment.set(false);
                enrollments.restart();
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
            CardHeader { CardTitle { "Enrollments" } }
            CardContent {
                match &*enrollments.read() {
                    Some(Ok(list)) => rsx! {
                        EnrollmentTable {
                            student_id: student_id,
                            enrollments: list.clone(),
                            labels: labels.clone(),
                            on_remove: move |enrollment_id: i64| {
                                pending_remove.set(Some(enrollment_id));
                                confirm_remove.set(true);
                            },
                        }
                    },
                    Some(Err(e)) => rsx! {
                        ErrorCard {
                            message: AppError::friendly_message(&e.to_string()),
                            on_retry: move |_| enrollments.restart(),
                        }
                    },
                    None => rsx! { SkeletonRows { rows: 3 } },
                }

                form { class: "enroll-form", onsubmit: handle_enroll,
                    div { class: "form-grid",
                        FormSelect {
                            label: "Session",
                            placeholder: "Select an open session...",
                            value: session_id(),
                            options: session_options,
                            error: errors.read().get("session_id").cloned(),
                            onchange: move |e: FormEvent| session_id.set(e.value()),
                        }
                        Input {
                            label: "Enrollment fee (CHF)",
                            value: fee(),
                            error: errors.read().get("fee").cloned(),
                            on_input: move |e: FormEvent| fee.set(e.value()),
                        }
                        Input {
                            label: "Goal",
                            value: goal(),
                            on_input: move |e: FormEvent| goal.set(e.value()),
                        }
                        CheckboxField {
                            label: "Pre-enrollment",
                            checked: pre_enrollment(),
                            on_change: move |on: bool| pre_enrollment.set(on),
                        }
                    }
                    div { class: "form-actions",
                        Button {
                            variant: ButtonVariant::Primary,
                            button_type: "submit",
                            busy: saving(),
                            "Enroll"
                        }
                    }
                }
            }
        }

        ConfirmDialog {
            open: confirm_remove,
            title: "Remove this enrollment?",
            description: "The student leaves the session roster. Attendance already recorded stays on the sheets.",
            confirm_label: "Remove",
            on_confirm: handle_remove,
        }
    }
}

#[component]
fn EnrollmentTable(
    student_id: i64,
    enrollments: Vec<Enrollment>,
    labels: HashMap<i64, String>,
    on_remove: EventHandler<i64>,
) -> Element {
    rsx! {
        DataTable {
            DataTableHeader {
                DataTableColumn { "Session" }
                DataTableColumn { "Enrolled" }
                DataTableColumn { numeric: true, "Fee" }
                DataTableColumn { "Status" }
                DataTableColumn { "" }
            }
            DataTableBody {
                if enrollments.is_empty() {
                    DataTableEmpty { colspan: 5, message: "Not enrolled in any session" }
                }
                for enrollment in enrollments {
                    DataTableRow {
                        onclick: move |_| {
                            navigator().push(Route::SessionDetail { id: enrollment.session_id });
                        },
                        DataTableCell {
                            {labels.get(&enrollment.session_id).cloned().unwrap_or_else(|| format!("Session #{}", enrollment.session_id))}
                        }
                        DataTableCell { "{format_date(enrollment.enrolled_on)}" }
                        DataTableCell { numeric: true, "{format_chf(enrollment.fee)}" }
                        DataTableCell {
                            Badge {
                                variant: if enrollment.status == "A" { BadgeVariant::Success } else { BadgeVariant::Secondary },
                                "{enrollment_status_label(&enrollment.status)}"
                            }
                            if enrollment.pre_enrollment {
                                Badge { variant: BadgeVariant::Outline, "Pre-enrolled" }
                            }
                        }
                        DataTableCell {
                            div { class: "row-actions",
                                Button {
                                    variant: ButtonVariant::Ghost,
                                    onclick: move |evt: MouseEvent| {
                                        evt.stop_propagation();
                                        navigator().push(Route::EnrollmentEdit {
                                            id: student_id,
                                            enrollment_id: enrollment.id,
                                        });
                                    },
                                    "Edit"
                                }
                                Button {
                                    variant: ButtonVariant::Ghost,
                                    onclick: move |evt: MouseEvent| {
                                        evt.stop_propagation();
                                        on_remove.call(enrollment.id);
                                    },
                                    "Remove"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn PrivateLessonsCard(student_id: i64) -> Element {
    let mut lessons = use_resource(move || async move {
        server::api::list_student_private_lessons(student_id).await
    });

    rsx! {
        Card {
            CardHeader { CardTitle { "Private lessons" } }
            CardContent {
                match &*lessons.read() {
                    Some(Ok(list)) => rsx! {
                        DataTable {
                            DataTableHeader {
                                DataTableColumn { "Date" }
                                DataTableColumn { "Time" }
                                DataTableColumn { "Location" }
                                DataTableColumn { numeric: true, "Rate" }
                            }
                            DataTableBody {
                                if list.is_empty() {
                                    DataTableEmpty { colspan: 4, message: "No private lessons" }
                                }
                                for lesson in list.iter().cloned() {
                                    DataTableRow {
                                        onclick: move |_| {
                                            navigator().push(Route::PrivateLessonDetail { id: lesson.id });
                                        },
                                        DataTableCell { "{format_date(lesson.date)}" }
                                        DataTableCell { "{lesson.time_range()}" }
                                        DataTableCell { "{location_label(&lesson.location)}" }
                                        DataTableCell { numeric: true, "{format_chf(lesson.rate)}" }
                                    }
                                }
                            }
                        }
                    },
                    Some(Err(e)) => rsx! {
                        ErrorCard {
                            message: AppError::friendly_message(&e.to_string()),
                            on_retry: move |_| lessons.restart(),
                        }
                    },
                    None => rsx! { SkeletonRows { rows: 3 } },
                }
            }
        }
    }
}
