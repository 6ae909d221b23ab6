use dioxus::prelude::*;
use shared_types::{
    format_chf, AppError, Enrollment, InvoiceBasis, InvoiceLineRequest, InvoiceRequest,
    PrivateLesson,
};
use shared_ui::{
    use_toast, Button, ButtonVariant, Card, CardContent, CardHeader, CardTitle, ErrorCard,
    FormSelect, Input, PageHeader, PageSubtitle, PageTitle, SkeletonRows, ToastOptions,
};
use std::collections::HashMap;

use crate::format_helpers::{format_date, parse_amount, parse_input_date};
use crate::routes::Route;

const ENROLLMENT_PREFIX: &str = "enrollment:";
const LESSON_PREFIX: &str = "lesson:";

#[derive(Debug, Clone, Default, PartialEq)]
struct LineDraft {
    description: String,
    period_start: String,
    period_end: String,
    amount: String,
}

/// Typed values of the new-invoice form. `basis` holds the option key of
/// the billed enrollment or private lesson.
#[derive(Debug, Clone, PartialEq)]
struct InvoiceDraft {
    basis: String,
    lines: Vec<LineDraft>,
}

impl Default for InvoiceDraft {
    fn default() -> Self {
        Self {
            basis: String::new(),
            lines: vec![LineDraft::default()],
        }
    }
}

fn parse_basis(key: &str, student_id: i64) -> Option<InvoiceBasis> {
    if let Some(id) = key.strip_prefix(ENROLLMENT_PREFIX) {
        return id.parse().ok().map(InvoiceBasis::Enrollment);
    }
    let lesson_id = key.strip_prefix(LESSON_PREFIX)?.parse().ok()?;
    Some(InvoiceBasis::PrivateLesson { lesson_id, student_id })
}

impl InvoiceDraft {
    fn to_request(&self, student_id: i64) -> Result<InvoiceRequest, HashMap<String, String>> {
        let mut errors = HashMap::new();
        let basis = parse_basis(&self.basis, student_id);
        if basis.is_none() {
            errors.insert(
                "basis".to_string(),
                "Select the enrollment or private lesson to bill".to_string(),
            );
        }

        let mut lines = Vec::with_capacity(self.lines.len());
        for (i, draft) in self.lines.iter().enumerate() {
            let mut date = |field: &str, raw: &str| match raw.trim() {
                "" => None,
                value => {
                    let parsed = parse_input_date(value);
                    if parsed.is_none() {
                        errors.insert(format!("lines.{i}.{field}"), "Enter a valid date".to_string());
                    }
                    parsed
                }
            };
            let period_start = date("period_start", &draft.period_start);
            let period_end = date("period_end", &draft.period_end);
            let amount = parse_amount(&draft.amount);
            if amount.is_none() {
                errors.insert(format!("lines.{i}.amount"), "Enter an amount".to_string());
            }
            lines.push(InvoiceLineRequest {
                description: draft.description.trim().to_string(),
                period_start,
                period_end,
                amount: amount.unwrap_or_default(),
            });
        }

        match basis {
            Some(basis) if errors.is_empty() => Ok(InvoiceRequest::new(basis, lines)),
            _ => Err(errors),
        }
    }
}

/// Draft line prefilled from what is being billed.
fn suggested_line(enrollments: &[Enrollment], lessons: &[PrivateLesson], key: &str) -> Option<LineDraft> {
    if let Some(id) = key.strip_prefix(ENROLLMENT_PREFIX) {
        let e = enrollments.iter().find(|e| e.id.to_string() == id)?;
        return Some(LineDraft {
            description: "Enrollment fee".to_string(),
            amount: format!("{:.2}", e.fee),
            ..LineDraft::default()
        });
    }
    let id = key.strip_prefix(LESSON_PREFIX)?;
    let lesson = lessons.iter().find(|l| l.id.to_string() == id)?;
    Some(LineDraft {
        description: format!("Private lesson of {}", format_date(lesson.date)),
        period_start: lesson.date.format("%Y-%m-%d").to_string(),
        period_end: lesson.date.format("%Y-%m-%d").to_string(),
        amount: format!("{:.2}", lesson.rate),
    })
}

#[component]
pub fn StudentInvoicePage(id: i64) -> Element {
    let mut billable = use_resource(move || async move {
        let student = server::api::get_student(id).await?;
        let enrollments = server::api::list_enrollments(id).await?;
        let lessons = server::api::list_student_private_lessons(id).await?;
        Ok::<_, ServerFnError>((student.full_name(), enrollments, lessons))
    });

    rsx! {
        div { class: "container",
            match &*billable.read() {
                Some(Ok((name, enrollments, lessons))) => rsx! {
                    PageHeader {
                        PageTitle { "New invoice" }
                        PageSubtitle { "{name}" }
                    }
                    InvoiceForm {
                        student_id: id,
                        enrollments: enrollments.clone(),
                        lessons: lessons.clone(),
                    }
                },
                Some(Err(e)) => rsx! {
                    ErrorCard {
                        message: AppError::friendly_message(&e.to_string()),
                        on_retry: move |_| billable.restart(),
                    }
                },
                None => rsx! { SkeletonRows { rows: 5 } },
            }
        }
    }
}

#[component]
fn InvoiceForm(student_id: i64, enrollments: Vec<Enrollment>, lessons: Vec<PrivateLesson>) -> Element {
    let toast = use_toast();
    let mut draft = use_signal(InvoiceDraft::default);
    let mut errors = use_signal(HashMap::<String, String>::new);
    let mut saving = use_signal(|| false);

    let basis_options: Vec<(String, String)> = enrollments
        .iter()
        .map(|e| {
            (
                format!("{ENROLLMENT_PREFIX}{}", e.id),
                format!("Enrollment of {} (session #{})", format_date(e.enrolled_on), e.session_id),
            )
        })
        .chain(lessons.iter().map(|l| {
            (
                format!("{LESSON_PREFIX}{}", l.id),
                format!("Private lesson of {}, {}", format_date(l.date), l.time_range()),
            )
        }))
        .collect();

    let total: f64 = draft
        .read()
        .lines
        .iter()
        .filter_map(|l| parse_amount(&l.amount))
        .sum();

    let handle_basis = move |e: FormEvent| {
        let key = e.value();
        let mut d = draft.write();
        let untouched = d.lines.len() == 1 && d.lines[0] == LineDraft::default();
        if untouched {
            if let Some(line) = suggested_line(&enrollments, &lessons, &key) {
                d.lines[0] = line;
            }
        }
        d.basis = key;
    };

    let handle_submit = move |evt: FormEvent| async move {
        evt.prevent_default();
        errors.set(HashMap::new());

        let body = match draft.read().to_request(student_id) {
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
        match server::api::create_invoice(body).await {
            Ok(id) => {
                toast.success("Invoice created".to_string(), ToastOptions::new());
                navigator().push(Route::InvoiceDetail { id });
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

    let line_count = draft.read().lines.len();

    rsx! {
        form { onsubmit: handle_submit,
            Card {
                CardContent {
                    FormSelect {
                        label: "Bill for",
                        placeholder: "Select an enrollment or private lesson...",
                        value: draft.read().basis.clone(),
                        options: basis_options,
                        error: errors.read().get("basis").cloned(),
                        onchange: handle_basis,
                    }
                }
            }

            Card {
                CardHeader { CardTitle { "Lines" } }
                CardContent {
                    for i in 0..line_count {
                        div { class: "form-grid invoice-line", key: "{i}",
                            Input {
                                label: "Description",
                                value: draft.read().lines[i].description.clone(),
                                error: errors.read().get(&format!("lines.{i}.description")).cloned(),
                                on_input: move |e: FormEvent| draft.write().lines[i].description = e.value(),
                            }
                            Input {
                                label: "From",
                                input_type: "date",
                                value: draft.read().lines[i].period_start.clone(),
                                error: errors.read().get(&format!("lines.{i}.period_start")).cloned(),
                                on_input: move |e: FormEvent| draft.write().lines[i].period_start = e.value(),
                            }
                            Input {
                                label: "To",
                                input_type: "date",
                                value: draft.read().lines[i].period_end.clone(),
                                error: errors.read().get(&format!("lines.{i}.period_end")).cloned(),
                                on_input: move |e: FormEvent| draft.write().lines[i].period_end = e.value(),
                            }
                            Input {
                                label: "Amount (CHF)",
                                value: draft.read().lines[i].amount.clone(),
                                error: errors.read().get(&format!("lines.{i}.amount")).cloned(),
                                on_input: move |e: FormEvent| draft.write().lines[i].amount = e.value(),
                            }
                            if line_count > 1 {
                                Button {
                                    variant: ButtonVariant::Ghost,
                                    onclick: move |_| {
                                        draft.write().lines.remove(i);
                                        errors.set(HashMap::new());
                                    },
                                    "Remove line"
                                }
                            }
                        }
                    }
                    if let Some(message) = errors.read().get("lines").cloned() {
                        p { class: "field-error", role: "alert", "{message}" }
                    }
                    div { class: "invoice-totals",
                        Button {
                            variant: ButtonVariant::Outline,
                            onclick: move |_| draft.write().lines.push(LineDraft::default()),
                            "Add line"
                        }
                        strong { "Total {format_chf(total)}" }
                    }
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
                    "Create invoice"
                }
            }
        }
    }
}
