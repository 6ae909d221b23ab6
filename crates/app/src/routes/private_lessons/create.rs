use dioxus::prelude::*;
use shared_types::{
    AppError, PrivateLesson, PrivateLessonRequest, SearchSequencer, StudentQuery, StudentSummary,
    LESSON_LOCATIONS,
};
use shared_ui::{
    code_options, use_toast, Badge, BadgeVariant, Button, ButtonVariant, Card, CardContent,
    CardHeader, CardTitle, ErrorCard, FilterBar, FormSelect, Input, PageHeader, PageTitle,
    SkeletonRows, ToastOptions,
};
use std::collections::HashMap;

use crate::debounce::use_debounced_search;
use crate::format_helpers::{input_date, parse_amount, parse_input_date, parse_input_time, FormMode};
use crate::routes::Route;

const LOOKUP_LIMIT: i64 = 8;

/// A student taking part in the lesson being edited.
#[derive(Debug, Clone, PartialEq)]
struct Participant {
    id: i64,
    name: String,
}

impl From<&StudentSummary> for Participant {
    fn from(s: &StudentSummary) -> Self {
        Self {
            id: s.id,
            name: s.full_name(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct LessonForm {
    date: String,
    start_time: String,
    end_time: String,
    rate: String,
    location: String,
    teacher_id: String,
}

impl LessonForm {
    fn from_lesson(lesson: &PrivateLesson) -> Self {
        Self {
            date: input_date(lesson.date),
            start_time: lesson.start_time.format("%H:%M").to_string(),
            end_time: lesson.end_time.format("%H:%M").to_string(),
            rate: lesson.rate.to_string(),
            location: lesson.location.clone(),
            teacher_id: lesson.teacher_id.to_string(),
        }
    }

    fn to_request(&self, student_ids: Vec<i64>) -> Result<PrivateLessonRequest, HashMap<String, String>> {
        let mut errors = HashMap::new();

        let date = parse_input_date(&self.date);
        if date.is_none() {
            errors.insert("date".to_string(), "Enter a valid date".to_string());
        }
        let start_time = parse_input_time(&self.start_time);
        if start_time.is_none() {
            errors.insert("start_time".to_string(), "Enter a time".to_string());
        }
        let end_time = parse_input_time(&self.end_time);
        if end_time.is_none() {
            errors.insert("end_time".to_string(), "Enter a time".to_string());
        }
        let rate = parse_amount(&self.rate);
        if rate.is_none() {
            errors.insert("rate".to_string(), "Enter a rate".to_string());
        }
        let teacher_id = self.teacher_id.parse::<i64>().ok();
        if teacher_id.is_none() {
            errors.insert("teacher_id".to_string(), "Select a teacher".to_string());
        }

        match (date, start_time, end_time, rate, teacher_id) {
            (Some(date), Some(start_time), Some(end_time), Some(rate), Some(teacher_id)) => {
                Ok(PrivateLessonRequest {
                    date,
                    start_time,
                    end_time,
                    rate,
                    location: self.location.clone(),
                    student_ids,
                    teacher_id,
                })
            }
            _ => Err(errors),
        }
    }
}

#[component]
pub fn PrivateLessonCreatePage() -> Element {
    rsx! {
        LessonEditor {
            mode: FormMode::Create,
            initial: LessonForm::default(),
            participants: Vec::new(),
        }
    }
}

#[component]
pub fn PrivateLessonEditPage(id: i64) -> Element {
    let mut lesson = use_resource(move || async move { server::api::get_private_lesson(id).await });

    match &*lesson.read() {
        Some(Ok(l)) => {
            let participants = l
                .participants()
                .into_iter()
                .map(|(id, name)| Participant { id, name })
                .collect::<Vec<_>>();
            rsx! {
                LessonEditor {
                    mode: FormMode::Edit(id),
                    initial: LessonForm::from_lesson(l),
                    participants: participants,
                }
            }
        }
        Some(Err(e)) => rsx! {
            div { class: "container",
                ErrorCard {
                    message: AppError::friendly_message(&e.to_string()),
                    on_retry: move |_| lesson.restart(),
                }
            }
        },
        None => rsx! {
            div { class: "container", SkeletonRows { rows: 5 } }
        },
    }
}

#[component]
fn LessonEditor(mode: FormMode, initial: LessonForm, participants: Vec<Participant>) -> Element {
    let toast = use_toast();
    let mut form = use_signal(move || initial);
    let chosen = use_signal(move || participants);
    let mut errors = use_signal(HashMap::<String, String>::new);
    let mut saving = use_signal(|| false);

    let teachers = use_resource(move || async move { server::api::list_teachers(None).await });
    let teacher_options: Vec<(String, String)> = match &*teachers.read() {
        Some(Ok(list)) => list.iter().map(|t| (t.id.to_string(), t.full_name())).collect(),
        _ => Vec::new(),
    };

    let handle_submit = move |evt: FormEvent| async move {
        evt.prevent_default();
        errors.set(HashMap::new());

        let ids: Vec<i64> = chosen.read().iter().map(|s| s.id).collect();
        let body = match form.read().to_request(ids) {
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
            FormMode::Create => server::api::create_private_lesson(body).await,
            FormMode::Edit(id) => server::api::update_private_lesson(id, body).await.map(|_| id),
        };
        match result {
            Ok(id) => {
                let message = if mode.is_edit() { "Private lesson updated" } else { "Private lesson scheduled" };
                toast.success(message.to_string(), ToastOptions::new());
                navigator().push(Route::PrivateLessonDetail { id });
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
        FormMode::Create => ("New private lesson", "Schedule lesson"),
        FormMode::Edit(_) => ("Edit private lesson", "Save changes"),
    };
    let cancel_to = match mode {
        FormMode::Create => Route::PrivateLessonList {},
        FormMode::Edit(id) => Route::PrivateLessonDetail { id },
    };

    rsx! {
        div { class: "container",
            PageHeader {
                PageTitle { "{title}" }
            }

            form { onsubmit: handle_submit,
                Card {
                    CardHeader { CardTitle { "Lesson" } }
                    CardContent {
                        div { class: "form-grid",
                            Input {
                                label: "Date",
                                input_type: "date",
                                value: form.read().date.clone(),
                                error: errors.read().get("date").cloned(),
                                on_input: move |e: FormEvent| form.write().date = e.value(),
                            }
                            Input {
                                label: "Start",
                                input_type: "time",
                                value: form.read().start_time.clone(),
                                error: errors.read().get("start_time").cloned(),
                                on_input: move |e: FormEvent| form.write().start_time = e.value(),
                            }
                            Input {
                                label: "End",
                                input_type: "time",
                                value: form.read().end_time.clone(),
                                error: errors.read().get("end_time").cloned(),
                                on_input: move |e: FormEvent| form.write().end_time = e.value(),
                            }
                            Input {
                                label: "Rate (CHF)",
                                value: form.read().rate.clone(),
                                error: errors.read().get("rate").cloned(),
                                on_input: move |e: FormEvent| form.write().rate = e.value(),
                            }
                            FormSelect {
                                label: "Location",
                                placeholder: "Select...",
                                value: form.read().location.clone(),
                                options: code_options(LESSON_LOCATIONS),
                                error: errors.read().get("location").cloned(),
                                onchange: move |e: FormEvent| form.write().location = e.value(),
                            }
                            FormSelect {
                                label: "Teacher",
                                placeholder: "Select a teacher...",
                                value: form.read().teacher_id.clone(),
                                options: teacher_options,
                                error: errors.read().get("teacher_id").cloned(),
                                onchange: move |e: FormEvent| form.write().teacher_id = e.value(),
                            }
                        }
                    }
                }

                Card {
                    CardHeader { CardTitle { "Students" } }
                    CardContent {
                        StudentPicker { chosen: chosen }
                        if let Some(message) = errors.read().get("student_ids").cloned() {
                            p { class: "field-error", role: "alert", "{message}" }
                        }
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

/// Search-as-you-type student lookup feeding a list of chosen students.
#[component]
fn StudentPicker(mut chosen: Signal<Vec<Participant>>) -> Element {
    let lookup = use_debounced_search();
    let mut sequencer = use_signal(SearchSequencer::new);
    let mut results = use_signal(Vec::<StudentSummary>::new);

    use_effect(move || {
        let Some(term) = lookup.term.read().clone() else {
            sequencer.write().invalidate();
            results.set(Vec::new());
            return;
        };
        let ticket = sequencer.write().issue();
        spawn(async move {
            let query = StudentQuery {
                page: Some(1),
                limit: Some(LOOKUP_LIMIT),
                search: Some(term),
                status: None,
            };
            let outcome = server::api::list_students(query).await;
            if !sequencer.peek().is_current(ticket) {
                tracing::debug!("Dropping stale student lookup");
                return;
            }
            match outcome {
                Ok(page) => results.set(page.data),
                Err(e) => {
                    tracing::warn!(error = %e, "Student lookup failed");
                    results.set(Vec::new());
                }
            }
        });
    });

    let picked: Vec<i64> = chosen.read().iter().map(|s| s.id).collect();
    let candidates: Vec<StudentSummary> = results
        .read()
        .iter()
        .filter(|s| !picked.contains(&s.id))
        .cloned()
        .collect();

    rsx! {
        FilterBar { pending: *lookup.pending.read(),
            Input {
                value: lookup.input.read().clone(),
                placeholder: "Find a student by name...",
                on_input: move |evt: FormEvent| lookup.on_input(evt.value()),
            }
        }

        if !candidates.is_empty() {
            ul { class: "lookup-results",
                for student in candidates {
                    li {
                        button {
                            r#type: "button",
                            onclick: move |_| {
                                chosen.write().push(Participant::from(&student));
                                lookup.clear();
                            },
                            "{student.full_name()} · {student.email}"
                        }
                    }
                }
            }
        }

        div { class: "chip-list",
            if chosen.read().is_empty() {
                span { class: "muted", "No student selected" }
            }
            for student in chosen.read().iter().cloned() {
                ChosenStudent {
                    student: student,
                    on_remove: move |id: i64| chosen.write().retain(|s| s.id != id),
                }
            }
        }
    }
}

#[component]
fn ChosenStudent(student: Participant, on_remove: EventHandler<i64>) -> Element {
    let id = student.id;
    rsx! {
        Badge { variant: BadgeVariant::Secondary,
            "{student.name} "
            button {
                r#type: "button",
                class: "chip-remove",
                "aria-label": "Remove",
                onclick: move |_| on_remove.call(id),
                "×"
            }
        }
    }
}
