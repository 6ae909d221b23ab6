use dioxus::prelude::*;
use shared_types::{AppError, StudentDetail, StudentProfile, LEVELS, PERMIT_TYPES, SEXES};
use shared_ui::{
    code_options, use_toast, Button, ButtonVariant, Card, CardContent, CardHeader, CardTitle,
    FormSelect, Input, PageHeader, PageTitle, ToastOptions,
};
use std::collections::HashMap;

use crate::format_helpers::{input_date, parse_input_date, FormMode};
use crate::routes::Route;

/// Draft of the student form, as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentForm {
    last_name: String,
    first_name: String,
    birth_date: String,
    birth_place: String,
    sex: String,
    street: String,
    street_number: String,
    npa: String,
    locality: String,
    phone: String,
    email: String,
    billing_address: String,
    permit_type: String,
    permit_date: String,
    level: String,
    native_language: String,
    other_languages: String,
    referral_source: String,
    comments: String,
    country_id: String,
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl StudentForm {
    pub fn from_detail(student: &StudentDetail) -> Self {
        let p = &student.profile;
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            last_name: p.last_name.clone(),
            first_name: p.first_name.clone(),
            birth_date: input_date(p.birth_date),
            birth_place: p.birth_place.clone(),
            sex: p.sex.clone(),
            street: text(&p.street),
            street_number: text(&p.street_number),
            npa: text(&p.npa),
            locality: text(&p.locality),
            phone: p.phone.clone(),
            email: p.email.clone(),
            billing_address: text(&p.billing_address),
            permit_type: text(&p.permit_type),
            permit_date: p.permit_date.map(input_date).unwrap_or_default(),
            level: text(&p.level),
            native_language: text(&p.native_language),
            other_languages: text(&p.other_languages),
            referral_source: text(&p.referral_source),
            comments: text(&p.comments),
            country_id: p.country_id.to_string(),
        }
    }

    /// Parse the typed values. Field rules are checked afterwards by
    /// `StudentProfile::check`.
    fn to_profile(&self) -> Result<StudentProfile, HashMap<String, String>> {
        let mut errors = HashMap::new();

        let birth_date = parse_input_date(&self.birth_date).ok_or(());
        if birth_date.is_err() {
            errors.insert("birth_date".to_string(), "Enter a valid date".to_string());
        }
        let permit_date = match optional(&self.permit_date) {
            None => Ok(None),
            Some(raw) => parse_input_date(&raw).map(Some).ok_or(()),
        };
        if permit_date.is_err() {
            errors.insert("permit_date".to_string(), "Enter a valid date".to_string());
        }
        let country_id = self.country_id.parse::<i64>();
        if country_id.is_err() {
            errors.insert("country_id".to_string(), "Select a country".to_string());
        }

        match (birth_date, permit_date, country_id) {
            (Ok(birth_date), Ok(permit_date), Ok(country_id)) => Ok(StudentProfile {
                last_name: self.last_name.trim().to_string(),
                first_name: self.first_name.trim().to_string(),
                birth_date,
                birth_place: self.birth_place.trim().to_string(),
                sex: self.sex.clone(),
                street: optional(&self.street),
                street_number: optional(&self.street_number),
                npa: optional(&self.npa),
                locality: optional(&self.locality),
                phone: self.phone.trim().to_string(),
                email: self.email.trim().to_string(),
                billing_address: optional(&self.billing_address),
                permit_type: optional(&self.permit_type),
                permit_date,
                level: optional(&self.level),
                native_language: optional(&self.native_language),
                other_languages: optional(&self.other_languages),
                referral_source: optional(&self.referral_source),
                comments: optional(&self.comments),
                country_id,
            }),
            _ => Err(errors),
        }
    }
}

#[component]
pub fn StudentCreatePage() -> Element {
    rsx! {
        StudentEditor { mode: FormMode::Create, initial: StudentForm::default() }
    }
}

/// Student form shared by the create and edit pages.
#[component]
pub fn StudentEditor(mode: FormMode, initial: StudentForm) -> Element {
    let toast = use_toast();
    let mut form = use_signal(move || initial);
    let mut errors = use_signal(HashMap::<String, String>::new);
    let mut saving = use_signal(|| false);

    let countries = use_resource(move || async move { server::api::list_countries().await });

    let field_error = move |key: &str| errors.read().get(key).cloned();

    let handle_submit = move |evt: FormEvent| async move {
        evt.prevent_default();
        errors.set(HashMap::new());

        let profile = match form.read().to_profile() {
            Ok(profile) => profile,
            Err(fe) => {
                errors.set(fe);
                return;
            }
        };
        if let Err(e) = profile.check(chrono::Local::now().date_naive()) {
            errors.set(e.field_errors);
            return;
        }

        saving.set(true);
        let result = match mode {
            FormMode::Create => server::api::create_student(profile).await,
            FormMode::Edit(id) => server::api::update_student(id, profile).await.map(|_| id),
        };
        match result {
            Ok(id) => {
                let message = if mode.is_edit() { "Student updated" } else { "Student created" };
                toast.success(message.to_string(), ToastOptions::new());
                navigator().push(Route::StudentDetail { id });
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

    let country_options: Vec<(String, String)> = match &*countries.read() {
        Some(Ok(list)) => list
            .iter()
            .map(|c| (c.id.to_string(), c.name.clone()))
            .collect(),
        _ => Vec::new(),
    };
    let level_options: Vec<(String, String)> = LEVELS
        .iter()
        .map(|l| (l.to_string(), l.to_string()))
        .collect();

    let (title, submit_label) = match mode {
        FormMode::Create => ("New student", "Create student"),
        FormMode::Edit(_) => ("Edit student", "Save changes"),
    };
    let cancel_to = match mode {
        FormMode::Create => Route::StudentList {},
        FormMode::Edit(id) => Route::StudentDetail { id },
    };

    rsx! {
        div { class: "container",
            PageHeader {
                PageTitle { "{title}" }
            }

            form { onsubmit: handle_submit,
                Card {
                    CardHeader { CardTitle { "Identity" } }
                    CardContent {
                        div { class: "form-grid",
                            Input {
                                label: "Last name *",
                                value: form.read().last_name.clone(),
                                error: field_error("last_name"),
                                on_input: move |e: FormEvent| form.write().last_name = e.value(),
                            }
                            Input {
                                label: "First name *",
                                value: form.read().first_name.clone(),
                                error: field_error("first_name"),
                                on_input: move |e: FormEvent| form.write().first_name = e.value(),
                            }
                            Input {
                                label: "Birth date *",
                                input_type: "date",
                                value: form.read().birth_date.clone(),
                                error: field_error("birth_date"),
                                on_input: move |e: FormEvent| form.write().birth_date = e.value(),
                            }
                            Input {
                                label: "Place of birth *",
                                value: form.read().birth_place.clone(),
                                error: field_error("birth_place"),
                                on_input: move |e: FormEvent| form.write().birth_place = e.value(),
                            }
                            FormSelect {
                                label: "Sex *",
                                placeholder: "Select...",
                                value: form.read().sex.clone(),
                                options: code_options(SEXES),
                                error: field_error("sex"),
                                onchange: move |e: FormEvent| form.write().sex = e.value(),
                            }
                            FormSelect {
                                label: "Country *",
                                placeholder: "Select a country...",
                                value: form.read().country_id.clone(),
                                options: country_options,
                                error: field_error("country_id"),
                                onchange: move |e: FormEvent| form.write().country_id = e.value(),
                            }
                        }
                    }
                }

                Card {
                    CardHeader { CardTitle { "Contact" } }
                    CardContent {
                        div { class: "form-grid",
                            Input {
                                label: "Phone *",
                                input_type: "tel",
                                value: form.read().phone.clone(),
                                error: field_error("phone"),
                                on_input: move |e: FormEvent| form.write().phone = e.value(),
                            }
                            Input {
                                label: "Email *",
                                input_type: "email",
                                value: form.read().email.clone(),
                                error: field_error("email"),
                                on_input: move |e: FormEvent| form.write().email = e.value(),
                            }
                            Input {
                                label: "Street",
                                value: form.read().street.clone(),
                                error: field_error("address"),
                                on_input: move |e: FormEvent| form.write().street = e.value(),
                            }
                            Input {
                                label: "Number",
                                value: form.read().street_number.clone(),
                                error: field_error("street_number"),
                                on_input: move |e: FormEvent| form.write().street_number = e.value(),
                            }
                            Input {
                                label: "NPA",
                                value: form.read().npa.clone(),
                                error: field_error("npa"),
                                on_input: move |e: FormEvent| form.write().npa = e.value(),
                            }
                            Input {
                                label: "Locality",
                                value: form.read().locality.clone(),
                                on_input: move |e: FormEvent| form.write().locality = e.value(),
                            }
                            Input {
                                label: "Billing address",
                                value: form.read().billing_address.clone(),
                                on_input: move |e: FormEvent| form.write().billing_address = e.value(),
                            }
                        }
                    }
                }

                Card {
                    CardHeader { CardTitle { "Residence and languages" } }
                    CardContent {
                        div { class: "form-grid",
                            FormSelect {
                                label: "Permit *",
                                placeholder: "Select...",
                                value: form.read().permit_type.clone(),
                                options: code_options(PERMIT_TYPES),
                                error: field_error("permit_type"),
                                onchange: move |e: FormEvent| form.write().permit_type = e.value(),
                            }
                            Input {
                                label: "Permit valid until",
                                input_type: "date",
                                value: form.read().permit_date.clone(),
                                error: field_error("permit_date"),
                                on_input: move |e: FormEvent| form.write().permit_date = e.value(),
                            }
                            FormSelect {
                                label: "Level",
                                placeholder: "Not assessed",
                                value: form.read().level.clone(),
                                options: level_options,
                                error: field_error("level"),
                                onchange: move |e: FormEvent| form.write().level = e.value(),
                            }
                            Input {
                                label: "Native language",
                                value: form.read().native_language.clone(),
                                on_input: move |e: FormEvent| form.write().native_language = e.value(),
                            }
                            Input {
                                label: "Other languages",
                                value: form.read().other_languages.clone(),
                                on_input: move |e: FormEvent| form.write().other_languages = e.value(),
                            }
                            Input {
                                label: "How did they hear about us?",
                                value: form.read().referral_source.clone(),
                                on_input: move |e: FormEvent| form.write().referral_source = e.value(),
                            }
                            Input {
                                label: "Comments",
                                value: form.read().comments.clone(),
                                on_input: move |e: FormEvent| form.write().comments = e.value(),
                            }
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
                        busy_label: "Saving…",
                        "{submit_label}"
                    }
                }
            }
        }
    }
}
