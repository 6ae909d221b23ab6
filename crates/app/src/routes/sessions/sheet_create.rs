use chrono::Datelike;
use dioxus::prelude::*;
use shared_types::{AppError, CreateSheetRequest, Month};
use shared_ui::{
    use_toast, Button, ButtonVariant, Card, CardContent, FormSelect, Input, PageHeader,
    PageSubtitle, PageTitle, ToastOptions,
};
use std::collections::HashMap;

use crate::format_helpers::parse_count;
use crate::routes::Route;

fn build_request(month: &str, year: &str) -> Result<CreateSheetRequest, HashMap<String, String>> {
    let mut errors = HashMap::new();
    let month = month.parse::<u32>().ok().and_then(Month::new);
    if month.is_none() {
        errors.insert("month".to_string(), "Select a month".to_string());
    }
    let year = parse_count(year).and_then(|y| i32::try_from(y).ok());
    if year.is_none() {
        errors.insert("year".to_string(), "Enter a year".to_string());
    }
    match (month, year) {
        (Some(month), Some(year)) => Ok(CreateSheetRequest { month, year }),
        _ => Err(errors),
    }
}

#[component]
pub fn SheetCreatePage(session_id: i64) -> Element {
    let toast = use_toast();
    let today = chrono::Local::now().date_naive();
    let mut month = use_signal(move || today.month().to_string());
    let mut year = use_signal(move || today.year().to_string());
    let mut errors = use_signal(HashMap::<String, String>::new);
    let mut saving = use_signal(|| false);

    let month_options: Vec<(String, String)> = Month::all()
        .map(|m| (m.number().to_string(), m.name().to_string()))
        .collect();

    let handle_submit = move |evt: FormEvent| async move {
        evt.prevent_default();
        errors.set(HashMap::new());

        let body = match build_request(&month.read(), &year.read()) {
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
        match server::api::create_sheet(session_id, body).await {
            Ok(sheet_id) => {
                toast.success("Attendance sheet created".to_string(), ToastOptions::new());
                navigator().push(Route::AttendanceSheet { id: session_id, sheet_id });
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
        div { class: "container",
            PageHeader {
                PageTitle { "New attendance sheet" }
                PageSubtitle { "Every enrolled student starts absent on each day of the month." }
            }

            Card {
                CardContent {
                    form { onsubmit: handle_submit,
                        div { class: "form-grid",
                            FormSelect {
                                label: "Month",
                                value: month(),
                                options: month_options,
                                error: errors.read().get("month").cloned(),
                                onchange: move |e: FormEvent| month.set(e.value()),
                            }
                            Input {
                                label: "Year",
                                input_type: "number",
                                value: year(),
                                error: errors.read().get("year").cloned(),
                                on_input: move |e: FormEvent| year.set(e.value()),
                            }
                        }
                        div { class: "form-actions",
                            Link { to: Route::SessionDetail { id: session_id },
                                Button { variant: ButtonVariant::Ghost, "Cancel" }
                            }
                            Button {
                                variant: ButtonVariant::Primary,
                                button_type: "submit",
                                busy: saving(),
                                "Create sheet"
                            }
                        }
                    }
                }
            }
        }
    }
}
