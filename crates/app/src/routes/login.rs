use crate::auth::use_auth;
use crate::routes::Route;
use dioxus::prelude::*;
use shared_types::AppError;
use shared_ui::{Button, ButtonVariant, Card, CardContent, CardDescription, CardHeader, CardTitle, Input};
use std::collections::HashMap;

/// Sign-in with the school's staff password.
#[component]
pub fn Login() -> Element {
    let auth = use_auth();
    let mut password = use_signal(String::new);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut loading = use_signal(|| false);

    if auth.is_authenticated() {
        navigator().push(Route::Dashboard {});
    }

    let handle_login = move |evt: FormEvent| async move {
        evt.prevent_default();
        loading.set(true);
        error_msg.set(None);
        field_errors.set(HashMap::new());

        match auth.sign_in(password()).await {
            Ok(()) => {
                password.set(String::new());
                navigator().push(Route::Dashboard {});
            }
            Err(e) => {
                let err_str = e.to_string();
                let fe = AppError::parse_field_errors(&err_str);
                if fe.is_empty() {
                    error_msg.set(Some(AppError::friendly_message(&err_str)));
                } else {
                    field_errors.set(fe);
                }
            }
        }
        loading.set(false);
    };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./login.css") }

        div { class: "auth-page",
            Card {
                class: "auth-card",

                CardHeader {
                    CardTitle { "École console" }
                    CardDescription { "Enter the staff password to continue" }
                }

                CardContent {
                    if let Some(err) = error_msg() {
                        div { class: "auth-error", role: "alert", "{err}" }
                    }

                    form {
                        class: "auth-form",
                        onsubmit: handle_login,

                        Input {
                            label: "Password",
                            input_type: "password",
                            value: password(),
                            error: field_errors.read().get("password").cloned(),
                            on_input: move |e: FormEvent| password.set(e.value()),
                            placeholder: "Password",
                            autocomplete: "current-password",
                        }

                        Button {
                            variant: ButtonVariant::Primary,
                            button_type: "submit",
                            busy: loading(),
                            busy_label: "Signing in…",
                            disabled: password.read().is_empty(),
                            "Sign in"
                        }
                    }
                }
            }
        }
    }
}
