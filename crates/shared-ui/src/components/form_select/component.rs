use dioxus::prelude::*;

/// Native `<select>` for filters and form fields.
///
/// `options` holds `(value, label)` pairs, the same shape as the code tables
/// in `shared_types` (levels, payment modes, course types). A non-empty
/// `placeholder` adds a leading empty option. `error` shows under the field.
#[component]
pub fn FormSelect(
    #[props(default)] value: String,
    #[props(default)] onchange: Option<EventHandler<Event<FormData>>>,
    #[props(default)] label: String,
    #[props(default)] placeholder: String,
    #[props(default)] options: Vec<(String, String)>,
    #[props(default)] error: Option<String>,
    #[props(default = false)] disabled: bool,
    children: Element,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "form-select-wrapper",
            if !label.is_empty() {
                label { class: "form-select-label", "{label}" }
            }
            select {
                class: "form-select",
                value: value.clone(),
                disabled: disabled,
                "aria-invalid": if error.is_some() { "true" } else { "false" },
                onchange: move |evt| {
                    if let Some(handler) = &onchange {
                        handler.call(evt);
                    }
                },
                if !placeholder.is_empty() {
                    option { value: "", selected: value.is_empty(), "{placeholder}" }
                }
                for (code, text) in options.iter() {
                    option { key: "{code}", value: "{code}", selected: *code == value, "{text}" }
                }
                {children}
            }
            if let Some(message) = &error {
                span { class: "field-error", "{message}" }
            }
        }
    }
}

/// Turns a static code table into `FormSelect` options.
pub fn code_options(table: &[(&str, &str)]) -> Vec<(String, String)> {
    table
        .iter()
        .map(|(code, label)| (code.to_string(), label.to_string()))
        .collect()
}
