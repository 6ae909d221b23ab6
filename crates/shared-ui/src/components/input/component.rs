use dioxus::prelude::*;

/// Form field: caption, control and one note line underneath.
///
/// The `<label>` wraps the control so no `id`/`for` pair is needed. When both
/// are set, `error` takes the note line and `hint` is hidden until the field
/// is valid again.
#[component]
pub fn Input(
    #[props(default)] value: String,
    #[props(default)] on_input: EventHandler<FormEvent>,
    #[props(default)] placeholder: String,
    #[props(default)] label: String,
    #[props(default = "text".to_string())] input_type: String,
    #[props(default)] error: Option<String>,
    #[props(default)] hint: Option<String>,
    #[props(default = false)] disabled: bool,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
) -> Element {
    let base = vec![Attribute::new("class", "field-control", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    let note = match (&error, &hint) {
        (Some(message), _) => Some(("field-error", "alert", message.clone())),
        (None, Some(text)) => Some(("field-hint", "note", text.clone())),
        (None, None) => None,
    };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        label { class: "field", "data-invalid": if error.is_some() { "true" } else { "false" },
            if !label.is_empty() {
                span { class: "field-label", "{label}" }
            }
            input {
                r#type: "{input_type}",
                value: value,
                placeholder: placeholder,
                disabled: disabled,
                "aria-invalid": if error.is_some() { "true" } else { "false" },
                oninput: move |evt| on_input.call(evt),
                ..merged,
            }
            if let Some((class, role, text)) = note {
                p { class: class, role: role, "{text}" }
            }
        }
    }
}

/// Checkbox with its caption on the right, for yes/no flags on a form.
#[component]
pub fn CheckboxField(
    label: String,
    checked: bool,
    #[props(default)] on_change: EventHandler<bool>,
    #[props(default = false)] disabled: bool,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        label { class: "field field-check",
            input {
                r#type: "checkbox",
                checked: checked,
                disabled: disabled,
                onchange: move |evt: FormEvent| on_change.call(evt.checked()),
            }
            span { class: "field-label", "{label}" }
        }
    }
}
