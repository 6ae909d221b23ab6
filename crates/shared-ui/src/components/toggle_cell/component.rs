use dioxus::prelude::*;

/// Table cell holding a two-state toggle button.
///
/// `pressed` drives `aria-pressed`; `dirty` flags a value that differs from
/// what the server last stored. The cell renders whatever mark the caller
/// passes as children.
#[component]
pub fn ToggleCell(
    pressed: bool,
    #[props(default = false)] dirty: bool,
    #[props(default = false)] disabled: bool,
    title: String,
    onclick: EventHandler<()>,
    children: Element,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        td { class: "toggle-cell",
            button {
                r#type: "button",
                class: "toggle-cell-button",
                title: "{title}",
                "aria-label": "{title}",
                "aria-pressed": if pressed { "true" } else { "false" },
                "data-dirty": if dirty { "true" } else { "false" },
                disabled: disabled,
                onclick: move |_| onclick.call(()),
                {children}
            }
        }
    }
}
