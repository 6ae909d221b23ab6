use dioxus::prelude::*;

/// Row of list filters: the search field, status selects, a clear button.
///
/// `pending` marks the row busy while a debounced search waits to settle.
/// `summary` is a short result line shown at the end of the row, e.g.
/// "124 students".
#[component]
pub fn FilterBar(
    #[props(default = false)] pending: bool,
    #[props(default)] summary: Option<String>,
    children: Element,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div {
            class: "filter-row",
            role: "search",
            "aria-busy": if pending { "true" } else { "false" },
            div { class: "filter-row-controls", {children} }
            if let Some(text) = summary {
                span { class: "filter-row-summary", "aria-live": "polite", "{text}" }
            }
        }
    }
}
