use dioxus::prelude::*;

/// Vertical list of label/value rows for a record's detail page.
#[component]
pub fn DetailList(children: Element) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        dl { class: "detail-list", {children} }
    }
}

/// One label/value row inside a `DetailList`.
///
/// Pass `value` for plain text, or children for rich content such as badges.
/// An empty `value` without children renders a dash.
#[component]
pub fn DetailItem(
    label: &'static str,
    #[props(default)] value: String,
    children: Element,
) -> Element {
    let has_children = children != Ok(VNode::placeholder());

    rsx! {
        div { class: "detail-item",
            dt { class: "detail-item-label", "{label}" }
            dd { class: "detail-item-value",
                if has_children {
                    {children}
                } else if value.is_empty() {
                    span { class: "detail-item-missing", "–" }
                } else {
                    span { "{value}" }
                }
            }
        }
    }
}

/// Responsive grid of cards on a detail page.
#[component]
pub fn DetailGrid(children: Element) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "detail-grid", {children} }
    }
}
