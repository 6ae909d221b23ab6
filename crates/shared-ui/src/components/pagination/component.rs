use dioxus::prelude::*;

use crate::components::button::{Button, ButtonVariant};

/// Number of pages needed for `total` items. Never less than one.
pub fn page_count(total: i64, page_size: i64) -> i64 {
    if page_size <= 0 || total <= 0 {
        return 1;
    }
    (total + page_size - 1) / page_size
}

/// Previous/Next controls over a 1-based `page` signal.
///
/// The school API pages by number, so callers keep the page rather than an
/// offset and pass it straight through as the `page` query parameter.
#[component]
pub fn Pagination(total: i64, page: Signal<i64>, page_size: i64) -> Element {
    let mut page = page;
    let current = (*page.read()).max(1);
    let pages = page_count(total, page_size);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        nav { class: "pagination", "aria-label": "Pagination",
            Button {
                variant: ButtonVariant::Outline,
                disabled: current <= 1,
                onclick: move |_| {
                    let now = *page.read();
                    page.set((now - 1).max(1));
                },
                "Previous"
            }
            span { class: "pagination-info", "Page {current} of {pages} ({total} total)" }
            Button {
                variant: ButtonVariant::Outline,
                disabled: current >= pages,
                onclick: move |_| {
                    let now = *page.read();
                    page.set((now + 1).min(pages));
                },
                "Next"
            }
        }
    }
}
