use dioxus::prelude::*;

/// Heading block of a console page. The top bar already carries the `<h1>`,
/// so the page title sits one level below it.
#[component]
pub fn PageHeader(children: Element) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        header { class: "console-page-head", {children} }
    }
}

#[component]
pub fn PageTitle(children: Element) -> Element {
    rsx! {
        h2 { class: "console-page-title", {children} }
    }
}

/// Muted line under the title, e.g. the session a sheet belongs to.
#[component]
pub fn PageSubtitle(children: Element) -> Element {
    rsx! {
        p { class: "console-page-lede", {children} }
    }
}

/// Buttons acting on the whole page: new, edit, delete.
#[component]
pub fn PageActions(children: Element) -> Element {
    rsx! {
        div { class: "console-page-tools", role: "toolbar", "aria-label": "Page actions", {children} }
    }
}
