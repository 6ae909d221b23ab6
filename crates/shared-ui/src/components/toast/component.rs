use dioxus::prelude::*;
use dioxus_primitives::toast as prim;

pub use dioxus_primitives::toast::{use_toast, ToastOptions};

/// Screen corner the save and error notices stack in.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum NoticePlacement {
    #[default]
    BottomRight,
    /// Above the page content, used on narrow screens where the bottom
    /// corner hides the form actions.
    TopCenter,
}

impl NoticePlacement {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            NoticePlacement::BottomRight => "bottom-right",
            NoticePlacement::TopCenter => "top-center",
        }
    }
}

/// Hosts the notice stack used for save results and backend errors.
#[component]
pub fn ToastProvider(#[props(default)] placement: NoticePlacement, children: Element) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "notice-region", "data-placement": placement.as_str(),
            prim::ToastProvider { {children} }
        }
    }
}
