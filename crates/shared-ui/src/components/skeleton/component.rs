use dioxus::prelude::*;

/// One shimmering placeholder bar. `width` and `height` are CSS lengths.
#[component]
pub fn Skeleton(
    #[props(default = "100%".to_string())] width: String,
    #[props(default = "1rem".to_string())] height: String,
) -> Element {
    rsx! {
        span { class: "placeholder-bar", style: "width: {width}; height: {height};" }
    }
}

/// Stand-in for a list table while it loads. The first column is drawn
/// wider, like the name column on every console list.
#[component]
pub fn SkeletonRows(#[props(default = 5)] rows: usize, #[props(default = 4)] columns: usize) -> Element {
    let template = format!("grid-template-columns: 2fr repeat({}, 1fr);", columns.saturating_sub(1).max(1));

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div {
            class: "placeholder-table",
            role: "status",
            "aria-busy": "true",
            "aria-label": "Loading",
            for row in 0..rows {
                div { key: "{row}", class: "placeholder-row", style: "{template}",
                    for col in 0..columns.max(1) {
                        Skeleton { key: "{col}", height: "1.25rem" }
                    }
                }
            }
        }
    }
}

/// Outlines of the dashboard stat cards while the counts load.
#[component]
pub fn SkeletonCards(#[props(default = 3)] count: usize) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "stat-grid", role: "status", "aria-busy": "true", "aria-label": "Loading",
            for i in 0..count {
                div { key: "{i}", class: "placeholder-card",
                    Skeleton { width: "45%", height: "0.8rem" }
                    Skeleton { width: "30%", height: "1.8rem" }
                }
            }
        }
    }
}
