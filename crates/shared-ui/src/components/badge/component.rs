use dioxus::prelude::*;

/// Colour family of a status pill.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BadgeVariant {
    #[default]
    Primary,
    Secondary,
    /// Settled states: paid invoices, present marks.
    Success,
    /// Needs attention: unsaved cells, partially paid invoices.
    Warning,
    Destructive,
    Outline,
}

impl BadgeVariant {
    fn tone(&self) -> &'static str {
        match self {
            BadgeVariant::Primary => "info",
            BadgeVariant::Secondary => "neutral",
            BadgeVariant::Success => "ok",
            BadgeVariant::Warning => "attention",
            BadgeVariant::Destructive => "danger",
            BadgeVariant::Outline => "plain",
        }
    }
}

/// Status pill. `dot` adds a leading colour dot for states that are read at
/// a glance down a column, such as invoice status.
#[component]
pub fn Badge(
    #[props(default)] variant: BadgeVariant,
    #[props(default = false)] dot: bool,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let base = vec![
        Attribute::new("class", "pill", None, false),
        Attribute::new("data-tone", variant.tone(), None, false),
    ];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        span {
            ..merged,
            if dot {
                span { class: "pill-dot", "aria-hidden": "true" }
            }
            {children}
        }
    }
}
