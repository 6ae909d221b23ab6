use dioxus::prelude::*;

/// Scrollable table wrapper.
#[component]
pub fn DataTable(
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let base = vec![Attribute::new("class", "data-table", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div {
            ..merged,
            table { {children} }
        }
    }
}

/// Wraps column headers in `thead > tr`.
#[component]
pub fn DataTableHeader(children: Element) -> Element {
    rsx! {
        thead {
            tr { {children} }
        }
    }
}

#[component]
pub fn DataTableBody(children: Element) -> Element {
    rsx! {
        tbody { {children} }
    }
}

/// Column header. `numeric` right-aligns the column.
#[component]
pub fn DataTableColumn(#[props(default = false)] numeric: bool, children: Element) -> Element {
    rsx! {
        th { class: if numeric { "numeric" } else { "" }, scope: "col", {children} }
    }
}

/// Table row, clickable when `onclick` is set.
#[component]
pub fn DataTableRow(
    #[props(default)] onclick: Option<EventHandler<MouseEvent>>,
    children: Element,
) -> Element {
    let has_click = onclick.is_some();
    rsx! {
        tr {
            class: if has_click { "data-table-row clickable" } else { "data-table-row" },
            onclick: move |evt| {
                if let Some(handler) = &onclick {
                    handler.call(evt);
                }
            },
            {children}
        }
    }
}

#[component]
pub fn DataTableCell(
    #[props(default = false)] numeric: bool,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let base = vec![Attribute::new(
        "class",
        if numeric { "numeric" } else { "" },
        None,
        false,
    )];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        td {
            ..merged,
            {children}
        }
    }
}

/// Single full-width row shown when a list has nothing to display.
#[component]
pub fn DataTableEmpty(colspan: usize, message: String) -> Element {
    rsx! {
        tr { class: "data-table-empty",
            td { colspan: "{colspan}", "{message}" }
        }
    }
}
