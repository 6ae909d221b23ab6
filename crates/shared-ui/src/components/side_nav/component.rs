use dioxus::prelude::*;

/// Whether the navigation rail is expanded. Provided by `SideNavProvider`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideNavState {
    pub open: bool,
}

/// Holds the rail state and lays out the rail next to the page.
#[component]
pub fn SideNavProvider(#[props(default = true)] default_open: bool, children: Element) -> Element {
    let state = use_signal(|| SideNavState { open: default_open });
    use_context_provider(|| state);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div {
            class: "side-nav-shell",
            "data-open": if state().open { "true" } else { "false" },
            {children}
        }
    }
}

fn use_side_nav() -> Signal<SideNavState> {
    use_context::<Signal<SideNavState>>()
}

/// The rail itself. On narrow screens an open rail overlays the page and a
/// tap on the backdrop closes it.
#[component]
pub fn SideNav(children: Element) -> Element {
    let mut state = use_side_nav();
    let open = state().open;

    rsx! {
        if open {
            div {
                class: "side-nav-backdrop",
                onclick: move |_| state.set(SideNavState { open: false }),
            }
        }
        aside {
            class: "side-nav",
            "data-state": if open { "open" } else { "closed" },
            {children}
        }
    }
}

#[component]
pub fn SideNavBrand(children: Element) -> Element {
    rsx! {
        div { class: "side-nav-brand", {children} }
    }
}

/// Labelled block of links.
#[component]
pub fn SideNavGroup(label: String, children: Element) -> Element {
    rsx! {
        div { class: "side-nav-group",
            span { class: "side-nav-group-label", "{label}" }
            ul { class: "side-nav-list", {children} }
        }
    }
}

/// One entry. Wrap it in the app's router `Link`; `active` highlights the
/// entry for the current section.
#[component]
pub fn SideNavItem(#[props(default = false)] active: bool, children: Element) -> Element {
    rsx! {
        li {
            class: "side-nav-item",
            "data-active": if active { "true" } else { "false" },
            {children}
        }
    }
}

#[component]
pub fn SideNavFooter(children: Element) -> Element {
    rsx! {
        div { class: "side-nav-footer", {children} }
    }
}

/// Button that opens or closes the rail.
#[component]
pub fn SideNavToggle(children: Element) -> Element {
    let mut state = use_side_nav();

    rsx! {
        button {
            class: "side-nav-toggle",
            r#type: "button",
            "aria-label": "Toggle navigation",
            onclick: move |_| {
                let open = state().open;
                state.set(SideNavState { open: !open });
            },
            {children}
        }
    }
}

/// Page area to the right of the rail.
#[component]
pub fn SideNavInset(children: Element) -> Element {
    rsx! {
        main { class: "side-nav-inset", {children} }
    }
}
