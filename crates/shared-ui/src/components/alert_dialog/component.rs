use dioxus::prelude::*;
use dioxus_primitives::alert_dialog as prim;

#[component]
pub fn AlertDialogRoot(mut props: prim::AlertDialogRootProps) -> Element {
    props
        .attributes
        .push(Attribute::new("class", "alert-dialog-overlay", None, false));

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        prim::AlertDialogRoot { ..props }
    }
}

#[component]
pub fn AlertDialogContent(mut props: prim::AlertDialogContentProps) -> Element {
    if props.class.is_none() {
        props.class = Some("alert-dialog-content".to_string());
    }

    rsx! {
        prim::AlertDialogContent { ..props }
    }
}

#[component]
pub fn AlertDialogTitle(mut props: prim::AlertDialogTitleProps) -> Element {
    props
        .attributes
        .push(Attribute::new("class", "alert-dialog-title", None, false));

    rsx! {
        prim::AlertDialogTitle { ..props }
    }
}

#[component]
pub fn AlertDialogDescription(mut props: prim::AlertDialogDescriptionProps) -> Element {
    props
        .attributes
        .push(Attribute::new("class", "alert-dialog-description", None, false));

    rsx! {
        prim::AlertDialogDescription { ..props }
    }
}

#[component]
pub fn AlertDialogActions(mut props: prim::AlertDialogActionsProps) -> Element {
    props
        .attributes
        .push(Attribute::new("class", "alert-dialog-actions", None, false));

    rsx! {
        prim::AlertDialogActions { ..props }
    }
}

#[component]
pub fn AlertDialogAction(mut props: prim::AlertDialogActionProps) -> Element {
    props
        .attributes
        .push(Attribute::new("class", "alert-dialog-action", None, false));

    rsx! {
        prim::AlertDialogAction { ..props }
    }
}

#[component]
pub fn AlertDialogCancel(mut props: prim::AlertDialogCancelProps) -> Element {
    props
        .attributes
        .push(Attribute::new("class", "alert-dialog-cancel", None, false));

    rsx! {
        prim::AlertDialogCancel { ..props }
    }
}

/// Yes/no confirmation used before deleting a sheet or discarding unsaved
/// attendance edits. Closing by any route sets `open` back to false.
#[component]
pub fn ConfirmDialog(
    open: Signal<bool>,
    title: String,
    description: String,
    #[props(default = "Confirm".to_string())] confirm_label: String,
    #[props(default = "Cancel".to_string())] cancel_label: String,
    on_confirm: EventHandler<()>,
) -> Element {
    let mut open = open;

    rsx! {
        AlertDialogRoot {
            open: open(),
            on_open_change: move |v: bool| open.set(v),
            AlertDialogContent {
                AlertDialogTitle { "{title}" }
                AlertDialogDescription { "{description}" }
                AlertDialogActions {
                    AlertDialogCancel { "{cancel_label}" }
                    AlertDialogAction {
                        on_click: move |_| {
                            open.set(false);
                            on_confirm.call(());
                        },
                        "{confirm_label}"
                    }
                }
            }
        }
    }
}
