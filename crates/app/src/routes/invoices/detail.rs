use dioxus::prelude::*;
use shared_types::{format_chf, AppError, Invoice, InvoiceLine};
use shared_ui::{
    use_toast, Badge, BadgeVariant, Button, ButtonVariant, Card, CardContent, CardHeader,
    CardTitle, ConfirmDialog, DataTable, DataTableBody, DataTableCell, DataTableColumn, DataTableEmpty, DataTableHeader,
    DataTableRow, ErrorCard, PageActions, PageHeader, PageSubtitle, PageTitle, SkeletonRows,
    ToastOptions,
};

use crate::format_helpers::{format_date, format_optional_date};
use crate::routes::Route;

#[component]
pub fn InvoiceDetailPage(id: i64) -> Element {
    let mut detail = use_resource(move || async move { server::api::get_invoice_detail(id).await });

    rsx! {
        div { class: "container",
            match &*detail.read() {
                Some(Ok(d)) => rsx! {
                    InvoiceHeader { invoice: d.invoice.clone() }
                    Card {
                        CardHeader { CardTitle { "Lines" } }
                        CardContent {
                            LineTable { lines: d.lines.clone() }
                            div { class: "invoice-totals",
                                span { "Total {format_chf(d.invoice.total)}" }
                                span { "Paid {format_chf(d.invoice.amount_paid())}" }
                                strong { "Remaining {format_chf(d.invoice.remaining)}" }
                            }
                        }
                    }
                },
                Some(Err(e)) => rsx! {
                    ErrorCard {
                        message: AppError::friendly_message(&e.to_string()),
                        on_retry: move |_| detail.restart(),
                    }
                },
                None => rsx! { SkeletonRows { rows: 6 } },
            }
        }
    }
}

#[component]
fn InvoiceHeader(invoice: Invoice) -> Element {
    let id = invoice.id;
    let toast = use_toast();
    let mut confirm_delete = use_signal(|| false);

    let handle_delete = move |_| {
        spawn(async move {
            match server::api::delete_invoice(id).await {
                Ok(()) => {
                    toast.success(format!("Invoice #{id} deleted"), ToastOptions::new());
                    navigator().push(Route::InvoiceList {});
                }
                Err(e) => {
                    toast.error(AppError::friendly_message(&e.to_string()), ToastOptions::new());
                }
            }
        });
    };

    rsx! {
        PageHeader {
            PageTitle {
                "Invoice #{invoice.id} "
                if invoice.is_paid() {
                    Badge { variant: BadgeVariant::Success, "Paid" }
                } else {
                    Badge { variant: BadgeVariant::Warning, "Open" }
                }
            }
            PageSubtitle {
                "{invoice.student_last_name} {invoice.student_first_name} · issued {format_date(invoice.issued_on)}"
            }
            PageActions {
                Link { to: Route::InvoiceList {},
                    Button { variant: ButtonVariant::Ghost, "Back" }
                }
                Button {
                    variant: ButtonVariant::Destructive,
                    onclick: move |_| confirm_delete.set(true),
                    "Delete"
                }
                if !invoice.is_paid() {
                    Link { to: Route::InvoicePay { id },
                        Button { variant: ButtonVariant::Primary, "Record payment" }
                    }
                }
            }
        }

        ConfirmDialog {
            open: confirm_delete,
            title: "Delete this invoice?",
            description: "Its lines and recorded payments are deleted with it.",
            confirm_label: "Delete",
            on_confirm: handle_delete,
        }
    }
}

#[component]
fn LineTable(lines: Vec<InvoiceLine>) -> Element {
    rsx! {
        DataTable {
            DataTableHeader {
                DataTableColumn { "Description" }
                DataTableColumn { "From" }
                DataTableColumn { "To" }
                DataTableColumn { numeric: true, "Amount" }
            }
            DataTableBody {
                if lines.is_empty() {
                    DataTableEmpty { colspan: 4, message: "This invoice has no lines" }
                }
                for line in lines {
                    DataTableRow {
                        DataTableCell { "{line.description}" }
                        DataTableCell { "{format_optional_date(line.period_start)}" }
                        DataTableCell { "{format_optional_date(line.period_end)}" }
                        DataTableCell { numeric: true, "{format_chf(line.amount)}" }
                    }
                }
            }
        }
    }
}
