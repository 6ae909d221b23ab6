use dioxus::prelude::*;
use shared_types::{format_chf, AppError, ConsoleSettings, InvoiceFilter, InvoiceSummary};
use shared_ui::{
    Badge, BadgeVariant, Button, ButtonVariant, DataTable, DataTableBody, DataTableCell,
    DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow, ErrorCard, PageHeader,
    PageTitle, Pagination, SkeletonRows,
};

use crate::format_helpers::format_date;
use crate::routes::Route;

#[component]
pub fn InvoiceListPage() -> Element {
    let settings = use_context::<ConsoleSettings>();
    let page_size = settings.page_size;

    let mut filter = use_signal(InvoiceFilter::default);
    let mut page = use_signal(|| 1i64);

    let mut data = use_resource(move || {
        let current = *filter.read();
        let p = *page.read();
        async move { server::api::list_invoices(current, Some(p), Some(page_size)).await }
    });

    rsx! {
        div { class: "container",
            PageHeader {
                PageTitle { "Invoices" }
            }

            div { class: "tabs", role: "tablist",
                for f in InvoiceFilter::ALL {
                    Button {
                        variant: if filter() == f { ButtonVariant::Primary } else { ButtonVariant::Ghost },
                        onclick: move |_| {
                            filter.set(f);
                            page.set(1);
                        },
                        "{f.label()}"
                    }
                }
            }

            match &*data.read() {
                Some(Ok(resp)) => rsx! {
                    InvoiceTable { invoices: resp.data.clone() }
                    Pagination { total: resp.meta.total, page: page, page_size: page_size }
                },
                Some(Err(e)) => rsx! {
                    ErrorCard {
                        message: AppError::friendly_message(&e.to_string()),
                        on_retry: move |_| data.restart(),
                    }
                },
                None => rsx! { SkeletonRows { rows: 6 } },
            }
        }
    }
}

#[component]
fn InvoiceTable(invoices: Vec<InvoiceSummary>) -> Element {
    rsx! {
        DataTable {
            DataTableHeader {
                DataTableColumn { "Invoice" }
                DataTableColumn { "Issued" }
                DataTableColumn { numeric: true, "Total" }
                DataTableColumn { numeric: true, "Remaining" }
                DataTableColumn { "Status" }
            }
            DataTableBody {
                if invoices.is_empty() {
                    DataTableEmpty { colspan: 5, message: "No invoices" }
                }
                for invoice in invoices {
                    DataTableRow {
                        onclick: move |_| {
                            navigator().push(Route::InvoiceDetail { id: invoice.id });
                        },
                        DataTableCell { "#{invoice.id}" }
                        DataTableCell { "{format_date(invoice.issued_on)}" }
                        DataTableCell { numeric: true, "{format_chf(invoice.total)}" }
                        DataTableCell { numeric: true, "{format_chf(invoice.remaining)}" }
                        DataTableCell {
                            if invoice.is_paid() {
                                Badge { variant: BadgeVariant::Success, dot: true, "Paid" }
                            } else {
                                Badge { variant: BadgeVariant::Warning, dot: true, "Open" }
                            }
                        }
                    }
                }
            }
        }
    }
}
