use dioxus::prelude::*;
use shared_types::{
    InvoiceDetail, InvoiceFilter, InvoiceRequest, InvoiceSummary, PaginatedResponse,
    PaymentRequest,
};

#[cfg(feature = "server")]
use crate::error_convert::{AppErrorExt, ValidateRequest};

#[cfg(feature = "server")]
use super::auth::*;

// ── Invoice Server Functions ───────────────────────────

#[server]
pub async fn list_invoices(
    filter: InvoiceFilter,
    page: Option<i64>,
    limit: Option<i64>,
) -> Result<PaginatedResponse<InvoiceSummary>, ServerFnError> {
    use shared_types::normalize_pagination;

    let (page, limit) = normalize_pagination(page, limit);
    let result = school()?
        .list_invoices(filter, Some(page), Some(limit))
        .await
        .map_err(forward)?;
    Ok(PaginatedResponse::new(result.invoices, page, limit, result.total))
}

#[server]
pub async fn get_invoice_detail(id: i64) -> Result<InvoiceDetail, ServerFnError> {
    school()?.invoice_detail(id).await.map_err(forward)
}

/// Record a payment against an invoice. The amount is checked against the
/// balance the backend reports right now, not the one the form was opened with.
#[server]
pub async fn record_payment(body: PaymentRequest) -> Result<i64, ServerFnError> {
    body.validate_request()
        .map_err(|e| e.into_server_fn_error())?;

    school()?.record_payment(body).await.map_err(forward)
}

#[server]
pub async fn create_invoice(body: InvoiceRequest) -> Result<i64, ServerFnError> {
    school()?.create_invoice(&body).await.map_err(forward)
}

#[server]
pub async fn delete_invoice(id: i64) -> Result<(), ServerFnError> {
    school()?.delete_invoice(id).await.map_err(forward)
}
