use shared_types::{
    normalize_pagination, AppError, Invoice, InvoiceDetail, InvoiceFilter, InvoiceLine, InvoicePage,
    InvoiceRequest, PaymentRequest,
};

use super::SchoolApi;

impl SchoolApi {
    #[tracing::instrument(skip(self))]
    pub async fn list_invoices(
        &self,
        filter: InvoiceFilter,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> Result<InvoicePage, AppError> {
        let (page, limit) = normalize_pagination(page, limit);
        self.get_json(
            filter.path(),
            &[("page", page.to_string()), ("taille", limit.to_string())],
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_invoice(&self, id: i64) -> Result<Invoice, AppError> {
        self.get(&format!("/factures/facture/{id}/")).await
    }

    /// Header and lines, fetched concurrently.
    #[tracing::instrument(skip(self))]
    pub async fn invoice_detail(&self, id: i64) -> Result<InvoiceDetail, AppError> {
        let lines_path = format!("/factures/facture/{id}/details/");
        let (invoice, lines) = tokio::try_join!(
            self.get_invoice(id),
            self.get::<Vec<InvoiceLine>>(&lines_path)
        )?;
        Ok(InvoiceDetail { invoice, lines })
    }

    /// Record a payment after checking it against the current balance.
    #[tracing::instrument(skip(self, req), fields(invoice_id = req.invoice_id))]
    pub async fn record_payment(&self, req: PaymentRequest) -> Result<i64, AppError> {
        let invoice = self.get_invoice(req.invoice_id).await?;
        let req = req.checked(invoice.remaining)?;
        let id = self.create("/factures/paiement/", &req).await?;
        tracing::info!(invoice_id = req.invoice_id, payment_id = id, mode = %req.mode, "Payment recorded");
        Ok(id)
    }

    #[tracing::instrument(skip(self, req))]
    pub async fn create_invoice(&self, req: &InvoiceRequest) -> Result<i64, AppError> {
        req.check()?;
        let id = self.create("/factures/facture/", req).await?;
        tracing::info!(invoice_id = id, lines = req.lines.len(), total = req.total(), "Invoice created");
        Ok(id)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_invoice(&self, id: i64) -> Result<(), AppError> {
        self.delete(&format!("/factures/facture/{id}/")).await?;
        tracing::info!(invoice_id = id, "Invoice deleted");
        Ok(())
    }
}
