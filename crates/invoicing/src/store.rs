use invoicer_core::{InvoicePublicId, Page, PaginationParameters, StoreResult};

use crate::filters::InvoiceCriteria;
use crate::invoice::Invoice;

/// Invoice storage port.
///
/// Listings are ordered by storage id ascending and windowed by
/// `PaginationParameters`. Reads accept an optional transaction so they can
/// observe writes staged earlier in the same unit of work.
#[async_trait::async_trait]
pub trait InvoiceStore: Send + Sync {
    type Tx: Send;

    /// Persist a domain-built invoice and its items.
    ///
    /// The embedded customer must already carry a storage id; the stored
    /// invoice references it.
    async fn create(&self, invoice: Invoice, tx: &mut Self::Tx) -> StoreResult<Invoice>;

    async fn get_by_public_id(
        &self,
        public_id: &InvoicePublicId,
        tx: Option<&mut Self::Tx>,
    ) -> StoreResult<Option<Invoice>>;

    /// First invoice (lowest storage id) carrying `reference_id`.
    async fn get_by_reference_id(
        &self,
        reference_id: &str,
        tx: Option<&mut Self::Tx>,
    ) -> StoreResult<Option<Invoice>>;

    /// Invoices whose customer name equals `name` exactly.
    async fn get_by_customer_name(
        &self,
        name: &str,
        criteria: &InvoiceCriteria,
        pagination: PaginationParameters,
        tx: Option<&mut Self::Tx>,
    ) -> StoreResult<Page<Invoice>>;

    async fn get_with_filters(
        &self,
        criteria: &InvoiceCriteria,
        pagination: PaginationParameters,
        tx: Option<&mut Self::Tx>,
    ) -> StoreResult<Page<Invoice>>;
}
