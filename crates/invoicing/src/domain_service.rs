//! Invoice aggregate construction.

use invoicer_core::{DomainResult, InvoiceItemPublicId, InvoicePublicId};
use invoicer_customers::CustomerDomainService;

use crate::invoice::{CreateInvoiceRequest, Invoice, InvoiceItem};
use crate::validation;

/// Currency applied when a creation request omits one.
pub const DEFAULT_CURRENCY: &str = "EUR";

/// Validates creation requests and turns them into `Invoice` aggregates.
#[derive(Debug, Clone)]
pub struct InvoiceDomainService {
    customers: CustomerDomainService,
    default_currency: String,
}

impl Default for InvoiceDomainService {
    fn default() -> Self {
        Self::new(CustomerDomainService::new())
    }
}

impl InvoiceDomainService {
    pub fn new(customers: CustomerDomainService) -> Self {
        Self {
            customers,
            default_currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    /// Override the currency used for requests that carry none.
    pub fn with_default_currency(mut self, currency: impl Into<String>) -> Self {
        self.default_currency = currency.into();
        self
    }

    pub fn default_currency(&self) -> &str {
        &self.default_currency
    }

    pub fn validate(&self, request: &CreateInvoiceRequest) -> DomainResult<()> {
        validation::validate(request)
    }

    /// Validate `request` and build a not-yet-persisted invoice.
    ///
    /// Assigns fresh public ids to the invoice, every item, the customer and
    /// (when present) the address. Nothing is built when validation fails.
    pub fn build(&self, request: CreateInvoiceRequest) -> DomainResult<Invoice> {
        self.validate(&request)?;

        let items = request
            .items
            .into_iter()
            .map(|item| InvoiceItem {
                public_id: InvoiceItemPublicId::generate(),
                description: item.description,
                quantity: item.quantity,
                unit_price: item.unit_price,
                total: item.total,
            })
            .collect();

        Ok(Invoice {
            id: None,
            public_id: InvoicePublicId::generate(),
            reference_id: request.reference_id,
            customer: self.customers.build(request.customer),
            number: request.number,
            issue_date: request.issue_date,
            due_date: request.due_date,
            items,
            subtotal: request.subtotal,
            tax: request.tax,
            total: request.total,
            currency: request
                .currency
                .unwrap_or_else(|| self.default_currency.clone()),
            status: request.status,
            notes: request.notes,
        })
    }
}
