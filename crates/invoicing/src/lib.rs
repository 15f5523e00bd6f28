//! Invoicing domain module.
//!
//! This crate contains business rules for invoices: financial/date invariant
//! validation, aggregate construction with public identifiers, the query
//! filter contract, and the storage port. Everything here is deterministic
//! domain logic (no IO, no HTTP, no storage).

pub mod domain_service;
pub mod filters;
pub mod invoice;
pub mod store;
pub mod validation;

pub use domain_service::{DEFAULT_CURRENCY, InvoiceDomainService};
pub use filters::{DateCriterion, InvoiceCriteria, InvoiceFilters};
pub use invoice::{
    CreateInvoiceItemRequest, CreateInvoiceRequest, Invoice, InvoiceItem, InvoiceStatus,
};
pub use store::InvoiceStore;

#[cfg(test)]
mod test_support;
