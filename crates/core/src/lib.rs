//! `invoicer-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the customer and
//! invoicing modules (errors, identifiers, pagination) plus the unit-of-work
//! contract the application layer composes storage calls with.

pub mod error;
pub mod id;
pub mod pagination;
pub mod transaction;

pub use error::{DomainError, DomainResult, StoreError, StoreResult};
pub use id::{
    AddressPublicId, CustomerId, CustomerPublicId, InvoiceId, InvoiceItemPublicId,
    InvoicePublicId,
};
pub use pagination::{Page, PaginationParameters, DEFAULT_PAGE, DEFAULT_PAGE_LIMIT};
pub use transaction::{BoxFuture, TransactionPort};
