//! Infrastructure layer: application service, storage adapters, config.

pub mod config;
pub mod invoice_service;
pub mod store;

pub use config::{AppConfig, ConfigError};
pub use invoice_service::{InvoiceService, ServiceError, ServiceResult};
pub use store::{InMemoryStore, InMemoryTx, PostgresStore};

/// Application service wired to the in-memory adapter.
pub type InMemoryInvoiceService = InvoiceService<InMemoryStore, InMemoryStore, InMemoryStore>;

/// Application service wired to the Postgres adapter.
pub type PostgresInvoiceService = InvoiceService<PostgresStore, PostgresStore, PostgresStore>;

#[cfg(test)]
mod integration_tests;

#[cfg(test)]
mod test_support;
