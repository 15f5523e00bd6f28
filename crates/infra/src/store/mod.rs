//! Storage adapters implementing the customer, invoice and transaction ports.

mod in_memory;
mod postgres;

pub use in_memory::{InMemoryStore, InMemoryTx};
pub use postgres::PostgresStore;
