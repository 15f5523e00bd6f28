//! Customers domain module.
//!
//! Business rules for customers billed by invoices, implemented as
//! deterministic domain logic (no IO), plus the storage port that adapters
//! implement.

pub mod customer;
pub mod domain_service;
pub mod store;

pub use customer::{Address, CreateAddressRequest, CreateCustomerRequest, Customer};
pub use domain_service::CustomerDomainService;
pub use store::CustomerStore;
