//! Unit-of-work boundary consumed by the application layer.

use core::future::Future;
use core::pin::Pin;

use crate::error::StoreError;

/// Boxed, sendable future borrowed for `'a` (the transaction handle's lifetime).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Atomic execution contract.
///
/// `execute` opens a unit of work, hands its handle to `work`, and then:
/// - commits when `work` returns `Ok`,
/// - rolls back every write made through the handle when `work` returns `Err`.
///
/// The handle is passed explicitly to each storage call inside the unit of
/// work (storage ports share the same `Tx` type); there is no implicit or
/// thread-local transaction.
///
/// Begin/commit failures surface as `E` through `From<StoreError>`.
#[async_trait::async_trait]
pub trait TransactionPort: Send + Sync {
    /// Transaction handle threaded through the storage ports.
    type Tx: Send;

    async fn execute<T, E, F>(&self, work: F) -> Result<T, E>
    where
        T: Send,
        E: From<StoreError> + Send,
        F: for<'t> FnOnce(&'t mut Self::Tx) -> BoxFuture<'t, Result<T, E>> + Send;
}
