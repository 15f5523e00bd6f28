use invoicer_core::{CustomerId, CustomerPublicId, StoreResult};

use crate::customer::Customer;

/// Customer storage port.
///
/// Writes always run inside a unit of work (`tx`); reads may run inside one or
/// against committed state (`None`).
#[async_trait::async_trait]
pub trait CustomerStore: Send + Sync {
    /// Transaction handle shared with the `TransactionPort` this store is used with.
    type Tx: Send;

    /// Persist a domain-built customer (and its address) and return it with
    /// the storage id assigned.
    async fn create(&self, customer: Customer, tx: &mut Self::Tx) -> StoreResult<Customer>;

    async fn get_by_id(
        &self,
        id: CustomerId,
        tx: Option<&mut Self::Tx>,
    ) -> StoreResult<Option<Customer>>;

    async fn get_by_public_id(
        &self,
        public_id: &CustomerPublicId,
        tx: Option<&mut Self::Tx>,
    ) -> StoreResult<Option<Customer>>;
}
