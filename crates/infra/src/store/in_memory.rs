use std::collections::BTreeMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, Ordering};

use invoicer_core::{
    BoxFuture, CustomerId, CustomerPublicId, InvoiceId, InvoicePublicId, Page,
    PaginationParameters, StoreError, StoreResult, TransactionPort,
};
use invoicer_customers::{Customer, CustomerStore};
use invoicer_invoicing::{Invoice, InvoiceCriteria, InvoiceStore};

/// Writes staged by one unit of work.
///
/// Published to the shared state on commit, dropped on rollback.
#[derive(Debug, Default)]
pub struct InMemoryTx {
    customers: Vec<Customer>,
    invoices: Vec<Invoice>,
}

#[derive(Debug, Default)]
struct State {
    customers: BTreeMap<CustomerId, Customer>,
    invoices: BTreeMap<InvoiceId, Invoice>,
}

/// In-memory implementation of the customer, invoice and transaction ports.
///
/// Intended for tests/dev. Listings scan every invoice.
#[derive(Debug)]
pub struct InMemoryStore {
    state: RwLock<State>,
    next_customer_id: AtomicI64,
    next_invoice_id: AtomicI64,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self {
            state: RwLock::new(State::default()),
            next_customer_id: AtomicI64::new(1),
            next_invoice_id: AtomicI64::new(1),
        }
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of committed customers.
    pub fn customer_count(&self) -> StoreResult<usize> {
        Ok(self.read()?.customers.len())
    }

    /// Number of committed invoices.
    pub fn invoice_count(&self) -> StoreResult<usize> {
        Ok(self.read()?.invoices.len())
    }

    fn read(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, State>> {
        self.state
            .read()
            .map_err(|_| StoreError::backend("lock poisoned"))
    }

    fn commit(&self, tx: InMemoryTx) -> StoreResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|_| StoreError::Transaction("lock poisoned".to_string()))?;

        for customer in tx.customers {
            let id = customer
                .id
                .ok_or_else(|| StoreError::corrupt("staged customer without id"))?;
            state.customers.insert(id, customer);
        }
        for invoice in tx.invoices {
            let id = invoice
                .id
                .ok_or_else(|| StoreError::corrupt("staged invoice without id"))?;
            state.invoices.insert(id, invoice);
        }
        Ok(())
    }

    fn customer_exists(&self, id: CustomerId, tx: &InMemoryTx) -> StoreResult<bool> {
        if tx.customers.iter().any(|c| c.id == Some(id)) {
            return Ok(true);
        }
        Ok(self.read()?.customers.contains_key(&id))
    }

    fn invoice_public_id_taken(
        &self,
        public_id: &InvoicePublicId,
        tx: &InMemoryTx,
    ) -> StoreResult<bool> {
        if tx.invoices.iter().any(|i| &i.public_id == public_id) {
            return Ok(true);
        }
        Ok(self
            .read()?
            .invoices
            .values()
            .any(|i| &i.public_id == public_id))
    }

    /// Committed invoices plus those staged in `tx`, matching `predicate`,
    /// ordered by storage id.
    fn scan_invoices(
        &self,
        tx: Option<&InMemoryTx>,
        predicate: impl Fn(&Invoice) -> bool,
    ) -> StoreResult<Vec<Invoice>> {
        let mut matched: Vec<Invoice> = self
            .read()?
            .invoices
            .values()
            .filter(|invoice| predicate(invoice))
            .cloned()
            .collect();

        if let Some(tx) = tx {
            matched.extend(tx.invoices.iter().filter(|i| predicate(i)).cloned());
            matched.sort_by_key(|invoice| invoice.id);
        }
        Ok(matched)
    }

    fn find_customer(
        &self,
        tx: Option<&InMemoryTx>,
        predicate: impl Fn(&Customer) -> bool,
    ) -> StoreResult<Option<Customer>> {
        if let Some(found) = tx.and_then(|tx| tx.customers.iter().find(|c| predicate(c))) {
            return Ok(Some(found.clone()));
        }
        Ok(self
            .read()?
            .customers
            .values()
            .find(|c| predicate(c))
            .cloned())
    }
}

#[async_trait::async_trait]
impl TransactionPort for InMemoryStore {
    type Tx = InMemoryTx;

    async fn execute<T, E, F>(&self, work: F) -> Result<T, E>
    where
        T: Send,
        E: From<StoreError> + Send,
        F: for<'t> FnOnce(&'t mut Self::Tx) -> BoxFuture<'t, Result<T, E>> + Send,
    {
        let mut tx = InMemoryTx::default();
        let outcome = work(&mut tx).await;
        match outcome {
            Ok(value) => {
                self.commit(tx)?;
                Ok(value)
            }
            Err(err) => {
                tracing::debug!(
                    staged_customers = tx.customers.len(),
                    staged_invoices = tx.invoices.len(),
                    "unit of work rolled back"
                );
                Err(err)
            }
        }
    }
}

#[async_trait::async_trait]
impl CustomerStore for InMemoryStore {
    type Tx = InMemoryTx;

    async fn create(&self, mut customer: Customer, tx: &mut Self::Tx) -> StoreResult<Customer> {
        if customer.is_persisted() {
            return Err(StoreError::invalid_write(format!(
                "customer {} already has a storage id",
                customer.public_id
            )));
        }
        let public_id = customer.public_id.clone();
        if self
            .find_customer(Some(&*tx), |c| c.public_id == public_id)?
            .is_some()
        {
            return Err(StoreError::Conflict(format!(
                "customer public id {public_id} already exists"
            )));
        }

        customer.id = Some(CustomerId::new(
            self.next_customer_id.fetch_add(1, Ordering::SeqCst),
        ));
        tx.customers.push(customer.clone());
        Ok(customer)
    }

    async fn get_by_id(
        &self,
        id: CustomerId,
        tx: Option<&mut Self::Tx>,
    ) -> StoreResult<Option<Customer>> {
        self.find_customer(tx.as_deref(), |c| c.id == Some(id))
    }

    async fn get_by_public_id(
        &self,
        public_id: &CustomerPublicId,
        tx: Option<&mut Self::Tx>,
    ) -> StoreResult<Option<Customer>> {
        self.find_customer(tx.as_deref(), |c| &c.public_id == public_id)
    }
}

#[async_trait::async_trait]
impl InvoiceStore for InMemoryStore {
    type Tx = InMemoryTx;

    async fn create(&self, mut invoice: Invoice, tx: &mut Self::Tx) -> StoreResult<Invoice> {
        if invoice.is_persisted() {
            return Err(StoreError::invalid_write(format!(
                "invoice {} already has a storage id",
                invoice.public_id
            )));
        }
        let customer_id = invoice.customer_id().ok_or_else(|| {
            StoreError::invalid_write(format!(
                "invoice {} references an unsaved customer",
                invoice.public_id
            ))
        })?;
        if !self.customer_exists(customer_id, tx)? {
            return Err(StoreError::invalid_write(format!(
                "invoice {} references unknown customer {customer_id}",
                invoice.public_id
            )));
        }
        if self.invoice_public_id_taken(&invoice.public_id, tx)? {
            return Err(StoreError::Conflict(format!(
                "invoice public id {} already exists",
                invoice.public_id
            )));
        }

        invoice.id = Some(InvoiceId::new(
            self.next_invoice_id.fetch_add(1, Ordering::SeqCst),
        ));
        tx.invoices.push(invoice.clone());
        Ok(invoice)
    }

    async fn get_by_public_id(
        &self,
        public_id: &InvoicePublicId,
        tx: Option<&mut Self::Tx>,
    ) -> StoreResult<Option<Invoice>> {
        Ok(self
            .scan_invoices(tx.as_deref(), |i| &i.public_id == public_id)?
            .into_iter()
            .next())
    }

    async fn get_by_reference_id(
        &self,
        reference_id: &str,
        tx: Option<&mut Self::Tx>,
    ) -> StoreResult<Option<Invoice>> {
        Ok(self
            .scan_invoices(tx.as_deref(), |i| i.reference_id == reference_id)?
            .into_iter()
            .next())
    }

    async fn get_by_customer_name(
        &self,
        name: &str,
        criteria: &InvoiceCriteria,
        pagination: PaginationParameters,
        tx: Option<&mut Self::Tx>,
    ) -> StoreResult<Page<Invoice>> {
        let matched = self.scan_invoices(tx.as_deref(), |i| {
            i.customer.name == name && criteria.matches(i)
        })?;
        Ok(pagination.paginate(matched))
    }

    async fn get_with_filters(
        &self,
        criteria: &InvoiceCriteria,
        pagination: PaginationParameters,
        tx: Option<&mut Self::Tx>,
    ) -> StoreResult<Page<Invoice>> {
        let matched = self.scan_invoices(tx.as_deref(), |i| criteria.matches(i))?;
        Ok(pagination.paginate(matched))
    }
}
