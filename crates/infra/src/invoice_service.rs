//! Invoice application service.
//!
//! Orchestrates the domain services and the storage ports:
//! `create` builds and validates the aggregate, then persists customer and
//! invoice inside one unit of work; the read paths validate their inputs and
//! normalize storage failures into opaque errors.

use std::sync::Arc;

use anyhow::Context;
use thiserror::Error;
use tracing::instrument;

use invoicer_core::{
    DomainError, InvoicePublicId, Page, PaginationParameters, StoreError, TransactionPort,
};
use invoicer_customers::CustomerStore;
use invoicer_invoicing::{
    CreateInvoiceRequest, Invoice, InvoiceDomainService, InvoiceFilters, InvoiceStore,
};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced to the request layer.
///
/// `CreateFailed` and `QueryFailed` never carry storage detail; the cause is
/// logged where it is converted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    InvalidId(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("failed to create invoice")]
    CreateFailed,

    #[error("failed to retrieve invoices")]
    QueryFailed,
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => ServiceError::Validation(msg),
            DomainError::InvalidId(msg) => ServiceError::InvalidId(msg),
            DomainError::NotFound(what) => ServiceError::NotFound(what),
        }
    }
}

/// Application service over the customer, invoice and transaction ports.
///
/// Both storage ports must use the transaction port's handle type so that
/// their writes join the same unit of work.
pub struct InvoiceService<T, C, I> {
    transactions: Arc<T>,
    customers: Arc<C>,
    invoices: Arc<I>,
    domain: InvoiceDomainService,
}

impl<T, C, I> Clone for InvoiceService<T, C, I> {
    fn clone(&self) -> Self {
        Self {
            transactions: Arc::clone(&self.transactions),
            customers: Arc::clone(&self.customers),
            invoices: Arc::clone(&self.invoices),
            domain: self.domain.clone(),
        }
    }
}

impl<T, C, I> InvoiceService<T, C, I>
where
    T: TransactionPort,
    C: CustomerStore<Tx = T::Tx> + 'static,
    I: InvoiceStore<Tx = T::Tx> + 'static,
{
    pub fn new(
        transactions: Arc<T>,
        customers: Arc<C>,
        invoices: Arc<I>,
        domain: InvoiceDomainService,
    ) -> Self {
        Self {
            transactions,
            customers,
            invoices,
            domain,
        }
    }

    /// Validate, build and atomically persist a new invoice with its customer.
    ///
    /// Validation failures return before the unit of work is opened. Any
    /// failure inside it rolls back both writes and is reported as
    /// [`ServiceError::CreateFailed`].
    #[instrument(
        skip(self, request),
        fields(reference_id = %request.reference_id, number = %request.number),
        err
    )]
    pub async fn create(&self, request: CreateInvoiceRequest) -> ServiceResult<Invoice> {
        let invoice = self.domain.build(request)?;
        tracing::debug!(public_id = %invoice.public_id, "invoice built");

        let customers = Arc::clone(&self.customers);
        let invoices = Arc::clone(&self.invoices);
        let outcome = self
            .transactions
            .execute(move |tx| {
                Box::pin(async move {
                    let customer = customers
                        .create(invoice.customer.clone(), tx)
                        .await
                        .context("persisting customer")?;
                    let stored = invoices
                        .create(Invoice { customer, ..invoice }, tx)
                        .await
                        .context("persisting invoice")?;
                    Ok::<_, anyhow::Error>(stored)
                })
            })
            .await;

        match outcome {
            Ok(invoice) => {
                tracing::info!(public_id = %invoice.public_id, "invoice created");
                Ok(invoice)
            }
            Err(err) => Err(create_failure(err)),
        }
    }

    #[instrument(skip(self), err)]
    pub async fn get_by_public_id(&self, public_id: &str) -> ServiceResult<Invoice> {
        let public_id: InvoicePublicId = public_id.parse()?;
        self.invoices
            .get_by_public_id(&public_id, None)
            .await
            .map_err(|e| query_failure("get_by_public_id", e))?
            .ok_or_else(|| DomainError::not_found("invoice").into())
    }

    /// First invoice carrying `reference_id`; reference ids are not unique.
    #[instrument(skip(self), err)]
    pub async fn get_by_reference_id(&self, reference_id: &str) -> ServiceResult<Invoice> {
        self.invoices
            .get_by_reference_id(reference_id, None)
            .await
            .map_err(|e| query_failure("get_by_reference_id", e))?
            .ok_or_else(|| DomainError::not_found("invoice").into())
    }

    /// Invoices of every customer named exactly `name`.
    #[instrument(skip(self), err)]
    pub async fn get_by_customer_name(
        &self,
        name: &str,
        filters: &InvoiceFilters,
        pagination: PaginationParameters,
    ) -> ServiceResult<Page<Invoice>> {
        let criteria = filters.validate()?;
        let page = self
            .invoices
            .get_by_customer_name(name, &criteria, pagination, None)
            .await
            .map_err(|e| query_failure("get_by_customer_name", e))?;
        tracing::debug!(returned = page.len(), "invoices listed by customer name");
        Ok(page)
    }

    #[instrument(skip(self), err)]
    pub async fn get_with_filters(
        &self,
        filters: &InvoiceFilters,
        pagination: PaginationParameters,
    ) -> ServiceResult<Page<Invoice>> {
        let criteria = filters.validate()?;
        let page = self
            .invoices
            .get_with_filters(&criteria, pagination, None)
            .await
            .map_err(|e| query_failure("get_with_filters", e))?;
        tracing::debug!(returned = page.len(), "invoices listed");
        Ok(page)
    }
}

/// Domain errors raised inside the unit of work pass through; anything else
/// becomes an opaque `CreateFailed`.
fn create_failure(err: anyhow::Error) -> ServiceError {
    if let Some(domain) = err.downcast_ref::<DomainError>() {
        return domain.clone().into();
    }
    tracing::error!("invoice creation failed: {err:#}");
    ServiceError::CreateFailed
}

fn query_failure(operation: &str, err: StoreError) -> ServiceError {
    tracing::error!(operation, error = %err, "invoice query failed");
    ServiceError::QueryFailed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_from_the_unit_of_work_pass_through() {
        let err =
            anyhow::Error::from(DomainError::validation("x")).context("persisting invoice");
        assert_eq!(create_failure(err), ServiceError::Validation("x".to_string()));

        let err =
            anyhow::Error::from(DomainError::not_found("customer")).context("persisting customer");
        assert_eq!(create_failure(err), ServiceError::NotFound("customer".to_string()));
    }

    #[test]
    fn storage_errors_from_the_unit_of_work_are_opaque() {
        let err = anyhow::Error::from(StoreError::backend("connection reset"))
            .context("persisting invoice");
        assert_eq!(create_failure(err), ServiceError::CreateFailed);

        let err = anyhow::Error::from(StoreError::Conflict("duplicate".to_string()));
        assert_eq!(create_failure(err), ServiceError::CreateFailed);
    }

    #[test]
    fn missing_records_map_to_not_found() {
        let err: ServiceError = DomainError::not_found("invoice").into();
        assert_eq!(err, ServiceError::NotFound("invoice".to_string()));
        assert_eq!(err.to_string(), "invoice not found");
    }
}
