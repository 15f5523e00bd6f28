use std::sync::Arc;

use anyhow::Context;

use invoicer_core::{Page, PaginationParameters};
use invoicer_infra::{
    AppConfig, InMemoryInvoiceService, InMemoryStore, InvoiceService, PostgresInvoiceService,
    PostgresStore, ServiceResult,
};
use invoicer_invoicing::{CreateInvoiceRequest, Invoice, InvoiceDomainService, InvoiceFilters};

/// Invoice service bound to one of the storage backends.
#[derive(Clone)]
pub enum AppServices {
    InMemory(InMemoryInvoiceService),
    Postgres(PostgresInvoiceService),
}

impl AppServices {
    pub fn in_memory(domain: InvoiceDomainService) -> Self {
        let store = Arc::new(InMemoryStore::new());
        AppServices::InMemory(InvoiceService::new(
            store.clone(),
            store.clone(),
            store,
            domain,
        ))
    }

    pub fn postgres(store: PostgresStore, domain: InvoiceDomainService) -> Self {
        let store = Arc::new(store);
        AppServices::Postgres(InvoiceService::new(
            store.clone(),
            store.clone(),
            store,
            domain,
        ))
    }

    /// Postgres when `DATABASE_URL` is set (schema ensured first), in-memory otherwise.
    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let domain =
            InvoiceDomainService::default().with_default_currency(config.default_currency.clone());

        match &config.database_url {
            Some(url) => {
                let store = PostgresStore::connect(url, config.db_max_connections)
                    .await
                    .context("failed to connect to Postgres")?;
                store
                    .ensure_schema()
                    .await
                    .context("failed to prepare database schema")?;
                tracing::info!("using Postgres stores");
                Ok(Self::postgres(store, domain))
            }
            None => {
                tracing::warn!("DATABASE_URL not set; using in-memory stores");
                Ok(Self::in_memory(domain))
            }
        }
    }

    pub async fn create(&self, request: CreateInvoiceRequest) -> ServiceResult<Invoice> {
        match self {
            AppServices::InMemory(service) => service.create(request).await,
            AppServices::Postgres(service) => service.create(request).await,
        }
    }

    pub async fn get_by_public_id(&self, public_id: &str) -> ServiceResult<Invoice> {
        match self {
            AppServices::InMemory(service) => service.get_by_public_id(public_id).await,
            AppServices::Postgres(service) => service.get_by_public_id(public_id).await,
        }
    }

    pub async fn get_by_reference_id(&self, reference_id: &str) -> ServiceResult<Invoice> {
        match self {
            AppServices::InMemory(service) => service.get_by_reference_id(reference_id).await,
            AppServices::Postgres(service) => service.get_by_reference_id(reference_id).await,
        }
    }

    pub async fn get_by_customer_name(
        &self,
        name: &str,
        filters: &InvoiceFilters,
        pagination: PaginationParameters,
    ) -> ServiceResult<Page<Invoice>> {
        match self {
            AppServices::InMemory(service) => {
                service.get_by_customer_name(name, filters, pagination).await
            }
            AppServices::Postgres(service) => {
                service.get_by_customer_name(name, filters, pagination).await
            }
        }
    }

    pub async fn get_with_filters(
        &self,
        filters: &InvoiceFilters,
        pagination: PaginationParameters,
    ) -> ServiceResult<Page<Invoice>> {
        match self {
            AppServices::InMemory(service) => service.get_with_filters(filters, pagination).await,
            AppServices::Postgres(service) => service.get_with_filters(filters, pagination).await,
        }
    }
}
