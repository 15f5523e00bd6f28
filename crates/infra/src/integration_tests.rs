//! Service-level tests for the invoice workflow.
//!
//! Tests: Request → InvoiceService → storage ports (in-memory adapter)
//!
//! Verifies:
//! - Creation persists customer and invoice atomically
//! - Validation failures never reach storage
//! - Lookups, filters and pagination honour their contracts

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use invoicer_core::{
        InvoicePublicId, Page, PaginationParameters, StoreError, StoreResult,
    };
    use invoicer_invoicing::{
        Invoice, InvoiceCriteria, InvoiceDomainService, InvoiceFilters, InvoiceStatus,
        InvoiceStore,
    };
    use proptest::prelude::*;

    use crate::invoice_service::{InvoiceService, ServiceError};
    use crate::store::{InMemoryStore, InMemoryTx};
    use crate::test_support::{date, item, request_for, sample_request};
    use crate::InMemoryInvoiceService;

    /// Invoice store whose every call fails, sharing the in-memory transaction handle.
    struct FailingInvoiceStore;

    #[async_trait::async_trait]
    impl InvoiceStore for FailingInvoiceStore {
        type Tx = InMemoryTx;

        async fn create(&self, _invoice: Invoice, _tx: &mut Self::Tx) -> StoreResult<Invoice> {
            Err(StoreError::backend("disk full"))
        }

        async fn get_by_public_id(
            &self,
            _public_id: &InvoicePublicId,
            _tx: Option<&mut Self::Tx>,
        ) -> StoreResult<Option<Invoice>> {
            Err(StoreError::backend("connection reset"))
        }

        async fn get_by_reference_id(
            &self,
            _reference_id: &str,
            _tx: Option<&mut Self::Tx>,
        ) -> StoreResult<Option<Invoice>> {
            Err(StoreError::backend("connection reset"))
        }

        async fn get_by_customer_name(
            &self,
            _name: &str,
            _criteria: &InvoiceCriteria,
            _pagination: PaginationParameters,
            _tx: Option<&mut Self::Tx>,
        ) -> StoreResult<Page<Invoice>> {
            Err(StoreError::backend("connection reset"))
        }

        async fn get_with_filters(
            &self,
            _criteria: &InvoiceCriteria,
            _pagination: PaginationParameters,
            _tx: Option<&mut Self::Tx>,
        ) -> StoreResult<Page<Invoice>> {
            Err(StoreError::backend("connection reset"))
        }
    }

    fn setup() -> (InMemoryInvoiceService, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new());
        let service = InvoiceService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            InvoiceDomainService::default(),
        );
        (service, store)
    }

    fn setup_failing() -> (
        InvoiceService<InMemoryStore, InMemoryStore, FailingInvoiceStore>,
        Arc<InMemoryStore>,
    ) {
        let store = Arc::new(InMemoryStore::new());
        let service = InvoiceService::new(
            store.clone(),
            store.clone(),
            Arc::new(FailingInvoiceStore),
            InvoiceDomainService::default(),
        );
        (service, store)
    }

    fn page(page: i64, limit: i64) -> PaginationParameters {
        PaginationParameters::new(Some(page), Some(limit))
    }

    #[tokio::test]
    async fn create_persists_the_concrete_scenario() {
        let (service, store) = setup();

        let invoice = service.create(sample_request()).await.unwrap();

        assert!(invoice.is_persisted());
        assert!(invoice.customer.is_persisted());
        assert_eq!(invoice.currency, "EUR");
        assert_eq!(invoice.items.len(), 2);
        assert_ne!(invoice.items[0].public_id, invoice.items[1].public_id);
        assert_ne!(invoice.public_id.as_str(), invoice.customer.public_id.as_str());
        assert_eq!((invoice.subtotal, invoice.tax, invoice.total), (250, 50, 300));
        assert_eq!(store.customer_count().unwrap(), 1);
        assert_eq!(store.invoice_count().unwrap(), 1);

        let fetched = service
            .get_by_public_id(invoice.public_id.as_str())
            .await
            .unwrap();
        assert_eq!(fetched, invoice);
        assert_eq!(fetched.status, InvoiceStatus::Draft);
        let descriptions: Vec<_> = fetched.items.iter().map(|i| i.description.as_str()).collect();
        assert_eq!(descriptions, vec!["Item 1", "Item 2"]);
    }

    #[tokio::test]
    async fn configured_default_currency_is_applied() {
        let store = Arc::new(InMemoryStore::new());
        let service = InvoiceService::new(
            store.clone(),
            store.clone(),
            store,
            InvoiceDomainService::default().with_default_currency("USD"),
        );

        let invoice = service.create(sample_request()).await.unwrap();
        assert_eq!(invoice.currency, "USD");
    }

    #[tokio::test]
    async fn validation_failure_writes_nothing() {
        let (service, store) = setup();

        let mut request = sample_request();
        request.items[0].total = 199;
        let err = service.create(request).await.unwrap_err();
        assert!(matches!(&err, ServiceError::Validation(msg) if msg.contains("item 1 total 199")));

        let mut request = sample_request();
        request.due_date = request.issue_date;
        let err = service.create(request).await.unwrap_err();
        assert!(matches!(&err, ServiceError::Validation(msg) if msg.contains("before due date")));

        assert_eq!(store.customer_count().unwrap(), 0);
        assert_eq!(store.invoice_count().unwrap(), 0);
    }

    #[tokio::test]
    async fn failed_invoice_write_rolls_back_the_customer() {
        let (service, store) = setup_failing();

        let err = service.create(sample_request()).await.unwrap_err();

        assert_eq!(err, ServiceError::CreateFailed);
        assert_eq!(err.to_string(), "failed to create invoice");
        assert_eq!(store.customer_count().unwrap(), 0);
        assert_eq!(store.invoice_count().unwrap(), 0);
    }

    #[tokio::test]
    async fn storage_read_failures_are_opaque() {
        let (service, _store) = setup_failing();

        let err = service
            .get_with_filters(&InvoiceFilters::default(), PaginationParameters::default())
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::QueryFailed);
        assert_eq!(err.to_string(), "failed to retrieve invoices");

        let err = service.get_by_reference_id("ref-001").await.unwrap_err();
        assert_eq!(err, ServiceError::QueryFailed);
    }

    #[tokio::test]
    async fn lookups_report_missing_and_malformed_ids() {
        let (service, _store) = setup();
        service.create(sample_request()).await.unwrap();

        let unknown = InvoicePublicId::generate();
        let err = service.get_by_public_id(unknown.as_str()).await.unwrap_err();
        assert_eq!(err, ServiceError::NotFound("invoice".to_string()));

        let err = service.get_by_public_id("cus_123").await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidId(_)));

        let err = service.get_by_reference_id("ref-404").await.unwrap_err();
        assert_eq!(err, ServiceError::NotFound("invoice".to_string()));
    }

    #[tokio::test]
    async fn duplicate_reference_ids_are_accepted_and_first_wins() {
        let (service, store) = setup();

        let first = service.create(sample_request()).await.unwrap();
        let second = service.create(sample_request()).await.unwrap();
        assert_ne!(first.public_id, second.public_id);
        assert_eq!(store.invoice_count().unwrap(), 2);

        let found = service.get_by_reference_id("ref-001").await.unwrap();
        assert_eq!(found.public_id, first.public_id);
    }

    #[tokio::test]
    async fn pagination_over_fifteen_invoices() {
        let (service, _store) = setup();
        for n in 0..15 {
            service
                .create(request_for("John", &format!("ref-{n:03}")))
                .await
                .unwrap();
        }

        let second = service
            .get_with_filters(&InvoiceFilters::default(), page(2, 10))
            .await
            .unwrap();
        assert_eq!((second.page, second.limit), (2, 10));
        assert_eq!(second.len(), 5);
        let refs: Vec<_> = second.data.iter().map(|i| i.reference_id.as_str()).collect();
        assert_eq!(refs, vec!["ref-010", "ref-011", "ref-012", "ref-013", "ref-014"]);

        let beyond = service
            .get_by_customer_name("John", &InvoiceFilters::default(), page(3, 10))
            .await
            .unwrap();
        assert!(beyond.is_empty());
        assert_eq!((beyond.page, beyond.limit), (3, 10));

        let defaults = service
            .get_with_filters(
                &InvoiceFilters::default(),
                PaginationParameters::new(Some(0), Some(-5)),
            )
            .await
            .unwrap();
        assert_eq!((defaults.page, defaults.limit), (1, 10));
        assert_eq!(defaults.len(), 10);
    }

    #[tokio::test]
    async fn customer_name_matches_exactly_and_conflates_namesakes() {
        let (service, _store) = setup();

        let mut first_john = request_for("John", "ref-a");
        first_john.customer.email = "john.a@example.com".to_string();
        let mut second_john = request_for("John", "ref-b");
        second_john.customer.email = "john.b@example.com".to_string();

        let a = service.create(first_john).await.unwrap();
        let b = service.create(second_john).await.unwrap();
        service.create(request_for("john", "ref-c")).await.unwrap();
        service.create(request_for("Johnny", "ref-d")).await.unwrap();

        let page = service
            .get_by_customer_name("John", &InvoiceFilters::default(), PaginationParameters::default())
            .await
            .unwrap();

        let refs: Vec<_> = page.data.iter().map(|i| i.reference_id.as_str()).collect();
        assert_eq!(refs, vec!["ref-a", "ref-b"]);
        assert_ne!(a.customer.public_id, b.customer.public_id);
    }

    #[tokio::test]
    async fn filters_are_validated_and_applied() {
        let (service, _store) = setup();
        for (n, due_day) in [10u32, 20, 30].into_iter().enumerate() {
            let mut request = request_for("John", &format!("ref-{n}"));
            request.due_date = date(2024, 1, due_day);
            service.create(request).await.unwrap();
        }

        let ambiguous = InvoiceFilters {
            due_date: Some(date(2024, 1, 20)),
            due_date_from: Some(date(2024, 1, 1)),
            ..Default::default()
        };
        let err = service
            .get_by_customer_name("John", &ambiguous, PaginationParameters::default())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ServiceError::Validation(
                "cannot use 'dueDate' along with due date range parameters".to_string()
            )
        );

        let half_open = InvoiceFilters {
            due_date_from: Some(date(2024, 1, 1)),
            ..Default::default()
        };
        let err = service
            .get_with_filters(&half_open, PaginationParameters::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(msg) if msg.contains("'dueDate'")));

        let range = InvoiceFilters {
            due_date_from: Some(date(2024, 1, 15)),
            due_date_to: Some(date(2024, 1, 30)),
            ..Default::default()
        };
        let page = service
            .get_by_customer_name("John", &range, PaginationParameters::default())
            .await
            .unwrap();
        let refs: Vec<_> = page.data.iter().map(|i| i.reference_id.as_str()).collect();
        assert_eq!(refs, vec!["ref-1", "ref-2"]);

        let exact = InvoiceFilters {
            issue_date: Some(date(2024, 1, 1)),
            due_date: Some(date(2024, 1, 10)),
            ..Default::default()
        };
        let page = service
            .get_with_filters(&exact, PaginationParameters::default())
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page.data[0].reference_id, "ref-0");
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 32,
            ..ProptestConfig::default()
        })]

        /// Property: every consistent request is created and the stored
        /// invoice still satisfies the amount invariants.
        #[test]
        fn consistent_requests_are_created(
            lines in prop::collection::vec((1u64..100, 0u64..10_000), 0..6),
            tax in 0u64..10_000,
            term_days in 1u64..120,
        ) {
            let mut request = sample_request();
            request.items = lines
                .iter()
                .enumerate()
                .map(|(n, (qty, price))| item(&format!("Line {n}"), *qty, *price))
                .collect();
            request.subtotal = request.items.iter().map(|i| i.total).sum();
            request.tax = tax;
            request.total = request.subtotal + tax;
            request.due_date = request.issue_date + chrono::Days::new(term_days);

            let runtime = tokio::runtime::Builder::new_current_thread()
                .build()
                .unwrap();
            let (service, _store) = setup();
            let invoice = runtime.block_on(service.create(request)).unwrap();

            for line in &invoice.items {
                prop_assert_eq!(line.total, line.unit_price * line.quantity);
            }
            prop_assert_eq!(invoice.subtotal, invoice.items.iter().map(|i| i.total).sum::<u64>());
            prop_assert_eq!(invoice.total, invoice.subtotal + invoice.tax);
            prop_assert!(invoice.issue_date < invoice.due_date);
        }
    }
}
