//! Postgres-backed implementation of the customer, invoice and transaction ports.
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL Error Code | StoreError |
//! |------------|----------------------|------------|
//! | Database (unique violation) | `23505` | `Conflict` |
//! | Database (other) | Any other | `Backend` |
//! | PoolClosed / PoolTimedOut / Io | N/A | `Backend` |
//! | Decode / ColumnNotFound | N/A | `Corrupt` |
//!
//! Amounts are stored as `BIGINT`; values that do not fit are rejected on
//! write (`InvalidWrite`) and treated as corruption on read.

use std::collections::HashMap;
use std::time::Duration;

use chrono::NaiveDate;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{FromRow, PgConnection, PgPool, Postgres, Row, Transaction};
use tracing::instrument;

use invoicer_core::{
    AddressPublicId, BoxFuture, CustomerId, CustomerPublicId, InvoiceId, InvoiceItemPublicId,
    InvoicePublicId, Page, PaginationParameters, StoreError, StoreResult, TransactionPort,
};
use invoicer_customers::{Address, Customer, CustomerStore};
use invoicer_invoicing::{Invoice, InvoiceCriteria, InvoiceItem, InvoiceStatus, InvoiceStore};

const SCHEMA: [&str; 5] = [
    r#"
    CREATE TABLE IF NOT EXISTS customers (
        id         BIGSERIAL PRIMARY KEY,
        public_id  TEXT NOT NULL UNIQUE,
        name       TEXT NOT NULL,
        email      TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS customer_addresses (
        id           BIGSERIAL PRIMARY KEY,
        public_id    TEXT NOT NULL UNIQUE,
        customer_id  BIGINT NOT NULL UNIQUE REFERENCES customers (id),
        street       TEXT NULL,
        city         TEXT NULL,
        postal_code  TEXT NULL,
        country      TEXT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS invoices (
        id            BIGSERIAL PRIMARY KEY,
        public_id     TEXT NOT NULL UNIQUE,
        reference_id  TEXT NOT NULL,
        customer_id   BIGINT NOT NULL REFERENCES customers (id),
        number        TEXT NOT NULL,
        issue_date    DATE NOT NULL,
        due_date      DATE NOT NULL,
        subtotal      BIGINT NOT NULL,
        tax           BIGINT NOT NULL,
        total         BIGINT NOT NULL,
        currency      TEXT NOT NULL,
        status        TEXT NOT NULL,
        notes         TEXT NULL
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS invoices_reference_id_idx ON invoices (reference_id)
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS invoice_items (
        id           BIGSERIAL PRIMARY KEY,
        public_id    TEXT NOT NULL UNIQUE,
        invoice_id   BIGINT NOT NULL REFERENCES invoices (id),
        position     INTEGER NOT NULL,
        description  TEXT NOT NULL,
        quantity     BIGINT NOT NULL,
        unit_price   BIGINT NOT NULL,
        total        BIGINT NOT NULL,
        UNIQUE (invoice_id, position)
    )
    "#,
];

const CUSTOMER_SELECT: &str = r#"
    SELECT
        c.id AS customer_id,
        c.public_id AS customer_public_id,
        c.name AS customer_name,
        c.email AS customer_email,
        a.public_id AS address_public_id,
        a.street,
        a.city,
        a.postal_code,
        a.country
    FROM customers c
    LEFT JOIN customer_addresses a ON a.customer_id = c.id
"#;

const INVOICE_SELECT: &str = r#"
    SELECT
        i.id,
        i.public_id,
        i.reference_id,
        i.number,
        i.issue_date,
        i.due_date,
        i.subtotal,
        i.tax,
        i.total,
        i.currency,
        i.status,
        i.notes,
        c.id AS customer_id,
        c.public_id AS customer_public_id,
        c.name AS customer_name,
        c.email AS customer_email,
        a.public_id AS address_public_id,
        a.street,
        a.city,
        a.postal_code,
        a.country
    FROM invoices i
    JOIN customers c ON c.id = i.customer_id
    LEFT JOIN customer_addresses a ON a.customer_id = c.id
"#;

/// Shared listing predicate: optional customer name plus both date criteria.
///
/// `$1` customer name, `$2..$4` issue date (exact, from, to),
/// `$5..$7` due date (exact, from, to), `$8` limit, `$9` offset.
const INVOICE_LISTING_WHERE: &str = r#"
    WHERE ($1::text IS NULL OR c.name = $1)
      AND ($2::date IS NULL OR i.issue_date = $2)
      AND ($3::date IS NULL OR i.issue_date >= $3)
      AND ($4::date IS NULL OR i.issue_date <= $4)
      AND ($5::date IS NULL OR i.due_date = $5)
      AND ($6::date IS NULL OR i.due_date >= $6)
      AND ($7::date IS NULL OR i.due_date <= $7)
    ORDER BY i.id ASC
    LIMIT $8 OFFSET $9
"#;

/// Postgres-backed store for customers and invoices.
///
/// Cloning is cheap (the pool is reference-counted). The transaction handle is
/// a plain `sqlx::Transaction`; reads outside a unit of work acquire a pooled
/// connection.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a pool to `database_url` with at most `max_connections`.
    #[instrument(skip(database_url), err)]
    pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Create the tables and indexes this store needs (idempotent).
    #[instrument(skip(self), err)]
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        }
        tracing::info!("database schema ready");
        Ok(())
    }

    async fn acquire(&self, operation: &str) -> StoreResult<sqlx::pool::PoolConnection<Postgres>> {
        self.pool
            .acquire()
            .await
            .map_err(|e| map_sqlx_error(operation, e))
    }
}

#[async_trait::async_trait]
impl TransactionPort for PostgresStore {
    type Tx = Transaction<'static, Postgres>;

    async fn execute<T, E, F>(&self, work: F) -> Result<T, E>
    where
        T: Send,
        E: From<StoreError> + Send,
        F: for<'t> FnOnce(&'t mut Self::Tx) -> BoxFuture<'t, Result<T, E>> + Send,
    {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::Transaction(format!("begin failed: {e}")))?;

        match work(&mut tx).await {
            Ok(value) => {
                tx.commit()
                    .await
                    .map_err(|e| StoreError::Transaction(format!("commit failed: {e}")))?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::warn!(error = %rollback_err, "rollback failed");
                }
                Err(err)
            }
        }
    }
}

#[async_trait::async_trait]
impl CustomerStore for PostgresStore {
    type Tx = Transaction<'static, Postgres>;

    #[instrument(skip(self, customer, tx), fields(public_id = %customer.public_id), err)]
    async fn create(&self, mut customer: Customer, tx: &mut Self::Tx) -> StoreResult<Customer> {
        if customer.is_persisted() {
            return Err(StoreError::invalid_write(format!(
                "customer {} already has a storage id",
                customer.public_id
            )));
        }

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO customers (public_id, name, email) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(customer.public_id.as_str())
        .bind(&customer.name)
        .bind(&customer.email)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| map_sqlx_error("insert customer", e))?;

        if let Some(address) = &customer.address {
            sqlx::query(
                r#"
                INSERT INTO customer_addresses
                    (public_id, customer_id, street, city, postal_code, country)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(address.public_id.as_str())
            .bind(id)
            .bind(address.street.as_deref())
            .bind(address.city.as_deref())
            .bind(address.postal_code.as_deref())
            .bind(address.country.as_deref())
            .execute(&mut **tx)
            .await
            .map_err(|e| map_sqlx_error("insert customer address", e))?;
        }

        customer.id = Some(CustomerId::new(id));
        Ok(customer)
    }

    async fn get_by_id(
        &self,
        id: CustomerId,
        tx: Option<&mut Self::Tx>,
    ) -> StoreResult<Option<Customer>> {
        let mut pooled;
        let conn: &mut PgConnection = match tx {
            Some(tx) => &mut **tx,
            None => {
                pooled = self.acquire("get customer").await?;
                &mut *pooled
            }
        };
        let sql = format!("{CUSTOMER_SELECT} WHERE c.id = $1");
        fetch_customer(conn, sqlx::query(&sql).bind(id.get())).await
    }

    async fn get_by_public_id(
        &self,
        public_id: &CustomerPublicId,
        tx: Option<&mut Self::Tx>,
    ) -> StoreResult<Option<Customer>> {
        let mut pooled;
        let conn: &mut PgConnection = match tx {
            Some(tx) => &mut **tx,
            None => {
                pooled = self.acquire("get customer").await?;
                &mut *pooled
            }
        };
        let sql = format!("{CUSTOMER_SELECT} WHERE c.public_id = $1");
        fetch_customer(conn, sqlx::query(&sql).bind(public_id.as_str())).await
    }
}

#[async_trait::async_trait]
impl InvoiceStore for PostgresStore {
    type Tx = Transaction<'static, Postgres>;

    #[instrument(
        skip(self, invoice, tx),
        fields(public_id = %invoice.public_id, item_count = invoice.items.len()),
        err
    )]
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

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO invoices (
                public_id, reference_id, customer_id, number, issue_date, due_date,
                subtotal, tax, total, currency, status, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING id
            "#,
        )
        .bind(invoice.public_id.as_str())
        .bind(&invoice.reference_id)
        .bind(customer_id.get())
        .bind(&invoice.number)
        .bind(invoice.issue_date)
        .bind(invoice.due_date)
        .bind(to_column("subtotal", invoice.subtotal)?)
        .bind(to_column("tax", invoice.tax)?)
        .bind(to_column("total", invoice.total)?)
        .bind(&invoice.currency)
        .bind(invoice.status.as_str())
        .bind(invoice.notes.as_deref())
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| map_sqlx_error("insert invoice", e))?;

        for (position, item) in invoice.items.iter().enumerate() {
            let position = i32::try_from(position)
                .map_err(|_| StoreError::invalid_write("too many invoice items"))?;
            sqlx::query(
                r#"
                INSERT INTO invoice_items (
                    public_id, invoice_id, position, description, quantity, unit_price, total
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(item.public_id.as_str())
            .bind(id)
            .bind(position)
            .bind(&item.description)
            .bind(to_column("quantity", item.quantity)?)
            .bind(to_column("unit_price", item.unit_price)?)
            .bind(to_column("item total", item.total)?)
            .execute(&mut **tx)
            .await
            .map_err(|e| map_sqlx_error("insert invoice item", e))?;
        }

        invoice.id = Some(InvoiceId::new(id));
        Ok(invoice)
    }

    #[instrument(skip(self, tx), fields(public_id = %public_id), err)]
    async fn get_by_public_id(
        &self,
        public_id: &InvoicePublicId,
        tx: Option<&mut Self::Tx>,
    ) -> StoreResult<Option<Invoice>> {
        let mut pooled;
        let conn: &mut PgConnection = match tx {
            Some(tx) => &mut **tx,
            None => {
                pooled = self.acquire("get invoice").await?;
                &mut *pooled
            }
        };
        let sql = format!("{INVOICE_SELECT} WHERE i.public_id = $1");
        let rows = sqlx::query(&sql)
            .bind(public_id.as_str())
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| map_sqlx_error("get invoice by public id", e))?;
        Ok(hydrate(conn, rows).await?.into_iter().next())
    }

    #[instrument(skip(self, tx), err)]
    async fn get_by_reference_id(
        &self,
        reference_id: &str,
        tx: Option<&mut Self::Tx>,
    ) -> StoreResult<Option<Invoice>> {
        let mut pooled;
        let conn: &mut PgConnection = match tx {
            Some(tx) => &mut **tx,
            None => {
                pooled = self.acquire("get invoice").await?;
                &mut *pooled
            }
        };
        let sql = format!("{INVOICE_SELECT} WHERE i.reference_id = $1 ORDER BY i.id ASC LIMIT 1");
        let rows = sqlx::query(&sql)
            .bind(reference_id)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| map_sqlx_error("get invoice by reference id", e))?;
        Ok(hydrate(conn, rows).await?.into_iter().next())
    }

    #[instrument(skip(self, tx), err)]
    async fn get_by_customer_name(
        &self,
        name: &str,
        criteria: &InvoiceCriteria,
        pagination: PaginationParameters,
        tx: Option<&mut Self::Tx>,
    ) -> StoreResult<Page<Invoice>> {
        let mut pooled;
        let conn: &mut PgConnection = match tx {
            Some(tx) => &mut **tx,
            None => {
                pooled = self.acquire("list invoices").await?;
                &mut *pooled
            }
        };
        list_invoices(conn, Some(name), criteria, pagination).await
    }

    #[instrument(skip(self, tx), err)]
    async fn get_with_filters(
        &self,
        criteria: &InvoiceCriteria,
        pagination: PaginationParameters,
        tx: Option<&mut Self::Tx>,
    ) -> StoreResult<Page<Invoice>> {
        let mut pooled;
        let conn: &mut PgConnection = match tx {
            Some(tx) => &mut **tx,
            None => {
                pooled = self.acquire("list invoices").await?;
                &mut *pooled
            }
        };
        list_invoices(conn, None, criteria, pagination).await
    }
}

async fn fetch_customer<'q>(
    conn: &mut PgConnection,
    query: sqlx::query::Query<'q, Postgres, sqlx::postgres::PgArguments>,
) -> StoreResult<Option<Customer>> {
    let row = query
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| map_sqlx_error("get customer", e))?;
    row.map(|row| {
        CustomerRow::from_row(&row)
            .map(Customer::from)
            .map_err(|e| StoreError::corrupt(format!("failed to decode customer row: {e}")))
    })
    .transpose()
}

async fn list_invoices(
    conn: &mut PgConnection,
    customer_name: Option<&str>,
    criteria: &InvoiceCriteria,
    pagination: PaginationParameters,
) -> StoreResult<Page<Invoice>> {
    let (issue_on, issue_from, issue_to) = criteria.issue_date.bounds();
    let (due_on, due_from, due_to) = criteria.due_date.bounds();
    let offset = i64::try_from(pagination.offset()).unwrap_or(i64::MAX);

    let sql = format!("{INVOICE_SELECT} {INVOICE_LISTING_WHERE}");
    let rows = sqlx::query(&sql)
        .bind(customer_name)
        .bind(issue_on)
        .bind(issue_from)
        .bind(issue_to)
        .bind(due_on)
        .bind(due_from)
        .bind(due_to)
        .bind(i64::from(pagination.limit))
        .bind(offset)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| map_sqlx_error("list invoices", e))?;

    let invoices = hydrate(conn, rows).await?;
    Ok(Page::new(pagination, invoices))
}

/// Decode invoice header rows and attach their items (one extra query).
async fn hydrate(conn: &mut PgConnection, rows: Vec<PgRow>) -> StoreResult<Vec<Invoice>> {
    let headers = rows
        .iter()
        .map(InvoiceRow::from_row)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| StoreError::corrupt(format!("failed to decode invoice row: {e}")))?;
    if headers.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i64> = headers.iter().map(|h| h.id).collect();
    let item_rows = sqlx::query(
        r#"
        SELECT invoice_id, public_id, description, quantity, unit_price, total
        FROM invoice_items
        WHERE invoice_id = ANY($1)
        ORDER BY invoice_id ASC, position ASC
        "#,
    )
    .bind(&ids)
    .fetch_all(&mut *conn)
    .await
    .map_err(|e| map_sqlx_error("load invoice items", e))?;

    let mut items: HashMap<i64, Vec<InvoiceItem>> = HashMap::new();
    for row in &item_rows {
        let item = InvoiceItemRow::from_row(row)
            .map_err(|e| StoreError::corrupt(format!("failed to decode invoice item row: {e}")))?;
        let invoice_id = item.invoice_id;
        items.entry(invoice_id).or_default().push(item.try_into()?);
    }

    headers
        .into_iter()
        .map(|header| {
            let lines = items.remove(&header.id).unwrap_or_default();
            header.into_invoice(lines)
        })
        .collect()
}

fn to_column(field: &str, value: u64) -> StoreResult<i64> {
    i64::try_from(value)
        .map_err(|_| StoreError::invalid_write(format!("{field} {value} exceeds storage range")))
}

fn from_column(field: &str, value: i64) -> StoreResult<u64> {
    u64::try_from(value)
        .map_err(|_| StoreError::corrupt(format!("negative {field} {value} in storage")))
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());
            if db_err.code().as_deref() == Some("23505") {
                StoreError::Conflict(msg)
            } else {
                StoreError::Backend(msg)
            }
        }
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) | sqlx::Error::ColumnNotFound(_) => {
            StoreError::Corrupt(format!("decode error in {operation}: {err}"))
        }
        sqlx::Error::PoolClosed => {
            StoreError::Backend(format!("connection pool closed in {operation}"))
        }
        _ => StoreError::Backend(format!("sqlx error in {operation}: {err}")),
    }
}

// SQLx row types

#[derive(Debug)]
struct CustomerRow {
    id: i64,
    public_id: String,
    name: String,
    email: String,
    address_public_id: Option<String>,
    street: Option<String>,
    city: Option<String>,
    postal_code: Option<String>,
    country: Option<String>,
}

impl<'r> FromRow<'r, PgRow> for CustomerRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(CustomerRow {
            id: row.try_get("customer_id")?,
            public_id: row.try_get("customer_public_id")?,
            name: row.try_get("customer_name")?,
            email: row.try_get("customer_email")?,
            address_public_id: row.try_get("address_public_id")?,
            street: row.try_get("street")?,
            city: row.try_get("city")?,
            postal_code: row.try_get("postal_code")?,
            country: row.try_get("country")?,
        })
    }
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        let address = row.address_public_id.map(|public_id| Address {
            public_id: AddressPublicId::from_trusted(public_id),
            street: row.street,
            city: row.city,
            postal_code: row.postal_code,
            country: row.country,
        });
        Customer {
            id: Some(CustomerId::new(row.id)),
            public_id: CustomerPublicId::from_trusted(row.public_id),
            name: row.name,
            email: row.email,
            address,
        }
    }
}

#[derive(Debug)]
struct InvoiceRow {
    id: i64,
    public_id: String,
    reference_id: String,
    number: String,
    issue_date: NaiveDate,
    due_date: NaiveDate,
    subtotal: i64,
    tax: i64,
    total: i64,
    currency: String,
    status: String,
    notes: Option<String>,
    customer: CustomerRow,
}

impl<'r> FromRow<'r, PgRow> for InvoiceRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(InvoiceRow {
            id: row.try_get("id")?,
            public_id: row.try_get("public_id")?,
            reference_id: row.try_get("reference_id")?,
            number: row.try_get("number")?,
            issue_date: row.try_get("issue_date")?,
            due_date: row.try_get("due_date")?,
            subtotal: row.try_get("subtotal")?,
            tax: row.try_get("tax")?,
            total: row.try_get("total")?,
            currency: row.try_get("currency")?,
            status: row.try_get("status")?,
            notes: row.try_get("notes")?,
            customer: CustomerRow::from_row(row)?,
        })
    }
}

impl InvoiceRow {
    fn into_invoice(self, items: Vec<InvoiceItem>) -> StoreResult<Invoice> {
        let status: InvoiceStatus = self
            .status
            .parse()
            .map_err(|e| StoreError::corrupt(format!("invoice {}: {e}", self.public_id)))?;
        Ok(Invoice {
            id: Some(InvoiceId::new(self.id)),
            public_id: InvoicePublicId::from_trusted(self.public_id),
            reference_id: self.reference_id,
            customer: self.customer.into(),
            number: self.number,
            issue_date: self.issue_date,
            due_date: self.due_date,
            items,
            subtotal: from_column("subtotal", self.subtotal)?,
            tax: from_column("tax", self.tax)?,
            total: from_column("total", self.total)?,
            currency: self.currency,
            status,
            notes: self.notes,
        })
    }
}

#[derive(Debug)]
struct InvoiceItemRow {
    invoice_id: i64,
    public_id: String,
    description: String,
    quantity: i64,
    unit_price: i64,
    total: i64,
}

impl<'r> FromRow<'r, PgRow> for InvoiceItemRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(InvoiceItemRow {
            invoice_id: row.try_get("invoice_id")?,
            public_id: row.try_get("public_id")?,
            description: row.try_get("description")?,
            quantity: row.try_get("quantity")?,
            unit_price: row.try_get("unit_price")?,
            total: row.try_get("total")?,
        })
    }
}

impl TryFrom<InvoiceItemRow> for InvoiceItem {
    type Error = StoreError;

    fn try_from(row: InvoiceItemRow) -> Result<Self, Self::Error> {
        Ok(InvoiceItem {
            public_id: InvoiceItemPublicId::from_trusted(row.public_id),
            description: row.description,
            quantity: from_column("quantity", row.quantity)?,
            unit_price: from_column("unit_price", row.unit_price)?,
            total: from_column("item total", row.total)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_outside_bigint_range_are_rejected_on_write() {
        assert_eq!(to_column("total", 300).unwrap(), 300);
        let err = to_column("total", u64::MAX).unwrap_err();
        assert!(matches!(err, StoreError::InvalidWrite(msg) if msg.contains("total")));
    }

    #[test]
    fn negative_stored_amounts_are_corrupt() {
        assert_eq!(from_column("tax", 50).unwrap(), 50);
        assert!(matches!(from_column("tax", -1), Err(StoreError::Corrupt(_))));
    }

    #[test]
    fn pool_closed_maps_to_backend_failure() {
        let err = map_sqlx_error("list invoices", sqlx::Error::PoolClosed);
        assert!(matches!(err, StoreError::Backend(msg) if msg.contains("list invoices")));
    }

    #[test]
    fn row_not_found_maps_to_backend_failure() {
        let err = map_sqlx_error("get invoice", sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::Backend(_)));
    }

    #[test]
    fn schema_statements_are_idempotent() {
        for statement in SCHEMA {
            assert!(statement.contains("IF NOT EXISTS"), "{statement}");
        }
    }
}
