use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use invoicer_core::{DomainError, Page, PaginationParameters};
use invoicer_customers::{Address, CreateAddressRequest, CreateCustomerRequest};
use invoicer_invoicing::{
    CreateInvoiceItemRequest, CreateInvoiceRequest, Invoice, InvoiceFilters, InvoiceStatus,
};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceBody {
    pub invoice_id: String,
    pub invoice_number: String,
    pub customer_name: String,
    pub customer_email: String,
    #[serde(default)]
    pub customer_address: Option<CustomerAddressBody>,
    pub invoice_date: NaiveDate,
    pub due_date: NaiveDate,
    pub items: Vec<InvoiceItemBody>,
    pub subtotal: u64,
    pub tax: u64,
    pub total: u64,
    #[serde(default)]
    pub currency: Option<String>,
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerAddressBody {
    pub street: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItemBody {
    pub description: String,
    pub quantity: u64,
    pub unit_price: u64,
    pub total: u64,
}

impl CreateInvoiceBody {
    /// Map the wire body onto the domain request; rejects unknown status literals.
    pub fn into_request(self) -> Result<CreateInvoiceRequest, DomainError> {
        let status: InvoiceStatus = self.status.parse()?;

        Ok(CreateInvoiceRequest {
            reference_id: self.invoice_id,
            number: self.invoice_number,
            customer: CreateCustomerRequest {
                name: self.customer_name,
                email: self.customer_email,
                address: self.customer_address.map(|a| CreateAddressRequest {
                    street: a.street,
                    city: a.city,
                    postal_code: a.postal_code,
                    country: a.country,
                }),
            },
            issue_date: self.invoice_date,
            due_date: self.due_date,
            items: self
                .items
                .into_iter()
                .map(|item| CreateInvoiceItemRequest {
                    description: item.description,
                    quantity: item.quantity,
                    unit_price: item.unit_price,
                    total: item.total,
                })
                .collect(),
            subtotal: self.subtotal,
            tax: self.tax,
            total: self.total,
            currency: self.currency,
            status,
            notes: self.notes,
        })
    }
}

/// Query string of `GET /invoices`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceQuery {
    pub invoice_id: Option<String>,
    pub customer_name: Option<String>,
    pub invoice_date: Option<NaiveDate>,
    pub invoice_date_from: Option<NaiveDate>,
    pub invoice_date_to: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub due_date_from: Option<NaiveDate>,
    pub due_date_to: Option<NaiveDate>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl InvoiceQuery {
    /// `invoiceId`, unless empty.
    pub fn reference_id(&self) -> Option<&str> {
        self.invoice_id.as_deref().filter(|s| !s.is_empty())
    }

    /// `customerName`, unless empty.
    pub fn customer_name(&self) -> Option<&str> {
        self.customer_name.as_deref().filter(|s| !s.is_empty())
    }

    pub fn filters(&self) -> InvoiceFilters {
        InvoiceFilters {
            issue_date: self.invoice_date,
            issue_date_from: self.invoice_date_from,
            issue_date_to: self.invoice_date_to,
            due_date: self.due_date,
            due_date_from: self.due_date_from,
            due_date_to: self.due_date_to,
        }
    }

    pub fn pagination(&self) -> PaginationParameters {
        PaginationParameters::new(self.page, self.limit)
    }
}

// -------------------------
// Response mapping
// -------------------------

pub fn invoice_to_json(invoice: &Invoice) -> serde_json::Value {
    let items: Vec<serde_json::Value> = invoice
        .items
        .iter()
        .map(|item| {
            json!({
                "id": item.public_id.as_str(),
                "description": item.description,
                "quantity": item.quantity,
                "unitPrice": item.unit_price,
                "total": item.total,
            })
        })
        .collect();

    let mut customer = json!({
        "id": invoice.customer.public_id.as_str(),
        "name": invoice.customer.name,
        "email": invoice.customer.email,
    });
    if let Some(address) = &invoice.customer.address {
        customer["address"] = address_to_json(address);
    }

    let mut body = json!({
        "id": invoice.public_id.as_str(),
        "invoiceId": invoice.reference_id,
        "invoiceNumber": invoice.number,
        "customer": customer,
        "invoiceDate": invoice.issue_date.to_string(),
        "dueDate": invoice.due_date.to_string(),
        "items": items,
        "subtotal": invoice.subtotal,
        "tax": invoice.tax,
        "total": invoice.total,
        "currency": invoice.currency,
        "status": invoice.status.as_str(),
    });
    if let Some(notes) = &invoice.notes {
        body["notes"] = json!(notes);
    }
    body
}

fn address_to_json(address: &Address) -> serde_json::Value {
    json!({
        "id": address.public_id.as_str(),
        "street": address.street,
        "city": address.city,
        "postalCode": address.postal_code,
        "country": address.country,
    })
}

pub fn invoice_page_to_json(page: &Page<Invoice>) -> serde_json::Value {
    json!({
        "page": page.page,
        "limit": page.limit,
        "data": page.data.iter().map(invoice_to_json).collect::<Vec<_>>(),
    })
}
