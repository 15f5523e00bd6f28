//! Request fixtures shared by the unit and service tests.

use chrono::NaiveDate;

use invoicer_customers::CreateCustomerRequest;
use invoicer_invoicing::{CreateInvoiceItemRequest, CreateInvoiceRequest, InvoiceStatus};

pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub(crate) fn item(description: &str, quantity: u64, unit_price: u64) -> CreateInvoiceItemRequest {
    CreateInvoiceItemRequest {
        description: description.to_string(),
        quantity,
        unit_price,
        total: quantity * unit_price,
    }
}

/// The "2024-0001" invoice for John: 2 x 100 + 1 x 50, tax 50.
pub(crate) fn sample_request() -> CreateInvoiceRequest {
    CreateInvoiceRequest {
        reference_id: "ref-001".to_string(),
        number: "2024-0001".to_string(),
        customer: CreateCustomerRequest {
            name: "John".to_string(),
            email: "j@x.com".to_string(),
            address: None,
        },
        issue_date: date(2024, 1, 1),
        due_date: date(2024, 1, 15),
        items: vec![item("Item 1", 2, 100), item("Item 2", 1, 50)],
        subtotal: 250,
        tax: 50,
        total: 300,
        currency: None,
        status: InvoiceStatus::Draft,
        notes: None,
    }
}

/// A valid request for `customer` with the given reference id.
pub(crate) fn request_for(customer: &str, reference_id: &str) -> CreateInvoiceRequest {
    let mut request = sample_request();
    request.customer.name = customer.to_string();
    request.reference_id = reference_id.to_string();
    request
}
