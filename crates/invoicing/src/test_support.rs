//! Request fixtures shared by this crate's unit tests.

use chrono::NaiveDate;

use invoicer_customers::CreateCustomerRequest;

use crate::invoice::{CreateInvoiceItemRequest, CreateInvoiceRequest, InvoiceStatus};

pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub(crate) fn item(description: &str, quantity: u64, unit_price: u64, total: u64) -> CreateInvoiceItemRequest {
    CreateInvoiceItemRequest {
        description: description.to_string(),
        quantity,
        unit_price,
        total,
    }
}

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
        items: vec![item("Item 1", 2, 100, 200), item("Item 2", 1, 50, 50)],
        subtotal: 250,
        tax: 50,
        total: 300,
        currency: None,
        status: InvoiceStatus::Draft,
        notes: None,
    }
}
