use core::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use invoicer_core::{CustomerId, DomainError, InvoiceId, InvoiceItemPublicId, InvoicePublicId};
use invoicer_customers::{CreateCustomerRequest, Customer};

/// Invoice status. Stored as-is; no transitions are modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
    Cancelled,
}

impl InvoiceStatus {
    pub const ALL: [InvoiceStatus; 5] = [
        InvoiceStatus::Draft,
        InvoiceStatus::Sent,
        InvoiceStatus::Paid,
        InvoiceStatus::Overdue,
        InvoiceStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Sent => "sent",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
            InvoiceStatus::Cancelled => "cancelled",
        }
    }
}

impl core::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InvoiceStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "invalid status '{s}': expected one of draft, sent, paid, overdue, cancelled"
                ))
            })
    }
}

/// Invoice line. Belongs exclusively to one invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub public_id: InvoiceItemPublicId,
    pub description: String,
    pub quantity: u64,
    /// Price in smallest currency unit (e.g., cents).
    pub unit_price: u64,
    /// `unit_price * quantity`, in smallest currency unit.
    pub total: u64,
}

/// Aggregate root: Invoice (with its customer and items).
///
/// `id` is owned by storage and stays `None` until persisted. All amounts are
/// in the smallest currency unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: Option<InvoiceId>,
    pub public_id: InvoicePublicId,
    /// Caller-supplied external reference; not guaranteed unique.
    pub reference_id: String,
    pub customer: Customer,
    pub number: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub items: Vec<InvoiceItem>,
    pub subtotal: u64,
    pub tax: u64,
    pub total: u64,
    pub currency: String,
    pub status: InvoiceStatus,
    pub notes: Option<String>,
}

impl Invoice {
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn customer_id(&self) -> Option<CustomerId> {
        self.customer.id
    }
}

/// Line of an invoice creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateInvoiceItemRequest {
    pub description: String,
    pub quantity: u64,
    pub unit_price: u64,
    pub total: u64,
}

/// Request to create an invoice together with its customer.
///
/// Shape-level validation (required fields, status literal) happens in the
/// request layer; financial and date consistency is checked by
/// [`crate::validation::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateInvoiceRequest {
    pub reference_id: String,
    pub number: String,
    pub customer: CreateCustomerRequest,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub items: Vec<CreateInvoiceItemRequest>,
    pub subtotal: u64,
    pub tax: u64,
    pub total: u64,
    pub currency: Option<String>,
    pub status: InvoiceStatus,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_every_allowed_literal() {
        for status in InvoiceStatus::ALL {
            assert_eq!(status.as_str().parse::<InvoiceStatus>().unwrap(), status);
        }
    }

    #[test]
    fn status_rejects_unknown_literal() {
        let err = "archived".parse::<InvoiceStatus>().unwrap_err();
        match err {
            DomainError::Validation(msg) if msg.contains("invalid status 'archived'") => {}
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn status_literal_is_case_sensitive() {
        assert!("Draft".parse::<InvoiceStatus>().is_err());
    }
}
