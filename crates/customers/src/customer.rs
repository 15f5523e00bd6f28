use serde::{Deserialize, Serialize};

use invoicer_core::{AddressPublicId, CustomerId, CustomerPublicId};

/// Postal address of a customer. Every field except the identifier is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub public_id: AddressPublicId,
    pub street: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

/// Customer billed by an invoice.
///
/// `id` is owned by storage and stays `None` until the customer is persisted;
/// `public_id` is assigned once by [`crate::CustomerDomainService`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: Option<CustomerId>,
    pub public_id: CustomerPublicId,
    pub name: String,
    pub email: String,
    pub address: Option<Address>,
}

impl Customer {
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

/// Address part of a customer creation request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAddressRequest {
    pub street: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

/// Request to create a customer (input is validated by the request layer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCustomerRequest {
    pub name: String,
    pub email: String,
    pub address: Option<CreateAddressRequest>,
}
