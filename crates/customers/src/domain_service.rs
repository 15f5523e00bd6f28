//! Customer construction from creation requests.

use invoicer_core::{AddressPublicId, CustomerPublicId};

use crate::customer::{Address, CreateCustomerRequest, Customer};

/// Builds `Customer` aggregates and assigns their public identifiers.
///
/// Pure apart from identifier generation: no IO, no failure path.
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomerDomainService;

impl CustomerDomainService {
    pub fn new() -> Self {
        Self
    }

    /// Build a not-yet-persisted customer (`id` is `None`).
    pub fn build(&self, request: CreateCustomerRequest) -> Customer {
        let address = request.address.map(|a| Address {
            public_id: AddressPublicId::generate(),
            street: a.street,
            city: a.city,
            postal_code: a.postal_code,
            country: a.country,
        });

        Customer {
            id: None,
            public_id: CustomerPublicId::generate(),
            name: request.name,
            email: request.email,
            address,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::CreateAddressRequest;

    fn request(address: Option<CreateAddressRequest>) -> CreateCustomerRequest {
        CreateCustomerRequest {
            name: "Acme Corp".to_string(),
            email: "acme@example.com".to_string(),
            address,
        }
    }

    #[test]
    fn build_assigns_customer_public_id_and_no_storage_id() {
        let customer = CustomerDomainService::new().build(request(None));

        assert!(customer.public_id.as_str().starts_with("cus_"));
        assert_eq!(customer.id, None);
        assert!(!customer.is_persisted());
        assert_eq!(customer.name, "Acme Corp");
        assert_eq!(customer.email, "acme@example.com");
        assert!(customer.address.is_none());
    }

    #[test]
    fn build_assigns_separate_address_id_when_address_present() {
        let customer = CustomerDomainService::new().build(request(Some(CreateAddressRequest {
            street: Some("Main St 1".to_string()),
            city: Some("Berlin".to_string()),
            postal_code: None,
            country: Some("DE".to_string()),
        })));

        let address = customer.address.expect("address should be kept");
        assert!(address.public_id.as_str().starts_with("addr_"));
        assert_ne!(address.public_id.as_str(), customer.public_id.as_str());
        assert_eq!(address.street.as_deref(), Some("Main St 1"));
        assert_eq!(address.postal_code, None);
        assert_eq!(address.country.as_deref(), Some("DE"));
    }

    #[test]
    fn each_build_generates_a_new_identity() {
        let service = CustomerDomainService::new();
        let a = service.build(request(None));
        let b = service.build(request(None));
        assert_ne!(a.public_id, b.public_id);
    }
}
