//! Identifiers used across the domain.
//!
//! Two families live here:
//! - **public ids**: opaque, prefixed tokens (`inv_<uuid>`) assigned by the
//!   domain services at creation and exposed to callers;
//! - **storage ids**: numeric keys assigned by the storage layer on persist and
//!   never exposed outside of it.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

macro_rules! impl_public_id {
    ($t:ident, $prefix:literal, $name:literal) => {
        #[doc = concat!("Public identifier of ", $name, " (`", $prefix, "_<uuid>`).")]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $t(String);

        impl $t {
            pub const PREFIX: &'static str = $prefix;

            /// Generate a fresh identifier.
            ///
            /// Draws a UUIDv4 from the process-wide random source; uniqueness is
            /// probabilistic and never checked against storage.
            pub fn generate() -> Self {
                Self(format!("{}_{}", $prefix, Uuid::new_v4()))
            }

            /// Wrap a value read back from storage without re-validating it.
            pub fn from_trusted(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let body = s
                    .strip_prefix($prefix)
                    .and_then(|rest| rest.strip_prefix('_'))
                    .ok_or_else(|| {
                        DomainError::invalid_id(format!(
                            "{}: expected prefix '{}_'",
                            $name, $prefix
                        ))
                    })?;
                Uuid::from_str(body)
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(s.to_string()))
            }
        }
    };
}

impl_public_id!(CustomerPublicId, "cus", "customer");
impl_public_id!(AddressPublicId, "addr", "address");
impl_public_id!(InvoicePublicId, "inv", "invoice");
impl_public_id!(InvoiceItemPublicId, "invi", "invoice item");

macro_rules! impl_storage_id {
    ($(#[$meta:meta])* $t:ident) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $t(i64);

        impl $t {
            pub fn new(value: i64) -> Self {
                Self(value)
            }

            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $t {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}

impl_storage_id!(
    /// Storage-assigned key of a customer.
    CustomerId
);
impl_storage_id!(
    /// Storage-assigned key of an invoice.
    InvoiceId
);
