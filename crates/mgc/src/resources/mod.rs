//! API resource endpoints
//!
//! This module contains the implementation of all API endpoints,
//! organized by product.

/// Implements [`Resource`] and a crate-private `new` for a struct holding a
/// `transport` field.
macro_rules! resource {
    ($name:ident) => {
        impl $name {
            pub(crate) fn new(transport: $crate::client::Transport) -> Self {
                Self { transport }
            }
        }

        impl $crate::resources::Resource for $name {
            fn transport(&self) -> &$crate::client::Transport {
                &self.transport
            }
        }
    };
}

pub mod audit;
pub mod availability_zones;
pub mod block_storage;
pub mod lbaas;
pub mod ssh_keys;

pub use audit::{Audit, EventTypes, Events};
pub use availability_zones::AvailabilityZones;
pub use block_storage::{BlockStorage, Schedulers, VolumeTypes, Volumes};
pub use lbaas::Lbaas;
pub use ssh_keys::SshKeys;

use crate::client::Transport;
use crate::error::{Error, Result};
use serde::Serialize;

/// Base trait for API resources.
pub trait Resource {
    /// Get a reference to the transport.
    fn transport(&self) -> &Transport;
}

/// Reject an empty path segment before it turns into a malformed URL.
pub(crate) fn segment<'a>(field: &str, value: &'a str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(Error::validation(field, format!("{field} cannot be empty")));
    }
    Ok(value)
}

pub(crate) fn json_body<T: Serialize + Send + Sync>(
    value: &T,
) -> Option<&(dyn erased_serde::Serialize + Send + Sync)> {
    let body: &(dyn erased_serde::Serialize + Send + Sync) = value;
    Some(body)
}
