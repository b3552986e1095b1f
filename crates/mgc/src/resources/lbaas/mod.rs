//! Network load balancer API
//!
//! Every sub-resource lives under a load balancer:
//! `/load-balancer/v0beta1/network-load-balancers/{load_balancer_id}/...`.
//!
//! ```no_run
//! # async fn example() -> mgc::Result<()> {
//! use mgc::Client;
//!
//! let client = Client::new("api-key")?;
//! let lbs = client.lbaas().load_balancers().list_all().await?;
//! for lb in &lbs {
//!     let backends = client.lbaas().backends().list_all(&lb.id).await?;
//!     println!("{}: {} backends", lb.name, backends.len());
//! }
//! # Ok(())
//! # }
//! ```

mod acls;
mod backends;
mod certificates;
mod health_checks;
mod listeners;
mod load_balancers;
pub mod types;

pub use acls::Acls;
pub use backends::{Backends, Targets};
pub use certificates::Certificates;
pub use health_checks::HealthChecks;
pub use listeners::Listeners;
pub use load_balancers::LoadBalancers;
pub use types::*;

use super::segment;
use crate::client::Transport;
use crate::error::Result;

pub(crate) const BASE_PATH: &str = "/load-balancer/v0beta1/network-load-balancers";

/// Path of a collection nested under a load balancer.
fn nested_path(load_balancer_id: &str, collection: &str) -> Result<String> {
    Ok(format!(
        "{BASE_PATH}/{}/{collection}",
        segment("load_balancer_id", load_balancer_id)?
    ))
}

/// Path of one item of a collection nested under a load balancer.
fn nested_item_path(
    load_balancer_id: &str,
    collection: &str,
    field: &str,
    item_id: &str,
) -> Result<String> {
    Ok(format!(
        "{}/{}",
        nested_path(load_balancer_id, collection)?,
        segment(field, item_id)?
    ))
}

/// Load balancing API resource.
#[derive(Clone, Debug)]
pub struct Lbaas {
    transport: Transport,
}

resource!(Lbaas);

impl Lbaas {
    /// Load balancers themselves.
    pub fn load_balancers(&self) -> LoadBalancers {
        LoadBalancers::new(self.transport.clone())
    }

    /// Listeners of a load balancer.
    pub fn listeners(&self) -> Listeners {
        Listeners::new(self.transport.clone())
    }

    /// Backends of a load balancer.
    pub fn backends(&self) -> Backends {
        Backends::new(self.transport.clone())
    }

    /// Targets of a backend.
    pub fn targets(&self) -> Targets {
        Targets::new(self.transport.clone())
    }

    /// Health checks of a load balancer.
    pub fn health_checks(&self) -> HealthChecks {
        HealthChecks::new(self.transport.clone())
    }

    /// TLS certificates of a load balancer.
    pub fn certificates(&self) -> Certificates {
        Certificates::new(self.transport.clone())
    }

    /// ACL rules of a load balancer.
    pub fn acls(&self) -> Acls {
        Acls::new(self.transport.clone())
    }
}
