//! Audit API endpoints
//!
//! Read-only access to the account's audit trail, under `/audit/v0`.

mod event_types;
mod events;

pub use event_types::{EventType, EventTypeFilter, EventTypes, ListEventTypesParams};
pub use events::{Event, EventFilter, Events, ListEventsParams};

use crate::client::Transport;

const BASE_PATH: &str = "/audit/v0";

/// Query key of the tenant filter. It travels as a query parameter.
const TENANT_PARAM: &str = "X-Tenant-ID";

/// Audit API resource.
#[derive(Clone, Debug)]
pub struct Audit {
    transport: Transport,
}

resource!(Audit);

impl Audit {
    /// Audit events.
    pub fn events(&self) -> Events {
        Events::new(self.transport.clone())
    }

    /// Known event types.
    pub fn event_types(&self) -> EventTypes {
        EventTypes::new(self.transport.clone())
    }
}
