//! Availability zones API endpoint

use crate::{
    client::Transport,
    error::Result,
    http::{Endpoint, Method},
};
use mgc_core::pagination::ResultsOnly;
use mgc_core::query::QueryParams;
use serde::{Deserialize, Serialize};

const BASE_PATH: &str = "/profile/v0/availability-zones";

/// Restriction applied to a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockType {
    /// Fully usable.
    None,
    /// No new resources nor changes.
    Total,
    /// Existing resources readable only.
    ReadOnly,
    /// A value this SDK does not know yet.
    #[serde(other)]
    Unknown,
}

/// One zone of a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityZone {
    /// Zone ID, e.g. `br-se1-a`.
    pub az_id: String,
    /// Restriction currently applied.
    pub block_type: BlockType,
}

/// A region and its zones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionZones {
    /// Region ID, e.g. `br-se1`.
    pub region_id: String,
    /// Zones of the region.
    #[serde(default)]
    pub availability_zones: Vec<AvailabilityZone>,
}

/// Options of [`AvailabilityZones::list`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListAvailabilityZonesOptions {
    /// Include blocked zones.
    pub show_blocked: bool,
}

/// Availability zones API resource.
#[derive(Clone, Debug)]
pub struct AvailabilityZones {
    transport: Transport,
}

resource!(AvailabilityZones);

impl AvailabilityZones {
    /// List every region with its zones. The collection is not paginated.
    pub async fn list(&self, options: ListAvailabilityZonesOptions) -> Result<Vec<RegionZones>> {
        let mut query = QueryParams::new();
        query.set("show_is_blocked", options.show_blocked);

        let body: ResultsOnly<RegionZones> = self
            .transport
            .send(Endpoint::Global, Method::GET, BASE_PATH, &query, None)
            .await?
            .parse_result()?;

        Ok(body.results)
    }
}
