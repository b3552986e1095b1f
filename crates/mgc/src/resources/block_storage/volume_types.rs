use super::volumes::Iops;
use crate::{
    client::Transport,
    error::Result,
    http::{Endpoint, Method},
};
use mgc_core::pagination::{IntoPage, ListQuery, NestedMeta, Page, Paginated, Traversal};
use mgc_core::query::QueryParams;
use serde::{Deserialize, Serialize};

const BASE_PATH: &str = "/volume/v1/volume-types";

/// A volume type offered in the region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeTypeInfo {
    /// Type ID.
    pub id: String,
    /// Type name, e.g. `cloud_nvme1k`.
    pub name: String,
    /// Disk technology, `nvme` or `hdd`.
    #[serde(default)]
    pub disk_type: String,
    /// Type status.
    #[serde(default)]
    pub status: String,
    /// IOPS limits.
    #[serde(default)]
    pub iops: Iops,
    /// Zones the type is available in.
    #[serde(default)]
    pub availability_zones: Vec<String>,
    /// Whether volumes of this type can be encrypted.
    #[serde(default)]
    pub allows_encryption: bool,
}

/// `{"meta": {"page": {...}}, "types": [...]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeTypeList {
    /// Pagination metadata.
    #[serde(default)]
    pub meta: Option<NestedMeta>,
    /// Volume types of the page.
    #[serde(default)]
    pub types: Vec<VolumeTypeInfo>,
}

impl IntoPage for VolumeTypeList {
    type Item = VolumeTypeInfo;

    fn into_page(self, requested: &ListQuery) -> Page<VolumeTypeInfo> {
        Paginated {
            meta: self.meta,
            results: self.types,
        }
        .into_page(requested)
    }
}

/// Filters of the volume types listing, sent unchanged on every page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VolumeTypeFilter {
    /// Only types offered in this zone.
    pub availability_zone: Option<String>,
    /// Only the type with this name.
    pub name: Option<String>,
    /// Only types that do (or do not) allow encryption.
    pub allows_encryption: Option<bool>,
}

impl VolumeTypeFilter {
    /// Filter matching every type.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one availability zone.
    pub fn availability_zone(mut self, zone: impl Into<String>) -> Self {
        self.availability_zone = Some(zone.into());
        self
    }

    /// Restrict to one type name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Restrict by encryption support.
    pub fn allows_encryption(mut self, allows: bool) -> Self {
        self.allows_encryption = Some(allows);
        self
    }

    fn apply_to(&self, params: &mut QueryParams) {
        params
            .set_opt("availability-zone", self.availability_zone.as_deref())
            .set_opt("name", self.name.as_deref())
            .set_opt("allows-encryption", self.allows_encryption);
    }
}

/// Options of [`VolumeTypes::list`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListVolumeTypesOptions {
    /// Filters.
    pub filter: VolumeTypeFilter,
    /// Page to fetch.
    pub query: ListQuery,
}

impl ListVolumeTypesOptions {
    fn to_query_params(&self) -> QueryParams {
        let mut params = self.query.to_query_params();
        self.filter.apply_to(&mut params);
        params
    }
}

/// Volume types API resource.
#[derive(Clone, Debug)]
pub struct VolumeTypes {
    transport: Transport,
}

resource!(VolumeTypes);

impl VolumeTypes {
    /// Fetch one page of volume types.
    pub async fn list(&self, options: ListVolumeTypesOptions) -> Result<Page<VolumeTypeInfo>> {
        let body: VolumeTypeList = self
            .transport
            .send(
                Endpoint::Regional,
                Method::GET,
                BASE_PATH,
                &options.to_query_params(),
                None,
            )
            .await?
            .parse_result()?;

        Ok(body.into_page(&options.query))
    }

    /// Fetch every volume type matching `filter`, 50 per request.
    pub async fn list_all(&self, filter: VolumeTypeFilter) -> Result<Vec<VolumeTypeInfo>> {
        self.list_all_with(filter, self.transport.traversal()).await
    }

    /// Fetch every volume type matching `filter` with a custom traversal.
    pub async fn list_all_with(
        &self,
        filter: VolumeTypeFilter,
        traversal: Traversal,
    ) -> Result<Vec<VolumeTypeInfo>> {
        traversal
            .collect(ListQuery::default(), |query| {
                self.list(ListVolumeTypesOptions {
                    filter: filter.clone(),
                    query,
                })
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_filter_wire_names() {
        let options = ListVolumeTypesOptions {
            filter: VolumeTypeFilter::new()
                .availability_zone("br-se1-a")
                .name("cloud_nvme1k")
                .allows_encryption(true),
            query: ListQuery::new().limit(10),
        };

        assert_eq!(
            options.to_query_params().encode(),
            "_limit=10&allows-encryption=true&availability-zone=br-se1-a&name=cloud_nvme1k"
        );
    }

    #[test]
    fn test_empty_filter_sends_only_page() {
        let options = ListVolumeTypesOptions {
            query: ListQuery::new().offset(50).limit(50),
            ..Default::default()
        };

        assert_eq!(options.to_query_params().encode(), "_limit=50&_offset=50");
    }

    #[test]
    fn test_decode_type_list() {
        let body = r#"{
            "meta": {"page": {"offset": 0, "limit": 50, "count": 1, "total": 1, "max_limit": 100}},
            "types": [{
                "id": "t-1",
                "name": "cloud_nvme1k",
                "disk_type": "nvme",
                "status": "active",
                "iops": {"read": 1000, "write": 1000, "total": 2000},
                "availability_zones": ["br-se1-a", "br-se1-b"],
                "allows_encryption": true
            }]
        }"#;
        let page = serde_json::from_str::<VolumeTypeList>(body)
            .unwrap()
            .into_page(&ListQuery::new().limit(50));

        assert_eq!(page.total(), Some(1));
        let kind = &page.results[0];
        assert_eq!(kind.iops.total, 2000);
        assert_eq!(kind.availability_zones.len(), 2);
        assert!(kind.allows_encryption);
    }
}
