use crate::{
    client::Transport,
    error::Result,
    http::{Endpoint, Method},
    resources::{json_body, segment},
};
use chrono::{DateTime, Utc};
use mgc_core::pagination::{IntoPage, ListQuery, NestedMeta, Page, Paginated, Traversal};
use mgc_core::query::QueryParams;
use serde::{Deserialize, Serialize};
use std::fmt;

const BASE_PATH: &str = "/volume/v1/volumes";

/// Related data to embed in volume responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VolumeExpand {
    /// Full volume type, IOPS included.
    VolumeType,
    /// Attachment and instance details.
    Attachment,
}

impl VolumeExpand {
    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            VolumeExpand::VolumeType => "volume_type",
            VolumeExpand::Attachment => "attachment",
        }
    }
}

impl fmt::Display for VolumeExpand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// IOPS limits of a volume type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Iops {
    /// Read operations per second.
    #[serde(default)]
    pub read: u32,
    /// Write operations per second.
    #[serde(default)]
    pub write: u32,
    /// Combined operations per second.
    #[serde(default)]
    pub total: u32,
}

/// Volume type. Only `id` is present unless expanded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeType {
    /// Type ID.
    pub id: String,
    /// IOPS limits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iops: Option<Iops>,
    /// Type name, e.g. `cloud_nvme1k`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Disk technology.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_type: Option<String>,
    /// Type status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Failure reported on a volume in `error` status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeError {
    /// Machine-readable code.
    #[serde(default)]
    pub slug: String,
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
}

/// Instance a volume is attached to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentInstance {
    #[allow(missing_docs)]
    #[serde(default)]
    pub id: Option<String>,
    #[allow(missing_docs)]
    #[serde(default)]
    pub name: Option<String>,
    #[allow(missing_docs)]
    #[serde(default)]
    pub status: Option<String>,
    #[allow(missing_docs)]
    #[serde(default)]
    pub state: Option<String>,
    #[allow(missing_docs)]
    #[serde(default, with = "crate::timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
    #[allow(missing_docs)]
    #[serde(default, with = "crate::timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Where and since when a volume is attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeAttachment {
    /// Attached instance.
    pub instance: AttachmentInstance,
    /// Attachment time.
    #[serde(default, with = "crate::timestamp::option")]
    pub attached_at: Option<DateTime<Utc>>,
    /// Device path inside the instance, e.g. `/dev/vdb`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
}

/// A block storage volume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volume {
    /// Volume ID.
    pub id: String,
    /// Volume name.
    pub name: String,
    /// Size in GiB.
    pub size: u32,
    /// Detailed status, e.g. `attaching`.
    #[serde(default)]
    pub status: String,
    /// Lifecycle state, e.g. `in-use`.
    #[serde(default)]
    pub state: String,
    /// Creation time.
    #[serde(default, with = "crate::timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(default, with = "crate::timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Volume type.
    #[serde(rename = "type", default)]
    pub volume_type: VolumeType,
    /// Failure details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<VolumeError>,
    /// Attachment details, when expanded and attached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<VolumeAttachment>,
    /// Zone the volume lives in.
    #[serde(default)]
    pub availability_zone: String,
    /// Zones the volume can be attached from.
    #[serde(default)]
    pub availability_zones: Vec<String>,
    /// Whether the volume is encrypted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encrypted: Option<bool>,
}

/// `{"meta": {"page": {...}}, "volumes": [...]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeList {
    /// Pagination metadata.
    #[serde(default)]
    pub meta: Option<NestedMeta>,
    /// Volumes of the page.
    #[serde(default)]
    pub volumes: Vec<Volume>,
}

impl IntoPage for VolumeList {
    type Item = Volume;

    fn into_page(self, requested: &ListQuery) -> Page<Volume> {
        Paginated {
            meta: self.meta,
            results: self.volumes,
        }
        .into_page(requested)
    }
}

/// Reference to an object by ID or by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdOrName {
    #[allow(missing_docs)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[allow(missing_docs)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl IdOrName {
    /// Reference by ID.
    pub fn id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: None,
        }
    }

    /// Reference by name.
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
        }
    }
}

/// Body of [`Volumes::create`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateVolumeRequest {
    /// Zone to create the volume in. The server picks one when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability_zone: Option<String>,
    /// Volume name.
    pub name: String,
    /// Size in GiB.
    pub size: u32,
    /// Volume type.
    #[serde(rename = "type")]
    pub volume_type: IdOrName,
    /// Snapshot to restore from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<IdOrName>,
    /// Encrypt the volume.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encrypted: Option<bool>,
}

/// Options of [`Volumes::list`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListVolumesOptions {
    /// Page to fetch.
    pub query: ListQuery,
    /// Related data to embed.
    pub expand: Vec<VolumeExpand>,
}

fn expand_params(expand: &[VolumeExpand]) -> QueryParams {
    let mut params = QueryParams::new();
    params.append_all("expand", expand.iter());
    params
}

#[derive(Deserialize)]
struct Created {
    id: String,
}

/// Volumes API resource.
#[derive(Clone, Debug)]
pub struct Volumes {
    transport: Transport,
}

resource!(Volumes);

impl Volumes {
    /// Fetch one page of volumes.
    pub async fn list(&self, options: ListVolumesOptions) -> Result<Page<Volume>> {
        let mut params = expand_params(&options.expand);
        options.query.apply_to(&mut params);

        let body: VolumeList = self
            .transport
            .send(Endpoint::Regional, Method::GET, BASE_PATH, &params, None)
            .await?
            .parse_result()?;

        Ok(body.into_page(&options.query))
    }

    /// Fetch every volume, 50 per request, embedding `expand` in each.
    pub async fn list_all(&self, expand: &[VolumeExpand]) -> Result<Vec<Volume>> {
        self.list_all_with(expand, self.transport.traversal()).await
    }

    /// Fetch every volume with a custom traversal.
    pub async fn list_all_with(
        &self,
        expand: &[VolumeExpand],
        traversal: Traversal,
    ) -> Result<Vec<Volume>> {
        traversal
            .collect(ListQuery::default(), |query| {
                self.list(ListVolumesOptions {
                    query,
                    expand: expand.to_vec(),
                })
            })
            .await
    }

    /// Create a volume and return its ID.
    pub async fn create(&self, request: CreateVolumeRequest) -> Result<String> {
        let created: Created = self
            .transport
            .send(
                Endpoint::Regional,
                Method::POST,
                BASE_PATH,
                &QueryParams::new(),
                json_body(&request),
            )
            .await?
            .parse_result()?;
        Ok(created.id)
    }

    /// Get a volume by ID.
    pub async fn get(&self, volume_id: &str, expand: &[VolumeExpand]) -> Result<Volume> {
        let path = format!("{BASE_PATH}/{}", segment("volume_id", volume_id)?);
        self.transport
            .send(Endpoint::Regional, Method::GET, &path, &expand_params(expand), None)
            .await?
            .parse_result()
    }

    /// Delete a detached volume.
    pub async fn delete(&self, volume_id: &str) -> Result<()> {
        let path = format!("{BASE_PATH}/{}", segment("volume_id", volume_id)?);
        self.action(Method::DELETE, &path, None).await
    }

    /// Rename a volume.
    pub async fn rename(&self, volume_id: &str, name: impl Into<String>) -> Result<()> {
        #[derive(Serialize)]
        struct Rename {
            name: String,
        }

        let path = format!("{BASE_PATH}/{}/rename", segment("volume_id", volume_id)?);
        let body = Rename { name: name.into() };
        self.action(Method::PATCH, &path, json_body(&body)).await
    }

    /// Grow a volume to `size` GiB.
    pub async fn extend(&self, volume_id: &str, size: u32) -> Result<()> {
        #[derive(Serialize)]
        struct Extend {
            size: u32,
        }

        let path = format!("{BASE_PATH}/{}/extend", segment("volume_id", volume_id)?);
        self.action(Method::POST, &path, json_body(&Extend { size })).await
    }

    /// Change the type of a volume.
    pub async fn retype(&self, volume_id: &str, new_type: IdOrName) -> Result<()> {
        #[derive(Serialize)]
        struct Retype {
            new_type: IdOrName,
        }

        let path = format!("{BASE_PATH}/{}/retype", segment("volume_id", volume_id)?);
        self.action(Method::POST, &path, json_body(&Retype { new_type })).await
    }

    /// Attach a volume to an instance.
    pub async fn attach(&self, volume_id: &str, instance_id: &str) -> Result<()> {
        let path = format!(
            "{BASE_PATH}/{}/attach/{}",
            segment("volume_id", volume_id)?,
            segment("instance_id", instance_id)?
        );
        self.action(Method::POST, &path, None).await
    }

    /// Detach a volume from its instance.
    pub async fn detach(&self, volume_id: &str) -> Result<()> {
        let path = format!("{BASE_PATH}/{}/detach", segment("volume_id", volume_id)?);
        self.action(Method::POST, &path, None).await
    }

    async fn action(
        &self,
        method: Method,
        path: &str,
        body: Option<&(dyn erased_serde::Serialize + Send + Sync)>,
    ) -> Result<()> {
        self.transport
            .send(Endpoint::Regional, method, path, &QueryParams::new(), body)
            .await?;
        Ok(())
    }
}
