use super::volumes::IdOrName;
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

const BASE_PATH: &str = "/volume/v1/schedulers";

/// Related data to embed in scheduler responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchedulerExpand {
    /// Details of the scheduled volumes.
    Volume,
}

impl SchedulerExpand {
    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            SchedulerExpand::Volume => "volume",
        }
    }
}

impl fmt::Display for SchedulerExpand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulerState {
    #[allow(missing_docs)]
    Available,
    #[allow(missing_docs)]
    Deleted,
    /// A value this SDK does not know yet.
    #[serde(other)]
    Unknown,
}

/// Daily run time, `HH:MM:SS` in UTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyFrequency {
    #[allow(missing_docs)]
    pub start_time: String,
}

/// How often snapshots are taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frequency {
    #[allow(missing_docs)]
    pub daily: DailyFrequency,
}

/// Snapshot policy of a scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerPolicy {
    /// Days a snapshot is kept.
    pub retention_in_days: u32,
    /// Run frequency.
    pub frequency: Frequency,
}

impl SchedulerPolicy {
    /// Daily snapshots at `start_time`, kept for `retention_in_days`.
    pub fn daily(start_time: impl Into<String>, retention_in_days: u32) -> Self {
        Self {
            retention_in_days,
            frequency: Frequency {
                daily: DailyFrequency {
                    start_time: start_time.into(),
                },
            },
        }
    }
}

/// Kind of snapshot the scheduler takes, e.g. `instant`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotConfig {
    #[allow(missing_docs)]
    #[serde(rename = "type")]
    pub kind: String,
}

/// A snapshot scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheduler {
    /// Scheduler ID.
    pub id: String,
    /// Name.
    pub name: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// IDs of the scheduled volumes.
    #[serde(default)]
    pub volumes: Vec<String>,
    /// Snapshot kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<SnapshotConfig>,
    /// Lifecycle state.
    pub state: SchedulerState,
    /// Snapshot policy.
    pub policy: SchedulerPolicy,
    /// Creation time.
    #[serde(default, with = "crate::timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(default, with = "crate::timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// `{"meta": {"page": {...}}, "schedulers": [...]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerList {
    /// Pagination metadata.
    #[serde(default)]
    pub meta: Option<NestedMeta>,
    /// Schedulers of the page.
    #[serde(default)]
    pub schedulers: Vec<Scheduler>,
}

impl IntoPage for SchedulerList {
    type Item = Scheduler;

    fn into_page(self, requested: &ListQuery) -> Page<Scheduler> {
        Paginated {
            meta: self.meta,
            results: self.schedulers,
        }
        .into_page(requested)
    }
}

/// Options of [`Schedulers::list`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListSchedulersOptions {
    /// Page to fetch.
    pub query: ListQuery,
    /// Related data to embed.
    pub expand: Vec<SchedulerExpand>,
}

/// Body of [`Schedulers::create`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSchedulerRequest {
    /// Name.
    pub name: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Snapshot kind.
    pub snapshot: SnapshotConfig,
    /// Snapshot policy.
    pub policy: SchedulerPolicy,
}

fn expand_params(expand: &[SchedulerExpand]) -> QueryParams {
    let mut params = QueryParams::new();
    params.append_all("expand", expand.iter());
    params
}

#[derive(Deserialize)]
struct Created {
    id: String,
}

#[derive(Serialize)]
struct VolumeRef<'a> {
    volume: &'a IdOrName,
}

/// Snapshot schedulers API resource.
#[derive(Clone, Debug)]
pub struct Schedulers {
    transport: Transport,
}

resource!(Schedulers);

impl Schedulers {
    /// Fetch one page of schedulers.
    pub async fn list(&self, options: ListSchedulersOptions) -> Result<Page<Scheduler>> {
        let mut params = expand_params(&options.expand);
        options.query.apply_to(&mut params);

        let body: SchedulerList = self
            .transport
            .send(Endpoint::Regional, Method::GET, BASE_PATH, &params, None)
            .await?
            .parse_result()?;

        Ok(body.into_page(&options.query))
    }

    /// Fetch every scheduler, 50 per request.
    ///
    /// `sort` and `expand` are sent on every page.
    pub async fn list_all(
        &self,
        sort: Option<&str>,
        expand: &[SchedulerExpand],
    ) -> Result<Vec<Scheduler>> {
        self.list_all_with(sort, expand, self.transport.traversal()).await
    }

    /// Fetch every scheduler with a custom traversal.
    pub async fn list_all_with(
        &self,
        sort: Option<&str>,
        expand: &[SchedulerExpand],
        traversal: Traversal,
    ) -> Result<Vec<Scheduler>> {
        let base = ListQuery {
            sort: sort.map(str::to_string),
            ..ListQuery::default()
        };
        traversal
            .collect(base, |query| {
                self.list(ListSchedulersOptions {
                    query,
                    expand: expand.to_vec(),
                })
            })
            .await
    }

    /// Create a scheduler and return its ID.
    pub async fn create(&self, request: CreateSchedulerRequest) -> Result<String> {
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

    /// Get a scheduler by ID.
    pub async fn get(&self, scheduler_id: &str, expand: &[SchedulerExpand]) -> Result<Scheduler> {
        let path = format!("{BASE_PATH}/{}", segment("scheduler_id", scheduler_id)?);
        self.transport
            .send(Endpoint::Regional, Method::GET, &path, &expand_params(expand), None)
            .await?
            .parse_result()
    }

    /// Delete a scheduler.
    pub async fn delete(&self, scheduler_id: &str) -> Result<()> {
        let path = format!("{BASE_PATH}/{}", segment("scheduler_id", scheduler_id)?);
        self.transport
            .send(Endpoint::Regional, Method::DELETE, &path, &QueryParams::new(), None)
            .await?;
        Ok(())
    }

    /// Put a volume under the scheduler's policy.
    pub async fn attach_volume(&self, scheduler_id: &str, volume: &IdOrName) -> Result<()> {
        self.volume_action(scheduler_id, "attach", volume).await
    }

    /// Remove a volume from the scheduler's policy.
    pub async fn detach_volume(&self, scheduler_id: &str, volume: &IdOrName) -> Result<()> {
        self.volume_action(scheduler_id, "detach", volume).await
    }

    async fn volume_action(
        &self,
        scheduler_id: &str,
        action: &str,
        volume: &IdOrName,
    ) -> Result<()> {
        let path = format!("{BASE_PATH}/{}/{action}", segment("scheduler_id", scheduler_id)?);
        self.transport
            .send(
                Endpoint::Regional,
                Method::POST,
                &path,
                &QueryParams::new(),
                json_body(&VolumeRef { volume }),
            )
            .await?;
        Ok(())
    }
}
