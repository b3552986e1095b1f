use super::{BASE_PATH, TENANT_PARAM};
use crate::{
    client::Transport,
    error::Result,
    http::{Endpoint, Method},
};
use chrono::{DateTime, Utc};
use mgc_core::pagination::{FlatPaginated, IntoPage, ListQuery, Page, Traversal};
use mgc_core::query::QueryParams;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One audit record, in CloudEvents shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Event ID.
    pub id: String,
    /// Emitting system.
    #[serde(default)]
    pub source: String,
    /// Event type, e.g. `cloud.magalu.vm.instance.create`.
    #[serde(rename = "type", default)]
    pub event_type: String,
    /// CloudEvents spec version.
    #[serde(default)]
    pub specversion: String,
    /// Affected resource.
    #[serde(default)]
    pub subject: String,
    /// When the event happened. Zone-less values are read as UTC.
    #[serde(with = "crate::timestamp")]
    pub time: DateTime<Utc>,
    /// Identity that performed the action.
    #[serde(default)]
    pub authid: String,
    /// Kind of identity.
    #[serde(default)]
    pub authtype: String,
    /// Product the event belongs to.
    #[serde(default)]
    pub product: String,
    /// Region, for regional products.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Tenant ID.
    #[serde(default)]
    pub tenantid: String,
    /// Event payload as sent by the server.
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Filters of an event listing, held constant while paginating.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    /// Exact event ID.
    pub id: Option<String>,
    /// Pattern matched against `source`.
    pub source_like: Option<String>,
    /// Pattern matched against `type`.
    pub type_like: Option<String>,
    /// Pattern matched against `product`.
    pub product_like: Option<String>,
    /// Exact identity.
    pub auth_id: Option<String>,
    /// Tenant to list events of.
    pub tenant_id: Option<String>,
    /// Payload matches, sent as `data.<key>=<value>`.
    pub data: BTreeMap<String, String>,
}

impl EventFilter {
    /// Filter matching everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Match `type` against a pattern.
    pub fn type_like(mut self, pattern: impl Into<String>) -> Self {
        self.type_like = Some(pattern.into());
        self
    }

    /// Match `product` against a pattern.
    pub fn product_like(mut self, pattern: impl Into<String>) -> Self {
        self.product_like = Some(pattern.into());
        self
    }

    /// Restrict to one tenant.
    pub fn tenant_id(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }

    /// Add a payload match.
    pub fn data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub(crate) fn apply_to(&self, params: &mut QueryParams) {
        params
            .set_opt("id", self.id.as_deref())
            .set_opt("source__like", self.source_like.as_deref())
            .set_opt("type__like", self.type_like.as_deref())
            .set_opt("product__like", self.product_like.as_deref())
            .set_opt("authid", self.auth_id.as_deref())
            .set_opt(TENANT_PARAM, self.tenant_id.as_deref());
        for (key, value) in &self.data {
            params.set(format!("data.{key}"), value);
        }
    }
}

/// Parameters of [`Events::list`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListEventsParams {
    /// Filters.
    pub filter: EventFilter,
    /// Page to fetch.
    pub query: ListQuery,
}

impl ListEventsParams {
    pub(crate) fn to_query_params(&self) -> QueryParams {
        let mut params = self.query.to_query_params();
        self.filter.apply_to(&mut params);
        params
    }
}

/// Audit events API resource.
#[derive(Clone, Debug)]
pub struct Events {
    transport: Transport,
}

resource!(Events);

impl Events {
    /// Fetch one page of events.
    pub async fn list(&self, params: ListEventsParams) -> Result<Page<Event>> {
        let body: FlatPaginated<Event> = self
            .transport
            .send(
                Endpoint::Regional,
                Method::GET,
                &format!("{BASE_PATH}/events"),
                &params.to_query_params(),
                None,
            )
            .await?
            .parse_result()?;

        Ok(body.into_page(&params.query))
    }

    /// Fetch every event matching `filter`, 50 per request.
    pub async fn list_all(&self, filter: EventFilter) -> Result<Vec<Event>> {
        self.list_all_with(filter, self.transport.traversal()).await
    }

    /// Fetch every event matching `filter` with a custom traversal.
    pub async fn list_all_with(
        &self,
        filter: EventFilter,
        traversal: Traversal,
    ) -> Result<Vec<Event>> {
        traversal
            .collect(ListQuery::default(), |query| {
                self.list(ListEventsParams {
                    filter: filter.clone(),
                    query,
                })
            })
            .await
    }
}
