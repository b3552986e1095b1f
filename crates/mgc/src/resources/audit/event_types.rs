use super::{BASE_PATH, TENANT_PARAM};
use crate::{
    client::Transport,
    error::Result,
    http::{Endpoint, Method},
};
use mgc_core::pagination::{FlatPaginated, IntoPage, ListQuery, Page, Traversal};
use mgc_core::query::QueryParams;
use serde::{Deserialize, Serialize};

/// A category of audit events.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventType {
    /// Type name, e.g. `cloud.magalu.vm.instance.create`.
    #[serde(rename = "type")]
    pub event_type: String,
}

/// Filters of an event type listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventTypeFilter {
    /// Tenant to list event types of.
    pub tenant_id: Option<String>,
}

/// Parameters of [`EventTypes::list`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListEventTypesParams {
    /// Filters.
    pub filter: EventTypeFilter,
    /// Page to fetch.
    pub query: ListQuery,
}

impl ListEventTypesParams {
    pub(crate) fn to_query_params(&self) -> QueryParams {
        let mut params = self.query.to_query_params();
        params.set_opt(TENANT_PARAM, self.filter.tenant_id.as_deref());
        params
    }
}

/// Audit event types API resource.
#[derive(Clone, Debug)]
pub struct EventTypes {
    transport: Transport,
}

resource!(EventTypes);

impl EventTypes {
    /// Fetch one page of event types.
    pub async fn list(&self, params: ListEventTypesParams) -> Result<Page<EventType>> {
        let body: FlatPaginated<EventType> = self
            .transport
            .send(
                Endpoint::Regional,
                Method::GET,
                &format!("{BASE_PATH}/event-types"),
                &params.to_query_params(),
                None,
            )
            .await?
            .parse_result()?;

        Ok(body.into_page(&params.query))
    }

    /// Fetch every event type, 50 per request.
    pub async fn list_all(&self, filter: EventTypeFilter) -> Result<Vec<EventType>> {
        self.list_all_with(filter, self.transport.traversal()).await
    }

    /// Fetch every event type with a custom traversal.
    pub async fn list_all_with(
        &self,
        filter: EventTypeFilter,
        traversal: Traversal,
    ) -> Result<Vec<EventType>> {
        traversal
            .collect(ListQuery::default(), |query| {
                self.list(ListEventTypesParams {
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

    #[test]
    fn test_tenant_sent_as_query_param() {
        let params = ListEventTypesParams {
            filter: EventTypeFilter {
                tenant_id: Some("t-1".into()),
            },
            query: ListQuery::new().offset(50).limit(50),
        };

        assert_eq!(
            params.to_query_params().encode(),
            "X-Tenant-ID=t-1&_limit=50&_offset=50"
        );
    }
}
