use super::types::{CreateListenerRequest, Listener, UpdateListenerRequest};
use super::{nested_item_path, nested_path};
use crate::{
    client::Transport,
    error::Result,
    http::{Endpoint, Method},
    resources::{json_body, segment},
};
use mgc_core::pagination::{IntoPage, ListQuery, Page, Paginated, Traversal};
use mgc_core::query::QueryParams;

const COLLECTION: &str = "listeners";

/// Listeners of a load balancer.
#[derive(Clone, Debug)]
pub struct Listeners {
    transport: Transport,
}

resource!(Listeners);

impl Listeners {
    /// Create a listener forwarding to `backend_id`.
    pub async fn create(
        &self,
        load_balancer_id: &str,
        backend_id: &str,
        request: CreateListenerRequest,
    ) -> Result<Listener> {
        let mut query = QueryParams::new();
        query.set("backend_id", segment("backend_id", backend_id)?);

        self.transport
            .send(
                Endpoint::Regional,
                Method::POST,
                &nested_path(load_balancer_id, COLLECTION)?,
                &query,
                json_body(&request),
            )
            .await?
            .parse_result()
    }

    /// Get a listener by ID.
    pub async fn get(&self, load_balancer_id: &str, listener_id: &str) -> Result<Listener> {
        self.transport
            .send(
                Endpoint::Regional,
                Method::GET,
                &nested_item_path(load_balancer_id, COLLECTION, "listener_id", listener_id)?,
                &QueryParams::new(),
                None,
            )
            .await?
            .parse_result()
    }

    /// Fetch one page of listeners.
    pub async fn list(&self, load_balancer_id: &str, query: ListQuery) -> Result<Page<Listener>> {
        let body: Paginated<Listener> = self
            .transport
            .send(
                Endpoint::Regional,
                Method::GET,
                &nested_path(load_balancer_id, COLLECTION)?,
                &query.to_query_params(),
                None,
            )
            .await?
            .parse_result()?;

        Ok(body.into_page(&query))
    }

    /// Fetch every listener, 50 per request.
    pub async fn list_all(&self, load_balancer_id: &str) -> Result<Vec<Listener>> {
        self.list_all_with(load_balancer_id, self.transport.traversal())
            .await
    }

    /// Fetch every listener with a custom traversal.
    pub async fn list_all_with(
        &self,
        load_balancer_id: &str,
        traversal: Traversal,
    ) -> Result<Vec<Listener>> {
        traversal
            .collect(ListQuery::default(), |query| {
                self.list(load_balancer_id, query)
            })
            .await
    }

    /// Update a listener.
    pub async fn update(
        &self,
        load_balancer_id: &str,
        listener_id: &str,
        request: UpdateListenerRequest,
    ) -> Result<()> {
        self.transport
            .send(
                Endpoint::Regional,
                Method::PUT,
                &nested_item_path(load_balancer_id, COLLECTION, "listener_id", listener_id)?,
                &QueryParams::new(),
                json_body(&request),
            )
            .await?;
        Ok(())
    }

    /// Delete a listener.
    pub async fn delete(&self, load_balancer_id: &str, listener_id: &str) -> Result<()> {
        self.transport
            .send(
                Endpoint::Regional,
                Method::DELETE,
                &nested_item_path(load_balancer_id, COLLECTION, "listener_id", listener_id)?,
                &QueryParams::new(),
                None,
            )
            .await?
            .ensure_success()
    }
}
