use super::types::{Backend, BackendTargets, CreateBackendRequest, IdResponse, UpdateBackendRequest};
use super::{nested_item_path, nested_path};
use crate::{
    client::Transport,
    error::Result,
    http::{Endpoint, Method},
    resources::{json_body, segment},
};
use mgc_core::pagination::{IntoPage, ListQuery, Page, Paginated, Traversal};
use mgc_core::query::QueryParams;
use tracing::debug;

const COLLECTION: &str = "backends";

/// Backends of a load balancer.
#[derive(Clone, Debug)]
pub struct Backends {
    transport: Transport,
}

resource!(Backends);

impl Backends {
    /// Create a backend, returning its ID.
    pub async fn create(
        &self,
        load_balancer_id: &str,
        request: CreateBackendRequest,
    ) -> Result<String> {
        let created: IdResponse = self
            .transport
            .send(
                Endpoint::Regional,
                Method::POST,
                &nested_path(load_balancer_id, COLLECTION)?,
                &QueryParams::new(),
                json_body(&request),
            )
            .await?
            .parse_result()?;

        Ok(created.id)
    }

    /// Get a backend by ID.
    pub async fn get(&self, load_balancer_id: &str, backend_id: &str) -> Result<Backend> {
        self.transport
            .send(
                Endpoint::Regional,
                Method::GET,
                &nested_item_path(load_balancer_id, COLLECTION, "backend_id", backend_id)?,
                &QueryParams::new(),
                None,
            )
            .await?
            .parse_result()
    }

    /// Fetch one page of backends.
    pub async fn list(&self, load_balancer_id: &str, query: ListQuery) -> Result<Page<Backend>> {
        let body: Paginated<Backend> = self
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

    /// Fetch every backend, 50 per request.
    pub async fn list_all(&self, load_balancer_id: &str) -> Result<Vec<Backend>> {
        self.list_all_with(load_balancer_id, self.transport.traversal())
            .await
    }

    /// Fetch every backend with a custom traversal.
    pub async fn list_all_with(
        &self,
        load_balancer_id: &str,
        traversal: Traversal,
    ) -> Result<Vec<Backend>> {
        traversal
            .collect(ListQuery::default(), |query| {
                self.list(load_balancer_id, query)
            })
            .await
    }

    /// Update a backend, returning its ID.
    pub async fn update(
        &self,
        load_balancer_id: &str,
        backend_id: &str,
        request: UpdateBackendRequest,
    ) -> Result<String> {
        let updated: IdResponse = self
            .transport
            .send(
                Endpoint::Regional,
                Method::PUT,
                &nested_item_path(load_balancer_id, COLLECTION, "backend_id", backend_id)?,
                &QueryParams::new(),
                json_body(&request),
            )
            .await?
            .parse_result()?;

        Ok(updated.id)
    }

    /// Delete a backend.
    pub async fn delete(&self, load_balancer_id: &str, backend_id: &str) -> Result<()> {
        self.transport
            .send(
                Endpoint::Regional,
                Method::DELETE,
                &nested_item_path(load_balancer_id, COLLECTION, "backend_id", backend_id)?,
                &QueryParams::new(),
                None,
            )
            .await?
            .ensure_success()
    }
}

/// Targets of a backend.
#[derive(Clone, Debug)]
pub struct Targets {
    transport: Transport,
}

resource!(Targets);

impl Targets {
    /// Set the targets of a backend, returning the backend ID.
    pub async fn replace(
        &self,
        load_balancer_id: &str,
        backend_id: &str,
        targets: BackendTargets,
    ) -> Result<String> {
        let path = format!(
            "{}/targets",
            nested_item_path(load_balancer_id, COLLECTION, "backend_id", backend_id)?
        );
        debug!(
            backend_id,
            targets_type = ?targets.kind(),
            count = targets.len(),
            "replacing backend targets"
        );

        let replaced: IdResponse = self
            .transport
            .send(
                Endpoint::Regional,
                Method::POST,
                &path,
                &QueryParams::new(),
                json_body(&targets),
            )
            .await?
            .parse_result()?;

        Ok(replaced.id)
    }

    /// Remove one target from a backend.
    pub async fn delete(
        &self,
        load_balancer_id: &str,
        backend_id: &str,
        target_id: &str,
    ) -> Result<()> {
        let path = format!(
            "{}/targets/{}",
            nested_item_path(load_balancer_id, COLLECTION, "backend_id", backend_id)?,
            segment("target_id", target_id)?
        );

        self.transport
            .send(
                Endpoint::Regional,
                Method::DELETE,
                &path,
                &QueryParams::new(),
                None,
            )
            .await?
            .ensure_success()
    }
}
