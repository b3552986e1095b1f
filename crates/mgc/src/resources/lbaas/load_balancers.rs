use super::types::{
    CreateLoadBalancerRequest, DeleteLoadBalancerRequest, IdResponse, LoadBalancer,
    UpdateLoadBalancerRequest,
};
use super::BASE_PATH;
use crate::{
    client::Transport,
    error::Result,
    http::{Endpoint, Method},
    resources::{json_body, segment},
};
use mgc_core::pagination::{IntoPage, ListQuery, Page, Paginated, Traversal};
use mgc_core::query::QueryParams;
use tracing::debug;

/// Network load balancers.
#[derive(Clone, Debug)]
pub struct LoadBalancers {
    transport: Transport,
}

resource!(LoadBalancers);

impl LoadBalancers {
    /// Create a load balancer, returning its ID. Provisioning continues in
    /// the background; poll [`get`](Self::get) for the status.
    pub async fn create(&self, request: CreateLoadBalancerRequest) -> Result<String> {
        let created: IdResponse = self
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

        debug!(load_balancer_id = %created.id, "load balancer created");
        Ok(created.id)
    }

    /// Get a load balancer by ID.
    pub async fn get(&self, load_balancer_id: &str) -> Result<LoadBalancer> {
        self.transport
            .send(
                Endpoint::Regional,
                Method::GET,
                &Self::item_path(load_balancer_id)?,
                &QueryParams::new(),
                None,
            )
            .await?
            .parse_result()
    }

    /// Fetch one page of load balancers.
    pub async fn list(&self, query: ListQuery) -> Result<Page<LoadBalancer>> {
        let body: Paginated<LoadBalancer> = self
            .transport
            .send(
                Endpoint::Regional,
                Method::GET,
                BASE_PATH,
                &query.to_query_params(),
                None,
            )
            .await?
            .parse_result()?;

        Ok(body.into_page(&query))
    }

    /// Fetch every load balancer, 50 per request.
    pub async fn list_all(&self) -> Result<Vec<LoadBalancer>> {
        self.list_all_with(self.transport.traversal()).await
    }

    /// Fetch every load balancer with a custom traversal.
    pub async fn list_all_with(&self, traversal: Traversal) -> Result<Vec<LoadBalancer>> {
        traversal
            .collect(ListQuery::default(), |query| self.list(query))
            .await
    }

    /// Update a load balancer, returning its ID.
    pub async fn update(
        &self,
        load_balancer_id: &str,
        request: UpdateLoadBalancerRequest,
    ) -> Result<String> {
        let updated: IdResponse = self
            .transport
            .send(
                Endpoint::Regional,
                Method::PUT,
                &Self::item_path(load_balancer_id)?,
                &QueryParams::new(),
                json_body(&request),
            )
            .await?
            .parse_result()?;

        Ok(updated.id)
    }

    /// Delete a load balancer.
    pub async fn delete(
        &self,
        load_balancer_id: &str,
        options: DeleteLoadBalancerRequest,
    ) -> Result<()> {
        let mut query = QueryParams::new();
        query.set_opt("delete_public_ip", options.delete_public_ip);

        self.transport
            .send(
                Endpoint::Regional,
                Method::DELETE,
                &Self::item_path(load_balancer_id)?,
                &query,
                None,
            )
            .await?
            .ensure_success()
    }

    fn item_path(load_balancer_id: &str) -> Result<String> {
        Ok(format!(
            "{BASE_PATH}/{}",
            segment("load_balancer_id", load_balancer_id)?
        ))
    }
}
