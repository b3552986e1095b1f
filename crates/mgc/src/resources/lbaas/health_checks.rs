use super::types::{CreateHealthCheckRequest, HealthCheck, UpdateHealthCheckRequest};
use super::{nested_item_path, nested_path};
use crate::{
    client::Transport,
    error::Result,
    http::{Endpoint, Method},
    resources::json_body,
};
use mgc_core::pagination::{IntoPage, ListQuery, Page, Paginated, Traversal};
use mgc_core::query::QueryParams;

const COLLECTION: &str = "health-checks";

/// Health checks of a load balancer.
#[derive(Clone, Debug)]
pub struct HealthChecks {
    transport: Transport,
}

resource!(HealthChecks);

impl HealthChecks {
    /// Create a health check.
    pub async fn create(
        &self,
        load_balancer_id: &str,
        request: CreateHealthCheckRequest,
    ) -> Result<HealthCheck> {
        self.transport
            .send(
                Endpoint::Regional,
                Method::POST,
                &nested_path(load_balancer_id, COLLECTION)?,
                &QueryParams::new(),
                json_body(&request),
            )
            .await?
            .parse_result()
    }

    /// Get a health check by ID.
    pub async fn get(&self, load_balancer_id: &str, health_check_id: &str) -> Result<HealthCheck> {
        self.transport
            .send(
                Endpoint::Regional,
                Method::GET,
                &nested_item_path(
                    load_balancer_id,
                    COLLECTION,
                    "health_check_id",
                    health_check_id,
                )?,
                &QueryParams::new(),
                None,
            )
            .await?
            .parse_result()
    }

    /// Fetch one page of health checks.
    pub async fn list(
        &self,
        load_balancer_id: &str,
        query: ListQuery,
    ) -> Result<Page<HealthCheck>> {
        let body: Paginated<HealthCheck> = self
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

    /// Fetch every health check, 50 per request.
    pub async fn list_all(&self, load_balancer_id: &str) -> Result<Vec<HealthCheck>> {
        self.list_all_with(load_balancer_id, self.transport.traversal())
            .await
    }

    /// Fetch every health check with a custom traversal.
    pub async fn list_all_with(
        &self,
        load_balancer_id: &str,
        traversal: Traversal,
    ) -> Result<Vec<HealthCheck>> {
        traversal
            .collect(ListQuery::default(), |query| {
                self.list(load_balancer_id, query)
            })
            .await
    }

    /// Update a health check.
    pub async fn update(
        &self,
        load_balancer_id: &str,
        health_check_id: &str,
        request: UpdateHealthCheckRequest,
    ) -> Result<()> {
        self.transport
            .send(
                Endpoint::Regional,
                Method::PUT,
                &nested_item_path(
                    load_balancer_id,
                    COLLECTION,
                    "health_check_id",
                    health_check_id,
                )?,
                &QueryParams::new(),
                json_body(&request),
            )
            .await?;
        Ok(())
    }

    /// Delete a health check.
    pub async fn delete(&self, load_balancer_id: &str, health_check_id: &str) -> Result<()> {
        self.transport
            .send(
                Endpoint::Regional,
                Method::DELETE,
                &nested_item_path(
                    load_balancer_id,
                    COLLECTION,
                    "health_check_id",
                    health_check_id,
                )?,
                &QueryParams::new(),
                None,
            )
            .await?
            .ensure_success()
    }
}
