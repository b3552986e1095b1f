use super::types::{CreateAclRequest, IdResponse};
use super::{nested_item_path, nested_path};
use crate::{
    client::Transport,
    error::Result,
    http::{Endpoint, Method},
    resources::json_body,
};
use mgc_core::query::QueryParams;
use serde::Serialize;

const COLLECTION: &str = "acls";

#[derive(Serialize)]
struct ReplaceAclsBody<'a> {
    acls: &'a [CreateAclRequest],
}

/// ACL rules of a load balancer.
#[derive(Clone, Debug)]
pub struct Acls {
    transport: Transport,
}

resource!(Acls);

impl Acls {
    /// Add a rule, returning its ID.
    pub async fn create(
        &self,
        load_balancer_id: &str,
        request: CreateAclRequest,
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

    /// Replace every rule at once. An empty list removes them all.
    pub async fn replace(&self, load_balancer_id: &str, acls: Vec<CreateAclRequest>) -> Result<()> {
        let body = ReplaceAclsBody { acls: &acls };
        self.transport
            .send(
                Endpoint::Regional,
                Method::PUT,
                &nested_path(load_balancer_id, COLLECTION)?,
                &QueryParams::new(),
                json_body(&body),
            )
            .await?;
        Ok(())
    }

    /// Delete a rule.
    pub async fn delete(&self, load_balancer_id: &str, acl_id: &str) -> Result<()> {
        self.transport
            .send(
                Endpoint::Regional,
                Method::DELETE,
                &nested_item_path(load_balancer_id, COLLECTION, "acl_id", acl_id)?,
                &QueryParams::new(),
                None,
            )
            .await?
            .ensure_success()
    }
}
