//! SSH keys API endpoint
//!
//! Keys belong to the account, not to a region, so requests always go to the
//! global gateway.

use super::{json_body, segment};
use crate::{
    client::Transport,
    error::Result,
    http::{Endpoint, Method},
};
use mgc_core::pagination::{IntoPage, ListQuery, Page, ResultsOnly, Traversal};
use mgc_core::query::QueryParams;
use serde::{Deserialize, Serialize};

const BASE_PATH: &str = "/profile/v0/ssh-keys";

/// A public key registered on the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshKey {
    /// Key ID.
    pub id: String,
    /// Key name.
    pub name: String,
    /// Public key material.
    pub key: String,
    /// Algorithm, e.g. `ssh-rsa` or `ssh-ed25519`.
    #[serde(default)]
    pub key_type: String,
}

/// Body of [`SshKeys::create`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSshKeyRequest {
    /// Key name.
    pub name: String,
    /// Public key material.
    pub key: String,
}

impl CreateSshKeyRequest {
    /// Create a request from a name and public key.
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
        }
    }
}

/// SSH keys API resource.
#[derive(Clone, Debug)]
pub struct SshKeys {
    transport: Transport,
}

resource!(SshKeys);

impl SshKeys {
    /// Fetch one page of keys.
    pub async fn list(&self, query: ListQuery) -> Result<Page<SshKey>> {
        let body: ResultsOnly<SshKey> = self
            .transport
            .send(Endpoint::Global, Method::GET, BASE_PATH, &query.to_query_params(), None)
            .await?
            .parse_result()?;

        Ok(body.into_page(&query))
    }

    /// Fetch every key, 50 per request.
    pub async fn list_all(&self) -> Result<Vec<SshKey>> {
        self.list_all_with(self.transport.traversal()).await
    }

    /// Fetch every key with a custom traversal.
    pub async fn list_all_with(&self, traversal: Traversal) -> Result<Vec<SshKey>> {
        traversal
            .collect(ListQuery::default(), |query| self.list(query))
            .await
    }

    /// Register a new key.
    pub async fn create(&self, request: CreateSshKeyRequest) -> Result<SshKey> {
        self.transport
            .send(
                Endpoint::Global,
                Method::POST,
                BASE_PATH,
                &QueryParams::new(),
                json_body(&request),
            )
            .await?
            .parse_result()
    }

    /// Get a key by ID.
    pub async fn get(&self, key_id: &str) -> Result<SshKey> {
        let path = format!("{BASE_PATH}/{}", segment("key_id", key_id)?);
        self.transport
            .send(Endpoint::Global, Method::GET, &path, &QueryParams::new(), None)
            .await?
            .parse_result()
    }

    /// Delete a key, returning it as it was.
    pub async fn delete(&self, key_id: &str) -> Result<SshKey> {
        let path = format!("{BASE_PATH}/{}", segment("key_id", key_id)?);
        self.transport
            .send(Endpoint::Global, Method::DELETE, &path, &QueryParams::new(), None)
            .await?
            .parse_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_key_list() {
        let body = r#"{"results": [
            {"id": "k1", "name": "laptop", "key": "ssh-ed25519 AAAA", "key_type": "ssh-ed25519"}
        ]}"#;
        let page = serde_json::from_str::<ResultsOnly<SshKey>>(body)
            .unwrap()
            .into_page(&ListQuery::new().limit(50));

        assert_eq!(page.len(), 1);
        assert_eq!(page.results[0].key_type, "ssh-ed25519");
        assert_eq!(page.meta.limit, 50);
    }

    #[test]
    fn test_create_request_body() {
        let body =
            serde_json::to_value(CreateSshKeyRequest::new("laptop", "ssh-rsa AAAA")).unwrap();
        assert_eq!(body, serde_json::json!({"name": "laptop", "key": "ssh-rsa AAAA"}));
    }
}
