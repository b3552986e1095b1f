use super::types::{Certificate, CreateCertificateRequest, UpdateCertificateRequest};
use super::{nested_item_path, nested_path};
use crate::{
    client::Transport,
    error::{Error, Result},
    http::{Endpoint, Method},
    resources::json_body,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use mgc_core::pagination::{IntoPage, ListQuery, Page, Paginated, Traversal};
use mgc_core::query::QueryParams;

const COLLECTION: &str = "tls-certificates";

/// TLS certificates of a load balancer.
///
/// Certificate and key are checked to be base64 before anything is sent.
#[derive(Clone, Debug)]
pub struct Certificates {
    transport: Transport,
}

resource!(Certificates);

impl Certificates {
    /// Upload a certificate.
    pub async fn create(
        &self,
        load_balancer_id: &str,
        request: CreateCertificateRequest,
    ) -> Result<Certificate> {
        validate_pem_pair(&request.certificate, &request.private_key)?;

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

    /// Get a certificate by ID.
    pub async fn get(&self, load_balancer_id: &str, certificate_id: &str) -> Result<Certificate> {
        self.transport
            .send(
                Endpoint::Regional,
                Method::GET,
                &nested_item_path(load_balancer_id, COLLECTION, "certificate_id", certificate_id)?,
                &QueryParams::new(),
                None,
            )
            .await?
            .parse_result()
    }

    /// Fetch one page of certificates.
    pub async fn list(
        &self,
        load_balancer_id: &str,
        query: ListQuery,
    ) -> Result<Page<Certificate>> {
        let body: Paginated<Certificate> = self
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

    /// Fetch every certificate, 50 per request.
    pub async fn list_all(&self, load_balancer_id: &str) -> Result<Vec<Certificate>> {
        self.list_all_with(load_balancer_id, self.transport.traversal())
            .await
    }

    /// Fetch every certificate with a custom traversal.
    pub async fn list_all_with(
        &self,
        load_balancer_id: &str,
        traversal: Traversal,
    ) -> Result<Vec<Certificate>> {
        traversal
            .collect(ListQuery::default(), |query| {
                self.list(load_balancer_id, query)
            })
            .await
    }

    /// Replace the certificate and key.
    pub async fn update(
        &self,
        load_balancer_id: &str,
        certificate_id: &str,
        request: UpdateCertificateRequest,
    ) -> Result<()> {
        validate_pem_pair(&request.certificate, &request.private_key)?;

        self.transport
            .send(
                Endpoint::Regional,
                Method::PUT,
                &nested_item_path(load_balancer_id, COLLECTION, "certificate_id", certificate_id)?,
                &QueryParams::new(),
                json_body(&request),
            )
            .await?;
        Ok(())
    }

    /// Delete a certificate.
    pub async fn delete(&self, load_balancer_id: &str, certificate_id: &str) -> Result<()> {
        self.transport
            .send(
                Endpoint::Regional,
                Method::DELETE,
                &nested_item_path(load_balancer_id, COLLECTION, "certificate_id", certificate_id)?,
                &QueryParams::new(),
                None,
            )
            .await?
            .ensure_success()
    }
}

fn validate_pem_pair(certificate: &str, private_key: &str) -> Result<()> {
    if STANDARD.decode(certificate).is_err() {
        return Err(Error::validation(
            "certificate",
            "certificate is not base64 encoded",
        ));
    }
    if STANDARD.decode(private_key).is_err() {
        return Err(Error::validation(
            "private_key",
            "private key is not base64 encoded",
        ));
    }
    Ok(())
}
