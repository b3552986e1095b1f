//! Wire types of the network load balancer API.
//!
//! Enumerations are tolerant on input: upper-case spellings are accepted and
//! values this SDK does not know decode as `Unknown`.

use chrono::{DateTime, Utc};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Action of an ACL rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AclActionType {
    /// Let matching traffic through.
    #[serde(rename = "ALLOW", alias = "allow")]
    Allow,
    /// Drop matching traffic.
    #[serde(rename = "DENY", alias = "deny")]
    Deny,
    /// Drop matching traffic without a reply.
    #[serde(rename = "DENY_UNSPECIFIED", alias = "deny_unspecified")]
    DenyUnspecified,
    /// A value this SDK does not know yet.
    #[serde(other)]
    Unknown,
}

/// Ethernet type an ACL rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AclEtherType {
    #[allow(missing_docs)]
    #[serde(rename = "IPv4", alias = "ipv4", alias = "IPV4")]
    Ipv4,
    #[allow(missing_docs)]
    #[serde(rename = "IPv6", alias = "ipv6", alias = "IPV6")]
    Ipv6,
    /// A value this SDK does not know yet.
    #[serde(other)]
    Unknown,
}

/// Protocol an ACL rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AclProtocol {
    #[allow(missing_docs)]
    #[serde(alias = "TCP")]
    Tcp,
    #[allow(missing_docs)]
    #[serde(alias = "TLS")]
    Tls,
    /// A value this SDK does not know yet.
    #[serde(other)]
    Unknown,
}

/// How a backend spreads connections across its targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendBalanceAlgorithm {
    /// Rotate through targets.
    #[default]
    #[serde(alias = "ROUND_ROBIN")]
    RoundRobin,
    /// Pick the target with the fewest open connections.
    #[serde(alias = "LEAST_CONNECTIONS")]
    LeastConnections,
    /// A value this SDK does not know yet.
    #[serde(other)]
    Unknown,
}

/// Kind of targets a backend holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendType {
    /// Instance NICs.
    #[serde(alias = "INSTANCE")]
    Instance,
    /// Raw IP addresses.
    #[serde(alias = "RAW")]
    Raw,
    /// A value this SDK does not know yet.
    #[serde(other)]
    Unknown,
}

/// Protocol used to probe targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthCheckProtocol {
    #[allow(missing_docs)]
    #[serde(alias = "TCP")]
    Tcp,
    #[allow(missing_docs)]
    #[serde(alias = "HTTP")]
    Http,
    /// A value this SDK does not know yet.
    #[serde(other)]
    Unknown,
}

/// Lifecycle state of a load balancer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadBalancerStatus {
    #[allow(missing_docs)]
    #[serde(alias = "CREATING")]
    Creating,
    #[allow(missing_docs)]
    #[serde(alias = "UPDATING")]
    Updating,
    #[allow(missing_docs)]
    #[serde(alias = "DELETING")]
    Deleting,
    #[allow(missing_docs)]
    #[serde(alias = "RUNNING")]
    Running,
    #[allow(missing_docs)]
    #[serde(alias = "FAILED")]
    Failed,
    #[allow(missing_docs)]
    #[serde(alias = "CANCELED")]
    Canceled,
    #[allow(missing_docs)]
    #[serde(alias = "DELETED")]
    Deleted,
    #[allow(missing_docs)]
    #[serde(alias = "INACTIVE")]
    Inactive,
    /// A value this SDK does not know yet.
    #[serde(other)]
    Unknown,
}

impl LoadBalancerStatus {
    /// Whether no further transition is expected without user action.
    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            Self::Running | Self::Failed | Self::Canceled | Self::Deleted | Self::Inactive
        )
    }
}

/// Whether a load balancer gets a public address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadBalancerVisibility {
    /// Reachable from the VPC only.
    #[default]
    #[serde(alias = "INTERNAL")]
    Internal,
    /// Reachable from the internet.
    #[serde(alias = "EXTERNAL")]
    External,
    /// A value this SDK does not know yet.
    #[serde(other)]
    Unknown,
}

/// Protocol a listener accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListenerProtocol {
    /// Plain TCP passthrough.
    #[serde(alias = "TCP")]
    Tcp,
    /// TLS terminated at the load balancer.
    #[serde(alias = "TLS")]
    Tls,
    /// A value this SDK does not know yet.
    #[serde(other)]
    Unknown,
}

/// A backend target addressed by instance NIC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceTarget {
    /// NIC of the instance.
    pub nic_id: String,
    /// Target port.
    pub port: u16,
}

impl InstanceTarget {
    /// Target a NIC on a port.
    pub fn new(nic_id: impl Into<String>, port: u16) -> Self {
        Self {
            nic_id: nic_id.into(),
            port,
        }
    }
}

/// A backend target addressed by IP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTarget {
    /// Target address.
    pub ip_address: String,
    /// Target port.
    pub port: u16,
}

impl RawTarget {
    /// Target an address on a port.
    pub fn new(ip_address: impl Into<String>, port: u16) -> Self {
        Self {
            ip_address: ip_address.into(),
            port,
        }
    }
}

/// Targets of a backend, all of one kind.
///
/// Encoded as `{"targets_type": "instance", "targets": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "targets_type", content = "targets", rename_all = "lowercase")]
pub enum BackendTargets {
    /// Instance NICs.
    Instance(Vec<InstanceTarget>),
    /// Raw IP addresses.
    Raw(Vec<RawTarget>),
}

impl BackendTargets {
    /// Kind of the targets.
    pub fn kind(&self) -> BackendType {
        match self {
            BackendTargets::Instance(_) => BackendType::Instance,
            BackendTargets::Raw(_) => BackendType::Raw,
        }
    }

    /// Number of targets.
    pub fn len(&self) -> usize {
        match self {
            BackendTargets::Instance(targets) => targets.len(),
            BackendTargets::Raw(targets) => targets.len(),
        }
    }

    /// Whether there are no targets.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for BackendTargets {
    fn default() -> Self {
        BackendTargets::Instance(Vec::new())
    }
}

/// Public IP attached to a load balancer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicIp {
    /// Public IP ID.
    #[serde(default)]
    pub id: String,
    /// Address.
    #[serde(default)]
    pub ip_address: Option<String>,
    /// External ID.
    #[serde(default)]
    pub external_id: Option<String>,
}

/// A network load balancer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancer {
    /// Load balancer ID.
    pub id: String,
    /// Name.
    #[serde(default)]
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Load balancer kind, e.g. `proxy`.
    #[serde(rename = "type", default)]
    pub lb_type: String,
    /// Visibility.
    pub visibility: LoadBalancerVisibility,
    /// Current state.
    pub status: LoadBalancerStatus,
    /// VPC the load balancer lives in.
    #[serde(default)]
    pub vpc_id: String,
    /// Subnet pool used for internal addresses.
    #[serde(default)]
    pub subnet_pool_id: Option<String>,
    /// Private address.
    #[serde(default)]
    pub ip_address: Option<String>,
    /// Port of the inbound address.
    #[serde(default)]
    pub port: Option<String>,
    /// Listeners.
    #[serde(default)]
    pub listeners: Vec<Listener>,
    /// Backends.
    #[serde(default)]
    pub backends: Vec<Backend>,
    /// Health checks.
    #[serde(default)]
    pub health_checks: Vec<HealthCheck>,
    /// Public IPs. The API sends `null` when there are none.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub public_ips: Vec<PublicIp>,
    /// TLS certificates.
    #[serde(default)]
    pub tls_certificates: Vec<Certificate>,
    /// ACL rules.
    #[serde(default)]
    pub acls: Vec<Acl>,
    /// Creation time.
    #[serde(default, with = "crate::timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(default, with = "crate::timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A listener: the port and protocol the load balancer accepts traffic on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listener {
    /// Listener ID.
    pub id: String,
    /// Name.
    #[serde(default)]
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Protocol.
    #[serde(default = "unknown_listener_protocol")]
    pub protocol: ListenerProtocol,
    /// Port.
    #[serde(default)]
    pub port: u16,
    /// Backend receiving the traffic.
    #[serde(default)]
    pub backend_id: String,
    /// Certificate used for TLS listeners.
    #[serde(default)]
    pub tls_certificate_id: Option<String>,
    /// Creation time.
    #[serde(default, with = "crate::timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(default, with = "crate::timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A health check probing backend targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthCheck {
    /// Health check ID.
    pub id: String,
    /// Name.
    #[serde(default)]
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Protocol.
    #[serde(default = "unknown_health_check_protocol")]
    pub protocol: HealthCheckProtocol,
    /// Probed HTTP path.
    #[serde(default)]
    pub path: Option<String>,
    /// Port.
    #[serde(default)]
    pub port: u16,
    /// Status code treated as healthy for HTTP probes.
    #[serde(default)]
    pub healthy_status_code: Option<u16>,
    /// Seconds between probes.
    #[serde(default)]
    pub interval_seconds: u32,
    /// Seconds before a probe fails.
    #[serde(default)]
    pub timeout_seconds: u32,
    /// Seconds before the first probe.
    #[serde(default)]
    pub initial_delay_seconds: u32,
    /// Passing probes before a target is healthy.
    #[serde(default)]
    pub healthy_threshold_count: u32,
    /// Failing probes before a target is unhealthy.
    #[serde(default)]
    pub unhealthy_threshold_count: u32,
    /// Creation time.
    #[serde(default, with = "crate::timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(default, with = "crate::timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A TLS certificate stored on a load balancer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certificate {
    /// Certificate ID.
    pub id: String,
    /// Name.
    #[serde(default)]
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// PEM certificate. The private key is never returned.
    #[serde(default)]
    pub certificate: Option<String>,
    /// Expiry of the certificate.
    #[serde(default, with = "crate::timestamp::option")]
    pub expiration_date: Option<DateTime<Utc>>,
    /// Creation time.
    #[serde(default, with = "crate::timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(default, with = "crate::timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// An instance target as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceTargetInfo {
    /// Target ID.
    pub id: String,
    /// NIC of the instance.
    pub nic_id: String,
    /// Port.
    pub port: u16,
    /// Creation time.
    #[serde(default, with = "crate::timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(default, with = "crate::timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A raw IP target as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTargetInfo {
    /// Target ID.
    pub id: String,
    /// Target address.
    pub ip_address: String,
    /// Port.
    pub port: u16,
    /// Creation time.
    #[serde(default, with = "crate::timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(default, with = "crate::timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Targets of a backend as returned by the server.
///
/// `targets_type` selects how `targets` decodes, so a raw backend listing
/// NIC targets is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "targets_type", content = "targets", rename_all = "lowercase")]
pub enum BackendTargetsView {
    /// Instance NICs.
    Instance(#[serde(deserialize_with = "null_as_empty")] Vec<InstanceTargetInfo>),
    /// Raw IP addresses.
    Raw(#[serde(deserialize_with = "null_as_empty")] Vec<RawTargetInfo>),
}

impl BackendTargetsView {
    /// Kind of the targets.
    pub fn kind(&self) -> BackendType {
        match self {
            BackendTargetsView::Instance(_) => BackendType::Instance,
            BackendTargetsView::Raw(_) => BackendType::Raw,
        }
    }

    /// Number of targets.
    pub fn len(&self) -> usize {
        match self {
            BackendTargetsView::Instance(targets) => targets.len(),
            BackendTargetsView::Raw(targets) => targets.len(),
        }
    }

    /// Whether there are no targets.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A pool of targets behind one or more listeners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Backend {
    /// Backend ID.
    pub id: String,
    /// Name.
    #[serde(default)]
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Balancing algorithm.
    #[serde(default)]
    pub balance_algorithm: BackendBalanceAlgorithm,
    /// Health check probing the targets.
    #[serde(default)]
    pub health_check_id: Option<String>,
    /// Percentage of unhealthy targets above which traffic goes to all of them.
    #[serde(default)]
    pub panic_threshold: Option<f64>,
    /// Drop open connections when a target turns unhealthy.
    #[serde(default)]
    pub close_connections_on_host_health_failure: Option<bool>,
    /// Targets, tagged by `targets_type`.
    #[serde(flatten)]
    pub targets: BackendTargetsView,
    /// Creation time.
    #[serde(default, with = "crate::timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(default, with = "crate::timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// An ACL rule of a load balancer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acl {
    /// Rule ID.
    pub id: String,
    /// Name.
    #[serde(default)]
    pub name: Option<String>,
    /// Ethernet type.
    pub ethertype: AclEtherType,
    /// Protocol.
    pub protocol: AclProtocol,
    /// CIDR the rule matches.
    #[serde(default)]
    pub remote_ip_prefix: String,
    /// Rule action.
    pub action: AclActionType,
}

/// Body of [`LoadBalancers::create`](super::LoadBalancers::create).
///
/// Nested resources are created together with the load balancer and are
/// referenced by name from one another.
#[derive(Debug, Clone, Serialize, Deserialize, Builder)]
#[builder(setter(into, strip_option))]
pub struct CreateLoadBalancerRequest {
    /// Name.
    pub name: String,

    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub description: Option<String>,

    /// Load balancer kind. The API only offers `proxy`.
    #[serde(rename = "type")]
    #[builder(default = "\"proxy\".to_string()")]
    pub lb_type: String,

    /// Visibility.
    #[builder(default)]
    pub visibility: LoadBalancerVisibility,

    /// VPC to create the load balancer in.
    pub vpc_id: String,

    /// Subnet pool for internal addresses.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub subnet_pool_id: Option<String>,

    /// Existing public IP to attach, for external load balancers.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub public_ip_id: Option<String>,

    /// Listeners.
    #[builder(default)]
    pub listeners: Vec<CreateListenerRequest>,

    /// Backends.
    #[builder(default)]
    pub backends: Vec<CreateBackendRequest>,

    /// Health checks.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub health_checks: Vec<CreateHealthCheckRequest>,

    /// TLS certificates.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub tls_certificates: Vec<CreateCertificateRequest>,

    /// ACL rules.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub acls: Vec<CreateAclRequest>,
}

impl CreateLoadBalancerRequest {
    /// Create a builder for constructing a CreateLoadBalancerRequest.
    pub fn builder() -> CreateLoadBalancerRequestBuilder {
        CreateLoadBalancerRequestBuilder::default()
    }
}

/// Body of [`LoadBalancers::update`](super::LoadBalancers::update). Unset fields are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateLoadBalancerRequest {
    /// Name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Public IP to attach.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_ip_id: Option<String>,
}

/// Options of [`LoadBalancers::delete`](super::LoadBalancers::delete).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteLoadBalancerRequest {
    /// Release the attached public IP too. Left to the server when unset.
    pub delete_public_ip: Option<bool>,
}

/// Body of [`Listeners::create`](super::Listeners::create).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateListenerRequest {
    /// Name.
    pub name: String,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Protocol.
    pub protocol: ListenerProtocol,
    /// Port.
    pub port: u16,
    /// Backend name, when created together with the load balancer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend_name: Option<String>,
    /// Certificate name, for TLS listeners created with the load balancer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_certificate_name: Option<String>,
}

impl CreateListenerRequest {
    /// Listener with a name, protocol and port.
    pub fn new(name: impl Into<String>, protocol: ListenerProtocol, port: u16) -> Self {
        Self {
            name: name.into(),
            description: None,
            protocol,
            port,
            backend_name: None,
            tls_certificate_name: None,
        }
    }
}

/// Body of [`Listeners::update`](super::Listeners::update).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateListenerRequest {
    /// New certificate, for TLS listeners.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_certificate_id: Option<String>,
}

/// Body of [`HealthChecks::create`](super::HealthChecks::create).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateHealthCheckRequest {
    /// Name.
    pub name: String,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Protocol.
    pub protocol: HealthCheckProtocol,
    /// Port.
    pub port: u16,
    /// Probed path, for HTTP checks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Status code treated as healthy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub healthy_status_code: Option<u16>,
    /// Seconds between probes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval_seconds: Option<u32>,
    /// Seconds before a probe fails.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u32>,
    /// Seconds before the first probe.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_delay_seconds: Option<u32>,
    /// Passing probes before a target is healthy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub healthy_threshold_count: Option<u32>,
    /// Failing probes before a target is unhealthy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unhealthy_threshold_count: Option<u32>,
}

impl CreateHealthCheckRequest {
    /// Check with a name, protocol and port; every timing left to the server.
    pub fn new(name: impl Into<String>, protocol: HealthCheckProtocol, port: u16) -> Self {
        Self {
            name: name.into(),
            description: None,
            protocol,
            port,
            path: None,
            healthy_status_code: None,
            interval_seconds: None,
            timeout_seconds: None,
            initial_delay_seconds: None,
            healthy_threshold_count: None,
            unhealthy_threshold_count: None,
        }
    }
}

/// Body of [`HealthChecks::update`](super::HealthChecks::update).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateHealthCheckRequest {
    /// Protocol.
    pub protocol: HealthCheckProtocol,
    /// Port.
    pub port: u16,
    /// Probed HTTP path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Status code treated as healthy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub healthy_status_code: Option<u16>,
    /// Seconds between probes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval_seconds: Option<u32>,
    /// Seconds before a probe fails.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u32>,
    /// Seconds before the first probe.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_delay_seconds: Option<u32>,
    /// Passing probes before a target is healthy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub healthy_threshold_count: Option<u32>,
    /// Failing probes before a target is unhealthy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unhealthy_threshold_count: Option<u32>,
}

/// Body of [`Certificates::create`](super::Certificates::create).
///
/// Both PEM blobs must be base64 encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCertificateRequest {
    /// Name.
    pub name: String,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Base64 encoded PEM certificate.
    pub certificate: String,
    /// Base64 encoded PEM private key.
    pub private_key: String,
}

/// Body of [`Certificates::update`](super::Certificates::update).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCertificateRequest {
    /// Base64 encoded PEM certificate.
    pub certificate: String,
    /// Base64 encoded PEM private key.
    pub private_key: String,
}

/// Body of [`Backends::create`](super::Backends::create).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBackendRequest {
    /// Name.
    pub name: String,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Balancing algorithm.
    pub balance_algorithm: BackendBalanceAlgorithm,
    /// Health check by name, when created together with the load balancer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_name: Option<String>,
    /// Existing health check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_id: Option<String>,
    /// Unhealthy percentage above which every target receives traffic.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panic_threshold: Option<f64>,
    /// Drop open connections when a target turns unhealthy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_connections_on_host_health_failure: Option<bool>,
    /// Targets.
    #[serde(flatten)]
    pub targets: BackendTargets,
}

impl CreateBackendRequest {
    /// Backend with a name and its targets, balanced round robin.
    pub fn new(name: impl Into<String>, targets: BackendTargets) -> Self {
        Self {
            name: name.into(),
            description: None,
            balance_algorithm: BackendBalanceAlgorithm::RoundRobin,
            health_check_name: None,
            health_check_id: None,
            panic_threshold: None,
            close_connections_on_host_health_failure: None,
            targets,
        }
    }
}

/// Body of [`Backends::update`](super::Backends::update). Unset fields are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateBackendRequest {
    /// Name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Health check probing the targets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_id: Option<String>,
    /// Unhealthy percentage above which every target receives traffic.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panic_threshold: Option<f64>,
    /// Drop open connections when a target turns unhealthy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_connections_on_host_health_failure: Option<bool>,
    /// Replace the targets as well.
    #[serde(flatten)]
    pub targets: Option<BackendTargets>,
}

/// Body of [`Acls::create`](super::Acls::create).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAclRequest {
    /// Name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Ethernet type.
    pub ethertype: AclEtherType,
    /// Protocol.
    pub protocol: AclProtocol,
    /// CIDR the rule matches.
    pub remote_ip_prefix: String,
    /// Rule action.
    pub action: AclActionType,
}

/// `{"id": "..."}` returned by create and some update endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct IdResponse {
    pub(crate) id: String,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn unknown_listener_protocol() -> ListenerProtocol {
    ListenerProtocol::Unknown
}

fn unknown_health_check_protocol() -> HealthCheckProtocol {
    HealthCheckProtocol::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("\"ALLOW\"", AclActionType::Allow)]
    #[case("\"allow\"", AclActionType::Allow)]
    #[case("\"DENY_UNSPECIFIED\"", AclActionType::DenyUnspecified)]
    #[case("\"reject\"", AclActionType::Unknown)]
    fn test_acl_action_decoding(#[case] raw: &str, #[case] expected: AclActionType) {
        assert_eq!(serde_json::from_str::<AclActionType>(raw).unwrap(), expected);
    }

    #[rstest]
    #[case("\"tcp\"", ListenerProtocol::Tcp)]
    #[case("\"TLS\"", ListenerProtocol::Tls)]
    #[case("\"HTTP\"", ListenerProtocol::Unknown)]
    fn test_listener_protocol_decoding(#[case] raw: &str, #[case] expected: ListenerProtocol) {
        assert_eq!(serde_json::from_str::<ListenerProtocol>(raw).unwrap(), expected);
    }

    #[test]
    fn test_wire_forms() {
        assert_eq!(serde_json::to_value(AclEtherType::Ipv6).unwrap(), json!("IPv6"));
        assert_eq!(
            serde_json::to_value(BackendBalanceAlgorithm::LeastConnections).unwrap(),
            json!("least_connections")
        );
        assert_eq!(serde_json::to_value(HealthCheckProtocol::Http).unwrap(), json!("http"));
    }

    #[test]
    fn test_backend_targets_encoding() {
        let targets = BackendTargets::Raw(vec![RawTarget::new("10.0.0.5", 8080)]);
        assert_eq!(
            serde_json::to_value(&targets).unwrap(),
            json!({"targets_type": "raw", "targets": [{"ip_address": "10.0.0.5", "port": 8080}]})
        );

        let decoded: BackendTargets = serde_json::from_value(json!({
            "targets_type": "instance",
            "targets": [{"nic_id": "nic-1", "port": 80}]
        }))
        .unwrap();
        assert_eq!(decoded.kind(), BackendType::Instance);
        assert_eq!(decoded.len(), 1);
    }

    #[test]
    fn test_backend_decodes_targets_by_type() {
        let backend: Backend = serde_json::from_value(json!({
            "id": "b-1",
            "name": "web",
            "balance_algorithm": "round_robin",
            "targets_type": "instance",
            "targets": [{"id": "t-1", "nic_id": "nic-1", "port": 80}],
            "created_at": "2023-01-01T00:00:00Z"
        }))
        .unwrap();

        match &backend.targets {
            BackendTargetsView::Instance(targets) => {
                assert_eq!(targets[0].nic_id, "nic-1");
                assert_eq!(targets[0].port, 80);
            }
            other => panic!("expected instance targets, got {other:?}"),
        }
        assert!(backend.created_at.is_some());
    }

    #[test]
    fn test_backend_rejects_targets_of_the_other_kind() {
        let result = serde_json::from_value::<Backend>(json!({
            "id": "b-1",
            "targets_type": "raw",
            "targets": [{"id": "t-1", "nic_id": "nic-1", "port": 80}]
        }));

        assert!(result.is_err(), "{result:?}");
    }

    #[test]
    fn test_backend_null_targets_decode_empty() {
        let backend: Backend = serde_json::from_value(json!({
            "id": "b-1",
            "targets_type": "raw",
            "targets": null
        }))
        .unwrap();

        assert_eq!(backend.targets.kind(), BackendType::Raw);
        assert!(backend.targets.is_empty());
    }

    #[test]
    fn test_backend_request_flattens_targets() {
        let request = CreateBackendRequest::new(
            "web",
            BackendTargets::Instance(vec![InstanceTarget::new("nic-1", 80)]),
        );
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["balance_algorithm"], "round_robin");
        assert_eq!(body["targets_type"], "instance");
        assert_eq!(body["targets"][0]["nic_id"], "nic-1");
        assert!(body.get("health_check_id").is_none());
    }

    #[test]
    fn test_decode_load_balancer_with_null_public_ips() {
        let lb: LoadBalancer = serde_json::from_value(json!({
            "id": "lb-123",
            "name": "test-lb",
            "type": "proxy",
            "visibility": "external",
            "status": "running",
            "listeners": [],
            "backends": [],
            "health_checks": [],
            "public_ips": null,
            "tls_certificates": [],
            "acls": [],
            "vpc_id": "vpc-123",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(lb.lb_type, "proxy");
        assert_eq!(lb.visibility, LoadBalancerVisibility::External);
        assert!(lb.status.is_settled());
        assert!(lb.public_ips.is_empty());
        assert!(lb.created_at.is_some());
    }

    #[test]
    fn test_decode_certificate_with_naive_timestamps() {
        let cert: Certificate = serde_json::from_value(json!({
            "id": "cert-123",
            "name": "test-cert",
            "certificate": "-----BEGIN CERTIFICATE-----\nMIIC...\n-----END CERTIFICATE-----",
            "created_at": "2024-01-01T00:00:00.000000",
            "updated_at": "2024-01-01T00:00:00.000000"
        }))
        .unwrap();

        assert!(cert.created_at.is_some());
        assert_eq!(cert.expiration_date, None);
    }

    #[test]
    fn test_create_load_balancer_builder() {
        let request = CreateLoadBalancerRequest::builder()
            .name("edge")
            .vpc_id("vpc-1")
            .visibility(LoadBalancerVisibility::External)
            .listeners(vec![CreateListenerRequest::new("http", ListenerProtocol::Tcp, 80)])
            .build()
            .unwrap();
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["type"], "proxy");
        assert_eq!(body["visibility"], "external");
        assert_eq!(body["listeners"][0]["port"], 80);
        assert!(body.get("description").is_none());
        assert!(body.get("acls").is_none());
    }

    #[test]
    fn test_create_load_balancer_builder_requires_vpc() {
        assert!(CreateLoadBalancerRequest::builder().name("edge").build().is_err());
    }
}
