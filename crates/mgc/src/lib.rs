//! # mgc
//!
//! Async Rust SDK for the Magalu Cloud platform.
//!
//! The client covers load balancers, SSH keys, availability zones, audit
//! events and block storage volumes. Every list endpoint comes in two forms:
//! `list`, which fetches exactly one page, and `list_all`, which walks the
//! whole collection 50 items at a time.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mgc::{Client, Region};
//! use mgc::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::builder()
//!         .api_key("my-api-key")
//!         .region(Region::BrSe1)
//!         .build()?;
//!
//!     // One page
//!     let page = client
//!         .lbaas()
//!         .load_balancers()
//!         .list(ListQuery::new().limit(10).sort("created_at:desc"))
//!         .await?;
//!     println!("{} of {:?}", page.len(), page.total());
//!
//!     // Everything
//!     let keys = client.ssh_keys().list_all().await?;
//!     println!("{} ssh keys", keys.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Cancellation
//!
//! Attach a [`RequestContext`] with a [`CancellationToken`] through
//! [`Client::with_context`]. A cancelled token stops single requests and
//! full-collection walks alike with [`Error::Cancelled`], discarding partial
//! results.
//!
//! ## Logging
//!
//! The SDK emits [`tracing`](https://docs.rs/tracing) events: one `info`
//! event per attempt and one per response carrying `X-Request-ID` or
//! `X-Mgc-Trace-Id`. Install any subscriber to see them.

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Re-export commonly used types
pub use client::{Client, MgcClientBuilder, Transport};
pub use config::{ClientConfig, ClientConfigBuilder, Region, RetryConfig};
pub use context::RequestContext;
pub use error::{Error, Result};
pub use mgc_core::CancellationToken;
pub use mgc_core::pagination::{ListQuery, Page, PageMeta, Traversal};

// Module declarations
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod http;
pub mod resources;
pub(crate) mod timestamp;

/// Prelude module for common imports
///
/// # Examples
///
/// ```rust
/// use mgc::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        CancellationToken, Client, ClientConfig, Error, Region, RequestContext, Result,
        resources::Resource,
    };
    pub use mgc_core::pagination::{ListQuery, Page, PageLinks, PageMeta};
}

/// SDK version, automatically updated from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default `User-Agent` header value
pub const DEFAULT_USER_AGENT: &str = concat!("mgc-sdk-rs/", env!("CARGO_PKG_VERSION"));

#[cfg(test)]
mod property_tests;
