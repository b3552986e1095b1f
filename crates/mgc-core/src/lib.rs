#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Resource-agnostic building blocks for the Magalu Cloud SDK.
//!
//! Every list endpoint of the platform speaks the same offset/limit contract
//! but wraps its results in one of several envelopes. This crate holds the
//! pieces that do not care which resource is being listed:
//!
//! - [`query::QueryParams`] collects wire parameters, skipping absent values
//! - [`pagination::ListQuery`], [`pagination::Page`] and the page decoders
//! - [`pagination::Traversal`], the one ListAll loop every service reuses
//! - [`retry::ExponentialBackoff`], the delay schedule used by the transport
//!
//! # Examples
//!
//! ```rust
//! use mgc_core::prelude::*;
//!
//! # async fn example() -> Result<(), TraversalError> {
//! let pages = vec![vec![1, 2], vec![]];
//! let all = Traversal::new()
//!     .page_limit(2)
//!     .collect(ListQuery::default(), |query| {
//!         let index = (query.offset.unwrap_or(0) / 2) as usize;
//!         let items = pages.get(index).cloned().unwrap_or_default();
//!         async move { Ok::<_, TraversalError>(Page::from_results(items, &query)) }
//!     })
//!     .await?;
//! assert_eq!(all, vec![1, 2]);
//! # Ok(())
//! # }
//! ```

pub mod pagination;
pub mod query;
pub mod retry;

pub use tokio_util::sync::CancellationToken;

/// Convenient re-exports of commonly used items.
///
/// ```rust
/// use mgc_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::CancellationToken;
    pub use crate::pagination::{
        DEFAULT_PAGE_LIMIT, FlatPaginated, IntoPage, ListQuery, Page, PageLinks, PageMeta,
        Paginated, ResultsOnly, Traversal, TraversalError, list_all,
    };
    pub use crate::query::QueryParams;
    pub use crate::retry::{ExponentialBackoff, ExponentialBackoffBuilder};
}
