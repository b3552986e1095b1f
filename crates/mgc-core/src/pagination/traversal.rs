//! The ListAll loop.

use super::{ListQuery, Page};
use std::future::Future;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Page size used when walking a whole collection.
pub const DEFAULT_PAGE_LIMIT: u32 = 50;

/// Failures raised by the traversal itself, as opposed to a page fetch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraversalError {
    /// The cancellation token fired before or during a fetch.
    #[error("operation cancelled: context canceled")]
    Cancelled,

    /// The configured page ceiling was hit while pages were still full.
    #[error("pagination stopped after {pages} full pages without reaching the end of the collection")]
    PageCeilingReached {
        /// Pages fetched before giving up.
        pages: usize,
    },

    /// The next offset does not fit the wire type.
    #[error("pagination offset overflow after offset {offset}")]
    OffsetOverflow {
        /// Last offset requested.
        offset: u32,
    },
}

/// Configuration of a full-collection walk.
///
/// Pages are requested strictly one after another with `offset = n * limit`
/// and the walk ends at the first page holding fewer than `limit` items.
/// Any error drops whatever was gathered so far.
///
/// # Examples
///
/// ```rust
/// use mgc_core::pagination::{ListQuery, Page, Traversal, TraversalError};
///
/// # tokio_test::block_on(async {
/// let items: Vec<u32> = (0..7).collect();
/// let all = Traversal::new()
///     .page_limit(3)
///     .collect(ListQuery::default(), |query| {
///         let start = query.offset.unwrap_or(0) as usize;
///         let end = (start + 3).min(items.len());
///         let chunk = items[start..end].to_vec();
///         async move { Ok::<_, TraversalError>(Page::from_results(chunk, &query)) }
///     })
///     .await
///     .unwrap();
/// assert_eq!(all, items);
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct Traversal {
    page_limit: u32,
    max_pages: Option<usize>,
    cancel: Option<CancellationToken>,
}

impl Default for Traversal {
    fn default() -> Self {
        Self {
            page_limit: DEFAULT_PAGE_LIMIT,
            max_pages: None,
            cancel: None,
        }
    }
}

impl Traversal {
    /// Traversal with [`DEFAULT_PAGE_LIMIT`], no ceiling and no cancellation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Items requested per page. Values below 1 are raised to 1.
    pub fn page_limit(mut self, limit: u32) -> Self {
        self.page_limit = limit.max(1);
        self
    }

    /// Give up with [`TraversalError::PageCeilingReached`] once `pages` full
    /// pages were fetched and more are still announced.
    pub fn max_pages(mut self, pages: usize) -> Self {
        self.max_pages = Some(pages);
        self
    }

    /// Stop as soon as `token` is cancelled.
    pub fn cancel_on(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Configured page size.
    pub fn limit(&self) -> u32 {
        self.page_limit
    }

    /// Configured page ceiling.
    pub fn ceiling(&self) -> Option<usize> {
        self.max_pages
    }

    /// Walk the collection.
    ///
    /// `base.sort` is sent with every page; `base.offset` and `base.limit`
    /// are replaced by the traversal's own cursor.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `fetch` unchanged, or a
    /// [`TraversalError`] converted into `E`.
    pub async fn collect<T, E, F, Fut>(&self, base: ListQuery, mut fetch: F) -> Result<Vec<T>, E>
    where
        F: FnMut(ListQuery) -> Fut,
        Fut: Future<Output = Result<Page<T>, E>>,
        E: From<TraversalError>,
    {
        let limit = self.page_limit;
        let mut offset: u32 = 0;
        let mut pages = 0usize;
        let mut aggregate = Vec::new();

        loop {
            if self.is_cancelled() {
                return Err(TraversalError::Cancelled.into());
            }
            if let Some(ceiling) = self.max_pages
                && pages >= ceiling
            {
                return Err(TraversalError::PageCeilingReached { pages }.into());
            }

            let query = ListQuery {
                offset: Some(offset),
                limit: Some(limit),
                sort: base.sort.clone(),
            };

            #[cfg(feature = "tracing")]
            tracing::trace!(offset, limit, page = pages, "fetching page");

            let page = match &self.cancel {
                Some(token) => tokio::select! {
                    biased;
                    _ = token.cancelled() => return Err(TraversalError::Cancelled.into()),
                    page = fetch(query) => page?,
                },
                None => fetch(query).await?,
            };
            pages += 1;

            let returned = page.results.len();
            aggregate.extend(page.results);

            if returned < limit as usize {
                #[cfg(feature = "tracing")]
                tracing::debug!(pages, items = aggregate.len(), "collection exhausted");
                return Ok(aggregate);
            }

            offset = offset
                .checked_add(limit)
                .ok_or(TraversalError::OffsetOverflow { offset })?;
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }
}

/// Walk a collection with the default [`Traversal`].
pub async fn list_all<T, E, F, Fut>(fetch: F) -> Result<Vec<T>, E>
where
    F: FnMut(ListQuery) -> Fut,
    Fut: Future<Output = Result<Page<T>, E>>,
    E: From<TraversalError>,
{
    Traversal::new().collect(ListQuery::default(), fetch).await
}
