//! Offset/limit pagination.
//!
//! A list endpoint accepts `_offset`, `_limit` and `_sort`, and answers with
//! one [`Page`]. The body shape differs between services, so decoding is done
//! through [`IntoPage`], implemented once per envelope shape. [`Traversal`]
//! then walks a whole collection using nothing but a single-page fetch
//! function.

mod envelope;
mod traversal;

pub use envelope::{FlatPaginated, IntoPage, NestedMeta, PageInfo, Paginated, ResultsOnly};
pub use traversal::{DEFAULT_PAGE_LIMIT, Traversal, TraversalError, list_all};

use crate::query::QueryParams;
use serde::{Deserialize, Serialize};

/// Wire name of the offset parameter.
pub const OFFSET_PARAM: &str = "_offset";
/// Wire name of the limit parameter.
pub const LIMIT_PARAM: &str = "_limit";
/// Wire name of the sort parameter.
pub const SORT_PARAM: &str = "_sort";

/// Pagination input of a list call.
///
/// A `None` field is left for the server to default; it is never sent.
///
/// # Examples
///
/// ```rust
/// use mgc_core::pagination::ListQuery;
///
/// let query = ListQuery::new().limit(10).offset(0).sort("created_at:desc");
/// assert_eq!(
///     query.to_query_params().encode(),
///     "_limit=10&_offset=0&_sort=created_at%3Adesc"
/// );
/// assert!(ListQuery::default().to_query_params().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    /// Index of the first item to return.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    /// Maximum number of items to return.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Sort expression in `field:direction` form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

impl ListQuery {
    /// Create a query with every field absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the offset.
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set the limit.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the sort expression, e.g. `"name:asc"`.
    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Add the present fields to `params` under their wire names.
    pub fn apply_to(&self, params: &mut QueryParams) {
        params
            .set_opt(OFFSET_PARAM, self.offset)
            .set_opt(LIMIT_PARAM, self.limit)
            .set_opt(SORT_PARAM, self.sort.as_deref());
    }

    /// Build a fresh parameter set holding only the pagination fields.
    pub fn to_query_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        self.apply_to(&mut params);
        params
    }
}

/// Opaque navigation references returned by some endpoints.
///
/// They are kept for callers but never followed; traversal computes offsets
/// itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
    /// Reference to the current page.
    #[serde(default, rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    /// Reference to the next page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    /// Reference to the previous page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
}

/// Pagination bookkeeping of one page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Offset the page starts at.
    pub offset: u64,
    /// Limit the page was produced with.
    pub limit: u64,
    /// Items in this page.
    pub count: u64,
    /// Items across all pages, when the server reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    /// Navigation references, when the server reports them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<PageLinks>,
}

impl PageMeta {
    /// Meta derived purely from what was requested and what came back.
    pub fn from_request(requested: &ListQuery, count: usize) -> Self {
        Self {
            offset: requested.offset.map(u64::from).unwrap_or(0),
            limit: requested.limit.map(u64::from).unwrap_or(count as u64),
            count: count as u64,
            total: None,
            links: None,
        }
    }
}

/// One fetched batch of a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items, in server order.
    pub results: Vec<T>,
    /// Pagination bookkeeping.
    pub meta: PageMeta,
}

impl<T> Page<T> {
    /// Create a page from items and explicit meta.
    pub fn new(results: Vec<T>, meta: PageMeta) -> Self {
        Self { results, meta }
    }

    /// Create a page whose meta is derived from the request.
    pub fn from_results(results: Vec<T>, requested: &ListQuery) -> Self {
        let meta = PageMeta::from_request(requested, results.len());
        Self { results, meta }
    }

    /// Number of items actually returned.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether the page holds no items.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Total reported by the server, if any.
    pub fn total(&self) -> Option<u64> {
        self.meta.total
    }

    /// Drop the meta and keep the items.
    pub fn into_results(self) -> Vec<T> {
        self.results
    }

    /// Transform every item, keeping the meta.
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            results: self.results.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_list_query_emits_nothing() {
        let params = ListQuery::default().to_query_params();

        assert!(!params.contains(OFFSET_PARAM));
        assert!(!params.contains(LIMIT_PARAM));
        assert!(!params.contains(SORT_PARAM));
    }

    #[test]
    fn test_list_query_emits_present_fields() {
        let params = ListQuery::new().limit(10).offset(0).sort("created_at:desc").to_query_params();

        assert_eq!(params.get(LIMIT_PARAM), Some("10"));
        assert_eq!(params.get(OFFSET_PARAM), Some("0"));
        assert_eq!(params.get(SORT_PARAM), Some("created_at:desc"));
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn test_list_query_only_sort() {
        let params = ListQuery::new().sort("name:asc").to_query_params();

        assert_eq!(params.encode(), "_sort=name%3Aasc");
    }

    #[test]
    fn test_apply_to_keeps_other_params() {
        let mut params = QueryParams::new();
        params.set("expand", "attachment");
        ListQuery::new().limit(5).apply_to(&mut params);

        assert_eq!(params.get("expand"), Some("attachment"));
        assert_eq!(params.get(LIMIT_PARAM), Some("5"));
    }

    #[test]
    fn test_meta_from_request() {
        let meta = PageMeta::from_request(&ListQuery::new().offset(50).limit(50), 25);

        assert_eq!(meta.offset, 50);
        assert_eq!(meta.limit, 50);
        assert_eq!(meta.count, 25);
        assert_eq!(meta.total, None);
    }

    #[test]
    fn test_page_map_keeps_meta() {
        let page = Page::from_results(vec![1, 2, 3], &ListQuery::new().limit(3));
        let mapped = page.map(|n| n * 10);

        assert_eq!(mapped.results, vec![10, 20, 30]);
        assert_eq!(mapped.meta.count, 3);
    }
}
