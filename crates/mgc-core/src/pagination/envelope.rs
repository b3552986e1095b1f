//! Page decoders for the envelope shapes in use across services.

use super::{ListQuery, Page, PageLinks, PageMeta};
use serde::{Deserialize, Serialize};

/// A decoded list body that can be turned into a [`Page`].
///
/// `requested` supplies the offset and limit for envelopes that do not echo
/// them back.
pub trait IntoPage {
    /// Item type of the collection.
    type Item;

    /// Convert the envelope into a page.
    fn into_page(self, requested: &ListQuery) -> Page<Self::Item>;
}

/// Counters reported by the server. Any of them may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Items in this page.
    #[serde(default)]
    pub count: Option<u64>,
    /// Limit applied by the server.
    #[serde(default)]
    pub limit: Option<u64>,
    /// Offset applied by the server.
    #[serde(default)]
    pub offset: Option<u64>,
    /// Items across all pages.
    #[serde(default)]
    pub total: Option<u64>,
}

impl PageInfo {
    fn resolve(&self, requested: &ListQuery, len: usize, links: Option<PageLinks>) -> PageMeta {
        PageMeta {
            offset: self
                .offset
                .or(requested.offset.map(u64::from))
                .unwrap_or(0),
            limit: self
                .limit
                .or(requested.limit.map(u64::from))
                .unwrap_or(len as u64),
            count: self.count.unwrap_or(len as u64),
            total: self.total,
            links,
        }
    }
}

/// `meta` object of the nested envelope: `{"links": {...}, "page": {...}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestedMeta {
    /// Navigation references.
    #[serde(default)]
    pub links: Option<PageLinks>,
    /// Page counters.
    #[serde(default)]
    pub page: Option<PageInfo>,
}

/// `{"meta": {"links": {...}, "page": {...}}, "results": [...]}`
///
/// `meta` and its parts are optional; unknown meta keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginated<T> {
    /// Pagination metadata.
    #[serde(default)]
    pub meta: Option<NestedMeta>,
    /// Items of the page.
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> IntoPage for Paginated<T> {
    type Item = T;

    fn into_page(self, requested: &ListQuery) -> Page<T> {
        let len = self.results.len();
        let (info, links) = match self.meta {
            Some(NestedMeta { links, page }) => (page.unwrap_or_default(), links),
            None => (PageInfo::default(), None),
        };
        Page::new(self.results, info.resolve(requested, len, links))
    }
}

/// `{"meta": {"count", "limit", "offset", "total"}, "results": [...]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatPaginated<T> {
    /// Page counters, directly under `meta`.
    #[serde(default)]
    pub meta: PageInfo,
    /// Items of the page.
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> IntoPage for FlatPaginated<T> {
    type Item = T;

    fn into_page(self, requested: &ListQuery) -> Page<T> {
        let len = self.results.len();
        let meta = self.meta.resolve(requested, len, None);
        Page::new(self.results, meta)
    }
}

/// `{"results": [...]}` with no pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsOnly<T> {
    /// Items of the page.
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> IntoPage for ResultsOnly<T> {
    type Item = T;

    fn into_page(self, requested: &ListQuery) -> Page<T> {
        Page::from_results(self.results, requested)
    }
}

/// A bare JSON array.
impl<T> IntoPage for Vec<T> {
    type Item = T;

    fn into_page(self, requested: &ListQuery) -> Page<T> {
        Page::from_results(self, requested)
    }
}

impl<T> IntoPage for Page<T> {
    type Item = T;

    fn into_page(self, _requested: &ListQuery) -> Page<T> {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct Item {
        id: String,
    }

    #[test]
    fn test_nested_envelope() {
        let body = json!({
            "meta": {
                "links": {"self": "/things?_offset=0", "next": "/things?_offset=2", "previous": null},
                "page": {"count": 2, "limit": 2, "offset": 0, "total": 5}
            },
            "results": [{"id": "a"}, {"id": "b"}]
        });
        let envelope: Paginated<Item> = serde_json::from_value(body).unwrap();
        let page = envelope.into_page(&ListQuery::new().limit(2));

        assert_eq!(page.len(), 2);
        assert_eq!(page.meta.total, Some(5));
        assert_eq!(page.meta.limit, 2);
        let links = page.meta.links.unwrap();
        assert_eq!(links.self_link.as_deref(), Some("/things?_offset=0"));
        assert_eq!(links.next.as_deref(), Some("/things?_offset=2"));
        assert_eq!(links.previous, None);
    }

    #[test]
    fn test_nested_envelope_without_meta() {
        let body = json!({"results": [{"id": "a"}]});
        let envelope: Paginated<Item> = serde_json::from_value(body).unwrap();
        let page = envelope.into_page(&ListQuery::new().offset(10).limit(5));

        assert_eq!(page.meta.offset, 10);
        assert_eq!(page.meta.limit, 5);
        assert_eq!(page.meta.count, 1);
        assert_eq!(page.meta.total, None);
    }

    #[test]
    fn test_nested_envelope_ignores_foreign_meta_keys() {
        let body = json!({
            "meta": {"current_page": 1, "total_count": 2, "total_pages": 1, "total_results": 2},
            "results": [{"id": "a"}, {"id": "b"}]
        });
        let envelope: Paginated<Item> = serde_json::from_value(body).unwrap();
        let page = envelope.into_page(&ListQuery::default());

        assert_eq!(page.meta.count, 2);
        assert_eq!(page.meta.offset, 0);
    }

    #[test]
    fn test_flat_envelope() {
        let body = json!({
            "meta": {"count": 1, "limit": 50, "offset": 50, "total": 51},
            "results": [{"id": "z"}]
        });
        let envelope: FlatPaginated<Item> = serde_json::from_value(body).unwrap();
        let page = envelope.into_page(&ListQuery::new().offset(50).limit(50));

        assert_eq!(page.meta.offset, 50);
        assert_eq!(page.meta.total, Some(51));
        assert_eq!(page.results[0].id, "z");
    }

    #[test]
    fn test_results_only_envelope() {
        let body = json!({"results": []});
        let envelope: ResultsOnly<Item> = serde_json::from_value(body).unwrap();
        let page = envelope.into_page(&ListQuery::new().limit(50));

        assert!(page.is_empty());
        assert_eq!(page.meta.limit, 50);
    }

    #[test]
    fn test_bare_array() {
        let items: Vec<Item> = serde_json::from_value(json!([{"id": "a"}, {"id": "b"}])).unwrap();
        let page = items.into_page(&ListQuery::default());

        assert_eq!(page.meta.count, 2);
        assert_eq!(page.meta.limit, 2);
    }

    #[test]
    fn test_malformed_envelope_is_an_error() {
        let result = serde_json::from_str::<Paginated<Item>>(r#"{"results": [{"id": 1}]"#);
        assert!(result.is_err());
    }
}
