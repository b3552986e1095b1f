//! Query-parameter construction.
//!
//! [`QueryParams`] is the only place wire parameters are assembled. Optional
//! values go through [`QueryParams::set_opt`], which skips `None` entirely, so
//! an absent field never reaches the wire as an empty string or a zero.

use std::collections::BTreeMap;
use std::fmt::Display;

/// An ordered multi-map of URL query parameters.
///
/// Keys are kept sorted so the encoded form is deterministic; values under a
/// single key keep their insertion order.
///
/// # Examples
///
/// ```rust
/// use mgc_core::query::QueryParams;
///
/// let mut params = QueryParams::new();
/// params.set_opt("_limit", Some(10));
/// params.set_opt("_sort", None::<&str>);
/// params.append("expand", "volume_type");
/// params.append("expand", "attachment");
///
/// assert_eq!(params.encode(), "_limit=10&expand=volume_type&expand=attachment");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: BTreeMap<String, Vec<String>>,
}

impl QueryParams {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, replacing any previous values.
    pub fn set(&mut self, key: impl Into<String>, value: impl Display) -> &mut Self {
        self.entries.insert(key.into(), vec![value.to_string()]);
        self
    }

    /// Set `key` only when `value` is present.
    pub fn set_opt<V: Display>(&mut self, key: impl Into<String>, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.set(key, value);
        }
        self
    }

    /// Add another value under `key`, keeping existing ones.
    pub fn append(&mut self, key: impl Into<String>, value: impl Display) -> &mut Self {
        self.entries
            .entry(key.into())
            .or_default()
            .push(value.to_string());
        self
    }

    /// Add every value in `values` under `key`.
    pub fn append_all<I, V>(&mut self, key: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Display,
    {
        for value in values {
            self.append(key, value);
        }
        self
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values stored under `key`.
    pub fn get_all(&self, key: &str) -> &[String] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove every value under `key`.
    pub fn remove(&mut self, key: &str) -> &mut Self {
        self.entries.remove(key);
        self
    }

    /// Whether no parameter is set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of `key=value` pairs.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Iterate over `(key, value)` pairs in encoding order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().flat_map(|(key, values)| {
            values
                .iter()
                .map(move |value| (key.as_str(), value.as_str()))
        })
    }

    /// Copy every pair of `other` into `self`, replacing keys `other` defines.
    pub fn extend_from(&mut self, other: &QueryParams) -> &mut Self {
        for (key, values) in &other.entries {
            self.entries.insert(key.clone(), values.clone());
        }
        self
    }

    /// URL-encode the parameters (`application/x-www-form-urlencoded`).
    pub fn encode(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (key, value) in iter {
            params.append(key, value);
        }
        params
    }
}
