//! Response header storage.
//!
//! [`HeaderMap`] keeps one value per lower-cased header name. A repeated header
//! overwrites the earlier value, so `Set-Cookie` style multi-value headers only
//! keep their last occurrence. This is a known limitation: values are never
//! combined.
//!
//! Two reserved keys live alongside the wire headers: [`STATUS_KEY`] holds the
//! status line and [`CONTENT_KEY`] holds the decoded body once a
//! [`Response`](crate::protocol::Response) is turned into a map. Both start with
//! `:`, which a wire header name can never contain because header lines are
//! split at their first colon.

use std::collections::BTreeMap;
use std::collections::btree_map;

/// Reserved key holding the status line, e.g. `HTTP/1.0 200 OK`.
pub const STATUS_KEY: &str = ":status";

/// Reserved key holding the response body decoded as text.
pub const CONTENT_KEY: &str = ":content";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    inner: BTreeMap<String, String>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a header, case-folding the name and trimming the value.
    ///
    /// Returns the value previously stored under the same name, which this
    /// insert has overwritten.
    pub fn insert(&mut self, name: &str, value: &str) -> Option<String> {
        self.inner.insert(name.to_ascii_lowercase(), trim_value(value).to_string())
    }

    pub(crate) fn insert_reserved(&mut self, key: &'static str, value: String) {
        debug_assert!(key.starts_with(':'));
        self.inner.insert(key.to_string(), value);
    }

    /// Looks a header up by name, ignoring ASCII case.
    pub fn get<K: AsRef<str>>(&self, name: K) -> Option<&str> {
        let name = name.as_ref();
        match self.inner.get(name) {
            Some(value) => Some(value.as_str()),
            None if name.bytes().any(|b| b.is_ascii_uppercase()) => self.inner.get(&name.to_ascii_lowercase()).map(String::as_str),
            None => None,
        }
    }

    pub fn contains_key<K: AsRef<str>>(&self, name: K) -> bool {
        self.get(name).is_some()
    }

    pub fn remove<K: AsRef<str>>(&mut self, name: K) -> Option<String> {
        self.inner.remove(&name.as_ref().to_ascii_lowercase())
    }

    /// The status line stored under [`STATUS_KEY`].
    pub fn status_line(&self) -> Option<&str> {
        self.get(STATUS_KEY)
    }

    /// The body stored under [`CONTENT_KEY`].
    pub fn content(&self) -> Option<&str> {
        self.get(CONTENT_KEY)
    }

    /// Number of entries, reserved keys included.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterates all entries ordered by name, reserved keys first.
    pub fn iter(&self) -> Iter<'_> {
        Iter { inner: self.inner.iter() }
    }
}

impl<'a> IntoIterator for &'a HeaderMap {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug)]
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, String, String>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Strips leading and trailing whitespace, carriage returns included.
pub fn trim_value(value: &str) -> &str {
    value.trim_matches(|c: char| c.is_ascii_whitespace())
}
