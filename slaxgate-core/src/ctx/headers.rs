use http::{HeaderName, HeaderValue};
use smallvec::SmallVec;
use std::borrow::Cow;

/// Response headers as delivered by the host, in wire order.
///
/// Names are stored as `HeaderName`, which normalizes to lowercase, so every
/// lookup is case-insensitive. Duplicate names are kept; lookups return the
/// first occurrence, mirroring how hosts expose header arrays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHeaders {
    entries: SmallVec<[(HeaderName, HeaderValue); 16]>,
}

impl ResponseHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: HeaderName, value: HeaderValue) {
        self.entries.push((name, value));
    }

    pub fn get(&self, name: &HeaderName) -> Option<&HeaderValue> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// First value for `name`, if present and printable ASCII.
    pub fn get_str(&self, name: &HeaderName) -> Option<&str> {
        self.get(name).and_then(|v| v.to_str().ok())
    }

    /// First value for `name`, decoded lossily so non-ASCII filenames survive.
    pub fn get_lossy(&self, name: &HeaderName) -> Option<Cow<'_, str>> {
        self.get(name).map(|v| String::from_utf8_lossy(v.as_bytes()))
    }

    pub fn get_mut(&mut self, name: &HeaderName) -> Option<&mut HeaderValue> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, name: &HeaderName) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&HeaderName, &HeaderValue)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(HeaderName, HeaderValue)> for ResponseHeaders {
    fn from_iter<T: IntoIterator<Item = (HeaderName, HeaderValue)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
