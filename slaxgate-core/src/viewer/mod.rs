//! Viewer URL scheme.
//!
//! The only contract between interception and the viewer application is
//! `<viewer-root>?file=<percent-encoded source URL>[#fragment]`. The fragment
//! stays outside the encoded parameter so in-document anchors keep working
//! inside the viewer.

mod error;

pub use error::ViewerUrlError;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use std::fmt::{Display, Formatter};
use url::Url;

/// Characters left alone by ECMAScript's `encodeURIComponent`. The viewer
/// decodes with its inverse, so the two sides must agree byte for byte.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const FILE_PARAM: &str = "file=";

/// Absolute URL of the viewer entry page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerRoot(Url);

impl ViewerRoot {
    pub fn parse(raw: &str) -> Result<Self, ViewerUrlError> {
        let url = Url::parse(raw).map_err(|source| ViewerUrlError::InvalidRoot {
            value: raw.to_string(),
            source,
        })?;

        if url.cannot_be_a_base() || url.query().is_some() || url.fragment().is_some() {
            return Err(ViewerUrlError::UnusableRoot {
                value: raw.to_string(),
            });
        }

        Ok(Self(url))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// True when `candidate` already points at this viewer.
    pub fn is_viewer_url(&self, candidate: &str) -> bool {
        candidate.starts_with(self.as_str())
    }

    /// Wraps `target` as the viewer's `file` parameter.
    pub fn to_viewer_url(&self, target: &str) -> ViewerUrl {
        ViewerUrl(format!(
            "{}?{}{}",
            self.as_str(),
            FILE_PARAM,
            utf8_percent_encode(target, URI_COMPONENT)
        ))
    }

    /// Viewer URL for an `<embed src>`/`<object data>` value.
    ///
    /// The fragment is split off before encoding and appended verbatim; the
    /// remaining path is resolved against the hosting document's base URL.
    pub fn to_embedded_viewer_url(
        &self,
        base: &Url,
        path_with_fragment: &str,
    ) -> Result<ViewerUrl, ViewerUrlError> {
        let (path, fragment) = match path_with_fragment.find('#') {
            Some(at) => path_with_fragment.split_at(at),
            None => (path_with_fragment, ""),
        };

        let resolved = base
            .join(path)
            .map_err(|source| ViewerUrlError::Unresolvable {
                path: path.to_string(),
                source,
            })?;

        let mut viewer = self.to_viewer_url(resolved.as_str());
        viewer.0.push_str(fragment);
        Ok(viewer)
    }

    /// Recovers the wrapped source URL from a viewer URL.
    ///
    /// Returns `None` when `viewer_url` does not start with this root or has
    /// no decodable `file` parameter. Callers log that case and move on.
    pub fn extract_original_url(&self, viewer_url: &str) -> Option<String> {
        let query = viewer_url.strip_prefix(self.as_str())?.strip_prefix('?')?;
        let query = query.split_once('#').map_or(query, |(q, _)| q);

        let encoded = query
            .split('&')
            .find_map(|pair| pair.strip_prefix(FILE_PARAM))?;

        percent_decode_str(encoded)
            .decode_utf8()
            .ok()
            .map(|decoded| decoded.into_owned())
    }
}

/// A URL of the form `<viewer-root>?file=<encoded>[#fragment]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewerUrl(String);

impl ViewerUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for ViewerUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ViewerUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
