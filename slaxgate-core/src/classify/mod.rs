//! Response classification.
//!
//! Pure predicates deciding whether a response is a slax document and whether
//! the user or the server asked for it to be downloaded instead of viewed.

#[cfg(test)]
mod tests;

use crate::ctx::{FrameKind, ResponseHeaders};
use http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use url::Url;

pub const SLAX_MIME_TYPE: &str = "application/slax";
pub const OCTET_STREAM_MIME_TYPE: &str = "application/octet-stream";
pub const SLAX_EXTENSION: &str = ".slax";

/// Query marker the viewer appends when the user clicks "download".
pub const DOWNLOAD_ACTION_MARKER: &str = "slax.action=download";

/// Any `...=download` parameter. Some sites use it cosmetically, so it only
/// re-enables the `Content-Disposition` check for top-level loads.
const GENERIC_DOWNLOAD_MARKER: &str = "=download";

const ATTACHMENT: &[u8] = b"attachment";

/// Returns true when the response carries a slax document.
///
/// `application/slax` always matches. `application/octet-stream` matches only
/// when the URL path or the `Content-Disposition` filename ends in `.slax`.
/// A response without headers never matches.
pub fn is_target_resource(headers: Option<&ResponseHeaders>, url: &Url) -> bool {
    let Some(headers) = headers else {
        return false;
    };
    let Some(content_type) = headers.get_lossy(&CONTENT_TYPE) else {
        return false;
    };

    let essence = mime_essence(&content_type);
    if essence == SLAX_MIME_TYPE {
        return true;
    }
    if essence != OCTET_STREAM_MIME_TYPE {
        return false;
    }

    url_path_has_slax_extension(url)
        || headers
            .get_lossy(&CONTENT_DISPOSITION)
            .is_some_and(|cd| disposition_names_slax(&cd))
}

/// Returns true when the resource should be downloaded rather than viewed.
///
/// The checks run in a fixed order:
/// 1. the explicit viewer download marker always wins;
/// 2. top-level loads without a generic `=download` parameter are viewed,
///    whatever the server says in `Content-Disposition`;
/// 3. otherwise a `Content-Disposition: attachment` forces the download.
pub fn is_forced_download(url: &Url, frame: FrameKind, headers: Option<&ResponseHeaders>) -> bool {
    let query = url.query().unwrap_or("");

    if query.contains(DOWNLOAD_ACTION_MARKER) {
        return true;
    }

    if frame == FrameKind::TopLevel && !query.contains(GENERIC_DOWNLOAD_MARKER) {
        return false;
    }

    headers
        .and_then(|h| h.get_lossy(&CONTENT_DISPOSITION))
        .is_some_and(|cd| is_attachment(cd.as_bytes()))
}

/// `Content-Disposition` value starts with the `attachment` token.
pub fn is_attachment(value: &[u8]) -> bool {
    value
        .get(..ATTACHMENT.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(ATTACHMENT))
}

/// Path component of `url` ends in `.slax`, ignoring query and fragment.
pub fn url_path_has_slax_extension(url: &Url) -> bool {
    url.path().to_ascii_lowercase().ends_with(SLAX_EXTENSION)
}

/// Loose check used on raw attribute values that may be relative:
/// `.slax` followed by the end of the string, a query or a fragment.
pub fn mentions_slax_path(path: &str) -> bool {
    extension_followed_by(path, |next| matches!(next, None | Some('?') | Some('#')))
}

/// `Content-Disposition` filename ends in `.slax`, optionally quoted.
fn disposition_names_slax(value: &str) -> bool {
    extension_followed_by(value, |next| matches!(next, None | Some('"') | Some('\'')))
}

fn extension_followed_by(haystack: &str, accept: impl Fn(Option<char>) -> bool) -> bool {
    let lower = haystack.to_ascii_lowercase();
    lower
        .match_indices(SLAX_EXTENSION)
        .any(|(at, _)| accept(lower[at + SLAX_EXTENSION.len()..].chars().next()))
}

/// Lowercased MIME type with parameters stripped.
fn mime_essence(content_type: &str) -> String {
    content_type
        .split_once(';')
        .map_or(content_type, |(mime, _)| mime)
        .trim()
        .to_ascii_lowercase()
}
