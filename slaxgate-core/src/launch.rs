//! File-browser "open with" launcher.

use crate::viewer::{ViewerRoot, ViewerUrl};
use std::borrow::Cow;
use tracing::debug;

/// Action id the file browser passes for "Run as slax application".
pub const RUN_AS_SLAX_ACTION: &str = "run-as-slax";

const EXTERNAL_FS_PREFIX: &str = "filesystem:chrome-extension://";
const EXTERNAL_FS_SUFFIX: &str = "/external/";
const EXTENSION_ID_LEN: usize = 32;
const DRIVE_ALIAS: &str = "drive:";

/// Shortens external file-system entry URLs to the `drive:` alias.
pub fn drive_alias(entry_url: &str) -> Cow<'_, str> {
    let Some(rest) = entry_url.strip_prefix(EXTERNAL_FS_PREFIX) else {
        return Cow::Borrowed(entry_url);
    };

    let is_extension_id = rest
        .get(..EXTENSION_ID_LEN)
        .is_some_and(|id| id.bytes().all(|b| (b'a'..=b'p').contains(&b)));
    if !is_extension_id {
        return Cow::Borrowed(entry_url);
    }

    match rest[EXTENSION_ID_LEN..].strip_prefix(EXTERNAL_FS_SUFFIX) {
        Some(path) => Cow::Owned(format!("{DRIVE_ALIAS}{path}")),
        None => Cow::Borrowed(entry_url),
    }
}

/// Viewer URLs to open, one tab each and in order, for a file-browser action.
pub fn launch_viewer_urls<S: AsRef<str>>(
    viewer: &ViewerRoot,
    action_id: &str,
    entries: &[S],
) -> Vec<ViewerUrl> {
    if action_id != RUN_AS_SLAX_ACTION {
        debug!(action_id, "ignoring foreign file-browser action");
        return Vec::new();
    }

    entries
        .iter()
        .map(|entry| viewer.to_viewer_url(&drive_alias(entry.as_ref())))
        .collect()
}
