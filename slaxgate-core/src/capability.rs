//! Host capability flags.
//!
//! Established once per session and handed to the interceptor explicitly.
//! The synchronous flags come from configuration; file-scheme access is
//! answered asynchronously by the host and memoized on first answer.

use crate::ctx::Scheme;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Synchronously known capabilities of the host runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CapabilityFlags {
    /// Blocking listeners may answer with a redirect URL.
    #[serde(default = "default_true")]
    pub declarative_redirect: bool,

    /// The host lets extensions intercept `ftp://` requests.
    #[serde(default)]
    pub ftp_interception: bool,

    /// The host lets extensions intercept `file://` requests.
    #[serde(default = "default_true")]
    pub file_interception: bool,
}

fn default_true() -> bool {
    true
}

impl Default for CapabilityFlags {
    fn default() -> Self {
        Self {
            declarative_redirect: true,
            ftp_interception: false,
            file_interception: true,
        }
    }
}

/// Answer to the host's "may this extension read file: URLs" query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSchemeAccess {
    Unknown,
    Granted,
    Denied,
}

#[derive(Debug, Default)]
pub struct CapabilitySet {
    flags: CapabilityFlags,
    file_scheme_access: OnceCell<bool>,
}

impl CapabilitySet {
    pub fn new(flags: CapabilityFlags) -> Self {
        Self {
            flags,
            file_scheme_access: OnceCell::new(),
        }
    }

    pub fn flags(&self) -> CapabilityFlags {
        self.flags
    }

    pub fn supports_declarative_redirect(&self) -> bool {
        self.flags.declarative_redirect
    }

    /// Whether pre-request interception works for `scheme`.
    pub fn supports_scheme_interception(&self, scheme: Scheme) -> bool {
        match scheme {
            Scheme::Http | Scheme::Https => true,
            Scheme::Ftp => self.flags.ftp_interception,
            Scheme::File => self.flags.file_interception,
            Scheme::Other => false,
        }
    }

    pub fn file_scheme_access(&self) -> FileSchemeAccess {
        match self.file_scheme_access.get() {
            None => FileSchemeAccess::Unknown,
            Some(true) => FileSchemeAccess::Granted,
            Some(false) => FileSchemeAccess::Denied,
        }
    }

    /// Records the host's answer. The first answer is fixed for the session;
    /// later answers are ignored.
    pub fn resolve_file_scheme_access(&self, granted: bool) -> FileSchemeAccess {
        let fixed = *self.file_scheme_access.get_or_init(|| granted);
        if fixed != granted {
            debug!(
                granted,
                fixed, "ignoring late file-scheme access answer; already resolved"
            );
        }
        self.file_scheme_access()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scheme_interception_follows_flags() {
        let caps = CapabilitySet::new(CapabilityFlags {
            declarative_redirect: true,
            ftp_interception: false,
            file_interception: true,
        });

        assert!(caps.supports_scheme_interception(Scheme::Https));
        assert!(caps.supports_scheme_interception(Scheme::File));
        assert!(!caps.supports_scheme_interception(Scheme::Ftp));
        assert!(!caps.supports_scheme_interception(Scheme::Other));
    }

    #[test]
    fn file_access_is_fixed_by_first_answer() {
        let caps = CapabilitySet::default();
        assert_eq!(caps.file_scheme_access(), FileSchemeAccess::Unknown);

        assert_eq!(
            caps.resolve_file_scheme_access(false),
            FileSchemeAccess::Denied
        );
        assert_eq!(
            caps.resolve_file_scheme_access(true),
            FileSchemeAccess::Denied
        );
        assert_eq!(caps.file_scheme_access(), FileSchemeAccess::Denied);
    }
}
