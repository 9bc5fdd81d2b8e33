use crate::ctx::TabId;
use thiserror::Error;

/// A host API call that did not go through.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("tab {0} no longer exists")]
    NoSuchTab(TabId),

    #[error("host rejected {operation}: {message}")]
    Rejected {
        operation: &'static str,
        message: String,
    },
}
