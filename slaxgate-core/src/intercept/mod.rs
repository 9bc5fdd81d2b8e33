pub mod apply;
pub mod decision;
pub mod dispatch;
pub mod errors;
pub mod host;
pub mod slax;
#[cfg(test)]
pub(crate) mod tests;

pub use self::apply::{BlockingResponse, apply_decision};
pub use self::decision::Decision;
pub use self::dispatch::Dispatcher;
pub use self::errors::HostError;
pub use self::host::{EventFilter, Host, ListenerKind, NewTab, ResourceType, UrlMatch};
pub use self::slax::SlaxInterceptor;

use crate::ctx::InterceptedRequest;

/// Decision engine behind the host's request listeners.
///
/// Each hook sees one immutable request snapshot and must produce exactly one
/// `Decision` within the same turn. Hooks never fail: anything unexpected is
/// folded into `Decision::Allow` so the host's native handling proceeds.
///
/// All methods default to `Allow`, so implementations override only the
/// listeners they are registered for.
pub trait Interceptor: Send + Sync {
    /// Response headers arrived for a top-level or nested frame load.
    fn on_headers_received(&self, _request: &InterceptedRequest) -> Decision {
        Decision::Allow
    }

    /// Before an `ftp:`/`file:` request is issued; no headers exist yet.
    fn on_before_request(&self, _request: &InterceptedRequest) -> Decision {
        Decision::Allow
    }

    /// Before a navigation starts. Used only when the host hides `file:`
    /// requests from the blocking listeners.
    fn on_before_navigate(&self, _request: &InterceptedRequest) -> Decision {
        Decision::Allow
    }
}
