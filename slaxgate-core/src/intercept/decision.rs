use crate::ctx::ResponseHeaders;
use crate::viewer::ViewerUrl;

/// Outcome of intercepting one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Leave the load alone.
    Allow,

    /// Let the load continue with these headers, which carry
    /// `Content-Disposition: attachment`.
    ForceDownload(ResponseHeaders),

    /// Answer the blocking listener with a redirect to the viewer.
    Redirect(ViewerUrl),

    /// Navigate the tab to the viewer, then cancel the original load.
    /// Only used for top-level frames on hosts without declarative redirects.
    CancelAndNavigate(ViewerUrl),

    /// The viewer cannot be reached from this frame on this host; the load
    /// proceeds untouched.
    Unsupported,
}

impl Decision {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Decision::Allow => "allow",
            Decision::ForceDownload(_) => "force_download",
            Decision::Redirect(_) => "redirect",
            Decision::CancelAndNavigate(_) => "cancel_and_navigate",
            Decision::Unsupported => "unsupported",
        }
    }
}
