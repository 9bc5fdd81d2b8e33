use crate::ctx::{InterceptedRequest, ResponseHeaders};
use crate::intercept::{Decision, Host};
use tracing::warn;

/// What a blocking listener hands back to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockingResponse {
    /// Continue the load unchanged.
    Proceed,
    /// Continue with replaced response headers.
    ResponseHeaders(ResponseHeaders),
    /// Redirect the load.
    RedirectUrl(String),
    /// Abort the load.
    Cancel,
}

/// Applies `decision` to the host. This is the only place decisions turn into
/// host calls.
///
/// For `CancelAndNavigate` the tab update is issued first and the load is only
/// cancelled once it went through. Without a tab, or if the update fails, the
/// load proceeds.
pub fn apply_decision<H>(
    host: &H,
    request: &InterceptedRequest,
    decision: Decision,
) -> BlockingResponse
where
    H: Host + ?Sized,
{
    match decision {
        Decision::Allow | Decision::Unsupported => BlockingResponse::Proceed,

        Decision::ForceDownload(headers) => BlockingResponse::ResponseHeaders(headers),

        Decision::Redirect(viewer_url) => BlockingResponse::RedirectUrl(viewer_url.into_string()),

        Decision::CancelAndNavigate(viewer_url) => {
            let Some(tab) = request.tab_id else {
                warn!(url = %request.url, "no tab to navigate; letting the load proceed");
                return BlockingResponse::Proceed;
            };

            match host.update_tab(tab, viewer_url.as_str()) {
                Ok(()) => BlockingResponse::Cancel,
                Err(err) => {
                    warn!(
                        url = %request.url,
                        tab_id = tab.0,
                        error = %err,
                        "tab navigation failed; letting the load proceed"
                    );
                    BlockingResponse::Proceed
                }
            }
        }
    }
}
