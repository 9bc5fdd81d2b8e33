use crate::capability::CapabilitySet;
use crate::classify::{
    is_attachment, is_forced_download, is_target_resource, url_path_has_slax_extension,
};
use crate::ctx::{FrameKind, InterceptedRequest, ResponseHeaders};
use crate::intercept::{Decision, Interceptor};
use crate::referer::RefererPreserver;
use crate::viewer::ViewerRoot;
use http::header::CONTENT_DISPOSITION;
use http::{HeaderValue, Method};
use std::sync::Arc;
use tracing::{debug, warn};

/// Sends slax documents to the viewer instead of downloading them or handing
/// them to a plugin.
pub struct SlaxInterceptor {
    viewer: ViewerRoot,
    capabilities: Arc<CapabilitySet>,
    referers: Arc<dyn RefererPreserver>,
}

impl SlaxInterceptor {
    pub fn new(
        viewer: ViewerRoot,
        capabilities: Arc<CapabilitySet>,
        referers: Arc<dyn RefererPreserver>,
    ) -> Self {
        Self {
            viewer,
            capabilities,
            referers,
        }
    }

    pub fn viewer(&self) -> &ViewerRoot {
        &self.viewer
    }

    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    /// Picks the redirect tier for a request that should open in the viewer.
    ///
    /// 1. declarative redirect, if the host supports it;
    /// 2. tab navigation plus cancellation, for top-level frames;
    /// 3. nothing, for nested frames on hosts without either mechanism.
    fn redirect_to_viewer(&self, request: &InterceptedRequest) -> Decision {
        let viewer_url = self.viewer.to_viewer_url(request.url.as_str());

        if self.capabilities.supports_declarative_redirect() {
            self.referers.save_referer(request);
            return Decision::Redirect(viewer_url);
        }

        match request.frame() {
            FrameKind::TopLevel => {
                self.referers.save_referer(request);
                Decision::CancelAndNavigate(viewer_url)
            }
            // No viewer will load, so nothing is stored for it to take.
            FrameKind::Nested => {
                warn!(
                    url = %request.url,
                    frame_id = request.frame_id.0,
                    "cannot redirect nested frames without declarative redirects; leaving load untouched"
                );
                Decision::Unsupported
            }
        }
    }
}

impl Interceptor for SlaxInterceptor {
    /// Matching order...
    /// 1. Method gate (only GET responses can be redirected safely)
    /// 2. Target resource check
    /// 3. Forced download
    /// 4. Redirect tier
    fn on_headers_received(&self, request: &InterceptedRequest) -> Decision {
        // Redirecting a POST response would have to replay the POST body.
        if request.method != Method::GET {
            return Decision::Allow;
        }

        let headers = request.response_headers.as_ref();
        if !is_target_resource(headers, &request.url) {
            return Decision::Allow;
        }

        if is_forced_download(&request.url, request.frame(), headers) {
            debug!(url = %request.url, "forcing slax download");
            return Decision::ForceDownload(with_attachment_disposition(
                headers.cloned().unwrap_or_default(),
            ));
        }

        self.redirect_to_viewer(request)
    }

    fn on_before_request(&self, request: &InterceptedRequest) -> Decision {
        // No headers yet: the URL path is all there is to go on.
        if !url_path_has_slax_extension(&request.url) {
            return Decision::Allow;
        }

        // Headers cannot be rewritten before the request is sent, so an
        // explicit download request just proceeds natively.
        if is_forced_download(&request.url, request.frame(), None) {
            return Decision::Allow;
        }

        self.redirect_to_viewer(request)
    }

    fn on_before_navigate(&self, request: &InterceptedRequest) -> Decision {
        if request.frame() != FrameKind::TopLevel
            || !url_path_has_slax_extension(&request.url)
            || is_forced_download(&request.url, FrameKind::TopLevel, None)
        {
            return Decision::Allow;
        }

        // Navigation events are not blocking, so a redirect answer would be
        // ignored. Replace the tab instead; the viewer will then ask the user
        // for file access.
        self.referers.save_referer(request);
        Decision::CancelAndNavigate(self.viewer.to_viewer_url(request.url.as_str()))
    }
}

/// Ensures `Content-Disposition` starts with `attachment`.
///
/// A missing header is appended. An existing non-attachment disposition keeps
/// its parameters (`filename=...`) and only has its type token replaced.
pub fn with_attachment_disposition(mut headers: ResponseHeaders) -> ResponseHeaders {
    let Some(current) = headers.get_mut(&CONTENT_DISPOSITION) else {
        headers.push(CONTENT_DISPOSITION, HeaderValue::from_static("attachment"));
        return headers;
    };

    if is_attachment(current.as_bytes()) {
        return headers;
    }

    let replaced = {
        let bytes = current.as_bytes();
        let params = bytes
            .iter()
            .position(|b| *b == b';')
            .map_or(&[][..], |at| &bytes[at..]);

        let mut value = b"attachment".to_vec();
        value.extend_from_slice(params);
        value
    };

    *current = HeaderValue::from_bytes(&replaced)
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));
    headers
}
