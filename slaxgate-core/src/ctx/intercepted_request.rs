use crate::ctx::{FrameId, RequestId, ResponseHeaders, TabId};
use http::Method;
use url::Url;

/// Where the resource is being loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// The tab's main frame.
    TopLevel,
    /// An iframe or any other nested browsing context.
    Nested,
}

/// URL scheme of an intercepted request, as far as interception cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    Http,
    Https,
    Ftp,
    File,
    Other,
}

impl Scheme {
    pub fn of(url: &Url) -> Self {
        match url.scheme() {
            "http" => Scheme::Http,
            "https" => Scheme::Https,
            "ftp" => Scheme::Ftp,
            "file" => Scheme::File,
            _ => Scheme::Other,
        }
    }
}

/// Snapshot of one host network event.
///
/// Built fresh for every event and dropped once a decision has been applied.
#[derive(Debug, Clone)]
pub struct InterceptedRequest {
    pub request_id: RequestId,

    /// Owning tab, if the request belongs to one.
    pub tab_id: Option<TabId>,

    pub frame_id: FrameId,

    pub method: Method,

    pub url: Url,

    /// `Referer` the host attached to the outgoing request.
    pub referer: Option<String>,

    /// Only present on response-headers events.
    pub response_headers: Option<ResponseHeaders>,
}

impl InterceptedRequest {
    pub fn new(request_id: impl Into<RequestId>, method: Method, url: Url) -> Self {
        Self {
            request_id: request_id.into(),
            tab_id: None,
            frame_id: FrameId::TOP_LEVEL,
            method,
            url,
            referer: None,
            response_headers: None,
        }
    }

    pub fn with_tab(mut self, tab_id: TabId) -> Self {
        self.tab_id = Some(tab_id);
        self
    }

    pub fn in_frame(mut self, frame_id: FrameId) -> Self {
        self.frame_id = frame_id;
        self
    }

    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = Some(referer.into());
        self
    }

    pub fn with_response_headers(mut self, headers: ResponseHeaders) -> Self {
        self.response_headers = Some(headers);
        self
    }

    pub fn frame(&self) -> FrameKind {
        if self.frame_id.is_top_level() {
            FrameKind::TopLevel
        } else {
            FrameKind::Nested
        }
    }

    pub fn scheme(&self) -> Scheme {
        Scheme::of(&self.url)
    }
}
