use crate::capability::{CapabilitySet, FileSchemeAccess};
use crate::ctx::{InterceptedRequest, Scheme};
use crate::intercept::{
    BlockingResponse, Decision, EventFilter, Host, Interceptor, ListenerKind, apply_decision,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

/// Connects an `Interceptor` to the host's listeners.
///
/// Owns listener registration and retirement, and routes each event through
/// the interceptor and `apply_decision`.
pub struct Dispatcher<H: Host> {
    host: Arc<H>,
    interceptor: Arc<dyn Interceptor>,
    capabilities: Arc<CapabilitySet>,
    ftp_retired: AtomicBool,
    file_retired: AtomicBool,
    navigation_fallback: AtomicBool,
}

impl<H: Host + 'static> Dispatcher<H> {
    pub fn new(
        host: Arc<H>,
        interceptor: Arc<dyn Interceptor>,
        capabilities: Arc<CapabilitySet>,
    ) -> Self {
        Self {
            host,
            interceptor,
            capabilities,
            ftp_retired: AtomicBool::new(false),
            file_retired: AtomicBool::new(false),
            navigation_fallback: AtomicBool::new(false),
        }
    }

    /// Registers the blocking listeners and asks the host about file access.
    /// The answer arrives later and may install the navigation fallback.
    pub fn start(self: &Arc<Self>) {
        self.host
            .add_listener(ListenerKind::HeadersReceived, EventFilter::headers_received());
        self.host.add_listener(
            ListenerKind::BeforeFtpRequest,
            EventFilter::before_request("ftp"),
        );
        self.host.add_listener(
            ListenerKind::BeforeFileRequest,
            EventFilter::before_request("file"),
        );

        let this = Arc::clone(self);
        self.host
            .query_file_scheme_access(Box::new(move |granted| {
                this.on_file_scheme_access(granted)
            }));
    }

    pub fn on_headers_received(&self, request: &InterceptedRequest) -> BlockingResponse {
        let decision = self.interceptor.on_headers_received(request);
        self.finish("headers_received", request, decision)
    }

    /// Pre-request hook for `ftp:` and `file:` loads.
    ///
    /// When the host cannot intercept the scheme, the listener is removed for
    /// the rest of the session so it stops being dispatched.
    pub fn on_before_request(&self, request: &InterceptedRequest) -> BlockingResponse {
        let scheme = request.scheme();
        let slot = match scheme {
            Scheme::Ftp => Some((&self.ftp_retired, ListenerKind::BeforeFtpRequest)),
            Scheme::File => Some((&self.file_retired, ListenerKind::BeforeFileRequest)),
            _ => None,
        };

        if let Some((retired, kind)) = slot {
            if retired.load(Ordering::Acquire) {
                return BlockingResponse::Proceed;
            }
            if !self.capabilities.supports_scheme_interception(scheme) {
                if !retired.swap(true, Ordering::AcqRel) {
                    info!(listener = ?kind, "scheme interception unsupported; removing listener");
                    self.host.remove_listener(kind);
                }
                return BlockingResponse::Proceed;
            }
        }

        let decision = self.interceptor.on_before_request(request);
        self.finish("before_request", request, decision)
    }

    /// Navigation fallback for `file:` URLs. The host does not wait for an
    /// answer, so only the side effects of the decision matter.
    pub fn on_before_navigate(&self, request: &InterceptedRequest) {
        let decision = self.interceptor.on_before_navigate(request);
        self.finish("before_navigate", request, decision);
    }

    /// Receives the asynchronous file access answer. On denial, blocking
    /// listeners never see `file:` loads, so the navigation listener takes
    /// over.
    pub fn on_file_scheme_access(&self, granted: bool) {
        let access = self.capabilities.resolve_file_scheme_access(granted);
        debug!(?access, "file scheme access resolved");

        if access == FileSchemeAccess::Denied
            && !self.navigation_fallback.swap(true, Ordering::AcqRel)
        {
            info!("file access denied; watching file navigations instead");
            self.host.add_listener(
                ListenerKind::BeforeFileNavigate,
                EventFilter::before_file_navigate(),
            );
        }
    }

    fn finish(
        &self,
        event: &'static str,
        request: &InterceptedRequest,
        decision: Decision,
    ) -> BlockingResponse {
        if decision != Decision::Allow {
            debug!(
                event,
                request_id = %request.request_id,
                url = %request.url,
                decision = decision.kind(),
                "slax request intercepted"
            );
        }
        apply_decision(self.host.as_ref(), request, decision)
    }
}
