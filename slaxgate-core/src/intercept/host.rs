use crate::ctx::TabId;
use crate::intercept::HostError;

/// Listener slots the interceptor asks the host to fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Blocking, header-visible listener on every top-level and sub-frame load.
    HeadersReceived,
    /// Blocking pre-request listener on `ftp:` slax URLs.
    BeforeFtpRequest,
    /// Blocking pre-request listener on `file:` slax URLs.
    BeforeFileRequest,
    /// Non-blocking navigation listener on `file:` slax URLs. Installed only
    /// when the host denies file-URL access.
    BeforeFileNavigate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    MainFrame,
    SubFrame,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlMatch {
    /// Every URL the host lets extensions see.
    All,
    /// Host match pattern such as `ftp://*/*.slax`.
    Pattern(String),
    /// Navigation-style filter.
    PrefixAndPathSuffix { prefix: String, path_suffix: String },
}

/// What a listener is registered for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFilter {
    pub urls: Vec<UrlMatch>,
    pub types: Vec<ResourceType>,
    /// The host waits for the listener's answer before continuing the load.
    pub blocking: bool,
    /// Response headers are passed to the listener.
    pub response_headers: bool,
}

const FRAME_TYPES: [ResourceType; 2] = [ResourceType::MainFrame, ResourceType::SubFrame];

impl EventFilter {
    pub fn headers_received() -> Self {
        Self {
            urls: vec![UrlMatch::All],
            types: FRAME_TYPES.to_vec(),
            blocking: true,
            response_headers: true,
        }
    }

    /// Blocking pre-request filter for `scheme` URLs ending in `.slax`.
    /// Match patterns are case-sensitive, so both spellings are listed.
    pub fn before_request(scheme: &str) -> Self {
        Self {
            urls: ["slax", "SLAX"]
                .iter()
                .map(|ext| UrlMatch::Pattern(format!("{scheme}://*/*.{ext}")))
                .collect(),
            types: FRAME_TYPES.to_vec(),
            blocking: true,
            response_headers: false,
        }
    }

    pub fn before_file_navigate() -> Self {
        Self {
            urls: ["slax", "SLAX"]
                .iter()
                .map(|ext| UrlMatch::PrefixAndPathSuffix {
                    prefix: "file://".to_string(),
                    path_suffix: format!(".{ext}"),
                })
                .collect(),
            types: vec![ResourceType::MainFrame],
            blocking: false,
            response_headers: false,
        }
    }
}

/// Tab to open next to an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTab {
    pub url: String,
    pub opener: Option<TabId>,
    /// Position in the window's tab strip.
    pub index: Option<usize>,
}

/// The browser APIs interception relies on.
///
/// Calls happen on the host's event loop. Answers that arrive later, such as
/// the file access query, come back through the supplied callback.
pub trait Host: Send + Sync {
    fn add_listener(&self, kind: ListenerKind, filter: EventFilter);

    fn remove_listener(&self, kind: ListenerKind);

    /// Points an existing tab at `url`.
    fn update_tab(&self, tab: TabId, url: &str) -> Result<(), HostError>;

    fn create_tab(&self, tab: NewTab) -> Result<(), HostError>;

    /// Asks whether the user let this extension read `file:` URLs.
    fn query_file_scheme_access(&self, reply: Box<dyn FnOnce(bool) + Send>);
}
