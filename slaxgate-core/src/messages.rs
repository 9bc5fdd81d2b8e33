//! Requests sent by viewer pages to the background side.
//!
//! Messages arrive as JSON objects tagged by `action`. Anything that does
//! not parse is dropped without a reply.

use crate::capability::{CapabilitySet, FileSchemeAccess};
use crate::ctx::TabId;
use crate::intercept::{Host, NewTab};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum RuntimeMessage {
    GetParentOrigin,
    IsAllowedFileSchemeAccess,
    OpenExtensionsPageForFileAccess {
        #[serde(default)]
        data: ExtensionsPageRequest,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionsPageRequest {
    #[serde(default)]
    pub new_tab: bool,
}

/// Tab that sent a message. Messages from non-tab contexts carry none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderTab {
    pub id: TabId,
    pub index: usize,
    pub url: Option<String>,
}

impl RuntimeMessage {
    pub fn parse(raw: &str) -> Option<Self> {
        match serde_json::from_str(raw) {
            Ok(message) => Some(message),
            Err(e) => {
                debug!(error = %e, "dropping unrecognized runtime message");
                None
            }
        }
    }
}

/// Origin a viewer frame may trust for embedding local files.
///
/// Uses the tab URL, since extension frames are invisible to the host's
/// navigation API.
pub fn parent_origin(tab_url: Option<&str>) -> String {
    let Some(url) = tab_url.filter(|u| !u.is_empty()) else {
        return String::new();
    };

    if url.starts_with("file:") {
        return "file://".to_string();
    }

    if let Some(sep) = url.find("://") {
        let scheme = &url[..sep];
        let rest = &url[sep + 3..];
        let host_len = rest.find('/').unwrap_or(rest.len());
        if !scheme.is_empty() && !scheme.contains(':') && host_len > 0 {
            return url[..sep + 3 + host_len].to_string();
        }
    }

    // data: and other opaque URLs have no separable origin.
    url.to_string()
}

/// Delivers a reply to the sending page. Called at most once.
pub type Responder = Box<dyn FnOnce(Value) + Send>;

/// Routes viewer messages to the host.
///
/// Replies go through a `Responder`, which may run after `handle` returns:
/// a file access question asked before the startup query has been answered
/// is forwarded to the host and answered when the host replies.
pub struct MessageRouter<H: Host> {
    host: Arc<H>,
    capabilities: Arc<CapabilitySet>,
    extensions_page: String,
}

impl<H: Host> MessageRouter<H> {
    pub fn new(host: Arc<H>, capabilities: Arc<CapabilitySet>, extension_id: &str) -> Self {
        Self {
            host,
            capabilities,
            extensions_page: format!("chrome://extensions/?id={extension_id}"),
        }
    }

    pub fn extensions_page(&self) -> &str {
        &self.extensions_page
    }

    pub fn handle_json(&self, raw: &str, sender: Option<&SenderTab>, respond: Responder) {
        if let Some(message) = RuntimeMessage::parse(raw) {
            self.handle(&message, sender, respond);
        }
    }

    /// `respond` is dropped unused for actions without a reply.
    pub fn handle(&self, message: &RuntimeMessage, sender: Option<&SenderTab>, respond: Responder) {
        match message {
            RuntimeMessage::GetParentOrigin => {
                let tab_url = sender.and_then(|tab| tab.url.as_deref());
                respond(Value::String(parent_origin(tab_url)));
            }
            RuntimeMessage::IsAllowedFileSchemeAccess => self.answer_file_scheme_access(respond),
            RuntimeMessage::OpenExtensionsPageForFileAccess { data } => {
                self.open_extensions_page(data.new_tab, sender);
            }
        }
    }

    fn answer_file_scheme_access(&self, respond: Responder) {
        match self.capabilities.file_scheme_access() {
            FileSchemeAccess::Granted => respond(Value::Bool(true)),
            FileSchemeAccess::Denied => respond(Value::Bool(false)),
            FileSchemeAccess::Unknown => {
                let capabilities = Arc::clone(&self.capabilities);
                self.host
                    .query_file_scheme_access(Box::new(move |granted| {
                        let access = capabilities.resolve_file_scheme_access(granted);
                        respond(Value::Bool(access == FileSchemeAccess::Granted));
                    }));
            }
        }
    }

    fn open_extensions_page(&self, new_tab: bool, sender: Option<&SenderTab>) {
        let Some(tab) = sender else {
            debug!("extensions page requested outside a tab");
            return;
        };

        let result = if new_tab {
            self.host.create_tab(NewTab {
                url: self.extensions_page.clone(),
                opener: Some(tab.id),
                index: Some(tab.index + 1),
            })
        } else {
            self.host.update_tab(tab.id, &self.extensions_page)
        };

        if let Err(e) = result {
            warn!(tab_id = %tab.id, error = %e, "failed to open extensions page");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::CapabilityFlags;
    use crate::intercept::tests::fake_host::{FakeHost, HostCall};
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    const EXTENSION_ID: &str = "abcdefghijklmnopabcdefghijklmnop";

    fn router() -> (Arc<FakeHost>, Arc<CapabilitySet>, MessageRouter<FakeHost>) {
        let host = Arc::new(FakeHost::default());
        let caps = Arc::new(CapabilitySet::new(CapabilityFlags::default()));
        let router = MessageRouter::new(host.clone(), caps.clone(), EXTENSION_ID);
        (host, caps, router)
    }

    fn tab(url: Option<&str>) -> SenderTab {
        SenderTab {
            id: TabId(7),
            index: 2,
            url: url.map(str::to_string),
        }
    }

    /// Responder that records what it was called with.
    fn recorder() -> (Arc<Mutex<Option<Value>>>, Responder) {
        let slot = Arc::new(Mutex::new(None));
        let sink = slot.clone();
        (slot, Box::new(move |v| *sink.lock().unwrap() = Some(v)))
    }

    fn ask(router: &MessageRouter<FakeHost>, raw: &str, sender: Option<&SenderTab>) -> Option<Value> {
        let (slot, respond) = recorder();
        router.handle_json(raw, sender, respond);
        slot.lock().unwrap().take()
    }

    #[test]
    fn parent_origin_of_hierarchical_urls() {
        assert_eq!(
            parent_origin(Some("https://example.com/docs/a.html?x=1")),
            "https://example.com"
        );
        assert_eq!(
            parent_origin(Some("chrome-extension://abc/viewer.html")),
            "chrome-extension://abc"
        );
    }

    #[test]
    fn parent_origin_edge_cases() {
        assert_eq!(parent_origin(None), "");
        assert_eq!(parent_origin(Some("")), "");
        assert_eq!(parent_origin(Some("file:///home/me/a.slax")), "file://");
        assert_eq!(
            parent_origin(Some("data:text/html,<p>hi</p>")),
            "data:text/html,<p>hi</p>"
        );
    }

    #[test]
    fn get_parent_origin_without_tab_replies_empty() {
        let (_, _, router) = router();

        let reply = ask(&router, r#"{"action":"getParentOrigin"}"#, None);

        assert_eq!(reply, Some(Value::String(String::new())));
    }

    #[test]
    fn get_parent_origin_uses_sender_tab() {
        let (_, _, router) = router();
        let sender = tab(Some("https://example.com/page"));
        let (slot, respond) = recorder();

        router.handle(&RuntimeMessage::GetParentOrigin, Some(&sender), respond);

        assert_eq!(
            slot.lock().unwrap().take(),
            Some(Value::String("https://example.com".into()))
        );
    }

    #[test]
    fn known_file_access_is_answered_at_once() {
        let (host, caps, router) = router();
        caps.resolve_file_scheme_access(false);

        let reply = ask(&router, r#"{"action":"isAllowedFileSchemeAccess"}"#, None);

        assert_eq!(reply, Some(Value::Bool(false)));
        assert!(host.calls().is_empty());
    }

    #[test]
    fn unknown_file_access_waits_for_the_host() {
        // Arrange
        let (host, caps, router) = router();
        let (slot, respond) = recorder();

        // Act
        router.handle_json(r#"{"action":"isAllowedFileSchemeAccess"}"#, None, respond);
        let before = slot.lock().unwrap().clone();
        host.answer_file_access(true);

        // Assert
        assert_eq!(before, None);
        assert_eq!(host.calls(), vec![HostCall::QueryFileAccess]);
        assert_eq!(slot.lock().unwrap().take(), Some(Value::Bool(true)));
        assert_eq!(caps.file_scheme_access(), FileSchemeAccess::Granted);
    }

    #[test]
    fn extensions_page_replaces_sender_tab() {
        // Arrange
        let (host, _, router) = router();
        let sender = tab(None);

        // Act
        let reply = ask(
            &router,
            r#"{"action":"openExtensionsPageForFileAccess","data":{"newTab":false}}"#,
            Some(&sender),
        );

        // Assert
        assert_eq!(reply, None);
        assert_eq!(
            host.calls(),
            vec![HostCall::UpdateTab(
                TabId(7),
                format!("chrome://extensions/?id={EXTENSION_ID}")
            )]
        );
    }

    #[test]
    fn extensions_page_opens_next_to_sender_tab() {
        let (host, _, router) = router();
        let sender = tab(None);

        ask(
            &router,
            r#"{"action":"openExtensionsPageForFileAccess","data":{"newTab":true}}"#,
            Some(&sender),
        );

        assert_eq!(
            host.calls(),
            vec![HostCall::CreateTab(NewTab {
                url: router.extensions_page().to_string(),
                opener: Some(TabId(7)),
                index: Some(3),
            })]
        );
    }

    #[test]
    fn unknown_actions_are_dropped() {
        let (host, _, router) = router();

        assert_eq!(ask(&router, r#"{"action":"selfDestruct"}"#, None), None);
        assert_eq!(ask(&router, "not json", None), None);
        assert!(host.calls().is_empty());
    }
}
