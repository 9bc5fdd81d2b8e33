use crate::ctx::TabId;
use crate::intercept::{EventFilter, Host, HostError, ListenerKind, NewTab};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    AddListener(ListenerKind),
    RemoveListener(ListenerKind),
    UpdateTab(TabId, String),
    CreateTab(NewTab),
    QueryFileAccess,
}

type Reply = Box<dyn FnOnce(bool) + Send>;

/// Records every call; tab updates fail when `fail_navigation` is set.
#[derive(Default)]
pub struct FakeHost {
    pub calls: Mutex<Vec<HostCall>>,
    pub filters: Mutex<Vec<(ListenerKind, EventFilter)>>,
    pub fail_navigation: bool,
    pending_reply: Mutex<Option<Reply>>,
}

impl FakeHost {
    pub fn failing_navigation() -> Self {
        Self {
            fail_navigation: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Delivers the pending file access answer, as the host would later.
    pub fn answer_file_access(&self, granted: bool) {
        let reply = self.pending_reply.lock().unwrap().take();
        if let Some(reply) = reply {
            reply(granted);
        }
    }

    fn record(&self, call: HostCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Host for FakeHost {
    fn add_listener(&self, kind: ListenerKind, filter: EventFilter) {
        self.record(HostCall::AddListener(kind));
        self.filters.lock().unwrap().push((kind, filter));
    }

    fn remove_listener(&self, kind: ListenerKind) {
        self.record(HostCall::RemoveListener(kind));
    }

    fn update_tab(&self, tab: TabId, url: &str) -> Result<(), HostError> {
        self.record(HostCall::UpdateTab(tab, url.to_string()));
        if self.fail_navigation {
            return Err(HostError::NoSuchTab(tab));
        }
        Ok(())
    }

    fn create_tab(&self, tab: NewTab) -> Result<(), HostError> {
        self.record(HostCall::CreateTab(tab));
        Ok(())
    }

    fn query_file_scheme_access(&self, reply: Reply) {
        self.record(HostCall::QueryFileAccess);
        *self.pending_reply.lock().unwrap() = Some(reply);
    }
}
