use crate::embed::{ElementId, ElementKind, ObserverHandle};
use std::cell::Cell;
use std::rc::Rc;

/// Per-element state for a claimed `<embed>` or `<object>`.
#[derive(Debug)]
pub struct EmbedBinding {
    pub(crate) kind: ElementKind,
    /// `src` for `<embed>`, `data` for `<object>`.
    pub(crate) source_attribute: &'static str,
    /// Source value as it stood after the last update.
    pub(crate) last_applied: Option<String>,
    pub(crate) observer: ObserverHandle,
    /// Fallback frame inserted into an `<object>`.
    pub(crate) frame: Option<ElementId>,
    pub(crate) updating: Rc<Cell<bool>>,
}

impl EmbedBinding {
    pub(crate) fn new(
        kind: ElementKind,
        source_attribute: &'static str,
        observer: ObserverHandle,
    ) -> Self {
        Self {
            kind,
            source_attribute,
            last_applied: None,
            observer,
            frame: None,
            updating: Rc::new(Cell::new(false)),
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn source_attribute(&self) -> &'static str {
        self.source_attribute
    }

    pub fn last_applied(&self) -> Option<&str> {
        self.last_applied.as_deref()
    }

    pub fn observer(&self) -> ObserverHandle {
        self.observer
    }

    pub fn frame(&self) -> Option<ElementId> {
        self.frame
    }
}

/// Re-entrancy guard for one binding. Released on drop, so every exit path
/// (early return or unwind) clears the flag.
pub(crate) struct UpdateGuard(Rc<Cell<bool>>);

impl UpdateGuard {
    /// `None` while another update of the same element is running.
    pub(crate) fn acquire(flag: &Rc<Cell<bool>>) -> Option<Self> {
        if flag.replace(true) {
            return None;
        }
        Some(Self(Rc::clone(flag)))
    }
}

impl Drop for UpdateGuard {
    fn drop(&mut self) {
        self.0.set(false);
    }
}
