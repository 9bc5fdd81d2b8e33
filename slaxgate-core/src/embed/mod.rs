//! Keeps `<embed>` and `<object>` elements that carry slax content pointed at
//! the viewer, including after page scripts change their source.

mod binding;
mod document;
mod update;

pub use binding::EmbedBinding;
pub use document::{Document, ElementId, ElementKind, ObserverHandle};
pub use update::{INLINE_DOCUMENT_TYPE, UNRENDERABLE_TYPE};

use crate::classify::{SLAX_MIME_TYPE, mentions_slax_path};
use crate::viewer::ViewerRoot;
use binding::UpdateGuard;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Animation name the detection stylesheet attaches to every `<object>` and
/// `<embed>`. Hosts fire an animation-start event when such an element enters
/// the rendered tree, including elements inserted long after load.
pub const DETECTION_ANIMATION: &str = "slaxgate-detected-object-or-embed";

/// Stylesheet the host injects into every document.
pub const DETECTION_STYLESHEET: &str = "\
@keyframes slaxgate-detected-object-or-embed {}
object, embed {
  animation-delay: 0s !important;
  animation-name: slaxgate-detected-object-or-embed !important;
  animation-play-state: running !important;
}
";

#[derive(Debug)]
enum Claim {
    /// Looked at once and not ours; never looked at again.
    Ignored,
    Bound(EmbedBinding),
}

/// Outcome of the first look at an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchOutcome {
    /// Now bound to the viewer and watched.
    Claimed,
    /// Seen before; nothing done.
    AlreadySeen,
    /// Not slax content, or a placeholder that cannot be redirected.
    Ignored,
}

/// Side table of every `<object>`/`<embed>` seen in one document.
pub struct Reconciler {
    viewer: ViewerRoot,
    claims: HashMap<ElementId, Claim>,
}

impl Reconciler {
    pub fn new(viewer: ViewerRoot) -> Self {
        Self {
            viewer,
            claims: HashMap::new(),
        }
    }

    /// Host animation-start signal. Only the detection animation counts.
    pub fn on_animation_start<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        element: ElementId,
        animation_name: &str,
    ) -> Option<WatchOutcome> {
        (animation_name == DETECTION_ANIMATION).then(|| self.watch(doc, element))
    }

    /// First look at an element: classify it, claim it and bind it to the
    /// viewer. Later calls for the same element do nothing.
    pub fn watch<D: Document + ?Sized>(&mut self, doc: &mut D, element: ElementId) -> WatchOutcome {
        if self.claims.contains_key(&element) {
            return WatchOutcome::AlreadySeen;
        }

        let Some((kind, source_attribute)) = self.classify(doc, element) else {
            self.claims.insert(element, Claim::Ignored);
            return WatchOutcome::Ignored;
        };

        let observer = doc.observe_attribute(element, source_attribute);
        self.claims.insert(
            element,
            Claim::Bound(EmbedBinding::new(kind, source_attribute, observer)),
        );
        debug!(element, ?kind, "claimed slax element");

        self.reconcile(doc, element);
        WatchOutcome::Claimed
    }

    /// Mutation record for `attribute` on `element`.
    pub fn on_attribute_mutated<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        element: ElementId,
        attribute: &str,
    ) -> bool {
        match self.claims.get(&element) {
            Some(Claim::Bound(binding)) if binding.source_attribute == attribute => {
                self.reconcile(doc, element)
            }
            _ => false,
        }
    }

    /// Re-applies the viewer if the watched source changed since the last
    /// update. Returns whether an update ran.
    ///
    /// Safe to call from any partial state: it only compares the current
    /// source with the last applied one, so the next mutation repairs
    /// whatever an interrupted update left behind.
    pub fn reconcile<D: Document + ?Sized>(&mut self, doc: &mut D, element: ElementId) -> bool {
        let Some(Claim::Bound(binding)) = self.claims.get_mut(&element) else {
            return false;
        };

        // The update itself writes the watched attribute.
        let Some(_guard) = UpdateGuard::acquire(&binding.updating) else {
            trace!(element, "reconcile already running");
            return false;
        };

        let current = doc.attribute(element, binding.source_attribute);
        if current.is_some() && current == binding.last_applied {
            return false;
        }

        match binding.kind {
            ElementKind::Embed => update::update_embed(doc, &self.viewer, element),
            ElementKind::Object => {
                update::update_object(doc, &self.viewer, element, &mut binding.frame)
            }
            ElementKind::Other => {}
        }

        binding.last_applied = doc.attribute(element, binding.source_attribute);
        true
    }

    /// Drops whatever is recorded for an element leaving the document,
    /// including an ignored verdict, and disconnects its observer. Hosts call
    /// this on removal; it is the only way claims are released.
    pub fn forget<D: Document + ?Sized>(&mut self, doc: &mut D, element: ElementId) {
        if let Some(Claim::Bound(binding)) = self.claims.remove(&element) {
            doc.disconnect(binding.observer);
        }
    }

    pub fn binding(&self, element: ElementId) -> Option<&EmbedBinding> {
        match self.claims.get(&element) {
            Some(Claim::Bound(binding)) => Some(binding),
            _ => None,
        }
    }

    /// Element kind and source attribute, if the element should be bound.
    fn classify<D: Document + ?Sized>(
        &self,
        doc: &D,
        element: ElementId,
    ) -> Option<(ElementKind, &'static str)> {
        let kind = doc.kind(element);
        let source_attribute = match kind {
            ElementKind::Embed => "src",
            ElementKind::Object => "data",
            ElementKind::Other => return None,
        };

        let mime_type = doc
            .attribute(element, "type")
            .filter(|t| !t.is_empty());
        if let Some(mime_type) = &mime_type {
            if !mime_type.eq_ignore_ascii_case(SLAX_MIME_TYPE) {
                return None;
            }
        }

        let source = doc.attribute(element, source_attribute).unwrap_or_default();
        if mime_type.is_none() && !mentions_slax_path(&source) {
            return None;
        }

        if kind == ElementKind::Embed && is_plugin_placeholder(doc, element, &source) {
            // The host's own full-page plugin document. Reaching it means the
            // interceptor let the load through, e.g. a POST response, which
            // cannot be replayed from here.
            debug!(element, "skipping full-page plugin placeholder");
            return None;
        }

        Some((kind, source_attribute))
    }
}

/// `<embed name="plugin">` alone in `<body>` showing the document's own URL.
fn is_plugin_placeholder<D: Document + ?Sized>(doc: &D, embed: ElementId, source: &str) -> bool {
    let Some(body) = doc.body() else {
        return false;
    };

    doc.attribute(embed, "name").as_deref() == Some("plugin")
        && doc.parent(embed) == Some(body)
        && doc.child_element_count(body) == 1
        && doc
            .base_url()
            .join(source)
            .is_ok_and(|resolved| resolved == doc.url())
}
