use url::Url;

/// Arena handle of a DOM element, stable for the element's lifetime.
///
/// Ids must never be reused for another element. Hosts report removed
/// elements through `Reconciler::forget`; until then an id stays claimed, and
/// a new element under a reused id would be taken for one already seen.
pub type ElementId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Embed,
    Object,
    Other,
}

/// Cancellable attribute subscription returned by `Document::observe_attribute`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverHandle(pub u64);

/// The slice of the DOM the reconciler needs.
///
/// Attribute writes on observed attributes are reported back through
/// `Reconciler::on_attribute_mutated` after the current call returns, the way
/// mutation observers deliver records.
///
/// Element removal is the host's to report: call `Reconciler::forget` for
/// every `<object>`/`<embed>` that leaves the document.
pub trait Document {
    /// URL of the document itself (`location.href`).
    fn url(&self) -> Url;

    /// Base URL used to resolve relative attribute values.
    fn base_url(&self) -> Url;

    fn body(&self) -> Option<ElementId>;

    fn kind(&self, element: ElementId) -> ElementKind;

    fn attribute(&self, element: ElementId, name: &str) -> Option<String>;

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str);

    fn set_style(&mut self, element: ElementId, property: &str, value: &str);

    fn parent(&self, element: ElementId) -> Option<ElementId>;

    fn next_sibling(&self, element: ElementId) -> Option<ElementId>;

    fn first_element_child(&self, element: ElementId) -> Option<ElementId>;

    fn child_element_count(&self, element: ElementId) -> usize;

    fn create_element(&mut self, tag: &str) -> ElementId;

    fn remove_child(&mut self, parent: ElementId, child: ElementId);

    /// Inserts `child` before `reference`, or at the end when `None`.
    fn insert_before(&mut self, parent: ElementId, child: ElementId, reference: Option<ElementId>);

    fn append_child(&mut self, parent: ElementId, child: ElementId);

    /// Removes every child node, text included.
    fn clear_children(&mut self, element: ElementId);

    /// Watches one attribute of `element` for changes.
    fn observe_attribute(&mut self, element: ElementId, name: &str) -> ObserverHandle;

    fn disconnect(&mut self, observer: ObserverHandle);
}
