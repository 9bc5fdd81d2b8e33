use crate::embed::{Document, ElementId};
use crate::viewer::ViewerRoot;
use tracing::debug;

/// Type that makes hosts render `<embed>` content as a document.
pub const INLINE_DOCUMENT_TYPE: &str = "text/html";

/// Type no plugin claims, so `<object>` falls back to its children.
pub const UNRENDERABLE_TYPE: &str = "application/x-not-a-slax-type";

const FRAME_STYLE: &[(&str, &str)] = &[
    ("background", "none"),
    ("border", "none"),
    ("border-radius", "none"),
    ("box-shadow", "none"),
    ("float", "none"),
    ("display", "block"),
    ("height", "100%"),
    ("margin", "0"),
    ("max-height", "none"),
    ("max-width", "none"),
    ("position", "static"),
    ("transform", "none"),
    ("visibility", "visible"),
    ("width", "100%"),
];

/// Points an `<embed>` at the viewer.
///
/// Hosts only look at `src` when an `<embed>` is inserted, so the element is
/// detached, rewritten and put back in the same place.
pub(crate) fn update_embed<D: Document + ?Sized>(
    doc: &mut D,
    viewer: &ViewerRoot,
    embed: ElementId,
) {
    let src = doc.attribute(embed, "src").unwrap_or_default();

    if doc.attribute(embed, "type").as_deref() == Some(INLINE_DOCUMENT_TYPE)
        && viewer.is_viewer_url(&src)
    {
        return;
    }

    let viewer_url = match viewer.to_embedded_viewer_url(&doc.base_url(), &src) {
        Ok(url) => url,
        Err(err) => {
            debug!(error = %err, "embed source not resolvable; leaving element alone");
            return;
        }
    };

    let parent = doc.parent(embed);
    let next_sibling = doc.next_sibling(embed);
    if let Some(parent) = parent {
        doc.remove_child(parent, embed);
    }

    doc.set_attribute(embed, "type", INLINE_DOCUMENT_TYPE);
    doc.set_attribute(embed, "src", viewer_url.as_str());

    if let Some(parent) = parent {
        doc.insert_before(parent, embed, next_sibling);
    }
}

/// Shows the viewer inside an `<object>`.
///
/// Updating `data` does not reliably reload an `<object>`, and once it shows
/// fallback content it never leaves that state. So the viewer goes into a
/// frame inserted as fallback content, and the object is forced to render it.
pub(crate) fn update_object<D: Document + ?Sized>(
    doc: &mut D,
    viewer: &ViewerRoot,
    object: ElementId,
    frame: &mut Option<ElementId>,
) {
    let data = doc.attribute(object, "data").unwrap_or_default();

    let viewer_url = match viewer.to_embedded_viewer_url(&doc.base_url(), &data) {
        Ok(url) => url,
        Err(err) => {
            debug!(error = %err, "object data not resolvable; leaving element alone");
            return;
        }
    };

    let iframe = match *frame {
        Some(existing) if doc.first_element_child(object) == Some(existing) => existing,
        _ => {
            let created = create_full_size_frame(doc);
            doc.clear_children(object);
            doc.append_child(object, created);
            *frame = Some(created);
            created
        }
    };
    doc.set_attribute(iframe, "src", viewer_url.as_str());

    doc.set_attribute(object, "type", UNRENDERABLE_TYPE);
    // Same value again: makes the host re-evaluate and pick the fallback.
    doc.set_attribute(object, "data", &data);

    // Plugin content ignores padding and behaves like inline-block; fallback
    // content does neither unless told to.
    doc.set_style(object, "padding", "0");
    doc.set_style(object, "display", "inline-block");
}

fn create_full_size_frame<D: Document + ?Sized>(doc: &mut D) -> ElementId {
    let iframe = doc.create_element("iframe");
    for (property, value) in FRAME_STYLE {
        doc.set_style(iframe, property, value);
    }
    iframe
}
