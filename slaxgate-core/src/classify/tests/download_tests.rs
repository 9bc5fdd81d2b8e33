use crate::classify::{is_attachment, is_forced_download};
use crate::ctx::FrameKind;
use crate::test_support::{headers, url};

#[test]
fn viewer_download_marker_always_forces_download() {
    // Arrange
    let u = url("https://example.com/app.slax?slax.action=download");

    // Act / Assert
    assert!(is_forced_download(&u, FrameKind::TopLevel, None));
    assert!(is_forced_download(&u, FrameKind::Nested, None));
}

#[test]
fn top_level_without_generic_marker_ignores_disposition() {
    // Arrange
    let u = url("https://example.com/app.slax");
    let h = headers(&[("content-disposition", "attachment; filename=app.slax")]);

    // Act
    let forced = is_forced_download(&u, FrameKind::TopLevel, Some(&h));

    // Assert
    assert!(!forced);
}

#[test]
fn top_level_with_generic_marker_honors_attachment() {
    // Arrange
    let u = url("https://drive.example.com/uc?id=1&export=download");
    let attachment = headers(&[("content-disposition", "Attachment; filename=app.slax")]);
    let inline = headers(&[("content-disposition", "inline; filename=app.slax")]);

    // Act / Assert
    assert!(is_forced_download(&u, FrameKind::TopLevel, Some(&attachment)));
    assert!(!is_forced_download(&u, FrameKind::TopLevel, Some(&inline)));
    assert!(!is_forced_download(&u, FrameKind::TopLevel, None));
}

#[test]
fn nested_frames_follow_disposition() {
    // Arrange
    let u = url("https://example.com/app.slax");
    let attachment = headers(&[("content-disposition", "attachment")]);
    let inline = headers(&[("content-disposition", "inline")]);

    // Act / Assert
    assert!(is_forced_download(&u, FrameKind::Nested, Some(&attachment)));
    assert!(!is_forced_download(&u, FrameKind::Nested, Some(&inline)));
}

#[test]
fn nested_frames_without_disposition_are_not_forced() {
    for raw in [
        "https://example.com/app.slax",
        "https://example.com/app.slax?export=download",
        "https://example.com/app.slax?x=1",
    ] {
        let h = headers(&[("content-type", "application/slax")]);
        assert!(
            !is_forced_download(&url(raw), FrameKind::Nested, Some(&h)),
            "{raw}"
        );
        assert!(!is_forced_download(&url(raw), FrameKind::Nested, None), "{raw}");
    }
}

#[test]
fn attachment_token_is_case_insensitive_prefix() {
    assert!(is_attachment(b"attachment"));
    assert!(is_attachment(b"ATTACHMENT; filename=x"));
    assert!(!is_attachment(b"inline; filename=attachment"));
    assert!(!is_attachment(b"attach"));
}
