use crate::classify::{is_target_resource, mentions_slax_path};
use crate::test_support::{headers, url};

fn is_target(pairs: &[(&str, &str)], raw_url: &str) -> bool {
    let h = headers(pairs);
    is_target_resource(Some(&h), &url(raw_url))
}

#[test]
fn slax_mime_type_matches_regardless_of_case_and_parameters() {
    assert!(is_target(
        &[("content-type", "application/slax")],
        "https://example.com/app"
    ));
    assert!(is_target(
        &[("Content-Type", "Application/Slax; charset=x")],
        "https://example.com/app"
    ));
    assert!(is_target(
        &[("CONTENT-TYPE", "  application/SLAX  ;foo=bar")],
        "https://example.com/app"
    ));
}

#[test]
fn missing_headers_never_match() {
    // Arrange
    let u = url("https://example.com/app.slax");

    // Act / Assert
    assert!(!is_target_resource(None, &u));
    assert!(!is_target(&[], "https://example.com/app.slax"));
}

#[test]
fn other_mime_types_do_not_match() {
    assert!(!is_target(
        &[("content-type", "text/html")],
        "https://example.com/app.slax"
    ));
    assert!(!is_target(
        &[("content-type", "application/slaxish")],
        "https://example.com/app"
    ));
}

#[test]
fn octet_stream_matches_on_url_path_extension() {
    assert!(is_target(
        &[("content-type", "application/octet-stream")],
        "https://example.com/dir/App.SLAX?x=1#frag"
    ));
}

#[test]
fn octet_stream_ignores_extension_in_query_or_fragment() {
    assert!(!is_target(
        &[("content-type", "application/octet-stream")],
        "https://example.com/get?file=app.slax"
    ));
    assert!(!is_target(
        &[("content-type", "application/octet-stream")],
        "https://example.com/get#app.slax"
    ));
}

#[test]
fn octet_stream_matches_on_disposition_filename() {
    let ct = ("content-type", "application/octet-stream");

    assert!(is_target(
        &[ct, ("content-disposition", "attachment; filename=\"app.slax\"")],
        "https://example.com/download?id=7"
    ));
    assert!(is_target(
        &[ct, ("content-disposition", "inline; filename='App.Slax'")],
        "https://example.com/download?id=7"
    ));
    assert!(is_target(
        &[ct, ("content-disposition", "attachment; filename=app.slax")],
        "https://example.com/download?id=7"
    ));
}

#[test]
fn octet_stream_rejects_other_disposition_filenames() {
    let ct = ("content-type", "application/octet-stream");

    assert!(!is_target(
        &[ct, ("content-disposition", "attachment; filename=app.slax.zip")],
        "https://example.com/download?id=7"
    ));
    assert!(!is_target(&[ct], "https://example.com/download?id=7"));
}

#[test]
fn first_content_type_header_wins() {
    assert!(!is_target(
        &[
            ("content-type", "text/plain"),
            ("content-type", "application/slax"),
        ],
        "https://example.com/app"
    ));
}

#[test]
fn attribute_paths_accept_query_and_fragment_suffixes() {
    assert!(mentions_slax_path("a.slax"));
    assert!(mentions_slax_path("/docs/A.SLAX?v=2"));
    assert!(mentions_slax_path("a.slax#page=3"));
    assert!(!mentions_slax_path("a.slaxx"));
    assert!(!mentions_slax_path("a.pdf"));
    assert!(!mentions_slax_path(""));
}
