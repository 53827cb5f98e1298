//! Tests for annotation parsing and resource extraction.

use super::*;

// =============================================================================
// ANNOTATION LOOKUP
// =============================================================================

#[test]
fn annotations_map_names_to_descriptions() {
    let input = "a1,(Week one overview)\na11,(Refresher, youtube links: https://yt/1)";
    let map = parse_annotations(input);
    assert_eq!(map.len(), 2);
    assert_eq!(map["a1"], "Week one overview");
    assert_eq!(map["a11"], "Refresher, youtube links: https://yt/1");
}

#[test]
fn annotation_lines_with_wrong_shape_are_skipped() {
    let input = "no parens here\nmissing,(close\n,(no name)\nok,(fine)";
    let map = parse_annotations(input);
    assert_eq!(map.keys().collect::<Vec<_>>(), vec!["ok"]);
}

#[test]
fn annotation_last_occurrence_wins() {
    let map = parse_annotations("x,(first)\nx,(second)");
    assert_eq!(map["x"], "second");
}

#[test]
fn annotation_description_keeps_inner_parens() {
    let map = parse_annotations("fn,(Functions (and closures))");
    assert_eq!(map["fn"], "Functions (and closures)");
}

#[test]
fn annotation_name_and_description_are_trimmed() {
    let map = parse_annotations("  spaced ,(  padded text  )  ");
    assert_eq!(map["spaced"], "padded text");
}

#[test]
fn empty_annotations_yield_empty_map() {
    assert!(parse_annotations("").is_empty());
}

// =============================================================================
// LINK EXTRACTION
// =============================================================================

#[test]
fn extract_body_video_and_web_links() {
    let bundle = extract_resources("Learn X, youtube links: https://a, https://b, website links: https://c");
    assert_eq!(bundle.body_text, "Learn X");
    assert_eq!(bundle.video_links, vec!["https://a", "https://b"]);
    assert_eq!(bundle.web_links, vec!["https://c"]);
    assert!(bundle.has_links());
}

#[test]
fn extract_from_empty_input() {
    let bundle = extract_resources("");
    assert_eq!(bundle, ResourceBundle::default());
    assert!(!bundle.has_links());
}

#[test]
fn extract_from_missing_input() {
    assert_eq!(extract_optional(None), ResourceBundle::default());
    assert_eq!(extract_optional(Some("Just text")).body_text, "Just text");
}

#[test]
fn extract_body_only() {
    let bundle = extract_resources("  Closures and scope  ");
    assert_eq!(bundle.body_text, "Closures and scope");
    assert!(bundle.video_links.is_empty());
    assert!(bundle.web_links.is_empty());
}

#[test]
fn extract_web_links_only() {
    let bundle = extract_resources("Docs, website links: mdn.dev, https://javascript.info");
    assert_eq!(bundle.body_text, "Docs");
    assert!(bundle.video_links.is_empty());
    assert_eq!(bundle.web_links, vec!["mdn.dev", "https://javascript.info"]);
}

#[test]
fn extract_is_order_independent() {
    let bundle = extract_resources("Topic website links: https://w1, https://w2 youtube links: https://v1");
    assert_eq!(bundle.body_text, "Topic");
    assert_eq!(bundle.web_links, vec!["https://w1", "https://w2"]);
    assert_eq!(bundle.video_links, vec!["https://v1"]);
}

#[test]
fn extract_returns_raw_tokens_without_scheme() {
    let bundle = extract_resources("youtube links: youtu.be/abc");
    assert_eq!(bundle.body_text, "");
    assert_eq!(bundle.video_links, vec!["youtu.be/abc"]);
}

#[test]
fn extract_ignores_empty_tokens() {
    let bundle = extract_resources("T, youtube links: , https://a,, ");
    assert_eq!(bundle.video_links, vec!["https://a"]);
}

// =============================================================================
// NORMALIZATION
// =============================================================================

#[test]
fn normalize_adds_scheme_when_missing() {
    assert_eq!(normalize_link("example.com/x"), "https://example.com/x");
    assert_eq!(normalize_link("https://example.com"), "https://example.com");
    assert_eq!(normalize_link("http://example.com"), "http://example.com");
    assert_eq!(normalize_link("HTTPS://Example.com"), "HTTPS://Example.com");
}

#[test]
fn normalized_bundle_rewrites_both_lists() {
    let bundle = extract_resources("B, youtube links: yt.com/1, website links: site.org").normalized();
    assert_eq!(bundle.body_text, "B");
    assert_eq!(bundle.video_links, vec!["https://yt.com/1"]);
    assert_eq!(bundle.web_links, vec!["https://site.org"]);
}

#[test]
fn bundle_serializes_camel_case() {
    let json = serde_json::to_value(extract_resources("x, website links: a.b")).unwrap();
    assert_eq!(json["bodyText"], "x");
    assert_eq!(json["webLinks"][0], "a.b");
    assert!(json["videoLinks"].as_array().unwrap().is_empty());
}
