//! Tests for render payload assembly.

use std::collections::HashSet;

use super::*;
use crate::config::LayoutConfig;
use crate::layout::layout_outline;
use crate::outline::parse_outline;
use crate::resources::parse_annotations;

const OUTLINE: &str = "# [root] JavaScript\n## [a1] Week 1\n### [a11] Refresher\n## [a2]";
const ANNOTATIONS: &str = "a1,(First week, website links: javascript.info)\na11,(Basics, youtube links: https://yt/1)";

fn build(completed: &[&str]) -> FlowPayload {
    let outline = parse_outline(OUTLINE);
    let layout = layout_outline(&outline, &LayoutConfig::default());
    let completed: HashSet<String> = completed.iter().map(|s| (*s).to_owned()).collect();
    assemble(&layout, &outline.edges, &completed, &parse_annotations(ANNOTATIONS), &RenderStyle::default())
}

#[test]
fn nodes_and_edges_are_carried_over_in_order() {
    let payload = build(&[]);
    let ids: Vec<&str> = payload.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["root", "a1", "a11", "a2"]);
    let edges: Vec<(&str, &str)> = payload.edges.iter().map(|e| (e.source.as_str(), e.target.as_str())).collect();
    assert_eq!(edges, vec![("root", "a1"), ("a1", "a11"), ("root", "a2")]);
}

#[test]
fn completed_flag_comes_from_caller_set() {
    let payload = build(&["a11", "unknown"]);
    assert!(payload.node("a11").unwrap().completed);
    assert!(!payload.node("root").unwrap().completed);
    assert!(!payload.node("a1").unwrap().completed);
    assert_eq!(payload.completed_count(), 1);
}

#[test]
fn descriptions_are_raw_and_default_to_empty() {
    let payload = build(&[]);
    assert_eq!(payload.node("a1").unwrap().description, "First week, website links: javascript.info");
    assert_eq!(payload.node("root").unwrap().description, "");
}

#[test]
fn resources_are_extracted_on_demand() {
    let payload = build(&[]);
    let bundle = payload.node("a11").unwrap().resources();
    assert_eq!(bundle.body_text, "Basics");
    assert_eq!(bundle.video_links, vec!["https://yt/1"]);
    assert!(payload.node("root").unwrap().resources().body_text.is_empty());
}

#[test]
fn empty_label_falls_back_to_untitled() {
    let payload = build(&[]);
    assert_eq!(payload.node("a2").unwrap().label, UNTITLED_LABEL);
    assert_eq!(payload.node("a1").unwrap().label, "Week 1");
}

#[test]
fn positions_match_layout() {
    let outline = parse_outline(OUTLINE);
    let layout = layout_outline(&outline, &LayoutConfig::default());
    let payload = build(&[]);
    for node in &payload.nodes {
        assert_eq!(Some(node.position), layout.position(&node.id));
    }
}

#[test]
fn duplicate_names_share_a_description() {
    let outline = parse_outline("# [x] One\n# [x] Two");
    let layout = layout_outline(&outline, &LayoutConfig::default());
    let payload = assemble(
        &layout,
        &outline.edges,
        &HashSet::new(),
        &parse_annotations("x,(Shared)"),
        &RenderStyle::default(),
    );
    assert_eq!(payload.nodes[1].id, "x-1");
    assert_eq!(payload.nodes[1].variable_name, "x");
    assert_eq!(payload.nodes[1].description, "Shared");
}

#[test]
fn edges_to_unknown_nodes_are_left_out() {
    let outline = parse_outline("# [r] R\n## [a] A");
    let layout = layout_outline(&outline, &LayoutConfig::default());
    let mut edges = outline.edges.clone();
    edges.push(crate::outline::Edge::new("r", "ghost"));
    let payload = assemble(&layout, &edges, &HashSet::new(), &DescriptionMap::new(), &RenderStyle::default());
    assert_eq!(payload.edges.len(), 1);
}

#[test]
fn edges_carry_static_render_metadata() {
    let payload = build(&[]);
    let edge = &payload.edges[0];
    assert_eq!(edge.id, "edge-root-a1");
    assert!(!edge.animated);
    assert_eq!(edge.style.stroke, "#64748b");
    assert_eq!(edge.marker_end.marker_type, "arrowclosed");
    assert_eq!(edge.marker_end.color, edge.style.stroke);
}

#[test]
fn progress_is_percentage_of_completed_nodes() {
    assert!((build(&["root"]).progress() - 25.0).abs() < 1e-9);
    assert!((build(&["root", "a1", "a11", "a2"]).progress() - 100.0).abs() < 1e-9);
    assert!(FlowPayload::default().progress().abs() < f64::EPSILON);
}

#[test]
fn payload_json_shape() {
    let payload = build(&["a1"]);
    let json: serde_json::Value = serde_json::from_str(&payload.to_json(false).unwrap()).unwrap();
    let node = &json["nodes"][1];
    assert_eq!(node["id"], "a1");
    assert_eq!(node["type"], "custom");
    assert_eq!(node["variableName"], "a1");
    assert_eq!(node["completed"], true);
    assert!(node["position"]["x"].is_number());
    let edge = &json["edges"][0];
    assert_eq!(edge["source"], "root");
    assert_eq!(edge["markerEnd"]["type"], "arrowclosed");
    assert_eq!(edge["style"]["strokeWidth"], 2.0);
    assert_eq!(edge["animated"], false);
}

#[test]
fn pretty_json_is_multiline() {
    let payload = build(&[]);
    assert!(payload.to_json(true).unwrap().contains('\n'));
    assert!(!payload.to_json(false).unwrap().contains('\n'));
}
