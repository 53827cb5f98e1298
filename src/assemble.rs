//! Graph assembler: merges layout, completion state and descriptions into the
//! payload a node-link renderer consumes.

use std::collections::HashSet;

use serde::Serialize;

use crate::config::RenderStyle;
use crate::layout::{Layout, Position};
use crate::outline::Edge;
use crate::resources::{DescriptionMap, ResourceBundle, extract_resources};

/// Label shown for a node whose heading had no text.
pub const UNTITLED_LABEL: &str = "Untitled Node";

/// A node as handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub label: String,
    pub completed: bool,
    pub level: usize,
    pub variable_name: String,
    /// Raw description; see [`RenderNode::resources`].
    pub description: String,
    pub position: Position,
}

impl RenderNode {
    /// Parse this node's description into body text and links.
    #[must_use]
    pub fn resources(&self) -> ResourceBundle {
        extract_resources(&self.description)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeStyle {
    pub stroke: String,
    pub stroke_width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeMarker {
    #[serde(rename = "type")]
    pub marker_type: String,
    pub color: String,
    pub width: f64,
    pub height: f64,
}

/// An edge as handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub edge_type: String,
    pub animated: bool,
    pub style: EdgeStyle,
    pub marker_end: EdgeMarker,
    pub curvature: f64,
}

impl RenderEdge {
    fn from_edge(edge: &Edge, style: &RenderStyle) -> Self {
        Self {
            id: edge.id.clone(),
            source: edge.source_id.clone(),
            target: edge.target_id.clone(),
            edge_type: style.edge_type.clone(),
            animated: false,
            style: EdgeStyle { stroke: style.stroke.clone(), stroke_width: style.stroke_width },
            marker_end: EdgeMarker {
                marker_type: style.marker_type.clone(),
                color: style.stroke.clone(),
                width: style.marker_size,
                height: style.marker_size,
            },
            curvature: style.curvature,
        }
    }
}

/// Everything the renderer needs for one roadmap.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlowPayload {
    pub nodes: Vec<RenderNode>,
    pub edges: Vec<RenderEdge>,
}

impl FlowPayload {
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&RenderNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.completed).count()
    }

    /// Percentage of nodes marked complete, 0 for an empty roadmap.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.nodes.is_empty() {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let ratio = self.completed_count() as f64 / self.nodes.len() as f64;
        ratio * 100.0
    }

    /// Serialize the payload as JSON.
    ///
    /// # Errors
    ///
    /// Returns the serializer error, which cannot occur for these types in practice.
    pub fn to_json(&self, pretty: bool) -> Result<String, serde_json::Error> {
        if pretty { serde_json::to_string_pretty(self) } else { serde_json::to_string(self) }
    }
}

/// Build the render payload.
///
/// `completed` holds node ids the caller already knows to be done. Node
/// descriptions are looked up by symbolic name and passed through raw. Edges
/// whose endpoints are not in the layout are left out.
#[must_use]
pub fn assemble(
    layout: &Layout,
    edges: &[Edge],
    completed: &HashSet<String>,
    descriptions: &DescriptionMap,
    style: &RenderStyle,
) -> FlowPayload {
    let nodes: Vec<RenderNode> = layout
        .nodes
        .iter()
        .map(|positioned| {
            let node = &positioned.node;
            let label = if node.display_text.is_empty() { UNTITLED_LABEL } else { &node.display_text };
            RenderNode {
                id: node.id.clone(),
                node_type: style.node_type.clone(),
                label: label.to_owned(),
                completed: completed.contains(&node.id),
                level: node.level,
                variable_name: node.variable_name.clone(),
                description: descriptions.get(&node.variable_name).cloned().unwrap_or_default(),
                position: positioned.position,
            }
        })
        .collect();

    let edges = {
        let known: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        edges
            .iter()
            .filter(|e| known.contains(e.source_id.as_str()) && known.contains(e.target_id.as_str()))
            .map(|e| RenderEdge::from_edge(e, style))
            .collect()
    };

    FlowPayload { nodes, edges }
}

#[cfg(test)]
#[path = "assemble_test.rs"]
mod tests;
