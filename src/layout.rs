//! Tree layout engine: positions every node of a parsed forest.
//!
//! Two passes per root. The first walks the tree bottom-up and records how
//! much vertical room each subtree needs; the second walks top-down, centering
//! each parent on the stack of its children and pushing children to the right.
//! Spacing adapts to the size and depth of the whole forest so small and large
//! roadmaps both stay legible.
//!
//! Nodes refer to each other by index into a flat slot table. Both passes use
//! an explicit work stack, so deep chains cannot overflow the call stack.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::outline::{Edge, Outline, OutlineNode};

/// A point in layout coordinates. `y` grows downward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// An outline node with its footprint and assigned position.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedNode {
    #[serde(flatten)]
    pub node: OutlineNode,
    pub width: f64,
    pub height: f64,
    /// Vertical extent of this node and all its descendants.
    pub subtree_height: f64,
    pub position: Position,
}

/// Parameters chosen for one layout call and what was dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutStats {
    pub node_count: usize,
    pub root_count: usize,
    pub max_level: usize,
    pub horizontal_spacing: f64,
    pub vertical_spacing: f64,
    /// Edges ignored because an endpoint was missing or the target already had a parent.
    pub dropped_edges: usize,
    /// Total vertical extent of all stacked trees.
    pub height: f64,
}

/// Output of [`layout`]: nodes in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    pub nodes: Vec<PositionedNode>,
    pub stats: LayoutStats,
}

impl Layout {
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&PositionedNode> {
        self.nodes.iter().find(|n| n.node.id == id)
    }

    #[must_use]
    pub fn position(&self, id: &str) -> Option<Position> {
        self.node(id).map(|n| n.position)
    }
}

/// Lay out a parsed outline.
#[must_use]
pub fn layout_outline(outline: &Outline, config: &LayoutConfig) -> Layout {
    layout(&outline.nodes, &outline.edges, config)
}

/// Position every node of the forest described by `nodes` and `edges`.
///
/// Trees are laid out left to right from `x = 0` and stacked top to bottom in
/// the order their roots appear. Edges naming an unknown node are ignored, as
/// is any edge into a node that already has a parent.
#[must_use]
pub fn layout(nodes: &[OutlineNode], edges: &[Edge], config: &LayoutConfig) -> Layout {
    let mut stats = LayoutStats {
        node_count: nodes.len(),
        max_level: nodes.iter().map(|n| n.level).max().unwrap_or(0),
        horizontal_spacing: config.horizontal_spacing(),
        vertical_spacing: config.vertical_spacing(nodes.len()),
        ..LayoutStats::default()
    };

    let mut slots: Vec<Slot> = nodes
        .iter()
        .map(|n| Slot::new(n.level, config.node_width, config.node_height))
        .collect();
    stats.dropped_edges = link_children(nodes, edges, &mut slots);

    let roots: Vec<usize> = (0..slots.len()).filter(|&i| slots[i].parent.is_none()).collect();
    stats.root_count = roots.len();

    let engine = Engine { config, stats };
    let root_gap = engine.stats.vertical_spacing * config.root_gap_factor;
    let mut cursor_y = 0.0;
    for (i, &root) in roots.iter().enumerate() {
        if i > 0 {
            cursor_y += root_gap;
        }
        engine.size_subtree(&mut slots, root);
        let extent = slots[root].subtree_height;
        engine.place_subtree(&mut slots, root, Position { x: 0.0, y: cursor_y + extent / 2.0 });
        cursor_y += extent;
    }

    let mut stats = engine.stats;
    stats.height = cursor_y;
    tracing::debug!(
        nodes = stats.node_count,
        roots = stats.root_count,
        max_level = stats.max_level,
        vertical_spacing = stats.vertical_spacing,
        dropped_edges = stats.dropped_edges,
        "laid out forest"
    );

    let nodes = nodes
        .iter()
        .zip(slots)
        .map(|(node, slot)| PositionedNode {
            node: node.clone(),
            width: slot.width,
            height: slot.height,
            subtree_height: slot.subtree_height,
            position: slot.position.unwrap_or_default(),
        })
        .collect();

    Layout { nodes, stats }
}

#[derive(Debug, Clone)]
struct Slot {
    level: usize,
    width: f64,
    height: f64,
    parent: Option<usize>,
    children: Vec<usize>,
    subtree_height: f64,
    position: Option<Position>,
}

impl Slot {
    fn new(level: usize, width: f64, height: f64) -> Self {
        Self { level, width, height, parent: None, children: Vec::new(), subtree_height: height, position: None }
    }
}

/// Resolve edges to slot indices. Returns how many edges were dropped.
fn link_children(nodes: &[OutlineNode], edges: &[Edge], slots: &mut [Slot]) -> usize {
    let index: HashMap<&str, usize> = nodes.iter().enumerate().map(|(i, n)| (n.id.as_str(), i)).collect();
    let mut dropped = 0;

    for edge in edges {
        let (Some(&source), Some(&target)) = (index.get(edge.source_id.as_str()), index.get(edge.target_id.as_str()))
        else {
            tracing::debug!(edge = %edge.id, "dropping edge with unknown endpoint");
            dropped += 1;
            continue;
        };
        if source == target || slots[target].parent.is_some() {
            tracing::debug!(edge = %edge.id, "dropping edge into node that already has a parent");
            dropped += 1;
            continue;
        }
        slots[target].parent = Some(source);
        slots[source].children.push(target);
    }

    dropped
}

struct Engine<'a> {
    config: &'a LayoutConfig,
    stats: LayoutStats,
}

impl Engine<'_> {
    /// Height of the stacked child subtrees including gaps between them.
    fn children_span(&self, slots: &[Slot], children: &[usize]) -> f64 {
        if children.is_empty() {
            return 0.0;
        }
        let sum: f64 = children.iter().map(|&c| slots[c].subtree_height).sum();
        #[allow(clippy::cast_precision_loss)]
        let gaps = (children.len() - 1) as f64 * self.stats.vertical_spacing;
        sum + gaps
    }

    /// Post-order pass: fill `subtree_height` for `root` and its descendants.
    fn size_subtree(&self, slots: &mut [Slot], root: usize) {
        let mut stack = vec![(root, false)];
        while let Some((idx, children_done)) = stack.pop() {
            if children_done {
                let span = self.children_span(slots, &slots[idx].children);
                let own = slots[idx].height;
                slots[idx].subtree_height = span.max(own);
            } else {
                stack.push((idx, true));
                stack.extend(slots[idx].children.iter().rev().map(|&c| (c, false)));
            }
        }
    }

    /// Pre-order pass: place `root` at `origin` and its descendants relative to it.
    fn place_subtree(&self, slots: &mut [Slot], root: usize, origin: Position) {
        let mut stack = vec![(root, origin, 1.0_f64)];
        while let Some((idx, at, scale)) = stack.pop() {
            slots[idx].position = Some(at);

            let children = &slots[idx].children;
            if children.is_empty() {
                continue;
            }

            let level = slots[idx].level;
            let next_x = at.x + self.stats.horizontal_spacing * scale * self.level_factor(level);
            let child_scale = (scale * self.depth_shrink(level)).max(self.config.min_depth_scale);

            let mut cursor = at.y - self.children_span(slots, children) / 2.0;
            let mut placements = Vec::with_capacity(children.len());
            for &child in children {
                let extent = slots[child].subtree_height;
                placements.push((child, Position { x: next_x, y: cursor + extent / 2.0 }, child_scale));
                cursor += extent + self.stats.vertical_spacing;
            }
            stack.extend(placements.into_iter().rev());
        }
    }

    /// Grows linearly with the parent's depth relative to the deepest level.
    fn level_factor(&self, parent_level: usize) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let ratio = parent_level as f64 / (self.stats.max_level as f64 + 1.0);
        1.0 + ratio * self.config.level_spread
    }

    /// Per-level multiplier applied to the cumulative horizontal scale.
    fn depth_shrink(&self, parent_level: usize) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let shrink = 1.0 - self.config.depth_decay * parent_level as f64;
        shrink.max(0.0)
    }
}

#[cfg(test)]
#[path = "layout_test.rs"]
mod tests;
