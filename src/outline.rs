//! Outline parser: heading lines to a forest of nodes and parent edges.
//!
//! Each non-blank line looks like `## [name] Display text`. The run of leading
//! `#` markers gives the depth, the first bracketed substring gives the
//! symbolic name, and whatever remains is the label. A node's parent is the
//! most recently seen node one level shallower.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Character whose leading run encodes heading depth.
pub const HEADING_MARKER: char = '#';

/// Prefix for ids synthesized from a line's ordinal when it has no name.
pub const SYNTHETIC_ID_PREFIX: &str = "node-";

/// One heading line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineNode {
    /// Unique within one parse.
    pub id: String,
    /// Symbolic name as written (or synthesized). Differs from `id` only when
    /// the name was already taken by an earlier line.
    pub variable_name: String,
    pub display_text: String,
    /// Depth, 0 for a top-level heading.
    pub level: usize,
    /// Children in source order.
    pub child_ids: Vec<String>,
}

/// Parent to child link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: String,
    pub source_id: String,
    pub target_id: String,
}

impl Edge {
    #[must_use]
    pub fn new(source_id: &str, target_id: &str) -> Self {
        Self {
            id: edge_id(source_id, target_id),
            source_id: source_id.to_owned(),
            target_id: target_id.to_owned(),
        }
    }
}

/// What the parser absorbed instead of failing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseStats {
    /// Non-blank lines seen.
    pub lines: usize,
    /// Lines dropped for having no heading markers.
    pub skipped_lines: usize,
    /// Non-zero-level nodes that found no parent and became roots.
    pub orphan_roots: usize,
    /// Nodes whose name collided with an earlier one.
    pub renamed: usize,
}

/// Result of parsing outline text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outline {
    /// Nodes in source order.
    pub nodes: Vec<OutlineNode>,
    /// Edges in source order of their target.
    pub edges: Vec<Edge>,
    #[serde(skip)]
    pub stats: ParseStats,
}

impl Outline {
    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&OutlineNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Ids of nodes that are not the target of any edge, in source order.
    #[must_use]
    pub fn root_ids(&self) -> Vec<&str> {
        let targets: HashSet<&str> = self.edges.iter().map(|e| e.target_id.as_str()).collect();
        self.nodes
            .iter()
            .filter(|n| !targets.contains(n.id.as_str()))
            .map(|n| n.id.as_str())
            .collect()
    }

}

/// Parse outline text into nodes and edges.
///
/// Never fails: lines without heading markers are dropped and nodes without
/// an eligible parent become roots.
#[must_use]
pub fn parse_outline(input: &str) -> Outline {
    let mut outline = Outline::default();
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut seen_edge_ids: HashSet<String> = HashSet::new();
    // Index into `outline.nodes` of the latest node seen at each level.
    let mut last_at_level: Vec<Option<usize>> = Vec::new();

    let lines = input.lines().map(str::trim).filter(|l| !l.is_empty());

    for (ordinal, line) in lines.enumerate() {
        outline.stats.lines += 1;

        let Some(heading) = parse_heading(line) else {
            tracing::debug!(line = ordinal, "skipping outline line without heading markers");
            outline.stats.skipped_lines += 1;
            continue;
        };

        let variable_name = heading
            .name
            .map_or_else(|| format!("{SYNTHETIC_ID_PREFIX}{ordinal}"), ToOwned::to_owned);
        let id = unique_id(&variable_name, ordinal, &seen_ids);
        if id != variable_name {
            tracing::debug!(line = ordinal, name = %variable_name, %id, "renamed duplicate outline node");
            outline.stats.renamed += 1;
        }
        seen_ids.insert(id.clone());

        let level = heading.level;
        let index = outline.nodes.len();
        outline.nodes.push(OutlineNode {
            id: id.clone(),
            variable_name,
            display_text: heading.text,
            level,
            child_ids: Vec::new(),
        });

        if level > 0 {
            // Only the slot directly above is consulted; deeper slots may be
            // stale from an earlier branch and are overwritten when reached.
            match last_at_level.get(level - 1).copied().flatten() {
                Some(parent) => {
                    let parent_node = &mut outline.nodes[parent];
                    parent_node.child_ids.push(id.clone());
                    // Names may contain `-`, so distinct endpoint pairs can
                    // still join to the same edge id.
                    let mut edge = Edge::new(&parent_node.id, &id);
                    edge.id = unique_id(&edge.id, ordinal, &seen_edge_ids);
                    seen_edge_ids.insert(edge.id.clone());
                    outline.edges.push(edge);
                }
                None => {
                    tracing::debug!(line = ordinal, %id, level, "no parent at previous level, treating as root");
                    outline.stats.orphan_roots += 1;
                }
            }
        }

        if last_at_level.len() <= level {
            last_at_level.resize(level + 1, None);
        }
        last_at_level[level] = Some(index);
    }

    tracing::debug!(
        nodes = outline.nodes.len(),
        edges = outline.edges.len(),
        skipped = outline.stats.skipped_lines,
        "parsed outline"
    );
    outline
}

/// Depth for a heading with `count` leading markers. `None` for zero markers.
#[must_use]
pub fn level_for_markers(count: usize) -> Option<usize> {
    count.checked_sub(1)
}

/// Marker run that encodes `level`.
#[must_use]
pub fn heading_prefix(level: usize) -> String {
    std::iter::repeat_n(HEADING_MARKER, level + 1).collect()
}

/// Id of the edge from `source_id` to `target_id`.
///
/// `parse_outline` suffixes this on collision, as it does for node ids.
#[must_use]
pub fn edge_id(source_id: &str, target_id: &str) -> String {
    format!("edge-{source_id}-{target_id}")
}

struct Heading<'a> {
    level: usize,
    name: Option<&'a str>,
    text: String,
}

fn parse_heading(line: &str) -> Option<Heading<'_>> {
    let rest = line.trim_start_matches(HEADING_MARKER);
    let markers = line[..line.len() - rest.len()].chars().count();
    let level = level_for_markers(markers)?;

    let (name, text) = match bracket_span(rest) {
        Some((open, close)) => {
            let name = rest[open + 1..close].trim();
            let text = format!("{}{}", &rest[..open], rest[close + 1..].trim_start());
            ((!name.is_empty()).then_some(name), text)
        }
        None => (None, rest.to_owned()),
    };

    Some(Heading { level, name, text: text.trim().to_owned() })
}

/// Byte offsets of the first `[` and the first `]` after it.
fn bracket_span(s: &str) -> Option<(usize, usize)> {
    let open = s.find('[')?;
    let close = s[open + 1..].find(']')? + open + 1;
    Some((open, close))
}

fn unique_id(name: &str, ordinal: usize, seen: &HashSet<String>) -> String {
    if !seen.contains(name) {
        return name.to_owned();
    }
    let mut suffix = ordinal;
    loop {
        let candidate = format!("{name}-{suffix}");
        if !seen.contains(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

#[cfg(test)]
#[path = "outline_test.rs"]
mod tests;
