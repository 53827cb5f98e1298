//! Learning-path outline to positioned node-link diagram.
//!
//! Turns heading-marker outline text (`## [name] Label`) plus a companion
//! annotation blob into a render payload: uniquely identified nodes with
//! completion state, raw descriptions and deterministic 2D positions, plus the
//! parent to child edges between them. Everything here is a pure function of
//! its inputs; no I/O, no shared state.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`outline`] | Heading lines to nodes and parent edges |
//! | [`resources`] | Annotation lookup and per-description link extraction |
//! | [`layout`] | Subtree sizing and position assignment |
//! | [`assemble`] | Merge layout, completion state and descriptions |
//! | [`config`] | Layout constants and render styling |
//! | [`error`] | The one error that crosses the pipeline boundary |

use std::collections::HashSet;

pub mod assemble;
pub mod config;
pub mod error;
pub mod layout;
pub mod outline;
pub mod resources;

pub use assemble::{FlowPayload, RenderEdge, RenderNode, assemble};
pub use config::{LayoutConfig, RenderStyle};
pub use error::{ConfigError, InputKind, ParseError, decode_text};
pub use layout::{Layout, LayoutStats, Position, PositionedNode, layout, layout_outline};
pub use outline::{Edge, Outline, OutlineNode, ParseStats, parse_outline};
pub use resources::{DescriptionMap, ResourceBundle, extract_resources, normalize_link, parse_annotations};

/// Knobs for [`build_flow_with`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowOptions {
    pub layout: LayoutConfig,
    pub style: RenderStyle,
}

/// Run the whole pipeline with default layout and styling.
///
/// # Errors
///
/// Returns [`ParseError::MissingInput`] when `outline` is `None`.
pub fn build_flow(
    outline: Option<&str>,
    annotations: Option<&str>,
    completed: &HashSet<String>,
) -> Result<FlowPayload, ParseError> {
    build_flow_with(outline, annotations, completed, &FlowOptions::default())
}

/// Run the whole pipeline: parse, lay out, assemble.
///
/// A missing annotation blob is treated as empty. Malformed lines, missing
/// parents and dangling edges degrade into a smaller but consistent payload.
///
/// # Errors
///
/// Returns [`ParseError::MissingInput`] when `outline` is `None`.
pub fn build_flow_with(
    outline: Option<&str>,
    annotations: Option<&str>,
    completed: &HashSet<String>,
    options: &FlowOptions,
) -> Result<FlowPayload, ParseError> {
    let outline = outline.ok_or(ParseError::MissingInput { input: InputKind::Outline })?;

    let parsed = parse_outline(outline);
    let descriptions = annotations.map(parse_annotations).unwrap_or_default();
    let positioned = layout_outline(&parsed, &options.layout);

    Ok(assemble(&positioned, &parsed.edges, completed, &descriptions, &options.style))
}

/// Like [`build_flow_with`], for inputs that arrive as raw bytes.
///
/// # Errors
///
/// Returns [`ParseError::MissingInput`] when `outline` is `None` and
/// [`ParseError::NotText`] when either input is not valid UTF-8.
pub fn build_flow_from_bytes(
    outline: Option<&[u8]>,
    annotations: Option<&[u8]>,
    completed: &HashSet<String>,
    options: &FlowOptions,
) -> Result<FlowPayload, ParseError> {
    let outline = outline
        .map(|bytes| decode_text(InputKind::Outline, bytes))
        .transpose()?;
    let annotations = annotations
        .map(|bytes| decode_text(InputKind::Annotations, bytes))
        .transpose()?;
    build_flow_with(outline, annotations, completed, options)
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
