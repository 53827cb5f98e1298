//! Companion annotation text: per-node descriptions and resource links.
//!
//! Annotation lines have the shape `name,(raw description)`. A raw description
//! is free text optionally followed by `youtube links:` and `website links:`
//! sections, each a comma-separated list of URL-like tokens.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const VIDEO_MARKER: &str = "youtube links:";
pub const WEB_MARKER: &str = "website links:";

/// Symbolic name to raw description, ordered by name.
pub type DescriptionMap = BTreeMap<String, String>;

/// Body text and links pulled out of one raw description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceBundle {
    pub body_text: String,
    pub video_links: Vec<String>,
    pub web_links: Vec<String>,
}

impl ResourceBundle {
    #[must_use]
    pub fn has_links(&self) -> bool {
        !self.video_links.is_empty() || !self.web_links.is_empty()
    }

    /// Copy with every link passed through [`normalize_link`].
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            body_text: self.body_text.clone(),
            video_links: self.video_links.iter().map(|l| normalize_link(l)).collect(),
            web_links: self.web_links.iter().map(|l| normalize_link(l)).collect(),
        }
    }
}

/// Build the name to description lookup from annotation text.
///
/// Lines that do not match `name,(description)` are skipped. When a name
/// repeats, the last line wins.
#[must_use]
pub fn parse_annotations(input: &str) -> DescriptionMap {
    let mut map = DescriptionMap::new();
    for (ordinal, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_annotation_line(line) {
            Some((name, description)) => {
                map.insert(name.to_owned(), description.to_owned());
            }
            None => tracing::debug!(line = ordinal, "skipping malformed annotation line"),
        }
    }
    tracing::debug!(entries = map.len(), "parsed annotations");
    map
}

fn parse_annotation_line(line: &str) -> Option<(&str, &str)> {
    let (name, rest) = line.split_once(",(")?;
    let description = rest.strip_suffix(')')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name, description.trim()))
}

/// Split a raw description into body text, video links and web links.
///
/// The markers may appear in either order. Body text is everything before the
/// first marker; each link section runs until the other marker or the end of
/// the string. Tokens are trimmed but otherwise returned as written.
#[must_use]
pub fn extract_resources(raw: &str) -> ResourceBundle {
    let video_at = raw.find(VIDEO_MARKER);
    let web_at = raw.find(WEB_MARKER);

    let body_end = video_at.into_iter().chain(web_at).min().unwrap_or(raw.len());

    ResourceBundle {
        body_text: clean_body(&raw[..body_end]),
        video_links: video_at.map_or_else(Vec::new, |at| link_section(raw, at + VIDEO_MARKER.len(), web_at)),
        web_links: web_at.map_or_else(Vec::new, |at| link_section(raw, at + WEB_MARKER.len(), video_at)),
    }
}

/// Like [`extract_resources`], treating a missing description as empty.
#[must_use]
pub fn extract_optional(raw: Option<&str>) -> ResourceBundle {
    raw.map(extract_resources).unwrap_or_default()
}

/// Prefix `https://` onto a link that has no http(s) scheme.
#[must_use]
pub fn normalize_link(token: &str) -> String {
    let lower = token.to_ascii_lowercase();
    if lower.starts_with("https://") || lower.starts_with("http://") {
        token.to_owned()
    } else {
        format!("https://{token}")
    }
}

fn clean_body(body: &str) -> String {
    body.trim_end_matches(|c: char| c == ',' || c.is_whitespace())
        .trim_start()
        .to_owned()
}

/// Tokens from `start` up to the other marker (if it comes later) or the end.
fn link_section(raw: &str, start: usize, other_marker: Option<usize>) -> Vec<String> {
    let end = other_marker.filter(|&at| at >= start).unwrap_or(raw.len());
    raw[start..end]
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
#[path = "resources_test.rs"]
mod tests;
