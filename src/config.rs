//! Layout and render configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_NODE_WIDTH: f64 = 200.0;
pub const DEFAULT_NODE_HEIGHT: f64 = 40.0;
pub const DEFAULT_HORIZONTAL_FACTOR: f64 = 1.5;
pub const DEFAULT_VERTICAL_BUDGET: f64 = 600.0;
pub const DEFAULT_MIN_VERTICAL_SPACING: f64 = 40.0;
pub const DEFAULT_MAX_VERTICAL_SPACING: f64 = 80.0;
pub const DEFAULT_LEVEL_SPREAD: f64 = 0.5;
pub const DEFAULT_DEPTH_DECAY: f64 = 0.05;
pub const DEFAULT_MIN_DEPTH_SCALE: f64 = 0.7;
pub const DEFAULT_ROOT_GAP_FACTOR: f64 = 2.0;

/// Tunable constants for the tree layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Fixed width of every node box.
    pub node_width: f64,
    /// Fixed height of every node box.
    pub node_height: f64,
    /// Horizontal spacing is `node_width * horizontal_factor`.
    pub horizontal_factor: f64,
    /// Vertical spacing starts at `vertical_budget / node_count` before clamping.
    pub vertical_budget: f64,
    pub min_vertical_spacing: f64,
    pub max_vertical_spacing: f64,
    /// Extra horizontal spread applied to children of the deepest level.
    pub level_spread: f64,
    /// Per-level shrink of the cumulative horizontal scale.
    pub depth_decay: f64,
    /// Floor for the cumulative horizontal scale, keeping deep parent and
    /// child boxes from overlapping. Once reached, deeper levels stop
    /// shrinking, so very deep chains no longer follow pure per-level decay.
    pub min_depth_scale: f64,
    /// Gap between independent trees, in units of vertical spacing.
    pub root_gap_factor: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: DEFAULT_NODE_WIDTH,
            node_height: DEFAULT_NODE_HEIGHT,
            horizontal_factor: DEFAULT_HORIZONTAL_FACTOR,
            vertical_budget: DEFAULT_VERTICAL_BUDGET,
            min_vertical_spacing: DEFAULT_MIN_VERTICAL_SPACING,
            max_vertical_spacing: DEFAULT_MAX_VERTICAL_SPACING,
            level_spread: DEFAULT_LEVEL_SPREAD,
            depth_decay: DEFAULT_DEPTH_DECAY,
            min_depth_scale: DEFAULT_MIN_DEPTH_SCALE,
            root_gap_factor: DEFAULT_ROOT_GAP_FACTOR,
        }
    }
}

impl LayoutConfig {
    /// Check that every constant is usable by the layout engine.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("node_width", self.node_width),
            ("node_height", self.node_height),
            ("horizontal_factor", self.horizontal_factor),
            ("vertical_budget", self.vertical_budget),
            ("min_vertical_spacing", self.min_vertical_spacing),
            ("max_vertical_spacing", self.max_vertical_spacing),
            ("min_depth_scale", self.min_depth_scale),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        if self.min_vertical_spacing > self.max_vertical_spacing {
            return Err(ConfigError::InvertedRange { min: self.min_vertical_spacing, max: self.max_vertical_spacing });
        }
        for (field, value) in [("depth_decay", self.depth_decay), ("level_spread", self.level_spread)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::OutOfUnitRange { field, value });
            }
        }
        if self.depth_decay >= 1.0 {
            return Err(ConfigError::OutOfUnitRange { field: "depth_decay", value: self.depth_decay });
        }
        if !self.root_gap_factor.is_finite() || self.root_gap_factor < 0.0 {
            return Err(ConfigError::Negative { field: "root_gap_factor", value: self.root_gap_factor });
        }
        Ok(())
    }

    /// Horizontal distance between a parent and its children before scaling.
    #[must_use]
    pub fn horizontal_spacing(&self) -> f64 {
        self.node_width * self.horizontal_factor
    }

    /// Vertical gap between siblings for a forest of `node_count` nodes.
    #[must_use]
    pub fn vertical_spacing(&self, node_count: usize) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let raw = self.vertical_budget / node_count.max(1) as f64;
        // `f64::clamp` panics on an inverted range and configs are not validated here.
        raw.max(self.min_vertical_spacing).min(self.max_vertical_spacing)
    }
}

/// Cosmetic metadata attached to rendered nodes and edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderStyle {
    pub node_type: String,
    pub edge_type: String,
    pub stroke: String,
    pub stroke_width: f64,
    pub marker_type: String,
    pub marker_size: f64,
    pub curvature: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            node_type: "custom".into(),
            edge_type: "default".into(),
            stroke: "#64748b".into(),
            stroke_width: 2.0,
            marker_type: "arrowclosed".into(),
            marker_size: 20.0,
            curvature: 0.5,
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
