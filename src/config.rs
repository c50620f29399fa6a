use crate::geometry::{Size, Vec2, BEZIER_MIN_OFFSET};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

/// Events whose `x` is within this distance of a shrunk boundary are flagged
pub const OUT_OF_BOUNDS_MARGIN: f32 = 100.0;

/// Pointer travel (screen px) before a press becomes a drag
pub const DRAG_THRESHOLD: f32 = 5.0;

/// Fixed world height of the timeline surface
pub const VERTICAL_EXTENT: f32 = 2000.0;

pub const EVENT_WIDTH: f32 = 180.0;
pub const EVENT_HEIGHT: f32 = 72.0;

/// Height of the column header strip above the world origin
pub const HEADER_HEIGHT: f32 = 48.0;

pub const MINIMAP_WIDTH: f32 = 220.0;
pub const MINIMAP_HEIGHT: f32 = 110.0;
pub const MINIMAP_INSET: f32 = 12.0;

/// Minimap scale at or above which event dots get a title label
pub const MINIMAP_LABEL_SCALE: f32 = 0.2;

pub const SCROLLBAR_THICKNESS: f32 = 10.0;
pub const SCROLLBAR_MIN_THUMB: f32 = 24.0;

pub const EDGE_HIT_TOLERANCE: f32 = 6.0;

pub const PAN_DEBOUNCE_MS: u64 = 150;

/// Tunables for the canvas engine. Every field falls back to the constant
/// of the same name when missing from a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub out_of_bounds_margin: f32,
    pub bezier_min_offset: f32,
    pub drag_threshold: f32,
    pub vertical_extent: f32,
    pub event_width: f32,
    pub event_height: f32,
    pub header_height: f32,
    pub minimap_width: f32,
    pub minimap_height: f32,
    pub minimap_inset: f32,
    pub minimap_label_scale: f32,
    pub scrollbar_thickness: f32,
    pub scrollbar_min_thumb: f32,
    pub edge_hit_tolerance: f32,
    pub pan_debounce_ms: u64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            out_of_bounds_margin: OUT_OF_BOUNDS_MARGIN,
            bezier_min_offset: BEZIER_MIN_OFFSET,
            drag_threshold: DRAG_THRESHOLD,
            vertical_extent: VERTICAL_EXTENT,
            event_width: EVENT_WIDTH,
            event_height: EVENT_HEIGHT,
            header_height: HEADER_HEIGHT,
            minimap_width: MINIMAP_WIDTH,
            minimap_height: MINIMAP_HEIGHT,
            minimap_inset: MINIMAP_INSET,
            minimap_label_scale: MINIMAP_LABEL_SCALE,
            scrollbar_thickness: SCROLLBAR_THICKNESS,
            scrollbar_min_thumb: SCROLLBAR_MIN_THUMB,
            edge_hit_tolerance: EDGE_HIT_TOLERANCE,
            pan_debounce_ms: PAN_DEBOUNCE_MS,
        }
    }
}

impl CanvasConfig {
    /// Load config from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let reader = BufReader::new(file);
        let config: Self = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config from: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the geometry degenerate
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("vertical_extent", self.vertical_extent),
            ("event_width", self.event_width),
            ("event_height", self.event_height),
            ("minimap_width", self.minimap_width),
            ("minimap_height", self.minimap_height),
            ("scrollbar_thickness", self.scrollbar_thickness),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                bail!("{} must be a positive number, got {}", name, value);
            }
        }

        let non_negative = [
            ("out_of_bounds_margin", self.out_of_bounds_margin),
            ("bezier_min_offset", self.bezier_min_offset),
            ("drag_threshold", self.drag_threshold),
            ("header_height", self.header_height),
            ("minimap_inset", self.minimap_inset),
            ("minimap_label_scale", self.minimap_label_scale),
            ("scrollbar_min_thumb", self.scrollbar_min_thumb),
            ("edge_hit_tolerance", self.edge_hit_tolerance),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                bail!("{} must be zero or positive, got {}", name, value);
            }
        }

        Ok(())
    }

    pub fn event_size(&self) -> Size {
        Size::new(self.event_width, self.event_height)
    }

    pub fn minimap_size(&self) -> Size {
        Size::new(self.minimap_width, self.minimap_height)
    }

    /// Screen offset of the world origin inside the canvas surface
    pub fn canvas_origin(&self) -> Vec2 {
        Vec2::new(0.0, self.header_height)
    }

    pub fn pan_debounce(&self) -> Duration {
        Duration::from_millis(self.pan_debounce_ms)
    }
}
