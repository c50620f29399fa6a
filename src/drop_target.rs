//! Turns a note dragged in from the notes panel into a timeline event.

use crate::color::Color;
use crate::event::TimelineEvent;
use crate::geometry::Point;
use crate::timeline::Timeline;
use crate::viewport::Viewport;
use anyhow::{anyhow, bail, Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Display fields of a note, as carried by a drag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropPayload {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(rename = "type")]
    pub note_type: String,
}

impl DropPayload {
    pub fn new(id: impl Into<String>, title: impl Into<String>, note_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            summary: String::new(),
            color: None,
            note_type: note_type.into(),
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Parse a raw JSON drag payload
    pub fn parse(raw: &str) -> Result<Self> {
        let payload: Self = serde_json::from_str(raw).context("Malformed drop payload")?;
        payload.validate()
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let payload: Self = serde_json::from_value(value).context("Malformed drop payload")?;
        payload.validate()
    }

    fn validate(self) -> Result<Self> {
        for (name, value) in [("id", &self.id), ("title", &self.title), ("type", &self.note_type)] {
            if value.trim().is_empty() {
                bail!("Drop payload field `{}` is empty", name);
            }
        }
        Ok(self)
    }
}

/// Column index under a canvas-surface point: `floor(world.x / column_width)`,
/// clamped to the existing columns
pub fn column_index_at(timeline: &Timeline, viewport: &Viewport, screen: Point) -> usize {
    let world = viewport.screen_to_world(screen);
    timeline.settings().column_index_for_x(world.x)
}

/// Create an event for `payload` at the drop point
pub fn drop_note(
    timeline: &mut Timeline,
    viewport: &Viewport,
    screen: Point,
    payload: &DropPayload,
) -> Result<Ulid> {
    let index = column_index_at(timeline, viewport, screen);
    let column_id = timeline
        .settings()
        .columns()
        .get(index)
        .map(|c| c.id)
        .ok_or_else(|| anyhow!("No column at index {}", index))?;

    let world = viewport.screen_to_world(screen);
    let event = TimelineEvent::new(payload.title.trim(), column_id, world.x, world.y)
        .with_description(payload.summary.clone())
        .with_color(payload.color.unwrap_or_default())
        .with_linked_note(payload.id.clone());

    let id = timeline.add_event(event)?;
    debug!(
        "note {} ({}) dropped into column {} as event {}",
        payload.id, payload.note_type, index, id
    );
    Ok(id)
}

/// Drop entry point for untrusted payloads. Anything malformed is ignored
/// and no event is created.
pub fn handle_drop(
    timeline: &mut Timeline,
    viewport: &Viewport,
    screen: Point,
    raw: serde_json::Value,
) -> Option<Ulid> {
    let payload = match DropPayload::from_value(raw) {
        Ok(payload) => payload,
        Err(err) => {
            warn!("ignoring drop: {:#}", err);
            return None;
        }
    };
    match drop_note(timeline, viewport, screen, &payload) {
        Ok(id) => Some(id),
        Err(err) => {
            warn!("ignoring drop of note {}: {:#}", payload.id, err);
            None
        }
    }
}
