use crate::color::Color;
use crate::geometry::{Point, Rectangle, Size};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// A plot point placed on the timeline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimelineEvent {
    /// Unique identifier (sortable, timestamp-based)
    pub id: Ulid,

    pub title: String,

    pub description: String,

    /// Informational; true column membership is derived from `x`
    pub column_id: Ulid,

    /// World-space position of the card's top-left corner (pixels)
    pub x: f32,
    pub y: f32,

    pub color: Color,

    /// Notes this event was created from or linked to
    pub linked_note_ids: Vec<String>,
}

impl TimelineEvent {
    /// Create a new event with the given parameters
    pub fn new(title: impl Into<String>, column_id: Ulid, x: f32, y: f32) -> Self {
        Self {
            id: Ulid::new(),
            title: title.into(),
            description: String::new(),
            column_id,
            x,
            y,
            color: Color::default(),
            linked_note_ids: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_linked_note(mut self, note_id: impl Into<String>) -> Self {
        self.linked_note_ids.push(note_id.into());
        self
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// World-space card rectangle
    pub fn bounds(&self, card: Size) -> Rectangle {
        Rectangle::from_origin_size(self.position(), card)
    }

    /// Outgoing edge anchor: middle of the card's right edge
    pub fn source_anchor(&self, card: Size) -> Point {
        Point::new(self.x + card.width, self.y + card.height * 0.5)
    }

    /// Incoming edge anchor: middle of the card's left edge
    pub fn target_anchor(&self, card: Size) -> Point {
        Point::new(self.x, self.y + card.height * 0.5)
    }

    /// Apply an edit-surface patch
    pub fn apply_edit(&mut self, edit: EventEdit) {
        if let Some(title) = edit.title {
            self.title = title;
        }
        if let Some(description) = edit.description {
            self.description = description;
        }
        if let Some(color) = edit.color {
            self.color = color;
        }
        if let Some(linked) = edit.linked_note_ids {
            self.linked_note_ids = linked;
        }
    }
}

/// Fields the event edit surface may change; `None` leaves a field as-is
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EventEdit {
    pub title: Option<String>,
    pub description: Option<String>,
    pub color: Option<Color>,
    pub linked_note_ids: Option<Vec<String>>,
}

impl EventEdit {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.color.is_none()
            && self.linked_note_ids.is_none()
    }
}
