//! Pure "state in, draw commands out" rendering.
//!
//! Nothing in here touches a drawing surface; [`crate::ui`] replays the
//! commands onto an egui painter.

pub mod canvas;
pub mod commands;
pub mod minimap;
pub mod scrollbar;

pub use canvas::{build_canvas, edge_path, hit_test, CanvasHit};
pub use commands::{DrawCommand, StrokePattern, StrokeStyle, TextAnchor};
pub use minimap::MinimapLayout;
pub use scrollbar::ScrollbarLayout;

use crate::interaction::ConnectionMode;
use ulid::Ulid;

/// Interaction and search state the renderers decorate events with
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Highlights {
    pub first_selected: Option<Ulid>,
    pub dragging: Option<Ulid>,
    pub search_matches: Vec<Ulid>,
    pub active_match: Option<Ulid>,
    pub hovered_edge: Option<Ulid>,
    pub connection_mode: ConnectionMode,
}

impl Highlights {
    pub fn is_match(&self, id: Ulid) -> bool {
        self.search_matches.contains(&id)
    }
}
