// Plot Timeline - Core Library

pub mod color;
pub mod column;
pub mod config;
pub mod drop_target;
pub mod edge;
pub mod event;
pub mod geometry;
pub mod history;
pub mod interaction;
pub mod logging;
pub mod render;
pub mod resolver;
pub mod search;
pub mod settings;
pub mod timeline;
pub mod timer;
pub mod ui;
pub mod viewport;

// Re-export main types for convenience
pub use color::Color;
pub use column::{ColumnTemplate, TimeColumn};
pub use config::CanvasConfig;
pub use drop_target::DropPayload;
pub use edge::{Edge, EdgeType};
pub use event::{EventEdit, TimelineEvent};
pub use geometry::{BezierPath, Point, Rectangle, Size, Vec2};
pub use history::{HistoryEntry, TimelineChange};
pub use interaction::{
    ConnectionMode, InteractionContext, InteractionController, InteractionOutcome,
    InteractionState,
};
pub use resolver::{BoundaryConflict, BoundaryResolver, Resolution, ResolutionReport, SettingsChange};
pub use search::EventSearch;
pub use settings::TimelineSettings;
pub use timeline::Timeline;
pub use ui::TimelineApp;
pub use viewport::{PanSource, SurfaceLayout, Viewport, ViewportSync};
