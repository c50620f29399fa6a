//! Pointer gesture state machine.
//!
//! Exactly one gesture is active at a time. Pointer positions are in
//! canvas-surface coordinates (the header strip, minimap and scrollbar all
//! live inside that surface, see [`SurfaceLayout`]).

use crate::config::CanvasConfig;
use crate::edge::EdgeType;
use crate::geometry::{Point, Vec2};
use crate::render::{hit_test, CanvasHit, Highlights, MinimapLayout, ScrollbarLayout};
use crate::timeline::Timeline;
use crate::viewport::{PanSource, SurfaceLayout, ViewportSync};
use log::{debug, warn};
use ulid::Ulid;

/// Toolbar mode deciding what a click on the canvas does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConnectionMode {
    /// Drag events, click to edit
    #[default]
    None,
    Sequence,
    Causality,
    Hint,
    Foreshadowing,
    /// Click an edge to remove it
    Delete,
}

impl ConnectionMode {
    pub const ALL: [ConnectionMode; 6] = [
        ConnectionMode::None,
        ConnectionMode::Sequence,
        ConnectionMode::Causality,
        ConnectionMode::Hint,
        ConnectionMode::Foreshadowing,
        ConnectionMode::Delete,
    ];

    /// Edge type created in this mode, if it is a linking mode
    pub fn edge_type(&self) -> Option<EdgeType> {
        match self {
            ConnectionMode::Sequence => Some(EdgeType::Sequence),
            ConnectionMode::Causality => Some(EdgeType::Causality),
            ConnectionMode::Hint => Some(EdgeType::Hint),
            ConnectionMode::Foreshadowing => Some(EdgeType::Foreshadowing),
            ConnectionMode::None | ConnectionMode::Delete => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConnectionMode::None => "Select",
            ConnectionMode::Delete => "Delete edge",
            mode => mode.edge_type().map_or("", |t| t.label()),
        }
    }
}

/// First endpoint of an edge being created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeSelection {
    pub event_id: Ulid,
    pub edge_type: EdgeType,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InteractionState {
    Idle,
    PanDragging {
        press: Point,
        last: Point,
        /// Past the drag threshold
        moved: bool,
        /// Click target resolved on release if the pointer never moved
        click: Option<CanvasHit>,
        /// Edge selection to restore afterwards
        resume: Option<EdgeSelection>,
    },
    EventDragging {
        event_id: Ulid,
        /// Pointer offset from the card's top-left corner, world units
        grab: Vec2,
        /// Position before the drag, for the history record
        origin: Point,
        press: Point,
        moved: bool,
    },
    EdgeFirstSelected {
        event_id: Ulid,
        edge_type: EdgeType,
    },
    MinimapDragging {
        resume: Option<EdgeSelection>,
    },
    ScrollbarDragging {
        /// Pointer offset from the thumb's left edge
        grab_x: f32,
        resume: Option<EdgeSelection>,
    },
}

impl InteractionState {
    fn resting(selection: Option<EdgeSelection>) -> Self {
        match selection {
            Some(s) => InteractionState::EdgeFirstSelected {
                event_id: s.event_id,
                edge_type: s.edge_type,
            },
            None => InteractionState::Idle,
        }
    }

    /// Whether a pointer gesture is in flight
    pub fn is_gesture(&self) -> bool {
        !matches!(
            self,
            InteractionState::Idle | InteractionState::EdgeFirstSelected { .. }
        )
    }
}

/// What a pointer callback changed
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionOutcome {
    None,
    Panned,
    /// Live position update; edges touching the event move with it
    EventDragged(Ulid),
    EventMoved { id: Ulid, position: Point },
    OpenEditor(Ulid),
    FirstSelected(Ulid),
    EdgeCreated(Ulid),
    EdgeDeleted(Ulid),
    EdgeRejected(String),
}

/// Everything a pointer callback may read or mutate
pub struct InteractionContext<'a> {
    pub timeline: &'a mut Timeline,
    pub sync: &'a mut ViewportSync,
    pub config: &'a CanvasConfig,
    pub layout: &'a SurfaceLayout,
}

impl InteractionContext<'_> {
    fn scrollbar(&self) -> ScrollbarLayout {
        ScrollbarLayout::new(
            self.layout.scrollbar,
            self.timeline.content_size(),
            self.sync.viewport(),
            self.config.scrollbar_min_thumb,
        )
    }

    fn minimap(&self) -> MinimapLayout {
        MinimapLayout::new(self.layout.minimap, self.timeline.content_size())
    }
}

#[derive(Debug, Clone)]
pub struct InteractionController {
    state: InteractionState,
    mode: ConnectionMode,
    last_pointer: Option<Point>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self {
            state: InteractionState::Idle,
            mode: ConnectionMode::None,
            last_pointer: None,
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn connection_mode(&self) -> ConnectionMode {
        self.mode
    }

    /// Switch modes. Any pending first selection is discarded.
    pub fn set_connection_mode(&mut self, mode: ConnectionMode) {
        if mode == self.mode {
            return;
        }
        debug!("connection mode {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
        self.clear_selection();
    }

    /// Toolbar toggle: pressing the active mode returns to `None`
    pub fn toggle_connection_mode(&mut self, mode: ConnectionMode) {
        if mode == self.mode {
            self.set_connection_mode(ConnectionMode::None);
        } else {
            self.set_connection_mode(mode);
        }
    }

    /// The pending first endpoint, including while a pan interrupts it
    pub fn selection(&self) -> Option<EdgeSelection> {
        match &self.state {
            InteractionState::EdgeFirstSelected {
                event_id,
                edge_type,
            } => Some(EdgeSelection {
                event_id: *event_id,
                edge_type: *edge_type,
            }),
            InteractionState::PanDragging { resume, .. }
            | InteractionState::MinimapDragging { resume }
            | InteractionState::ScrollbarDragging { resume, .. } => *resume,
            InteractionState::Idle | InteractionState::EventDragging { .. } => None,
        }
    }

    pub fn highlights(&self) -> Highlights {
        Highlights {
            first_selected: self.selection().map(|s| s.event_id),
            dragging: match &self.state {
                InteractionState::EventDragging {
                    event_id,
                    moved: true,
                    ..
                } => Some(*event_id),
                _ => None,
            },
            connection_mode: self.mode,
            ..Highlights::default()
        }
    }

    /// Edge under the pointer, only reported in delete mode
    pub fn hovered_edge(
        &self,
        timeline: &Timeline,
        sync: &ViewportSync,
        config: &CanvasConfig,
        pos: Point,
    ) -> Option<Ulid> {
        if self.mode != ConnectionMode::Delete || self.state.is_gesture() {
            return None;
        }
        match hit_test(timeline, sync.viewport(), config, pos, true) {
            CanvasHit::Edge(id) => Some(id),
            _ => None,
        }
    }

    pub fn pointer_down(&mut self, ctx: &mut InteractionContext<'_>, pos: Point) -> InteractionOutcome {
        self.last_pointer = Some(pos);
        if self.state.is_gesture() {
            return InteractionOutcome::None;
        }
        let resume = self.selection();
        let content = ctx.timeline.content_size();

        if ctx.layout.scrollbar.contains_point(pos) {
            let bar = ctx.scrollbar();
            if !bar.scrollable() {
                return InteractionOutcome::None;
            }
            let mut outcome = InteractionOutcome::None;
            let grab_x = if bar.thumb.contains_point(pos) {
                pos.x - bar.thumb.x
            } else {
                // Jump so the thumb centers under the pointer
                let grab_x = bar.thumb.width * 0.5;
                let pan = Vec2::new(bar.pan_for_thumb_x(pos.x - grab_x), ctx.sync.pan().y);
                if ctx.sync.write_pan(PanSource::Scrollbar, pan, content) {
                    outcome = InteractionOutcome::Panned;
                }
                grab_x
            };
            self.state = InteractionState::ScrollbarDragging { grab_x, resume };
            return outcome;
        }

        if ctx.layout.minimap.contains_point(pos) {
            let pan = ctx.minimap().recenter_pan(pos, ctx.sync.viewport());
            self.state = InteractionState::MinimapDragging { resume };
            return panned(ctx.sync.write_pan(PanSource::Minimap, pan, content));
        }

        let include_edges = self.mode == ConnectionMode::Delete;
        let hit = hit_test(ctx.timeline, ctx.sync.viewport(), ctx.config, pos, include_edges);

        if let (ConnectionMode::None, CanvasHit::Event(event_id)) = (self.mode, hit) {
            let Some(origin) = ctx.timeline.get_event(event_id).map(|e| e.position()) else {
                return InteractionOutcome::None;
            };
            if let Err(err) = ctx.timeline.bring_to_front(event_id) {
                warn!("cannot raise event {}: {}", event_id, err);
            }
            let world = ctx.sync.viewport().screen_to_world(pos);
            self.state = InteractionState::EventDragging {
                event_id,
                grab: world.delta_from(origin),
                origin,
                press: pos,
                moved: false,
            };
            return InteractionOutcome::None;
        }

        let click = match (self.mode, hit) {
            (ConnectionMode::Delete, CanvasHit::Edge(_)) => Some(hit),
            (mode, CanvasHit::Event(_)) if mode.edge_type().is_some() => Some(hit),
            _ => None,
        };
        self.state = InteractionState::PanDragging {
            press: pos,
            last: pos,
            moved: false,
            click,
            resume,
        };
        InteractionOutcome::None
    }

    pub fn pointer_move(&mut self, ctx: &mut InteractionContext<'_>, pos: Point) -> InteractionOutcome {
        self.last_pointer = Some(pos);
        let threshold = ctx.config.drag_threshold;
        let content = ctx.timeline.content_size();

        match &mut self.state {
            InteractionState::PanDragging {
                press, last, moved, ..
            } => {
                if !*moved && pos.distance(*press) < threshold {
                    return InteractionOutcome::None;
                }
                *moved = true;
                let delta = pos.delta_from(*last);
                *last = pos;
                panned(ctx.sync.pan_by(PanSource::CanvasDrag, delta, content))
            }
            InteractionState::EventDragging {
                event_id,
                grab,
                press,
                moved,
                ..
            } => {
                if !*moved && pos.distance(*press) < threshold {
                    return InteractionOutcome::None;
                }
                *moved = true;
                let world = ctx.sync.viewport().screen_to_world(pos);
                let id = *event_id;
                match ctx.timeline.move_event_live(id, world.x - grab.x, world.y - grab.y) {
                    Ok(()) => InteractionOutcome::EventDragged(id),
                    Err(err) => {
                        warn!("drag lost its event: {}", err);
                        InteractionOutcome::None
                    }
                }
            }
            InteractionState::MinimapDragging { .. } => {
                let pan = ctx.minimap().recenter_pan(pos, ctx.sync.viewport());
                panned(ctx.sync.write_pan(PanSource::Minimap, pan, content))
            }
            InteractionState::ScrollbarDragging { grab_x, .. } => {
                let thumb_x = pos.x - *grab_x;
                let pan = Vec2::new(ctx.scrollbar().pan_for_thumb_x(thumb_x), ctx.sync.pan().y);
                panned(ctx.sync.write_pan(PanSource::Scrollbar, pan, content))
            }
            InteractionState::Idle | InteractionState::EdgeFirstSelected { .. } => {
                InteractionOutcome::None
            }
        }
    }

    pub fn pointer_up(&mut self, ctx: &mut InteractionContext<'_>, pos: Point) -> InteractionOutcome {
        self.last_pointer = Some(pos);
        let state = std::mem::replace(&mut self.state, InteractionState::Idle);

        match state {
            InteractionState::PanDragging {
                moved,
                click,
                resume,
                ..
            } => {
                self.state = InteractionState::resting(resume);
                match click {
                    Some(hit) if !moved => self.click(ctx, hit),
                    _ => InteractionOutcome::None,
                }
            }
            InteractionState::EventDragging {
                event_id,
                origin,
                moved,
                ..
            } => {
                if !moved {
                    return InteractionOutcome::OpenEditor(event_id);
                }
                match ctx.timeline.commit_event_move(event_id, origin) {
                    Ok(position) => InteractionOutcome::EventMoved {
                        id: event_id,
                        position,
                    },
                    Err(err) => {
                        warn!("cannot commit drag: {}", err);
                        InteractionOutcome::None
                    }
                }
            }
            InteractionState::MinimapDragging { resume }
            | InteractionState::ScrollbarDragging { resume, .. } => {
                self.state = InteractionState::resting(resume);
                InteractionOutcome::None
            }
            resting => {
                self.state = resting;
                InteractionOutcome::None
            }
        }
    }

    /// Pointer lost (left the window, released over nothing). Behaves like a
    /// release at the last known position, minus any pending click.
    pub fn cancel(&mut self, ctx: &mut InteractionContext<'_>) -> InteractionOutcome {
        let Some(pos) = self.last_pointer else {
            return InteractionOutcome::None;
        };
        if matches!(self.state, InteractionState::EventDragging { moved: false, .. }) {
            self.state = InteractionState::Idle;
            return InteractionOutcome::None;
        }
        if let InteractionState::PanDragging { click, .. } = &mut self.state {
            *click = None;
        }
        self.pointer_up(ctx, pos)
    }

    /// Forget selections that point at events no longer in the timeline
    pub fn drop_stale_references(&mut self, timeline: &Timeline) {
        let stale = self
            .selection()
            .is_some_and(|s| timeline.get_event(s.event_id).is_none());
        if stale {
            self.clear_selection();
        }
        if let InteractionState::EventDragging { event_id, .. } = &self.state {
            if timeline.get_event(*event_id).is_none() {
                self.state = InteractionState::Idle;
            }
        }
    }

    fn clear_selection(&mut self) {
        if matches!(self.state, InteractionState::EdgeFirstSelected { .. }) {
            self.state = InteractionState::Idle;
            return;
        }
        match &mut self.state {
            InteractionState::PanDragging { resume, click, .. } => {
                *resume = None;
                *click = None;
            }
            InteractionState::MinimapDragging { resume }
            | InteractionState::ScrollbarDragging { resume, .. } => *resume = None,
            _ => {}
        }
    }

    fn click(&mut self, ctx: &mut InteractionContext<'_>, hit: CanvasHit) -> InteractionOutcome {
        match hit {
            CanvasHit::Edge(edge_id) if self.mode == ConnectionMode::Delete => {
                match ctx.timeline.delete_edge(edge_id) {
                    Ok(()) => InteractionOutcome::EdgeDeleted(edge_id),
                    Err(err) => {
                        warn!("{}", err);
                        InteractionOutcome::None
                    }
                }
            }
            CanvasHit::Event(event_id) => {
                let Some(edge_type) = self.mode.edge_type() else {
                    return InteractionOutcome::None;
                };
                match self.selection() {
                    Some(first) if first.event_id == event_id => InteractionOutcome::None,
                    Some(first) => {
                        self.state = InteractionState::Idle;
                        match ctx.timeline.add_edge(first.edge_type, first.event_id, event_id) {
                            Ok(edge_id) => InteractionOutcome::EdgeCreated(edge_id),
                            Err(err) => {
                                debug!("edge rejected: {}", err);
                                InteractionOutcome::EdgeRejected(err.to_string())
                            }
                        }
                    }
                    None => {
                        self.state = InteractionState::EdgeFirstSelected {
                            event_id,
                            edge_type,
                        };
                        InteractionOutcome::FirstSelected(event_id)
                    }
                }
            }
            _ => InteractionOutcome::None,
        }
    }
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}

fn panned(changed: bool) -> InteractionOutcome {
    if changed {
        InteractionOutcome::Panned
    } else {
        InteractionOutcome::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;
    use crate::render::edge_path;
    use assert_matches::assert_matches;

    struct Fixture {
        timeline: Timeline,
        sync: ViewportSync,
        config: CanvasConfig,
        layout: SurfaceLayout,
        controller: InteractionController,
    }

    impl Fixture {
        fn new() -> Self {
            let config = CanvasConfig::default();
            let canvas = Size::new(1000.0, 700.0);
            Self {
                timeline: Timeline::default(),
                sync: ViewportSync::from_config(canvas, &config),
                layout: SurfaceLayout::for_canvas(canvas, &config),
                config,
                controller: InteractionController::new(),
            }
        }

        fn click(&mut self, pos: Point) -> InteractionOutcome {
            self.down(pos);
            self.up(pos)
        }

        fn down(&mut self, pos: Point) -> InteractionOutcome {
            let mut ctx = InteractionContext {
                timeline: &mut self.timeline,
                sync: &mut self.sync,
                config: &self.config,
                layout: &self.layout,
            };
            self.controller.pointer_down(&mut ctx, pos)
        }

        fn drag_to(&mut self, pos: Point) -> InteractionOutcome {
            let mut ctx = InteractionContext {
                timeline: &mut self.timeline,
                sync: &mut self.sync,
                config: &self.config,
                layout: &self.layout,
            };
            self.controller.pointer_move(&mut ctx, pos)
        }

        fn up(&mut self, pos: Point) -> InteractionOutcome {
            let mut ctx = InteractionContext {
                timeline: &mut self.timeline,
                sync: &mut self.sync,
                config: &self.config,
                layout: &self.layout,
            };
            self.controller.pointer_up(&mut ctx, pos)
        }

        fn cancel(&mut self) -> InteractionOutcome {
            let mut ctx = InteractionContext {
                timeline: &mut self.timeline,
                sync: &mut self.sync,
                config: &self.config,
                layout: &self.layout,
            };
            self.controller.cancel(&mut ctx)
        }
    }

    /// Screen point inside an event card at world (x, y)
    fn on_card(x: f32, y: f32) -> Point {
        Point::new(x + 20.0, y + 48.0 + 20.0)
    }

    #[test]
    fn test_empty_canvas_drag_pans() {
        let mut f = Fixture::new();
        f.down(Point::new(500.0, 300.0));
        assert_matches!(f.controller.state(), InteractionState::PanDragging { .. });

        assert_eq!(f.drag_to(Point::new(400.0, 250.0)), InteractionOutcome::Panned);
        assert_eq!(f.sync.pan(), Vec2::new(-100.0, -50.0));

        f.up(Point::new(400.0, 250.0));
        assert_eq!(f.controller.state(), &InteractionState::Idle);
    }

    #[test]
    fn test_small_jitter_is_not_a_drag() {
        let mut f = Fixture::new();
        let id = f.timeline.create_event("A", 100.0, 100.0).unwrap();

        f.down(on_card(100.0, 100.0));
        assert_eq!(f.drag_to(Point::new(122.0, 170.0)), InteractionOutcome::None);
        assert_eq!(f.up(Point::new(122.0, 170.0)), InteractionOutcome::OpenEditor(id));
        assert_eq!(f.timeline.get_event(id).unwrap().position(), Point::new(100.0, 100.0));
    }

    #[test]
    fn test_event_drag_moves_edges_live_then_clamps() {
        let mut f = Fixture::new();
        let a = f.timeline.create_event("A", 100.0, 100.0).unwrap();
        let b = f.timeline.create_event("B", 600.0, 100.0).unwrap();
        let edge_id = f.timeline.add_edge(EdgeType::Sequence, a, b).unwrap();

        f.down(on_card(100.0, 100.0));
        assert_eq!(f.drag_to(on_card(300.0, 400.0)), InteractionOutcome::EventDragged(a));

        // The edge follows the dragged card before any commit
        let edge = f.timeline.get_edge(edge_id).unwrap().clone();
        let path = edge_path(&f.timeline, &edge, f.sync.viewport(), &f.config).unwrap();
        assert_eq!(path.start, Point::new(480.0, 484.0));

        // Drag far outside, release clamps into bounds
        f.drag_to(Point::new(-500.0, -500.0));
        let outcome = f.up(Point::new(-500.0, -500.0));
        assert_eq!(
            outcome,
            InteractionOutcome::EventMoved {
                id: a,
                position: Point::ZERO
            }
        );
    }

    #[test]
    fn test_edge_creation_flow() {
        let mut f = Fixture::new();
        let a = f.timeline.create_event("A", 100.0, 100.0).unwrap();
        let b = f.timeline.create_event("B", 600.0, 100.0).unwrap();
        f.controller.set_connection_mode(ConnectionMode::Causality);

        assert_eq!(f.click(on_card(100.0, 100.0)), InteractionOutcome::FirstSelected(a));
        // Same event again: no-op
        assert_eq!(f.click(on_card(100.0, 100.0)), InteractionOutcome::None);
        // Empty space keeps the selection
        f.click(Point::new(500.0, 600.0));
        assert_eq!(f.controller.selection().map(|s| s.event_id), Some(a));

        let outcome = f.click(on_card(600.0, 100.0));
        assert_matches!(outcome, InteractionOutcome::EdgeCreated(_));
        assert_eq!(f.controller.state(), &InteractionState::Idle);

        let edge = f.timeline.edges_sorted()[0].clone();
        assert_eq!((edge.source, edge.target), (a, b));
        assert_eq!(edge.edge_type, EdgeType::Causality);
    }

    #[test]
    fn test_duplicate_edge_is_rejected() {
        let mut f = Fixture::new();
        let a = f.timeline.create_event("A", 100.0, 100.0).unwrap();
        let b = f.timeline.create_event("B", 600.0, 100.0).unwrap();
        f.timeline.add_edge(EdgeType::Hint, a, b).unwrap();
        f.controller.set_connection_mode(ConnectionMode::Hint);

        f.click(on_card(100.0, 100.0));
        assert_matches!(f.click(on_card(600.0, 100.0)), InteractionOutcome::EdgeRejected(_));
        assert_eq!(f.timeline.edge_count(), 1);
    }

    #[test]
    fn test_mode_toggle_discards_selection() {
        let mut f = Fixture::new();
        f.timeline.create_event("A", 100.0, 100.0).unwrap();
        f.controller.set_connection_mode(ConnectionMode::Sequence);
        f.click(on_card(100.0, 100.0));
        assert!(f.controller.selection().is_some());

        f.controller.toggle_connection_mode(ConnectionMode::Sequence);
        assert_eq!(f.controller.connection_mode(), ConnectionMode::None);
        assert!(f.controller.selection().is_none());
    }

    #[test]
    fn test_pan_during_selection_resumes_it() {
        let mut f = Fixture::new();
        let a = f.timeline.create_event("A", 100.0, 100.0).unwrap();
        f.controller.set_connection_mode(ConnectionMode::Foreshadowing);
        f.click(on_card(100.0, 100.0));

        f.down(Point::new(500.0, 500.0));
        f.drag_to(Point::new(450.0, 500.0));
        assert_eq!(f.controller.highlights().first_selected, Some(a));
        f.up(Point::new(450.0, 500.0));

        assert_matches!(
            f.controller.state(),
            InteractionState::EdgeFirstSelected { event_id, .. } if *event_id == a
        );
    }

    #[test]
    fn test_delete_mode_removes_clicked_edge() {
        let mut f = Fixture::new();
        let a = f.timeline.create_event("A", 0.0, 100.0).unwrap();
        let b = f.timeline.create_event("B", 800.0, 100.0).unwrap();
        let edge = f.timeline.add_edge(EdgeType::Sequence, a, b).unwrap();
        f.controller.set_connection_mode(ConnectionMode::Delete);

        // Card anchors sit at world y = 136, screen y = 184
        assert_eq!(f.click(Point::new(500.0, 185.0)), InteractionOutcome::EdgeDeleted(edge));
        assert_eq!(f.timeline.edge_count(), 0);

        // Events are inert in delete mode
        assert_eq!(f.click(on_card(0.0, 100.0)), InteractionOutcome::None);
        assert_eq!(f.timeline.event_count(), 2);
    }

    #[test]
    fn test_minimap_click_recenters() {
        let mut f = Fixture::new();
        let frame = f.layout.minimap;
        let target = Point::new(frame.x + frame.width * 0.5, frame.y + frame.height * 0.5);

        assert_eq!(f.down(target), InteractionOutcome::Panned);
        assert_matches!(f.controller.state(), InteractionState::MinimapDragging { .. });
        // Center of a 2180x2072 world (bounds plus one card) in a 1000x652 window
        let pan = f.sync.pan();
        assert!((pan.x + 590.0).abs() < 0.5);
        assert!((pan.y + 710.0).abs() < 0.5);

        f.up(target);
        assert_eq!(f.controller.state(), &InteractionState::Idle);
    }

    #[test]
    fn test_scrollbar_drag_pans_horizontally() {
        let mut f = Fixture::new();
        let thumb_start = Point::new(10.0, 695.0);

        assert_eq!(f.down(thumb_start), InteractionOutcome::None);
        assert_eq!(f.drag_to(Point::new(260.0, 695.0)), InteractionOutcome::Panned);
        // Thumb travel maps to pan at content / track = 2.18
        let pan = f.sync.pan();
        assert!((pan.x + 545.0).abs() < 0.5, "pan = {:?}", pan);
        assert_eq!(pan.y, 0.0);
        f.up(Point::new(260.0, 695.0));
    }

    #[test]
    fn test_cancel_releases_at_last_position() {
        let mut f = Fixture::new();
        let id = f.timeline.create_event("A", 100.0, 100.0).unwrap();

        f.down(on_card(100.0, 100.0));
        f.drag_to(on_card(400.0, 100.0));
        assert_eq!(
            f.cancel(),
            InteractionOutcome::EventMoved {
                id,
                position: Point::new(400.0, 100.0)
            }
        );
        assert_eq!(f.controller.state(), &InteractionState::Idle);
    }

    #[test]
    fn test_drop_stale_selection() {
        let mut f = Fixture::new();
        let a = f.timeline.create_event("A", 100.0, 100.0).unwrap();
        f.controller.set_connection_mode(ConnectionMode::Sequence);
        f.click(on_card(100.0, 100.0));

        f.timeline.delete_event(a).unwrap();
        f.controller.drop_stale_references(&f.timeline);
        assert_eq!(f.controller.state(), &InteractionState::Idle);
    }
}
