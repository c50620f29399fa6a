// Helper functions to build timelines in known configurations

use plot_timeline::{
    CanvasConfig, ColumnTemplate, EdgeType, InteractionContext, InteractionController,
    InteractionOutcome, Point, Size, SurfaceLayout, Timeline, TimelineSettings, ViewportSync,
};
use ulid::Ulid;

/// 10 columns x 200px (boundary 2000) with events at x = 100 and x = 1800
pub fn create_shrink_scenario() -> (Timeline, Ulid, Ulid) {
    let settings = TimelineSettings::new(10, 200.0, ColumnTemplate::Chapter).unwrap();
    let mut timeline = Timeline::new(settings, 2000.0).unwrap();

    let near = timeline.create_event("Near", 100.0, 100.0).unwrap();
    let far = timeline.create_event("Far", 1800.0, 400.0).unwrap();

    (timeline, near, far)
}

/// Shrink scenario plus edges: near -> far (sequence), far -> near (hint)
/// and near -> middle (causality)
pub fn create_linked_shrink_scenario() -> (Timeline, Ulid, Ulid, Ulid) {
    let (mut timeline, near, far) = create_shrink_scenario();
    let middle = timeline.create_event("Middle", 900.0, 250.0).unwrap();

    timeline.add_edge(EdgeType::Sequence, near, far).unwrap();
    timeline.add_edge(EdgeType::Hint, far, near).unwrap();
    timeline.add_edge(EdgeType::Causality, near, middle).unwrap();

    (timeline, near, far, middle)
}

/// Proposed settings with `count` columns of 200px
pub fn columns_of_200(count: usize) -> TimelineSettings {
    TimelineSettings::new(count, 200.0, ColumnTemplate::Chapter).unwrap()
}

/// A headless canvas surface: timeline, pan state and overlay layout driven
/// through the interaction controller
pub struct Surface {
    pub timeline: Timeline,
    pub sync: ViewportSync,
    pub config: CanvasConfig,
    pub layout: SurfaceLayout,
    pub controller: InteractionController,
}

impl Surface {
    pub fn new(timeline: Timeline) -> Self {
        let config = CanvasConfig::default();
        let canvas = Size::new(1000.0, 700.0);
        Self {
            timeline,
            sync: ViewportSync::from_config(canvas, &config),
            layout: SurfaceLayout::for_canvas(canvas, &config),
            config,
            controller: InteractionController::new(),
        }
    }

    pub fn down(&mut self, pos: Point) -> InteractionOutcome {
        let mut ctx = InteractionContext {
            timeline: &mut self.timeline,
            sync: &mut self.sync,
            config: &self.config,
            layout: &self.layout,
        };
        self.controller.pointer_down(&mut ctx, pos)
    }

    pub fn drag_to(&mut self, pos: Point) -> InteractionOutcome {
        let mut ctx = InteractionContext {
            timeline: &mut self.timeline,
            sync: &mut self.sync,
            config: &self.config,
            layout: &self.layout,
        };
        self.controller.pointer_move(&mut ctx, pos)
    }

    pub fn up(&mut self, pos: Point) -> InteractionOutcome {
        let mut ctx = InteractionContext {
            timeline: &mut self.timeline,
            sync: &mut self.sync,
            config: &self.config,
            layout: &self.layout,
        };
        self.controller.pointer_up(&mut ctx, pos)
    }

    pub fn click(&mut self, pos: Point) -> InteractionOutcome {
        self.down(pos);
        self.up(pos)
    }

    /// Screen point over the middle of an event's card
    pub fn card_center(&self, id: Ulid) -> Point {
        let event = self.timeline.get_event(id).unwrap();
        self.sync
            .viewport()
            .world_to_screen(event.bounds(self.config.event_size()).center())
    }
}
