use crate::config::{CanvasConfig, PAN_DEBOUNCE_MS};
use crate::geometry::{
    center_pan_on, clamp_pan, screen_to_world, world_to_screen, Point, Rectangle, Size, Vec2,
};
use crate::timer::DebounceTimer;
use log::debug;
use std::time::{Duration, Instant};

/// Where the user is looking: pan offset plus canvas dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub pan: Vec2,
    /// Size of the canvas surface in screen pixels
    pub dimensions: Size,
    /// Screen offset of the world origin (header strip)
    pub origin: Vec2,
}

impl Viewport {
    pub fn new(dimensions: Size, origin: Vec2) -> Self {
        Self {
            pan: Vec2::ZERO,
            dimensions,
            origin,
        }
    }

    pub fn world_to_screen(&self, world: Point) -> Point {
        world_to_screen(world, self.pan, self.origin)
    }

    pub fn screen_to_world(&self, screen: Point) -> Point {
        screen_to_world(screen, self.pan, self.origin)
    }

    /// World-space size of the visible window
    pub fn visible_world_size(&self) -> Size {
        Size::new(
            (self.dimensions.width - self.origin.x).max(0.0),
            (self.dimensions.height - self.origin.y).max(0.0),
        )
    }

    /// World-space rectangle currently visible
    pub fn visible_world_rect(&self) -> Rectangle {
        Rectangle::from_origin_size(Point::new(-self.pan.x, -self.pan.y), self.visible_world_size())
    }
}

/// Writers of the shared pan state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanSource {
    CanvasDrag,
    Minimap,
    Scrollbar,
    /// Jump-to-event, search navigation, etc.
    Programmatic,
}

/// Re-entrancy guard state owned by [`ViewportSync`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncGuard {
    #[default]
    Idle,
    /// A programmatic pan write happened this tick; the canvas's own pan
    /// listener must not echo it back
    ProgrammaticWrite,
}

/// Single authoritative pan state shared by canvas, minimap and scrollbar.
///
/// Every write goes through [`clamp_pan`].
#[derive(Debug, Clone)]
pub struct ViewportSync {
    viewport: Viewport,
    guard: SyncGuard,
    settle: DebounceTimer<Vec2>,
    /// Committed pan not yet handed to the settle timer
    unsettled: Option<Vec2>,
    revision: u64,
    last_source: Option<PanSource>,
}

impl ViewportSync {
    pub fn new(viewport: Viewport, debounce: Duration) -> Self {
        Self {
            viewport,
            guard: SyncGuard::Idle,
            settle: DebounceTimer::new(debounce),
            unsettled: None,
            revision: 0,
            last_source: None,
        }
    }

    pub fn from_config(dimensions: Size, config: &CanvasConfig) -> Self {
        Self::new(
            Viewport::new(dimensions, config.canvas_origin()),
            config.pan_debounce(),
        )
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn pan(&self) -> Vec2 {
        self.viewport.pan
    }

    pub fn guard(&self) -> SyncGuard {
        self.guard
    }

    pub fn is_programmatic(&self) -> bool {
        self.guard == SyncGuard::ProgrammaticWrite
    }

    /// Bumped on every committed pan change
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn last_source(&self) -> Option<PanSource> {
        self.last_source
    }

    /// Resize the canvas surface; the pan is re-clamped to the new size
    pub fn set_dimensions(&mut self, dimensions: Size, content: Size) {
        if self.viewport.dimensions == dimensions {
            return;
        }
        self.viewport.dimensions = dimensions;
        let pan = self.viewport.pan;
        self.commit(PanSource::Programmatic, pan, content);
    }

    /// Clamp and commit a pan. Returns `true` when the pan changed.
    pub fn write_pan(&mut self, source: PanSource, requested: Vec2, content: Size) -> bool {
        self.commit(source, requested, content)
    }

    /// Relative pan, e.g. a canvas drag delta
    pub fn pan_by(&mut self, source: PanSource, delta: Vec2, content: Size) -> bool {
        let pan = self.viewport.pan;
        self.commit(source, Vec2::new(pan.x + delta.x, pan.y + delta.y), content)
    }

    /// Center the view on a world point. Raises the guard until the next
    /// [`ViewportSync::tick`].
    pub fn navigate_to(&mut self, world: Point, content: Size) -> Vec2 {
        self.guard = SyncGuard::ProgrammaticWrite;
        let target = center_pan_on(world, self.viewport.visible_world_size());
        self.commit(PanSource::Programmatic, target, content);
        self.viewport.pan
    }

    /// Pan change observed by the canvas surface itself (e.g. its scroll
    /// container moved). Ignored while a programmatic write is in flight.
    pub fn report_canvas_pan(&mut self, observed: Vec2, content: Size) -> bool {
        if self.is_programmatic() {
            debug!("canvas pan echo suppressed ({}, {})", observed.x, observed.y);
            return false;
        }
        self.commit(PanSource::CanvasDrag, observed, content)
    }

    /// End of an input tick: clears the re-entrancy guard
    pub fn tick(&mut self) {
        self.guard = SyncGuard::Idle;
    }

    /// Pan that has been stable for the debounce delay, if any. The delay
    /// for a change starts at the first poll that sees it.
    pub fn poll_settled(&mut self, now: Instant) -> Option<Vec2> {
        if let Some(pan) = self.unsettled.take() {
            self.settle.schedule(pan, now);
        }
        self.settle.poll(now)
    }

    /// How long until a pending pan settles, for scheduling the next poll
    pub fn settle_remaining(&self, now: Instant) -> Option<Duration> {
        if self.unsettled.is_some() {
            return Some(self.settle.delay());
        }
        self.settle.remaining(now)
    }

    fn commit(&mut self, source: PanSource, requested: Vec2, content: Size) -> bool {
        let clamped = clamp_pan(requested, content, self.viewport.visible_world_size());
        if clamped == self.viewport.pan {
            return false;
        }
        self.viewport.pan = clamped;
        self.revision += 1;
        self.last_source = Some(source);
        self.unsettled = Some(clamped);
        true
    }
}

impl Default for ViewportSync {
    fn default() -> Self {
        Self::new(
            Viewport::new(Size::new(1280.0, 720.0), Vec2::ZERO),
            Duration::from_millis(PAN_DEBOUNCE_MS),
        )
    }
}

/// Screen placement of the canvas overlays, relative to the canvas origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceLayout {
    pub canvas: Size,
    pub minimap: Rectangle,
    pub scrollbar: Rectangle,
}

impl SurfaceLayout {
    /// Scrollbar along the bottom edge, minimap in the bottom-right corner
    /// just above it
    pub fn for_canvas(canvas: Size, config: &CanvasConfig) -> Self {
        let scrollbar = Rectangle::new(
            0.0,
            canvas.height - config.scrollbar_thickness,
            canvas.width,
            config.scrollbar_thickness,
        );
        let minimap = Rectangle::new(
            canvas.width - config.minimap_inset - config.minimap_width,
            scrollbar.y - config.minimap_inset - config.minimap_height,
            config.minimap_width,
            config.minimap_height,
        );
        Self {
            canvas,
            minimap,
            scrollbar,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTENT: Size = Size::new(2000.0, 2000.0);

    fn sync() -> ViewportSync {
        ViewportSync::new(
            Viewport::new(Size::new(800.0, 648.0), Vec2::new(0.0, 48.0)),
            Duration::from_millis(150),
        )
    }

    #[test]
    fn test_visible_world_size_excludes_header() {
        let sync = sync();
        assert_eq!(sync.viewport().visible_world_size(), Size::new(800.0, 600.0));
    }

    #[test]
    fn test_every_producer_is_clamped() {
        let mut sync = sync();
        for source in [PanSource::CanvasDrag, PanSource::Minimap, PanSource::Scrollbar] {
            sync.write_pan(source, Vec2::new(-9000.0, 300.0), CONTENT);
            assert_eq!(sync.pan(), Vec2::new(-1200.0, 0.0));
            sync.write_pan(source, Vec2::ZERO, CONTENT);
        }
    }

    #[test]
    fn test_unchanged_write_is_not_committed() {
        let mut sync = sync();
        assert!(!sync.write_pan(PanSource::Minimap, Vec2::new(10.0, 10.0), CONTENT));
        assert_eq!(sync.revision(), 0);
        assert!(sync.pan_by(PanSource::CanvasDrag, Vec2::new(-50.0, 0.0), CONTENT));
        assert_eq!(sync.revision(), 1);
        assert_eq!(sync.last_source(), Some(PanSource::CanvasDrag));
    }

    #[test]
    fn test_navigate_centers_and_guards() {
        let mut sync = sync();
        let pan = sync.navigate_to(Point::new(1000.0, 700.0), CONTENT);

        assert_eq!(pan, Vec2::new(-600.0, -400.0));
        assert!(sync.is_programmatic());

        // The canvas listener echoes the write back: suppressed
        let revision = sync.revision();
        assert!(!sync.report_canvas_pan(Vec2::new(-580.0, -400.0), CONTENT));
        assert_eq!(sync.revision(), revision);
        assert_eq!(sync.pan(), pan);

        sync.tick();
        assert_eq!(sync.guard(), SyncGuard::Idle);
        assert!(sync.report_canvas_pan(Vec2::new(-580.0, -400.0), CONTENT));
        assert_eq!(sync.pan(), Vec2::new(-580.0, -400.0));
    }

    #[test]
    fn test_resizing_dimensions_reclamps() {
        let mut sync = sync();
        sync.write_pan(PanSource::Scrollbar, Vec2::new(-1200.0, 0.0), CONTENT);
        sync.set_dimensions(Size::new(1000.0, 648.0), CONTENT);
        assert_eq!(sync.pan(), Vec2::new(-1000.0, 0.0));
    }

    #[test]
    fn test_settle_after_debounce() {
        let start = Instant::now();
        let at = |ms: u64| start + Duration::from_millis(ms);
        let mut sync = sync();
        assert_eq!(sync.settle_remaining(start), None);

        sync.pan_by(PanSource::CanvasDrag, Vec2::new(-30.0, 0.0), CONTENT);
        assert_eq!(sync.settle_remaining(start), Some(Duration::from_millis(150)));
        assert_eq!(sync.poll_settled(at(0)), None);
        assert_eq!(sync.poll_settled(at(100)), None);

        // A second change restarts the delay from the poll that sees it
        sync.pan_by(PanSource::CanvasDrag, Vec2::new(-30.0, 0.0), CONTENT);
        assert_eq!(sync.poll_settled(at(200)), None);
        assert_eq!(sync.settle_remaining(at(300)), Some(Duration::from_millis(50)));
        assert_eq!(sync.poll_settled(at(300)), None);
        assert_eq!(sync.poll_settled(at(350)), Some(Vec2::new(-60.0, 0.0)));
        assert_eq!(sync.poll_settled(at(1000)), None);
    }

    #[test]
    fn test_surface_layout() {
        let layout = SurfaceLayout::for_canvas(Size::new(1000.0, 700.0), &CanvasConfig::default());
        assert_eq!(layout.scrollbar, Rectangle::new(0.0, 690.0, 1000.0, 10.0));
        assert_eq!(layout.minimap, Rectangle::new(768.0, 568.0, 220.0, 110.0));
    }
}
