use serde::{Deserialize, Serialize};

/// A point in world, screen or minimap space (pixels)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Vector pointing from `other` to `self`
    pub fn delta_from(self, other: Point) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }

    pub fn distance(self, other: Point) -> f32 {
        self.delta_from(other).length()
    }
}

/// A displacement, used for pan offsets and drag deltas
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

/// Width and height of a region
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Rectangle representing position and size
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Rectangle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rectangle {
    /// Create a new rectangle
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Get the right edge of the rectangle
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Get the bottom edge of the rectangle
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Check if this rectangle intersects with another
    pub fn intersects(&self, other: &Rectangle) -> bool {
        !(self.right() <= other.x
            || other.right() <= self.x
            || self.bottom() <= other.y
            || other.bottom() <= self.y)
    }

    /// Check if this rectangle contains a point
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

/// Cubic bezier description, independent of any drawing API
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BezierPath {
    pub start: Point,
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
}

impl BezierPath {
    pub fn points(&self) -> [Point; 4] {
        [self.start, self.control1, self.control2, self.end]
    }

    /// Evaluate the curve at `t` in `[0, 1]`
    pub fn sample(&self, t: f32) -> Point {
        let u = 1.0 - t;
        let b0 = u * u * u;
        let b1 = 3.0 * u * u * t;
        let b2 = 3.0 * u * t * t;
        let b3 = t * t * t;
        Point::new(
            b0 * self.start.x + b1 * self.control1.x + b2 * self.control2.x + b3 * self.end.x,
            b0 * self.start.y + b1 * self.control1.y + b2 * self.control2.y + b3 * self.end.y,
        )
    }

    /// Polyline approximation with `segments + 1` points
    pub fn flatten(&self, segments: usize) -> Vec<Point> {
        let segments = segments.max(1);
        (0..=segments)
            .map(|i| self.sample(i as f32 / segments as f32))
            .collect()
    }
}

/// Minimum horizontal control-point offset for edge curves
pub const BEZIER_MIN_OFFSET: f32 = 100.0;

const BEZIER_HIT_SEGMENTS: usize = 32;

/// `screen = world + pan + origin`, where `origin` is the fixed margin of the
/// drawing surface (column header strip, etc.)
pub fn world_to_screen(world: Point, pan: Vec2, origin: Vec2) -> Point {
    Point::new(world.x + pan.x + origin.x, world.y + pan.y + origin.y)
}

/// Inverse of [`world_to_screen`]. No clamping.
pub fn screen_to_world(screen: Point, pan: Vec2, origin: Vec2) -> Point {
    Point::new(screen.x - origin.x - pan.x, screen.y - origin.y - pan.y)
}

/// Per-axis minimap scale. Degenerate world sizes fall back to 1.
pub fn compute_minimap_scale(total_world: Size, minimap: Size) -> (f32, f32) {
    (
        safe_ratio(minimap.width, total_world.width),
        safe_ratio(minimap.height, total_world.height),
    )
}

fn safe_ratio(numerator: f32, denominator: f32) -> f32 {
    if denominator <= 0.0 || !denominator.is_finite() {
        return 1.0;
    }
    let ratio = numerator / denominator;
    if ratio.is_finite() {
        ratio
    } else {
        1.0
    }
}

/// Clamp a pan offset so the content never scrolls past its edges.
///
/// Per axis: `min = min(0, -(content - viewport))`, `max = 0`. Content
/// smaller than the viewport pins the pan at 0.
pub fn clamp_pan(pan: Vec2, content: Size, viewport: Size) -> Vec2 {
    Vec2::new(
        clamp_axis(pan.x, content.width, viewport.width),
        clamp_axis(pan.y, content.height, viewport.height),
    )
}

fn clamp_axis(value: f32, content: f32, viewport: f32) -> f32 {
    let min = 0.0f32.min(-(content - viewport));
    let value = if value.is_nan() { 0.0 } else { value };
    min.max(0.0f32.min(value))
}

/// Pan that puts `world` at the center of a viewport of `visible` size.
/// The result still needs [`clamp_pan`].
pub fn center_pan_on(world: Point, visible: Size) -> Vec2 {
    Vec2::new(
        visible.width * 0.5 - world.x,
        visible.height * 0.5 - world.y,
    )
}

/// Control points for an edge between the right edge of `source` and the
/// left edge of `target` (both anchors already computed by the caller).
pub fn bezier_path(source: Point, target: Point) -> BezierPath {
    bezier_path_with_min_offset(source, target, BEZIER_MIN_OFFSET)
}

/// [`bezier_path`] with a configurable minimum control offset
pub fn bezier_path_with_min_offset(source: Point, target: Point, min_offset: f32) -> BezierPath {
    let dx = (target.x - source.x).abs();
    let offset = (dx * 0.5).min(min_offset.max(dx * 0.25));
    BezierPath {
        start: source,
        control1: Point::new(source.x + offset, source.y),
        control2: Point::new(target.x - offset, target.y),
        end: target,
    }
}

/// Approximate distance from `p` to the curve
pub fn distance_to_bezier(path: &BezierPath, p: Point) -> f32 {
    path.flatten(BEZIER_HIT_SEGMENTS)
        .windows(2)
        .map(|w| distance_to_segment(p, w[0], w[1]))
        .fold(f32::INFINITY, f32::min)
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let ab = b.delta_from(a);
    let len_sq = ab.x * ab.x + ab.y * ab.y;
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let ap = p.delta_from(a);
    let t = ((ap.x * ab.x + ap.y * ab.y) / len_sq).clamp(0.0, 1.0);
    p.distance(Point::new(a.x + ab.x * t, a.y + ab.y * t))
}
