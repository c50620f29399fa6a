use super::commands::{DrawCommand, StrokeStyle, TextAnchor};
use super::Highlights;
use crate::color::Color;
use crate::config::CanvasConfig;
use crate::geometry::{center_pan_on, compute_minimap_scale, Point, Rectangle, Size, Vec2};
use crate::timeline::Timeline;
use crate::viewport::Viewport;

const FRAME_FILL: Color = Color::rgba(255, 255, 255, 230);
const FRAME_STROKE: Color = Color::rgb(148, 163, 184);
const COLUMN_TINT: Color = Color::rgb(226, 232, 240);
const VIEWPORT_FILL: Color = Color::rgba(59, 130, 246, 40);
const VIEWPORT_STROKE: Color = Color::rgb(59, 130, 246);
const LABEL: Color = Color::rgb(51, 65, 85);
const DOT_RADIUS: f32 = 2.5;

/// Transform between world space and a minimap frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimapLayout {
    /// Minimap rectangle in canvas-surface coordinates
    pub frame: Rectangle,
    pub scale_x: f32,
    pub scale_y: f32,
    /// World size the frame represents
    pub content: Size,
}

impl MinimapLayout {
    pub fn new(frame: Rectangle, content: Size) -> Self {
        let (scale_x, scale_y) = compute_minimap_scale(content, frame.size());
        Self {
            frame,
            scale_x,
            scale_y,
            content,
        }
    }

    pub fn world_to_minimap(&self, world: Point) -> Point {
        Point::new(
            self.frame.x + world.x * self.scale_x,
            self.frame.y + world.y * self.scale_y,
        )
    }

    pub fn minimap_to_world(&self, p: Point) -> Point {
        Point::new(
            unscale(p.x - self.frame.x, self.scale_x),
            unscale(p.y - self.frame.y, self.scale_y),
        )
    }

    /// The canvas's visible window inside the frame. Never exceeds the frame.
    pub fn viewport_rect(&self, viewport: &Viewport) -> Rectangle {
        let visible = viewport.visible_world_size();
        let width = (visible.width * self.scale_x).min(self.frame.width);
        let height = (visible.height * self.scale_y).min(self.frame.height);
        let x = (-viewport.pan.x * self.scale_x).clamp(0.0, self.frame.width - width);
        let y = (-viewport.pan.y * self.scale_y).clamp(0.0, self.frame.height - height);
        Rectangle::new(self.frame.x + x, self.frame.y + y, width, height)
    }

    /// Unclamped pan that centers the canvas on the world point under `p`.
    /// Commit it through [`crate::viewport::ViewportSync::write_pan`].
    pub fn recenter_pan(&self, p: Point, viewport: &Viewport) -> Vec2 {
        center_pan_on(self.minimap_to_world(p), viewport.visible_world_size())
    }

    /// Frame, column tints, event dots (labeled when zoomed in enough) and
    /// the viewport rectangle
    pub fn build(
        &self,
        timeline: &Timeline,
        viewport: &Viewport,
        config: &CanvasConfig,
        highlights: &Highlights,
    ) -> Vec<DrawCommand> {
        let mut commands = vec![DrawCommand::Rect {
            rect: self.frame,
            fill: Some(FRAME_FILL),
            stroke: Some(StrokeStyle::solid(1.0, FRAME_STROKE)),
            rounding: 4.0,
        }];

        let settings = timeline.settings();
        let column_width = settings.column_width() * self.scale_x;
        for column in settings.columns().iter().filter(|c| c.position % 2 == 1) {
            let left = self.world_to_minimap(Point::new(
                column.position as f32 * settings.column_width(),
                0.0,
            ));
            commands.push(DrawCommand::filled_rect(
                Rectangle::new(left.x, self.frame.y, column_width, self.frame.height),
                COLUMN_TINT,
            ));
        }

        let labeled = self.scale_x >= config.minimap_label_scale;
        let card = config.event_size();
        for event in timeline.events_in_z_order() {
            let center = self.world_to_minimap(event.bounds(card).center());
            let fill = if highlights.is_match(event.id) || highlights.first_selected == Some(event.id)
            {
                VIEWPORT_STROKE
            } else {
                event.color
            };
            commands.push(DrawCommand::Circle {
                center,
                radius: DOT_RADIUS,
                fill,
            });
            if labeled {
                commands.push(DrawCommand::text(
                    Point::new(center.x, center.y - DOT_RADIUS - 1.0),
                    event.title.clone(),
                    9.0,
                    LABEL,
                    TextAnchor::BottomCenter,
                ));
            }
        }

        commands.push(DrawCommand::Rect {
            rect: self.viewport_rect(viewport),
            fill: Some(VIEWPORT_FILL),
            stroke: Some(StrokeStyle::solid(1.5, VIEWPORT_STROKE)),
            rounding: 0.0,
        });
        commands
    }
}

fn unscale(value: f32, scale: f32) -> f32 {
    if scale > 0.0 {
        value / scale
    } else {
        value
    }
}
