use super::commands::DrawCommand;
use crate::color::Color;
use crate::geometry::{Rectangle, Size};
use crate::viewport::Viewport;

const TRACK: Color = Color::rgba(226, 232, 240, 200);
const THUMB: Color = Color::rgb(148, 163, 184);

/// Horizontal scrollbar geometry derived from the shared pan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollbarLayout {
    pub track: Rectangle,
    pub thumb: Rectangle,
    pub content_width: f32,
    pub visible_width: f32,
}

impl ScrollbarLayout {
    pub fn new(track: Rectangle, content: Size, viewport: &Viewport, min_thumb: f32) -> Self {
        let visible_width = viewport.visible_world_size().width;
        let content_width = content.width;

        let thumb = if content_width <= visible_width || content_width <= 0.0 {
            track
        } else {
            let width = (track.width * visible_width / content_width)
                .max(min_thumb)
                .min(track.width);
            let travel = track.width - width;
            let progress = (-viewport.pan.x / (content_width - visible_width)).clamp(0.0, 1.0);
            Rectangle::new(track.x + progress * travel, track.y, width, track.height)
        };

        Self {
            track,
            thumb,
            content_width,
            visible_width,
        }
    }

    pub fn scrollable(&self) -> bool {
        self.content_width > self.visible_width
    }

    /// Pan x that puts the thumb's left edge at `thumb_x`
    pub fn pan_for_thumb_x(&self, thumb_x: f32) -> f32 {
        let travel = self.track.width - self.thumb.width;
        if !self.scrollable() || travel <= 0.0 {
            return 0.0;
        }
        let progress = ((thumb_x - self.track.x) / travel).clamp(0.0, 1.0);
        -progress * (self.content_width - self.visible_width)
    }

    pub fn build(&self) -> Vec<DrawCommand> {
        let mut commands = vec![DrawCommand::filled_rect(self.track, TRACK)];
        if self.scrollable() {
            commands.push(DrawCommand::Rect {
                rect: self.thumb,
                fill: Some(THUMB),
                stroke: None,
                rounding: self.track.height * 0.5,
            });
        }
        commands
    }
}
