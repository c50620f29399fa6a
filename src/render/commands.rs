use crate::color::Color;
use crate::edge::EdgeType;
use crate::geometry::{BezierPath, Point, Rectangle};
use ulid::Ulid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokePattern {
    Solid,
    Dashed,
    Dotted,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub width: f32,
    pub color: Color,
    pub pattern: StrokePattern,
}

impl StrokeStyle {
    pub const fn solid(width: f32, color: Color) -> Self {
        Self {
            width,
            color,
            pattern: StrokePattern::Solid,
        }
    }

    /// Line style for each edge type
    pub fn for_edge(edge_type: EdgeType) -> Self {
        match edge_type {
            EdgeType::Sequence => Self::solid(2.0, Color::rgb(100, 116, 139)),
            EdgeType::Causality => Self::solid(2.5, Color::rgb(220, 38, 38)),
            EdgeType::Hint => Self {
                width: 2.0,
                color: Color::rgb(217, 119, 6),
                pattern: StrokePattern::Dashed,
            },
            EdgeType::Foreshadowing => Self {
                width: 2.0,
                color: Color::rgb(147, 51, 234),
                pattern: StrokePattern::Dotted,
            },
        }
    }
}

/// Where a text command's position sits relative to the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    TopLeft,
    Center,
    BottomCenter,
}

/// One primitive in screen space
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        rect: Rectangle,
        fill: Option<Color>,
        stroke: Option<StrokeStyle>,
        rounding: f32,
    },
    Line {
        from: Point,
        to: Point,
        stroke: StrokeStyle,
    },
    /// Edge curve, tagged with its edge id
    Curve {
        edge_id: Ulid,
        path: BezierPath,
        stroke: StrokeStyle,
        arrow: bool,
    },
    Circle {
        center: Point,
        radius: f32,
        fill: Color,
    },
    Text {
        pos: Point,
        text: String,
        size: f32,
        color: Color,
        anchor: TextAnchor,
    },
}

impl DrawCommand {
    pub fn filled_rect(rect: Rectangle, fill: Color) -> Self {
        DrawCommand::Rect {
            rect,
            fill: Some(fill),
            stroke: None,
            rounding: 0.0,
        }
    }

    pub fn text(pos: Point, text: impl Into<String>, size: f32, color: Color, anchor: TextAnchor) -> Self {
        DrawCommand::Text {
            pos,
            text: text.into(),
            size,
            color,
            anchor,
        }
    }
}
