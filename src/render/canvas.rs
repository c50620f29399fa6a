use super::commands::{DrawCommand, StrokeStyle, TextAnchor};
use super::Highlights;
use crate::color::Color;
use crate::config::CanvasConfig;
use crate::edge::Edge;
use crate::geometry::{bezier_path_with_min_offset, distance_to_bezier, BezierPath, Point, Rectangle};
use crate::timeline::Timeline;
use crate::viewport::Viewport;
use ulid::Ulid;

const BACKGROUND: Color = Color::rgb(248, 250, 252);
const COLUMN_EVEN: Color = Color::rgb(241, 245, 249);
const COLUMN_ODD: Color = Color::rgb(248, 250, 252);
const COLUMN_DIVIDER: Color = Color::rgb(203, 213, 225);
const HEADER_FILL: Color = Color::rgb(226, 232, 240);
const HEADER_TEXT: Color = Color::rgb(30, 41, 59);
const SUBTITLE_TEXT: Color = Color::rgb(100, 116, 139);
const BOUNDARY_LINE: Color = Color::rgb(148, 163, 184);
const SELECTED_OUTLINE: Color = Color::rgb(245, 158, 11);
const MATCH_OUTLINE: Color = Color::rgb(14, 165, 233);
const CARD_OUTLINE: Color = Color::rgb(51, 65, 85);

/// What lies under a canvas point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasHit {
    Event(Ulid),
    Edge(Ulid),
    Empty,
}

/// Screen-space curve for an edge; `None` if an endpoint is missing
pub fn edge_path(
    timeline: &Timeline,
    edge: &Edge,
    viewport: &Viewport,
    config: &CanvasConfig,
) -> Option<BezierPath> {
    let card = config.event_size();
    let source = timeline.get_event(edge.source)?;
    let target = timeline.get_event(edge.target)?;
    Some(bezier_path_with_min_offset(
        viewport.world_to_screen(source.source_anchor(card)),
        viewport.world_to_screen(target.target_anchor(card)),
        config.bezier_min_offset,
    ))
}

/// Topmost event under `screen`, else (when `include_edges`) the nearest
/// edge within tolerance, else empty
pub fn hit_test(
    timeline: &Timeline,
    viewport: &Viewport,
    config: &CanvasConfig,
    screen: Point,
    include_edges: bool,
) -> CanvasHit {
    if screen.y < viewport.origin.y {
        return CanvasHit::Empty;
    }

    let world = viewport.screen_to_world(screen);
    let card = config.event_size();
    if let Some(event) = timeline
        .events_in_z_order()
        .into_iter()
        .rev()
        .find(|e| e.bounds(card).contains_point(world))
    {
        return CanvasHit::Event(event.id);
    }

    if include_edges {
        let nearest = timeline
            .edges_sorted()
            .into_iter()
            .filter_map(|edge| {
                let path = edge_path(timeline, edge, viewport, config)?;
                Some((edge.id, distance_to_bezier(&path, screen)))
            })
            .filter(|(_, d)| *d <= config.edge_hit_tolerance)
            .min_by(|a, b| a.1.total_cmp(&b.1));
        if let Some((id, _)) = nearest {
            return CanvasHit::Edge(id);
        }
    }

    CanvasHit::Empty
}

/// Draw commands for the main canvas: columns, edges, events, header strip
pub fn build_canvas(
    timeline: &Timeline,
    viewport: &Viewport,
    config: &CanvasConfig,
    highlights: &Highlights,
) -> Vec<DrawCommand> {
    let surface = Rectangle::from_origin_size(Point::ZERO, viewport.dimensions);
    let settings = timeline.settings();
    let width = settings.column_width();
    let mut commands = vec![DrawCommand::filled_rect(surface, BACKGROUND)];

    // Column bands
    let band_top = viewport.world_to_screen(Point::ZERO).y;
    for column in settings.columns() {
        let left = viewport
            .world_to_screen(Point::new(column.position as f32 * width, 0.0))
            .x;
        let band = Rectangle::new(left, band_top, width, timeline.vertical_extent());
        if !band.intersects(&surface) {
            continue;
        }
        let fill = if column.position % 2 == 0 {
            COLUMN_EVEN
        } else {
            COLUMN_ODD
        };
        commands.push(DrawCommand::filled_rect(band, fill));
        commands.push(DrawCommand::Line {
            from: Point::new(left, band_top),
            to: Point::new(left, band.bottom()),
            stroke: StrokeStyle::solid(1.0, COLUMN_DIVIDER),
        });
    }

    let boundary_x = viewport
        .world_to_screen(Point::new(timeline.boundary(), 0.0))
        .x;
    commands.push(DrawCommand::Line {
        from: Point::new(boundary_x, band_top),
        to: Point::new(boundary_x, band_top + timeline.vertical_extent()),
        stroke: StrokeStyle::solid(2.0, BOUNDARY_LINE),
    });

    // Edges under events
    for edge in timeline.edges_sorted() {
        let Some(path) = edge_path(timeline, edge, viewport, config) else {
            continue;
        };
        let mut stroke = StrokeStyle::for_edge(edge.edge_type);
        if highlights.hovered_edge == Some(edge.id) {
            stroke.width += 2.0;
        }
        commands.push(DrawCommand::Curve {
            edge_id: edge.id,
            path,
            stroke,
            arrow: true,
        });
    }

    // Events
    let card = config.event_size();
    for event in timeline.events_in_z_order() {
        let rect = Rectangle::from_origin_size(viewport.world_to_screen(event.position()), card);
        if !rect.intersects(&surface) {
            continue;
        }

        let outline = if highlights.first_selected == Some(event.id) {
            StrokeStyle::solid(3.0, SELECTED_OUTLINE)
        } else if highlights.active_match == Some(event.id) {
            StrokeStyle::solid(3.0, MATCH_OUTLINE)
        } else if highlights.is_match(event.id) {
            StrokeStyle::solid(2.0, MATCH_OUTLINE)
        } else {
            StrokeStyle::solid(1.0, CARD_OUTLINE)
        };
        let fill = if highlights.dragging == Some(event.id) {
            event.color.with_alpha(200)
        } else {
            event.color
        };

        commands.push(DrawCommand::Rect {
            rect,
            fill: Some(fill),
            stroke: Some(outline),
            rounding: 6.0,
        });
        commands.push(DrawCommand::text(
            Point::new(rect.x + 8.0, rect.y + 8.0),
            event.title.clone(),
            14.0,
            event.color.contrasting_text(),
            TextAnchor::TopLeft,
        ));
        if !event.description.is_empty() {
            let summary: String = event.description.chars().take(40).collect();
            commands.push(DrawCommand::text(
                Point::new(rect.x + 8.0, rect.y + 30.0),
                summary,
                11.0,
                event.color.contrasting_text().with_alpha(190),
                TextAnchor::TopLeft,
            ));
        }
    }

    // Header strip stays pinned vertically but scrolls horizontally
    let header = Rectangle::new(0.0, 0.0, viewport.dimensions.width, viewport.origin.y);
    commands.push(DrawCommand::filled_rect(header, HEADER_FILL));
    for column in settings.columns() {
        let left = viewport
            .world_to_screen(Point::new(column.position as f32 * width, 0.0))
            .x;
        if left + width < 0.0 || left > viewport.dimensions.width {
            continue;
        }
        let center_x = left + width * 0.5;
        commands.push(DrawCommand::text(
            Point::new(center_x, header.height * 0.4),
            column.name.clone(),
            13.0,
            HEADER_TEXT,
            TextAnchor::Center,
        ));
        if !column.subtitle.is_empty() {
            commands.push(DrawCommand::text(
                Point::new(center_x, header.height * 0.8),
                column.subtitle.clone(),
                10.0,
                SUBTITLE_TEXT,
                TextAnchor::Center,
            ));
        }
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::EdgeType;
    use crate::geometry::{Size, Vec2};

    fn viewport() -> Viewport {
        Viewport::new(Size::new(1000.0, 648.0), Vec2::new(0.0, 48.0))
    }

    #[test]
    fn test_edge_path_uses_card_anchors() {
        let config = CanvasConfig::default();
        let mut timeline = Timeline::default();
        let a = timeline.create_event("A", 100.0, 100.0).unwrap();
        let b = timeline.create_event("B", 700.0, 300.0).unwrap();
        let edge_id = timeline.add_edge(EdgeType::Sequence, a, b).unwrap();

        let edge = timeline.get_edge(edge_id).unwrap();
        let path = edge_path(&timeline, edge, &viewport(), &config).unwrap();

        assert_eq!(path.start, Point::new(280.0, 184.0));
        assert_eq!(path.end, Point::new(700.0, 384.0));
    }

    #[test]
    fn test_hit_test_prefers_topmost_event() {
        let config = CanvasConfig::default();
        let mut timeline = Timeline::default();
        let _below = timeline.create_event("Below", 100.0, 100.0).unwrap();
        let above = timeline.create_event("Above", 150.0, 120.0).unwrap();

        let hit = hit_test(&timeline, &viewport(), &config, Point::new(200.0, 190.0), false);
        assert_eq!(hit, CanvasHit::Event(above));
    }

    #[test]
    fn test_hit_test_edges_only_when_asked() {
        let config = CanvasConfig::default();
        let mut timeline = Timeline::default();
        let a = timeline.create_event("A", 0.0, 100.0).unwrap();
        let b = timeline.create_event("B", 800.0, 100.0).unwrap();
        let edge = timeline.add_edge(EdgeType::Hint, a, b).unwrap();

        // Straight horizontal curve at world y = 136 -> screen y = 184
        let on_curve = Point::new(500.0, 186.0);
        assert_eq!(
            hit_test(&timeline, &viewport(), &config, on_curve, true),
            CanvasHit::Edge(edge)
        );
        assert_eq!(
            hit_test(&timeline, &viewport(), &config, on_curve, false),
            CanvasHit::Empty
        );
    }

    #[test]
    fn test_header_is_never_a_hit() {
        let config = CanvasConfig::default();
        let mut timeline = Timeline::default();
        timeline.create_event("Top", 0.0, 0.0).unwrap();

        let hit = hit_test(&timeline, &viewport(), &config, Point::new(20.0, 20.0), true);
        assert_eq!(hit, CanvasHit::Empty);
    }

    #[test]
    fn test_build_canvas_emits_curve_per_edge() {
        let config = CanvasConfig::default();
        let mut timeline = Timeline::default();
        let a = timeline.create_event("A", 0.0, 0.0).unwrap();
        let b = timeline.create_event("B", 400.0, 0.0).unwrap();
        let c = timeline.create_event("C", 800.0, 0.0).unwrap();
        timeline.add_edge(EdgeType::Sequence, a, b).unwrap();
        timeline.add_edge(EdgeType::Foreshadowing, a, c).unwrap();

        let commands = build_canvas(&timeline, &viewport(), &config, &Highlights::default());
        let curves = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Curve { .. }))
            .count();
        assert_eq!(curves, 2);
    }

    #[test]
    fn test_offscreen_events_are_culled() {
        let config = CanvasConfig::default();
        let mut timeline = Timeline::default();
        timeline.create_event("Visible", 100.0, 100.0).unwrap();
        timeline.create_event("Far right", 1900.0, 100.0).unwrap();

        let commands = build_canvas(&timeline, &viewport(), &config, &Highlights::default());
        let titles: Vec<&str> = commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, size, .. } if *size == 14.0 => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(titles, vec!["Visible"]);
    }
}
