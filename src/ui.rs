use crate::{
    drop_target::{handle_drop, DropPayload},
    geometry::{Point, Size, Vec2},
    interaction::{ConnectionMode, InteractionContext, InteractionController, InteractionOutcome},
    render::{
        build_canvas, DrawCommand, MinimapLayout, ScrollbarLayout, StrokePattern, StrokeStyle,
        TextAnchor,
    },
    resolver::{BoundaryConflict, BoundaryResolver, Resolution, SettingsChange},
    search::EventSearch,
    viewport::PanSource,
    CanvasConfig, Color, ColumnTemplate, EventEdit, SurfaceLayout, Timeline, TimelineSettings,
    ViewportSync,
};
use egui::{
    epaint::{CubicBezierShape, PathShape},
    pos2, vec2, Align2, Color32, FontId, Pos2, Rect, Response, Sense, Shape, Stroke,
};
use log::{debug, info, warn};
use std::time::Instant;
use ulid::Ulid;

const CURVE_SEGMENTS: usize = 32;
const ARROW_SIZE: f32 = 9.0;

/// Main application state
pub struct TimelineApp {
    /// The timeline being edited
    timeline: Timeline,

    /// Shared pan state for canvas, minimap and scrollbar
    sync: ViewportSync,

    /// Pointer gesture state machine
    controller: InteractionController,

    config: CanvasConfig,

    resolver: BoundaryResolver,

    /// Overlay placement from the last frame
    layout: SurfaceLayout,

    search: EventSearch,
    search_text: String,

    /// Settings change waiting for the user to pick a resolution
    pending_conflict: Option<BoundaryConflict>,

    settings_form: SettingsForm,

    /// Event open in the edit panel
    editor: Option<EventEditor>,

    /// Notes available for dragging onto the canvas
    notes: Vec<DropPayload>,

    /// Status message
    status_message: String,
}

struct SettingsForm {
    column_count: usize,
    column_width: f32,
    template: ColumnTemplate,
    /// 1-based column picked for renaming
    rename_column: usize,
    rename_text: String,
}

impl SettingsForm {
    fn from_settings(settings: &TimelineSettings) -> Self {
        Self {
            column_count: settings.column_count(),
            column_width: settings.column_width(),
            template: settings.template(),
            rename_column: 1,
            rename_text: String::new(),
        }
    }
}

struct EventEditor {
    id: Ulid,
    title: String,
    description: String,
    color: [u8; 3],
    linked_note_ids: Vec<String>,
}

impl Default for TimelineApp {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl TimelineApp {
    pub fn new(config: CanvasConfig) -> Self {
        let timeline = Timeline::from_config(TimelineSettings::default(), &config)
            .unwrap_or_else(|e| {
                warn!("invalid canvas config, using defaults: {:#}", e);
                Timeline::default()
            });
        let canvas = Size::new(1280.0, 720.0);

        Self {
            settings_form: SettingsForm::from_settings(timeline.settings()),
            timeline,
            sync: ViewportSync::from_config(canvas, &config),
            controller: InteractionController::new(),
            resolver: BoundaryResolver::new(config.out_of_bounds_margin),
            layout: SurfaceLayout::for_canvas(canvas, &config),
            config,
            search: EventSearch::new(),
            search_text: String::new(),
            pending_conflict: None,
            editor: None,
            notes: sample_notes(),
            status_message: "Drag notes onto the timeline, or add an event".to_string(),
        }
    }

    /// Start from an existing timeline
    pub fn with_timeline(config: CanvasConfig, timeline: Timeline) -> Self {
        let mut app = Self::new(config);
        app.settings_form = SettingsForm::from_settings(timeline.settings());
        app.timeline = timeline;
        app
    }

    fn render_ui(&mut self, ctx: &egui::Context) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.controller.set_connection_mode(ConnectionMode::None);
            self.editor = None;
        }

        // Toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                for mode in ConnectionMode::ALL {
                    let active = self.controller.connection_mode() == mode;
                    if ui.selectable_label(active, mode.label()).clicked() {
                        self.controller.toggle_connection_mode(mode);
                        self.status_message = match self.controller.connection_mode() {
                            ConnectionMode::None => "Drag events to move them".to_string(),
                            ConnectionMode::Delete => "Click an edge to delete it".to_string(),
                            mode => format!("{}: pick the source event", mode.label()),
                        };
                    }
                }

                ui.separator();

                if ui.button("➕ Add event").clicked() {
                    self.add_event_at_center();
                }

                ui.separator();

                let search = ui.add(
                    egui::TextEdit::singleline(&mut self.search_text)
                        .hint_text("Search events")
                        .desired_width(160.0),
                );
                if search.changed() {
                    if let Err(e) = self.search.set_query(&self.search_text, &self.timeline) {
                        self.status_message = format!("❌ {}", e);
                    }
                }
                let enter = search.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("◀").clicked() {
                    self.search
                        .previous(&self.timeline, &mut self.sync, &self.config);
                }
                if ui.button("▶").clicked() || enter {
                    self.search.next(&self.timeline, &mut self.sync, &self.config);
                }
                if !self.search.matches().is_empty() {
                    ui.label(format!("{} match(es)", self.search.matches().len()));
                }

                ui.separator();

                // Stats
                ui.label(format!("Events: {}", self.timeline.event_count()));
                ui.label(format!("Edges: {}", self.timeline.edge_count()));
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.status_message);
            });
        });

        // Left panel (notes)
        egui::SidePanel::left("notes_panel")
            .default_width(200.0)
            .show(ctx, |ui| {
                self.render_notes_panel(ui);
            });

        // Right panel (settings + editor)
        egui::SidePanel::right("properties_panel")
            .default_width(280.0)
            .show(ctx, |ui| {
                self.render_settings_panel(ui);
                ui.separator();
                self.render_editor_panel(ui);
            });

        // Central panel (canvas)
        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_canvas(ui);
        });

        self.render_conflict_dialog(ctx);
    }

    fn render_notes_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Notes");
        ui.label("Drag a note onto a column");
        ui.separator();

        for note in &self.notes {
            let payload = match serde_json::to_value(note) {
                Ok(value) => value,
                Err(e) => {
                    debug!("note {} not draggable: {}", note.id, e);
                    continue;
                }
            };
            ui.dnd_drag_source(egui::Id::new(("note", &note.id)), payload, |ui| {
                ui.group(|ui| {
                    ui.strong(&note.title);
                    if !note.summary.is_empty() {
                        ui.small(&note.summary);
                    }
                });
            });
        }
    }

    fn render_settings_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Columns");

        ui.add(egui::Slider::new(&mut self.settings_form.column_count, 1..=50).text("Count"));
        ui.add(egui::Slider::new(&mut self.settings_form.column_width, 100.0..=400.0).text("Width"));
        egui::ComboBox::from_label("Template")
            .selected_text(self.settings_form.template.as_str())
            .show_ui(ui, |ui| {
                for template in ColumnTemplate::ALL {
                    ui.selectable_value(&mut self.settings_form.template, template, template.as_str());
                }
            });

        ui.horizontal(|ui| {
            let enabled = self.pending_conflict.is_none();
            if ui.add_enabled(enabled, egui::Button::new("Apply")).clicked() {
                self.apply_settings_form();
            }
            if ui.button("Reset").clicked() {
                self.settings_form = SettingsForm::from_settings(self.timeline.settings());
            }
        });

        ui.separator();
        let count = self.timeline.settings().column_count();
        ui.horizontal(|ui| {
            ui.label("Rename column");
            ui.add(egui::DragValue::new(&mut self.settings_form.rename_column).range(1..=count));
        });
        ui.text_edit_singleline(&mut self.settings_form.rename_text);
        let name = self.settings_form.rename_text.trim().to_string();
        if ui.add_enabled(!name.is_empty(), egui::Button::new("Rename")).clicked() {
            let position = self.settings_form.rename_column.saturating_sub(1);
            match self.timeline.rename_column(position, name) {
                Ok(()) => {
                    self.settings_form.template = self.timeline.settings().template();
                    self.settings_form.rename_text.clear();
                    self.status_message = format!("✓ Column {} renamed", position + 1);
                }
                Err(e) => self.status_message = format!("❌ {}", e),
            }
        }
    }

    fn render_editor_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Event");

        let Some(editor) = self.editor.as_mut() else {
            ui.label("Click an event to edit it");
            return;
        };

        ui.label("Title");
        ui.text_edit_singleline(&mut editor.title);
        ui.label("Description");
        ui.text_edit_multiline(&mut editor.description);
        ui.horizontal(|ui| {
            ui.label("Color");
            ui.color_edit_button_srgb(&mut editor.color);
        });
        if !editor.linked_note_ids.is_empty() {
            ui.label(format!("Linked notes: {}", editor.linked_note_ids.join(", ")));
        }
        ui.label(format!(
            "Connections: {}",
            self.timeline.edges_for_event(editor.id).len()
        ));

        let id = editor.id;
        let mut save = false;
        let mut delete = false;
        let mut copy = false;
        ui.horizontal(|ui| {
            save = ui.button("💾 Save").clicked();
            delete = ui.button("🗑 Delete").clicked();
            copy = ui.button("📋 Copy ID").clicked();
        });

        if save {
            self.save_editor();
        } else if delete {
            self.delete_event(id);
        } else if copy {
            let text = id.to_string();
            self.status_message = match copy_to_clipboard(&text) {
                Ok(()) => format!("✓ Copied event ID: {}", text),
                Err(e) => format!("❌ Failed to copy: {}", e),
            };
        }
    }

    fn render_conflict_dialog(&mut self, ctx: &egui::Context) {
        let Some(conflict) = self.pending_conflict.clone() else {
            return;
        };

        let mut choice = None;
        egui::Window::new("Events outside the new boundary")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(format!(
                    "{} event(s) sit past x = {:.0} and would fall outside the timeline.",
                    conflict.out_of_bounds.len(),
                    conflict.limit_x
                ));
                for id in conflict.out_of_bounds.iter().take(8) {
                    if let Some(event) = self.timeline.get_event(*id) {
                        ui.label(format!("• {} (x = {:.0})", event.title, event.x));
                    }
                }
                ui.separator();
                ui.horizontal(|ui| {
                    for resolution in Resolution::ALL {
                        if ui.button(resolution.label()).clicked() {
                            choice = Some(resolution);
                        }
                    }
                });
            });

        if let Some(resolution) = choice {
            self.pending_conflict = None;
            self.resolve_conflict(&conflict, resolution);
        }
    }

    fn render_canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let canvas_rect = response.rect;

        let dimensions = Size::new(canvas_rect.width(), canvas_rect.height());
        let content = self.timeline.content_size();
        self.sync.set_dimensions(dimensions, content);
        // Content may have shrunk since the last frame
        let pan = self.sync.pan();
        self.sync.write_pan(PanSource::Programmatic, pan, content);
        self.layout = SurfaceLayout::for_canvas(dimensions, &self.config);

        if self.pending_conflict.is_none() {
            let outcomes = self.route_pointer(ui, &response, canvas_rect);
            for outcome in outcomes {
                self.handle_outcome(ui.ctx(), outcome);
            }
            self.accept_drop(&response, canvas_rect);
        }

        let hovered_edge = response.hover_pos().and_then(|p| {
            self.controller.hovered_edge(
                &self.timeline,
                &self.sync,
                &self.config,
                to_local(canvas_rect, p),
            )
        });

        let mut highlights = self.controller.highlights();
        self.search.decorate(&mut highlights);
        highlights.hovered_edge = hovered_edge;

        let viewport = *self.sync.viewport();
        let content = self.timeline.content_size();
        let mut commands = build_canvas(&self.timeline, &viewport, &self.config, &highlights);
        commands.extend(
            ScrollbarLayout::new(
                self.layout.scrollbar,
                content,
                &viewport,
                self.config.scrollbar_min_thumb,
            )
            .build(),
        );
        commands.extend(MinimapLayout::new(self.layout.minimap, content).build(
            &self.timeline,
            &viewport,
            &self.config,
            &highlights,
        ));

        paint_commands(&painter, canvas_rect.min, &commands);
    }

    /// Feed this frame's pointer input to the controller
    fn route_pointer(
        &mut self,
        ui: &egui::Ui,
        response: &Response,
        canvas_rect: Rect,
    ) -> Vec<InteractionOutcome> {
        let (pressed, released, down, moving, latest) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.primary_down(),
                i.pointer.is_moving(),
                i.pointer.latest_pos(),
            )
        });

        let layout = self.layout;
        let content = self.timeline.content_size();
        let mut ctx = InteractionContext {
            timeline: &mut self.timeline,
            sync: &mut self.sync,
            config: &self.config,
            layout: &layout,
        };
        let mut outcomes = Vec::new();

        if pressed {
            if let Some(pos) = latest.filter(|p| canvas_rect.contains(*p)) {
                outcomes.push(self.controller.pointer_down(&mut ctx, to_local(canvas_rect, pos)));
            }
        }

        if self.controller.state().is_gesture() {
            if let Some(pos) = latest.filter(|_| moving) {
                outcomes.push(self.controller.pointer_move(&mut ctx, to_local(canvas_rect, pos)));
            }
            if released {
                match latest {
                    Some(pos) => {
                        outcomes.push(self.controller.pointer_up(&mut ctx, to_local(canvas_rect, pos)))
                    }
                    None => outcomes.push(self.controller.cancel(&mut ctx)),
                }
            } else if !down {
                // Release happened somewhere we never saw
                outcomes.push(self.controller.cancel(&mut ctx));
            }
        }

        // Wheel scrolling is the canvas's own pan listener
        if response.hovered() && !self.controller.state().is_gesture() {
            let delta = ui.input(|i| i.smooth_scroll_delta);
            if delta != egui::Vec2::ZERO {
                let pan = ctx.sync.pan();
                if ctx
                    .sync
                    .report_canvas_pan(Vec2::new(pan.x + delta.x, pan.y + delta.y), content)
                {
                    outcomes.push(InteractionOutcome::Panned);
                }
            }
        }

        outcomes
    }

    fn handle_outcome(&mut self, ctx: &egui::Context, outcome: InteractionOutcome) {
        match outcome {
            InteractionOutcome::None | InteractionOutcome::EventDragged(_) => {}
            InteractionOutcome::Panned => {
                ctx.request_repaint_after(self.config.pan_debounce());
            }
            InteractionOutcome::EventMoved { id, position } => {
                self.search.refresh(&self.timeline);
                if let Some(event) = self.timeline.get_event(id) {
                    self.status_message =
                        format!("Moved '{}' to ({:.0}, {:.0})", event.title, position.x, position.y);
                }
            }
            InteractionOutcome::OpenEditor(id) => self.open_editor(id),
            InteractionOutcome::FirstSelected(id) => {
                if let Some(event) = self.timeline.get_event(id) {
                    self.status_message = format!("From '{}': now pick the target event", event.title);
                }
            }
            InteractionOutcome::EdgeCreated(id) => {
                if let Some(edge) = self.timeline.get_edge(id) {
                    self.status_message = format!("✓ {} edge created", edge.edge_type);
                }
            }
            InteractionOutcome::EdgeDeleted(_) => {
                self.status_message = "✓ Edge deleted".to_string();
            }
            InteractionOutcome::EdgeRejected(reason) => {
                self.status_message = format!("❌ {}", reason);
            }
        }
    }

    fn accept_drop(&mut self, response: &Response, canvas_rect: Rect) {
        let Some(payload) = response.dnd_release_payload::<serde_json::Value>() else {
            return;
        };
        let Some(pos) = response.hover_pos() else {
            return;
        };
        let viewport = *self.sync.viewport();
        if let Some(id) = handle_drop(
            &mut self.timeline,
            &viewport,
            to_local(canvas_rect, pos),
            (*payload).clone(),
        ) {
            self.search.refresh(&self.timeline);
            self.status_message = "✓ Note added to the timeline".to_string();
            self.open_editor(id);
        }
    }

    fn add_event_at_center(&mut self) {
        let visible = self.sync.viewport().visible_world_rect();
        let card = self.config.event_size();
        let center = visible.center();
        let x = center.x - card.width * 0.5;
        let y = center.y - card.height * 0.5;
        match self.timeline.create_event("New event", x, y) {
            Ok(id) => {
                self.search.refresh(&self.timeline);
                self.open_editor(id);
            }
            Err(e) => self.status_message = format!("❌ Error: {}", e),
        }
    }

    fn apply_settings_form(&mut self) {
        let form = &self.settings_form;
        let current = self.timeline.settings();
        let mut proposed = match current.resized(form.column_count, form.column_width) {
            Ok(settings) => settings,
            Err(e) => {
                self.status_message = format!("❌ {}", e);
                return;
            }
        };
        if form.template != current.template() {
            proposed = proposed.with_template(form.template);
        }

        match self
            .timeline
            .request_settings_change(proposed, &self.resolver)
        {
            Ok(SettingsChange::Committed) => {
                self.status_message = "✓ Column settings applied".to_string();
            }
            Ok(SettingsChange::NeedsResolution(conflict)) => {
                self.status_message = format!(
                    "{} event(s) need a decision before the change applies",
                    conflict.out_of_bounds.len()
                );
                self.pending_conflict = Some(conflict);
            }
            Err(e) => self.status_message = format!("❌ {}", e),
        }
    }

    fn resolve_conflict(&mut self, conflict: &BoundaryConflict, resolution: Resolution) {
        match self.timeline.apply_resolution(conflict, resolution) {
            Ok(report) => {
                self.status_message = if report.committed {
                    format!(
                        "✓ {}: {} event(s), {} edge(s) removed",
                        resolution,
                        report.affected_events.len(),
                        report.removed_edges.len()
                    )
                } else {
                    "Column change cancelled".to_string()
                };
            }
            Err(e) => self.status_message = format!("❌ {}", e),
        }

        self.settings_form = SettingsForm::from_settings(self.timeline.settings());
        self.after_removals();
    }

    fn open_editor(&mut self, id: Ulid) {
        if let Some(event) = self.timeline.get_event(id) {
            self.editor = Some(EventEditor {
                id,
                title: event.title.clone(),
                description: event.description.clone(),
                color: [event.color.r, event.color.g, event.color.b],
                linked_note_ids: event.linked_note_ids.clone(),
            });
        }
    }

    fn save_editor(&mut self) {
        let Some(editor) = &self.editor else {
            return;
        };
        let [r, g, b] = editor.color;
        let edit = EventEdit {
            title: Some(editor.title.clone()),
            description: Some(editor.description.clone()),
            color: Some(Color::rgb(r, g, b)),
            linked_note_ids: Some(editor.linked_note_ids.clone()),
        };
        match self.timeline.update_event(editor.id, edit) {
            Ok(()) => {
                self.search.refresh(&self.timeline);
                self.status_message = "✓ Event saved".to_string();
            }
            Err(e) => self.status_message = format!("❌ Error: {}", e),
        }
    }

    fn delete_event(&mut self, id: Ulid) {
        match self.timeline.delete_event(id) {
            Ok(removed) => {
                info!("deleted event {} with {} edge(s)", id, removed.len());
                self.status_message = format!("✓ Event deleted ({} edge(s) removed)", removed.len());
            }
            Err(e) => self.status_message = format!("❌ Error: {}", e),
        }
        self.after_removals();
    }

    /// Drop every reference to events that no longer exist
    fn after_removals(&mut self) {
        self.controller.drop_stale_references(&self.timeline);
        self.search.refresh(&self.timeline);
        if let Some(editor) = &self.editor {
            if self.timeline.get_event(editor.id).is_none() {
                self.editor = None;
            }
        }
    }
}

impl eframe::App for TimelineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.render_ui(ctx);

        let now = Instant::now();
        if let Some(pan) = self.sync.poll_settled(now) {
            debug!("pan settled at ({:.0}, {:.0})", pan.x, pan.y);
        }
        if let Some(wait) = self.sync.settle_remaining(now) {
            ctx.request_repaint_after(wait);
        }
        // End of the input tick
        self.sync.tick();
    }
}

fn to_local(canvas_rect: Rect, p: Pos2) -> Point {
    Point::new(p.x - canvas_rect.min.x, p.y - canvas_rect.min.y)
}

fn to_screen(origin: Pos2, p: Point) -> Pos2 {
    pos2(origin.x + p.x, origin.y + p.y)
}

fn color32(c: Color) -> Color32 {
    Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

fn stroke(style: &StrokeStyle) -> Stroke {
    Stroke::new(style.width, color32(style.color))
}

/// Replay draw commands onto an egui painter; `origin` is the canvas
/// surface's top-left corner
fn paint_commands(painter: &egui::Painter, origin: Pos2, commands: &[DrawCommand]) {
    for command in commands {
        match command {
            DrawCommand::Rect {
                rect,
                fill,
                stroke: outline,
                rounding,
            } => {
                let min = to_screen(origin, rect.origin());
                let screen_rect = Rect::from_min_size(min, vec2(rect.width, rect.height));
                painter.rect(
                    screen_rect,
                    *rounding,
                    fill.map_or(Color32::TRANSPARENT, color32),
                    outline.as_ref().map_or(Stroke::NONE, stroke),
                );
            }
            DrawCommand::Line {
                from,
                to,
                stroke: style,
            } => {
                let points = [to_screen(origin, *from), to_screen(origin, *to)];
                paint_polyline(painter, &points, style);
            }
            DrawCommand::Curve {
                path,
                stroke: style,
                arrow,
                ..
            } => {
                let points = path.points().map(|p| to_screen(origin, p));
                if style.pattern == StrokePattern::Solid {
                    painter.add(CubicBezierShape::from_points_stroke(
                        points,
                        false,
                        Color32::TRANSPARENT,
                        stroke(style),
                    ));
                } else {
                    let flat: Vec<Pos2> = path
                        .flatten(CURVE_SEGMENTS)
                        .into_iter()
                        .map(|p| to_screen(origin, p))
                        .collect();
                    paint_polyline(painter, &flat, style);
                }
                if *arrow {
                    let tip = to_screen(origin, path.end);
                    let tail = to_screen(origin, path.sample(0.95));
                    paint_arrowhead(painter, tail, tip, color32(style.color));
                }
            }
            DrawCommand::Circle {
                center,
                radius,
                fill,
            } => {
                painter.circle_filled(to_screen(origin, *center), *radius, color32(*fill));
            }
            DrawCommand::Text {
                pos,
                text,
                size,
                color,
                anchor,
            } => {
                let align = match anchor {
                    TextAnchor::TopLeft => Align2::LEFT_TOP,
                    TextAnchor::Center => Align2::CENTER_CENTER,
                    TextAnchor::BottomCenter => Align2::CENTER_BOTTOM,
                };
                painter.text(
                    to_screen(origin, *pos),
                    align,
                    text,
                    FontId::proportional(*size),
                    color32(*color),
                );
            }
        }
    }
}

fn paint_polyline(painter: &egui::Painter, points: &[Pos2], style: &StrokeStyle) {
    match style.pattern {
        StrokePattern::Solid => {
            painter.add(Shape::line(points.to_vec(), stroke(style)));
        }
        StrokePattern::Dashed => {
            painter.extend(Shape::dashed_line(points, stroke(style), 8.0, 5.0));
        }
        StrokePattern::Dotted => {
            painter.extend(Shape::dotted_line(
                points,
                color32(style.color),
                6.0,
                style.width * 0.75,
            ));
        }
    }
}

fn paint_arrowhead(painter: &egui::Painter, tail: Pos2, tip: Pos2, color: Color32) {
    let dir = (tip - tail).normalized();
    if !dir.x.is_finite() || !dir.y.is_finite() {
        return;
    }
    let perpendicular = vec2(-dir.y, dir.x);
    let base = tip - dir * ARROW_SIZE;
    let arrow_shape = PathShape::convex_polygon(
        vec![
            tip,
            base + perpendicular * ARROW_SIZE * 0.5,
            base - perpendicular * ARROW_SIZE * 0.5,
        ],
        color,
        Stroke::NONE,
    );
    painter.add(arrow_shape);
}

/// Copy text to clipboard
fn copy_to_clipboard(text: &str) -> Result<(), String> {
    use arboard::Clipboard;
    let mut clipboard = Clipboard::new().map_err(|e| format!("{}", e))?;
    clipboard.set_text(text).map_err(|e| format!("{}", e))?;
    Ok(())
}

fn sample_notes() -> Vec<DropPayload> {
    vec![
        DropPayload::new("note-opening", "Opening image", "scene")
            .with_summary("The town before the flood")
            .with_color(Color::rgb(14, 165, 233)),
        DropPayload::new("note-inciting", "Inciting incident", "beat")
            .with_summary("The dam report goes missing")
            .with_color(Color::rgb(220, 38, 38)),
        DropPayload::new("note-midpoint", "Midpoint reversal", "beat")
            .with_summary("The mayor knew all along"),
        DropPayload::new("note-climax", "Climax", "scene")
            .with_summary("Night of the storm")
            .with_color(Color::rgb(147, 51, 234)),
    ]
}
