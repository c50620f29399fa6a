use crate::column::ColumnTemplate;
use crate::config::{CanvasConfig, EVENT_HEIGHT, EVENT_WIDTH, VERTICAL_EXTENT};
use crate::edge::{Edge, EdgeType};
use crate::event::{EventEdit, TimelineEvent};
use crate::geometry::{Point, Size};
use crate::history::{HistoryEntry, TimelineChange};
use crate::resolver::{
    self, BoundaryConflict, BoundaryResolver, Resolution, ResolutionReport, SettingsChange,
    SettingsCheck,
};
use crate::settings::TimelineSettings;
use anyhow::{anyhow, bail, Result};
use log::{debug, info};
use std::collections::HashMap;
use ulid::Ulid;

/// Owner of all timeline state: events, edges and column settings.
///
/// Renderers read it; only the methods below mutate it.
#[derive(Debug, Clone)]
pub struct Timeline {
    /// All events indexed by ID
    events: HashMap<Ulid, TimelineEvent>,

    /// Drawing order, bottom to top
    z_order: Vec<Ulid>,

    /// Typed links between events
    edges: HashMap<Ulid, Edge>,

    settings: TimelineSettings,

    vertical_extent: f32,

    /// Event card size; the visible world extends one card past the bounds
    card: Size,

    /// Bumped on every mutation
    revision: u64,

    /// Committed-change log
    history: Vec<HistoryEntry>,
}

impl Timeline {
    /// Create an empty timeline with the default card size
    pub fn new(settings: TimelineSettings, vertical_extent: f32) -> Result<Self> {
        if !(vertical_extent.is_finite() && vertical_extent > 0.0) {
            bail!("Vertical extent must be a positive number, got {}", vertical_extent);
        }
        Ok(Self::empty(
            settings,
            vertical_extent,
            Size::new(EVENT_WIDTH, EVENT_HEIGHT),
        ))
    }

    /// Create an empty timeline sized by a canvas config
    pub fn from_config(settings: TimelineSettings, config: &CanvasConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::empty(settings, config.vertical_extent, config.event_size()))
    }

    fn empty(settings: TimelineSettings, vertical_extent: f32, card: Size) -> Self {
        Self {
            events: HashMap::new(),
            z_order: Vec::new(),
            edges: HashMap::new(),
            settings,
            vertical_extent,
            card,
            revision: 0,
            history: Vec::new(),
        }
    }

    // ========== Event Operations ==========

    /// Insert an event. Position is clamped into bounds and a stale
    /// `column_id` is replaced by the column under `x`.
    pub fn add_event(&mut self, mut event: TimelineEvent) -> Result<Ulid> {
        if self.events.contains_key(&event.id) {
            bail!("Event already exists: {}", event.id);
        }

        let clamped = self.clamp_to_bounds(event.position());
        event.x = clamped.x;
        event.y = clamped.y;
        if self.settings.column(event.column_id).is_none() {
            event.column_id = self.column_id_for_x(event.x)?;
        }

        let id = event.id;
        self.log_change(TimelineChange::EventCreated {
            id,
            column_id: event.column_id,
            x: event.x,
            y: event.y,
        });
        debug!("event created id={} x={} y={}", id, event.x, event.y);

        self.events.insert(id, event);
        self.z_order.push(id);
        self.revision += 1;
        Ok(id)
    }

    /// Create an event at a world position in the column under `x`
    pub fn create_event(&mut self, title: impl Into<String>, x: f32, y: f32) -> Result<Ulid> {
        let column_id = self.column_id_for_x(x)?;
        self.add_event(TimelineEvent::new(title, column_id, x, y))
    }

    /// Get an event by ID
    pub fn get_event(&self, id: Ulid) -> Option<&TimelineEvent> {
        self.events.get(&id)
    }

    /// Get all events
    pub fn events(&self) -> &HashMap<Ulid, TimelineEvent> {
        &self.events
    }

    /// Events bottom to top
    pub fn events_in_z_order(&self) -> Vec<&TimelineEvent> {
        self.z_order
            .iter()
            .filter_map(|id| self.events.get(id))
            .collect()
    }

    /// Events sorted left to right, then top to bottom
    pub fn events_in_reading_order(&self) -> Vec<&TimelineEvent> {
        let mut events: Vec<&TimelineEvent> = self.events.values().collect();
        events.sort_by(|a, b| {
            a.x.total_cmp(&b.x)
                .then(a.y.total_cmp(&b.y))
                .then(a.id.cmp(&b.id))
        });
        events
    }

    /// Update an event's position during a drag. Not clamped, not logged;
    /// follow with [`Timeline::commit_event_move`].
    pub fn move_event_live(&mut self, id: Ulid, x: f32, y: f32) -> Result<()> {
        let event = self
            .events
            .get_mut(&id)
            .ok_or_else(|| anyhow!("Event not found: {}", id))?;
        event.x = x;
        event.y = y;
        self.revision += 1;
        Ok(())
    }

    /// Clamp the event's current position into bounds and record the move
    /// from `from`. Returns the committed position.
    pub fn commit_event_move(&mut self, id: Ulid, from: Point) -> Result<Point> {
        let current = self
            .events
            .get(&id)
            .ok_or_else(|| anyhow!("Event not found: {}", id))?
            .position();
        let to = self.clamp_to_bounds(current);
        let column_id = self.column_id_for_x(to.x)?;

        if let Some(event) = self.events.get_mut(&id) {
            event.x = to.x;
            event.y = to.y;
            event.column_id = column_id;
        }

        self.revision += 1;
        self.log_change(TimelineChange::EventMoved {
            id,
            from: (from.x, from.y),
            to: (to.x, to.y),
        });
        debug!("event moved id={} to=({}, {})", id, to.x, to.y);
        Ok(to)
    }

    /// Move an event in one step (live update + commit)
    pub fn move_event(&mut self, id: Ulid, x: f32, y: f32) -> Result<Point> {
        let from = self
            .get_event(id)
            .ok_or_else(|| anyhow!("Event not found: {}", id))?
            .position();
        self.move_event_live(id, x, y)?;
        self.commit_event_move(id, from)
    }

    /// Save from the edit surface
    pub fn update_event(&mut self, id: Ulid, edit: EventEdit) -> Result<()> {
        let event = self
            .events
            .get_mut(&id)
            .ok_or_else(|| anyhow!("Event not found: {}", id))?;

        if edit.is_empty() {
            return Ok(());
        }
        event.apply_edit(edit);

        self.revision += 1;
        self.log_change(TimelineChange::EventEdited { id });
        Ok(())
    }

    /// Delete an event and every edge that references it.
    /// Returns the ids of the removed edges.
    pub fn delete_event(&mut self, id: Ulid) -> Result<Vec<Ulid>> {
        if !self.events.contains_key(&id) {
            return Err(anyhow!("Event not found: {}", id));
        }

        let mut cascaded: Vec<Ulid> = self.edges_for_event(id).iter().map(|e| e.id).collect();
        cascaded.sort();

        for edge_id in &cascaded {
            self.edges.remove(edge_id);
        }
        self.events.remove(&id);
        self.z_order.retain(|e| *e != id);

        self.revision += 1;
        self.log_change(TimelineChange::EventDeleted {
            id,
            cascaded_edges: cascaded.clone(),
        });
        debug!("event deleted id={} cascaded_edges={}", id, cascaded.len());
        Ok(cascaded)
    }

    /// Raise an event to the top of the drawing order
    pub fn bring_to_front(&mut self, id: Ulid) -> Result<()> {
        if !self.events.contains_key(&id) {
            return Err(anyhow!("Event not found: {}", id));
        }
        self.z_order.retain(|e| *e != id);
        self.z_order.push(id);
        Ok(())
    }

    // ========== Edge Operations ==========

    /// Create a typed edge between two distinct existing events
    pub fn add_edge(&mut self, edge_type: EdgeType, source: Ulid, target: Ulid) -> Result<Ulid> {
        if !self.events.contains_key(&source) {
            return Err(anyhow!("Source event not found: {}", source));
        }
        if !self.events.contains_key(&target) {
            return Err(anyhow!("Target event not found: {}", target));
        }
        if source == target {
            return Err(anyhow!("Cannot link an event to itself"));
        }

        let edge = Edge::new(edge_type, source, target);
        if self.edges.values().any(|e| e.same_link(&edge)) {
            return Err(anyhow!(
                "{} edge already exists: {} -> {}",
                edge_type,
                source,
                target
            ));
        }

        let id = edge.id;
        self.edges.insert(id, edge);

        self.revision += 1;
        self.log_change(TimelineChange::EdgeCreated {
            id,
            edge_type,
            source,
            target,
        });
        Ok(id)
    }

    /// Get an edge
    pub fn get_edge(&self, id: Ulid) -> Option<&Edge> {
        self.edges.get(&id)
    }

    /// Get all edges
    pub fn edges(&self) -> &HashMap<Ulid, Edge> {
        &self.edges
    }

    /// Edges sorted by id, for stable drawing
    pub fn edges_sorted(&self) -> Vec<&Edge> {
        let mut edges: Vec<&Edge> = self.edges.values().collect();
        edges.sort_by_key(|e| e.id);
        edges
    }

    /// Delete an edge
    pub fn delete_edge(&mut self, id: Ulid) -> Result<()> {
        if self.edges.remove(&id).is_none() {
            return Err(anyhow!("Edge not found: {}", id));
        }

        self.revision += 1;
        self.log_change(TimelineChange::EdgeDeleted { id });
        Ok(())
    }

    /// All edges where the event is source or target
    pub fn edges_for_event(&self, event_id: Ulid) -> Vec<&Edge> {
        self.edges.values().filter(|e| e.involves(event_id)).collect()
    }

    /// Get all edges starting from an event
    pub fn get_outgoing_edges(&self, source: Ulid) -> Vec<&Edge> {
        self.edges
            .values()
            .filter(|e| e.starts_from(source))
            .collect()
    }

    /// Get all edges ending at an event
    pub fn get_incoming_edges(&self, target: Ulid) -> Vec<&Edge> {
        self.edges.values().filter(|e| e.ends_at(target)).collect()
    }

    /// Edges whose endpoints are missing; always empty unless state was
    /// corrupted from outside the mutation API
    pub fn dangling_edges(&self) -> Vec<Ulid> {
        self.edges
            .values()
            .filter(|e| !self.events.contains_key(&e.source) || !self.events.contains_key(&e.target))
            .map(|e| e.id)
            .collect()
    }

    // ========== Settings ==========

    pub fn settings(&self) -> &TimelineSettings {
        &self.settings
    }

    /// Horizontal world extent
    pub fn boundary(&self) -> f32 {
        self.settings.boundary()
    }

    pub fn vertical_extent(&self) -> f32 {
        self.vertical_extent
    }

    /// World size used for pan clamping and the minimap. One card larger
    /// than the bounds, so a card clamped to the boundary stays reachable.
    pub fn content_size(&self) -> Size {
        Size::new(
            self.boundary() + self.card.width,
            self.vertical_extent + self.card.height,
        )
    }

    /// Clamp a world point to `[0, boundary] x [0, vertical_extent]`
    pub fn clamp_to_bounds(&self, p: Point) -> Point {
        let x = if p.x.is_nan() { 0.0 } else { p.x };
        let y = if p.y.is_nan() { 0.0 } else { p.y };
        Point::new(
            x.clamp(0.0, self.boundary()),
            y.clamp(0.0, self.vertical_extent),
        )
    }

    /// Ask for a settings change. Commits immediately unless events would be
    /// stranded, in which case the conflict is returned for resolution and
    /// nothing changes.
    pub fn request_settings_change(
        &mut self,
        proposed: TimelineSettings,
        resolver: &BoundaryResolver,
    ) -> Result<SettingsChange> {
        match resolver.check(self, proposed) {
            SettingsCheck::Clear(settings) => {
                self.commit_settings(settings);
                Ok(SettingsChange::Committed)
            }
            SettingsCheck::Conflict(conflict) => {
                info!(
                    "settings change strands {} event(s) past boundary {}",
                    conflict.out_of_bounds.len(),
                    conflict.new_boundary
                );
                Ok(SettingsChange::NeedsResolution(conflict))
            }
        }
    }

    /// Apply a resolution and the conflict's proposed settings as one step.
    /// `Cancel` leaves everything untouched. A conflict computed against an
    /// older revision is rejected.
    pub fn apply_resolution(
        &mut self,
        conflict: &BoundaryConflict,
        resolution: Resolution,
    ) -> Result<ResolutionReport> {
        if resolution == Resolution::Cancel {
            info!("settings change cancelled");
            return Ok(ResolutionReport::cancelled());
        }
        if conflict.base_revision != self.revision {
            bail!(
                "Timeline changed since the conflict was detected (revision {} != {})",
                conflict.base_revision,
                self.revision
            );
        }

        let mut events = self.events.clone();
        let mut edges = self.edges.clone();
        let report = resolver::apply_to(&mut events, &mut edges, conflict, resolution);

        let mut z_order = self.z_order.clone();
        z_order.retain(|id| events.contains_key(id));

        self.events = events;
        self.edges = edges;
        self.z_order = z_order;
        self.log_change(TimelineChange::BoundaryResolved {
            resolution,
            affected_events: report.affected_events.clone(),
            removed_edges: report.removed_edges.clone(),
        });
        self.commit_settings(conflict.proposed.clone());

        info!(
            "boundary resolved with {:?}: {} event(s), {} edge(s) removed",
            resolution,
            report.affected_events.len(),
            report.removed_edges.len()
        );
        Ok(report)
    }

    /// Relabel columns; positions and boundary are unchanged
    pub fn apply_template(&mut self, template: ColumnTemplate) {
        let settings = self.settings.with_template(template);
        self.commit_settings(settings);
    }

    /// Give one column a custom name; the template becomes `Custom`
    pub fn rename_column(&mut self, position: usize, name: impl Into<String>) -> Result<()> {
        let mut settings = self.settings.clone();
        settings.rename_column(position, name)?;
        self.commit_settings(settings);
        Ok(())
    }

    fn commit_settings(&mut self, settings: TimelineSettings) {
        self.settings = settings;

        let settings = &self.settings;
        for event in self.events.values_mut() {
            if settings.column(event.column_id).is_none() {
                if let Some(column) = settings.column_for_x(event.x) {
                    event.column_id = column.id;
                }
            }
        }

        self.revision += 1;
        self.log_change(TimelineChange::SettingsCommitted {
            column_count: self.settings.column_count(),
            column_width: self.settings.column_width(),
        });
        info!(
            "settings committed: {} columns x {}px",
            self.settings.column_count(),
            self.settings.column_width()
        );
    }

    fn column_id_for_x(&self, x: f32) -> Result<Ulid> {
        self.settings
            .column_for_x(x)
            .map(|c| c.id)
            .ok_or_else(|| anyhow!("Timeline has no columns"))
    }

    // ========== History ==========

    fn log_change(&mut self, change: TimelineChange) {
        self.history.push(HistoryEntry::new(change));
    }

    /// Get all committed changes
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Clear the change log
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Count events
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Count edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::empty(
            TimelineSettings::default(),
            VERTICAL_EXTENT,
            Size::new(EVENT_WIDTH, EVENT_HEIGHT),
        )
    }
}
