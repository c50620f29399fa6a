//! Boundary-conflict detection and resolution.
//!
//! A settings change that shrinks the horizontal boundary can strand events
//! past the new edge. [`BoundaryResolver::check`] finds them, and
//! [`crate::Timeline::apply_resolution`] applies one [`Resolution`] to working
//! copies of the collections before swapping them in together with the new
//! settings.

use crate::config::OUT_OF_BOUNDS_MARGIN;
use crate::edge::Edge;
use crate::event::TimelineEvent;
use crate::settings::TimelineSettings;
use crate::timeline::Timeline;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use ulid::Ulid;

/// User-chosen policy for events stranded by a boundary shrink
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    /// Pull stranded events back to the last valid position
    Relocate,
    /// Rescale every event's `x` so the rightmost one fits
    Compress,
    /// Remove stranded events and their edges
    Delete,
    /// Drop the settings change
    Cancel,
}

impl Resolution {
    pub const ALL: [Resolution; 4] = [
        Resolution::Relocate,
        Resolution::Compress,
        Resolution::Delete,
        Resolution::Cancel,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Resolution::Relocate => "Move to last column",
            Resolution::Compress => "Compress all events",
            Resolution::Delete => "Delete out-of-bounds events",
            Resolution::Cancel => "Cancel",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Pending settings change that strands at least one event
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryConflict {
    pub proposed: TimelineSettings,
    pub new_boundary: f32,
    /// `new_boundary - margin`: relocation target and compression extent
    pub limit_x: f32,
    pub out_of_bounds: Vec<Ulid>,
    /// Timeline revision the conflict was computed against
    pub base_revision: u64,
}

/// Outcome of asking for a settings change
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsChange {
    /// Applied immediately; nothing was stranded
    Committed,
    /// Waiting for the user to pick a [`Resolution`]
    NeedsResolution(BoundaryConflict),
}

/// What a resolution did
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionReport {
    pub resolution: Resolution,
    /// Events whose position changed or that were removed
    pub affected_events: Vec<Ulid>,
    pub removed_edges: Vec<Ulid>,
    /// Whether the proposed settings were committed
    pub committed: bool,
}

impl ResolutionReport {
    pub(crate) fn cancelled() -> Self {
        Self {
            resolution: Resolution::Cancel,
            affected_events: Vec::new(),
            removed_edges: Vec::new(),
            committed: false,
        }
    }
}

/// Detects events a prospective settings change would strand
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryResolver {
    margin: f32,
}

impl BoundaryResolver {
    pub fn new(margin: f32) -> Self {
        Self { margin }
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    /// Classify a prospective settings change against the current timeline
    pub fn check(&self, timeline: &Timeline, proposed: TimelineSettings) -> SettingsCheck {
        if !timeline.settings().shrinks_to(&proposed) {
            return SettingsCheck::Clear(proposed);
        }

        let new_boundary = proposed.boundary();
        let out_of_bounds = self.out_of_bounds(timeline.events_in_z_order(), new_boundary);
        if out_of_bounds.is_empty() {
            return SettingsCheck::Clear(proposed);
        }

        SettingsCheck::Conflict(BoundaryConflict {
            limit_x: new_boundary - self.margin,
            new_boundary,
            out_of_bounds,
            proposed,
            base_revision: timeline.revision(),
        })
    }

    /// Ids of events with `x > new_boundary - margin`, in the given order
    pub fn out_of_bounds<'a>(
        &self,
        events: impl IntoIterator<Item = &'a TimelineEvent>,
        new_boundary: f32,
    ) -> Vec<Ulid> {
        let limit = new_boundary - self.margin;
        events
            .into_iter()
            .filter(|e| e.x > limit)
            .map(|e| e.id)
            .collect()
    }
}

impl Default for BoundaryResolver {
    fn default() -> Self {
        Self::new(OUT_OF_BOUNDS_MARGIN)
    }
}

/// Result of [`BoundaryResolver::check`]
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsCheck {
    Clear(TimelineSettings),
    Conflict(BoundaryConflict),
}

/// Apply `resolution` to working copies of the collections. Never called
/// with [`Resolution::Cancel`].
pub(crate) fn apply_to(
    events: &mut HashMap<Ulid, TimelineEvent>,
    edges: &mut HashMap<Ulid, Edge>,
    conflict: &BoundaryConflict,
    resolution: Resolution,
) -> ResolutionReport {
    let mut affected_events = Vec::new();
    let mut removed_edges = Vec::new();

    match resolution {
        Resolution::Relocate => {
            let last_column = conflict.proposed.last_column().map(|c| c.id);
            for id in &conflict.out_of_bounds {
                if let Some(event) = events.get_mut(id) {
                    event.x = conflict.limit_x;
                    if let Some(column_id) = last_column {
                        event.column_id = column_id;
                    }
                    affected_events.push(*id);
                }
            }
        }
        Resolution::Compress => {
            let max_x = events.values().map(|e| e.x).fold(f32::MIN, f32::max);
            // ratio = limit / max_x; the rightmost event must land exactly on the limit
            let (numerator, denominator) = if max_x > 0.0 && max_x.is_finite() {
                (conflict.limit_x, max_x)
            } else {
                (1.0, 1.0)
            };
            let mut ids: Vec<Ulid> = events.keys().copied().collect();
            ids.sort();
            for id in ids {
                if let Some(event) = events.get_mut(&id) {
                    event.x = event.x * numerator / denominator;
                    if let Some(column) = conflict.proposed.column_for_x(event.x) {
                        event.column_id = column.id;
                    }
                    affected_events.push(id);
                }
            }
        }
        Resolution::Delete => {
            for id in &conflict.out_of_bounds {
                if events.remove(id).is_some() {
                    affected_events.push(*id);
                }
            }
            let mut doomed: Vec<Ulid> = edges
                .values()
                .filter(|e| conflict.out_of_bounds.iter().any(|id| e.involves(*id)))
                .map(|e| e.id)
                .collect();
            doomed.sort();
            for id in doomed {
                edges.remove(&id);
                removed_edges.push(id);
            }
        }
        Resolution::Cancel => {}
    }

    ResolutionReport {
        resolution,
        affected_events,
        removed_edges,
        committed: resolution != Resolution::Cancel,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnTemplate;
    use crate::edge::EdgeType;

    fn conflict_for(events: &HashMap<Ulid, TimelineEvent>, count: usize) -> BoundaryConflict {
        let resolver = BoundaryResolver::default();
        let proposed = TimelineSettings::new(count, 200.0, ColumnTemplate::Chapter).unwrap();
        let new_boundary = proposed.boundary();
        let mut ordered: Vec<&TimelineEvent> = events.values().collect();
        ordered.sort_by_key(|e| e.id);
        BoundaryConflict {
            limit_x: new_boundary - resolver.margin(),
            new_boundary,
            out_of_bounds: resolver.out_of_bounds(ordered, new_boundary),
            proposed,
            base_revision: 0,
        }
    }

    fn events_at(xs: &[f32]) -> HashMap<Ulid, TimelineEvent> {
        xs.iter()
            .map(|&x| {
                let e = TimelineEvent::new(format!("at {}", x), Ulid::new(), x, 50.0);
                (e.id, e)
            })
            .collect()
    }

    #[test]
    fn test_out_of_bounds_uses_margin() {
        let resolver = BoundaryResolver::default();
        let events = events_at(&[100.0, 1500.0, 1500.5, 1800.0]);
        let flagged = resolver.out_of_bounds(events.values(), 1600.0);

        assert_eq!(flagged.len(), 2);
        for id in flagged {
            assert!(events[&id].x > 1500.0);
        }
    }

    #[test]
    fn test_compress_guards_zero_max() {
        let mut events = events_at(&[0.0, 0.0]);
        let mut edges = HashMap::new();
        let mut conflict = conflict_for(&events, 8);
        conflict.out_of_bounds = events.keys().copied().collect();

        let report = apply_to(&mut events, &mut edges, &conflict, Resolution::Compress);
        assert!(report.committed);
        assert!(events.values().all(|e| e.x == 0.0));
    }

    #[test]
    fn test_delete_only_removes_incident_edges() {
        let mut events = events_at(&[100.0, 300.0, 1800.0]);
        let mut ids: Vec<Ulid> = events.keys().copied().collect();
        ids.sort_by(|a, b| events[a].x.total_cmp(&events[b].x));
        let (a, b, far) = (ids[0], ids[1], ids[2]);

        let keep = Edge::new(EdgeType::Sequence, a, b);
        let drop_out = Edge::new(EdgeType::Causality, b, far);
        let drop_in = Edge::new(EdgeType::Hint, far, a);
        let mut edges: HashMap<Ulid, Edge> = [keep.clone(), drop_out.clone(), drop_in.clone()]
            .into_iter()
            .map(|e| (e.id, e))
            .collect();

        let conflict = conflict_for(&events, 8);
        let report = apply_to(&mut events, &mut edges, &conflict, Resolution::Delete);

        assert_eq!(report.affected_events, vec![far]);
        assert_eq!(edges.len(), 1);
        assert!(edges.contains_key(&keep.id));
        assert_eq!(report.removed_edges.len(), 2);
    }

    #[test]
    fn test_resolution_serde() {
        let json = serde_json::to_string(&Resolution::Relocate).unwrap();
        assert_eq!(json, "\"relocate\"");
    }
}
