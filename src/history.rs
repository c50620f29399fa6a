use crate::edge::EdgeType;
use crate::resolver::Resolution;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// A committed timeline change with timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub change: TimelineChange,
}

impl HistoryEntry {
    /// Create a new entry with the current timestamp
    pub fn new(change: TimelineChange) -> Self {
        Self {
            timestamp: Utc::now(),
            change,
        }
    }

    /// Create a new entry with a specific timestamp
    pub fn with_timestamp(timestamp: DateTime<Utc>, change: TimelineChange) -> Self {
        Self { timestamp, change }
    }
}

/// Kinds of committed changes. Live drag samples are never recorded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum TimelineChange {
    EventCreated {
        id: Ulid,
        column_id: Ulid,
        x: f32,
        y: f32,
    },

    EventMoved {
        id: Ulid,
        from: (f32, f32),
        to: (f32, f32),
    },

    EventEdited {
        id: Ulid,
    },

    EventDeleted {
        id: Ulid,
        cascaded_edges: Vec<Ulid>,
    },

    EdgeCreated {
        id: Ulid,
        edge_type: EdgeType,
        source: Ulid,
        target: Ulid,
    },

    EdgeDeleted {
        id: Ulid,
    },

    SettingsCommitted {
        column_count: usize,
        column_width: f32,
    },

    BoundaryResolved {
        resolution: Resolution,
        affected_events: Vec<Ulid>,
        removed_edges: Vec<Ulid>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation() {
        let entry = HistoryEntry::new(TimelineChange::EventEdited { id: Ulid::new() });
        assert!(entry.timestamp <= Utc::now());
    }

    #[test]
    fn test_entry_serialization() {
        let entry = HistoryEntry::new(TimelineChange::EdgeCreated {
            id: Ulid::new(),
            edge_type: EdgeType::Causality,
            source: Ulid::new(),
            target: Ulid::new(),
        });

        let json = serde_json::to_string(&entry).unwrap();
        let deserialized: HistoryEntry = serde_json::from_str(&json).unwrap();

        assert_eq!(entry.change, deserialized.change);
        assert_eq!(entry.timestamp, deserialized.timestamp);
    }
}
