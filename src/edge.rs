use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// Kind of narrative link between two events
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EdgeType {
    Sequence,
    Causality,
    Hint,
    Foreshadowing,
}

impl EdgeType {
    pub const ALL: [EdgeType; 4] = [
        EdgeType::Sequence,
        EdgeType::Causality,
        EdgeType::Hint,
        EdgeType::Foreshadowing,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EdgeType::Sequence => "Sequence",
            EdgeType::Causality => "Causality",
            EdgeType::Hint => "Hint",
            EdgeType::Foreshadowing => "Foreshadowing",
        }
    }
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Typed directed relationship between two events
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Edge {
    pub id: Ulid,

    pub edge_type: EdgeType,

    /// Event the edge starts FROM
    pub source: Ulid,

    /// Event the edge points TO
    pub target: Ulid,
}

impl Edge {
    /// Create a new edge
    pub fn new(edge_type: EdgeType, source: Ulid, target: Ulid) -> Self {
        Self {
            id: Ulid::new(),
            edge_type,
            source,
            target,
        }
    }

    /// Check if this edge touches a given event
    pub fn involves(&self, event_id: Ulid) -> bool {
        self.source == event_id || self.target == event_id
    }

    /// Check if this edge starts from a given event
    pub fn starts_from(&self, event_id: Ulid) -> bool {
        self.source == event_id
    }

    /// Check if this edge ends at a given event
    pub fn ends_at(&self, event_id: Ulid) -> bool {
        self.target == event_id
    }

    /// Same type and endpoints, ignoring the id
    pub fn same_link(&self, other: &Edge) -> bool {
        self.edge_type == other.edge_type
            && self.source == other.source
            && self.target == other.target
    }
}
