use serde::{Deserialize, Serialize};
use ulid::Ulid;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// An ordinal time bucket ("Chapter 3", "Week 2", ...)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeColumn {
    pub id: Ulid,
    pub name: String,
    pub subtitle: String,
    /// Dense, zero-based; equals the column's index in the settings list
    pub position: usize,
}

impl TimeColumn {
    pub fn new(name: impl Into<String>, subtitle: impl Into<String>, position: usize) -> Self {
        Self {
            id: Ulid::new(),
            name: name.into(),
            subtitle: subtitle.into(),
            position,
        }
    }
}

/// Named label scheme used to (re)generate column titles
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColumnTemplate {
    Daily,
    Weekly,
    Monthly,
    #[default]
    Chapter,
    Scene,
    Act,
    Year,
    Custom,
}

impl ColumnTemplate {
    pub const ALL: [ColumnTemplate; 8] = [
        ColumnTemplate::Daily,
        ColumnTemplate::Weekly,
        ColumnTemplate::Monthly,
        ColumnTemplate::Chapter,
        ColumnTemplate::Scene,
        ColumnTemplate::Act,
        ColumnTemplate::Year,
        ColumnTemplate::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnTemplate::Daily => "daily",
            ColumnTemplate::Weekly => "weekly",
            ColumnTemplate::Monthly => "monthly",
            ColumnTemplate::Chapter => "chapter",
            ColumnTemplate::Scene => "scene",
            ColumnTemplate::Act => "act",
            ColumnTemplate::Year => "year",
            ColumnTemplate::Custom => "custom",
        }
    }

    /// Parse a template name, case-insensitive
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(name))
    }

    /// `(name, subtitle)` for the column at `position`
    pub fn label(&self, position: usize) -> (String, String) {
        let n = position + 1;
        match self {
            ColumnTemplate::Daily => (format!("Day {}", n), String::new()),
            ColumnTemplate::Weekly => (format!("Week {}", n), String::new()),
            ColumnTemplate::Monthly => (
                MONTH_NAMES[position % 12].to_string(),
                format!("Year {}", position / 12 + 1),
            ),
            ColumnTemplate::Chapter => (format!("Chapter {}", n), String::new()),
            ColumnTemplate::Scene => (format!("Scene {}", n), String::new()),
            ColumnTemplate::Act => (format!("Act {}", n), String::new()),
            ColumnTemplate::Year => (format!("Year {}", n), String::new()),
            ColumnTemplate::Custom => (format!("Column {}", n), String::new()),
        }
    }

    /// Build a fresh column at `position`
    pub fn column(&self, position: usize) -> TimeColumn {
        let (name, subtitle) = self.label(position);
        TimeColumn::new(name, subtitle, position)
    }
}
