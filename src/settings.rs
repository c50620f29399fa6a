use crate::column::{ColumnTemplate, TimeColumn};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use ulid::Ulid;

pub const COLUMN_COUNT_RANGE: RangeInclusive<usize> = 1..=50;
pub const COLUMN_WIDTH_RANGE: RangeInclusive<f32> = 100.0..=400.0;

/// Column layout of the timeline.
///
/// Invariant: `columns.len() == column_count` and `columns[i].position == i`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimelineSettings {
    column_count: usize,
    column_width: f32,
    columns: Vec<TimeColumn>,
    template: ColumnTemplate,
}

impl TimelineSettings {
    /// Create settings with freshly generated columns
    pub fn new(column_count: usize, column_width: f32, template: ColumnTemplate) -> Result<Self> {
        check_ranges(column_count, column_width)?;

        Ok(Self {
            column_count,
            column_width,
            columns: (0..column_count).map(|i| template.column(i)).collect(),
            template,
        })
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    pub fn column_width(&self) -> f32 {
        self.column_width
    }

    pub fn columns(&self) -> &[TimeColumn] {
        &self.columns
    }

    pub fn template(&self) -> ColumnTemplate {
        self.template
    }

    /// Horizontal world extent, `column_count * column_width`
    pub fn boundary(&self) -> f32 {
        self.column_count as f32 * self.column_width
    }

    pub fn column(&self, id: Ulid) -> Option<&TimeColumn> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn last_column(&self) -> Option<&TimeColumn> {
        self.columns.last()
    }

    /// Index of the column containing world `x`, clamped into the valid range
    pub fn column_index_for_x(&self, x: f32) -> usize {
        if !x.is_finite() || x <= 0.0 {
            return 0;
        }
        let index = (x / self.column_width).floor() as usize;
        index.min(self.column_count.saturating_sub(1))
    }

    pub fn column_for_x(&self, x: f32) -> Option<&TimeColumn> {
        self.columns.get(self.column_index_for_x(x))
    }

    /// Same columns with a new count and width. Surviving columns keep their
    /// ids and labels; new ones are generated from the current template.
    pub fn resized(&self, column_count: usize, column_width: f32) -> Result<Self> {
        check_ranges(column_count, column_width)?;

        let mut columns: Vec<TimeColumn> =
            self.columns.iter().take(column_count).cloned().collect();
        for position in columns.len()..column_count {
            columns.push(self.template.column(position));
        }

        Ok(Self {
            column_count,
            column_width,
            columns,
            template: self.template,
        })
    }

    /// Regenerate every column label from `template`. Ids, positions and
    /// geometry are kept, so event positions are unaffected.
    pub fn with_template(&self, template: ColumnTemplate) -> Self {
        let columns = self
            .columns
            .iter()
            .map(|c| {
                let (name, subtitle) = template.label(c.position);
                TimeColumn {
                    name,
                    subtitle,
                    ..c.clone()
                }
            })
            .collect();

        Self {
            columns,
            template,
            ..self.clone()
        }
    }

    /// Rename a single column
    pub fn rename_column(&mut self, position: usize, name: impl Into<String>) -> Result<()> {
        let Some(column) = self.columns.get_mut(position) else {
            bail!("Column position out of range: {}", position);
        };
        column.name = name.into();
        self.template = ColumnTemplate::Custom;
        Ok(())
    }

    /// True when `other` has a smaller horizontal boundary
    pub fn shrinks_to(&self, other: &TimelineSettings) -> bool {
        other.boundary() < self.boundary()
    }
}

impl Default for TimelineSettings {
    fn default() -> Self {
        let template = ColumnTemplate::default();
        Self {
            column_count: 10,
            column_width: 200.0,
            columns: (0..10).map(|i| template.column(i)).collect(),
            template,
        }
    }
}

fn check_ranges(column_count: usize, column_width: f32) -> Result<()> {
    if !COLUMN_COUNT_RANGE.contains(&column_count) {
        bail!(
            "Column count must be between {} and {}, got {}",
            COLUMN_COUNT_RANGE.start(),
            COLUMN_COUNT_RANGE.end(),
            column_count
        );
    }
    if !COLUMN_WIDTH_RANGE.contains(&column_width) {
        bail!(
            "Column width must be between {} and {}, got {}",
            COLUMN_WIDTH_RANGE.start(),
            COLUMN_WIDTH_RANGE.end(),
            column_width
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_dense(settings: &TimelineSettings) {
        assert_eq!(settings.columns().len(), settings.column_count());
        for (i, c) in settings.columns().iter().enumerate() {
            assert_eq!(c.position, i);
        }
    }

    #[test]
    fn test_new_settings() {
        let settings = TimelineSettings::new(10, 200.0, ColumnTemplate::Chapter).unwrap();
        assert_eq!(settings.boundary(), 2000.0);
        assert_eq!(settings.columns()[0].name, "Chapter 1");
        assert_dense(&settings);
    }

    #[test]
    fn test_range_checks() {
        assert!(TimelineSettings::new(0, 200.0, ColumnTemplate::Chapter).is_err());
        assert!(TimelineSettings::new(51, 200.0, ColumnTemplate::Chapter).is_err());
        assert!(TimelineSettings::new(5, 99.0, ColumnTemplate::Chapter).is_err());
        assert!(TimelineSettings::new(5, 401.0, ColumnTemplate::Chapter).is_err());
        assert!(TimelineSettings::new(50, 400.0, ColumnTemplate::Chapter).is_ok());
    }

    #[test]
    fn test_resize_keeps_surviving_columns() {
        let settings = TimelineSettings::new(4, 200.0, ColumnTemplate::Act).unwrap();
        let first_id = settings.columns()[0].id;

        let smaller = settings.resized(2, 150.0).unwrap();
        assert_eq!(smaller.columns()[0].id, first_id);
        assert_dense(&smaller);

        let larger = settings.resized(6, 200.0).unwrap();
        assert_eq!(larger.columns()[5].name, "Act 6");
        assert_dense(&larger);
    }

    #[test]
    fn test_with_template_keeps_ids() {
        let settings = TimelineSettings::new(3, 200.0, ColumnTemplate::Chapter).unwrap();
        let relabeled = settings.with_template(ColumnTemplate::Weekly);

        assert_eq!(relabeled.columns()[2].name, "Week 3");
        assert_eq!(relabeled.columns()[2].id, settings.columns()[2].id);
        assert_eq!(relabeled.boundary(), settings.boundary());
    }

    #[test]
    fn test_column_index_for_x() {
        let settings = TimelineSettings::new(10, 200.0, ColumnTemplate::Chapter).unwrap();
        assert_eq!(settings.column_index_for_x(-20.0), 0);
        assert_eq!(settings.column_index_for_x(199.9), 0);
        assert_eq!(settings.column_index_for_x(200.0), 1);
        assert_eq!(settings.column_index_for_x(5000.0), 9);
        assert_eq!(settings.column_index_for_x(f32::NAN), 0);
    }

    #[test]
    fn test_rename_column_switches_to_custom() {
        let mut settings = TimelineSettings::new(3, 200.0, ColumnTemplate::Chapter).unwrap();
        settings.rename_column(1, "Midpoint").unwrap();
        assert_eq!(settings.columns()[1].name, "Midpoint");
        assert_eq!(settings.template(), ColumnTemplate::Custom);
        assert!(settings.rename_column(7, "nope").is_err());
    }
}
