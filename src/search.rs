use crate::config::CanvasConfig;
use crate::render::Highlights;
use crate::timeline::Timeline;
use crate::viewport::ViewportSync;
use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};
use ulid::Ulid;

/// Case-insensitive substring search over event titles and descriptions,
/// with next/previous navigation that re-centers the viewport
#[derive(Debug, Clone, Default)]
pub struct EventSearch {
    query: String,
    matcher: Option<Regex>,
    matches: Vec<Ulid>,
    cursor: Option<usize>,
}

impl EventSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Matching events in reading order
    pub fn matches(&self) -> &[Ulid] {
        &self.matches
    }

    /// Match the viewport was last moved to
    pub fn active(&self) -> Option<Ulid> {
        self.cursor.and_then(|i| self.matches.get(i).copied())
    }

    /// Replace the query and recompute matches. A blank query matches
    /// nothing; otherwise the text is matched as typed, spaces included.
    pub fn set_query(&mut self, query: &str, timeline: &Timeline) -> Result<()> {
        self.query = query.to_string();
        self.matcher = if query.trim().is_empty() {
            None
        } else {
            Some(
                RegexBuilder::new(&regex::escape(query))
                    .case_insensitive(true)
                    .build()
                    .with_context(|| format!("Invalid search query: {}", query))?,
            )
        };
        self.cursor = None;
        self.refresh(timeline);
        Ok(())
    }

    /// Recompute matches after the timeline changed, keeping the active
    /// match when it still matches
    pub fn refresh(&mut self, timeline: &Timeline) {
        let active = self.active();
        self.matches = match &self.matcher {
            Some(matcher) => timeline
                .events_in_reading_order()
                .into_iter()
                .filter(|e| matcher.is_match(&e.title) || matcher.is_match(&e.description))
                .map(|e| e.id)
                .collect(),
            None => Vec::new(),
        };
        self.cursor = active.and_then(|id| self.matches.iter().position(|m| *m == id));
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Advance to the next match (wrapping) and center the viewport on it
    pub fn next(
        &mut self,
        timeline: &Timeline,
        sync: &mut ViewportSync,
        config: &CanvasConfig,
    ) -> Option<Ulid> {
        let len = self.matches.len();
        if len == 0 {
            return None;
        }
        let index = self.cursor.map_or(0, |i| (i + 1) % len);
        self.go_to(index, timeline, sync, config)
    }

    /// Step back to the previous match (wrapping)
    pub fn previous(
        &mut self,
        timeline: &Timeline,
        sync: &mut ViewportSync,
        config: &CanvasConfig,
    ) -> Option<Ulid> {
        let len = self.matches.len();
        if len == 0 {
            return None;
        }
        let index = self.cursor.map_or(len - 1, |i| (i + len - 1) % len);
        self.go_to(index, timeline, sync, config)
    }

    /// Add match decorations to renderer highlights
    pub fn decorate(&self, highlights: &mut Highlights) {
        highlights.search_matches = self.matches.clone();
        highlights.active_match = self.active();
    }

    fn go_to(
        &mut self,
        index: usize,
        timeline: &Timeline,
        sync: &mut ViewportSync,
        config: &CanvasConfig,
    ) -> Option<Ulid> {
        let id = *self.matches.get(index)?;
        let event = timeline.get_event(id)?;
        self.cursor = Some(index);
        sync.navigate_to(event.bounds(config.event_size()).center(), timeline.content_size());
        Some(id)
    }
}
