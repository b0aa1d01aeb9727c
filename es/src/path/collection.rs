//! Most-recent-first collection of generated paths with a search filter

use std::collections::VecDeque;

use tracing::debug;

use super::schema::LearningPath;

/// Generated learning paths plus the transient search term
///
/// Paths are only ever prepended. The search term never mutates the
/// collection; it only narrows what [`PathCollection::visible_paths`] returns.
#[derive(Debug, Clone, Default)]
pub struct PathCollection {
    paths: VecDeque<LearningPath>,
    search_term: String,
}

impl PathCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a path; duplicates by topic are kept
    pub fn record_path(&mut self, path: LearningPath) {
        debug!(topic = %path.topic, total = self.paths.len() + 1, "record_path: called");
        self.paths.push_front(path);
    }

    /// Replace the search term verbatim (no trimming)
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Paths whose topic contains the search term, ignoring case, newest first
    pub fn visible_paths(&self) -> Vec<&LearningPath> {
        let needle = self.search_term.to_lowercase();
        self.paths.iter().filter(|p| p.topic_contains(&needle)).collect()
    }

    /// Every recorded path, newest first
    pub fn paths(&self) -> impl Iterator<Item = &LearningPath> {
        self.paths.iter()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Message for an empty visible list, distinguishing "nothing yet" from "nothing matches"
    pub fn empty_state(&self) -> Option<&'static str> {
        if self.paths.is_empty() {
            Some("Start by generating a roadmap above.")
        } else if self.visible_paths().is_empty() {
            Some("No paths found matching your search.")
        } else {
            None
        }
    }
}
