#![forbid(unsafe_code)]

//! Dataset ownership and text filtering.
//!
//! [`Dataset`] holds the full ordered collection of [`LogEntry`] values and the
//! currently active [`FilteredView`]. The view is recomputed wholesale on every
//! filter change; there is no incremental diffing against the previous query.
//!
//! # Invariants
//!
//! - The view is always a subsequence of the dataset in dataset order.
//! - `view_len() <= len()`.
//! - An empty query yields the full dataset by identity (no index list).
//!
//! # Usage
//!
//! ```
//! use logsmith_core::{Dataset, LogEntry, LogLevel};
//!
//! let mut data = Dataset::new(vec![
//!     LogEntry::new(0, "t0", LogLevel::Info, "boot"),
//!     LogEntry::new(1, "t1", LogLevel::Error, "disk failed"),
//! ]);
//!
//! assert_eq!(data.set_filter("  ERROR ").len(), 1);
//! assert_eq!(data.view_entry(0).map(|e| e.id), Some(1));
//! assert!(data.set_filter("").is_full());
//! ```

use memchr::memmem;
use tracing::debug_span;

use crate::entry::LogEntry;

/// A normalized filter predicate (trimmed and case-folded).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterQuery(String);

impl FilterQuery {
    /// Normalize raw user text into a query.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    /// The folded query text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the query matches everything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The active ordered subsequence of a [`Dataset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilteredView {
    /// The whole dataset, by identity.
    All {
        /// Number of entries in the dataset.
        len: usize,
    },
    /// Dataset indices that matched, ascending.
    Subset(Vec<usize>),
}

impl FilteredView {
    /// Number of rows in the view.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::All { len } => *len,
            Self::Subset(indices) => indices.len(),
        }
    }

    /// Whether the view has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the view is the unfiltered dataset.
    #[must_use]
    pub fn is_full(&self) -> bool {
        matches!(self, Self::All { .. })
    }

    /// Map a view row to its dataset index.
    #[must_use]
    pub fn dataset_index(&self, row: usize) -> Option<usize> {
        match self {
            Self::All { len } => (row < *len).then_some(row),
            Self::Subset(indices) => indices.get(row).copied(),
        }
    }

    /// Iterate dataset indices in view order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        let (range, subset) = match self {
            Self::All { len } => (0..*len, None),
            Self::Subset(indices) => (0..0, Some(indices.iter().copied())),
        };
        range.chain(subset.into_iter().flatten())
    }
}

/// Ordered, immutable collection of log entries plus the active filter.
#[derive(Debug, Clone)]
pub struct Dataset {
    entries: Vec<LogEntry>,
    /// Case-folded message text, one per entry, computed at ingestion.
    folded: Vec<Box<str>>,
    query: FilterQuery,
    view: FilteredView,
}

impl Dataset {
    /// Take ownership of `entries`, preserving their order.
    #[must_use]
    pub fn new(entries: Vec<LogEntry>) -> Self {
        let folded = entries
            .iter()
            .map(|entry| entry.message.to_lowercase().into_boxed_str())
            .collect();
        let len = entries.len();
        Self {
            entries,
            folded,
            query: FilterQuery::default(),
            view: FilteredView::All { len },
        }
    }

    /// Total number of entries, ignoring the filter.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dataset holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry by dataset index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&LogEntry> {
        self.entries.get(index)
    }

    /// All entries in dataset order.
    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// The active normalized query.
    #[must_use]
    pub fn query(&self) -> &FilterQuery {
        &self.query
    }

    /// The active filtered view.
    #[must_use]
    pub fn view(&self) -> &FilteredView {
        &self.view
    }

    /// Number of rows in the active view.
    #[must_use]
    pub fn view_len(&self) -> usize {
        self.view.len()
    }

    /// Entry at `row` of the active view.
    #[must_use]
    pub fn view_entry(&self, row: usize) -> Option<&LogEntry> {
        self.view
            .dataset_index(row)
            .and_then(|index| self.entries.get(index))
    }

    /// Replace the active filter.
    ///
    /// The text is trimmed and case-folded. An empty query restores the full
    /// dataset; otherwise the view keeps every entry whose level label or
    /// message contains the query, case-insensitively, in dataset order.
    /// Re-applying the query that is already active keeps the current view.
    ///
    /// Callers reset their scroll position to the top of the new view.
    pub fn set_filter(&mut self, predicate_text: &str) -> &FilteredView {
        let query = FilterQuery::normalize(predicate_text);
        if query == self.query {
            return &self.view;
        }

        let _span = debug_span!(
            "logsmith.filter",
            query = query.as_str(),
            total = self.entries.len()
        )
        .entered();

        self.view = if query.is_empty() {
            FilteredView::All {
                len: self.entries.len(),
            }
        } else {
            FilteredView::Subset(self.matching_indices(&query))
        };
        self.query = query;

        tracing::debug!(matched = self.view.len(), "filter applied");
        &self.view
    }

    fn matching_indices(&self, query: &FilterQuery) -> Vec<usize> {
        let needle = query.as_str();
        let finder = memmem::Finder::new(needle.as_bytes());
        self.entries
            .iter()
            .zip(self.folded.iter())
            .enumerate()
            .filter(|(_, (entry, folded))| {
                entry.level.folded().contains(needle) || finder.find(folded.as_bytes()).is_some()
            })
            .map(|(index, _)| index)
            .collect()
    }
}

impl FromIterator<LogEntry> for Dataset {
    fn from_iter<I: IntoIterator<Item = LogEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::LogLevel;

    fn sample() -> Dataset {
        Dataset::new(vec![
            LogEntry::new(0, "t0", LogLevel::Info, "INFO event #0 user:1"),
            LogEntry::new(1, "t1", LogLevel::Warn, "WARN event #1 user:2"),
            LogEntry::new(2, "t2", LogLevel::Error, "ERROR event #2 user:3"),
            LogEntry::new(3, "t3", LogLevel::Info, "retrying after Error in upstream"),
            LogEntry::new(4, "t4", LogLevel::Warn, "disk almost full"),
        ])
    }

    #[test]
    fn new_dataset_shows_everything() {
        let data = sample();
        assert_eq!(data.len(), 5);
        assert!(data.view().is_full());
        assert_eq!(data.view_len(), 5);
        assert_eq!(data.view_entry(4).map(|e| e.id), Some(4));
        assert!(data.view_entry(5).is_none());
    }

    #[test]
    fn query_normalizes() {
        assert_eq!(FilterQuery::normalize("  ErRoR \t").as_str(), "error");
        assert!(FilterQuery::normalize("   ").is_empty());
    }

    #[test]
    fn filter_matches_level_or_message() {
        let mut data = sample();
        let view = data.set_filter("error");
        assert_eq!(view.indices().collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn filter_matches_message_substring() {
        let mut data = sample();
        let view = data.set_filter("USER:");
        assert_eq!(view.len(), 3);
        let view = data.set_filter("full");
        assert_eq!(view.indices().collect::<Vec<_>>(), vec![4]);
    }

    #[test]
    fn empty_filter_restores_identity_view() {
        let mut data = sample();
        data.set_filter("warn");
        assert_eq!(data.view_len(), 2);
        let view = data.set_filter("  ");
        assert!(view.is_full());
        assert_eq!(view.len(), 5);
    }

    #[test]
    fn no_matches_is_valid() {
        let mut data = sample();
        let view = data.set_filter("nothing matches this");
        assert!(view.is_empty());
        assert!(data.view_entry(0).is_none());
    }

    #[test]
    fn same_query_keeps_view() {
        let mut data = sample();
        let first = data.set_filter("Error").clone();
        let second = data.set_filter("  error").clone();
        assert_eq!(first, second);
        assert_eq!(data.query().as_str(), "error");
    }

    #[test]
    fn view_preserves_dataset_order() {
        let mut data = sample();
        let indices: Vec<_> = data.set_filter("event").indices().collect();
        assert!(indices.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn empty_dataset() {
        let mut data = Dataset::new(Vec::new());
        assert!(data.is_empty());
        assert!(data.set_filter("x").is_empty());
        assert!(data.set_filter("").is_empty());
    }

    #[test]
    fn from_iterator_collects() {
        let data: Dataset = (0..3)
            .map(|i| LogEntry::new(i, "t", LogLevel::Info, format!("m{i}")))
            .collect();
        assert_eq!(data.len(), 3);
        assert_eq!(data.get(2).map(|e| e.message.as_str()), Some("m2"));
    }
}
