//! Bookmarks
//!
//! Per-issue tri-state marker, independent of workflow status.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Bookmark marker. Persisted as 0/1/2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum BookmarkState {
    #[default]
    None,
    /// Yellow flag.
    Flagged,
    /// Red flag.
    Starred,
}

impl BookmarkState {
    /// None -> Flagged -> Starred -> None.
    pub fn next(self) -> Self {
        match self {
            BookmarkState::None => BookmarkState::Flagged,
            BookmarkState::Flagged => BookmarkState::Starred,
            BookmarkState::Starred => BookmarkState::None,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            BookmarkState::None => "bookmark-none",
            BookmarkState::Flagged => "bookmark-flagged",
            BookmarkState::Starred => "bookmark-starred",
        }
    }
}

impl From<BookmarkState> for u8 {
    fn from(state: BookmarkState) -> u8 {
        match state {
            BookmarkState::None => 0,
            BookmarkState::Flagged => 1,
            BookmarkState::Starred => 2,
        }
    }
}

impl TryFrom<u8> for BookmarkState {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(BookmarkState::None),
            1 => Ok(BookmarkState::Flagged),
            2 => Ok(BookmarkState::Starred),
            other => Err(format!("invalid bookmark state {}", other)),
        }
    }
}

/// Bookmark filter: everything, or only one marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BookmarkFilter {
    #[default]
    All,
    Only(BookmarkState),
}

impl BookmarkFilter {
    /// All -> Flagged -> Starred -> All.
    pub fn next(self) -> Self {
        match self {
            BookmarkFilter::All => BookmarkFilter::Only(BookmarkState::Flagged),
            BookmarkFilter::Only(BookmarkState::Flagged) => BookmarkFilter::Only(BookmarkState::Starred),
            BookmarkFilter::Only(_) => BookmarkFilter::All,
        }
    }

    pub fn matches(self, state: BookmarkState) -> bool {
        match self {
            BookmarkFilter::All => true,
            BookmarkFilter::Only(wanted) => wanted == state,
        }
    }

    pub fn is_active(self) -> bool {
        self != BookmarkFilter::All
    }
}

/// Bookmarks keyed by issue id. Unmarked issues have no entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bookmarks(BTreeMap<String, BookmarkState>);

impl Bookmarks {
    pub fn get(&self, issue_id: &str) -> BookmarkState {
        self.0.get(issue_id).copied().unwrap_or_default()
    }

    pub fn set(&mut self, issue_id: &str, state: BookmarkState) {
        if state == BookmarkState::None {
            self.0.remove(issue_id);
        } else {
            self.0.insert(issue_id.to_string(), state);
        }
    }

    /// Advance the marker for `issue_id` and return the new state.
    pub fn cycle(&mut self, issue_id: &str) -> BookmarkState {
        let next = self.get(issue_id).next();
        self.set(issue_id, next);
        next
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_wraps_and_removes_entry() {
        let mut marks = Bookmarks::default();
        assert_eq!(marks.cycle("DAP-1"), BookmarkState::Flagged);
        assert_eq!(marks.cycle("DAP-1"), BookmarkState::Starred);
        assert_eq!(marks.cycle("DAP-1"), BookmarkState::None);
        assert!(marks.is_empty());
    }

    #[test]
    fn test_serialized_as_numbers() {
        let mut marks = Bookmarks::default();
        marks.set("DAP-1", BookmarkState::Starred);
        assert_eq!(serde_json::to_string(&marks).unwrap(), r#"{"DAP-1":2}"#);

        let parsed: Bookmarks = serde_json::from_str(r#"{"A":1,"B":2}"#).unwrap();
        assert_eq!(parsed.get("A"), BookmarkState::Flagged);
        assert_eq!(parsed.get("missing"), BookmarkState::None);
    }

    #[test]
    fn test_filter_cycle_and_match() {
        let filter = BookmarkFilter::All.next();
        assert!(filter.matches(BookmarkState::Flagged));
        assert!(!filter.matches(BookmarkState::None));
        assert_eq!(filter.next().next(), BookmarkFilter::All);
        assert!(BookmarkFilter::All.matches(BookmarkState::Starred));
    }
}
