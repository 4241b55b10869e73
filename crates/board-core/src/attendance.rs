//! Attendance Search
//!
//! One attendance fetch at a time. A new search cancels the previous one and
//! only the newest, uncancelled search may publish rows.

use tokio_util::sync::CancellationToken;

use crate::domain::{AttendanceRecord, DateRange};
use crate::error::ReportResult;
use crate::repository::{KeyValueStore, PreferenceStore};

/// Handle for one issued fetch.
#[derive(Debug, Clone)]
pub struct SearchTicket {
    pub id: u64,
    pub range: DateRange,
    pub token: CancellationToken,
}

#[derive(Debug, Clone)]
pub enum SearchStart {
    /// Cached rows for exactly this range are now shown; nothing to fetch.
    Cached(usize),
    Fetch(SearchTicket),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    Loaded(usize),
    Failed(String),
    /// Superseded or cancelled; nothing changed.
    Ignored,
}

#[derive(Debug, Clone, Default)]
pub struct AttendanceSearch {
    next_id: u64,
    active: Option<SearchTicket>,
    rows: Vec<AttendanceRecord>,
    shown_range: Option<DateRange>,
}

impl AttendanceSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows restored from the cache at startup, if any.
    pub fn restore<S: KeyValueStore>(prefs: &PreferenceStore<S>) -> Self {
        let mut search = Self::default();
        if let Some(cached) = prefs.cached_attendance() {
            search.rows = cached.rows;
            search.shown_range = Some(cached.range);
        }
        search
    }

    pub fn rows(&self) -> &[AttendanceRecord] {
        &self.rows
    }

    pub fn shown_range(&self) -> Option<DateRange> {
        self.shown_range
    }

    pub fn is_loading(&self) -> bool {
        self.active.is_some()
    }

    /// Start a search for `range`. An exact cache hit is shown at once;
    /// otherwise the running fetch is cancelled and a new ticket issued.
    pub fn begin<S: KeyValueStore>(&mut self, range: DateRange, prefs: &PreferenceStore<S>) -> SearchStart {
        self.cancel();
        if let Some(rows) = prefs.cached_attendance_for(&range) {
            log::info!("[ATTEND] Cache hit {} to {}, {} rows", range.from, range.to, rows.len());
            self.rows = rows;
            self.shown_range = Some(range);
            return SearchStart::Cached(self.rows.len());
        }

        self.next_id += 1;
        let ticket = SearchTicket {
            id: self.next_id,
            range,
            token: CancellationToken::new(),
        };
        self.active = Some(ticket.clone());
        SearchStart::Fetch(ticket)
    }

    /// Cancel the running fetch, if any. Safe to call repeatedly.
    pub fn cancel(&mut self) {
        if let Some(ticket) = self.active.take() {
            log::debug!("[ATTEND] Cancelled search {}", ticket.id);
            ticket.token.cancel();
        }
    }

    /// Publish the result of `ticket`'s fetch. Rows are shown and cached
    /// only while the ticket is still the active one.
    pub fn complete<S: KeyValueStore>(
        &mut self,
        ticket: &SearchTicket,
        result: ReportResult<Vec<AttendanceRecord>>,
        prefs: &PreferenceStore<S>,
    ) -> Completion {
        let is_active = self.active.as_ref().is_some_and(|a| a.id == ticket.id);
        if !is_active {
            return Completion::Ignored;
        }
        self.active = None;
        if ticket.token.is_cancelled() {
            log::debug!("[ATTEND] Search {} cancelled mid-fetch", ticket.id);
            return Completion::Ignored;
        }

        match result {
            Ok(rows) => {
                if let Err(e) = prefs.cache_attendance(ticket.range, &rows) {
                    log::warn!("[ATTEND] Could not cache rows: {}", e);
                }
                self.rows = rows;
                self.shown_range = Some(ticket.range);
                Completion::Loaded(self.rows.len())
            }
            Err(e) if e.is_cancelled() => Completion::Ignored,
            Err(e) => {
                log::error!("[ATTEND] Fetch failed: {}", e);
                Completion::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::config::BoardConfig;
    use crate::error::ReportError;
    use crate::repository::MemoryStore;

    fn prefs() -> PreferenceStore<MemoryStore> {
        PreferenceStore::new(MemoryStore::new(), &BoardConfig::default())
    }

    fn day(d: u32) -> DateRange {
        DateRange::single(NaiveDate::from_ymd_opt(2025, 11, d).unwrap())
    }

    fn row(name: &str) -> AttendanceRecord {
        AttendanceRecord { employee_name: name.into(), ..Default::default() }
    }

    fn ticket(start: SearchStart) -> SearchTicket {
        match start {
            SearchStart::Fetch(ticket) => ticket,
            SearchStart::Cached(_) => panic!("expected a fetch"),
        }
    }

    #[test]
    fn test_completion_publishes_and_caches() {
        let prefs = prefs();
        let mut search = AttendanceSearch::new();
        let t = ticket(search.begin(day(3), &prefs));
        assert!(search.is_loading());

        assert_eq!(search.complete(&t, Ok(vec![row("Asha")]), &prefs), Completion::Loaded(1));
        assert!(!search.is_loading());
        assert_eq!(search.rows()[0].employee_name, "Asha");
        assert_eq!(prefs.cached_attendance_for(&day(3)).unwrap().len(), 1);
    }

    #[test]
    fn test_exact_cache_hit_skips_fetch() {
        let prefs = prefs();
        prefs.cache_attendance(day(3), &[row("Asha"), row("Lee")]).unwrap();
        let mut search = AttendanceSearch::new();

        assert!(matches!(search.begin(day(3), &prefs), SearchStart::Cached(2)));
        assert!(matches!(search.begin(day(4), &prefs), SearchStart::Fetch(_)));
    }

    #[test]
    fn test_superseded_search_is_ignored() {
        let prefs = prefs();
        let mut search = AttendanceSearch::new();
        let first = ticket(search.begin(day(3), &prefs));
        let second = ticket(search.begin(day(4), &prefs));
        assert!(first.token.is_cancelled());

        assert_eq!(search.complete(&first, Ok(vec![row("Old")]), &prefs), Completion::Ignored);
        assert!(search.rows().is_empty());
        assert_eq!(prefs.cached_attendance(), None);

        search.complete(&second, Ok(vec![row("New")]), &prefs);
        assert_eq!(search.rows()[0].employee_name, "New");
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let prefs = prefs();
        let mut search = AttendanceSearch::new();
        let t = ticket(search.begin(day(3), &prefs));
        search.cancel();
        search.cancel();
        assert!(t.token.is_cancelled());
        assert!(!search.is_loading());
        assert_eq!(search.complete(&t, Ok(vec![row("Late")]), &prefs), Completion::Ignored);
        assert!(search.rows().is_empty());
    }

    #[test]
    fn test_token_cancelled_mid_fetch_publishes_nothing() {
        let prefs = prefs();
        let mut search = AttendanceSearch::new();
        let t = ticket(search.begin(day(3), &prefs));
        search.complete(&t, Ok(vec![row("Asha")]), &prefs);

        let t = ticket(search.begin(day(4), &prefs));
        t.token.cancel();
        let done = search.complete(&t, Ok(vec![row("Late"), row("Later")]), &prefs);

        assert_eq!(done, Completion::Ignored);
        assert_eq!(search.rows().len(), 1);
        assert_eq!(search.rows()[0].employee_name, "Asha");
        assert_eq!(search.shown_range(), Some(day(3)));
        assert_eq!(prefs.cached_attendance_for(&day(4)), None);
        assert!(!search.is_loading());
    }

    #[test]
    fn test_cancel_after_completion_keeps_rows() {
        let prefs = prefs();
        let mut search = AttendanceSearch::new();
        let t = ticket(search.begin(day(3), &prefs));
        search.complete(&t, Ok(vec![row("Asha")]), &prefs);

        search.cancel();
        assert!(!t.token.is_cancelled());
        assert_eq!(search.rows().len(), 1);
    }

    #[test]
    fn test_failure_keeps_previous_rows() {
        let prefs = prefs();
        let mut search = AttendanceSearch::new();
        let t = ticket(search.begin(day(3), &prefs));
        search.complete(&t, Ok(vec![row("Asha")]), &prefs);

        let t = ticket(search.begin(day(5), &prefs));
        let done = search.complete(&t, Err(ReportError::NoResults), &prefs);
        assert_eq!(done, Completion::Failed("API returned no results".into()));
        assert_eq!(search.rows().len(), 1);
        assert_eq!(search.shown_range(), Some(day(3)));
    }

    #[test]
    fn test_restore_from_cache() {
        let prefs = prefs();
        prefs.cache_attendance(day(7), &[row("Asha")]).unwrap();
        let search = AttendanceSearch::restore(&prefs);
        assert_eq!(search.rows().len(), 1);
        assert_eq!(search.shown_range(), Some(day(7)));
    }
}
