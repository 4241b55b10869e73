//! Trailing-edge debounce by generation counting.
//!
//! Each call to [`Debouncer::schedule`] supersedes the previous ticket; the
//! caller waits out the delay and acts only if its ticket is still current.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket(u64);

#[derive(Debug, Clone, Default)]
pub struct Debouncer {
    generation: Rc<Cell<u64>>,
    delay_ms: u32,
}

impl Debouncer {
    pub fn new(delay_ms: u32) -> Self {
        Self { generation: Rc::new(Cell::new(0)), delay_ms }
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    pub fn schedule(&self) -> DebounceTicket {
        let next = self.generation.get() + 1;
        self.generation.set(next);
        DebounceTicket(next)
    }

    pub fn is_current(&self, ticket: DebounceTicket) -> bool {
        self.generation.get() == ticket.0
    }

    /// Invalidate any pending ticket.
    pub fn cancel(&self) {
        self.schedule();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_ticket_fires() {
        let debounce = Debouncer::new(300);
        let first = debounce.schedule();
        let second = debounce.schedule();
        assert!(!debounce.is_current(first));
        assert!(debounce.is_current(second));
    }

    #[test]
    fn test_clones_share_generation() {
        let debounce = Debouncer::new(300);
        let ticket = debounce.schedule();
        debounce.clone().cancel();
        assert!(!debounce.is_current(ticket));
    }
}
