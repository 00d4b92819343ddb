//! Last-call-wins sequencing for search streams
//!
//! Each input stream (a search box) owns one [`SearchSequencer`]. Every new
//! query takes a ticket; a result is only shown if its ticket is still the
//! latest when the result arrives.

use std::sync::atomic::{AtomicU64, Ordering};

/// Ticket identifying one request of a search stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SearchTicket(u64);

impl SearchTicket {
    /// Sequence number of the ticket (starts at 1)
    #[must_use]
    pub const fn sequence(self) -> u64 {
        self.0
    }
}

/// Monotonic ticket source for one search stream
#[derive(Debug, Default)]
pub struct SearchSequencer {
    latest: AtomicU64,
}

impl SearchSequencer {
    /// Create a sequencer with no tickets issued
    #[must_use]
    pub const fn new() -> Self {
        Self {
            latest: AtomicU64::new(0),
        }
    }

    /// Issue a new ticket, superseding every earlier one
    pub fn issue(&self) -> SearchTicket {
        SearchTicket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Whether `ticket` is still the most recently issued one
    #[must_use]
    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }

    /// Supersede all outstanding tickets without starting a new request
    pub fn invalidate(&self) {
        self.latest.fetch_add(1, Ordering::AcqRel);
    }
}
