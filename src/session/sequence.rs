//! Request sequencing for superseding stale async results.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Token identifying one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// Monotonic request counter for one logical query stream.
///
/// Only the most recently issued token is current; closing the sequencer
/// invalidates every token.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
    closed: AtomicBool,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> RequestToken {
        RequestToken(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        !self.closed.load(Ordering::SeqCst) && self.latest.load(Ordering::SeqCst) == token.0
    }

    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_token_is_current() {
        let sequencer = RequestSequencer::new();
        let first = sequencer.issue();
        assert!(sequencer.is_current(first));

        let second = sequencer.issue();
        assert!(!sequencer.is_current(first));
        assert!(sequencer.is_current(second));
        assert!(second.sequence() > first.sequence());
    }

    #[test]
    fn test_close_invalidates_everything() {
        let sequencer = RequestSequencer::new();
        let token = sequencer.issue();
        sequencer.close();

        assert!(sequencer.is_closed());
        assert!(!sequencer.is_current(token));
    }
}
