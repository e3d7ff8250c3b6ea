//! Thread-safe ingest statistics (spec §9 design notes).
//!
//! Each multicast-group task increments its own atomic counters; a single
//! mutex guards only the infrequent "take a summary snapshot" operation, so
//! contention on the hot path is limited to a handful of independent atomics.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::types::LogicalStream;

/// Per-channel packet and error counters, safe to share across ingest tasks.
pub struct IngestStats {
    accepted: [AtomicU64; 6],
    rejected_tr: AtomicU64,
    socket_errors: AtomicU64,
    summary_lock: Mutex<()>,
}

/// A point-in-time snapshot of [`IngestStats`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StatsSnapshot {
    pub accepted: [u64; 6],
    pub rejected_tr: u64,
    pub socket_errors: u64,
}

impl IngestStats {
    pub fn new() -> Self {
        Self {
            accepted: Default::default(),
            rejected_tr: AtomicU64::new(0),
            socket_errors: AtomicU64::new(0),
            summary_lock: Mutex::new(()),
        }
    }

    fn channel_index(stream: LogicalStream) -> usize {
        LogicalStream::ALL.iter().position(|s| *s == stream).expect("LogicalStream::ALL is exhaustive")
    }

    /// Record one accepted, classified packet.
    pub fn record_accepted(&self, stream: LogicalStream) {
        self.accepted[Self::channel_index(stream)].fetch_add(1, Ordering::Relaxed);
    }

    /// Record one packet rejected by the TR-code whitelist.
    pub fn record_rejected_tr(&self) {
        self.rejected_tr.fetch_add(1, Ordering::Relaxed);
    }

    /// Record one socket receive error.
    pub fn record_socket_error(&self) {
        self.socket_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Take a consistent-enough snapshot of all counters. The mutex here
    /// only serializes snapshot readers against each other; it is never held
    /// while incrementing.
    pub fn snapshot(&self) -> StatsSnapshot {
        let _guard = self.summary_lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut accepted = [0u64; 6];
        for (i, counter) in self.accepted.iter().enumerate() {
            accepted[i] = counter.load(Ordering::Relaxed);
        }
        StatsSnapshot {
            accepted,
            rejected_tr: self.rejected_tr.load(Ordering::Relaxed),
            socket_errors: self.socket_errors.load(Ordering::Relaxed),
        }
    }
}

impl Default for IngestStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_per_channel_independently() {
        let stats = IngestStats::new();
        stats.record_accepted(LogicalStream::FuturesStock);
        stats.record_accepted(LogicalStream::FuturesStock);
        stats.record_accepted(LogicalStream::OptionsPutIndex);
        stats.record_rejected_tr();
        stats.record_socket_error();

        let snap = stats.snapshot();
        assert_eq!(snap.accepted[IngestStats::channel_index(LogicalStream::FuturesStock)], 2);
        assert_eq!(snap.accepted[IngestStats::channel_index(LogicalStream::OptionsPutIndex)], 1);
        assert_eq!(snap.rejected_tr, 1);
        assert_eq!(snap.socket_errors, 1);
    }
}
