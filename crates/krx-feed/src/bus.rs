//! In-process pub/sub bus (spec §5, §6).
//!
//! The reference system fans classified packets out over Redis pub/sub
//! channels so independent consumer processes (archiver, live viewers) can
//! subscribe. Within one process, `tokio::sync::broadcast` gives the same
//! fan-out semantics without a network hop: one producer, any number of
//! subscribers, each receiving every message published after it subscribed.

use krx_core::types::{CaptureEnvelope, LogicalStream};
use tokio::sync::broadcast;

/// Per-channel buffer capacity. Slow subscribers that fall more than this
/// many messages behind will observe a `Lagged` error on their next recv
/// and skip forward — the archiver is the only subscriber in this system
/// and is expected to keep up.
const CHANNEL_CAPACITY: usize = 4096;

/// The six named publish channels (spec §6), one per [`LogicalStream`].
pub struct Bus {
    senders: [broadcast::Sender<CaptureEnvelope>; 6],
}

impl Bus {
    pub fn new() -> Self {
        Self { senders: std::array::from_fn(|_| broadcast::channel(CHANNEL_CAPACITY).0) }
    }

    fn index(stream: LogicalStream) -> usize {
        LogicalStream::ALL.iter().position(|s| *s == stream).expect("LogicalStream::ALL is exhaustive")
    }

    /// Publish an envelope on the given logical stream's channel. Returns the
    /// number of subscribers it was delivered to (0 if none are listening).
    pub fn publish(&self, stream: LogicalStream, envelope: CaptureEnvelope) -> usize {
        self.senders[Self::index(stream)].send(envelope).unwrap_or(0)
    }

    /// Subscribe to a logical stream's channel.
    pub fn subscribe(&self, stream: LogicalStream) -> broadcast::Receiver<CaptureEnvelope> {
        self.senders[Self::index(stream)].subscribe()
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}
