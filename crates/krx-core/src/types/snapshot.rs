//! Per-instrument order-book snapshot (spec §3).

/// An aggregated top-5 order-book snapshot for one instrument at one point
/// in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    /// Decimal seconds since midnight (from the wire time-of-day field).
    pub time_sec: f64,
    /// Sum of ask quantities across hoga levels 1-5.
    pub ask_total: u64,
    /// Sum of bid quantities across hoga levels 1-5.
    pub bid_total: u64,
}
