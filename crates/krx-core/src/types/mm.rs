//! Market-maker slot and timeline types (spec §3, §4.4.5).
//!
//! Two named, independent slots rather than a general n-MM container — this
//! keeps the "no promotion" rule (MM2 never becomes MM1) enforceable by
//! construction instead of by convention.

/// A market maker's quoted size, in Q units, on each side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MmSlot {
    pub ask_q: u32,
    pub bid_q: u32,
}

/// One recorded state change in an instrument's MM timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineState {
    pub time_sec: f64,
    pub mm1_present: bool,
    pub mm2_present: bool,
}
