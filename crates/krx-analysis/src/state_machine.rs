//! Two-slot MM presence state machine (spec §4.4.5).

use krx_core::types::{MmSlot, TimelineState};

use crate::pairing::PairedEvent;

/// Tracks MM1/MM2 occupancy and the baseline book, appending a timeline
/// record on every entry/exit transition.
#[derive(Debug, Default)]
pub struct MmTracker {
    mm1: Option<MmSlot>,
    mm2: Option<MmSlot>,
    baseline_ask: Option<i64>,
    baseline_bid: Option<i64>,
    pub timeline: Vec<TimelineState>,
}

impl MmTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mm1(&self) -> Option<MmSlot> {
        self.mm1
    }

    pub fn mm2(&self) -> Option<MmSlot> {
        self.mm2
    }

    pub fn baseline_ask(&self) -> Option<i64> {
        self.baseline_ask
    }

    pub fn baseline_bid(&self) -> Option<i64> {
        self.baseline_bid
    }

    fn record_state(&mut self, time_sec: f64) {
        self.timeline.push(TimelineState { time_sec, mm1_present: self.mm1.is_some(), mm2_present: self.mm2.is_some() });
    }

    pub fn mm1_enter(&mut self, ask_q: u32, bid_q: u32, time_sec: f64) {
        self.mm1 = Some(MmSlot { ask_q, bid_q });
        self.record_state(time_sec);
    }

    pub fn mm2_enter(&mut self, ask_q: u32, bid_q: u32, time_sec: f64) {
        self.mm2 = Some(MmSlot { ask_q, bid_q });
        self.record_state(time_sec);
    }

    pub fn mm1_exit(&mut self, time_sec: f64) {
        self.mm1 = None; // no promotion: MM2 stays MM2
        self.record_state(time_sec);
    }

    pub fn mm2_exit(&mut self, time_sec: f64) {
        self.mm2 = None;
        self.record_state(time_sec);
    }

    /// Apply a paired entry/exit event (spec §4.4.5). `prev_ask`/`prev_bid`
    /// are the triggering change's pre-event book totals, used to capture
    /// the baseline on a from-empty MM1 entry.
    pub fn apply_paired_event(&mut self, event: &PairedEvent, prev_ask: u64, prev_bid: u64) {
        let ask_q = event.ask_q.unsigned_abs() as u32;
        let bid_q = event.bid_q.unsigned_abs() as u32;

        if event.direction > 0 {
            if self.mm1.is_none() {
                if self.baseline_ask.is_none() {
                    self.baseline_ask = Some(prev_ask as i64);
                    self.baseline_bid = Some(prev_bid as i64);
                }
                self.mm1_enter(ask_q, bid_q, event.time_sec);
            } else if self.mm2.is_none() {
                self.mm2_enter(ask_q, bid_q, event.time_sec);
            }
            // both slots full: excess inferred entries are silently dropped
        } else {
            let pattern = MmSlot { ask_q, bid_q };
            let mm1_match = self.mm1 == Some(pattern);
            let mm2_match = self.mm2 == Some(pattern);
            if mm2_match {
                self.mm2_exit(event.time_sec);
            } else if mm1_match {
                self.mm1_exit(event.time_sec);
            }
        }
    }
}
