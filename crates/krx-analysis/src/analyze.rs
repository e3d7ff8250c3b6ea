//! Orchestration for one instrument's MM-presence analysis (spec §4.4).
//!
//! Ties together delta extraction, residual reconciliation, cross-side
//! pairing, the state machine, and duration aggregation into the single
//! forward pass the reference analysis performs.

use krx_core::types::Snapshot;

use crate::aggregate::{self, AnalysisResult};
use crate::change;
use crate::input;
use crate::pairing;
use crate::reconcile;
use crate::state_machine::MmTracker;

/// Run the full MM-presence analysis for one instrument's snapshot series.
/// Returns `None` if there are fewer than two snapshots (spec §4.4.1) — the
/// caller renders a dash row in that case.
pub fn analyze_option(snapshots: &[Snapshot], q: u32) -> Option<AnalysisResult> {
    if !input::eligible(snapshots) {
        return None;
    }

    let q_i64 = q as i64;
    let mut changes = change::extract_changes(snapshots, q);
    let mut tracker = MmTracker::new();

    let mut i = 0;
    while i < changes.len() {
        if changes[i].processed {
            i += 1;
            continue;
        }

        reconcile::reconcile(&mut tracker, q_i64, &changes[i]);

        if let Some(event) = pairing::find_pair(&mut changes, i) {
            let (prev_ask, prev_bid) = (changes[i].prev_ask, changes[i].prev_bid);
            tracker.apply_paired_event(&event, prev_ask, prev_bid);
        }

        changes[i].processed = true;
        i += 1;
    }

    let first_time = snapshots.first().expect("eligible guarantees non-empty").time_sec;
    let last_time = snapshots.last().expect("eligible guarantees non-empty").time_sec;

    Some(aggregate::aggregate(tracker.timeline, first_time, last_time, snapshots.len()))
}
