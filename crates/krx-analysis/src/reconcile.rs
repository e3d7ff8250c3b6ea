//! Residual-volume reconciliation: stealth-exit detection (spec §4.4.3).

use crate::change::Change;
use crate::state_machine::MmTracker;

/// Check `change` against the tracker's expected-vs-actual residual book and
/// attribute a stealth exit to MM2 (preferred) or MM1 if the mismatch
/// matches one of their quoted sizes. No-op if neither slot is occupied or
/// no baseline has been captured yet.
///
/// The `Q/2` tolerance for detecting a mismatch and the `< Q` tolerance for
/// attributing it are deliberately different (spec §9 open question 2).
pub fn reconcile(tracker: &mut MmTracker, q: i64, change: &Change) {
    if tracker.mm1().is_none() && tracker.mm2().is_none() {
        return;
    }

    let mut expected_ask = 0i64;
    let mut expected_bid = 0i64;
    if let Some(mm1) = tracker.mm1() {
        expected_ask += mm1.ask_q as i64 * q;
        expected_bid += mm1.bid_q as i64 * q;
    }
    if let Some(mm2) = tracker.mm2() {
        expected_ask += mm2.ask_q as i64 * q;
        expected_bid += mm2.bid_q as i64 * q;
    }

    let Some(baseline_ask) = tracker.baseline_ask() else { return };
    let baseline_bid = tracker.baseline_bid().expect("baseline_bid is set whenever baseline_ask is");

    let actual_ask = change.prev_ask as i64 - baseline_ask;
    let actual_bid = change.prev_bid as i64 - baseline_bid;

    if actual_ask >= expected_ask - q / 2 && actual_bid >= expected_bid - q / 2 {
        return;
    }

    let missing_ask = expected_ask - actual_ask;
    let missing_bid = expected_bid - actual_bid;

    if let Some(mm2) = tracker.mm2() {
        let mm2_ask = mm2.ask_q as i64 * q;
        let mm2_bid = mm2.bid_q as i64 * q;
        if (missing_ask - mm2_ask).abs() < q && (missing_bid - mm2_bid).abs() < q {
            tracker.mm2_exit(change.time_sec);
            return;
        }
    }

    if let Some(mm1) = tracker.mm1() {
        let mm1_ask = mm1.ask_q as i64 * q;
        let mm1_bid = mm1.bid_q as i64 * q;
        if (missing_ask - mm1_ask).abs() < q && (missing_bid - mm1_bid).abs() < q {
            tracker.mm1_exit(change.time_sec);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairing::PairedEvent;

    fn change_at(time_sec: f64, prev_ask: u64, prev_bid: u64) -> Change {
        Change {
            time_sec,
            delta_ask: 0,
            delta_bid: 0,
            delta_ask_q: 0,
            delta_bid_q: 0,
            prev_ask,
            prev_bid,
            is_q_multiple_ask: false,
            is_q_multiple_bid: false,
            processed: false,
        }
    }

    #[test]
    fn stealth_exit_of_sole_mm1_is_detected() {
        // Spec §8 S3: baseline 0, MM1 enters with (10,10) at Q=10, then the
        // book is already back at baseline (prev_ask/prev_bid both 0) by the
        // time the next change is evaluated — a departure went unlogged.
        let mut tracker = MmTracker::new();
        tracker.apply_paired_event(&PairedEvent { ask_q: 10, bid_q: 10, direction: 1, time_sec: 0.01 }, 0, 0);

        let change = change_at(10.0, 0, 0);
        reconcile(&mut tracker, 10, &change);

        assert_eq!(tracker.mm1(), None);
        assert_eq!(tracker.timeline.last().unwrap().time_sec, 10.0);
    }

    #[test]
    fn no_mismatch_leaves_state_untouched() {
        let mut tracker = MmTracker::new();
        tracker.apply_paired_event(&PairedEvent { ask_q: 10, bid_q: 10, direction: 1, time_sec: 0.01 }, 0, 0);
        let before = tracker.timeline.len();

        let change = change_at(1.0, 100, 100); // actual == expected, no mismatch
        reconcile(&mut tracker, 10, &change);

        assert_eq!(tracker.timeline.len(), before);
        assert!(tracker.mm1().is_some());
    }

    #[test]
    fn no_baseline_yet_is_a_no_op() {
        let mut tracker = MmTracker::new();
        // Force mm1 occupied without going through apply_paired_event's
        // baseline capture, to exercise the "no baseline" early return.
        tracker.mm1_enter(10, 10, 0.0);
        let change = change_at(1.0, 0, 0);
        reconcile(&mut tracker, 10, &change);
        assert!(tracker.mm1().is_some());
    }
}
