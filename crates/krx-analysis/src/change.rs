//! Delta extraction (spec §4.4.2).

use krx_core::types::Snapshot;

/// One ask/bid quantity change between consecutive snapshots.
#[derive(Debug, Clone, Copy)]
pub struct Change {
    pub time_sec: f64,
    pub delta_ask: i64,
    pub delta_bid: i64,
    pub delta_ask_q: i64,
    pub delta_bid_q: i64,
    pub prev_ask: u64,
    pub prev_bid: u64,
    pub is_q_multiple_ask: bool,
    pub is_q_multiple_bid: bool,
    pub processed: bool,
}

/// Integer division toward zero on the signed delta (spec §4.4.2: `sign(delta)
/// × (|delta| / Q)`).
fn signed_div(delta: i64, q: i64) -> i64 {
    if delta >= 0 {
        delta / q
    } else {
        -(delta.abs() / q)
    }
}

fn is_q_multiple(delta: i64, q: i64) -> bool {
    let magnitude = delta.abs();
    magnitude >= q && magnitude % q == 0
}

/// Traverse consecutive snapshots and emit a [`Change`] wherever either total
/// differs. Snapshots must already be sorted by `time_sec`.
pub fn extract_changes(snapshots: &[Snapshot], q: u32) -> Vec<Change> {
    let q = q as i64;
    snapshots
        .windows(2)
        .filter_map(|pair| {
            let (prev, curr) = (&pair[0], &pair[1]);
            let delta_ask = curr.ask_total as i64 - prev.ask_total as i64;
            let delta_bid = curr.bid_total as i64 - prev.bid_total as i64;
            if delta_ask == 0 && delta_bid == 0 {
                return None;
            }
            Some(Change {
                time_sec: curr.time_sec,
                delta_ask,
                delta_bid,
                delta_ask_q: signed_div(delta_ask, q),
                delta_bid_q: signed_div(delta_bid, q),
                prev_ask: prev.ask_total,
                prev_bid: prev.bid_total,
                is_q_multiple_ask: is_q_multiple(delta_ask, q),
                is_q_multiple_bid: is_q_multiple(delta_bid, q),
                processed: false,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(time_sec: f64, ask: u64, bid: u64) -> Snapshot {
        Snapshot { time_sec, ask_total: ask, bid_total: bid }
    }

    #[test]
    fn unchanged_snapshots_are_skipped() {
        let snaps = [snap(0.0, 100, 100), snap(1.0, 100, 100), snap(2.0, 110, 100)];
        let changes = extract_changes(&snaps, 10);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].delta_ask, 10);
    }

    #[test]
    fn q_minus_one_is_not_a_multiple_q_is_q_2q_are() {
        let snaps = [snap(0.0, 0, 0), snap(1.0, 9, 0), snap(2.0, 19, 0), snap(3.0, 39, 0)];
        let changes = extract_changes(&snaps, 10);
        assert!(!changes[0].is_q_multiple_ask); // delta 9
        assert!(changes[1].is_q_multiple_ask); // delta 10
        assert!(changes[2].is_q_multiple_ask); // delta 20
    }

    #[test]
    fn negative_delta_below_q_is_not_a_multiple_and_q_is_zero() {
        let snaps = [snap(0.0, 5, 0), snap(1.0, 0, 0)];
        let changes = extract_changes(&snaps, 10);
        assert_eq!(changes[0].delta_ask, -5);
        assert_eq!(changes[0].delta_ask_q, 0);
        assert!(!changes[0].is_q_multiple_ask);
    }
}
