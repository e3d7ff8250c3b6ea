//! Cross-side pairing within the 100 ms window (spec §4.4.4).

use crate::change::Change;
use crate::duty::PAIRING_WINDOW_MS;

/// A paired ask+bid event, ready to feed the state machine.
#[derive(Debug, Clone, Copy)]
pub struct PairedEvent {
    /// Signed, in Q units (sign matches `direction`).
    pub ask_q: i64,
    pub bid_q: i64,
    pub direction: i8,
    pub time_sec: f64,
}

/// Attempt to pair `changes[i]` with a later unprocessed change within the
/// pairing window. On a successful cross-side pair, marks the partner
/// `processed`. Never marks `changes[i]` itself — the caller does that.
pub fn find_pair(changes: &mut [Change], i: usize) -> Option<PairedEvent> {
    let time_sec = changes[i].time_sec;
    let delta_ask = changes[i].delta_ask;
    let delta_bid = changes[i].delta_bid;
    let delta_ask_q = changes[i].delta_ask_q;
    let delta_bid_q = changes[i].delta_bid_q;
    let curr_is_ask_q = changes[i].is_q_multiple_ask && delta_ask != 0;
    let curr_is_bid_q = changes[i].is_q_multiple_bid && delta_bid != 0;

    if curr_is_ask_q && !curr_is_bid_q {
        let direction: i8 = if delta_ask > 0 { 1 } else { -1 };
        for j in (i + 1)..changes.len() {
            if changes[j].processed {
                continue;
            }
            if (changes[j].time_sec - time_sec) * 1000.0 > PAIRING_WINDOW_MS {
                break;
            }
            if changes[j].is_q_multiple_bid && changes[j].delta_ask == 0 {
                let other_direction: i8 = if changes[j].delta_bid > 0 { 1 } else { -1 };
                if direction == other_direction {
                    let bid_q = changes[j].delta_bid_q;
                    changes[j].processed = true;
                    return Some(PairedEvent { ask_q: delta_ask_q, bid_q, direction, time_sec });
                }
            }
        }
        None
    } else if curr_is_bid_q && !curr_is_ask_q {
        let direction: i8 = if delta_bid > 0 { 1 } else { -1 };
        for j in (i + 1)..changes.len() {
            if changes[j].processed {
                continue;
            }
            if (changes[j].time_sec - time_sec) * 1000.0 > PAIRING_WINDOW_MS {
                break;
            }
            if changes[j].is_q_multiple_ask && changes[j].delta_bid == 0 {
                let other_direction: i8 = if changes[j].delta_ask > 0 { 1 } else { -1 };
                if direction == other_direction {
                    let ask_q = changes[j].delta_ask_q;
                    changes[j].processed = true;
                    return Some(PairedEvent { ask_q, bid_q: delta_bid_q, direction, time_sec });
                }
            }
        }
        None
    } else if curr_is_ask_q && curr_is_bid_q {
        let ask_dir: i8 = if delta_ask > 0 { 1 } else { -1 };
        let bid_dir: i8 = if delta_bid > 0 { 1 } else { -1 };
        if ask_dir == bid_dir {
            Some(PairedEvent { ask_q: delta_ask_q, bid_q: delta_bid_q, direction: ask_dir, time_sec })
        } else {
            None
        }
    } else {
        None
    }
}
