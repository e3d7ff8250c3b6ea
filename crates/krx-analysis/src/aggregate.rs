//! Duration aggregation into duty-window presence buckets (spec §4.4.6).

use krx_core::types::TimelineState;

use crate::duty::{DUTY_END_SEC, DUTY_START_SEC, TOTAL_DUTY_SECONDS};

/// Presence-rate result for one instrument, all rates as percentages of the
/// duty window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisResult {
    pub mm1_rate: f64,
    pub mm2_rate: f64,
    pub only_mm1_rate: f64,
    pub only_mm2_rate: f64,
    pub both_rate: f64,
    pub none_rate: f64,
    pub packets: usize,
}

/// Aggregate a (possibly empty) timeline into presence-duration buckets and
/// convert to rates. `first_time`/`last_time` are the instrument's earliest
/// and latest snapshot times; `packets` is the snapshot count.
pub fn aggregate(mut timeline: Vec<TimelineState>, first_time: f64, last_time: f64, packets: usize) -> AnalysisResult {
    if timeline.is_empty() {
        timeline.push(TimelineState { time_sec: first_time, mm1_present: false, mm2_present: false });
    }

    let mut only_mm1 = 0.0;
    let mut only_mm2 = 0.0;
    let mut both = 0.0;
    let mut none = 0.0;

    if first_time > DUTY_START_SEC {
        none += first_time - DUTY_START_SEC;
    }
    if timeline[0].time_sec > first_time {
        none += timeline[0].time_sec - first_time;
    }

    for idx in 0..timeline.len() {
        let duration = if idx < timeline.len() - 1 {
            timeline[idx + 1].time_sec - timeline[idx].time_sec
        } else {
            last_time - timeline[idx].time_sec
        };
        if duration < 0.0 {
            continue; // spec §7: clamp negative duration to zero (skip it)
        }
        add_to_bucket(timeline[idx].mm1_present, timeline[idx].mm2_present, duration, &mut only_mm1, &mut only_mm2, &mut both, &mut none);
    }

    if last_time < DUTY_END_SEC {
        let post = DUTY_END_SEC - last_time;
        let last_state = timeline.last().expect("timeline is never empty here");
        add_to_bucket(last_state.mm1_present, last_state.mm2_present, post, &mut only_mm1, &mut only_mm2, &mut both, &mut none);
    }

    AnalysisResult {
        mm1_rate: (only_mm1 + both) / TOTAL_DUTY_SECONDS * 100.0,
        mm2_rate: (only_mm2 + both) / TOTAL_DUTY_SECONDS * 100.0,
        only_mm1_rate: only_mm1 / TOTAL_DUTY_SECONDS * 100.0,
        only_mm2_rate: only_mm2 / TOTAL_DUTY_SECONDS * 100.0,
        both_rate: both / TOTAL_DUTY_SECONDS * 100.0,
        none_rate: none / TOTAL_DUTY_SECONDS * 100.0,
        packets,
    }
}

#[allow(clippy::too_many_arguments)]
fn add_to_bucket(mm1: bool, mm2: bool, duration: f64, only_mm1: &mut f64, only_mm2: &mut f64, both: &mut f64, none: &mut f64) {
    match (mm1, mm2) {
        (true, true) => *both += duration,
        (true, false) => *only_mm1 += duration,
        (false, true) => *only_mm2 += duration,
        (false, false) => *none += duration,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_sum_to_duty_window_length() {
        let timeline = vec![
            TimelineState { time_sec: DUTY_START_SEC + 50.0, mm1_present: true, mm2_present: false },
            TimelineState { time_sec: DUTY_START_SEC + 5000.0, mm1_present: false, mm2_present: false },
        ];
        let result = aggregate(timeline, DUTY_START_SEC, DUTY_END_SEC, 100);
        let sum = (result.only_mm1_rate + result.only_mm2_rate + result.both_rate + result.none_rate) / 100.0 * TOTAL_DUTY_SECONDS;
        assert!((sum - TOTAL_DUTY_SECONDS).abs() < 1e-6);
    }

    #[test]
    fn mm_totals_equal_only_plus_both() {
        let timeline = vec![TimelineState { time_sec: DUTY_START_SEC, mm1_present: true, mm2_present: true }];
        let result = aggregate(timeline, DUTY_START_SEC, DUTY_END_SEC, 10);
        assert_eq!(result.mm1_rate, result.only_mm1_rate + result.both_rate);
        assert_eq!(result.mm2_rate, result.only_mm2_rate + result.both_rate);
    }

    #[test]
    fn s1_single_mm_full_window() {
        // Spec §8 S1: MM1 enters at 32700.050, stays until window end.
        let timeline = vec![TimelineState { time_sec: 32700.050, mm1_present: true, mm2_present: false }];
        let result = aggregate(timeline, 32700.0, 55200.0, 3);
        assert!((result.only_mm1_rate - 99.9998).abs() < 1e-3);
        assert_eq!(result.mm2_rate, 0.0);
        assert!(result.none_rate < 0.001);
    }

    #[test]
    fn empty_timeline_is_entirely_none() {
        let result = aggregate(Vec::new(), DUTY_START_SEC, DUTY_END_SEC, 0);
        assert_eq!(result.none_rate, 100.0);
        assert_eq!(result.mm1_rate, 0.0);
    }
}
