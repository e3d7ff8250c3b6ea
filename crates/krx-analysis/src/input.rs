//! Input assembly: per-instrument snapshot series from an archived log (spec §4.4.1).

use std::collections::{HashMap, HashSet};
use std::io::{BufRead, BufReader};
use std::path::Path;

use krx_core::types::{wire, Snapshot};
use krx_core::time_util;

use crate::duty::{DUTY_END_SEC, DUTY_START_SEC};

/// Scan one archive log, decoding duty-window snapshots for each ISIN in
/// `target_isins`, sorted by `time_sec`.
pub fn load_snapshots(path: &Path, target_isins: &HashSet<String>) -> anyhow::Result<HashMap<String, Vec<Snapshot>>> {
    let file = std::fs::File::open(path)?;
    let reader = BufReader::new(file);
    let mut by_isin: HashMap<String, Vec<Snapshot>> = HashMap::new();

    for line in reader.lines() {
        let Ok(line) = line else { continue };
        let bytes = line.as_bytes();

        let Some(isin) = wire::isin(bytes) else { continue };
        if !target_isins.contains(isin) {
            continue;
        }

        let Some(time_field) = wire::time_of_day(bytes) else { continue };
        let Some(time_sec) = time_util::parse_time_to_seconds(time_field) else { continue };
        if !(DUTY_START_SEC..=DUTY_END_SEC).contains(&time_sec) {
            continue;
        }

        let Some((ask_total, bid_total)) = wire::hoga_totals(bytes) else { continue };

        by_isin.entry(isin.to_string()).or_default().push(Snapshot { time_sec, ask_total, bid_total });
    }

    for snapshots in by_isin.values_mut() {
        snapshots.sort_by(|a, b| a.time_sec.partial_cmp(&b.time_sec).expect("time_sec is never NaN"));
    }

    Ok(by_isin)
}

/// Whether an instrument has enough snapshots to analyze (spec §4.4.1: drop
/// instruments with fewer than two).
pub fn eligible(snapshots: &[Snapshot]) -> bool {
    snapshots.len() >= 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn line(isin: &str, time: &str, ask: u64, bid: u64) -> String {
        let mut buf = vec![b' '; 47 + 46 * 5];
        buf[0..5].copy_from_slice(b"B604F");
        buf[17..29].copy_from_slice(isin.as_bytes());
        buf[35..47].copy_from_slice(time.as_bytes());
        let ask_str = ask.to_string();
        buf[47 + 18..47 + 18 + ask_str.len()].copy_from_slice(ask_str.as_bytes());
        let bid_str = bid.to_string();
        buf[47 + 27..47 + 27 + bid_str.len()].copy_from_slice(bid_str.as_bytes());
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn loads_and_sorts_snapshots_for_target_isin_only() {
        let tmp = std::env::temp_dir().join(format!("krx-input-test-{}-{}", std::process::id(), line!()));
        let mut file = std::fs::File::create(&tmp).unwrap();
        writeln!(file, "{}", line("KRDRVOPS14CT", "091000000000", 50, 50)).unwrap();
        writeln!(file, "{}", line("KRDRVOPS14CT", "090500000000", 10, 10)).unwrap();
        writeln!(file, "{}", line("KROTHER00000", "091500000000", 99, 99)).unwrap();
        drop(file);

        let mut target = HashSet::new();
        target.insert("KRDRVOPS14CT".to_string());
        let result = load_snapshots(&tmp, &target).unwrap();

        assert_eq!(result.len(), 1);
        let snaps = &result["KRDRVOPS14CT"];
        assert_eq!(snaps.len(), 2);
        assert!(snaps[0].time_sec < snaps[1].time_sec);
        assert_eq!(snaps[0].ask_total, 10);

        let _ = std::fs::remove_file(&tmp);
    }

    #[test]
    fn snapshots_outside_duty_window_are_dropped() {
        let tmp = std::env::temp_dir().join(format!("krx-input-test2-{}-{}", std::process::id(), line!()));
        let mut file = std::fs::File::create(&tmp).unwrap();
        writeln!(file, "{}", line("KRDRVOPS14CT", "080000000000", 1, 1)).unwrap();
        drop(file);

        let mut target = HashSet::new();
        target.insert("KRDRVOPS14CT".to_string());
        let result = load_snapshots(&tmp, &target).unwrap();
        assert!(result.is_empty());

        let _ = std::fs::remove_file(&tmp);
    }

    #[test]
    fn eligibility_requires_at_least_two_snapshots() {
        assert!(!eligible(&[Snapshot { time_sec: 0.0, ask_total: 0, bid_total: 0 }]));
        assert!(eligible(&[
            Snapshot { time_sec: 0.0, ask_total: 0, bid_total: 0 },
            Snapshot { time_sec: 1.0, ask_total: 1, bid_total: 1 },
        ]));
    }
}
