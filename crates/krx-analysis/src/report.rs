//! Report emitter (spec §4.5): the 72-row MM-presence table, plus the
//! per-underlying ATM summary and 85%-threshold statistics block supplied by
//! the original implementation (SPEC_FULL "Supplemented Features").

use std::collections::HashMap;
use std::fmt::Write as _;

use krx_core::types::{OptionSide, Snapshot};

use crate::aggregate::AnalysisResult;
use crate::analyze;
use crate::duty::{DutyRequirements, OPTION_LEVELS};
use crate::master::OptionsMaster;
use crate::strikes::{self, ClassifiedOption};

/// One row of the main table. A row with `analysis: None` renders as dashes
/// (spec §4.5: no matching listed option, or fewer than two snapshots).
pub struct ReportRow {
    pub underlying: String,
    pub partner_firm: String,
    pub side: OptionSide,
    pub level: &'static str,
    pub isin: Option<String>,
    pub strike: Option<i64>,
    pub q: Option<u32>,
    pub analysis: Option<AnalysisResult>,
}

/// The full report: the 72-row table plus the derived summary sections.
pub struct Report {
    pub rows: Vec<ReportRow>,
    pub threshold_pct: f64,
}

/// Build the report for one duty-requirements/master pair against a day's
/// worth of decoded snapshots (spec §4.4.1 input, keyed by ISIN).
pub fn build(duty: &DutyRequirements, master: &OptionsMaster, snapshots_by_isin: &HashMap<String, Vec<Snapshot>>) -> Report {
    let mut rows = Vec::with_capacity(duty.roster.len() * 2 * OPTION_LEVELS.len());

    for entry in &duty.roster {
        let classified = strikes::classify_options_for_stock(master, &entry.underlying);
        for &(side, levels) in &[(OptionSide::Call, &classified.calls), (OptionSide::Put, &classified.puts)] {
            for &level in &OPTION_LEVELS {
                rows.push(build_row(entry, side, level, levels.get(level), duty, snapshots_by_isin));
            }
        }
    }

    Report { rows, threshold_pct: 85.0 }
}

fn build_row(
    entry: &crate::duty::RosterEntry,
    side: OptionSide,
    level: &'static str,
    option: Option<&ClassifiedOption>,
    duty: &DutyRequirements,
    snapshots_by_isin: &HashMap<String, Vec<Snapshot>>,
) -> ReportRow {
    let mut row = ReportRow {
        underlying: entry.underlying.clone(),
        partner_firm: entry.partner_firm.clone(),
        side,
        level,
        isin: None,
        strike: None,
        q: None,
        analysis: None,
    };

    let Some(option) = option else { return row };
    row.isin = Some(option.isin.clone());
    row.strike = Some(option.entry.strike);

    let Some(q) = duty.q(&entry.product_id, level) else { return row };
    row.q = Some(q);

    let Some(snapshots) = snapshots_by_isin.get(&option.isin) else { return row };
    row.analysis = analyze::analyze_option(snapshots, q);
    row
}

impl Report {
    /// Render the main table, the per-underlying ATM summary, and the
    /// threshold statistics block as plain text.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_table(&mut out);
        out.push('\n');
        self.render_atm_summary(&mut out);
        out.push('\n');
        self.render_threshold_stats(&mut out);
        out
    }

    fn render_table(&self, out: &mut String) {
        writeln!(
            out,
            "{:<10} {:<10} {:<5} {:<5} {:<14} {:>8} {:>5} {:>8} {:>7} {:>7} {:>7} {:>7} {:>7} {:>7}",
            "UNDERLYING", "PARTNER", "SIDE", "LVL", "ISIN", "STRIKE", "Q", "PACKETS", "MM1%", "MM2%", "ONLY1%", "ONLY2%", "BOTH%", "NONE%"
        )
        .unwrap();
        for row in &self.rows {
            let side = match row.side {
                OptionSide::Call => "CALL",
                OptionSide::Put => "PUT",
            };
            match &row.analysis {
                Some(a) => writeln!(
                    out,
                    "{:<10} {:<10} {:<5} {:<5} {:<14} {:>8} {:>5} {:>8} {:>7.2} {:>7.2} {:>7.2} {:>7.2} {:>7.2} {:>7.2}",
                    row.underlying,
                    row.partner_firm,
                    side,
                    row.level,
                    row.isin.as_deref().unwrap_or("-"),
                    row.strike.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string()),
                    row.q.map(|q| q.to_string()).unwrap_or_else(|| "-".to_string()),
                    a.packets,
                    a.mm1_rate,
                    a.mm2_rate,
                    a.only_mm1_rate,
                    a.only_mm2_rate,
                    a.both_rate,
                    a.none_rate,
                )
                .unwrap(),
                None => writeln!(
                    out,
                    "{:<10} {:<10} {:<5} {:<5} {:<14} {:>8} {:>5} {:>8} {:>7} {:>7} {:>7} {:>7} {:>7} {:>7}",
                    row.underlying,
                    row.partner_firm,
                    side,
                    row.level,
                    row.isin.as_deref().unwrap_or("-"),
                    row.strike.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string()),
                    row.q.map(|q| q.to_string()).unwrap_or_else(|| "-".to_string()),
                    "-",
                    "-",
                    "-",
                    "-",
                    "-",
                    "-",
                    "-",
                )
                .unwrap(),
            }
        }
    }

    fn render_atm_summary(&self, out: &mut String) {
        writeln!(out, "-- ATM summary --").unwrap();
        writeln!(out, "{:<10} {:<10} {:>10} {:>10} {:>10} {:>10}", "UNDERLYING", "PARTNER", "CALL MM1%", "CALL MM2%", "PUT MM1%", "PUT MM2%").unwrap();

        let mut seen = Vec::new();
        for row in &self.rows {
            if row.level != "ATM" || seen.contains(&row.underlying) {
                continue;
            }
            seen.push(row.underlying.clone());

            let call_atm = self.rows.iter().find(|r| r.underlying == row.underlying && r.side == OptionSide::Call && r.level == "ATM");
            let put_atm = self.rows.iter().find(|r| r.underlying == row.underlying && r.side == OptionSide::Put && r.level == "ATM");

            let call_mm1 = call_atm.and_then(|r| r.analysis.as_ref()).map(|a| a.mm1_rate);
            let call_mm2 = call_atm.and_then(|r| r.analysis.as_ref()).map(|a| a.mm2_rate);
            let put_mm1 = put_atm.and_then(|r| r.analysis.as_ref()).map(|a| a.mm1_rate);
            let put_mm2 = put_atm.and_then(|r| r.analysis.as_ref()).map(|a| a.mm2_rate);

            writeln!(
                out,
                "{:<10} {:<10} {:>10} {:>10} {:>10} {:>10}",
                row.underlying,
                row.partner_firm,
                fmt_pct_or_dash(call_mm1),
                fmt_pct_or_dash(call_mm2),
                fmt_pct_or_dash(put_mm1),
                fmt_pct_or_dash(put_mm2),
            )
            .unwrap();
        }
    }

    fn render_threshold_stats(&self, out: &mut String) {
        let scored: Vec<&AnalysisResult> = self.rows.iter().filter_map(|r| r.analysis.as_ref()).collect();
        let total = self.rows.len();
        let valid = scored.len();

        let mm1_above_85 = scored.iter().filter(|a| a.mm1_rate >= self.threshold_pct).count();
        let mm2_above_85 = scored.iter().filter(|a| a.mm2_rate >= self.threshold_pct).count();
        let mm1_pct = if valid == 0 { 0.0 } else { mm1_above_85 as f64 / valid as f64 * 100.0 };
        let mm2_pct = if valid == 0 { 0.0 } else { mm2_above_85 as f64 / valid as f64 * 100.0 };

        writeln!(out, "-- statistics --").unwrap();
        writeln!(out, "total options: {total}").unwrap();
        writeln!(out, "analyzed successfully: {valid}").unwrap();
        writeln!(out, "MM1 {:.0}% threshold: {mm1_above_85}/{valid} ({mm1_pct:.1}%)", self.threshold_pct).unwrap();
        writeln!(out, "MM2 {:.0}% threshold: {mm2_above_85}/{valid} ({mm2_pct:.1}%)", self.threshold_pct).unwrap();
    }
}

fn fmt_pct_or_dash(rate: Option<f64>) -> String {
    match rate {
        Some(r) => format!("{r:.2}"),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duty::{ProductDuty, RosterEntry};
    use crate::master::MasterEntry;

    fn duty_with_one_product(q: u32) -> DutyRequirements {
        let mut stock_options_duty = HashMap::new();
        let mut duty_qty = HashMap::new();
        for level in OPTION_LEVELS {
            duty_qty.insert(level.to_string(), q);
        }
        stock_options_duty.insert("PROD".to_string(), ProductDuty { duty_qty });
        DutyRequirements {
            roster: vec![RosterEntry { underlying: "테스트".to_string(), partner_firm: "파트너".to_string(), product_id: "PROD".to_string() }],
            stock_options_duty,
        }
    }

    fn master_with_atm(isin: &str, strike: i64) -> OptionsMaster {
        let mut master = OptionsMaster::new();
        master.insert(isin.to_string(), MasterEntry { name: "테스트 C 202602".to_string(), expiry: "20260212".to_string(), strike, atm_flag: 1 });
        master.insert(format!("{isin}P"), MasterEntry { name: "테스트 P 202602".to_string(), expiry: "20260212".to_string(), strike, atm_flag: 1 });
        master
    }

    #[test]
    fn builds_72_row_shaped_table_for_a_single_underlying() {
        let duty = duty_with_one_product(10);
        let master = master_with_atm("OPT1", 100);
        let snapshots = HashMap::new();
        let report = build(&duty, &master, &snapshots);

        // One underlying * 2 sides * 6 levels = 12 rows; only ATM resolves an ISIN.
        assert_eq!(report.rows.len(), 12);
        let atm_call = report.rows.iter().find(|r| r.side == OptionSide::Call && r.level == "ATM").unwrap();
        assert_eq!(atm_call.isin.as_deref(), Some("OPT1"));
        assert_eq!(atm_call.strike, Some(100));
        // No snapshot data supplied, so the row has a Q but no analysis.
        assert_eq!(atm_call.q, Some(10));
        assert!(atm_call.analysis.is_none());
    }

    #[test]
    fn missing_isin_in_master_renders_dash_row() {
        let duty = duty_with_one_product(10);
        let master = OptionsMaster::new();
        let snapshots = HashMap::new();
        let report = build(&duty, &master, &snapshots);
        assert!(report.rows.iter().all(|r| r.isin.is_none() && r.analysis.is_none()));
    }

    #[test]
    fn render_includes_table_and_summary_sections() {
        let duty = duty_with_one_product(10);
        let master = master_with_atm("OPT1", 100);
        let snapshots = HashMap::new();
        let report = build(&duty, &master, &snapshots);
        let text = report.render();
        assert!(text.contains("UNDERLYING"));
        assert!(text.contains("ATM summary"));
        assert!(text.contains("threshold"));
    }
}
