//! Duty window constants and duty-requirements document loading (spec §3, §6).

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

/// Duty window start, seconds since midnight (09:05:00).
pub const DUTY_START_SEC: f64 = 32_700.0;

/// Duty window end, seconds since midnight (15:20:00).
pub const DUTY_END_SEC: f64 = 55_200.0;

/// Duty window length in seconds.
pub const TOTAL_DUTY_SECONDS: f64 = DUTY_END_SEC - DUTY_START_SEC;

/// The pairing window, milliseconds.
pub const PAIRING_WINDOW_MS: f64 = 100.0;

/// The six strike levels a duty-requirements document and the report cover.
pub const OPTION_LEVELS: [&str; 6] = ["ITM1", "ATM", "OTM1", "OTM2", "OTM3", "OTM4"];

/// Per-product quote-unit requirements, keyed by product id then level, plus
/// the report roster (spec.md §9 OQ: the original's hard-coded six-underlying
/// table becomes configuration here).
#[derive(Debug, Clone, Deserialize)]
pub struct DutyRequirements {
    #[serde(default)]
    pub roster: Vec<RosterEntry>,
    pub stock_options_duty: HashMap<String, ProductDuty>,
}

/// One underlying in the report roster: its options-master name prefix, the
/// partner firm it is benchmarked against, and the product id its Q table is
/// keyed under.
#[derive(Debug, Clone, Deserialize)]
pub struct RosterEntry {
    pub underlying: String,
    pub partner_firm: String,
    pub product_id: String,
}

/// One product's per-level quote unit Q.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductDuty {
    pub duty_qty: HashMap<String, u32>,
}

impl DutyRequirements {
    /// The quote unit Q for `product_id` at `level`, or `None` if either is
    /// absent from the document (spec §7: missing Q emits a dash row).
    pub fn q(&self, product_id: &str, level: &str) -> Option<u32> {
        self.stock_options_duty.get(product_id)?.duty_qty.get(level).copied()
    }
}

pub fn load(path: &Path) -> anyhow::Result<DutyRequirements> {
    krx_core::config::load_config(path)
}
