//! Daily options-master loading (spec §6): ISIN → `{ name, expiry, strike, atm_flag }`.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

/// One listed option contract.
#[derive(Debug, Clone, Deserialize)]
pub struct MasterEntry {
    /// Display name, e.g. `"LG전자 C 202602    12,000(  10)"`. Contains a
    /// `" C "` or `" P "` marker identifying the side and starts with the
    /// underlying name.
    pub name: String,
    /// Expiry, `YYYYMM...`; only the first 6 characters are used for grouping.
    pub expiry: String,
    pub strike: i64,
    /// `1` = ATM, `2` = ITM, `3` = OTM.
    pub atm_flag: u8,
}

/// ISIN → listed-option-contract map for one trading day.
pub type OptionsMaster = HashMap<String, MasterEntry>;

pub fn load(path: &Path) -> anyhow::Result<OptionsMaster> {
    krx_core::config::load_config(path)
}
