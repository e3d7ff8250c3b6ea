//! Strike/ATM/ITM/OTM classification (spec §6, §8 scenario S6).

use std::collections::HashMap;

use crate::master::{MasterEntry, OptionsMaster};

/// One option resolved to a strike level, with its ISIN carried alongside.
#[derive(Debug, Clone)]
pub struct ClassifiedOption {
    pub isin: String,
    pub entry: MasterEntry,
}

/// Call and put strike-level maps for one underlying's nearest expiry.
#[derive(Debug, Clone, Default)]
pub struct ClassifiedOptions {
    pub nearest_expiry: Option<String>,
    pub calls: HashMap<&'static str, ClassifiedOption>,
    pub puts: HashMap<&'static str, ClassifiedOption>,
}

struct Candidate<'a> {
    isin: &'a str,
    entry: &'a MasterEntry,
    expiry_key: &'a str,
}

/// Classify all options for one underlying into ITM1/ATM/OTM1..OTM4, per
/// side, restricted to the nearest expiry shared by both call and put sets.
pub fn classify_options_for_stock(master: &OptionsMaster, underlying_name: &str) -> ClassifiedOptions {
    let mut calls: Vec<Candidate> = Vec::new();
    let mut puts: Vec<Candidate> = Vec::new();

    for (isin, entry) in master {
        if !entry.name.starts_with(underlying_name) {
            continue;
        }
        let expiry_key = &entry.expiry[..entry.expiry.len().min(6)];
        let candidate = Candidate { isin, entry, expiry_key };
        if entry.name.contains(" C ") {
            calls.push(candidate);
        } else if entry.name.contains(" P ") {
            puts.push(candidate);
        }
    }

    let nearest_expiry = calls
        .iter()
        .map(|c| c.expiry_key)
        .chain(puts.iter().map(|c| c.expiry_key))
        .min()
        .map(str::to_string);

    let Some(nearest_expiry) = nearest_expiry else {
        return ClassifiedOptions::default();
    };

    calls.retain(|c| c.expiry_key == nearest_expiry);
    puts.retain(|c| c.expiry_key == nearest_expiry);

    if calls.is_empty() || puts.is_empty() {
        return ClassifiedOptions { nearest_expiry: Some(nearest_expiry), ..Default::default() };
    }

    let mut call_atm_candidates: Vec<&Candidate> = calls.iter().filter(|c| c.entry.atm_flag == 1).collect();
    let mut put_atm_candidates: Vec<&Candidate> = puts.iter().filter(|c| c.entry.atm_flag == 1).collect();

    if call_atm_candidates.is_empty() || put_atm_candidates.is_empty() {
        return ClassifiedOptions { nearest_expiry: Some(nearest_expiry), ..Default::default() };
    }

    call_atm_candidates.sort_by_key(|c| c.entry.strike);
    put_atm_candidates.sort_by_key(|c| c.entry.strike);
    let call_atm = call_atm_candidates[call_atm_candidates.len() / 2];
    let put_atm = put_atm_candidates[put_atm_candidates.len() / 2];
    let atm_strike = call_atm.entry.strike;

    let mut classified_calls = HashMap::new();
    let mut classified_puts = HashMap::new();
    classified_calls.insert("ATM", to_classified(call_atm));
    classified_puts.insert("ATM", to_classified(put_atm));

    calls.sort_by_key(|c| c.entry.strike);
    let call_itm: Vec<&Candidate> = calls.iter().filter(|c| c.entry.strike < atm_strike).collect();
    let call_otm: Vec<&Candidate> = calls.iter().filter(|c| c.entry.strike > atm_strike).collect();

    if let Some(nearest) = call_itm.last() {
        classified_calls.insert("ITM1", to_classified(nearest));
    }
    for (i, opt) in call_otm.iter().take(4).enumerate() {
        classified_calls.insert(crate::duty::OPTION_LEVELS[2 + i], to_classified(opt));
    }

    puts.sort_by_key(|c| c.entry.strike);
    let put_itm: Vec<&Candidate> = puts.iter().filter(|c| c.entry.strike > atm_strike).collect();
    let mut put_otm: Vec<&Candidate> = puts.iter().filter(|c| c.entry.strike < atm_strike).collect();

    if let Some(nearest) = put_itm.first() {
        classified_puts.insert("ITM1", to_classified(nearest));
    }
    put_otm.reverse();
    for (i, opt) in put_otm.iter().take(4).enumerate() {
        classified_puts.insert(crate::duty::OPTION_LEVELS[2 + i], to_classified(opt));
    }

    ClassifiedOptions { nearest_expiry: Some(nearest_expiry), calls: classified_calls, puts: classified_puts }
}

fn to_classified(candidate: &Candidate) -> ClassifiedOption {
    ClassifiedOption { isin: candidate.isin.to_string(), entry: candidate.entry.clone() }
}
