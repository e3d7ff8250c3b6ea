//! Fixed-position ASCII wire payload parsing (spec §3).
//!
//! ```text
//! offset  0..5    TR code (5 ASCII chars)
//! offset 17..29   ISIN (12 ASCII chars)
//! offset 35..47   time-of-day HHMMSSuuuuuu (12 ASCII chars)
//! offset 47..     hoga (order-book level) records, 46 bytes each,
//!                 first 5 used; within each record:
//!                   rel 18..27  ask quantity (right-padded ASCII decimal)
//!                   rel 27..36  bid quantity (right-padded ASCII decimal)
//! ```

pub const TR_CODE_OFFSET: usize = 0;
pub const TR_CODE_LEN: usize = 5;
pub const ISIN_OFFSET: usize = 17;
pub const ISIN_LEN: usize = 12;
pub const PREFIX_LEN: usize = 6;
pub const TIME_OFFSET: usize = 35;
pub const TIME_LEN: usize = 12;
pub const HOGA_BASE_OFFSET: usize = 47;
pub const HOGA_RECORD_LEN: usize = 46;
pub const HOGA_LEVELS_USED: usize = 5;
const HOGA_ASK_REL: usize = 18;
const HOGA_ASK_LEN: usize = 9;
const HOGA_BID_REL: usize = 27;
const HOGA_BID_LEN: usize = 9;

/// The whitelisted TR codes (spec §6): two order-book codes (`B604F`,
/// `B605F`) plus the trade codes `A301F`..`A317F` excluding `A314F`.
pub const WHITELISTED_TR_CODES: [&[u8; 5]; 18] = [
    b"B604F", b"B605F", b"A301F", b"A302F", b"A303F", b"A304F", b"A305F", b"A306F", b"A307F", b"A308F", b"A309F",
    b"A310F", b"A311F", b"A312F", b"A313F", b"A315F", b"A316F", b"A317F",
];

/// The 5-char TR code at the start of a wire payload, or `None` if the
/// payload is shorter than [`TR_CODE_LEN`].
pub fn tr_code(payload: &[u8]) -> Option<&[u8]> {
    payload.get(TR_CODE_OFFSET..TR_CODE_OFFSET + TR_CODE_LEN)
}

/// Whether a payload's TR code is one of the 20 whitelisted codes (spec §6
/// step 1 of packet processing: reject anything else before parsing).
pub fn is_whitelisted_tr_code(payload: &[u8]) -> bool {
    match tr_code(payload) {
        Some(code) => WHITELISTED_TR_CODES.iter().any(|w| w.as_slice() == code),
        None => false,
    }
}

/// The 12-char ISIN field, or `None` if the payload is too short.
pub fn isin(payload: &[u8]) -> Option<&str> {
    let bytes = payload.get(ISIN_OFFSET..ISIN_OFFSET + ISIN_LEN)?;
    std::str::from_utf8(bytes).ok()
}

/// The 6-char classification prefix (first 6 chars of the ISIN field), or
/// `None` if the payload is too short to yield one.
pub fn prefix6(payload: &[u8]) -> Option<&str> {
    let bytes = payload.get(ISIN_OFFSET..ISIN_OFFSET + PREFIX_LEN)?;
    std::str::from_utf8(bytes).ok()
}

/// The 12-char `HHMMSSuuuuuu` time-of-day field, or `None` if too short.
pub fn time_of_day(payload: &[u8]) -> Option<&str> {
    let bytes = payload.get(TIME_OFFSET..TIME_OFFSET + TIME_LEN)?;
    std::str::from_utf8(bytes).ok()
}

/// Parse a right-padded ASCII decimal field, treating blank/unparsable
/// content as zero (matches the reference implementation's tolerant parse).
fn parse_qty(field: &[u8]) -> u64 {
    std::str::from_utf8(field)
        .ok()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0)
}

/// Ask/bid quantity for one hoga level (1-indexed, 1..=5).
///
/// Returns `None` if the payload is too short to contain this level.
pub fn hoga_quantities(payload: &[u8], level: usize) -> Option<(u64, u64)> {
    if level == 0 || level > HOGA_LEVELS_USED {
        return None;
    }
    let base = HOGA_BASE_OFFSET + (level - 1) * HOGA_RECORD_LEN;
    let ask_field = payload.get(base + HOGA_ASK_REL..base + HOGA_ASK_REL + HOGA_ASK_LEN)?;
    let bid_field = payload.get(base + HOGA_BID_REL..base + HOGA_BID_REL + HOGA_BID_LEN)?;
    Some((parse_qty(ask_field), parse_qty(bid_field)))
}

/// Sum ask/bid quantities across hoga levels 1..=5. Returns `None` if the
/// payload is too short to contain all five levels.
pub fn hoga_totals(payload: &[u8]) -> Option<(u64, u64)> {
    let mut ask_total = 0u64;
    let mut bid_total = 0u64;
    for level in 1..=HOGA_LEVELS_USED {
        let (ask, bid) = hoga_quantities(payload, level)?;
        ask_total += ask;
        bid_total += bid;
    }
    Some((ask_total, bid_total))
}
