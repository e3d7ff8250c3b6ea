//! Symbol catalog access (spec §4.3).
//!
//! The classifier needs to know which 6-character ISIN prefixes denote
//! stock-underlying futures/options versus index-underlying ones. That
//! roster lives in an external Postgres catalog, not in the wire payload
//! itself. A catalog that cannot be reached is not fatal — the classifier
//! falls back to an empty prefix set and every symbol is treated as index.

use std::collections::HashSet;

use sqlx::PgPool;
use tracing::warn;

/// Stock-underlying ISIN prefixes, split by futures/options roster.
#[derive(Debug, Clone, Default)]
pub struct PrefixSets {
    pub futures: HashSet<String>,
    pub options: HashSet<String>,
}

/// Connect to the catalog database and load both rosters.
///
/// Each table is queried independently; a failure on either table falls back
/// to an empty set for that table rather than aborting the whole load
/// (spec §4.3, §7 — catalog unavailability degrades classification, it does
/// not stop ingestion).
pub async fn load_prefix_sets(database_url: &str) -> PrefixSets {
    let pool = match PgPool::connect(database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            warn!("catalog connection failed: {e} — classifying everything as index");
            return PrefixSets::default();
        }
    };

    let futures = load_roster(&pool, "futures_master").await;
    let options = load_roster(&pool, "options_master").await;
    PrefixSets { futures, options }
}

async fn load_roster(pool: &PgPool, table: &str) -> HashSet<String> {
    let result = match table {
        "futures_master" => sqlx::query_as::<_, (String,)>("SELECT isin FROM futures_master").fetch_all(pool).await,
        "options_master" => sqlx::query_as::<_, (String,)>("SELECT isin FROM options_master").fetch_all(pool).await,
        _ => unreachable!("load_roster called with unknown table"),
    };

    match result {
        Ok(rows) => rows.into_iter().map(|(isin,)| isin.chars().take(6).collect()).collect(),
        Err(e) => {
            warn!("{table} catalog query failed: {e} — falling back to empty roster");
            HashSet::new()
        }
    }
}
