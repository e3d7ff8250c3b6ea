//! Symbol Classifier (SC, spec §4.3).
//!
//! Combines a packet's declared [`IngestSide`] with the catalog-backed
//! stock/index verdict on its 6-character ISIN prefix to pick one of the
//! six [`LogicalStream`] values.

use krx_core::types::{IngestSide, LogicalStream, OptionSide};

use crate::catalog::{self, PrefixSets};

/// Stateless classifier over the loaded catalog rosters.
pub struct SymbolClassifier {
    sets: PrefixSets,
}

impl SymbolClassifier {
    pub fn new(sets: PrefixSets) -> Self {
        Self { sets }
    }

    /// Load the classifier from the catalog database, falling back to an
    /// empty roster (everything classified as index) on connection failure.
    pub async fn load(database_url: &str) -> Self {
        Self::new(catalog::load_prefix_sets(database_url).await)
    }

    /// Classify a futures packet's 6-character ISIN prefix.
    pub fn classify_futures(&self, prefix: &str) -> LogicalStream {
        if self.sets.futures.contains(prefix) {
            LogicalStream::FuturesStock
        } else {
            LogicalStream::FuturesIndex
        }
    }

    /// Classify an options packet's 6-character ISIN prefix, given its side.
    pub fn classify_option(&self, prefix: &str, side: OptionSide) -> LogicalStream {
        let is_stock = self.sets.options.contains(prefix);
        match (side, is_stock) {
            (OptionSide::Call, true) => LogicalStream::OptionsCallStock,
            (OptionSide::Call, false) => LogicalStream::OptionsCallIndex,
            (OptionSide::Put, true) => LogicalStream::OptionsPutStock,
            (OptionSide::Put, false) => LogicalStream::OptionsPutIndex,
        }
    }

    /// Classify a packet given its raw declared side and ISIN prefix.
    pub fn classify(&self, side: IngestSide, prefix: &str) -> LogicalStream {
        match OptionSide::try_from(side) {
            Ok(option_side) => self.classify_option(prefix, option_side),
            Err(()) => self.classify_futures(prefix),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sets() -> PrefixSets {
        let mut futures = std::collections::HashSet::new();
        futures.insert("KR41KS".to_string());
        let mut options = std::collections::HashSet::new();
        options.insert("KR41KS".to_string());
        PrefixSets { futures, options }
    }

    #[test]
    fn futures_stock_vs_index() {
        let sc = SymbolClassifier::new(sets());
        assert_eq!(sc.classify_futures("KR41KS"), LogicalStream::FuturesStock);
        assert_eq!(sc.classify_futures("KR4101"), LogicalStream::FuturesIndex);
    }

    #[test]
    fn options_call_and_put_stock_vs_index() {
        let sc = SymbolClassifier::new(sets());
        assert_eq!(sc.classify_option("KR41KS", OptionSide::Call), LogicalStream::OptionsCallStock);
        assert_eq!(sc.classify_option("KR41KS", OptionSide::Put), LogicalStream::OptionsPutStock);
        assert_eq!(sc.classify_option("KR4101", OptionSide::Call), LogicalStream::OptionsCallIndex);
        assert_eq!(sc.classify_option("KR4101", OptionSide::Put), LogicalStream::OptionsPutIndex);
    }

    #[test]
    fn classify_dispatches_on_declared_side() {
        let sc = SymbolClassifier::new(sets());
        assert_eq!(sc.classify(IngestSide::Futures, "KR41KS"), LogicalStream::FuturesStock);
        assert_eq!(sc.classify(IngestSide::Call, "KR4101"), LogicalStream::OptionsCallIndex);
    }

    #[test]
    fn empty_roster_classifies_everything_as_index() {
        let sc = SymbolClassifier::new(PrefixSets::default());
        assert_eq!(sc.classify_futures("KR41KS"), LogicalStream::FuturesIndex);
        assert_eq!(sc.classify_option("KR41KS", OptionSide::Call), LogicalStream::OptionsCallIndex);
    }
}
