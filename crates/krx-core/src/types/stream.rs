//! Logical stream identity — the six classification outcomes a packet can
//! be routed to, and the bus channel / archive filename each maps to.

use serde::{Deserialize, Serialize};

/// The declared side of an ingestor channel, taken from configuration (not
/// derived from the wire payload). Combined with the symbol classifier's
/// stock/index verdict to produce a [`LogicalStream`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngestSide {
    Futures,
    Call,
    Put,
}

/// Call or put — the half of [`IngestSide`] that applies to option channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionSide {
    Call,
    Put,
}

impl TryFrom<IngestSide> for OptionSide {
    type Error = ();

    fn try_from(side: IngestSide) -> Result<Self, Self::Error> {
        match side {
            IngestSide::Call => Ok(OptionSide::Call),
            IngestSide::Put => Ok(OptionSide::Put),
            IngestSide::Futures => Err(()),
        }
    }
}

/// One of the six logical streams a packet is classified into.
///
/// These map 1:1 to the bus channel names and archive filenames in spec §6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalStream {
    FuturesStock,
    FuturesIndex,
    OptionsCallStock,
    OptionsCallIndex,
    OptionsPutStock,
    OptionsPutIndex,
}

impl LogicalStream {
    /// All six variants, in a fixed order — used to iterate channels / files.
    pub const ALL: [LogicalStream; 6] = [
        LogicalStream::FuturesStock,
        LogicalStream::FuturesIndex,
        LogicalStream::OptionsCallStock,
        LogicalStream::OptionsCallIndex,
        LogicalStream::OptionsPutStock,
        LogicalStream::OptionsPutIndex,
    ];

    /// The literal bus channel name (spec §6).
    pub const fn channel_name(self) -> &'static str {
        match self {
            LogicalStream::FuturesStock => "krx:futures:stock",
            LogicalStream::FuturesIndex => "krx:futures:index",
            LogicalStream::OptionsCallStock => "krx:options:call:stock",
            LogicalStream::OptionsCallIndex => "krx:options:call:index",
            LogicalStream::OptionsPutStock => "krx:options:put:stock",
            LogicalStream::OptionsPutIndex => "krx:options:put:index",
        }
    }

    /// The canonical archive filename (spec §6).
    pub const fn archive_filename(self) -> &'static str {
        match self {
            LogicalStream::FuturesStock => "futures_stock.log",
            LogicalStream::FuturesIndex => "futures_index.log",
            LogicalStream::OptionsCallStock => "options_call_stock.log",
            LogicalStream::OptionsCallIndex => "options_call_index.log",
            LogicalStream::OptionsPutStock => "options_put_stock.log",
            LogicalStream::OptionsPutIndex => "options_put_index.log",
        }
    }
}

impl std::fmt::Display for LogicalStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.channel_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_channels_distinct() {
        let names: Vec<_> = LogicalStream::ALL.iter().map(|s| s.channel_name()).collect();
        let mut dedup = names.clone();
        dedup.sort_unstable();
        dedup.dedup();
        assert_eq!(names.len(), dedup.len());
    }

    #[test]
    fn all_filenames_distinct() {
        let names: Vec<_> = LogicalStream::ALL.iter().map(|s| s.archive_filename()).collect();
        let mut dedup = names.clone();
        dedup.sort_unstable();
        dedup.dedup();
        assert_eq!(names.len(), dedup.len());
    }
}
