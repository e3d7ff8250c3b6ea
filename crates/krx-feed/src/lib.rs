//! # krx-feed
//!
//! Capture-side pipeline: Symbol Classifier, Multicast Ingestor, in-process
//! pub/sub bus, and Archiver (spec §4.1-§4.3, §5, §6).

pub mod archiver;
pub mod bus;
pub mod catalog;
pub mod classifier;
pub mod ingestor;

pub use bus::Bus;
pub use classifier::SymbolClassifier;
