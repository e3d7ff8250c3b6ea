//! # krx-analysis
//!
//! The MM Analyzer core: per-instrument delta extraction, cross-side
//! pairing, residual reconciliation, the two-slot presence state machine,
//! duration aggregation, and the report emitter (spec §4.4, §4.5, §6).

pub mod aggregate;
pub mod analyze;
pub mod change;
pub mod duty;
pub mod input;
pub mod master;
pub mod pairing;
pub mod reconcile;
pub mod report;
pub mod state_machine;
pub mod strikes;

pub use aggregate::AnalysisResult;
pub use analyze::analyze_option;
pub use duty::DutyRequirements;
pub use master::OptionsMaster;
pub use report::{build as build_report, Report};
