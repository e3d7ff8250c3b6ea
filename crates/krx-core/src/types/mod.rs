//! Core data types shared across the capture and analysis crates.

pub mod envelope;
pub mod mm;
pub mod snapshot;
pub mod stream;
pub mod wire;

pub use envelope::CaptureEnvelope;
pub use mm::{MmSlot, TimelineState};
pub use snapshot::Snapshot;
pub use stream::{IngestSide, LogicalStream, OptionSide};
