//! Core submission pipeline.
//!
//! One submission run is a fixed sequence: derive fees, collect pre-signed
//! entries, assemble the bundle, simulate it through the gate, submit to the
//! relay, then watch the chain for inclusion until the window elapses.
//! Everything external sits behind the trait seams in `sender-types`.

pub mod assemble;
pub mod fees;
pub mod gate;
pub mod monitor;
pub mod orchestrator;

#[cfg(test)]
pub(crate) mod test_util;

pub use assemble::BundleAssembler;
pub use fees::FeeEstimator;
pub use gate::{GatedBundle, SubmissionGate, Submitted};
pub use monitor::{InclusionMonitor, WatchResult};
pub use orchestrator::{BundleSender, BundleSenderBuilder};
