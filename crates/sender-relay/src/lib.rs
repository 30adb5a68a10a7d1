//! Network-facing implementations of the sender's trait seams.
//!
//! [`MevShareRelay`] speaks the relay's JSON-RPC protocol (`mev_simBundle`,
//! `mev_sendBundle`) with Flashbots request authentication; [`AlloyChain`]
//! reads chain state through an alloy provider.

pub mod chain;
pub mod client;
pub mod wire;

pub use chain::AlloyChain;
pub use client::MevShareRelay;
