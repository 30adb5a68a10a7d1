//! Simulation, receipt and outcome types.
//!
//! These are the artifacts a submission run produces: the relay's simulation
//! verdict, the on-chain receipt once a bundle lands, and the terminal
//! [`SubmissionOutcome`] handed back to the caller.

use crate::bundle::Bundle;
use alloy::primitives::B256;
use serde::{Deserialize, Serialize};

/// Transaction hash used to detect inclusion of a bundle as a whole.
pub type TxHash = B256;

/// Result of a relay bundle simulation.
///
/// `details` carries the relay's full diagnostic payload verbatim; the
/// sender only interprets the success flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
	pub success: bool,
	pub details: serde_json::Value,
}

impl SimulationResult {
	/// Interpret a raw relay response. A payload without a `success` member
	/// counts as a failed simulation.
	pub fn from_relay_payload(payload: serde_json::Value) -> Self {
		let success = payload
			.get("success")
			.and_then(serde_json::Value::as_bool)
			.unwrap_or(false);
		Self {
			success,
			details: payload,
		}
	}
}

/// State pinning options for a bundle simulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimOverrides {
	/// Simulate on top of this block instead of the latest one.
	pub parent_block: Option<u64>,
}

impl SimOverrides {
	pub fn parent(block: u64) -> Self {
		Self {
			parent_block: Some(block),
		}
	}
}

/// Execution status taken from an inclusion receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxStatus {
	Success,
	Failed,
}

/// Receipt of the representative transaction once it has been mined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InclusionReceipt {
	pub tx_hash: TxHash,
	pub block_number: u64,
	pub status: TxStatus,
}

/// Opaque acknowledgement returned by the relay for an accepted bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayAck {
	pub raw: serde_json::Value,
}

impl RelayAck {
	pub fn new(raw: serde_json::Value) -> Self {
		Self { raw }
	}

	/// The relay-assigned bundle hash, when the response carries one.
	pub fn bundle_hash(&self) -> Option<&str> {
		self.raw.get("bundleHash").and_then(serde_json::Value::as_str)
	}
}

/// Terminal artifact of one submission run.
///
/// A missing receipt means the window elapsed (or the watch was cancelled)
/// without inclusion; that is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionOutcome {
	pub bundle: Bundle,
	pub relay_ack: RelayAck,
	pub receipt: Option<InclusionReceipt>,
	pub post_simulation: Option<SimulationResult>,
}

impl SubmissionOutcome {
	pub fn included(&self) -> bool {
		self.receipt.is_some()
	}
}
