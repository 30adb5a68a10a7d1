//! Bundle data model.
//!
//! This module defines the types that make up a submittable bundle: the
//! signed transaction entries, the inclusion window they target, and the
//! privacy directive controlling what builders get to see.

use alloy::primitives::Bytes;
use serde::{Deserialize, Serialize};

/// One pre-signed transaction inside a bundle.
///
/// The transaction bytes are opaque to the sender; signing happens upstream
/// and the bytes are only ordered, hashed and forwarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleEntry {
	/// Raw signed transaction bytes.
	pub tx: Bytes,
	/// Whether the bundle stays valid if this transaction reverts.
	pub can_revert: bool,
}

/// Inclusive range of block heights a bundle is eligible for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InclusionWindow {
	/// First block the bundle targets.
	pub target_block: u64,
	/// Last block the bundle remains eligible for.
	pub max_block: u64,
}

impl InclusionWindow {
	/// Window spanning `target_block ..= target_block + size`.
	pub fn spanning(target_block: u64, size: u64) -> Self {
		Self {
			target_block,
			max_block: target_block.saturating_add(size),
		}
	}

	pub fn contains(&self, block: u64) -> bool {
		block >= self.target_block && block <= self.max_block
	}

	/// Number of blocks between target and max.
	pub fn size(&self) -> u64 {
		self.max_block - self.target_block
	}
}

/// Which bundle fields may be revealed to builders.
///
/// Every flag defaults to hidden; callers opt individual fields in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hints {
	pub tx_hash: bool,
	pub calldata: bool,
	pub logs: bool,
	pub function_selector: bool,
	pub contract_address: bool,
}

impl Hints {
	/// Reveal every supported field.
	pub fn all() -> Self {
		Self {
			tx_hash: true,
			calldata: true,
			logs: true,
			function_selector: true,
			contract_address: true,
		}
	}

	pub fn is_empty(&self) -> bool {
		*self == Self::default()
	}
}

/// Caller-specified privacy controls for a bundle.
///
/// An empty builder list defers to the relay's default builder set; the
/// sender never fabricates one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrivacyDirective {
	pub hints: Hints,
	pub builders: Vec<String>,
}

/// An ordered set of transactions submitted as an atomic unit.
///
/// Entry order is execution order. A bundle is immutable once it has been
/// handed to the submission gate; retargeting requires a fresh bundle with
/// a fresh window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundle {
	pub inclusion: InclusionWindow,
	pub body: Vec<BundleEntry>,
	pub privacy: PrivacyDirective,
}
