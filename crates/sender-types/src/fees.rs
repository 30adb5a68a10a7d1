//! Fee data as reported by the network and the quote derived from it.

use alloy::primitives::U256;
use serde::{Deserialize, Serialize};

/// Raw EIP-1559 fee estimate from the chain provider.
///
/// Either component may be absent; the fee estimator substitutes configured
/// fallbacks for missing values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeData {
	pub max_fee_per_gas: Option<U256>,
	pub max_priority_fee_per_gas: Option<U256>,
}

/// Fee pair attached to the transactions of one submission attempt.
///
/// Invariant: `max_fee_per_gas >= max_priority_fee_per_gas`. Recomputed per
/// attempt, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeQuote {
	pub max_fee_per_gas: U256,
	pub max_priority_fee_per_gas: U256,
}
