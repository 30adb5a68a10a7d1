//! Sender configuration types.
//!
//! Deserialized from TOML by `sender-config`. Every tunable the core uses
//! (fee fallbacks, safety tip, inclusion window, poll interval) lives here
//! with documented defaults so tests can construct deterministic senders.

use crate::bundle::PrivacyDirective;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SenderConfig {
	#[serde(default)]
	pub sender: SenderSection,
	pub chain: ChainSection,
	pub relay: RelaySection,
	#[serde(default)]
	pub fees: FeesSection,
	#[serde(default)]
	pub inclusion: InclusionSection,
	#[serde(default)]
	pub privacy: PrivacyDirective,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SenderSection {
	pub name: String,
	pub log_level: String,
}

impl Default for SenderSection {
	fn default() -> Self {
		Self {
			name: "mev-bundle-sender".to_string(),
			log_level: "info".to_string(),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainSection {
	/// HTTP JSON-RPC endpoint of the chain node.
	pub rpc_url: String,
	pub chain_id: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelaySection {
	/// MEV-Share relay endpoint.
	pub url: String,
	/// Private key identifying the searcher to the relay. Only ever used to
	/// sign request headers, never transactions.
	pub auth_key: String,
}

/// Fee derivation constants.
///
/// Fallbacks substitute for fee components the provider omits; the tip is a
/// fixed additive safety margin on top of the network priority fee.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct FeesSection {
	pub fallback_max_fee_per_gas: u64,
	pub fallback_priority_fee_per_gas: u64,
	pub tip_wei: u64,
}

impl Default for FeesSection {
	fn default() -> Self {
		Self {
			fallback_max_fee_per_gas: 42,
			fallback_priority_fee_per_gas: 2,
			// 1 gwei
			tip_wei: 1_000_000_000,
		}
	}
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct InclusionSection {
	/// Blocks past the target the bundle stays eligible for.
	pub window_size: u64,
	/// Height poll cadence while watching for inclusion.
	pub poll_interval_ms: u64,
}

impl Default for InclusionSection {
	fn default() -> Self {
		Self {
			window_size: 20,
			poll_interval_ms: 2000,
		}
	}
}

impl SenderConfig {
	/// Structural validation beyond what serde enforces.
	pub fn validate(&self) -> std::result::Result<(), String> {
		if self.chain.rpc_url.is_empty() {
			return Err("chain.rpc_url must not be empty".to_string());
		}
		if self.relay.url.is_empty() {
			return Err("relay.url must not be empty".to_string());
		}
		let key = self.relay.auth_key.strip_prefix("0x").unwrap_or(&self.relay.auth_key);
		if key.len() != 64 || !key.bytes().all(|b| b.is_ascii_hexdigit()) {
			return Err("relay.auth_key must be 32 bytes of hex".to_string());
		}
		if self.inclusion.window_size == 0 {
			return Err("inclusion.window_size must be at least 1".to_string());
		}
		if self.inclusion.poll_interval_ms == 0 {
			return Err("inclusion.poll_interval_ms must be at least 1".to_string());
		}
		Ok(())
	}
}
