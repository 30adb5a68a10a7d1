//! Wire schema for the relay's bundle protocol.
//!
//! The relay owns these shapes; this module only conforms to them. Block
//! heights travel as 0x-prefixed hex quantities, transaction bytes as
//! 0x-prefixed RLP hex. Hidden hints and empty builder lists are omitted
//! from the payload entirely so the relay's defaults apply.

use alloy::primitives::{Bytes, U64};
use sender_types::{Bundle, Hints, SimOverrides};
use serde::{Deserialize, Serialize};

/// Bundle schema version the relay expects.
pub const BUNDLE_VERSION: &str = "v0.1";

#[derive(Debug, Serialize)]
pub struct WireBundle {
	pub version: &'static str,
	pub inclusion: WireInclusion,
	pub body: Vec<WireEntry>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub privacy: Option<WirePrivacy>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireInclusion {
	pub block: U64,
	pub max_block: U64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireEntry {
	pub tx: Bytes,
	pub can_revert: bool,
}

#[derive(Debug, Serialize)]
pub struct WirePrivacy {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub hints: Option<WireHints>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub builders: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireHints {
	#[serde(skip_serializing_if = "is_false")]
	pub tx_hash: bool,
	#[serde(skip_serializing_if = "is_false")]
	pub calldata: bool,
	#[serde(skip_serializing_if = "is_false")]
	pub logs: bool,
	#[serde(skip_serializing_if = "is_false")]
	pub function_selector: bool,
	#[serde(skip_serializing_if = "is_false")]
	pub contract_address: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireSimOverrides {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub parent_block: Option<U64>,
}

fn is_false(value: &bool) -> bool {
	!*value
}

impl From<&Hints> for WireHints {
	fn from(hints: &Hints) -> Self {
		Self {
			tx_hash: hints.tx_hash,
			calldata: hints.calldata,
			logs: hints.logs,
			function_selector: hints.function_selector,
			contract_address: hints.contract_address,
		}
	}
}

impl From<&Bundle> for WireBundle {
	fn from(bundle: &Bundle) -> Self {
		let hints = (!bundle.privacy.hints.is_empty()).then(|| WireHints::from(&bundle.privacy.hints));
		let builders =
			(!bundle.privacy.builders.is_empty()).then(|| bundle.privacy.builders.clone());
		let privacy = (hints.is_some() || builders.is_some())
			.then_some(WirePrivacy { hints, builders });

		Self {
			version: BUNDLE_VERSION,
			inclusion: WireInclusion {
				block: U64::from(bundle.inclusion.target_block),
				max_block: U64::from(bundle.inclusion.max_block),
			},
			body: bundle
				.body
				.iter()
				.map(|entry| WireEntry {
					tx: entry.tx.clone(),
					can_revert: entry.can_revert,
				})
				.collect(),
			privacy,
		}
	}
}

impl From<&SimOverrides> for WireSimOverrides {
	fn from(overrides: &SimOverrides) -> Self {
		Self {
			parent_block: overrides.parent_block.map(U64::from),
		}
	}
}

/// JSON-RPC 2.0 request envelope.
#[derive(Debug, Serialize)]
pub struct JsonRpcRequest<'a> {
	pub jsonrpc: &'static str,
	pub id: u64,
	pub method: &'a str,
	pub params: serde_json::Value,
}

impl<'a> JsonRpcRequest<'a> {
	pub fn new(method: &'a str, params: serde_json::Value) -> Self {
		Self {
			jsonrpc: "2.0",
			id: 1,
			method,
			params,
		}
	}
}

/// JSON-RPC 2.0 response envelope.
#[derive(Debug, Deserialize)]
pub struct JsonRpcResponse {
	pub result: Option<serde_json::Value>,
	pub error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
pub struct JsonRpcError {
	pub code: i64,
	pub message: String,
}
