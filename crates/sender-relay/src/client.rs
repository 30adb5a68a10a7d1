//! MEV-Share relay client.
//!
//! Bundle simulation and submission over the relay's JSON-RPC endpoint.
//! Every request body is signed with the searcher identity key and attached
//! as the `X-Flashbots-Signature` header.

use crate::wire::{JsonRpcRequest, JsonRpcResponse, WireBundle, WireSimOverrides};
use alloy::primitives::keccak256;
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::SignerSync;
use async_trait::async_trait;
use sender_types::{
	Bundle, BundleRelay, RelayAck, RelaySection, Result, SenderError, SimOverrides,
	SimulationResult,
};
use serde_json::json;
use tracing::{debug, info};

/// How a relay call failed, before it is mapped onto the sender taxonomy.
enum RpcFailure {
	/// HTTP-level failure: connection, timeout, malformed body.
	Transport(String),
	/// The relay answered and declined: non-2xx status or a JSON-RPC error.
	Protocol(String),
}

pub struct MevShareRelay {
	http: reqwest::Client,
	url: String,
	signer: PrivateKeySigner,
}

impl MevShareRelay {
	pub fn new(url: impl Into<String>, signer: PrivateKeySigner) -> Self {
		Self {
			http: reqwest::Client::new(),
			url: url.into(),
			signer,
		}
	}

	pub fn from_config(config: &RelaySection) -> Result<Self> {
		let signer: PrivateKeySigner = config
			.auth_key
			.parse()
			.map_err(|e| SenderError::Config(format!("invalid relay auth key: {}", e)))?;
		Ok(Self::new(config.url.clone(), signer))
	}

	/// Flashbots request authentication: the signer's EIP-191 signature over
	/// the hex-encoded keccak digest of the request body.
	fn sign_request(&self, body_bytes: &[u8]) -> Result<String> {
		let digest = format!("0x{}", hex::encode(keccak256(body_bytes)));
		let sig = self
			.signer
			.sign_message_sync(digest.as_bytes())
			.map_err(|e| SenderError::Transport(format!("request signing failed: {}", e)))?;
		Ok(format!(
			"{:#x}:0x{}",
			self.signer.address(),
			hex::encode(sig.as_bytes())
		))
	}

	async fn rpc(
		&self,
		method: &str,
		params: serde_json::Value,
	) -> std::result::Result<serde_json::Value, RpcFailure> {
		let request = JsonRpcRequest::new(method, params);
		let body_bytes = serde_json::to_vec(&request)
			.map_err(|e| RpcFailure::Transport(e.to_string()))?;
		let signature = self
			.sign_request(&body_bytes)
			.map_err(|e| RpcFailure::Transport(e.to_string()))?;

		let response = self
			.http
			.post(&self.url)
			.header("Content-Type", "application/json")
			.header("X-Flashbots-Signature", signature)
			.body(body_bytes)
			.send()
			.await
			.map_err(|e| RpcFailure::Transport(format!("relay POST failed: {}", e)))?;

		let status = response.status();
		let text = response
			.text()
			.await
			.map_err(|e| RpcFailure::Transport(format!("relay response unreadable: {}", e)))?;

		if !status.is_success() {
			return Err(RpcFailure::Protocol(format!("{}: {}", status, text)));
		}

		let parsed: JsonRpcResponse = serde_json::from_str(&text)
			.map_err(|e| RpcFailure::Transport(format!("relay response malformed: {}", e)))?;

		if let Some(error) = parsed.error {
			return Err(RpcFailure::Protocol(format!(
				"{} (code {})",
				error.message, error.code
			)));
		}

		parsed
			.result
			.ok_or_else(|| RpcFailure::Protocol("relay response missing result".to_string()))
	}
}

#[async_trait]
impl BundleRelay for MevShareRelay {
	async fn simulate(
		&self,
		bundle: &Bundle,
		overrides: Option<&SimOverrides>,
	) -> Result<SimulationResult> {
		let wire = WireBundle::from(bundle);
		let params = match overrides {
			Some(overrides) => json!([wire, WireSimOverrides::from(overrides)]),
			None => json!([wire]),
		};

		debug!(
			target_block = bundle.inclusion.target_block,
			parent_block = overrides.and_then(|o| o.parent_block),
			"Simulating bundle"
		);

		match self.rpc("mev_simBundle", params).await {
			Ok(payload) => Ok(SimulationResult::from_relay_payload(payload)),
			Err(RpcFailure::Protocol(message)) => Err(SenderError::Simulation {
				details: json!({ "error": message }),
			}),
			Err(RpcFailure::Transport(message)) => Err(SenderError::Transport(message)),
		}
	}

	async fn send(&self, bundle: &Bundle) -> Result<RelayAck> {
		let wire = WireBundle::from(bundle);

		match self.rpc("mev_sendBundle", json!([wire])).await {
			Ok(payload) => {
				let ack = RelayAck::new(payload);
				info!(
					target_block = bundle.inclusion.target_block,
					max_block = bundle.inclusion.max_block,
					txs = bundle.body.len(),
					bundle_hash = ack.bundle_hash(),
					"Bundle submitted to relay"
				);
				Ok(ack)
			}
			Err(RpcFailure::Protocol(message)) => Err(SenderError::RelayRejected(message)),
			Err(RpcFailure::Transport(message)) => Err(SenderError::Transport(message)),
		}
	}
}
