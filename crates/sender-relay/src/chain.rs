//! Chain state access through an alloy provider.

use alloy::primitives::U256;
use alloy::providers::{Provider, RootProvider};
use async_trait::async_trait;
use sender_types::{
	ChainReader, FeeData, InclusionReceipt, Result, SenderError, TxHash, TxStatus,
};

/// [`ChainReader`] backed by an alloy JSON-RPC provider.
///
/// Read-only: the sender never submits transactions through the chain node,
/// only through the relay.
pub struct AlloyChain<P> {
	provider: P,
}

impl<P> AlloyChain<P> {
	pub fn new(provider: P) -> Self {
		Self { provider }
	}
}

impl AlloyChain<RootProvider> {
	/// Connect a plain HTTP provider to the given endpoint.
	pub fn connect_http(rpc_url: &str) -> Result<Self> {
		let url = rpc_url
			.parse()
			.map_err(|e| SenderError::Config(format!("invalid RPC URL: {}", e)))?;
		Ok(Self::new(RootProvider::new_http(url)))
	}
}

#[async_trait]
impl<P: Provider> ChainReader for AlloyChain<P> {
	async fn get_fee_data(&self) -> Result<FeeData> {
		let estimate = self
			.provider
			.estimate_eip1559_fees()
			.await
			.map_err(|e| SenderError::Transport(format!("fee estimate failed: {}", e)))?;

		Ok(FeeData {
			max_fee_per_gas: Some(U256::from(estimate.max_fee_per_gas)),
			max_priority_fee_per_gas: Some(U256::from(estimate.max_priority_fee_per_gas)),
		})
	}

	async fn get_block_number(&self) -> Result<u64> {
		self.provider
			.get_block_number()
			.await
			.map_err(|e| SenderError::Transport(format!("block number lookup failed: {}", e)))
	}

	async fn get_transaction_receipt(&self, hash: &TxHash) -> Result<Option<InclusionReceipt>> {
		let receipt = self
			.provider
			.get_transaction_receipt(*hash)
			.await
			.map_err(|e| SenderError::Transport(format!("receipt lookup failed: {}", e)))?;

		Ok(receipt.map(|receipt| InclusionReceipt {
			tx_hash: receipt.transaction_hash,
			block_number: receipt.block_number.unwrap_or_default(),
			status: if receipt.status() {
				TxStatus::Success
			} else {
				TxStatus::Failed
			},
		}))
	}
}
