//! Trait seams between the sender core and its external collaborators.
//!
//! The core is written against these interfaces; production wiring plugs in
//! an RPC-backed chain reader and the MEV-Share relay client, tests plug in
//! mocks.

use crate::{
	bundle::{Bundle, BundleEntry},
	error::Result,
	fees::{FeeData, FeeQuote},
	outcome::{InclusionReceipt, RelayAck, SimOverrides, SimulationResult, TxHash},
};
use async_trait::async_trait;

/// Read-only view of chain state.
#[async_trait]
pub trait ChainReader: Send + Sync {
	async fn get_fee_data(&self) -> Result<FeeData>;

	async fn get_block_number(&self) -> Result<u64>;

	/// Receipt for a mined transaction, `None` while it is not included.
	async fn get_transaction_receipt(&self, hash: &TxHash) -> Result<Option<InclusionReceipt>>;
}

/// Bundle relay endpoint: dry-run simulation and actual submission.
#[async_trait]
pub trait BundleRelay: Send + Sync {
	/// Simulate a bundle against current chain state, or against the state
	/// pinned by `overrides`.
	async fn simulate(
		&self,
		bundle: &Bundle,
		overrides: Option<&SimOverrides>,
	) -> Result<SimulationResult>;

	/// Submit a bundle for inclusion. Protocol-level declines surface as
	/// [`SenderError::RelayRejected`](crate::SenderError::RelayRejected).
	async fn send(&self, bundle: &Bundle) -> Result<RelayAck>;
}

/// Supply of pre-signed transactions for one submission attempt.
///
/// The fee quote flows out to whatever signs the transactions; opaque signed
/// bytes flow back. Key handling stays entirely behind this seam.
#[async_trait]
pub trait EntrySource: Send + Sync {
	async fn entries(&self, quote: &FeeQuote) -> Result<Vec<BundleEntry>>;
}

/// Entry source over an already-signed, fixed list of transactions.
pub struct StaticEntries(pub Vec<BundleEntry>);

#[async_trait]
impl EntrySource for StaticEntries {
	async fn entries(&self, _quote: &FeeQuote) -> Result<Vec<BundleEntry>> {
		Ok(self.0.clone())
	}
}
