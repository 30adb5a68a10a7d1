//! Top-level submission pipeline.
//!
//! `BundleSender` drives one run end to end: fee quote, entry supply,
//! assembly, the simulation gate, relay submission, then the inclusion
//! watch. Gate and submit fail fast; the watch never fails, it times out
//! gracefully. No state is retained across runs, so independent runs can
//! proceed concurrently over the same shared handles.

use crate::{
	assemble::BundleAssembler,
	fees::FeeEstimator,
	gate::SubmissionGate,
	monitor::InclusionMonitor,
};
use alloy::primitives::{keccak256, Bytes};
use sender_types::{
	BundleRelay, ChainReader, EntrySource, FeesSection, InclusionSection, PrivacyDirective,
	Result, SenderConfig, SenderError, SubmissionOutcome, TxHash,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, info};

/// Hash function for representative-transaction detection. Supplied at
/// construction so the core assumes nothing about the transaction encoding.
pub type TxHasher = fn(&Bytes) -> TxHash;

fn default_tx_hasher(tx: &Bytes) -> TxHash {
	keccak256(tx)
}

pub struct BundleSender {
	chain: Arc<dyn ChainReader>,
	estimator: FeeEstimator,
	assembler: BundleAssembler,
	gate: SubmissionGate,
	monitor: InclusionMonitor,
	tx_hasher: TxHasher,
	cancel_tx: broadcast::Sender<()>,
}

impl BundleSender {
	pub fn builder() -> BundleSenderBuilder {
		BundleSenderBuilder::new()
	}

	/// Handle for cancelling in-flight inclusion watches. Sending on it
	/// stops every watch started by this sender.
	pub fn canceller(&self) -> broadcast::Sender<()> {
		self.cancel_tx.clone()
	}

	/// Run one submission attempt.
	///
	/// When `target_block` is not pinned by the caller, the bundle targets
	/// the block after the current head. Simulation and relay failures
	/// abort the run; a bundle that simply never lands comes back as an
	/// outcome with no receipt.
	pub async fn run(
		&self,
		source: &dyn EntrySource,
		privacy: PrivacyDirective,
		target_block: Option<u64>,
	) -> Result<SubmissionOutcome> {
		let fee_data = self.chain.get_fee_data().await?;
		let quote = self.estimator.quote(&fee_data);
		debug!(
			max_fee = %quote.max_fee_per_gas,
			priority_fee = %quote.max_priority_fee_per_gas,
			"Derived fee quote"
		);

		let entries = source.entries(&quote).await?;
		if entries.is_empty() {
			return Err(SenderError::EmptyBundle);
		}

		let target_block = match target_block {
			Some(block) => block,
			None => self.chain.get_block_number().await? + 1,
		};

		let bundle = self.assembler.assemble(entries, target_block, privacy);
		let representative = (self.tx_hasher)(&bundle.body[0].tx);
		info!(
			target_block,
			max_block = bundle.inclusion.max_block,
			txs = bundle.body.len(),
			tx_hash = %representative,
			"Submitting bundle"
		);

		let gated = self.gate.check(bundle).await?;
		let submitted = self.gate.submit(gated).await?;

		let watch = self
			.monitor
			.watch(&submitted.bundle, representative, self.cancel_tx.subscribe())
			.await;

		Ok(SubmissionOutcome {
			bundle: submitted.bundle,
			relay_ack: submitted.ack,
			receipt: watch.receipt,
			post_simulation: watch.post_simulation,
		})
	}
}

/// Builder for [`BundleSender`].
pub struct BundleSenderBuilder {
	chain: Option<Arc<dyn ChainReader>>,
	relay: Option<Arc<dyn BundleRelay>>,
	fees: FeesSection,
	inclusion: InclusionSection,
	tx_hasher: TxHasher,
}

impl BundleSenderBuilder {
	pub fn new() -> Self {
		Self {
			chain: None,
			relay: None,
			fees: FeesSection::default(),
			inclusion: InclusionSection::default(),
			tx_hasher: default_tx_hasher,
		}
	}

	pub fn with_chain(mut self, chain: Arc<dyn ChainReader>) -> Self {
		self.chain = Some(chain);
		self
	}

	pub fn with_relay(mut self, relay: Arc<dyn BundleRelay>) -> Self {
		self.relay = Some(relay);
		self
	}

	pub fn with_config(mut self, config: &SenderConfig) -> Self {
		self.fees = config.fees;
		self.inclusion = config.inclusion;
		self
	}

	pub fn with_fees(mut self, fees: FeesSection) -> Self {
		self.fees = fees;
		self
	}

	pub fn with_inclusion(mut self, inclusion: InclusionSection) -> Self {
		self.inclusion = inclusion;
		self
	}

	pub fn with_tx_hasher(mut self, tx_hasher: TxHasher) -> Self {
		self.tx_hasher = tx_hasher;
		self
	}

	pub fn build(self) -> Result<BundleSender> {
		let chain = self
			.chain
			.ok_or_else(|| SenderError::Config("no chain reader configured".to_string()))?;
		let relay = self
			.relay
			.ok_or_else(|| SenderError::Config("no bundle relay configured".to_string()))?;

		let (cancel_tx, _) = broadcast::channel(16);

		Ok(BundleSender {
			chain: chain.clone(),
			estimator: FeeEstimator::new(&self.fees),
			assembler: BundleAssembler::new(self.inclusion.window_size),
			gate: SubmissionGate::new(relay.clone()),
			monitor: InclusionMonitor::new(
				chain,
				relay,
				Duration::from_millis(self.inclusion.poll_interval_ms),
			),
			tx_hasher: self.tx_hasher,
			cancel_tx,
		})
	}
}

impl Default for BundleSenderBuilder {
	fn default() -> Self {
		Self::new()
	}
}
