//! Inclusion monitoring.
//!
//! After submission the monitor polls chain height through the bundle's
//! inclusion window, looking the representative transaction up once per
//! reached height. Height checks use `>=` so skipped blocks never stall the
//! watch; a mined receipt stays retrievable at any later height.

use sender_types::{
	Bundle, BundleRelay, ChainReader, InclusionReceipt, SimOverrides, SimulationResult, TxHash,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

pub struct InclusionMonitor {
	chain: Arc<dyn ChainReader>,
	relay: Arc<dyn BundleRelay>,
	poll_interval: Duration,
}

/// What the watch observed. A missing receipt means the window elapsed or
/// the watch was cancelled; neither is an error.
#[derive(Debug)]
pub struct WatchResult {
	pub receipt: Option<InclusionReceipt>,
	pub post_simulation: Option<SimulationResult>,
}

impl WatchResult {
	fn not_included() -> Self {
		Self {
			receipt: None,
			post_simulation: None,
		}
	}
}

impl InclusionMonitor {
	pub fn new(
		chain: Arc<dyn ChainReader>,
		relay: Arc<dyn BundleRelay>,
		poll_interval: Duration,
	) -> Self {
		Self {
			chain,
			relay,
			poll_interval,
		}
	}

	/// Watch for the representative transaction until it is mined or the
	/// window's last block has been checked. Transient lookup failures are
	/// tolerated; the next tick retries. Cancellation stops the watch
	/// immediately.
	pub async fn watch(
		&self,
		bundle: &Bundle,
		tx_hash: TxHash,
		mut cancel: broadcast::Receiver<()>,
	) -> WatchResult {
		let window = bundle.inclusion;
		info!(
			%tx_hash,
			target_block = window.target_block,
			max_block = window.max_block,
			"Watching for bundle inclusion"
		);

		for height in window.target_block..=window.max_block {
			// Wait until the chain reaches this height.
			loop {
				match self.chain.get_block_number().await {
					Ok(current) if current >= height => break,
					Ok(current) => {
						debug!(current, waiting_for = height, "Chain below watch height")
					}
					Err(error) => debug!(%error, "Height poll failed, retrying"),
				}

				tokio::select! {
					_ = tokio::time::sleep(self.poll_interval) => {}
					_ = cancel.recv() => {
						info!(%tx_hash, "Inclusion watch cancelled");
						return WatchResult::not_included();
					}
				}
			}

			match self.chain.get_transaction_receipt(&tx_hash).await {
				Ok(Some(receipt)) => {
					info!(
						block = receipt.block_number,
						status = ?receipt.status,
						"Bundle included"
					);
					let post_simulation = self.resimulate(bundle, &receipt).await;
					return WatchResult {
						receipt: Some(receipt),
						post_simulation,
					};
				}
				Ok(None) => debug!(height, "Not included at height, continuing"),
				Err(error) => {
					// Tolerated: the receipt stays retrievable, so the next
					// height's lookup covers this one.
					debug!(%error, height, "Receipt lookup failed, retrying at next height")
				}
			}
		}

		info!(
			%tx_hash,
			max_block = window.max_block,
			"Bundle not included within window"
		);
		WatchResult::not_included()
	}

	/// Re-run the bundle simulation pinned to the parent of the block that
	/// actually included it, which can be later than the first targeted
	/// block.
	async fn resimulate(
		&self,
		bundle: &Bundle,
		receipt: &InclusionReceipt,
	) -> Option<SimulationResult> {
		let parent_block = receipt.block_number.saturating_sub(1);
		match self
			.relay
			.simulate(bundle, Some(&SimOverrides::parent(parent_block)))
			.await
		{
			Ok(simulation) => Some(simulation),
			Err(error) => {
				warn!(%error, parent_block, "Post-inclusion simulation failed");
				None
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_util::{receipt_at, test_bundle, MockChain, MockRelay};
	use sender_types::TxStatus;

	fn monitor(chain: Arc<MockChain>, relay: Arc<MockRelay>) -> InclusionMonitor {
		InclusionMonitor::new(chain, relay, Duration::from_millis(1))
	}

	#[tokio::test]
	async fn receipt_inside_window_is_found() {
		// Receipt becomes visible once the chain reaches height 1005.
		let chain = Arc::new(
			MockChain::advancing_from(999).with_receipt_at(1005, receipt_at(1005)),
		);
		let relay = Arc::new(MockRelay::ok());
		let (_cancel_tx, cancel_rx) = broadcast::channel(1);

		let result = monitor(chain, relay.clone())
			.watch(&test_bundle(1000, 20), TxHash::ZERO, cancel_rx)
			.await;

		let receipt = result.receipt.expect("receipt expected inside window");
		assert_eq!(receipt.block_number, 1005);
		assert_eq!(receipt.status, TxStatus::Success);

		// Post-inclusion simulation is pinned to the actual parent block.
		let overrides = relay.last_overrides.lock().unwrap().unwrap();
		assert_eq!(overrides.parent_block, Some(1004));
		assert!(result.post_simulation.is_some());
	}

	#[tokio::test]
	async fn window_exhaustion_is_a_normal_outcome() {
		let chain = Arc::new(MockChain::advancing_from(999));
		let relay = Arc::new(MockRelay::ok());
		let (_cancel_tx, cancel_rx) = broadcast::channel(1);

		let result = monitor(chain, relay.clone())
			.watch(&test_bundle(1000, 20), TxHash::ZERO, cancel_rx)
			.await;

		assert!(result.receipt.is_none());
		assert!(result.post_simulation.is_none());
		// No post-inclusion simulation ever ran.
		assert_eq!(
			relay.sim_calls.load(std::sync::atomic::Ordering::SeqCst),
			0
		);
	}

	#[tokio::test]
	async fn receipt_beyond_window_is_not_found() {
		let chain = Arc::new(
			MockChain::advancing_from(999).with_receipt_at(1021, receipt_at(1021)),
		);
		let relay = Arc::new(MockRelay::ok());
		let (_cancel_tx, cancel_rx) = broadcast::channel(1);

		let result = monitor(chain, relay)
			.watch(&test_bundle(1000, 20), TxHash::ZERO, cancel_rx)
			.await;

		assert!(result.receipt.is_none());
	}

	#[tokio::test]
	async fn transient_lookup_failures_do_not_abort_the_watch() {
		// First three lookups fail at transport level; the bundle actually
		// landed at 1002 and is caught late, at height 1003.
		let chain = Arc::new(
			MockChain::advancing_from(999)
				.with_receipt_at(1002, receipt_at(1002))
				.failing_receipt_lookups(3),
		);
		let relay = Arc::new(MockRelay::ok());
		let (_cancel_tx, cancel_rx) = broadcast::channel(1);

		let result = monitor(chain, relay.clone())
			.watch(&test_bundle(1000, 20), TxHash::ZERO, cancel_rx)
			.await;

		let receipt = result.receipt.expect("receipt expected after retries");
		assert_eq!(receipt.block_number, 1002);

		// Pinned to the inclusion block's parent, not the catch-up height's.
		let overrides = relay.last_overrides.lock().unwrap().unwrap();
		assert_eq!(overrides.parent_block, Some(1001));
	}

	#[tokio::test]
	async fn cancellation_stops_the_watch_immediately() {
		// Chain never reaches the target height.
		let chain = Arc::new(MockChain::at_height(999));
		let relay = Arc::new(MockRelay::ok());
		let (cancel_tx, cancel_rx) = broadcast::channel(1);

		cancel_tx.send(()).unwrap();

		let result = tokio::time::timeout(
			Duration::from_secs(5),
			monitor(chain, relay).watch(&test_bundle(1000, 20), TxHash::ZERO, cancel_rx),
		)
		.await
		.expect("cancelled watch must return promptly");

		assert!(result.receipt.is_none());
		assert!(result.post_simulation.is_none());
	}
}
