//! Shared mocks for the pipeline tests.

use alloy::primitives::Bytes;
use async_trait::async_trait;
use sender_types::{
	Bundle, BundleEntry, BundleRelay, ChainReader, FeeData, InclusionReceipt, InclusionWindow,
	PrivacyDirective, RelayAck, Result, SenderError, SimOverrides, SimulationResult, TxHash,
	TxStatus,
};
use serde_json::json;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;

pub fn test_entries() -> Vec<BundleEntry> {
	vec![
		BundleEntry {
			tx: Bytes::from(vec![0x02, 0xaa]),
			can_revert: true,
		},
		BundleEntry {
			tx: Bytes::from(vec![0x02, 0xbb]),
			can_revert: false,
		},
	]
}

pub fn test_bundle(target_block: u64, window_size: u64) -> Bundle {
	Bundle {
		inclusion: InclusionWindow::spanning(target_block, window_size),
		body: test_entries(),
		privacy: PrivacyDirective::default(),
	}
}

pub fn receipt_at(block_number: u64) -> InclusionReceipt {
	InclusionReceipt {
		tx_hash: TxHash::ZERO,
		block_number,
		status: TxStatus::Success,
	}
}

/// Chain reader over scripted state.
///
/// In advancing mode every height poll moves the head one block forward,
/// which keeps watch loops fast without real sleeps.
pub struct MockChain {
	height: AtomicU64,
	auto_advance: bool,
	fee_data: FeeData,
	receipt: Option<(u64, InclusionReceipt)>,
	receipt_failures: AtomicUsize,
	pub receipt_lookups: AtomicUsize,
}

impl MockChain {
	pub fn at_height(height: u64) -> Self {
		Self {
			height: AtomicU64::new(height),
			auto_advance: false,
			fee_data: FeeData::default(),
			receipt: None,
			receipt_failures: AtomicUsize::new(0),
			receipt_lookups: AtomicUsize::new(0),
		}
	}

	pub fn advancing_from(height: u64) -> Self {
		Self {
			auto_advance: true,
			..Self::at_height(height)
		}
	}

	pub fn with_fee_data(mut self, fee_data: FeeData) -> Self {
		self.fee_data = fee_data;
		self
	}

	/// Make a receipt retrievable once the head reaches `visible_from`.
	pub fn with_receipt_at(mut self, visible_from: u64, receipt: InclusionReceipt) -> Self {
		self.receipt = Some((visible_from, receipt));
		self
	}

	/// Fail the first `n` receipt lookups at transport level.
	pub fn failing_receipt_lookups(self, n: usize) -> Self {
		self.receipt_failures.store(n, Ordering::SeqCst);
		self
	}
}

#[async_trait]
impl ChainReader for MockChain {
	async fn get_fee_data(&self) -> Result<FeeData> {
		Ok(self.fee_data)
	}

	async fn get_block_number(&self) -> Result<u64> {
		if self.auto_advance {
			Ok(self.height.fetch_add(1, Ordering::SeqCst) + 1)
		} else {
			Ok(self.height.load(Ordering::SeqCst))
		}
	}

	async fn get_transaction_receipt(&self, _hash: &TxHash) -> Result<Option<InclusionReceipt>> {
		self.receipt_lookups.fetch_add(1, Ordering::SeqCst);

		if self
			.receipt_failures
			.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
			.is_ok()
		{
			return Err(SenderError::Transport("lookup timed out".to_string()));
		}

		let head = self.height.load(Ordering::SeqCst);
		Ok(self
			.receipt
			.as_ref()
			.filter(|(visible_from, _)| head >= *visible_from)
			.map(|(_, receipt)| receipt.clone()))
	}
}

/// Relay double recording every call.
pub struct MockRelay {
	sim_success: bool,
	sim_transport_error: bool,
	reject_send: bool,
	pub sim_calls: AtomicUsize,
	pub send_calls: AtomicUsize,
	pub last_simulated: Mutex<Option<Bundle>>,
	pub last_overrides: Mutex<Option<SimOverrides>>,
	pub last_sent: Mutex<Option<Bundle>>,
}

impl MockRelay {
	pub fn ok() -> Self {
		Self {
			sim_success: true,
			sim_transport_error: false,
			reject_send: false,
			sim_calls: AtomicUsize::new(0),
			send_calls: AtomicUsize::new(0),
			last_simulated: Mutex::new(None),
			last_overrides: Mutex::new(None),
			last_sent: Mutex::new(None),
		}
	}

	pub fn failing_simulation() -> Self {
		Self {
			sim_success: false,
			..Self::ok()
		}
	}

	pub fn transport_failing_simulation() -> Self {
		Self {
			sim_transport_error: true,
			..Self::ok()
		}
	}

	pub fn rejecting_send() -> Self {
		Self {
			reject_send: true,
			..Self::ok()
		}
	}
}

#[async_trait]
impl BundleRelay for MockRelay {
	async fn simulate(
		&self,
		bundle: &Bundle,
		overrides: Option<&SimOverrides>,
	) -> Result<SimulationResult> {
		self.sim_calls.fetch_add(1, Ordering::SeqCst);
		*self.last_simulated.lock().unwrap() = Some(bundle.clone());
		*self.last_overrides.lock().unwrap() = overrides.copied();

		if self.sim_transport_error {
			return Err(SenderError::Transport("connection refused".to_string()));
		}
		if !self.sim_success {
			return Ok(SimulationResult {
				success: false,
				details: json!({ "error": "execution reverted" }),
			});
		}
		Ok(SimulationResult {
			success: true,
			details: json!({ "success": true, "gasUsed": "0x5208" }),
		})
	}

	async fn send(&self, bundle: &Bundle) -> Result<RelayAck> {
		self.send_calls.fetch_add(1, Ordering::SeqCst);

		if self.reject_send {
			return Err(SenderError::RelayRejected(
				"bundle validation failed".to_string(),
			));
		}
		*self.last_sent.lock().unwrap() = Some(bundle.clone());
		Ok(RelayAck::new(json!({
			"bundleHash": format!("0x{}", "42".repeat(32))
		})))
	}
}
