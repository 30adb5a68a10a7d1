//! Bundle assembly.

use sender_types::{Bundle, BundleEntry, InclusionWindow, PrivacyDirective};

/// Packages signed entries into a bundle for one inclusion window.
///
/// Pure data transformation: entry order is preserved exactly as supplied
/// (downstream execution order depends on it), and no nonce or balance
/// validation happens here since the transactions are pre-signed.
pub struct BundleAssembler {
	window_size: u64,
}

impl BundleAssembler {
	pub fn new(window_size: u64) -> Self {
		Self { window_size }
	}

	pub fn assemble(
		&self,
		entries: Vec<BundleEntry>,
		target_block: u64,
		privacy: PrivacyDirective,
	) -> Bundle {
		Bundle {
			inclusion: InclusionWindow::spanning(target_block, self.window_size),
			body: entries,
			privacy,
		}
	}
}
