//! Fee derivation.

use alloy::primitives::U256;
use sender_types::{FeeData, FeeQuote, FeesSection};

/// Derives the fee pair for one submission attempt from network fee data.
///
/// Pure: configured fallbacks substitute for missing components and a fixed
/// tip is added on top of the priority fee, so every input produces a quote.
pub struct FeeEstimator {
	fallback_max_fee: U256,
	fallback_priority_fee: U256,
	tip: U256,
}

impl FeeEstimator {
	pub fn new(config: &FeesSection) -> Self {
		Self {
			fallback_max_fee: U256::from(config.fallback_max_fee_per_gas),
			fallback_priority_fee: U256::from(config.fallback_priority_fee_per_gas),
			tip: U256::from(config.tip_wei),
		}
	}

	pub fn quote(&self, data: &FeeData) -> FeeQuote {
		let base_fee = data.max_fee_per_gas.unwrap_or(self.fallback_max_fee);
		let base_priority = data
			.max_priority_fee_per_gas
			.unwrap_or(self.fallback_priority_fee);

		let max_priority_fee_per_gas = base_priority + self.tip;
		let max_fee_per_gas = base_fee + max_priority_fee_per_gas;

		FeeQuote {
			max_fee_per_gas,
			max_priority_fee_per_gas,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn estimator(tip: u64) -> FeeEstimator {
		FeeEstimator::new(&FeesSection {
			fallback_max_fee_per_gas: 42,
			fallback_priority_fee_per_gas: 2,
			tip_wei: tip,
		})
	}

	#[test]
	fn quote_adds_tip_on_top_of_network_fees() {
		let data = FeeData {
			max_fee_per_gas: Some(U256::from(100)),
			max_priority_fee_per_gas: Some(U256::from(2)),
		};
		let quote = estimator(1).quote(&data);

		assert_eq!(quote.max_priority_fee_per_gas, U256::from(3));
		assert_eq!(quote.max_fee_per_gas, U256::from(103));
	}

	#[test]
	fn quote_falls_back_for_missing_components() {
		let quote = estimator(1).quote(&FeeData::default());

		// fallback priority 2 + tip 1, fallback base 42 + priority
		assert_eq!(quote.max_priority_fee_per_gas, U256::from(3));
		assert_eq!(quote.max_fee_per_gas, U256::from(45));
	}

	#[test]
	fn quote_falls_back_per_component() {
		let data = FeeData {
			max_fee_per_gas: Some(U256::from(100)),
			max_priority_fee_per_gas: None,
		};
		let quote = estimator(1).quote(&data);

		assert_eq!(quote.max_priority_fee_per_gas, U256::from(3));
		assert_eq!(quote.max_fee_per_gas, U256::from(103));
	}

	#[test]
	fn max_fee_never_below_priority_fee() {
		for (base, priority, tip) in [(0u64, 0u64, 0u64), (1, 100, 5), (100, 2, 1_000_000_000)] {
			let data = FeeData {
				max_fee_per_gas: Some(U256::from(base)),
				max_priority_fee_per_gas: Some(U256::from(priority)),
			};
			let quote = estimator(tip).quote(&data);
			assert!(quote.max_fee_per_gas >= quote.max_priority_fee_per_gas);
		}
	}
}
