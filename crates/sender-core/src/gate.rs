//! Simulate-then-send safety gate.
//!
//! The invariant enforced here: no bundle reaches the relay without a prior
//! successful simulation for the exact window it is submitted under. The
//! submit step only accepts a [`GatedBundle`], and the only way to obtain
//! one is a passing [`SubmissionGate::check`].

use sender_types::{
	Bundle, BundleRelay, RelayAck, Result, SenderError, SimulationResult,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct SubmissionGate {
	relay: Arc<dyn BundleRelay>,
}

/// A bundle that passed simulation, bound to the simulation that approved it.
///
/// Fields are private to this module; there is no public constructor.
pub struct GatedBundle {
	bundle: Bundle,
	simulation: SimulationResult,
}

impl GatedBundle {
	pub fn bundle(&self) -> &Bundle {
		&self.bundle
	}

	pub fn simulation(&self) -> &SimulationResult {
		&self.simulation
	}
}

/// Result of forwarding a gated bundle to the relay.
pub struct Submitted {
	pub bundle: Bundle,
	pub pre_simulation: SimulationResult,
	pub ack: RelayAck,
}

impl SubmissionGate {
	pub fn new(relay: Arc<dyn BundleRelay>) -> Self {
		Self { relay }
	}

	/// Simulate the bundle against current chain state. Any failure,
	/// including a failed transport to the simulation endpoint, aborts
	/// before submission.
	pub async fn check(&self, bundle: Bundle) -> Result<GatedBundle> {
		let simulation = match self.relay.simulate(&bundle, None).await {
			Ok(simulation) => simulation,
			Err(SenderError::Simulation { details }) => {
				warn!(%details, "Bundle simulation rejected");
				return Err(SenderError::Simulation { details });
			}
			Err(other) => {
				warn!(error = %other, "Bundle simulation call failed");
				return Err(SenderError::Simulation {
					details: json!({ "error": other.to_string() }),
				});
			}
		};

		if !simulation.success {
			warn!(details = %simulation.details, "Bundle simulation unsuccessful");
			return Err(SenderError::Simulation {
				details: simulation.details,
			});
		}

		debug!(
			target_block = bundle.inclusion.target_block,
			"Bundle simulation passed"
		);
		Ok(GatedBundle { bundle, simulation })
	}

	/// Forward a simulation-approved bundle to the relay. A relay-level
	/// decline surfaces as [`SenderError::RelayRejected`] and is not
	/// retried here; resubmission needs a fresh bundle and window.
	pub async fn submit(&self, gated: GatedBundle) -> Result<Submitted> {
		let GatedBundle { bundle, simulation } = gated;
		let ack = self.relay.send(&bundle).await?;
		Ok(Submitted {
			bundle,
			pre_simulation: simulation,
			ack,
		})
	}
}
