//! Error types for the bundle sender.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SenderError>;

#[derive(Error, Debug)]
pub enum SenderError {
	/// Simulation reported failure, or the simulation call itself errored.
	/// Submission never proceeds past this.
	#[error("bundle simulation rejected: {details}")]
	Simulation { details: serde_json::Value },

	/// The relay declined a simulation-approved bundle. Monitoring is not
	/// started; resubmission needs a fresh bundle.
	#[error("relay rejected bundle: {0}")]
	RelayRejected(String),

	/// An external call failed at the transport level.
	#[error("transport error: {0}")]
	Transport(String),

	/// A bundle with no entries has no representative transaction.
	#[error("bundle body is empty")]
	EmptyBundle,

	#[error("configuration error: {0}")]
	Config(String),

	#[error(transparent)]
	Other(#[from] anyhow::Error),
}
