//! Error types for home contexts.

use thiserror::Error;

/// Boxed error returned by failing home jobs.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by a home context.
#[derive(Debug, Error)]
pub enum HomeError {
	/// A job returned an error. The context stopped at that job.
	#[error("home job failed: {0}")]
	Job(#[source] BoxError),

	/// A job panicked on the home thread.
	#[error("home thread panicked: {0}")]
	Panicked(String),

	/// The home thread could not be started.
	#[error("failed to spawn home thread: {0}")]
	Spawn(#[from] std::io::Error),
}

/// Result type for home context operations.
pub type Result<T> = std::result::Result<T, HomeError>;
