//! Error types for callback delivery.

use courier_home::BoxError;
use thiserror::Error;

/// Delivery failures.
///
/// `PictureProvider` halts the dispatcher; `Halted` reports that it already has.
#[derive(Debug, Error)]
pub enum DeliveryError {
	/// A new-picture provider failed while being evaluated on the home context.
	#[error("error getting picture: {source}")]
	PictureProvider {
		/// The provider's error.
		#[source]
		source: BoxError,
	},

	/// Delivery was attempted after an earlier fatal failure.
	#[error("dispatcher halted after a fatal delivery failure ({pending} events undelivered)")]
	Halted {
		/// Events still queued and never to be delivered.
		pending: usize,
	},
}

/// Result type for delivery.
pub type Result<T> = std::result::Result<T, DeliveryError>;
