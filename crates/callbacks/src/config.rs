/// Events delivered per wake-up unless configured otherwise.
const DEFAULT_MAX_BATCH: usize = 64;

/// Tuning for a [`crate::CallbackDispatcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatcherConfig {
	/// Maximum events delivered by one wake-up before yielding the home
	/// context. Remaining events get a fresh wake-up. Zero is treated as one.
	pub max_batch: usize,
}

impl Default for DispatcherConfig {
	fn default() -> Self {
		Self {
			max_batch: DEFAULT_MAX_BATCH,
		}
	}
}

impl DispatcherConfig {
	/// Config that drains the whole queue in one wake-up.
	pub const fn unbounded() -> Self {
		Self { max_batch: usize::MAX }
	}

	/// Sets the per-wake-up delivery budget.
	pub const fn max_batch(mut self, max_batch: usize) -> Self {
		self.max_batch = max_batch;
		self
	}

	pub(crate) const fn batch_limit(&self) -> usize {
		if self.max_batch == 0 { 1 } else { self.max_batch }
	}
}
