use std::collections::VecDeque;
use std::fmt;

use parking_lot::Mutex;

use crate::{HomeError, HomeJob, HomeScheduler, Result};

/// Home scheduler pumped explicitly by its owner.
///
/// Jobs accumulate until [`ManualScheduler::run_pending`] is called and then
/// run on the calling thread, which acts as the home context. Useful for
/// driving a home context from an existing main loop, and in tests.
#[derive(Default)]
pub struct ManualScheduler {
	queue: Mutex<VecDeque<HomeJob>>,
}

impl ManualScheduler {
	/// Creates a scheduler with no queued jobs.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the number of jobs waiting to run.
	pub fn pending_len(&self) -> usize {
		self.queue.lock().len()
	}

	/// Runs queued jobs until none remain, returning how many ran.
	///
	/// Jobs submitted while pumping run in the same call. The first failing
	/// job stops the pump and its error is returned; jobs behind it stay
	/// queued.
	pub fn run_pending(&self) -> Result<usize> {
		let mut ran = 0;
		loop {
			let Some(job) = self.queue.lock().pop_front() else {
				return Ok(ran);
			};
			ran += 1;
			job().map_err(HomeError::Job)?;
		}
	}
}

impl HomeScheduler for ManualScheduler {
	fn submit(&self, job: HomeJob) {
		self.queue.lock().push_back(job);
	}
}

impl fmt::Debug for ManualScheduler {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ManualScheduler").field("pending", &self.pending_len()).finish()
	}
}
