use std::thread::JoinHandle;

use tokio::sync::mpsc;

use crate::spawn::{panic_message, spawn_named_thread};
use crate::{HomeError, HomeJob, HomeScheduler, Result};

const DEFAULT_THREAD_NAME: &str = "courier-home";

/// Configuration for a [`HomeLoop`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeLoopConfig {
	/// Name given to the home thread.
	pub thread_name: String,
}

impl Default for HomeLoopConfig {
	fn default() -> Self {
		Self {
			thread_name: DEFAULT_THREAD_NAME.to_owned(),
		}
	}
}

impl HomeLoopConfig {
	/// Sets the home thread name.
	pub fn thread_name(mut self, name: impl Into<String>) -> Self {
		self.thread_name = name.into();
		self
	}
}

enum LoopMsg {
	Run(HomeJob),
	Stop,
}

/// Cloneable submission handle for a [`HomeLoop`].
#[derive(Debug, Clone)]
pub struct HomeHandle {
	tx: mpsc::UnboundedSender<LoopMsg>,
}

impl HomeHandle {
	/// Asks the loop to exit once every job submitted before this call has run.
	pub fn stop(&self) {
		if self.tx.send(LoopMsg::Stop).is_err() {
			tracing::trace!("home.stop_after_exit");
		}
	}

	/// Returns `true` once the loop thread has exited.
	pub fn is_closed(&self) -> bool {
		self.tx.is_closed()
	}
}

impl HomeScheduler for HomeHandle {
	fn submit(&self, job: HomeJob) {
		if self.tx.send(LoopMsg::Run(job)).is_err() {
			tracing::warn!("home.submit_after_exit");
		}
	}
}

/// Summary of a home loop that exited cleanly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HomeLoopReport {
	/// Jobs run to completion.
	pub jobs_run: u64,
}

/// Dedicated home thread running submitted jobs one at a time, in order.
///
/// The loop exits when [`HomeHandle::stop`] is reached, when every handle is
/// dropped, or at the first job that fails. A failing or panicking job halts
/// the loop; jobs queued behind it are dropped.
#[derive(Debug)]
pub struct HomeLoop {
	name: String,
	thread: JoinHandle<Result<HomeLoopReport>>,
}

impl HomeLoop {
	/// Starts the home thread and returns it with its submission handle.
	pub fn spawn(config: HomeLoopConfig) -> Result<(Self, HomeHandle)> {
		let (tx, rx) = mpsc::unbounded_channel();
		let name = config.thread_name;
		let loop_name = name.clone();
		let thread = spawn_named_thread(name.clone(), move || run_loop(&loop_name, rx))?;
		Ok((Self { name, thread }, HomeHandle { tx }))
	}

	/// Returns the home thread name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns `true` once the home thread has exited.
	pub fn is_finished(&self) -> bool {
		self.thread.is_finished()
	}

	/// Waits for the home thread to exit.
	pub fn join(self) -> Result<HomeLoopReport> {
		match self.thread.join() {
			Ok(result) => result,
			Err(payload) => Err(HomeError::Panicked(panic_message(payload))),
		}
	}
}

fn run_loop(name: &str, mut rx: mpsc::UnboundedReceiver<LoopMsg>) -> Result<HomeLoopReport> {
	tracing::debug!(thread = name, "home.loop.start");
	let mut report = HomeLoopReport::default();
	while let Some(msg) = rx.blocking_recv() {
		let LoopMsg::Run(job) = msg else {
			break;
		};
		if let Err(err) = job() {
			tracing::error!(thread = name, jobs_run = report.jobs_run, error = %err, "home.loop.job_failed");
			return Err(HomeError::Job(err));
		}
		report.jobs_run += 1;
	}
	tracing::debug!(thread = name, jobs_run = report.jobs_run, "home.loop.exit");
	Ok(report)
}
