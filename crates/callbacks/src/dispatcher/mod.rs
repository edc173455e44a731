//! Multi-producer callback queue drained on the home context.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use courier_home::{HomeJob, HomeScheduler};
use parking_lot::Mutex;

use crate::error::{DeliveryError, Result};
use crate::event::{CallbackEvent, PictureProvider};
use crate::{ContentsClient, DispatcherConfig};


/// Outcome of one delivery wake-up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
	/// Events handed to the client.
	pub delivered: usize,
	/// Events still queued when the wake-up finished.
	pub remaining: usize,
	/// Whether another wake-up is pending for the remaining events.
	pub rescheduled: bool,
}

struct DispatcherInner<C: ContentsClient> {
	config: DispatcherConfig,
	scheduler: Arc<dyn HomeScheduler>,
	client: Arc<Mutex<C>>,
	queue: Mutex<VecDeque<CallbackEvent<C::Picture>>>,
	wake_scheduled: AtomicBool,
	halted: AtomicBool,
	dropped: AtomicU64,
}

/// Posts contents-client callbacks from any thread and delivers them, in
/// order, on the home context.
///
/// Every `post_on_*` call enqueues one event and returns immediately. The
/// events are delivered by a wake-up job submitted to the home scheduler;
/// the client is only ever invoked from that job.
///
/// Cloning yields another handle to the same queue.
pub struct CallbackDispatcher<C: ContentsClient> {
	inner: Arc<DispatcherInner<C>>,
}

impl<C: ContentsClient> Clone for CallbackDispatcher<C> {
	fn clone(&self) -> Self {
		Self {
			inner: Arc::clone(&self.inner),
		}
	}
}

impl<C: ContentsClient> CallbackDispatcher<C> {
	/// Creates a dispatcher delivering to `client` on `scheduler`'s context.
	pub fn new(scheduler: Arc<dyn HomeScheduler>, client: Arc<Mutex<C>>) -> Self {
		Self::with_config(scheduler, client, DispatcherConfig::default())
	}

	/// Creates a dispatcher with explicit tuning.
	pub fn with_config(scheduler: Arc<dyn HomeScheduler>, client: Arc<Mutex<C>>, config: DispatcherConfig) -> Self {
		Self {
			inner: Arc::new(DispatcherInner {
				config,
				scheduler,
				client,
				queue: Mutex::new(VecDeque::new()),
				wake_scheduled: AtomicBool::new(false),
				halted: AtomicBool::new(false),
				dropped: AtomicU64::new(0),
			}),
		}
	}

	pub fn post_on_load_resource(&self, url: impl Into<String>) {
		self.inner.enqueue(CallbackEvent::LoadResource { url: url.into() });
	}

	pub fn post_on_page_started(&self, url: impl Into<String>) {
		self.inner.enqueue(CallbackEvent::PageStarted { url: url.into() });
	}

	pub fn post_on_download_start(
		&self,
		url: impl Into<String>,
		user_agent: impl Into<String>,
		content_disposition: impl Into<String>,
		mime_type: impl Into<String>,
		content_length: i64,
	) {
		self.inner.enqueue(CallbackEvent::DownloadStart {
			url: url.into(),
			user_agent: user_agent.into(),
			content_disposition: content_disposition.into(),
			mime_type: mime_type.into(),
			content_length,
		});
	}

	pub fn post_on_received_login_request(&self, realm: impl Into<String>, account: impl Into<String>, args: impl Into<String>) {
		self.inner.enqueue(CallbackEvent::LoginRequest {
			realm: realm.into(),
			account: account.into(),
			args: args.into(),
		});
	}

	pub fn post_on_received_error(&self, error_code: i32, description: impl Into<String>, failing_url: impl Into<String>) {
		self.inner.enqueue(CallbackEvent::ReceivedError {
			error_code,
			description: description.into(),
			failing_url: failing_url.into(),
		});
	}

	/// Posts a new-picture callback.
	///
	/// `provider` is evaluated at delivery time on the home context. `None`
	/// delivers `on_new_picture(None)` without evaluating anything.
	pub fn post_on_new_picture(&self, provider: Option<PictureProvider<C::Picture>>) {
		self.inner.enqueue(CallbackEvent::NewPicture { provider });
	}

	/// Returns the number of queued, undelivered events.
	pub fn pending_len(&self) -> usize {
		self.inner.queue.lock().len()
	}

	/// Returns `true` after a fatal delivery failure.
	pub fn is_halted(&self) -> bool {
		self.inner.halted.load(Ordering::Acquire)
	}

	/// Returns how many posts were dropped because the dispatcher had halted.
	pub fn dropped_count(&self) -> u64 {
		self.inner.dropped.load(Ordering::Relaxed)
	}

	/// Returns the shared client handle.
	pub fn client(&self) -> &Arc<Mutex<C>> {
		&self.inner.client
	}

	/// Delivers up to one batch of queued events on the calling thread.
	///
	/// Wake-up jobs call this on the home context. Hosts pumping their own
	/// loop may call it directly, but only from the home context.
	pub fn deliver(&self) -> Result<DeliveryReport> {
		self.inner.deliver()
	}
}

impl<C: ContentsClient> fmt::Debug for CallbackDispatcher<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CallbackDispatcher")
			.field("config", &self.inner.config)
			.field("pending", &self.pending_len())
			.field("halted", &self.is_halted())
			.finish()
	}
}

impl<C: ContentsClient> DispatcherInner<C> {
	fn enqueue(self: &Arc<Self>, event: CallbackEvent<C::Picture>) {
		let kind = event.kind();
		if self.halted.load(Ordering::Acquire) {
			let count = self.dropped.fetch_add(1, Ordering::Relaxed);
			if count % 1024 == 0 {
				tracing::warn!(kind = kind.as_str(), dropped = count + 1, "callbacks.post_after_halt");
			}
			return;
		}

		let pending = {
			let mut queue = self.queue.lock();
			queue.push_back(event);
			queue.len()
		};
		tracing::trace!(kind = kind.as_str(), pending, "callbacks.post");
		self.schedule_wake();
	}

	/// Submits a wake-up job unless one is already pending.
	fn schedule_wake(self: &Arc<Self>) {
		if self.wake_scheduled.swap(true, Ordering::AcqRel) {
			return;
		}
		tracing::trace!("callbacks.wake");
		// Weak so a stored job does not keep the dispatcher, and with it the
		// scheduler and client, alive.
		let inner = Arc::downgrade(self);
		let job: HomeJob = Box::new(move || {
			let Some(inner) = inner.upgrade() else {
				tracing::trace!("callbacks.wake_after_drop");
				return Ok(());
			};
			inner.deliver()?;
			Ok(())
		});
		self.scheduler.submit(job);
	}

	/// Drains up to one batch of events into the client. Home context only.
	fn deliver(self: &Arc<Self>) -> Result<DeliveryReport> {
		// Cleared before draining so a post racing with the drain schedules
		// its own wake-up rather than relying on this one.
		self.wake_scheduled.store(false, Ordering::Release);

		if self.halted.load(Ordering::Acquire) {
			return Err(DeliveryError::Halted {
				pending: self.queue.lock().len(),
			});
		}

		let limit = self.config.batch_limit();
		let mut report = DeliveryReport::default();
		while report.delivered < limit {
			let Some(event) = self.queue.lock().pop_front() else {
				break;
			};
			let kind = event.kind();
			if let Err(err) = event.deliver_to(&self.client) {
				self.halted.store(true, Ordering::Release);
				tracing::error!(
					kind = kind.as_str(),
					delivered = report.delivered,
					pending = self.queue.lock().len(),
					error = %err,
					"callbacks.picture_failed"
				);
				return Err(err);
			}
			report.delivered += 1;
		}

		report.remaining = self.queue.lock().len();
		if report.remaining > 0 {
			self.schedule_wake();
			report.rescheduled = true;
		}
		tracing::debug!(
			delivered = report.delivered,
			remaining = report.remaining,
			rescheduled = report.rescheduled,
			"callbacks.deliver"
		);
		Ok(report)
	}
}
