//! Queued callback notifications.

use std::fmt;

use courier_home::BoxError;
use parking_lot::Mutex;

use crate::ContentsClient;
use crate::error::{DeliveryError, Result};

/// Payload-free tag identifying a callback kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum EventKind {
	LoadResource,
	PageStarted,
	DownloadStart,
	LoginRequest,
	ReceivedError,
	NewPicture,
}

impl EventKind {
	pub(crate) const fn as_str(self) -> &'static str {
		match self {
			Self::LoadResource => "load_resource",
			Self::PageStarted => "page_started",
			Self::DownloadStart => "download_start",
			Self::LoginRequest => "login_request",
			Self::ReceivedError => "received_error",
			Self::NewPicture => "new_picture",
		}
	}
}

type ProviderFn<P> = dyn FnOnce() -> std::result::Result<Option<P>, BoxError> + Send + 'static;

/// Deferred picture computation.
///
/// The provider is not run when posted. It runs once, on the home context,
/// when its event is delivered, and its result (possibly `None`) is handed to
/// [`ContentsClient::on_new_picture`].
pub struct PictureProvider<P> {
	thunk: Box<ProviderFn<P>>,
}

impl<P> PictureProvider<P> {
	pub fn new<F>(f: F) -> Self
	where
		F: FnOnce() -> std::result::Result<Option<P>, BoxError> + Send + 'static,
	{
		Self { thunk: Box::new(f) }
	}

	pub(crate) fn evaluate(self) -> std::result::Result<Option<P>, BoxError> {
		(self.thunk)()
	}
}

impl<P> fmt::Debug for PictureProvider<P> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("PictureProvider(..)")
	}
}

/// One queued callback notification.
///
/// Events are built only by the dispatcher's `post_on_*` methods and are
/// consumed by delivery.
#[derive(Debug)]
pub(crate) enum CallbackEvent<P> {
	LoadResource {
		url: String,
	},
	PageStarted {
		url: String,
	},
	DownloadStart {
		url: String,
		user_agent: String,
		content_disposition: String,
		mime_type: String,
		content_length: i64,
	},
	LoginRequest {
		realm: String,
		account: String,
		args: String,
	},
	ReceivedError {
		error_code: i32,
		description: String,
		failing_url: String,
	},
	NewPicture {
		provider: Option<PictureProvider<P>>,
	},
}

impl<P> CallbackEvent<P> {
	pub(crate) const fn kind(&self) -> EventKind {
		match self {
			Self::LoadResource { .. } => EventKind::LoadResource,
			Self::PageStarted { .. } => EventKind::PageStarted,
			Self::DownloadStart { .. } => EventKind::DownloadStart,
			Self::LoginRequest { .. } => EventKind::LoginRequest,
			Self::ReceivedError { .. } => EventKind::ReceivedError,
			Self::NewPicture { .. } => EventKind::NewPicture,
		}
	}

	/// Invokes the matching client handler.
	///
	/// A picture provider is evaluated before the client lock is taken, so it
	/// may touch the client itself.
	pub(crate) fn deliver_to<C>(self, client: &Mutex<C>) -> Result<()>
	where
		C: ContentsClient<Picture = P>,
	{
		match self {
			Self::LoadResource { url } => client.lock().on_load_resource(url),
			Self::PageStarted { url } => client.lock().on_page_started(url),
			Self::DownloadStart {
				url,
				user_agent,
				content_disposition,
				mime_type,
				content_length,
			} => client
				.lock()
				.on_download_start(url, user_agent, content_disposition, mime_type, content_length),
			Self::LoginRequest { realm, account, args } => client.lock().on_received_login_request(realm, account, args),
			Self::ReceivedError {
				error_code,
				description,
				failing_url,
			} => client.lock().on_received_error(error_code, description, failing_url),
			Self::NewPicture { provider } => {
				let picture = match provider {
					Some(provider) => provider.evaluate().map_err(|source| DeliveryError::PictureProvider { source })?,
					None => None,
				};
				client.lock().on_new_picture(picture);
			}
		}
		Ok(())
	}
}
