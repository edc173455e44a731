/// Receiver of dispatched callbacks.
///
/// Handlers run only on the home context, one at a time, in delivery order,
/// so implementations need `Send` but no internal synchronization. A panic
/// in a handler is not caught by the dispatcher.
pub trait ContentsClient: Send + 'static {
	/// Opaque picture value produced by a [`crate::PictureProvider`].
	type Picture: Send + 'static;

	/// A subresource started loading.
	fn on_load_resource(&mut self, url: String);

	/// A main-frame navigation started.
	fn on_page_started(&mut self, url: String);

	/// The page requested a download.
	fn on_download_start(&mut self, url: String, user_agent: String, content_disposition: String, mime_type: String, content_length: i64);

	/// An automatic login request was received.
	fn on_received_login_request(&mut self, realm: String, account: String, args: String);

	/// A load failed.
	fn on_received_error(&mut self, error_code: i32, description: String, failing_url: String);

	/// A new picture is available, or `None` when none was produced.
	fn on_new_picture(&mut self, picture: Option<Self::Picture>);
}
