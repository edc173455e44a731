use std::sync::Arc;
use std::time::{Duration, Instant};

use courier_callbacks::{CallbackDispatcher, ContentsClient, DispatcherConfig};
use courier_home::{HomeHandle, HomeLoop, HomeLoopConfig};
use parking_lot::Mutex;

pub const HOME_THREAD: &str = "courier-test-home";

/// One observed client call, tagged with the thread it ran on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
	LoadResource(String),
	PageStarted(String),
	DownloadStart(String, i64),
	LoginRequest(String, String, String),
	ReceivedError(i32, String, String),
	NewPicture(Option<String>),
}

#[derive(Debug, Default)]
pub struct ThreadRecordingClient {
	pub calls: Vec<Call>,
	pub threads: Vec<Option<String>>,
}

impl ThreadRecordingClient {
	fn record(&mut self, call: Call) {
		self.calls.push(call);
		self.threads.push(std::thread::current().name().map(str::to_owned));
	}
}

impl ContentsClient for ThreadRecordingClient {
	type Picture = String;

	fn on_load_resource(&mut self, url: String) {
		self.record(Call::LoadResource(url));
	}

	fn on_page_started(&mut self, url: String) {
		self.record(Call::PageStarted(url));
	}

	fn on_download_start(&mut self, url: String, _user_agent: String, _content_disposition: String, _mime_type: String, content_length: i64) {
		self.record(Call::DownloadStart(url, content_length));
	}

	fn on_received_login_request(&mut self, realm: String, account: String, args: String) {
		self.record(Call::LoginRequest(realm, account, args));
	}

	fn on_received_error(&mut self, error_code: i32, description: String, failing_url: String) {
		self.record(Call::ReceivedError(error_code, description, failing_url));
	}

	fn on_new_picture(&mut self, picture: Option<String>) {
		self.record(Call::NewPicture(picture));
	}
}

pub struct LoopHarness {
	pub home: HomeLoop,
	pub handle: HomeHandle,
	pub dispatcher: CallbackDispatcher<ThreadRecordingClient>,
}

pub fn spawn_harness(config: DispatcherConfig) -> LoopHarness {
	let _ = tracing_subscriber::fmt::try_init();
	let (home, handle) = HomeLoop::spawn(HomeLoopConfig::default().thread_name(HOME_THREAD)).unwrap();
	let client = Arc::new(Mutex::new(ThreadRecordingClient::default()));
	let dispatcher = CallbackDispatcher::with_config(Arc::new(handle.clone()), client, config);
	LoopHarness { home, handle, dispatcher }
}

/// Polls until `done` holds or the deadline passes.
pub fn wait_for(mut done: impl FnMut() -> bool) -> bool {
	let deadline = Instant::now() + Duration::from_secs(10);
	while Instant::now() < deadline {
		if done() {
			return true;
		}
		std::thread::sleep(Duration::from_millis(2));
	}
	done()
}
