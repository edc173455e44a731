use std::any::Any;

/// Spawns a dedicated named OS thread for a home context.
pub(crate) fn spawn_named_thread<F, R>(name: impl Into<String>, f: F) -> std::io::Result<std::thread::JoinHandle<R>>
where
	F: FnOnce() -> R + Send + 'static,
	R: Send + 'static,
{
	let name = name.into();
	tracing::trace!(thread = %name, "home.spawn_thread");
	std::thread::Builder::new().name(name).spawn(f)
}

/// Extracts the message carried by a panic payload.
pub(crate) fn panic_message(payload: Box<dyn Any + Send>) -> String {
	match payload.downcast::<String>() {
		Ok(msg) => *msg,
		Err(payload) => match payload.downcast_ref::<&'static str>() {
			Some(msg) => (*msg).to_owned(),
			None => "non-string panic payload".to_owned(),
		},
	}
}
