//! Ordered delivery of contents-client callbacks onto a home context.
//!
//! Producers on any thread post callbacks through a [`CallbackDispatcher`].
//! Each post enqueues one callback event and, when the queue was idle,
//! submits one wake-up job to the home context. The wake-up drains the queue
//! in FIFO order and invokes the matching [`ContentsClient`] handler.
//!
//! # Architecture
//!
//! ```text
//! IO thread ──┐
//!             ├──► post_on_*() ──► queue ──► wake-up job ──► deliver() ──► ContentsClient
//! UI thread ──┘                              (HomeScheduler)   (home context only)
//! ```
//!
//! New-picture callbacks carry a [`PictureProvider`] instead of a value. It
//! runs at delivery time on the home context, exactly once; a provider error
//! is fatal and halts the dispatcher.

mod client;
mod config;
mod dispatcher;
mod error;
mod event;

pub use client::ContentsClient;
pub use config::DispatcherConfig;
pub use courier_home::BoxError;
pub use dispatcher::{CallbackDispatcher, DeliveryReport};
pub use error::{DeliveryError, Result};
pub use event::PictureProvider;
