//! Home-context scheduling primitives.
//!
//! A home context runs submitted jobs one at a time, in submission order, on
//! a thread it owns. Producers on any thread hand work to it through
//! [`HomeScheduler::submit`] and never wait for the work to run.
//!
//! Two contexts are provided:
//! * [`ManualScheduler`] - jobs queue up until the owner pumps them with
//!   [`ManualScheduler::run_pending`]; the pumping thread is the home context.
//! * [`HomeLoop`] - a dedicated named thread draining an unbounded channel.

mod error;
mod home_loop;
mod manual;
mod scheduler;
mod spawn;

pub use error::{BoxError, HomeError, Result};
pub use home_loop::{HomeHandle, HomeLoop, HomeLoopConfig, HomeLoopReport};
pub use manual::ManualScheduler;
pub use scheduler::{HomeJob, HomeScheduler};
