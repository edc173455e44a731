use crate::BoxError;

/// One unit of work run on a home context.
pub type HomeJob = Box<dyn FnOnce() -> Result<(), BoxError> + Send + 'static>;

/// Capability to run work later, in order, on a home context.
///
/// Every submitted job runs exactly once on the context owned by the
/// scheduler, and jobs that have not run yet keep their submission order.
/// Submitting never waits for the job to run.
pub trait HomeScheduler: Send + Sync {
	/// Queues `job` behind every job submitted before it.
	fn submit(&self, job: HomeJob);
}
