//! Execution contexts
//!
//! Transforms may be expensive, so they're run through an [`Executor`]
//! instead of directly on the task that observes the values.

// Imports
use {
	futures::{
		channel::oneshot,
		future::{self, BoxFuture, FutureExt},
	},
	std::sync::Arc,
	tristate_result::Error,
};

/// A unit of work
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Execution context
pub trait Executor: Send + Sync {
	/// Executes `job`.
	///
	/// The returned future resolves once the job finished, or
	/// once it's known that it never will.
	fn execute(&self, job: Job) -> BoxFuture<'static, ()>;
}

impl<E: Executor + ?Sized> Executor for Arc<E> {
	fn execute(&self, job: Job) -> BoxFuture<'static, ()> {
		(**self).execute(job)
	}
}

impl<E: Executor + ?Sized> Executor for &'_ E {
	fn execute(&self, job: Job) -> BoxFuture<'static, ()> {
		(**self).execute(job)
	}
}

/// Executes jobs immediately, on the calling task
#[derive(Clone, Copy, Default, Debug)]
pub struct Inline;

impl Executor for Inline {
	fn execute(&self, job: Job) -> BoxFuture<'static, ()> {
		job();
		future::ready(()).boxed()
	}
}

/// Executes jobs on tokio's blocking thread pool.
///
/// Must be used within a tokio runtime.
#[derive(Clone, Copy, Default, Debug)]
pub struct Blocking;

impl Executor for Blocking {
	fn execute(&self, job: Job) -> BoxFuture<'static, ()> {
		let handle = tokio::task::spawn_blocking(job);
		async move {
			if let Err(err) = handle.await {
				tracing::debug!(%err, "Blocking job did not finish");
			}
		}
		.boxed()
	}
}

/// Runs `f` on `executor` and returns it's output.
///
/// If the job never reports back, for example because it panicked on
/// another thread, this returns an error.
pub async fn run<E, F, R>(executor: &E, f: F) -> Result<R, Error>
where
	E: Executor + ?Sized,
	F: FnOnce() -> Result<R, Error> + Send + 'static,
	R: Send + 'static,
{
	let (tx, rx) = oneshot::channel();
	executor
		.execute(Box::new(move || {
			if tx.send(f()).is_err() {
				tracing::trace!("Job output was no longer awaited");
			}
		}))
		.await;

	rx.await.map_err(|_canceled| Error::msg("Job finished without an output"))?
}
