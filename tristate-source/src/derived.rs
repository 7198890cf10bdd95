//! Derived sources
//!
//! A [`Derived`] source is a [`Source`] whose values are written by
//! background tasks, such as the ones created by the combinators.
//!
//! The tasks live for as long as any clone of the derived source does,
//! and are aborted once the last one is dropped.

// Imports
use {
	crate::{Executor, Source, exec},
	core::{fmt, future::Future},
	futures::future::{self, AbortHandle},
	std::sync::Arc,
	tristate_result::Error,
};

/// Tasks owned by a derived source
struct Tasks {
	/// Abort handles
	handles: Vec<AbortHandle>,

	/// Tasks of the source we were derived from
	_parent: Option<Arc<Tasks>>,
}

impl Drop for Tasks {
	fn drop(&mut self) {
		for handle in &self.handles {
			handle.abort();
		}
	}
}

/// Derived source
#[derive(derive_more::Deref)]
pub struct Derived<T> {
	/// Source
	#[deref]
	source: Source<T>,

	/// Tasks
	tasks: Arc<Tasks>,
}

impl<T> Derived<T> {
	/// Creates a new derived source from the tasks that write to it
	pub(crate) fn new<I>(source: Source<T>, handles: I) -> Self
	where
		I: IntoIterator<Item = AbortHandle>,
	{
		Self::with_parent(source, handles, None)
	}

	/// Creates a new derived source that also keeps the tasks of `parent` alive.
	fn with_parent<I>(source: Source<T>, handles: I, parent: Option<Arc<Tasks>>) -> Self
	where
		I: IntoIterator<Item = AbortHandle>,
	{
		let tasks = Tasks {
			handles: handles.into_iter().collect(),
			_parent: parent,
		};
		Self {
			source,
			tasks: Arc::new(tasks),
		}
	}

	/// Returns the underlying source
	#[must_use]
	pub const fn source(&self) -> &Source<T> {
		&self.source
	}

	/// Maps every value of this source on `executor`.
	///
	/// Values whose mapping fails are omitted.
	/// The returned source keeps this one alive.
	pub fn map_with<U, E, F>(&self, executor: E, f: F) -> Derived<U>
	where
		T: Clone + Send + Sync + 'static,
		U: Send + Sync + 'static,
		E: Executor + 'static,
		F: Fn(T) -> Result<U, Error> + Send + Sync + 'static,
	{
		self::filter_map_source(
			&self.source,
			executor,
			move |value| f(value).map(Some),
			Some(Arc::clone(&self.tasks)),
		)
	}

	/// Maps every value of this source on `executor`, skipping any
	/// that map to `None`.
	///
	/// Values whose mapping fails are omitted.
	/// The returned source keeps this one alive.
	pub fn filter_map_with<U, E, F>(&self, executor: E, f: F) -> Derived<U>
	where
		T: Clone + Send + Sync + 'static,
		U: Send + Sync + 'static,
		E: Executor + 'static,
		F: Fn(T) -> Result<Option<U>, Error> + Send + Sync + 'static,
	{
		self::filter_map_source(&self.source, executor, f, Some(Arc::clone(&self.tasks)))
	}
}

impl<T> Source<T> {
	/// Maps every value of this source on `executor`.
	///
	/// Values whose mapping fails are omitted.
	/// Must be called within a tokio runtime.
	pub fn map_with<U, E, F>(&self, executor: E, f: F) -> Derived<U>
	where
		T: Clone + Send + Sync + 'static,
		U: Send + Sync + 'static,
		E: Executor + 'static,
		F: Fn(T) -> Result<U, Error> + Send + Sync + 'static,
	{
		self::filter_map_source(self, executor, move |value| f(value).map(Some), None)
	}
}

impl<T> From<Source<T>> for Derived<T> {
	fn from(source: Source<T>) -> Self {
		Self::new(source, [])
	}
}

impl<T> Clone for Derived<T> {
	fn clone(&self) -> Self {
		Self {
			source: self.source.clone(),
			tasks:  Arc::clone(&self.tasks),
		}
	}
}

impl<T: fmt::Debug> fmt::Debug for Derived<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Derived")
			.field("source", &self.source)
			.field("tasks", &self.tasks.handles.len())
			.finish()
	}
}

/// Spawns `task`, returning a handle to abort it.
///
/// Must be called within a tokio runtime.
pub(crate) fn spawn<F>(task: F) -> AbortHandle
where
	F: Future<Output = ()> + Send + 'static,
{
	let (task, handle) = future::abortable(task);
	tokio::spawn(task);
	handle
}

/// Creates a derived source from mapping every value of `source` on `executor`
fn filter_map_source<T, U, E, F>(source: &Source<T>, executor: E, f: F, parent: Option<Arc<Tasks>>) -> Derived<U>
where
	T: Clone + Send + Sync + 'static,
	U: Send + Sync + 'static,
	E: Executor + 'static,
	F: Fn(T) -> Result<Option<U>, Error> + Send + Sync + 'static,
{
	let output = Source::new();
	let mut watcher = source.watch();
	let f = Arc::new(f);

	let task = {
		let output = output.clone();
		async move {
			while let Some(value) = watcher.next().await {
				let f = Arc::clone(&f);
				match exec::run(&executor, move || f(value)).await {
					Ok(Some(value)) => output.set(value),
					Ok(None) => (),
					Err(err) => tracing::debug!(%err, "Mapping failed, omitting value"),
				}
			}
		}
	};

	Derived::with_parent(output, [self::spawn(task)], parent)
}
