//! Combining sources
//!
//! Combines two independent sources into one that emits a pair of their
//! latest values whenever either of them changes.

// Imports
use {
	crate::{Derived, Executor, Source},
	tristate_result::{Error, only_with_values},
};

/// Combines `first` and `second`.
///
/// The output emits `(first, second)` whenever either changes, as soon as
/// at least one of them has a value.
///
/// Must be called within a tokio runtime.
pub fn combine<A, B>(first: &Source<A>, second: &Source<B>) -> Derived<(Option<A>, Option<B>)>
where
	A: Clone + Send + Sync + 'static,
	B: Clone + Send + Sync + 'static,
{
	self::combine_inner(first, second, Some)
}

/// Combines `first` and `second`, only emitting while both have a value.
///
/// Must be called within a tokio runtime.
pub fn combine_not_null<A, B>(first: &Source<A>, second: &Source<B>) -> Derived<(A, B)>
where
	A: Clone + Send + Sync + 'static,
	B: Clone + Send + Sync + 'static,
{
	self::combine_inner(first, second, only_with_values)
}

/// Combines `first` and `second` and transforms each pair on `executor`.
///
/// Pairs whose transform fails are omitted.
pub fn combine_with<A, B, U, E, F>(first: &Source<A>, second: &Source<B>, executor: E, transform: F) -> Derived<U>
where
	A: Clone + Send + Sync + 'static,
	B: Clone + Send + Sync + 'static,
	U: Send + Sync + 'static,
	E: Executor + 'static,
	F: Fn(Option<A>, Option<B>) -> Result<U, Error> + Send + Sync + 'static,
{
	self::combine(first, second).map_with(executor, move |(first, second)| transform(first, second))
}

/// Combines `first` and `second`, while both have a value, and transforms each
/// pair on `executor`.
///
/// Pairs whose transform fails are omitted.
pub fn combine_not_null_with<A, B, U, E, F>(
	first: &Source<A>,
	second: &Source<B>,
	executor: E,
	transform: F,
) -> Derived<U>
where
	A: Clone + Send + Sync + 'static,
	B: Clone + Send + Sync + 'static,
	U: Send + Sync + 'static,
	E: Executor + 'static,
	F: Fn(A, B) -> Result<U, Error> + Send + Sync + 'static,
{
	self::combine_not_null(first, second).map_with(executor, move |(first, second)| transform(first, second))
}

/// Combines `first` and `second`, emitting the projection of each pair, if any.
pub(crate) fn combine_inner<A, B, T, P>(first: &Source<A>, second: &Source<B>, project: P) -> Derived<T>
where
	A: Clone + Send + Sync + 'static,
	B: Clone + Send + Sync + 'static,
	T: Send + Sync + 'static,
	P: Fn((Option<A>, Option<B>)) -> Option<T> + Send + Sync + 'static,
{
	let output = Source::new();
	let mut first_watcher = first.watch();
	let mut second_watcher = second.watch();

	let first_value = first_watcher.take_current();
	let second_value = second_watcher.take_current();
	if first_value.is_some() || second_value.is_some() {
		if let Some(value) = project((first_value, second_value)) {
			output.set(value);
		}
	}

	let task = {
		let output = output.clone();
		async move {
			let emit = |pair| match project(pair) {
				Some(value) => {
					tracing::trace!("Emitting combined value");
					output.set(value);
				},
				None => tracing::trace!("Combined value has no projection"),
			};

			let mut first_open = true;
			let mut second_open = true;
			while first_open || second_open {
				tokio::select! {
					value = first_watcher.next(), if first_open => match value {
						Some(value) => emit((Some(value), second_watcher.current())),
						None => first_open = false,
					},
					value = second_watcher.next(), if second_open => match value {
						Some(value) => emit((first_watcher.current(), Some(value))),
						None => second_open = false,
					},
				}
			}
		}
	};

	Derived::new(output, [crate::derived::spawn(task)])
}
