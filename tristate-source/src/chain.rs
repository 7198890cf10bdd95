//! Chaining sources
//!
//! A chain derives a second source from every value of the first, and
//! pairs that value with the derived source's values until the first
//! source changes again.
//!
//! Each value of the first source starts a new link, with a new generation.
//! Starting a link aborts the task forwarding the previous link's values,
//! and any value it was about to write is discarded, since writes are only
//! accepted from the current generation.

// Imports
use {
	crate::{Derived, Executor, Source, derived},
	futures::future::AbortHandle,
	parking_lot::Mutex,
	std::sync::Arc,
	tristate_result::Error,
};

/// Chains `first` with the source `other` derives from each of it's values.
///
/// While `condition` doesn't hold for a value of `first`, or either `condition`
/// or `other` fail, the value is emitted with no pair.
/// The output also emits a value with no pair while the derived source has no value.
///
/// The chain ends once `first` is closed.
/// Must be called within a tokio runtime.
pub fn chain_with<A, B, S, O, C>(first: &Source<A>, other: O, condition: C) -> Derived<(A, Option<B>)>
where
	A: Clone + Send + Sync + 'static,
	B: Clone + Send + Sync + 'static,
	S: Into<Derived<B>>,
	O: Fn(&A) -> Result<S, Error> + Send + 'static,
	C: Fn(&A) -> Result<bool, Error> + Send + 'static,
{
	self::chain_inner(first, other, condition, Some)
}

/// Chains `first` with the source `other` derives from each of it's values,
/// only emitting once the derived source has a value.
///
/// See [`chain_with`] for details.
pub fn chain_not_null_with<A, B, S, O, C>(first: &Source<A>, other: O, condition: C) -> Derived<(A, B)>
where
	A: Clone + Send + Sync + 'static,
	B: Clone + Send + Sync + 'static,
	S: Into<Derived<B>>,
	O: Fn(&A) -> Result<S, Error> + Send + 'static,
	C: Fn(&A) -> Result<bool, Error> + Send + 'static,
{
	self::chain_inner(first, other, condition, |(first, second)| second.map(|second| (first, second)))
}

/// Chains `first` with the source `other` derives from each of it's values,
/// and transforms each pair on `executor`.
///
/// Pairs whose transform fails are omitted.
pub fn chain_with_transform<A, B, S, O, C, U, E, F>(
	first: &Source<A>,
	other: O,
	condition: C,
	executor: E,
	transform: F,
) -> Derived<U>
where
	A: Clone + Send + Sync + 'static,
	B: Clone + Send + Sync + 'static,
	S: Into<Derived<B>>,
	O: Fn(&A) -> Result<S, Error> + Send + 'static,
	C: Fn(&A) -> Result<bool, Error> + Send + 'static,
	U: Send + Sync + 'static,
	E: Executor + 'static,
	F: Fn(A, Option<B>) -> Result<U, Error> + Send + Sync + 'static,
{
	self::chain_with(first, other, condition).map_with(executor, move |(first, second)| transform(first, second))
}

/// Chains `first` with the source `other` derives from each of it's values,
/// once the derived source has a value, and transforms each pair on `executor`.
///
/// Pairs whose transform fails are omitted.
pub fn chain_not_null_with_transform<A, B, S, O, C, U, E, F>(
	first: &Source<A>,
	other: O,
	condition: C,
	executor: E,
	transform: F,
) -> Derived<U>
where
	A: Clone + Send + Sync + 'static,
	B: Clone + Send + Sync + 'static,
	S: Into<Derived<B>>,
	O: Fn(&A) -> Result<S, Error> + Send + 'static,
	C: Fn(&A) -> Result<bool, Error> + Send + 'static,
	U: Send + Sync + 'static,
	E: Executor + 'static,
	F: Fn(A, B) -> Result<U, Error> + Send + Sync + 'static,
{
	self::chain_not_null_with(first, other, condition)
		.map_with(executor, move |(first, second)| transform(first, second))
}

/// Output shared between the links of a chain
struct Link<T, P> {
	/// Output
	output: Source<T>,

	/// Current generation
	generation: Mutex<u64>,

	/// Projection
	project: P,
}

impl<T, P> Link<T, P> {
	/// Starts a new generation, returning it
	fn advance(&self) -> u64 {
		let mut generation = self.generation.lock();
		*generation += 1;
		*generation
	}

	/// Emits the projection of `pair`, if `generation` is still current.
	///
	/// Returns `false` if `generation` is stale.
	fn emit<A, B>(&self, generation: u64, pair: (A, Option<B>)) -> bool
	where
		P: Fn((A, Option<B>)) -> Option<T>,
	{
		let current = self.generation.lock();
		if *current != generation {
			tracing::trace!(generation, current = *current, "Discarding stale chain value");
			return false;
		}

		if let Some(value) = (self.project)(pair) {
			tracing::trace!(generation, "Emitting chained value");
			self.output.set(value);
		}

		true
	}
}

/// Chains `first` with the source `other` derives, emitting the projection of each pair, if any.
pub(crate) fn chain_inner<A, B, T, S, O, C, P>(first: &Source<A>, other: O, condition: C, project: P) -> Derived<T>
where
	A: Clone + Send + Sync + 'static,
	B: Clone + Send + Sync + 'static,
	T: Send + Sync + 'static,
	S: Into<Derived<B>>,
	O: Fn(&A) -> Result<S, Error> + Send + 'static,
	C: Fn(&A) -> Result<bool, Error> + Send + 'static,
	P: Fn((A, Option<B>)) -> Option<T> + Send + Sync + 'static,
{
	let output = Source::new();
	let link = Arc::new(Link {
		output: output.clone(),
		generation: Mutex::new(0),
		project,
	});

	let mut watcher = first.watch();
	let task = async move {
		let mut child = scopeguard::guard(None::<AbortHandle>, |child| {
			if let Some(child) = child {
				child.abort();
			}
		});

		while let Some(value) = watcher.next().await {
			let generation = link.advance();
			if let Some(previous) = child.take() {
				previous.abort();
				tracing::debug!(generation, "Cancelled previous chain link");
			}

			let Some(second) = self::derive(&value, &condition, &other) else {
				link.emit(generation, (value, None));
				continue;
			};

			if !second.is_initialized() {
				link.emit(generation, (value.clone(), None));
			}

			let link = Arc::clone(&link);
			let mut second_watcher = second.watch();
			*child = Some(derived::spawn(async move {
				// Note: Keeps the derived source and it's tasks alive while we're current.
				let _second = second;
				while let Some(second) = second_watcher.next().await {
					if !link.emit(generation, (value.clone(), Some(second))) {
						break;
					}
				}
			}));
		}
	};

	Derived::new(output, [derived::spawn(task)])
}

/// Derives the second source from `value`.
///
/// Returns `None` if `condition` doesn't hold, or if either it or `other` fail.
fn derive<A, B, S, O, C>(value: &A, condition: &C, other: &O) -> Option<Derived<B>>
where
	S: Into<Derived<B>>,
	O: Fn(&A) -> Result<S, Error>,
	C: Fn(&A) -> Result<bool, Error>,
{
	match condition(value) {
		Ok(true) => (),
		Ok(false) => return None,
		Err(err) => {
			tracing::debug!(%err, "Chain condition failed, skipping derivation");
			return None;
		},
	}

	match other(value) {
		Ok(second) => Some(second.into()),
		Err(err) => {
			tracing::debug!(%err, "Chain derivation failed");
			None
		},
	}
}
