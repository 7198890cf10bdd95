//! Result-aware combinators
//!
//! Combinators over sources of [`DataResult`]s, merging the results of both
//! sides instead of pairing them.

// Imports
use {
	crate::{Derived, Executor, Source, chain::chain_inner, combine::combine_inner},
	core::fmt,
	std::sync::Arc,
	tristate_result::{DataResult, Error, merge, merge_not_null},
};

/// Combines the results of `first` and `second` using [`merge`].
///
/// Must be called within a tokio runtime.
pub fn combine_results<A, B>(
	first: &Source<DataResult<A>>,
	second: &Source<DataResult<B>>,
) -> Derived<DataResult<(Option<A>, Option<B>)>>
where
	A: Clone + Send + Sync + 'static,
	B: Clone + Send + Sync + 'static,
{
	self::combine_inner(first, second, |(first, second)| Some(merge(first, second)))
}

/// Combines the results of `first` and `second` using [`merge_not_null`].
///
/// Every merged result is emitted, and only carries data while both sides do.
///
/// Must be called within a tokio runtime.
pub fn combine_results_not_null<A, B>(
	first: &Source<DataResult<A>>,
	second: &Source<DataResult<B>>,
) -> Derived<DataResult<(A, B)>>
where
	A: Clone + Send + Sync + 'static,
	B: Clone + Send + Sync + 'static,
{
	self::combine_inner(first, second, |(first, second)| Some(merge_not_null(first, second)))
}

/// Chains the results of `first` with the result source `other` derives
/// from each of them, merging both using [`merge`].
///
/// See [`chain_with`](crate::chain_with) for details.
pub fn chain_results<A, B, S, O, C>(
	first: &Source<DataResult<A>>,
	other: O,
	condition: C,
) -> Derived<DataResult<(Option<A>, Option<B>)>>
where
	A: Clone + Send + Sync + 'static,
	B: Clone + Send + Sync + 'static,
	S: Into<Derived<DataResult<B>>>,
	O: Fn(&DataResult<A>) -> Result<S, Error> + Send + 'static,
	C: Fn(&DataResult<A>) -> Result<bool, Error> + Send + 'static,
{
	self::chain_inner(first, other, condition, |(first, second)| {
		Some(merge(Some(first), second))
	})
}

/// Transform function
type TransformFn<I, O> = dyn Fn(DataResult<I>) -> Result<DataResult<O>, Error> + Send + Sync;

/// Fallback function
type FallbackFn<O> = dyn Fn(Error) -> Result<DataResult<O>, Error> + Send + Sync;

/// What to do when a result transform fails
pub enum FailMode<O> {
	/// Omit the result
	Omit,

	/// Replace the result with an error result carrying the failure
	ErrorStatus,

	/// Replace the result with the fallback's.
	///
	/// If the fallback also fails, behaves like [`FailMode::ErrorStatus`]
	/// with the fallback's failure.
	Fallback(Arc<FallbackFn<O>>),
}

impl<O> Clone for FailMode<O> {
	fn clone(&self) -> Self {
		match self {
			Self::Omit => Self::Omit,
			Self::ErrorStatus => Self::ErrorStatus,
			Self::Fallback(fallback) => Self::Fallback(Arc::clone(fallback)),
		}
	}
}

impl<O> fmt::Debug for FailMode<O> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Omit => f.pad("Omit"),
			Self::ErrorStatus => f.pad("ErrorStatus"),
			Self::Fallback(_) => f.pad("Fallback"),
		}
	}
}

/// Result transform
pub struct ResultTransform<I, O> {
	/// Transform
	func: Arc<TransformFn<I, O>>,

	/// Fail mode
	fail_mode: FailMode<O>,
}

impl<I, O> ResultTransform<I, O> {
	/// Creates a transform that omits results it fails on
	pub fn omit_fail<F>(func: F) -> Self
	where
		F: Fn(DataResult<I>) -> Result<DataResult<O>, Error> + Send + Sync + 'static,
	{
		Self {
			func:      Arc::new(func),
			fail_mode: FailMode::Omit,
		}
	}

	/// Creates a transform that emits an error result when it fails
	pub fn status_fail<F>(func: F) -> Self
	where
		F: Fn(DataResult<I>) -> Result<DataResult<O>, Error> + Send + Sync + 'static,
	{
		Self {
			func:      Arc::new(func),
			fail_mode: FailMode::ErrorStatus,
		}
	}

	/// Creates a transform that emits the result of `fallback` when it fails
	pub fn fallback<F, G>(func: F, fallback: G) -> Self
	where
		F: Fn(DataResult<I>) -> Result<DataResult<O>, Error> + Send + Sync + 'static,
		G: Fn(Error) -> Result<DataResult<O>, Error> + Send + Sync + 'static,
	{
		Self {
			func:      Arc::new(func),
			fail_mode: FailMode::Fallback(Arc::new(fallback)),
		}
	}

	/// Returns the fail mode
	#[must_use]
	pub const fn fail_mode(&self) -> &FailMode<O> {
		&self.fail_mode
	}

	/// Applies this transform to `result`.
	///
	/// Returns `None` if the result should be omitted.
	pub fn apply(&self, result: DataResult<I>) -> Option<DataResult<O>> {
		let err = match (self.func)(result) {
			Ok(result) => return Some(result),
			Err(err) => err,
		};

		match &self.fail_mode {
			FailMode::Omit => {
				tracing::debug!(%err, "Result transform failed, omitting result");
				None
			},
			FailMode::ErrorStatus => Some(DataResult::error(Some(err), None)),
			FailMode::Fallback(fallback) => match fallback(err) {
				Ok(result) => Some(result),
				Err(err) => {
					tracing::debug!(%err, "Result transform fallback failed");
					Some(DataResult::error(Some(err), None))
				},
			},
		}
	}

	/// Applies this transform to every result of `source` on `executor`.
	///
	/// If `source` is a [`Derived`] source, it must be kept alive by the caller.
	/// Must be called within a tokio runtime.
	pub fn apply_to<E>(&self, source: &Source<DataResult<I>>, executor: E) -> Derived<DataResult<O>>
	where
		I: Clone + Send + Sync + 'static,
		O: Send + Sync + 'static,
		E: Executor + 'static,
	{
		let transform = self.clone();
		Derived::from(source.clone()).filter_map_with(executor, move |result| Ok(transform.apply(result)))
	}
}

impl<I, O> Clone for ResultTransform<I, O> {
	fn clone(&self) -> Self {
		Self {
			func:      Arc::clone(&self.func),
			fail_mode: self.fail_mode.clone(),
		}
	}
}

impl<I, O> fmt::Debug for ResultTransform<I, O> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ResultTransform")
			.field("fail_mode", &self.fail_mode)
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use {super::*, tristate_result::Status};

	fn failing(_: DataResult<i32>) -> Result<DataResult<i32>, Error> {
		Err(Error::msg("transform failed"))
	}

	#[test]
	fn apply_success() {
		let transform = ResultTransform::omit_fail(|result: DataResult<i32>| Ok(result.map(|value| value * 2)));
		assert_eq!(transform.apply(DataResult::success(2)), Some(DataResult::success(4)));
	}

	#[test]
	fn omit_on_failure() {
		let transform = ResultTransform::omit_fail(self::failing);
		assert!(matches!(transform.fail_mode(), FailMode::Omit));
		assert_eq!(transform.apply(DataResult::success(1)), None);
	}

	#[test]
	fn error_status_on_failure() {
		let transform = ResultTransform::status_fail(self::failing);
		assert!(matches!(transform.fail_mode(), FailMode::ErrorStatus));
		let result = transform.apply(DataResult::success(1)).expect("Result was omitted");
		assert_eq!(result.status, Status::Error);
		assert!(result.has_error(), "Failure was not carried");
		assert!(!result.has_data(), "Failed result kept data");
	}

	#[test]
	fn fallback_on_failure() {
		let transform = ResultTransform::fallback(self::failing, |_| Ok(DataResult::success(0)));
		assert!(matches!(transform.fail_mode(), FailMode::Fallback(_)));
		assert_eq!(transform.apply(DataResult::loading(None, None)), Some(DataResult::success(0)));
	}

	#[test]
	fn failing_fallback_is_error_status() {
		let fallback_err = Error::msg("fallback failed");
		let transform = ResultTransform::fallback(self::failing, {
			let fallback_err = fallback_err.clone();
			move |_| Err(fallback_err.clone())
		});

		let result = transform.apply(DataResult::success(1)).expect("Result was omitted");
		assert_eq!(result, DataResult::error(Some(fallback_err), None));
	}
}
