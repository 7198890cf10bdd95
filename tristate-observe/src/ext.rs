//! Observing a single result

// Imports
use {
	crate::{ObserveError, Observer},
	futures::future::{BoxFuture, FutureExt},
	tristate_result::DataResult,
};

/// Extension trait to observe a single result
#[extend::ext(name = DataResultObserveExt)]
pub impl<T> DataResult<T>
where
	T: Clone + Send + Sync + 'static,
{
	/// Dispatches this result to the observer built by `config`.
	///
	/// Returns whether the dispatch removed every subscription.
	fn observe_with<F>(&self, config: F) -> BoxFuture<'_, Result<bool, ObserveError>>
	where
		F: FnOnce(Observer<T>) -> Observer<T>,
	{
		let mut observer = config(Observer::new());
		async move { observer.dispatch(Some(self)).await }.boxed()
	}
}
