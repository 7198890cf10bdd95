//! Observer
//!
//! Dispatches results to an ordered list of subscriptions.
//!
//! Subscriptions fire in registration order. Single subscriptions that
//! fired are removed once the dispatch finishes, so the list only shrinks
//! during a dispatch and only grows through registration between them.
//!
//! If a handler fails, the failure is retried through the error handlers,
//! as an error result carrying the failure, regardless of their data filters.
//! If none of them fire, the failure is unhandled. Failing transforms and
//! failing error handlers are never retried.

// Modules
#[cfg(test)]
mod tests;

// Imports
use {
	crate::{
		ObserveError,
		handler::{Fault, HandlerOutput},
		subscription::Subscription,
	},
	core::fmt,
	std::sync::Arc,
	tristate_result::{DataResult, Error, Items, Status},
	tristate_source::{Executor, Inline, Source},
};

/// Observer
pub struct Observer<T> {
	/// Subscriptions
	subscriptions: Vec<Subscription<T>>,

	/// Executor for transforms
	executor: Arc<dyn Executor>,
}

impl<T> Observer<T> {
	/// Creates a new observer without any subscriptions.
	///
	/// Transforms are run inline by default.
	#[must_use]
	pub fn new() -> Self {
		Self {
			subscriptions: vec![],
			executor:      Arc::new(Inline),
		}
	}

	/// Sets the executor to run transforms on
	#[must_use]
	pub fn transform_executor<E>(mut self, executor: E) -> Self
	where
		E: Executor + 'static,
	{
		self.executor = Arc::new(executor);
		self
	}

	/// Adds a subscription
	#[must_use]
	pub fn with(mut self, subscription: Subscription<T>) -> Self {
		self.subscriptions.push(subscription);
		self
	}

	/// Registers a subscription
	pub fn register(&mut self, subscription: Subscription<T>) -> &mut Self {
		self.subscriptions.push(subscription);
		self
	}

	/// Returns the number of subscriptions
	#[must_use]
	pub fn len(&self) -> usize {
		self.subscriptions.len()
	}

	/// Returns if there are no subscriptions
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.subscriptions.is_empty()
	}

	/// Removes the subscriptions at `indices`, keeping the order of the rest
	fn remove_fired(&mut self, indices: &[usize]) {
		if indices.is_empty() {
			return;
		}

		// Note: `indices` are sorted, so we only ever need to check the next one.
		let mut indices = indices.iter().copied().peekable();
		let mut idx = 0;
		self.subscriptions.retain(|_| {
			let fired = indices.next_if_eq(&idx).is_some();
			idx += 1;
			!fired
		});
	}
}

impl<T: Clone + Send + Sync + 'static> Observer<T> {
	/// Dispatches `result` to all subscriptions that apply to it.
	///
	/// Returns `true` if this dispatch removed the last subscription.
	/// Does nothing if `result` is `None`.
	pub async fn dispatch(&mut self, result: Option<&DataResult<T>>) -> Result<bool, ObserveError> {
		let Some(result) = result else {
			return Ok(false);
		};
		tracing::trace!(status = %result.status, subscriptions = self.subscriptions.len(), "Dispatching result");

		let was_empty = self.subscriptions.is_empty();
		if let Err(err) = self.dispatch_inner(result).await {
			tracing::warn!(%err, "Unable to dispatch result");
			return Err(err);
		}

		Ok(!was_empty && self.subscriptions.is_empty())
	}

	/// Dispatches `result`, retrying handler failures through the error handlers
	async fn dispatch_inner(&mut self, result: &DataResult<T>) -> Result<(), ObserveError> {
		let (idx, fault) = match self.fire_all(result, Pass::Normal).await {
			Ok(_) => return Ok(()),
			Err(failure) => failure,
		};

		let cause = match fault {
			Fault::Transform(source) => return Err(ObserveError::Transform { source }),
			Fault::Handler(handler_error) if self.subscriptions[idx].kind.is_error() =>
				return Err(ObserveError::ErrorHandlerFailed {
					cause: result.error.clone().unwrap_or_else(|| handler_error.clone()),
					handler_error,
				}),
			Fault::Handler(cause) => cause,
		};

		tracing::debug!(%cause, "Handler failed, retrying through error handlers");
		let retry = DataResult::error(Some(cause.clone()), None);
		match self.fire_all(&retry, Pass::Retry).await {
			Ok(0) => Err(ObserveError::Unhandled { cause }),
			Ok(_) => Ok(()),
			Err((_, Fault::Transform(source))) => Err(ObserveError::Transform { source }),
			Err((_, Fault::Handler(handler_error))) => Err(ObserveError::ErrorHandlerFailed { cause, handler_error }),
		}
	}

	/// Fires every subscription of `pass` that applies to `result`, once.
	///
	/// Returns the number of subscriptions that fired.
	/// Stops on the first failure, returning the index of the failing subscription.
	/// Single subscriptions that fired are removed regardless.
	async fn fire_all(&mut self, result: &DataResult<T>, pass: Pass) -> Result<usize, (usize, Fault)> {
		let mut fired = 0;
		let mut removed = vec![];
		let mut failure = None;
		for (idx, subscription) in self.subscriptions.iter_mut().enumerate() {
			let applies = match pass {
				Pass::Normal => subscription.filter().matches(result.has_data()),
				Pass::Retry => subscription.kind.is_error(),
			};
			if !applies {
				continue;
			}

			match subscription.kind.fire(result, &*self.executor).await {
				Ok(true) => {
					fired += 1;
					if subscription.is_single() {
						removed.push(idx);
					}
				},
				Ok(false) => (),
				Err(fault) => {
					tracing::trace!(kind = subscription.kind.name(), ?fault, "Subscription failed");
					failure = Some((idx, fault));
					break;
				},
			}
		}

		// Note: Only the subscriptions before the failing one may have been
		//       removed, so it's index stays valid.
		self.remove_fired(&removed);
		match failure {
			Some((idx, fault)) => Err((idx - removed.len(), fault)),
			None => Ok(fired),
		}
	}

	/// Dispatches every result of `source`, starting with the current one.
	///
	/// Stops once every subscription was removed, or once the source is closed.
	pub async fn observe(mut self, source: &Source<DataResult<T>>) -> Result<(), ObserveError> {
		let mut watcher = source.watch();
		while let Some(result) = watcher.next().await {
			if self.dispatch(Some(&result)).await? {
				tracing::debug!("All subscriptions removed, stopping observing");
				break;
			}
		}

		Ok(())
	}
}

impl<T: Send + 'static> Observer<T> {
	/// Subscribes to every result, with whether it's loading
	#[must_use]
	pub fn loading<F, O>(self, f: F) -> Self
	where
		F: FnMut(bool) -> O + Send + 'static,
		O: HandlerOutput,
	{
		self.with(Subscription::loading(f))
	}

	/// Subscribes to loading results
	#[must_use]
	pub fn show_loading<F, O>(self, f: F) -> Self
	where
		F: FnMut() -> O + Send + 'static,
		O: HandlerOutput,
	{
		self.with(Subscription::show_loading(f))
	}

	/// Subscribes to results that aren't loading
	#[must_use]
	pub fn hide_loading<F, O>(self, f: F) -> Self
	where
		F: FnMut() -> O + Send + 'static,
		O: HandlerOutput,
	{
		self.with(Subscription::hide_loading(f))
	}

	/// Subscribes to the errors of error results
	#[must_use]
	pub fn error<F, O>(self, f: F) -> Self
	where
		F: FnMut(Error) -> O + Send + 'static,
		O: HandlerOutput,
	{
		self.with(Subscription::error(f))
	}

	/// Subscribes to error results
	#[must_use]
	pub fn error_unit<F, O>(self, f: F) -> Self
	where
		F: FnMut() -> O + Send + 'static,
		O: HandlerOutput,
	{
		self.with(Subscription::error_unit(f))
	}

	/// Subscribes to the transformed errors of error results
	#[must_use]
	pub fn error_with<U, F, C, O>(self, transform: F, f: C) -> Self
	where
		U: Send + 'static,
		F: Fn(Error) -> Result<U, Error> + Send + Sync + 'static,
		C: FnMut(U) -> O + Send + 'static,
		O: HandlerOutput,
	{
		self.with(Subscription::error_with(transform, f))
	}

	/// Subscribes to successful results
	#[must_use]
	pub fn success<F, O>(self, f: F) -> Self
	where
		F: FnMut() -> O + Send + 'static,
		O: HandlerOutput,
	{
		self.with(Subscription::success(f))
	}

	/// Subscribes to the data of results
	#[must_use]
	pub fn data<F, O>(self, f: F) -> Self
	where
		F: FnMut(T) -> O + Send + 'static,
		O: HandlerOutput,
	{
		self.with(Subscription::data(f))
	}

	/// Subscribes to the transformed data of results
	#[must_use]
	pub fn data_with<U, F, C, O>(self, transform: F, f: C) -> Self
	where
		U: Send + 'static,
		F: Fn(T) -> Result<U, Error> + Send + Sync + 'static,
		C: FnMut(U) -> O + Send + 'static,
		O: HandlerOutput,
	{
		self.with(Subscription::data_with(transform, f))
	}

	/// Subscribes to results with a status
	#[must_use]
	pub fn result<F, O>(self, f: F) -> Self
	where
		F: FnMut(DataResult<T>) -> O + Send + 'static,
		O: HandlerOutput,
	{
		self.with(Subscription::result(f))
	}

	/// Subscribes to transformed results with a status
	#[must_use]
	pub fn result_with<U, F, C, O>(self, transform: F, f: C) -> Self
	where
		U: Send + 'static,
		F: Fn(DataResult<T>) -> Result<U, Error> + Send + Sync + 'static,
		C: FnMut(U) -> O + Send + 'static,
		O: HandlerOutput,
	{
		self.with(Subscription::result_with(transform, f))
	}

	/// Subscribes to the status of results with a status
	#[must_use]
	pub fn status<F, O>(self, f: F) -> Self
	where
		F: FnMut(Status) -> O + Send + 'static,
		O: HandlerOutput,
	{
		self.with(Subscription::status(f))
	}

	/// Subscribes to the transformed status of results with a status
	#[must_use]
	pub fn status_with<U, F, C, O>(self, transform: F, f: C) -> Self
	where
		U: Send + 'static,
		F: Fn(Status) -> Result<U, Error> + Send + Sync + 'static,
		C: FnMut(U) -> O + Send + 'static,
		O: HandlerOutput,
	{
		self.with(Subscription::status_with(transform, f))
	}

	/// Subscribes to results without a status
	#[must_use]
	pub fn none<F, O>(self, f: F) -> Self
	where
		F: FnMut() -> O + Send + 'static,
		O: HandlerOutput,
	{
		self.with(Subscription::none(f))
	}
}

impl<T: Items + Send + 'static> Observer<T> {
	/// Subscribes to results with an empty container
	#[must_use]
	pub fn empty<F, O>(self, f: F) -> Self
	where
		F: FnMut() -> O + Send + 'static,
		O: HandlerOutput,
	{
		self.with(Subscription::empty(f))
	}

	/// Subscribes to results with a non-empty container
	#[must_use]
	pub fn not_empty<F, O>(self, f: F) -> Self
	where
		F: FnMut() -> O + Send + 'static,
		O: HandlerOutput,
	{
		self.with(Subscription::not_empty(f))
	}

	/// Subscribes to results with a container with more than one item
	#[must_use]
	pub fn many_items<F, O>(self, f: F) -> Self
	where
		F: FnMut() -> O + Send + 'static,
		O: HandlerOutput,
	{
		self.with(Subscription::many_items(f))
	}
}

/// Dispatch pass
#[derive(Clone, Copy, Debug)]
enum Pass {
	/// Every subscription, subject to it's data filter
	Normal,

	/// Error subscriptions only, regardless of their data filter.
	///
	/// Retried results never carry data, so a data filter would drop the failure.
	Retry,
}

impl<T> Default for Observer<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: Clone + Send + Sync + 'static> fmt::Debug for Observer<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Observer")
			.field("subscriptions", &self.subscriptions)
			.finish_non_exhaustive()
	}
}
