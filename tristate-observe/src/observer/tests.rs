//! Tests

// Imports
use {
	super::*,
	crate::{DataFilter, DataResultObserveExt},
	core::{mem, time::Duration},
	futures::executor::block_on,
	parking_lot::Mutex,
	tristate_source::Blocking,
};

/// Call log
type Log<T> = Arc<Mutex<Vec<T>>>;

#[test]
fn data_and_status_fire() {
	let data = self::log();
	let status = self::log();
	let mut observer = Observer::new()
		.data(self::push(&data))
		.status(self::push(&status));

	let consumed = self::dispatch(&mut observer, DataResult::success("x")).expect("Dispatch failed");
	assert!(!consumed, "Non-single subscriptions were consumed");
	assert_eq!(*data.lock(), ["x"]);
	assert_eq!(*status.lock(), [Status::Success]);
	assert_eq!(observer.len(), 2, "Subscriptions were removed");
}

#[test]
fn show_hide_loading() {
	let shown = self::log();
	let hidden = self::log();
	let mut observer = Observer::<i32>::new()
		.show_loading(self::push_unit(&shown, "show"))
		.hide_loading(self::push_unit(&hidden, "hide"));

	self::dispatch(&mut observer, DataResult::loading(None, None)).expect("Dispatch failed");
	assert_eq!(*shown.lock(), ["show"]);
	assert!(hidden.lock().is_empty(), "Hide loading fired while loading");

	self::dispatch(&mut observer, DataResult::success(1)).expect("Dispatch failed");
	assert_eq!(*shown.lock(), ["show"]);
	assert_eq!(*hidden.lock(), ["hide"]);
}

#[test]
fn loading_fires_always() {
	let loading = self::log();
	let mut observer = Observer::<i32>::new().loading(self::push(&loading));

	self::dispatch(&mut observer, DataResult::loading(None, None)).expect("Dispatch failed");
	self::dispatch(&mut observer, DataResult::success(1)).expect("Dispatch failed");
	self::dispatch(&mut observer, DataResult::none()).expect("Dispatch failed");
	assert_eq!(*loading.lock(), [true, false, false]);
}

#[test]
fn single_data_fires_once() {
	let data = self::log();
	let mut observer = Observer::new().with(Subscription::data(self::push(&data)).single());

	let consumed = self::dispatch(&mut observer, DataResult::success(1)).expect("Dispatch failed");
	assert!(consumed, "Removing the last subscription didn't consume the observer");
	assert!(observer.is_empty(), "Single subscription wasn't removed");

	let consumed = self::dispatch(&mut observer, DataResult::loading(None, None)).expect("Dispatch failed");
	assert!(!consumed, "Empty observer was consumed again");
	assert!(observer.is_empty(), "Single subscription was re-added");
	assert_eq!(*data.lock(), [1]);
}

#[test]
fn single_is_kept_until_it_fires() {
	let data = self::log();
	let mut observer = Observer::new().with(Subscription::data(self::push(&data)).single());

	let consumed = self::dispatch(&mut observer, DataResult::loading(None, None)).expect("Dispatch failed");
	assert!(!consumed, "Observer consumed without firing");
	assert_eq!(observer.len(), 1, "Single subscription removed without firing");

	self::dispatch(&mut observer, DataResult::success(2)).expect("Dispatch failed");
	assert_eq!(*data.lock(), [2]);
}

#[test]
fn with_data_filters() {
	let loading = self::log();
	let errors = self::log();
	let mut observer = Observer::new()
		.with(Subscription::show_loading(self::push_unit(&loading, "loading")).with_data(true))
		.with(Subscription::error_unit(self::push_unit(&errors, "error")).with_data(true));

	let err = Error::msg("failed");
	self::dispatch(&mut observer, DataResult::<i32>::loading(None, None)).expect("Dispatch failed");
	self::dispatch(&mut observer, DataResult::error(Some(err.clone()), None)).expect("Dispatch failed");
	assert!(loading.lock().is_empty(), "Loading fired without data");
	assert!(errors.lock().is_empty(), "Error fired without data");

	self::dispatch(&mut observer, DataResult::loading(Some(1), None)).expect("Dispatch failed");
	self::dispatch(&mut observer, DataResult::error(Some(err), Some(1))).expect("Dispatch failed");
	assert_eq!(*loading.lock(), ["loading"]);
	assert_eq!(*errors.lock(), ["error"]);
}

#[test]
fn without_data_filter() {
	let success = self::log();
	let mut observer =
		Observer::<i32>::new().with(Subscription::success(self::push_unit(&success, "success")).with_data(false));

	self::dispatch(&mut observer, DataResult::success(1)).expect("Dispatch failed");
	self::dispatch(&mut observer, DataResult::new(None, None, Status::Success)).expect("Dispatch failed");
	assert_eq!(*success.lock(), ["success"]);
}

#[test]
fn error_value_requires_error() {
	let errors = self::log();
	let units = self::log();
	let mut observer = Observer::<i32>::new()
		.error(self::push(&errors))
		.error_unit(self::push_unit(&units, "error"));

	self::dispatch(&mut observer, DataResult::error(None, None)).expect("Dispatch failed");
	assert!(errors.lock().is_empty(), "Error handler fired without an error");
	assert_eq!(*units.lock(), ["error"]);

	let err = Error::msg("failed");
	self::dispatch(&mut observer, DataResult::error(Some(err.clone()), None)).expect("Dispatch failed");
	assert_eq!(*errors.lock(), [err]);
}

#[test]
fn none_status() {
	let none = self::log();
	let results = self::log();
	let statuses = self::log();
	let mut observer = Observer::<i32>::new()
		.none(self::push_unit(&none, "none"))
		.result(self::push(&results))
		.status(self::push(&statuses));

	self::dispatch(&mut observer, DataResult::none()).expect("Dispatch failed");
	assert_eq!(*none.lock(), ["none"]);
	assert!(results.lock().is_empty(), "Result fired without a status");
	assert!(statuses.lock().is_empty(), "Status fired without a status");

	self::dispatch(&mut observer, DataResult::success(5)).expect("Dispatch failed");
	assert_eq!(*none.lock(), ["none"]);
	assert_eq!(*results.lock(), [DataResult::success(5)]);
	assert_eq!(*statuses.lock(), [Status::Success]);
}

#[test]
fn container_kinds() {
	let calls = self::log();
	let mut observer = Observer::<Vec<i32>>::new()
		.empty(self::push_unit(&calls, "empty"))
		.not_empty(self::push_unit(&calls, "not_empty"))
		.many_items(self::push_unit(&calls, "many_items"));

	self::dispatch(&mut observer, DataResult::loading(None, None)).expect("Dispatch failed");
	assert!(calls.lock().is_empty(), "Container kinds fired without data");

	self::dispatch(&mut observer, DataResult::success(vec![])).expect("Dispatch failed");
	assert_eq!(mem::take(&mut *calls.lock()), ["empty"]);

	self::dispatch(&mut observer, DataResult::success(vec![1])).expect("Dispatch failed");
	assert_eq!(mem::take(&mut *calls.lock()), ["not_empty"]);

	self::dispatch(&mut observer, DataResult::success(vec![1, 2])).expect("Dispatch failed");
	assert_eq!(mem::take(&mut *calls.lock()), ["not_empty", "many_items"]);
}

#[test]
fn transformed_handlers() {
	let data = self::log();
	let statuses = self::log();
	let errors = self::log();
	let mut observer = Observer::new()
		.data_with(|value: i32| Ok(value * 2), self::push(&data))
		.status_with(|status: Status| Ok(status.to_string()), self::push(&statuses))
		.error_with(|err: Error| Ok(err.to_string()), self::push(&errors));

	self::dispatch(&mut observer, DataResult::success(2)).expect("Dispatch failed");
	self::dispatch(&mut observer, DataResult::error(Some(Error::msg("failed")), None)).expect("Dispatch failed");
	assert_eq!(*data.lock(), [4]);
	assert_eq!(*statuses.lock(), ["SUCCESS", "ERROR"]);
	assert_eq!(*errors.lock(), ["failed"]);
}

#[test]
fn dispatch_nothing() {
	let data = self::log();
	let mut observer = Observer::<i32>::new().with(Subscription::data(self::push(&data)).single());

	let consumed = block_on(observer.dispatch(None)).expect("Dispatch failed");
	assert!(!consumed, "Dispatching nothing consumed the observer");
	assert_eq!(observer.len(), 1, "Dispatching nothing removed a subscription");
}

#[test]
fn registering_between_dispatches() {
	let data = self::log();
	let mut observer = Observer::new();
	self::dispatch(&mut observer, DataResult::success(1)).expect("Dispatch failed");

	observer.register(Subscription::data(self::push(&data)));
	self::dispatch(&mut observer, DataResult::success(2)).expect("Dispatch failed");
	assert_eq!(*data.lock(), [2]);
}

#[test]
fn failure_without_error_handler() {
	let cause = Error::msg("handler failed");
	let mut observer = Observer::new().data(self::fail::<i32>(&cause));

	let err = self::dispatch(&mut observer, DataResult::success(1)).expect_err("Dispatch succeeded");
	match err {
		ObserveError::Unhandled { cause: err_cause } => assert_eq!(err_cause, cause),
		err => panic!("Expected an unhandled fault, found {err:?}"),
	}
}

#[test]
fn failure_retried_through_error_handler() {
	let cause = Error::msg("handler failed");
	let errors = self::log();
	let after = self::log();
	let mut observer = Observer::new()
		.data(self::fail::<i32>(&cause))
		.status(self::push(&after))
		.error(self::push(&errors));

	self::dispatch(&mut observer, DataResult::success(1)).expect("Dispatch failed");
	assert_eq!(*errors.lock(), [cause]);
	assert!(after.lock().is_empty(), "Subscription after the failing one fired");
}

#[test]
fn failing_error_handler_on_retry() {
	let cause = Error::msg("handler failed");
	let handler_err = Error::msg("error handler failed");
	let mut observer = Observer::new()
		.data(self::fail::<i32>(&cause))
		.error({
			let handler_err = handler_err.clone();
			move |_| Err::<(), _>(handler_err.clone())
		});

	let err = self::dispatch(&mut observer, DataResult::success(1)).expect_err("Dispatch succeeded");
	match err {
		ObserveError::ErrorHandlerFailed {
			cause: err_cause,
			handler_error,
		} => {
			assert_eq!(err_cause, cause, "Fault didn't carry the original cause");
			assert_eq!(handler_error, handler_err);
		},
		err => panic!("Expected an error handler fault, found {err:?}"),
	}
}

#[test]
fn failing_error_handler_is_not_retried() {
	let cause = Error::msg("result error");
	let handler_err = Error::msg("error handler failed");
	let calls = self::log();
	let mut observer = Observer::<i32>::new().error({
		let calls = Arc::clone(&calls);
		let handler_err = handler_err.clone();
		move |err| {
			calls.lock().push(err);
			Err::<(), _>(handler_err.clone())
		}
	});

	let err = self::dispatch(&mut observer, DataResult::error(Some(cause.clone()), None)).expect_err("Dispatch succeeded");
	assert!(
		matches!(err, ObserveError::ErrorHandlerFailed { .. }),
		"Expected an error handler fault, found {err:?}"
	);
	assert_eq!(*calls.lock(), [cause], "Error handler was retried");
}

#[test]
fn failing_transform_is_not_retried() {
	let errors = self::log();
	let mut observer = Observer::new()
		.data_with(|_: i32| Err::<i32, _>(Error::msg("transform failed")), |_| ())
		.error(self::push(&errors));

	let err = self::dispatch(&mut observer, DataResult::success(1)).expect_err("Dispatch succeeded");
	assert!(
		matches!(err, ObserveError::Transform { .. }),
		"Expected a transform fault, found {err:?}"
	);
	assert!(errors.lock().is_empty(), "Transform failure was retried");
}

#[test]
fn retry_removes_single_error_handler() {
	let cause = Error::msg("handler failed");
	let errors = self::log();
	let mut observer = Observer::new()
		.data(self::fail::<i32>(&cause))
		.with(Subscription::error(self::push(&errors)).single());

	self::dispatch(&mut observer, DataResult::success(1)).expect("Dispatch failed");
	assert_eq!(*errors.lock(), [cause]);
	assert_eq!(observer.len(), 1, "Single error handler wasn't removed");
}

#[test]
fn retry_ignores_data_filter() {
	let cause = Error::msg("handler failed");
	let errors = self::log();
	let mut observer = Observer::new()
		.data(self::fail::<i32>(&cause))
		.with(Subscription::error(self::push(&errors)).with_data(true));

	self::dispatch(&mut observer, DataResult::success(1)).expect("Dispatch failed");
	assert_eq!(*errors.lock(), [cause], "Filtered error handler didn't receive the failure");
}

#[test]
fn failing_transform_on_retry() {
	let cause = Error::msg("handler failed");
	let transform_err = Error::msg("transform failed");
	let mut observer = Observer::new().data(self::fail::<i32>(&cause)).error_with(
		{
			let transform_err = transform_err.clone();
			move |_| Err::<i32, _>(transform_err.clone())
		},
		|_| (),
	);

	let err = self::dispatch(&mut observer, DataResult::success(1)).expect_err("Dispatch succeeded");
	match err {
		ObserveError::Transform { source } => assert_eq!(source, transform_err),
		err => panic!("Expected a transform fault, found {err:?}"),
	}
}

#[test]
fn removes_every_fired_single() {
	let data = self::log();
	let statuses = self::log();
	let mut observer = Observer::new()
		.with(Subscription::data(self::push(&data)).single())
		.status(self::push(&statuses))
		.with(Subscription::data(self::push(&data)).single())
		.with(Subscription::data(self::push(&data)).with_data(false).single())
		.with(Subscription::data(self::push(&data)).single());

	self::dispatch(&mut observer, DataResult::success(1)).expect("Dispatch failed");
	assert_eq!(*data.lock(), [1, 1, 1]);
	assert_eq!(observer.len(), 2, "Fired singles weren't all removed");
	assert!(!observer.subscriptions[0].is_single(), "Kept the wrong subscription");
	assert!(observer.subscriptions[1].is_single(), "Kept the wrong subscription");
	assert_eq!(observer.subscriptions[1].filter(), DataFilter::WithoutData);

	self::dispatch(&mut observer, DataResult::success(2)).expect("Dispatch failed");
	assert_eq!(*statuses.lock(), [Status::Success, Status::Success]);
	assert_eq!(observer.len(), 2, "Filtered single was removed");
}

#[test]
fn observe_with_result() {
	let data = self::log();
	let consumed = block_on(DataResult::success(3).observe_with(|observer| {
		observer.with(Subscription::data(self::push(&data)).single())
	}))
	.expect("Dispatch failed");

	assert!(consumed, "Single subscription didn't consume the observer");
	assert_eq!(*data.lock(), [3]);
}

#[tokio::test]
async fn observe_until_consumed() {
	let source = Source::with_value(DataResult::loading(None, None));
	let data = self::log();
	let observer = Observer::new().with(Subscription::data(self::push(&data)).single());

	let task = tokio::spawn({
		let source = source.clone();
		async move { observer.observe(&source).await }
	});
	tokio::time::sleep(Duration::from_millis(20)).await;
	source.set(DataResult::success(7));

	tokio::time::timeout(Duration::from_secs(1), task)
		.await
		.expect("Observer didn't stop once consumed")
		.expect("Observer panicked")
		.expect("Observing failed");
	assert_eq!(*data.lock(), [7]);
}

#[tokio::test]
async fn observe_returns_faults() {
	let cause = Error::msg("handler failed");
	let source = Source::with_value(DataResult::success(1));
	let observer = Observer::new().data(self::fail::<i32>(&cause));

	let err = observer.observe(&source).await.expect_err("Observing succeeded");
	assert_eq!(*err.cause(), cause);
}

#[tokio::test(flavor = "multi_thread")]
async fn blocking_transform() {
	let data = self::log();
	let mut observer = Observer::new()
		.transform_executor(Blocking)
		.data_with(|value: i32| Ok(value + 1), self::push(&data));

	observer
		.dispatch(Some(&DataResult::success(1)))
		.await
		.expect("Dispatch failed");
	assert_eq!(*data.lock(), [2]);
}

/// Creates a new log
fn log<T>() -> Log<T> {
	Arc::new(Mutex::new(vec![]))
}

/// Returns a handler that pushes every value to `log`
fn push<T: Send + 'static>(log: &Log<T>) -> impl FnMut(T) + Send + 'static {
	let log = Arc::clone(log);
	move |value| log.lock().push(value)
}

/// Returns a handler that pushes `value` to `log`
fn push_unit(log: &Log<&'static str>, value: &'static str) -> impl FnMut() + Send + 'static {
	let log = Arc::clone(log);
	move || log.lock().push(value)
}

/// Returns a handler that always fails with `err`
fn fail<T: 'static>(err: &Error) -> impl FnMut(T) -> Result<(), Error> + Send + 'static {
	let err = err.clone();
	move |_| Err(err.clone())
}

/// Dispatches `result` to `observer`, blocking
fn dispatch<T>(observer: &mut Observer<T>, result: DataResult<T>) -> Result<bool, ObserveError>
where
	T: Clone + Send + Sync + 'static,
{
	block_on(observer.dispatch(Some(&result)))
}
