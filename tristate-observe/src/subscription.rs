//! Subscriptions
//!
//! A [`Subscription`] describes which results a handler applies to,
//! whether it's removed after firing once, and what data the results
//! must (or must not) carry.

// Imports
use {
	crate::handler::{Fault, Handler, HandlerOutput},
	core::fmt,
	tristate_result::{DataResult, Error, Items, Status},
	tristate_source::Executor,
};

/// Data filter
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum DataFilter {
	/// Matches any result
	#[default]
	Any,

	/// Matches results with data
	WithData,

	/// Matches results without data
	WithoutData,
}

impl DataFilter {
	/// Returns if a result with or without data matches this filter
	#[must_use]
	pub const fn matches(self, has_data: bool) -> bool {
		match self {
			Self::Any => true,
			Self::WithData => has_data,
			Self::WithoutData => !has_data,
		}
	}
}

/// Subscription kind
pub(crate) enum Kind<T> {
	/// Every result, with whether it's loading
	Loading(Handler<bool>),

	/// Loading results
	ShowLoading(Handler<()>),

	/// Non-loading results
	HideLoading(Handler<()>),

	/// Error results, with their error
	Error(Handler<Error>),

	/// Successful results
	Success(Handler<()>),

	/// Results with data, with their data
	Data(Handler<T>),

	/// Results with a status
	Result(Handler<DataResult<T>>),

	/// Results with a status, with their status
	Status(Handler<Status>),

	/// Results without a status
	None(Handler<()>),

	/// Results with an empty container
	Empty(ItemsHandler<T>),

	/// Results with a non-empty container
	NotEmpty(ItemsHandler<T>),

	/// Results with a container with many items
	ManyItems(ItemsHandler<T>),
}

/// Container handler
pub(crate) struct ItemsHandler<T> {
	/// Item count
	count: fn(&T) -> usize,

	/// Handler
	handler: Handler<()>,
}

impl<T: Items> ItemsHandler<T> {
	/// Creates a new container handler
	fn new(handler: Handler<()>) -> Self {
		Self {
			count: T::item_count,
			handler,
		}
	}
}

impl<T: Clone + Send + Sync + 'static> Kind<T> {
	/// Returns if this is an error kind
	pub(crate) const fn is_error(&self) -> bool {
		matches!(self, Self::Error(_))
	}

	/// Returns the name of this kind
	pub(crate) const fn name(&self) -> &'static str {
		match self {
			Self::Loading(_) => "loading",
			Self::ShowLoading(_) => "show_loading",
			Self::HideLoading(_) => "hide_loading",
			Self::Error(_) => "error",
			Self::Success(_) => "success",
			Self::Data(_) => "data",
			Self::Result(_) => "result",
			Self::Status(_) => "status",
			Self::None(_) => "none",
			Self::Empty(_) => "empty",
			Self::NotEmpty(_) => "not_empty",
			Self::ManyItems(_) => "many_items",
		}
	}

	/// Fires this kind's handler, if it applies to `result`.
	///
	/// Returns whether it fired.
	pub(crate) async fn fire(&mut self, result: &DataResult<T>, executor: &dyn Executor) -> Result<bool, Fault> {
		match self {
			Self::Loading(handler) => handler.fire(Some(result.is_loading()), executor).await,
			Self::ShowLoading(handler) => self::fire_if(result.is_loading(), handler, executor).await,
			Self::HideLoading(handler) => self::fire_if(!result.is_loading(), handler, executor).await,
			Self::Error(handler) => match result.is_error() {
				true => handler.fire(result.error.clone(), executor).await,
				false => Ok(false),
			},
			Self::Success(handler) => self::fire_if(result.is_success(), handler, executor).await,
			Self::Data(handler) => handler.fire(result.data.clone(), executor).await,
			Self::Result(handler) => match result.is_none() {
				true => Ok(false),
				false => handler.fire(Some(result.clone()), executor).await,
			},
			Self::Status(handler) => match result.is_none() {
				true => Ok(false),
				false => handler.fire(Some(result.status), executor).await,
			},
			Self::None(handler) => self::fire_if(result.is_none(), handler, executor).await,
			Self::Empty(items) => {
				let applies = result.data.as_ref().map(items.count).is_some_and(|count| count == 0);
				self::fire_if(applies, &mut items.handler, executor).await
			},
			Self::NotEmpty(items) => {
				let applies = result.data.as_ref().map(items.count).is_some_and(|count| count >= 1);
				self::fire_if(applies, &mut items.handler, executor).await
			},
			Self::ManyItems(items) => {
				let applies = result.data.as_ref().map(items.count).is_some_and(|count| count >= 2);
				self::fire_if(applies, &mut items.handler, executor).await
			},
		}
	}
}

/// Fires a unit handler if `applies`
async fn fire_if(applies: bool, handler: &mut Handler<()>, executor: &dyn Executor) -> Result<bool, Fault> {
	match applies {
		true => handler.fire(Some(()), executor).await,
		false => Ok(false),
	}
}

/// Subscription
pub struct Subscription<T> {
	/// Kind
	pub(crate) kind: Kind<T>,

	/// Whether to remove this subscription after it first fires
	pub(crate) single: bool,

	/// Data filter
	pub(crate) filter: DataFilter,
}

impl<T> Subscription<T> {
	/// Creates a subscription of a kind
	const fn new(kind: Kind<T>) -> Self {
		Self {
			kind,
			single: false,
			filter: DataFilter::Any,
		}
	}

	/// Removes this subscription after it first fires
	#[must_use]
	pub const fn single(mut self) -> Self {
		self.single = true;
		self
	}

	/// Only fires this subscription for results with (or without) data
	#[must_use]
	pub const fn with_data(self, with_data: bool) -> Self {
		self.with_filter(match with_data {
			true => DataFilter::WithData,
			false => DataFilter::WithoutData,
		})
	}

	/// Sets the data filter of this subscription
	#[must_use]
	pub const fn with_filter(mut self, filter: DataFilter) -> Self {
		self.filter = filter;
		self
	}

	/// Returns if this subscription is removed after it first fires
	#[must_use]
	pub const fn is_single(&self) -> bool {
		self.single
	}

	/// Returns the data filter of this subscription
	#[must_use]
	pub const fn filter(&self) -> DataFilter {
		self.filter
	}
}

impl<T: Send + 'static> Subscription<T> {
	/// Subscribes to every result, with whether it's loading
	pub fn loading<F, O>(f: F) -> Self
	where
		F: FnMut(bool) -> O + Send + 'static,
		O: HandlerOutput,
	{
		Self::new(Kind::Loading(Handler::value(f)))
	}

	/// Subscribes to loading results
	pub fn show_loading<F, O>(f: F) -> Self
	where
		F: FnMut() -> O + Send + 'static,
		O: HandlerOutput,
	{
		Self::new(Kind::ShowLoading(Handler::unit(f)))
	}

	/// Subscribes to results that aren't loading
	pub fn hide_loading<F, O>(f: F) -> Self
	where
		F: FnMut() -> O + Send + 'static,
		O: HandlerOutput,
	{
		Self::new(Kind::HideLoading(Handler::unit(f)))
	}

	/// Subscribes to the errors of error results.
	///
	/// Error results without an error don't fire this subscription.
	pub fn error<F, O>(f: F) -> Self
	where
		F: FnMut(Error) -> O + Send + 'static,
		O: HandlerOutput,
	{
		Self::new(Kind::Error(Handler::value(f)))
	}

	/// Subscribes to error results
	pub fn error_unit<F, O>(f: F) -> Self
	where
		F: FnMut() -> O + Send + 'static,
		O: HandlerOutput,
	{
		Self::new(Kind::Error(Handler::unit(f)))
	}

	/// Subscribes to the transformed errors of error results
	pub fn error_with<U, F, C, O>(transform: F, f: C) -> Self
	where
		U: Send + 'static,
		F: Fn(Error) -> Result<U, Error> + Send + Sync + 'static,
		C: FnMut(U) -> O + Send + 'static,
		O: HandlerOutput,
	{
		Self::new(Kind::Error(Handler::transformed(transform, f)))
	}

	/// Subscribes to successful results
	pub fn success<F, O>(f: F) -> Self
	where
		F: FnMut() -> O + Send + 'static,
		O: HandlerOutput,
	{
		Self::new(Kind::Success(Handler::unit(f)))
	}

	/// Subscribes to the data of results
	pub fn data<F, O>(f: F) -> Self
	where
		F: FnMut(T) -> O + Send + 'static,
		O: HandlerOutput,
	{
		Self::new(Kind::Data(Handler::value(f)))
	}

	/// Subscribes to the transformed data of results
	pub fn data_with<U, F, C, O>(transform: F, f: C) -> Self
	where
		U: Send + 'static,
		F: Fn(T) -> Result<U, Error> + Send + Sync + 'static,
		C: FnMut(U) -> O + Send + 'static,
		O: HandlerOutput,
	{
		Self::new(Kind::Data(Handler::transformed(transform, f)))
	}

	/// Subscribes to results with a status
	pub fn result<F, O>(f: F) -> Self
	where
		F: FnMut(DataResult<T>) -> O + Send + 'static,
		O: HandlerOutput,
	{
		Self::new(Kind::Result(Handler::value(f)))
	}

	/// Subscribes to transformed results with a status
	pub fn result_with<U, F, C, O>(transform: F, f: C) -> Self
	where
		U: Send + 'static,
		F: Fn(DataResult<T>) -> Result<U, Error> + Send + Sync + 'static,
		C: FnMut(U) -> O + Send + 'static,
		O: HandlerOutput,
	{
		Self::new(Kind::Result(Handler::transformed(transform, f)))
	}

	/// Subscribes to the status of results with a status
	pub fn status<F, O>(f: F) -> Self
	where
		F: FnMut(Status) -> O + Send + 'static,
		O: HandlerOutput,
	{
		Self::new(Kind::Status(Handler::value(f)))
	}

	/// Subscribes to the transformed status of results with a status
	pub fn status_with<U, F, C, O>(transform: F, f: C) -> Self
	where
		U: Send + 'static,
		F: Fn(Status) -> Result<U, Error> + Send + Sync + 'static,
		C: FnMut(U) -> O + Send + 'static,
		O: HandlerOutput,
	{
		Self::new(Kind::Status(Handler::transformed(transform, f)))
	}

	/// Subscribes to results without a status
	pub fn none<F, O>(f: F) -> Self
	where
		F: FnMut() -> O + Send + 'static,
		O: HandlerOutput,
	{
		Self::new(Kind::None(Handler::unit(f)))
	}
}

impl<T: Items + Send + 'static> Subscription<T> {
	/// Subscribes to results with an empty container
	pub fn empty<F, O>(f: F) -> Self
	where
		F: FnMut() -> O + Send + 'static,
		O: HandlerOutput,
	{
		Self::new(Kind::Empty(ItemsHandler::new(Handler::unit(f))))
	}

	/// Subscribes to results with a non-empty container
	pub fn not_empty<F, O>(f: F) -> Self
	where
		F: FnMut() -> O + Send + 'static,
		O: HandlerOutput,
	{
		Self::new(Kind::NotEmpty(ItemsHandler::new(Handler::unit(f))))
	}

	/// Subscribes to results with a container with more than one item
	pub fn many_items<F, O>(f: F) -> Self
	where
		F: FnMut() -> O + Send + 'static,
		O: HandlerOutput,
	{
		Self::new(Kind::ManyItems(ItemsHandler::new(Handler::unit(f))))
	}
}

impl<T: Clone + Send + Sync + 'static> fmt::Debug for Subscription<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Subscription")
			.field("kind", &self.kind.name())
			.field("single", &self.single)
			.field("filter", &self.filter)
			.finish()
	}
}
