//! Subscription handlers

// Imports
use {
	core::marker::PhantomData,
	futures::future::{BoxFuture, FutureExt},
	std::sync::Arc,
	tristate_result::Error,
	tristate_source::{Executor, exec},
};

/// Output of a handler.
///
/// Handlers may either be infallible, returning `()`, or fallible,
/// returning a `Result`.
pub trait HandlerOutput {
	/// Converts this output into a result
	fn into_result(self) -> Result<(), Error>;
}

impl HandlerOutput for () {
	fn into_result(self) -> Result<(), Error> {
		Ok(())
	}
}

impl<E: Into<Error>> HandlerOutput for Result<(), E> {
	fn into_result(self) -> Result<(), Error> {
		self.map_err(Into::into)
	}
}

/// Failure while firing a handler
#[derive(Debug)]
pub(crate) enum Fault {
	/// The handler itself failed
	Handler(Error),

	/// The handler's transform failed
	Transform(Error),
}

/// Handler
pub(crate) enum Handler<V> {
	/// Fires regardless of the value
	Unit(Box<dyn FnMut() -> Result<(), Error> + Send>),

	/// Fires with the value, if any
	Value(Box<dyn FnMut(V) -> Result<(), Error> + Send>),

	/// Fires with the transformed value, if any
	Transformed(Box<dyn TransformHandler<V>>),
}

impl<V: Send + 'static> Handler<V> {
	/// Creates a unit handler
	pub(crate) fn unit<F, O>(mut f: F) -> Self
	where
		F: FnMut() -> O + Send + 'static,
		O: HandlerOutput,
	{
		Self::Unit(Box::new(move || f().into_result()))
	}

	/// Creates a value handler
	pub(crate) fn value<F, O>(mut f: F) -> Self
	where
		F: FnMut(V) -> O + Send + 'static,
		O: HandlerOutput,
	{
		Self::Value(Box::new(move |value| f(value).into_result()))
	}

	/// Creates a handler that transforms the value before handling it
	pub(crate) fn transformed<U, F, C, O>(transform: F, mut callback: C) -> Self
	where
		U: Send + 'static,
		F: Fn(V) -> Result<U, Error> + Send + Sync + 'static,
		C: FnMut(U) -> O + Send + 'static,
		O: HandlerOutput,
	{
		Self::Transformed(Box::new(Transformed {
			transform: Arc::new(transform),
			callback:  move |value| callback(value).into_result(),
			_phantom:  PhantomData,
		}))
	}

	/// Fires this handler.
	///
	/// Returns whether it fired.
	pub(crate) async fn fire(&mut self, value: Option<V>, executor: &dyn Executor) -> Result<bool, Fault> {
		match (self, value) {
			(Self::Unit(f), _) => f().map_err(Fault::Handler)?,
			(Self::Value(f), Some(value)) => f(value).map_err(Fault::Handler)?,
			(Self::Transformed(handler), Some(value)) => handler.fire(value, executor).await?,
			(Self::Value(_) | Self::Transformed(_), None) => return Ok(false),
		}

		Ok(true)
	}
}

/// Transform handler
pub(crate) trait TransformHandler<V>: Send {
	/// Transforms `value` on `executor`, then handles it
	fn fire<'a>(&'a mut self, value: V, executor: &'a dyn Executor) -> BoxFuture<'a, Result<(), Fault>>;
}

/// Transform handler implementation
struct Transformed<F, C, U> {
	/// Transform
	transform: Arc<F>,

	/// Callback
	callback: C,

	/// Transformed value
	_phantom: PhantomData<fn() -> U>,
}

impl<V, U, F, C> TransformHandler<V> for Transformed<F, C, U>
where
	V: Send + 'static,
	U: Send + 'static,
	F: Fn(V) -> Result<U, Error> + Send + Sync + 'static,
	C: FnMut(U) -> Result<(), Error> + Send,
{
	fn fire<'a>(&'a mut self, value: V, executor: &'a dyn Executor) -> BoxFuture<'a, Result<(), Fault>> {
		let transform = Arc::clone(&self.transform);
		async move {
			let value = exec::run(executor, move || transform(value))
				.await
				.map_err(Fault::Transform)?;
			(self.callback)(value).map_err(Fault::Handler)
		}
		.boxed()
	}
}
