//! Error record

// Imports
use {
	core::fmt,
	std::{error::Error as StdError, sync::Arc},
};

/// Error carried by a [`DataResult`](crate::DataResult).
///
/// This is cheap to clone. Equality is identity: clones of the same error
/// compare equal, while two separately created errors never do, even if
/// their messages match.
#[derive(Clone)]
pub struct Error {
	/// Inner
	inner: Arc<anyhow::Error>,
}

impl Error {
	/// Creates a new error from any standard error
	pub fn new<E>(err: E) -> Self
	where
		E: StdError + Send + Sync + 'static,
	{
		Self::from(anyhow::Error::new(err))
	}

	/// Creates a new error from a message
	pub fn msg<M>(msg: M) -> Self
	where
		M: fmt::Display + fmt::Debug + Send + Sync + 'static,
	{
		Self::from(anyhow::Error::msg(msg))
	}

	/// Wraps this error with some context.
	///
	/// The returned error is a new error, with this one as it's source.
	#[must_use]
	pub fn context<C>(self, context: C) -> Self
	where
		C: fmt::Display + Send + Sync + 'static,
	{
		Self::from(anyhow::Error::new(self).context(context))
	}

	/// Returns if both errors are the same error
	#[must_use]
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.inner, &other.inner)
	}

	/// Attempts to downcast this error to `E`
	#[must_use]
	pub fn downcast_ref<E>(&self) -> Option<&E>
	where
		E: fmt::Display + fmt::Debug + Send + Sync + 'static,
	{
		self.inner.downcast_ref()
	}

	/// Returns the inner error
	#[must_use]
	pub fn as_anyhow(&self) -> &anyhow::Error {
		&self.inner
	}
}

impl From<anyhow::Error> for Error {
	fn from(err: anyhow::Error) -> Self {
		Self { inner: Arc::new(err) }
	}
}

impl PartialEq for Error {
	fn eq(&self, other: &Self) -> bool {
		self.ptr_eq(other)
	}
}

impl Eq for Error {}

impl fmt::Debug for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(&*self.inner, f)
	}
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(&*self.inner, f)
	}
}

impl StdError for Error {
	fn source(&self) -> Option<&(dyn StdError + 'static)> {
		(**self.inner).source()
	}
}
