//! Data result

// Imports
use crate::{Error, Items, Status};

/// Data result.
///
/// Holds an optional value, an optional error and a status.
///
/// The value and error are independent: a result may carry both, for
/// example stale data shown while the latest load failed. A [`Status::None`]
/// result conventionally carries neither, but this isn't enforced.
#[derive(Clone, PartialEq, Debug)]
pub struct DataResult<T> {
	/// Data
	pub data: Option<T>,

	/// Error
	pub error: Option<Error>,

	/// Status
	pub status: Status,
}

impl<T> DataResult<T> {
	/// Creates a new result from all of it's parts
	#[must_use]
	pub const fn new(data: Option<T>, error: Option<Error>, status: Status) -> Self {
		Self { data, error, status }
	}

	/// Creates a successful result with `data`
	#[must_use]
	pub const fn success(data: T) -> Self {
		Self::new(Some(data), None, Status::Success)
	}

	/// Creates a loading result, optionally with some data and an error
	#[must_use]
	pub const fn loading(data: Option<T>, error: Option<Error>) -> Self {
		Self::new(data, error, Status::Loading)
	}

	/// Creates an errored result, optionally with some data
	#[must_use]
	pub const fn error(error: Option<Error>, data: Option<T>) -> Self {
		Self::new(data, error, Status::Error)
	}

	/// Creates an empty result, with status [`Status::None`]
	#[must_use]
	pub const fn none() -> Self {
		Self::new(None, None, Status::None)
	}

	/// Returns if this result has data
	#[must_use]
	pub const fn has_data(&self) -> bool {
		self.data.is_some()
	}

	/// Returns if this result has an error
	#[must_use]
	pub const fn has_error(&self) -> bool {
		self.error.is_some()
	}

	/// Returns if the status is [`Status::Success`]
	#[must_use]
	pub fn is_success(&self) -> bool {
		self.status == Status::Success
	}

	/// Returns if the status is [`Status::Loading`]
	#[must_use]
	pub fn is_loading(&self) -> bool {
		self.status == Status::Loading
	}

	/// Returns if the status is [`Status::Error`]
	#[must_use]
	pub fn is_error(&self) -> bool {
		self.status == Status::Error
	}

	/// Returns if the status is [`Status::None`]
	#[must_use]
	pub fn is_none(&self) -> bool {
		self.status == Status::None
	}

	/// Returns this result's data by reference
	#[must_use]
	pub fn as_ref(&self) -> DataResult<&T> {
		DataResult::new(self.data.as_ref(), self.error.clone(), self.status)
	}

	/// Splits this result into it's data, error and status
	#[must_use]
	pub fn into_parts(self) -> (Option<T>, Option<Error>, Status) {
		(self.data, self.error, self.status)
	}

	/// Maps this result's data, keeping the error and status
	pub fn map<U, F>(self, f: F) -> DataResult<U>
	where
		F: FnOnce(T) -> U,
	{
		DataResult::new(self.data.map(f), self.error, self.status)
	}

	/// Maps this result's data with a fallible function.
	///
	/// If the mapping fails, the data is dropped and the error is replaced
	/// with the failure. The status is always kept.
	pub fn try_map<U, E, F>(self, f: F) -> DataResult<U>
	where
		F: FnOnce(T) -> Result<U, E>,
		E: Into<Error>,
	{
		match self.data.map(f) {
			Some(Ok(data)) => DataResult::new(Some(data), self.error, self.status),
			Some(Err(err)) => DataResult::new(None, Some(err.into()), self.status),
			None => DataResult::new(None, self.error, self.status),
		}
	}
}

impl<T: Items> DataResult<T> {
	/// Returns if the data is a container.
	///
	/// Since the data is statically known to be a container,
	/// this is the same as [`Self::has_data`].
	#[must_use]
	pub const fn is_list_type(&self) -> bool {
		self.has_data()
	}

	/// Returns if the data is a container with no items.
	///
	/// Results without data are never empty
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.data.as_ref().is_some_and(|data| data.item_count() == 0)
	}

	/// Returns if the data is a container with at least one item.
	#[must_use]
	pub fn is_not_empty(&self) -> bool {
		self.data.as_ref().is_some_and(|data| data.item_count() > 0)
	}

	/// Returns if the data is a container with exactly one item.
	#[must_use]
	pub fn has_one_item(&self) -> bool {
		self.data.as_ref().is_some_and(|data| data.item_count() == 1)
	}

	/// Returns if the data is a container with more than one item.
	#[must_use]
	pub fn has_many_items(&self) -> bool {
		self.data.as_ref().is_some_and(|data| data.item_count() > 1)
	}
}

impl<T> Default for DataResult<T> {
	fn default() -> Self {
		Self::none()
	}
}

impl<T> From<Result<T, Error>> for DataResult<T> {
	fn from(res: Result<T, Error>) -> Self {
		match res {
			Ok(data) => Self::success(data),
			Err(err) => Self::error(Some(err), None),
		}
	}
}
