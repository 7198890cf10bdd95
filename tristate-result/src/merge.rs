//! Merging results
//!
//! Combines independent results into a single one.
//!
//! ## Priority
//! - If any side has an error, it wins. For [`merge`], the status becomes
//!   [`Status::Error`] and the error is the first operand's, if any, else the second's.
//! - Otherwise, if every side is [`Status::None`] (or absent), the merged result is
//!   [`DataResult::none`].
//! - Otherwise, the status is the most severe of all sides.
//!
//! The merged data holds every side's raw data, unless no side has data at all.

// Imports
use {
	crate::{DataResult, Error, Status},
	core::{hash::Hash, ops::Add},
	std::collections::HashMap,
};


/// Merges two results into a result of both their data.
///
/// Absent results are treated as [`DataResult::none`].
pub fn merge<A, B>(first: Option<DataResult<A>>, second: Option<DataResult<B>>) -> DataResult<(Option<A>, Option<B>)> {
	let (first_data, first_error, first_status) = self::parts(first);
	let (second_data, second_error, second_status) = self::parts(second);

	let data = (first_data.is_some() || second_data.is_some()).then_some((first_data, second_data));

	// Errors have the highest priority, no matter the status
	if let Some(error) = first_error.or(second_error) {
		return DataResult::new(data, Some(error), Status::Error);
	}

	if first_status == Status::None && second_status == Status::None {
		return DataResult::none();
	}

	DataResult::new(data, None, first_status.max(second_status))
}

/// Merges two results, requiring both to have data.
///
/// Same as [`merge`], but if either side doesn't have data, the merged data
/// is absent. The status and error are unaffected.
pub fn merge_not_null<A, B>(first: Option<DataResult<A>>, second: Option<DataResult<B>>) -> DataResult<(A, B)> {
	let (data, error, status) = self::merge(first, second).into_parts();
	DataResult::new(data.and_then(self::only_with_values), error, status)
}

/// Merges many labeled results into a result of a map of their data.
///
/// The error is the first error found, in iteration order. Each label maps
/// to that entry's data, even if it's absent. An empty input results in
/// [`DataResult::none`].
pub fn merge_all<K, V, I>(entries: I) -> DataResult<HashMap<K, Option<V>>>
where
	K: Eq + Hash,
	I: IntoIterator<Item = (K, Option<DataResult<V>>)>,
{
	let mut data = HashMap::new();
	let mut has_data = false;
	let mut error = None;
	let mut status = Status::None;
	for (label, result) in entries {
		let (entry_data, entry_error, entry_status) = self::parts(result);

		has_data |= entry_data.is_some();
		error = error.or(entry_error);
		status = status.max(entry_status);
		data.insert(label, entry_data);
	}

	if status == Status::None {
		return DataResult::none();
	}

	DataResult::new(has_data.then_some(data), error, status)
}

/// Returns both values, if both are present
pub fn only_with_values<A, B>((first, second): (Option<A>, Option<B>)) -> Option<(A, B)> {
	first.zip(second)
}

/// Splits an optional result into it's parts
fn parts<T>(result: Option<DataResult<T>>) -> (Option<T>, Option<Error>, Status) {
	result.map_or((None, None, Status::None), DataResult::into_parts)
}

impl<T> DataResult<T> {
	/// Merges this result with another.
	///
	/// See [`merge`] for details.
	pub fn merge<U>(self, other: DataResult<U>) -> DataResult<(Option<T>, Option<U>)> {
		self::merge(Some(self), Some(other))
	}

	/// Merges this result with another, requiring both to have data.
	///
	/// See [`merge_not_null`] for details.
	pub fn merge_not_null<U>(self, other: DataResult<U>) -> DataResult<(T, U)> {
		self::merge_not_null(Some(self), Some(other))
	}
}

impl<T, U> Add<DataResult<U>> for DataResult<T> {
	type Output = DataResult<(Option<T>, Option<U>)>;

	fn add(self, other: DataResult<U>) -> Self::Output {
		self.merge(other)
	}
}
