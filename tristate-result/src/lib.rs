//! Tri-state results for `tristate`
//!
//! A [`DataResult`] is a value that may still be loading, may have failed,
//! may have succeeded, or may not exist yet. It carries an optional value,
//! an optional error and a [`Status`].

// Modules
pub mod data_result;
pub mod error;
pub mod items;
pub mod merge;
pub mod status;

// Exports
pub use self::{
	data_result::DataResult,
	error::Error,
	items::Items,
	merge::{merge, merge_all, merge_not_null, only_with_values},
	status::Status,
};
