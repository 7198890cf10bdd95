//! Result observation for `tristate`
//!
//! An [`Observer`] holds an ordered list of [`Subscription`]s and dispatches
//! each incoming [`DataResult`](tristate_result::DataResult) to the ones
//! that apply to it.

// Modules
mod error;
mod ext;
mod handler;
mod observer;
mod subscription;

// Exports
pub use self::{
	error::ObserveError,
	ext::DataResultObserveExt,
	handler::HandlerOutput,
	observer::Observer,
	subscription::{DataFilter, Subscription},
};
