//! Latest-value sources and their combinators for `tristate`

// Modules
pub mod chain;
pub mod combine;
pub mod derived;
pub mod exec;
pub mod response;
pub mod source;

// Exports
pub use self::{
	chain::{chain_not_null_with, chain_not_null_with_transform, chain_with, chain_with_transform},
	combine::{combine, combine_not_null, combine_not_null_with, combine_with},
	derived::Derived,
	exec::{Blocking, Executor, Inline},
	response::{FailMode, ResultTransform, chain_results, combine_results, combine_results_not_null},
	source::{Source, SubscriptionHandle, Watcher},
};
