//! Tri-state results, observation and source combinators

// Exports
pub use {
	tristate_observe::{DataFilter, DataResultObserveExt, HandlerOutput, ObserveError, Observer, Subscription},
	tristate_result::{DataResult, Error, Items, Status, merge, merge_all, merge_not_null, only_with_values},
	tristate_source::{
		Blocking,
		Derived,
		Executor,
		FailMode,
		Inline,
		ResultTransform,
		Source,
		SubscriptionHandle,
		Watcher,
		chain_not_null_with,
		chain_not_null_with_transform,
		chain_results,
		chain_with,
		chain_with_transform,
		combine,
		combine_not_null,
		combine_not_null_with,
		combine_results,
		combine_results_not_null,
		combine_with,
		exec,
	},
};
