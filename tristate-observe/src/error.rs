//! Observation faults

// Imports
use tristate_result::Error;

/// Observation fault
#[derive(Debug, thiserror::Error)]
pub enum ObserveError {
	/// A handler failed and no error handler was registered
	#[error("Handler failed with no error handler registered, please add an error handler")]
	Unhandled {
		/// Failure
		#[source]
		cause: Error,
	},

	/// An error handler failed
	#[error("Error handler failed while handling a failure: {handler_error}")]
	ErrorHandlerFailed {
		/// Failure being handled
		#[source]
		cause: Error,

		/// Failure of the error handler
		handler_error: Error,
	},

	/// A transform failed
	#[error("Transform failed")]
	Transform {
		/// Failure
		#[source]
		source: Error,
	},
}

impl ObserveError {
	/// Returns the failure that caused this fault
	#[must_use]
	pub const fn cause(&self) -> &Error {
		match self {
			Self::Unhandled { cause } | Self::ErrorHandlerFailed { cause, .. } => cause,
			Self::Transform { source } => source,
		}
	}
}
