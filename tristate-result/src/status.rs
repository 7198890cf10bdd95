//! Result status

/// Status of a [`DataResult`](crate::DataResult).
///
/// Statuses are ordered by severity, which is the priority used when
/// merging results: `None < Success < Loading < Error`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, derive_more::Display)]
pub enum Status {
	/// Nothing was requested yet
	#[default]
	#[display("NONE")]
	None,

	/// Finished successfully
	#[display("SUCCESS")]
	Success,

	/// Still loading
	#[display("LOADING")]
	Loading,

	/// Failed
	#[display("ERROR")]
	Error,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn severity_order() {
		assert!(Status::None < Status::Success);
		assert!(Status::Success < Status::Loading);
		assert!(Status::Loading < Status::Error);
		assert_eq!(Status::Success.max(Status::Loading), Status::Loading);
	}

	#[test]
	fn display() {
		assert_eq!(Status::Loading.to_string(), "LOADING");
		assert_eq!(Status::default(), Status::None);
	}
}
