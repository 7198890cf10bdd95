//! Latest-value source
//!
//! A [`Source`] caches the latest value written to it, and notifies
//! any watchers when it changes.
//!
//! A source starts uninitialized, unless created with a value, and becomes
//! initialized on the first write. Watchers only ever see the latest value,
//! so intermediate writes may be skipped if a watcher falls behind.

// Imports
use {
	core::{fmt, mem},
	futures::future::{self, AbortHandle},
	std::sync::Arc,
	tokio::sync::watch,
};

/// Latest-value source
pub struct Source<T> {
	/// Sender
	sender: Arc<watch::Sender<Option<T>>>,
}

impl<T> Source<T> {
	/// Creates a new, uninitialized, source
	#[must_use]
	pub fn new() -> Self {
		let (sender, _) = watch::channel(None);
		Self {
			sender: Arc::new(sender),
		}
	}

	/// Creates a new source initialized with `value`
	#[must_use]
	pub fn with_value(value: T) -> Self {
		let (sender, _) = watch::channel(Some(value));
		Self {
			sender: Arc::new(sender),
		}
	}

	/// Sets the value of this source, notifying all watchers
	pub fn set(&self, value: T) {
		self.sender.send_replace(Some(value));
	}

	/// Returns if this source has a value
	#[must_use]
	pub fn is_initialized(&self) -> bool {
		self.sender.borrow().is_some()
	}

	/// Uses the current value of this source
	pub fn with<F, O>(&self, f: F) -> O
	where
		F: FnOnce(Option<&T>) -> O,
	{
		let value = self.sender.borrow();
		f(value.as_ref())
	}

	/// Returns the current value of this source
	#[must_use]
	pub fn value(&self) -> Option<T>
	where
		T: Clone,
	{
		self.with(|value| value.cloned())
	}

	/// Creates a watcher for this source.
	///
	/// If the source is initialized, the watcher will first yield
	/// the current value.
	#[must_use]
	pub fn watch(&self) -> Watcher<T> {
		Watcher {
			receiver: self.sender.subscribe(),
			replay:   self.is_initialized(),
		}
	}

	/// Calls `on_change` with every value of this source, starting with the current one.
	///
	/// Stops once the returned handle is dropped or unsubscribed.
	/// Must be called within a tokio runtime.
	pub fn on_change<F>(&self, mut on_change: F) -> SubscriptionHandle
	where
		T: Clone + Send + Sync + 'static,
		F: FnMut(T) + Send + 'static,
	{
		let mut watcher = self.watch();
		let (task, handle) = future::abortable(async move {
			while let Some(value) = watcher.next().await {
				on_change(value);
			}
		});
		tokio::spawn(task);

		SubscriptionHandle { handle }
	}
}

impl<T> Default for Source<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> Clone for Source<T> {
	fn clone(&self) -> Self {
		Self {
			sender: Arc::clone(&self.sender),
		}
	}
}

impl<T: fmt::Debug> fmt::Debug for Source<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.with(|value| f.debug_struct("Source").field("value", &value).finish())
	}
}

/// Source watcher.
///
/// Yields the values of a [`Source`] as they change.
pub struct Watcher<T> {
	/// Receiver
	receiver: watch::Receiver<Option<T>>,

	/// Whether to yield the current value before waiting
	replay: bool,
}

impl<T: Clone> Watcher<T> {
	/// Waits for the next value.
	///
	/// Returns `None` once every handle to the source has been dropped.
	pub async fn next(&mut self) -> Option<T> {
		loop {
			if !mem::take(&mut self.replay) {
				self.receiver.changed().await.ok()?;
			}

			let value = self.receiver.borrow_and_update().clone();
			if let Some(value) = value {
				return Some(value);
			}
		}
	}

	/// Returns the latest value of the source, marking it as seen.
	///
	/// The next call to [`Self::next`] will wait for a newer value.
	pub fn take_current(&mut self) -> Option<T> {
		self.replay = false;
		self.receiver.borrow_and_update().clone()
	}

	/// Returns the latest value of the source, without marking it as seen
	#[must_use]
	pub fn current(&self) -> Option<T> {
		self.receiver.borrow().clone()
	}
}

impl<T> fmt::Debug for Watcher<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Watcher").field("replay", &self.replay).finish_non_exhaustive()
	}
}

/// Handle to a subscription created by [`Source::on_change`].
///
/// Unsubscribes when dropped.
#[derive(Debug)]
pub struct SubscriptionHandle {
	/// Abort handle
	handle: AbortHandle,
}

impl SubscriptionHandle {
	/// Unsubscribes
	pub fn unsubscribe(self) {
		drop(self);
	}

	/// Returns if this subscription was stopped
	#[must_use]
	pub fn is_unsubscribed(&self) -> bool {
		self.handle.is_aborted()
	}
}

impl Drop for SubscriptionHandle {
	fn drop(&mut self) {
		self.handle.abort();
	}
}
