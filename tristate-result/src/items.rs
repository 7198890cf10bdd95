//! Containers of items

// Imports
use {
	core::hash::BuildHasher,
	std::{
		collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap, HashSet, LinkedList, VecDeque},
		rc::Rc,
		sync::Arc,
	},
};

/// Data that is a container of items.
///
/// Enables the container predicates of a [`DataResult`](crate::DataResult),
/// such as [`is_empty`](crate::DataResult::is_empty) and
/// [`has_many_items`](crate::DataResult::has_many_items).
pub trait Items {
	/// Returns the number of items in this container
	fn item_count(&self) -> usize;
}

#[duplicate::duplicate_item(
	Ty;
	[ Vec<T> ];
	[ VecDeque<T> ];
	[ LinkedList<T> ];
	[ BTreeSet<T> ];
	[ BinaryHeap<T> ];
	[ [T] ];
)]
impl<T> Items for Ty {
	fn item_count(&self) -> usize {
		self.len()
	}
}

impl<T, const N: usize> Items for [T; N] {
	fn item_count(&self) -> usize {
		N
	}
}

impl<K, V> Items for BTreeMap<K, V> {
	fn item_count(&self) -> usize {
		self.len()
	}
}

impl<K, V, S: BuildHasher> Items for HashMap<K, V, S> {
	fn item_count(&self) -> usize {
		self.len()
	}
}

impl<T, S: BuildHasher> Items for HashSet<T, S> {
	fn item_count(&self) -> usize {
		self.len()
	}
}

#[duplicate::duplicate_item(
	Ptr;
	[ &'_ C ];
	[ Box<C> ];
	[ Rc<C> ];
	[ Arc<C> ];
)]
impl<C: Items + ?Sized> Items for Ptr {
	fn item_count(&self) -> usize {
		(**self).item_count()
	}
}
