//! Observable - identity-stable reactive cell
//!
//! `Observable<T>` holds a value behind a shared handle. Every clone points
//! at the same storage, so code that captured a handle before a mutation
//! sees the mutated value afterwards; that is what lets the router replace a
//! route's state in place without invalidating subscribers.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::runtime::{NodeId, try_with_runtime, with_runtime};

/// A reactive cell that tracks reads and notifies on writes.
///
/// Reads through [`Observable::with`] or [`Observable::get`] register a
/// dependency for the currently running autorun. Writes through
/// [`Observable::update`] or [`Observable::set`] schedule those autoruns.
pub struct Observable<T: 'static> {
	id: NodeId,
	value: Rc<RefCell<T>>,
}

impl<T: 'static> Observable<T> {
	/// Create a new observable holding `value`.
	pub fn new(value: T) -> Self {
		Self {
			id: NodeId::new(),
			value: Rc::new(RefCell::new(value)),
		}
	}

	/// Borrow the value, tracking the read.
	pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
		with_runtime(|rt| rt.track_dependency(self.id));
		self.with_untracked(f)
	}

	/// Borrow the value without creating a dependency.
	pub fn with_untracked<R>(&self, f: impl FnOnce(&T) -> R) -> R {
		f(&self.value.borrow())
	}

	/// Clone the value out, tracking the read.
	pub fn get(&self) -> T
	where
		T: Clone,
	{
		self.with(T::clone)
	}

	/// Mutate the value in place and notify subscribers.
	pub fn update(&self, f: impl FnOnce(&mut T)) {
		f(&mut self.value.borrow_mut());
		with_runtime(|rt| rt.notify_change(self.id));
	}

	/// Replace the value and notify subscribers.
	pub fn set(&self, value: T) {
		self.update(|slot| *slot = value);
	}

	/// Returns whether both handles point at the same storage.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.value, &other.value)
	}

	/// Get the NodeId of this observable
	pub fn id(&self) -> NodeId {
		self.id
	}
}

impl<T: 'static> Clone for Observable<T> {
	fn clone(&self) -> Self {
		Self {
			id: self.id,
			value: Rc::clone(&self.value),
		}
	}
}

impl<T: 'static> Drop for Observable<T> {
	fn drop(&mut self) {
		// Only the last handle owns the graph node.
		if Rc::strong_count(&self.value) == 1 {
			let _ = try_with_runtime(|rt| rt.remove_node(self.id));
		}
	}
}

impl<T: fmt::Debug + 'static> fmt::Debug for Observable<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Observable")
			.field("id", &self.id)
			.field("value", &*self.value.borrow())
			.finish()
	}
}

/// Runs `f` with notifications deferred until the outermost batch ends.
///
/// Each subscriber re-runs at most once per flush, no matter how many of
/// its dependencies changed inside the batch.
pub fn batch<R>(f: impl FnOnce() -> R) -> R {
	struct BatchGuard;

	impl Drop for BatchGuard {
		fn drop(&mut self) {
			let _ = try_with_runtime(|rt| rt.end_batch());
		}
	}

	with_runtime(|rt| rt.begin_batch());
	let _guard = BatchGuard;
	f()
}
