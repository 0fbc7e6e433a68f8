//! Non-reactive adapter for server rendering and tests.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::adapter::{ObservableCell, ReactivityAdapter};
use super::effect::Disposer;

/// Shared cell with no change tracking.
pub struct PlainCell<T>(Rc<RefCell<T>>);

impl<T> Clone for PlainCell<T> {
	fn clone(&self) -> Self {
		Self(Rc::clone(&self.0))
	}
}

impl<T: fmt::Debug> fmt::Debug for PlainCell<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("PlainCell").field(&*self.0.borrow()).finish()
	}
}

impl<T: 'static> ObservableCell<T> for PlainCell<T> {
	fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
		f(&self.0.borrow())
	}

	fn update(&self, f: impl FnOnce(&mut T)) {
		f(&mut self.0.borrow_mut());
	}

	fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.0, &other.0)
	}
}

/// Adapter that performs no reactivity: batches run inline and autoruns
/// run exactly once.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainAdapter;

impl ReactivityAdapter for PlainAdapter {
	type Cell<T: 'static> = PlainCell<T>;

	fn batch<R>(&self, f: impl FnOnce() -> R) -> R {
		f()
	}

	fn autorun(&self, mut f: impl FnMut() + 'static) -> Disposer {
		f();
		Disposer::noop()
	}

	fn make_observable<T: 'static>(&self, value: T) -> Self::Cell<T> {
		PlainCell(Rc::new(RefCell::new(value)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::cell::Cell;

	#[rstest]
	fn test_plain_autorun_runs_once() {
		let adapter = PlainAdapter;
		let cell = adapter.make_observable(1);
		let runs = Rc::new(Cell::new(0));

		let _disposer = {
			let runs = Rc::clone(&runs);
			adapter.autorun(move || runs.set(runs.get() + 1))
		};
		cell.set(2);

		assert_eq!(runs.get(), 1);
		assert_eq!(cell.get(), 2);
	}

	#[rstest]
	fn test_plain_replace_object_keeps_identity() {
		let adapter = PlainAdapter;
		let cell = adapter.make_observable(vec![1, 2]);
		let held = cell.clone();

		adapter.replace_object(&cell, vec![3]);

		assert!(held.ptr_eq(&cell));
		assert_eq!(held.get(), vec![3]);
	}
}
