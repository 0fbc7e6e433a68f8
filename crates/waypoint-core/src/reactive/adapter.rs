//! The reactivity capability set consumed by the navigation engine.

use std::fmt;
use std::rc::Rc;

use super::effect::{Disposer, autorun};
use super::observable::{Observable, batch};
use crate::component::Component;

/// An adapter-managed container with stable identity.
///
/// Every clone refers to the same storage; mutating through one clone is
/// visible through all of them.
pub trait ObservableCell<T: 'static>: Clone + 'static {
	/// Borrow the value. Reactive adapters track this read.
	fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R;

	/// Mutate the value in place. Reactive adapters notify subscribers.
	fn update(&self, f: impl FnOnce(&mut T));

	/// Returns whether both handles refer to the same storage.
	fn ptr_eq(&self, other: &Self) -> bool;

	/// Clone the value out.
	fn get(&self) -> T
	where
		T: Clone,
	{
		self.with(T::clone)
	}

	/// Overwrite the value.
	fn set(&self, value: T) {
		self.update(|slot| *slot = value);
	}
}

/// Capability set a reactive ecosystem supplies to the router.
///
/// The router only ever talks to this trait: it creates its state through
/// [`make_observable`](Self::make_observable), mutates it inside
/// [`batch`](Self::batch) and overwrites route entries through
/// [`replace_object`](Self::replace_object) so existing handles stay valid.
pub trait ReactivityAdapter: 'static {
	/// The observable container type this adapter hands out.
	type Cell<T: 'static>: ObservableCell<T>;

	/// Execute `f`, coalescing the notifications it triggers into one.
	fn batch<R>(&self, f: impl FnOnce() -> R) -> R;

	/// Re-run `f` whenever its reactive dependencies change.
	fn autorun(&self, f: impl FnMut() + 'static) -> Disposer;

	/// Wrap a plain value so mutations are trackable.
	fn make_observable<T: 'static>(&self, value: T) -> Self::Cell<T>;

	/// Overwrite `target` with `source` in place, preserving identity.
	fn replace_object<T: 'static>(&self, target: &Self::Cell<T>, source: T) {
		target.update(|slot| *slot = source);
	}

	/// Wrap a component so it re-renders on dependency change.
	///
	/// Adapters without a component model return it unchanged.
	fn observer(&self, component: Component) -> Component {
		component
	}
}

impl<T: 'static> ObservableCell<T> for Observable<T> {
	fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
		Observable::with(self, f)
	}

	fn update(&self, f: impl FnOnce(&mut T)) {
		Observable::update(self, f);
	}

	fn ptr_eq(&self, other: &Self) -> bool {
		Observable::ptr_eq(self, other)
	}
}

type ObserverFn = Rc<dyn Fn(Component) -> Component>;

/// Adapter backed by the thread-local signal runtime.
#[derive(Clone, Default)]
pub struct SignalAdapter {
	observer: Option<ObserverFn>,
}

impl SignalAdapter {
	/// Creates an adapter that leaves components untouched.
	pub fn new() -> Self {
		Self::default()
	}

	/// Installs the rendering layer's component wrapper.
	pub fn with_observer<F>(mut self, observer: F) -> Self
	where
		F: Fn(Component) -> Component + 'static,
	{
		self.observer = Some(Rc::new(observer));
		self
	}
}

impl fmt::Debug for SignalAdapter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SignalAdapter")
			.field("has_observer", &self.observer.is_some())
			.finish()
	}
}

impl ReactivityAdapter for SignalAdapter {
	type Cell<T: 'static> = Observable<T>;

	fn batch<R>(&self, f: impl FnOnce() -> R) -> R {
		batch(f)
	}

	fn autorun(&self, f: impl FnMut() + 'static) -> Disposer {
		autorun(f)
	}

	fn make_observable<T: 'static>(&self, value: T) -> Self::Cell<T> {
		Observable::new(value)
	}

	fn replace_object<T: 'static>(&self, target: &Self::Cell<T>, source: T) {
		target.set(source);
	}

	fn observer(&self, component: Component) -> Component {
		match &self.observer {
			Some(wrap) => wrap(component),
			None => component,
		}
	}
}
