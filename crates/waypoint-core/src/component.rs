//! Opaque component handles.
//!
//! The navigation engine never renders anything. A route's loader resolves
//! to whatever the rendering layer considers a component, and the engine
//! only caches and hands back that value. Use [`Rc::downcast`] or
//! `downcast_ref` on the handle to recover the concrete type.

use std::any::Any;
use std::rc::Rc;

/// A type-erased, cheaply clonable component reference.
pub type Component = Rc<dyn Any>;

/// Wraps a concrete value into a [`Component`] handle.
pub fn component<T: 'static>(value: T) -> Component {
	Rc::new(value)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[derive(Debug, PartialEq)]
	struct Page(&'static str);

	#[rstest]
	fn test_component_downcast() {
		let handle = component(Page("home"));

		assert_eq!(handle.downcast_ref::<Page>(), Some(&Page("home")));
		assert!(handle.downcast_ref::<String>().is_none());
	}
}
