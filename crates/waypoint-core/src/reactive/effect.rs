//! Autorun - reactive side effects
//!
//! An autorun executes immediately, records every [`Observable`] it reads,
//! and executes again whenever one of them changes. Dependencies are
//! recomputed on each run, so conditional reads are handled correctly.
//!
//! [`Observable`]: super::Observable

use std::fmt;

use super::runtime::{NodeId, try_with_runtime, with_runtime};

/// Handle returned by `autorun`; dropping it (or calling
/// [`Disposer::dispose`]) stops the subscription.
#[must_use = "dropping a Disposer immediately cancels the subscription"]
pub struct Disposer {
	dispose: Option<Box<dyn FnOnce()>>,
}

impl Disposer {
	/// Creates a disposer running `f` exactly once.
	pub fn new(f: impl FnOnce() + 'static) -> Self {
		Self {
			dispose: Some(Box::new(f)),
		}
	}

	/// A disposer with nothing to release.
	pub fn noop() -> Self {
		Self { dispose: None }
	}

	/// Cancels the subscription now.
	pub fn dispose(mut self) {
		if let Some(f) = self.dispose.take() {
			f();
		}
	}
}

impl Drop for Disposer {
	fn drop(&mut self) {
		if let Some(f) = self.dispose.take() {
			f();
		}
	}
}

impl fmt::Debug for Disposer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Disposer")
			.field("active", &self.dispose.is_some())
			.finish()
	}
}

/// Runs `f` now and again whenever an observable it read changes.
pub fn autorun(f: impl FnMut() + 'static) -> Disposer {
	let id = NodeId::new();

	with_runtime(|rt| {
		rt.register_effect(id, Box::new(f));
		rt.run_effect(id);
	});

	Disposer::new(move || {
		let _ = try_with_runtime(|rt| rt.remove_node(id));
	})
}
