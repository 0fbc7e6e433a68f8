//! History backends.
//!
//! The router writes one entry per committed navigation and listens for
//! back/forward movement through a [`HistoryBackend`]. Writes never fire
//! listeners; only traversal does, mirroring `pushState` and `popstate`.

#[cfg(target_arch = "wasm32")]
mod browser;
mod memory;

use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserHistory;
pub use memory::MemoryHistory;

use crate::error::HistoryError;

/// Callback fired with the new URL after a back/forward traversal.
pub type HistoryListener = Rc<dyn Fn(String)>;

/// Handle returned by [`HistoryBackend::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub(crate) u64);

/// A session history the router can write to and observe.
pub trait HistoryBackend {
	/// The URL of the current entry (path, query and fragment).
	fn current_url(&self) -> String;

	/// Adds an entry after the current one, dropping any forward entries.
	fn push(&self, url: &str) -> Result<(), HistoryError>;

	/// Overwrites the current entry.
	fn replace(&self, url: &str) -> Result<(), HistoryError>;

	/// Registers a traversal listener.
	fn subscribe(&self, listener: HistoryListener) -> ListenerId;

	/// Removes a listener. Returns whether it was registered.
	fn unsubscribe(&self, id: ListenerId) -> bool;
}

/// The platform default: the browser history on wasm, an in-memory stack
/// elsewhere.
pub fn default_history() -> Rc<dyn HistoryBackend> {
	#[cfg(target_arch = "wasm32")]
	{
		match BrowserHistory::new() {
			Ok(history) => return Rc::new(history),
			Err(err) => {
				tracing::warn!(error = %err, "browser history unavailable, using in-memory history")
			}
		}
	}
	Rc::new(MemoryHistory::new("/"))
}
