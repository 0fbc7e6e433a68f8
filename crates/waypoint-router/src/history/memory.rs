//! In-process history stack.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::{HistoryBackend, HistoryListener, ListenerId};
use crate::error::HistoryError;

struct MemoryState {
	entries: Vec<String>,
	cursor: usize,
	listeners: Vec<(ListenerId, HistoryListener)>,
	next_listener: u64,
}

/// A history kept in memory, for tests and non-browser hosts.
///
/// Clones share the same stack.
///
/// # Example
///
/// ```
/// use waypoint_router::{HistoryBackend, MemoryHistory};
///
/// let history = MemoryHistory::new("/");
/// history.push("/a").unwrap();
/// history.push("/b").unwrap();
///
/// assert!(history.back());
/// assert_eq!(history.current_url(), "/a");
/// assert_eq!(history.entries(), vec!["/", "/a", "/b"]);
/// ```
#[derive(Clone)]
pub struct MemoryHistory {
	state: Rc<RefCell<MemoryState>>,
}

impl MemoryHistory {
	/// Creates a history holding a single entry.
	pub fn new(initial_url: impl Into<String>) -> Self {
		Self {
			state: Rc::new(RefCell::new(MemoryState {
				entries: vec![initial_url.into()],
				cursor: 0,
				listeners: Vec::new(),
				next_listener: 0,
			})),
		}
	}

	/// All entries, oldest first.
	pub fn entries(&self) -> Vec<String> {
		self.state.borrow().entries.clone()
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.state.borrow().entries.len()
	}

	/// Always false; a history has at least one entry.
	pub fn is_empty(&self) -> bool {
		self.state.borrow().entries.is_empty()
	}

	/// Index of the current entry.
	pub fn cursor(&self) -> usize {
		self.state.borrow().cursor
	}

	/// Number of registered listeners.
	pub fn listener_count(&self) -> usize {
		self.state.borrow().listeners.len()
	}

	/// Moves one entry back. Returns false at the oldest entry.
	pub fn back(&self) -> bool {
		self.go(-1)
	}

	/// Moves one entry forward. Returns false at the newest entry.
	pub fn forward(&self) -> bool {
		self.go(1)
	}

	/// Moves `delta` entries and notifies listeners.
	///
	/// Out-of-range moves are ignored and return false.
	pub fn go(&self, delta: isize) -> bool {
		let (url, listeners) = {
			let mut state = self.state.borrow_mut();
			let target = match state.cursor.checked_add_signed(delta) {
				Some(target) if delta != 0 && target < state.entries.len() => target,
				_ => return false,
			};
			state.cursor = target;
			let listeners: Vec<HistoryListener> = state
				.listeners
				.iter()
				.map(|(_, listener)| Rc::clone(listener))
				.collect();
			(state.entries[target].clone(), listeners)
		};

		tracing::debug!(url = %url, delta, "history traversal");
		for listener in listeners {
			listener(url.clone());
		}
		true
	}
}

impl HistoryBackend for MemoryHistory {
	fn current_url(&self) -> String {
		let state = self.state.borrow();
		state.entries[state.cursor].clone()
	}

	fn push(&self, url: &str) -> Result<(), HistoryError> {
		let mut state = self.state.borrow_mut();
		let keep = state.cursor + 1;
		state.entries.truncate(keep);
		state.entries.push(url.to_string());
		state.cursor = keep;
		Ok(())
	}

	fn replace(&self, url: &str) -> Result<(), HistoryError> {
		let mut state = self.state.borrow_mut();
		let cursor = state.cursor;
		state.entries[cursor] = url.to_string();
		Ok(())
	}

	fn subscribe(&self, listener: HistoryListener) -> ListenerId {
		let mut state = self.state.borrow_mut();
		let id = ListenerId(state.next_listener);
		state.next_listener += 1;
		state.listeners.push((id, listener));
		id
	}

	fn unsubscribe(&self, id: ListenerId) -> bool {
		let mut state = self.state.borrow_mut();
		let before = state.listeners.len();
		state.listeners.retain(|(existing, _)| *existing != id);
		state.listeners.len() != before
	}
}

impl fmt::Debug for MemoryHistory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let state = self.state.borrow();
		f.debug_struct("MemoryHistory")
			.field("entries", &state.entries)
			.field("cursor", &state.cursor)
			.field("listeners", &state.listeners.len())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::cell::RefCell;

	#[rstest]
	fn test_push_truncates_forward_entries() {
		let history = MemoryHistory::new("/");
		history.push("/a").unwrap();
		history.push("/b").unwrap();
		history.back();
		history.back();

		history.push("/c").unwrap();

		assert_eq!(history.entries(), vec!["/", "/c"]);
		assert_eq!(history.cursor(), 1);
		assert!(!history.forward());
	}

	#[rstest]
	fn test_replace_keeps_length() {
		let history = MemoryHistory::new("/");
		history.push("/a").unwrap();

		history.replace("/b").unwrap();

		assert_eq!(history.entries(), vec!["/", "/b"]);
		assert_eq!(history.current_url(), "/b");
	}

	#[rstest]
	#[case(-1, false)]
	#[case(0, false)]
	#[case(3, false)]
	#[case(1, true)]
	#[case(2, true)]
	fn test_go_bounds(#[case] delta: isize, #[case] moved: bool) {
		let history = MemoryHistory::new("/");
		history.push("/a").unwrap();
		history.push("/b").unwrap();
		history.go(-2);

		assert_eq!(history.go(delta), moved);
	}

	#[rstest]
	fn test_traversal_fires_listeners_but_writes_do_not() {
		let history = MemoryHistory::new("/");
		let seen = Rc::new(RefCell::new(Vec::new()));
		let id = {
			let seen = Rc::clone(&seen);
			history.subscribe(Rc::new(move |url: String| seen.borrow_mut().push(url)))
		};

		history.push("/a").unwrap();
		history.replace("/b").unwrap();
		history.back();
		history.forward();
		assert!(history.unsubscribe(id));
		history.back();

		assert_eq!(*seen.borrow(), vec!["/".to_string(), "/b".to_string()]);
		assert!(!history.unsubscribe(id));
	}

	#[rstest]
	fn test_listener_may_write_during_traversal() {
		let history = MemoryHistory::new("/");
		history.push("/a").unwrap();
		{
			let writer = history.clone();
			history.subscribe(Rc::new(move |url: String| {
				writer.replace(&format!("{url}?seen")).unwrap();
			}));
		}

		history.back();

		assert_eq!(history.entries(), vec!["/?seen", "/a"]);
	}
}
