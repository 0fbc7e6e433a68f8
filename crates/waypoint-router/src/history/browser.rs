//! `window.history` backend.

use std::cell::{Cell, RefCell};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::{HistoryBackend, HistoryListener, ListenerId};
use crate::error::HistoryError;

type PopStateClosure = Closure<dyn FnMut(web_sys::Event)>;

/// The browser's session history.
///
/// Listeners are attached to the window's `popstate` event and detached on
/// [`unsubscribe`](HistoryBackend::unsubscribe) or drop.
pub struct BrowserHistory {
	window: web_sys::Window,
	listeners: RefCell<Vec<(ListenerId, PopStateClosure)>>,
	next_listener: Cell<u64>,
}

impl BrowserHistory {
	/// Binds to the global window.
	pub fn new() -> Result<Self, HistoryError> {
		let window = web_sys::window()
			.ok_or_else(|| HistoryError::Unavailable("no global window".to_string()))?;
		Ok(Self {
			window,
			listeners: RefCell::new(Vec::new()),
			next_listener: Cell::new(0),
		})
	}

	fn history(&self) -> Result<web_sys::History, HistoryError> {
		self.window
			.history()
			.map_err(|err| HistoryError::Unavailable(format!("{err:?}")))
	}
}

fn location_url(window: &web_sys::Window) -> String {
	let location = window.location();
	let pathname = location.pathname().unwrap_or_else(|_| "/".to_string());
	let search = location.search().unwrap_or_default();
	let hash = location.hash().unwrap_or_default();
	format!("{pathname}{search}{hash}")
}

impl HistoryBackend for BrowserHistory {
	fn current_url(&self) -> String {
		location_url(&self.window)
	}

	fn push(&self, url: &str) -> Result<(), HistoryError> {
		self.history()?
			.push_state_with_url(&JsValue::NULL, "", Some(url))
			.map_err(|err| HistoryError::Rejected(format!("{err:?}")))
	}

	fn replace(&self, url: &str) -> Result<(), HistoryError> {
		self.history()?
			.replace_state_with_url(&JsValue::NULL, "", Some(url))
			.map_err(|err| HistoryError::Rejected(format!("{err:?}")))
	}

	fn subscribe(&self, listener: HistoryListener) -> ListenerId {
		let id = ListenerId(self.next_listener.get());
		self.next_listener.set(id.0 + 1);

		let window = self.window.clone();
		let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
			listener(location_url(&window));
		}) as Box<dyn FnMut(_)>);

		if let Err(err) = self
			.window
			.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
		{
			tracing::error!(error = ?err, "failed to attach popstate listener");
		}

		self.listeners.borrow_mut().push((id, closure));
		id
	}

	fn unsubscribe(&self, id: ListenerId) -> bool {
		let mut listeners = self.listeners.borrow_mut();
		let Some(index) = listeners.iter().position(|(existing, _)| *existing == id) else {
			return false;
		};
		let (_, closure) = listeners.remove(index);
		let _ = self
			.window
			.remove_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
		true
	}
}

impl Drop for BrowserHistory {
	fn drop(&mut self) {
		for (_, closure) in self.listeners.get_mut().drain(..) {
			let _ = self
				.window
				.remove_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
		}
	}
}
