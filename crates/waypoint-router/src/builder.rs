//! Router construction.

use std::cell::RefCell;
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use waypoint_core::ReactivityAdapter;
use waypoint_urls::RouteTable;

use crate::engine::{Router, RouterInner, StateMap};
use crate::history::{HistoryBackend, default_history};
use crate::options::RouterOptions;
use crate::spawn::{Spawner, default_spawner};

/// Configures a [`Router`].
pub struct RouterBuilder<A: ReactivityAdapter> {
	routes: Rc<RouteTable>,
	adapter: A,
	options: RouterOptions,
	history: Option<Rc<dyn HistoryBackend>>,
	spawner: Option<Spawner>,
}

impl<A: ReactivityAdapter> RouterBuilder<A> {
	pub(crate) fn new(routes: Rc<RouteTable>, adapter: A) -> Self {
		Self {
			routes,
			adapter,
			options: RouterOptions::default(),
			history: None,
			spawner: None,
		}
	}

	/// Sets the router options.
	pub fn options(mut self, options: RouterOptions) -> Self {
		self.options = options;
		self
	}

	/// Sets the history backend. Defaults to [`default_history`].
	pub fn history(mut self, history: impl HistoryBackend + 'static) -> Self {
		self.history = Some(Rc::new(history));
		self
	}

	/// Sets how back/forward navigations are run. Defaults to
	/// [`default_spawner`].
	pub fn spawner<F>(mut self, spawner: F) -> Self
	where
		F: Fn(LocalBoxFuture<'static, ()>) + 'static,
	{
		self.spawner = Some(Rc::new(spawner));
		self
	}

	/// Creates the router. Its state map starts empty.
	pub fn build(self) -> Router<A> {
		let state = self.adapter.make_observable(StateMap::<A>::new());
		let is_redirecting = self.adapter.make_observable(false);

		Router {
			inner: Rc::new(RouterInner {
				routes: self.routes,
				options: self.options,
				history: self.history.unwrap_or_else(default_history),
				spawner: self.spawner.unwrap_or_else(default_spawner),
				state,
				is_redirecting,
				adapter: self.adapter,
				sync: RefCell::new(None),
			}),
		}
	}
}
