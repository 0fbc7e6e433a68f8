//! The navigation engine.
//!
//! A navigation moves through these steps:
//!
//! 1. Build the target state from the payload and read the active state.
//! 2. Stop if both have the same URL; no hook runs.
//! 3. Classify the change as `new_config`, `new_params` or `new_query`.
//! 4. Run `beforeLeave` on the active route. `Prevent` ends the navigation
//!    with the active URL.
//! 5. Run `beforeEnter` on the target route. `Redirect` starts over from
//!    step 1 with the new payload (interactive mode) or returns a
//!    [`RedirectSignal`] (server mode).
//! 6. Load the target component on first entry, then commit: update the
//!    route's entry in place, deactivate every other entry and write one
//!    history entry.
//!
//! A failing hook or loader commits `internalError` instead, without
//! touching history.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use waypoint_core::{ObservableCell, ReactivityAdapter, SignalAdapter};
use waypoint_urls::{
	EnterAction, INTERNAL_ERROR, LeaveAction, LifecycleContext, Payload, RouteState, RouteTable,
};

use crate::builder::RouterBuilder;
use crate::error::RedirectSignal;
use crate::history::{HistoryBackend, ListenerId};
use crate::options::{NavigationMode, RouterOptions};
use crate::spawn::Spawner;

/// Route states keyed by route name, one identity-stable cell per visited
/// route.
pub type StateMap<A> = BTreeMap<String, <A as ReactivityAdapter>::Cell<RouteState>>;

/// Options for [`Router::init`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InitOptions {
	/// Commit the initial route without running its hooks.
	pub skip_lifecycle: bool,
}

/// Everything a rendering layer needs besides the state itself.
pub struct GlobalArguments<'a, A> {
	/// The route table.
	pub routes: &'a RouteTable,
	/// The reactivity adapter.
	pub adapter: &'a A,
	/// The router options.
	pub options: &'a RouterOptions,
}

pub(crate) struct RouterInner<A: ReactivityAdapter> {
	pub(crate) routes: Rc<RouteTable>,
	pub(crate) adapter: A,
	pub(crate) options: RouterOptions,
	pub(crate) history: Rc<dyn HistoryBackend>,
	pub(crate) spawner: Spawner,
	pub(crate) state: A::Cell<StateMap<A>>,
	pub(crate) is_redirecting: A::Cell<bool>,
	pub(crate) sync: RefCell<Option<ListenerId>>,
}

impl<A: ReactivityAdapter> Drop for RouterInner<A> {
	fn drop(&mut self) {
		if let Some(id) = self.sync.get_mut().take() {
			self.history.unsubscribe(id);
		}
	}
}

/// The navigation engine.
///
/// Cheap to clone; clones share state. The state map and the
/// `is_redirecting` flag are created through the adapter and only mutated
/// inside [`ReactivityAdapter::batch`].
///
/// Overlapping navigations are not serialized: each runs its own hook
/// chain and the last one to commit wins.
///
/// # Example
///
/// ```
/// use waypoint_core::SignalAdapter;
/// use waypoint_router::{InitOptions, MemoryHistory, Router};
/// use waypoint_urls::{INTERNAL_ERROR, NOT_FOUND, Payload, RouteDefinition, RouteTable};
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let routes = RouteTable::builder()
/// 	.route(RouteDefinition::new("home", "/"))
/// 	.route(RouteDefinition::new("user", "/users/:id").param("id", |v| !v.is_empty()))
/// 	.route(RouteDefinition::new(NOT_FOUND, "/error404"))
/// 	.route(RouteDefinition::new(INTERNAL_ERROR, "/error500"))
/// 	.build()
/// 	.unwrap();
/// let history = MemoryHistory::new("/");
/// let router = Router::builder(routes, SignalAdapter::new())
/// 	.history(history.clone())
/// 	.build();
///
/// router.init("/", InitOptions::default()).await.unwrap();
/// let url = router
/// 	.redirect(Payload::new("user").with_param("id", "ada"))
/// 	.await
/// 	.unwrap();
///
/// assert_eq!(url, "/users/ada");
/// assert_eq!(router.active_state().unwrap().name, "user");
/// assert_eq!(history.entries(), vec!["/", "/users/ada"]);
/// # });
/// ```
pub struct Router<A: ReactivityAdapter = SignalAdapter> {
	pub(crate) inner: Rc<RouterInner<A>>,
}

impl<A: ReactivityAdapter> Clone for Router<A> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<A: ReactivityAdapter> fmt::Debug for Router<A> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Router")
			.field("routes", &self.inner.routes.len())
			.field("options", &self.inner.options)
			.field("history_synced", &self.is_history_synced())
			.finish()
	}
}

impl<A: ReactivityAdapter> Router<A> {
	/// Starts configuring a router.
	pub fn builder(routes: impl Into<Rc<RouteTable>>, adapter: A) -> RouterBuilder<A> {
		RouterBuilder::new(routes.into(), adapter)
	}

	/// Creates a router with default options, history and spawner.
	pub fn new(routes: impl Into<Rc<RouteTable>>, adapter: A) -> Self {
		Self::builder(routes, adapter).build()
	}

	/// Resolves a URL against the configured base, falling back to `notFound`.
	pub fn url_to_payload(&self, url: &str) -> Payload {
		self.inner
			.routes
			.url_to_payload_with_base(url, &self.inner.options.base_url)
	}

	/// Materializes a payload, falling back to `notFound`.
	pub fn payload_to_state(&self, payload: &Payload) -> RouteState {
		self.inner.routes.payload_to_state(payload)
	}

	/// A snapshot of the committed state, if any navigation has committed.
	pub fn active_state(&self) -> Option<RouteState> {
		self.inner.state.with(|entries| {
			entries
				.values()
				.find_map(|entry| entry.with(|state| state.is_active.then(|| state.clone())))
		})
	}

	/// Whether a navigation's hook chain is running.
	pub fn is_redirecting(&self) -> bool {
		self.inner.is_redirecting.get()
	}

	/// The adapter-managed map of visited routes.
	pub fn state(&self) -> A::Cell<StateMap<A>> {
		self.inner.state.clone()
	}

	/// The entry of a visited route. The same cell is returned on every
	/// call and is updated in place by later visits.
	pub fn state_of(&self, name: &str) -> Option<A::Cell<RouteState>> {
		self.inner.state.with(|entries| entries.get(name).cloned())
	}

	/// The route table.
	pub fn routes(&self) -> &RouteTable {
		&self.inner.routes
	}

	/// The router options.
	pub fn options(&self) -> &RouterOptions {
		&self.inner.options
	}

	/// The reactivity adapter.
	pub fn adapter(&self) -> &A {
		&self.inner.adapter
	}

	/// The history backend.
	pub fn history(&self) -> &dyn HistoryBackend {
		self.inner.history.as_ref()
	}

	/// Route table, adapter and options in one bundle.
	pub fn global_arguments(&self) -> GlobalArguments<'_, A> {
		GlobalArguments {
			routes: &self.inner.routes,
			adapter: &self.inner.adapter,
			options: &self.inner.options,
		}
	}

	/// Performs the first navigation of the session.
	///
	/// The URL is resolved and committed with `replace` semantics, so the
	/// entry the page was loaded with is overwritten rather than pushed.
	pub async fn init(&self, url: &str, options: InitOptions) -> Result<String, RedirectSignal> {
		let payload = self.url_to_payload(url).replacing(true);
		if options.skip_lifecycle {
			let next = self.payload_to_state(&payload);
			tracing::debug!(url, route = %next.name, "initial navigation without lifecycle");
			return Ok(self.enter(next, true).await);
		}
		self.redirect(payload).await
	}

	/// [`init`](Self::init) with the history backend's current URL, which is
	/// the address the page was loaded with.
	pub async fn init_from_history(&self, options: InitOptions) -> Result<String, RedirectSignal> {
		let url = self.inner.history.current_url();
		self.init(&url, options).await
	}

	/// Navigates to a payload and returns the resulting URL.
	///
	/// The URL is the committed one, the unchanged active one after a
	/// no-op or prevent, or the `internalError` one after a failure.
	///
	/// # Errors
	///
	/// Only in [`NavigationMode::Server`], when a `beforeEnter` hook
	/// redirects. Nothing is committed in that case.
	pub async fn redirect(&self, payload: Payload) -> Result<String, RedirectSignal> {
		self.set_redirecting(true);
		let outcome = self.navigate(payload).await;
		self.set_redirecting(false);
		outcome
	}

	/// Navigates to a URL. Shorthand for resolving it and calling
	/// [`redirect`](Self::redirect).
	pub async fn redirect_url(&self, url: &str) -> Result<String, RedirectSignal> {
		self.redirect(self.url_to_payload(url)).await
	}

	async fn navigate(&self, mut payload: Payload) -> Result<String, RedirectSignal> {
		let routes = Rc::clone(&self.inner.routes);
		let mut replace = payload.replace;
		let mut hops = 0;

		loop {
			let next = routes.payload_to_state(&payload);
			let current = self.active_state();

			if let Some(current) = &current
				&& current.url == next.url
			{
				tracing::debug!(url = %current.url, "target already active");
				return Ok(current.url.clone());
			}

			let ctx = LifecycleContext::new(current.clone(), next.clone());
			tracing::debug!(
				from = ?current.as_ref().map(|state| &state.name),
				to = %next.name,
				reason = %ctx.reason,
				"navigating"
			);

			if let Some(current) = &current {
				let leave = match routes.get(&current.name) {
					Some(route) => route.run_before_leave(ctx.clone()).await,
					None => Ok(LeaveAction::Proceed),
				};
				match leave {
					Ok(LeaveAction::Proceed) => {}
					Ok(LeaveAction::Prevent) => {
						tracing::debug!(route = %current.name, "navigation prevented");
						return Ok(current.url.clone());
					}
					Err(err) => return Ok(self.fail(err).await),
				}
			}

			let enter = match routes.get(&next.name) {
				Some(route) => route.run_before_enter(ctx).await,
				None => Ok(EnterAction::Proceed),
			};
			let target = match enter {
				Ok(EnterAction::Proceed) => return Ok(self.enter(next, replace).await),
				Ok(EnterAction::Redirect(target)) => target,
				Err(err) => return Ok(self.fail(err).await),
			};

			if self.inner.options.mode == NavigationMode::Server {
				let url = routes.payload_to_state(&target).url;
				tracing::debug!(from = %next.name, url = %url, "redirect signalled");
				return Err(RedirectSignal { url });
			}

			hops += 1;
			if hops > self.inner.options.max_redirects {
				let err = anyhow::anyhow!(
					"redirect chain from '{}' exceeded {} hops",
					next.name,
					self.inner.options.max_redirects
				);
				return Ok(self.fail(err).await);
			}

			tracing::debug!(from = %next.name, to = %target.name, hop = hops, "redirecting");
			replace |= target.replace;
			payload = target;
		}
	}

	/// Loads the component of `next` and commits it.
	async fn enter(&self, next: RouteState, replace: bool) -> String {
		match self.load_component(&next.name).await {
			Ok(()) => self.commit(next, replace),
			Err(err) => self.fail(err).await,
		}
	}

	/// Commits `internalError` after a hook or loader failure.
	async fn fail(&self, err: anyhow::Error) -> String {
		tracing::error!("navigation failed, resolving to internalError: {err:#}");
		let state = self.inner.routes.internal_error_state();
		if let Err(err) = self.load_component(INTERNAL_ERROR).await {
			tracing::error!("internalError component failed to load: {err:#}");
		}
		self.commit(state, true)
	}

	async fn load_component(&self, name: &str) -> anyhow::Result<()> {
		let Some(route) = self.inner.routes.get(name) else {
			return Ok(());
		};
		if let Some(loading) = route.load_component() {
			let component = loading.await?;
			route.cache_component(self.inner.adapter.observer(component));
			tracing::debug!(route = name, "component loaded");
		}
		Ok(())
	}

	fn commit(&self, mut next: RouteState, replace: bool) -> String {
		let inner = &self.inner;
		next.is_active = true;
		let name = next.name.clone();
		let url = next.url.clone();

		inner.adapter.batch(|| {
			match inner.state.with(|entries| entries.get(&name).cloned()) {
				Some(entry) => inner.adapter.replace_object(&entry, next),
				None => {
					let entry = inner.adapter.make_observable(next);
					inner.state.update(|entries| {
						entries.insert(name.clone(), entry);
					});
				}
			}

			inner.state.with(|entries| {
				for (key, entry) in entries {
					if *key != name && entry.with(|state| state.is_active) {
						entry.update(|state| state.is_active = false);
					}
				}
			});

			if inner.is_redirecting.get() {
				inner.is_redirecting.set(false);
			}
		});

		if name == INTERNAL_ERROR {
			tracing::debug!(url = %url, "internalError committed without a history entry");
		} else {
			let written = if replace {
				inner.history.replace(&url)
			} else {
				inner.history.push(&url)
			};
			if let Err(err) = written {
				tracing::warn!(error = %err, url = %url, "history write failed");
			}
		}

		tracing::debug!(route = %name, url = %url, replace, "navigation committed");
		url
	}

	fn set_redirecting(&self, value: bool) {
		let flag = &self.inner.is_redirecting;
		if flag.get() != value {
			self.inner.adapter.batch(|| flag.set(value));
		}
	}
}
