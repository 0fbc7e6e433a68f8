//! # Waypoint
//!
//! A client-side navigation engine for single-page applications.
//!
//! Waypoint keeps a reactive map of route states in step with the browser
//! history. Navigations run `beforeLeave` and `beforeEnter` hooks, follow or
//! signal redirects, load route components lazily and fall back to the
//! `notFound` and `internalError` routes instead of surfacing errors.
//!
//! ## Crates
//!
//! - [`core`]: the reactivity adapter contract, a signal runtime and a plain
//!   adapter for server contexts.
//! - [`urls`]: route tables, URL matching and route state building.
//! - [`router`]: the navigation engine, history backends and history sync.
//!
//! ## Quick Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use waypoint::prelude::*;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let signed_in = Rc::new(Cell::new(false));
//! let guard = Rc::clone(&signed_in);
//!
//! let routes = RouteTable::builder()
//! 	.route(RouteDefinition::new("login", "/login"))
//! 	.route(RouteDefinition::new("account", "/account").before_enter(move |ctx| {
//! 		let action = if guard.get() {
//! 			EnterAction::Proceed
//! 		} else {
//! 			ctx.redirect(Payload::new("login"))
//! 		};
//! 		async move { anyhow::Ok(action) }
//! 	}))
//! 	.route(RouteDefinition::new(NOT_FOUND, "/404"))
//! 	.route(RouteDefinition::new(INTERNAL_ERROR, "/500"))
//! 	.build()
//! 	.unwrap();
//!
//! let router = Router::builder(routes, SignalAdapter::new())
//! 	.history(MemoryHistory::new("/login"))
//! 	.build();
//! router.init("/login", InitOptions::default()).await.unwrap();
//!
//! assert_eq!(router.redirect(Payload::new("account")).await.unwrap(), "/login");
//!
//! signed_in.set(true);
//! assert_eq!(router.redirect(Payload::new("account")).await.unwrap(), "/account");
//! # });
//! ```

pub use waypoint_core as core;
pub use waypoint_router as router;
pub use waypoint_urls as urls;

pub use waypoint_core::{PlainAdapter, ReactivityAdapter, SignalAdapter};
pub use waypoint_router::{
	HistoryBackend, InitOptions, MemoryHistory, NavigationMode, RedirectSignal, Router,
	RouterBuilder, RouterOptions,
};
pub use waypoint_urls::{
	EnterAction, INTERNAL_ERROR, LeaveAction, LifecycleContext, NOT_FOUND, NavigationReason,
	Payload, RouteDefinition, RouteState, RouteTable,
};

pub mod prelude {
	// Reactivity
	pub use crate::core::{Component, ObservableCell, PlainAdapter, ReactivityAdapter, SignalAdapter};

	// Routes
	pub use crate::urls::{
		EnterAction, INTERNAL_ERROR, LeaveAction, LifecycleContext, NOT_FOUND, NavigationReason,
		Payload, RouteDefinition, RouteState, RouteTable,
	};

	// Navigation
	pub use crate::router::{
		HistoryBackend, InitOptions, MemoryHistory, NavigationMode, RedirectSignal, Router,
		RouterOptions,
	};
}
