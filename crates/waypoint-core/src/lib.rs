//! Core building blocks shared by the waypoint crates.
//!
//! This crate owns the reactivity contract the navigation engine is written
//! against, plus two concrete implementations of it:
//!
//! - [`SignalAdapter`]: a fine-grained signal runtime with automatic
//!   dependency tracking, batching and `autorun` subscriptions.
//! - [`PlainAdapter`]: no reactivity at all, for server-side rendering and
//!   other non-interactive contexts.
//!
//! ## Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use waypoint_core::{ObservableCell, ReactivityAdapter, SignalAdapter};
//!
//! let adapter = SignalAdapter::new();
//! let count = adapter.make_observable(0);
//! let runs = Rc::new(Cell::new(0));
//!
//! let _subscription = {
//! 	let count = count.clone();
//! 	let runs = Rc::clone(&runs);
//! 	adapter.autorun(move || {
//! 		count.with(|_| ());
//! 		runs.set(runs.get() + 1);
//! 	})
//! };
//!
//! adapter.batch(|| {
//! 	count.set(1);
//! 	count.set(2);
//! });
//!
//! assert_eq!(count.get(), 2);
//! assert_eq!(runs.get(), 2);
//! ```

pub mod component;
pub mod reactive;

pub use component::Component;
pub use reactive::{
	Disposer, Observable, ObservableCell, PlainAdapter, PlainCell, ReactivityAdapter,
	SignalAdapter,
};
