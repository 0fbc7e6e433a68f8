//! Navigation engine and history synchronization for waypoint.
//!
//! [`Router`] drives navigations between the routes of a
//! [`RouteTable`](waypoint_urls::RouteTable): it runs `beforeLeave` and
//! `beforeEnter` hooks, follows or signals redirects, falls back to
//! `notFound`/`internalError`, commits route states through a
//! [`ReactivityAdapter`](waypoint_core::ReactivityAdapter) and keeps a
//! [`HistoryBackend`] in step.
//!
//! ## Modes
//!
//! - [`NavigationMode::Interactive`]: redirects are followed in place and a
//!   chain of them commits once.
//! - [`NavigationMode::Server`]: a redirect aborts the navigation with a
//!   [`RedirectSignal`] for the request handler to answer.

mod builder;
mod engine;
pub mod error;
pub mod history;
pub mod options;
pub mod spawn;
mod sync;

pub use builder::RouterBuilder;
pub use engine::{GlobalArguments, InitOptions, Router, StateMap};
pub use error::{HistoryError, OptionsError, RedirectSignal};
#[cfg(target_arch = "wasm32")]
pub use history::BrowserHistory;
pub use history::{HistoryBackend, HistoryListener, ListenerId, MemoryHistory, default_history};
pub use options::{NavigationMode, RouterOptions};
pub use spawn::{Spawner, default_spawner};
