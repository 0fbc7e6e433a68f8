//! Route table, URL matching and state building for waypoint.
//!
//! A [`RouteTable`] converts between three representations of a location:
//!
//! - a URL string, as found in the address bar,
//! - a [`Payload`], the caller-facing navigation intent (route name, params,
//!   query, history mode),
//! - a [`RouteState`], the fully validated route with props and canonical URL.
//!
//! Conversions never fail outward: bad input resolves to the `notFound`
//! route and is logged. The `try_*` variants return the underlying error.
//!
//! ## Example
//!
//! ```
//! use waypoint_urls::{INTERNAL_ERROR, NOT_FOUND, Payload, RouteDefinition, RouteTable};
//!
//! let table = RouteTable::builder()
//! 	.route(RouteDefinition::new("home", "/"))
//! 	.route(RouteDefinition::new("user", "/users/:id").param("id", |v| !v.is_empty()))
//! 	.route(RouteDefinition::new(NOT_FOUND, "/404"))
//! 	.route(RouteDefinition::new(INTERNAL_ERROR, "/500"))
//! 	.build()
//! 	.unwrap();
//!
//! let payload = table.url_to_payload("/users/ada");
//! assert_eq!(payload, Payload::new("user").with_param("id", "ada"));
//!
//! let state = table.payload_to_state(&payload);
//! assert_eq!(state.url, "/users/ada");
//! ```

pub mod encoding;
pub mod error;
pub mod lifecycle;
pub mod matcher;
pub mod payload;
pub mod routes;
pub mod state;

pub use error::{ConfigError, MatchError, StateError};
pub use lifecycle::{EnterAction, HookFuture, LeaveAction, LifecycleContext, NavigationReason};
pub use matcher::DEFAULT_BASE_URL;
pub use payload::{Params, Payload, Query};
pub use routes::{
	INTERNAL_ERROR, NOT_FOUND, PathTemplate, RouteDefinition, RouteTable, RouteTableBuilder,
	Segment, Validator,
};
pub use state::{Props, RouteState};
