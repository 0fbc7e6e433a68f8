//! Error types for route configuration, URL matching and state building.
//!
//! None of these reach the caller of the lenient entry points
//! ([`RouteTable::url_to_payload`](crate::RouteTable::url_to_payload),
//! [`RouteTable::payload_to_state`](crate::RouteTable::payload_to_state)):
//! those log the error and fall back to the `notFound` route. The `try_*`
//! variants expose them for callers that want to inspect the failure.

use thiserror::Error;

/// Route table defects. These are developer errors, not bad user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConfigError {
	/// One of the two reserved fallback routes is not declared.
	#[error("reserved route '{0}' must be declared")]
	MissingReservedRoute(&'static str),

	/// A reserved route declares params, query validators or hooks.
	#[error("reserved route '{route}' may not declare {what}")]
	ReservedRouteDeclares {
		/// Reserved route name.
		route: String,
		/// What was declared (`params`, `query`, `beforeEnter`, `beforeLeave`).
		what: &'static str,
	},

	/// Two routes share a name.
	#[error("duplicate route name: {0}")]
	DuplicateRoute(String),

	/// The path template does not start with `/`.
	#[error("route '{route}' has invalid path '{path}': paths must start with '/'")]
	InvalidPath {
		/// Route name.
		route: String,
		/// Offending path template.
		path: String,
	},

	/// A validator is declared for a param with no `:placeholder` in the path.
	#[error("route '{route}' declares a validator for '{param}' but its path has no ':{param}'")]
	UnknownParam {
		/// Route name.
		route: String,
		/// Param name.
		param: String,
	},

	/// A `:placeholder` has no validator; detected at match time.
	#[error("route '{route}' has placeholder ':{param}' without a validator")]
	MissingValidator {
		/// Route name.
		route: String,
		/// Param name.
		param: String,
	},
}

/// Reasons a URL could not be resolved to a route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MatchError {
	/// The input could not be parsed as a URL.
	#[error("invalid URL '{url}': {source}")]
	InvalidUrl {
		/// Raw input.
		url: String,
		/// Parser error.
		#[source]
		source: url::ParseError,
	},

	/// No route accepts the pathname.
	#[error("no route matches '{0}'")]
	NoMatch(String),

	/// A candidate route is misconfigured.
	#[error(transparent)]
	Config(#[from] ConfigError),
}

impl MatchError {
	/// Returns whether this failure is a configuration defect.
	pub fn is_config(&self) -> bool {
		matches!(self, Self::Config(_))
	}
}

/// Reasons a payload could not be materialized into a state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum StateError {
	/// No route carries the payload's name.
	#[error("unknown route: {0}")]
	UnknownRoute(String),

	/// A required param is absent or empty.
	#[error("route '{route}' requires param '{param}'")]
	MissingParam {
		/// Route name.
		route: String,
		/// Param name.
		param: String,
	},

	/// Params were passed to a route that declares none.
	#[error("route '{0}' does not accept params")]
	UnexpectedParams(String),

	/// A param value was rejected by its validator.
	#[error("route '{route}' rejected value '{value}' for param '{param}'")]
	InvalidParam {
		/// Route name.
		route: String,
		/// Param name.
		param: String,
		/// Rejected value.
		value: String,
	},

	/// The route is misconfigured.
	#[error(transparent)]
	Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_config_error_display() {
		let err = ConfigError::MissingValidator {
			route: "user".to_string(),
			param: "id".to_string(),
		};

		assert_eq!(
			err.to_string(),
			"route 'user' has placeholder ':id' without a validator"
		);
	}

	#[rstest]
	fn test_match_error_config_passthrough() {
		let err = MatchError::from(ConfigError::DuplicateRoute("home".to_string()));

		assert!(err.is_config());
		assert_eq!(err.to_string(), "duplicate route name: home");
	}

	#[rstest]
	fn test_state_error_display() {
		let err = StateError::InvalidParam {
			route: "dynamic".to_string(),
			param: "id".to_string(),
			value: "ab".to_string(),
		};

		assert!(err.to_string().contains("'ab'"));
		assert!(err.to_string().contains("'id'"));
	}
}
