//! Route states and the payload-to-state builder.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::encoding::{encode_query, is_dot_segment};
use crate::error::{ConfigError, StateError};
use crate::payload::{Params, Payload, Query};
use crate::routes::{RouteDefinition, RouteTable};

/// Static per-route data copied into every state.
pub type Props = BTreeMap<String, serde_json::Value>;

/// A fully materialized route: props, validated params and query, and the
/// canonical URL.
///
/// `url` is always `pathname + search`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteState {
	/// Route name.
	pub name: String,
	/// Static props of the route.
	pub props: Props,
	/// Validated path params.
	pub params: Params,
	/// Validated query entries.
	pub query: Query,
	/// `pathname + search`.
	pub url: String,
	/// `""` or `"?k=v&..."`.
	pub search: String,
	/// Encoded path.
	pub pathname: String,
	/// Whether this state is the committed one.
	pub is_active: bool,
}

impl RouteState {
	/// A state for `name` with nothing else set.
	pub fn empty(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Self::default()
		}
	}

	/// Returns whether `other` points at the same URL, ignoring activity.
	pub fn same_location(&self, other: &RouteState) -> bool {
		self.url == other.url
	}
}

impl RouteTable {
	/// Materializes a payload into a state, reporting why it could not.
	///
	/// Param keys the route does not declare are dropped. Query entries
	/// are kept only when declared, non-empty and accepted by their
	/// validator; the rest are dropped silently.
	pub fn try_payload_to_state(&self, payload: &Payload) -> Result<RouteState, StateError> {
		let route = self
			.get(&payload.name)
			.ok_or_else(|| StateError::UnknownRoute(payload.name.clone()))?;

		let params = validate_params(route, payload.params.as_ref())?;
		let query = filter_query(route, payload.query.as_ref());

		Ok(build_state(route, params, query))
	}

	/// Materializes a payload into a state, falling back to `notFound`.
	pub fn payload_to_state(&self, payload: &Payload) -> RouteState {
		self.try_payload_to_state(payload).unwrap_or_else(|err| {
			if matches!(err, StateError::Config(_)) {
				tracing::error!(target: "waypoint::config", error = %err, route = %payload.name, "route misconfigured");
			} else {
				tracing::warn!(error = %err, route = %payload.name, "invalid payload, resolving to notFound");
			}
			self.not_found_state()
		})
	}

	/// The state of the `notFound` route.
	pub fn not_found_state(&self) -> RouteState {
		build_state(self.not_found(), Params::new(), Query::new())
	}

	/// The state of the `internalError` route.
	pub fn internal_error_state(&self) -> RouteState {
		build_state(self.internal_error(), Params::new(), Query::new())
	}
}

fn validate_params(route: &RouteDefinition, given: Option<&Params>) -> Result<Params, StateError> {
	if !route.declares_params() {
		return match given {
			Some(params) if !params.is_empty() => {
				Err(StateError::UnexpectedParams(route.name().to_string()))
			}
			_ => Ok(Params::new()),
		};
	}

	let mut params = Params::new();
	for name in route.path().param_names() {
		let value = given
			.and_then(|params| params.get(name))
			.filter(|value| !value.is_empty())
			.ok_or_else(|| StateError::MissingParam {
				route: route.name().to_string(),
				param: name.to_string(),
			})?;

		let validator = route
			.param_validator(name)
			.ok_or_else(|| ConfigError::MissingValidator {
				route: route.name().to_string(),
				param: name.to_string(),
			})?;

		// Dot segments are collapsed by URL parsing and would not round trip.
		if is_dot_segment(value) || !validator(value.as_str()) {
			return Err(StateError::InvalidParam {
				route: route.name().to_string(),
				param: name.to_string(),
				value: value.clone(),
			});
		}

		params.insert(name.to_string(), value.clone());
	}

	Ok(params)
}

fn filter_query(route: &RouteDefinition, given: Option<&Query>) -> Query {
	let Some(given) = given else {
		return Query::new();
	};

	route
		.query_validators()
		.filter_map(|(key, validator)| {
			let value = given.get(key)?;
			(!value.is_empty() && validator(value.as_str())).then(|| (key.to_string(), value.clone()))
		})
		.collect()
}

fn build_state(route: &RouteDefinition, params: Params, query: Query) -> RouteState {
	// Every placeholder has a value at this point.
	let pathname = route
		.path()
		.reverse(&params)
		.unwrap_or_else(|| route.path().as_str().to_string());

	// Declaration order, not key order.
	let search = encode_query(route.query_validators().filter_map(|(key, _)| {
		query
			.get(key)
			.map(|value| (key, value.as_str()))
	}));

	RouteState {
		name: route.name().to_string(),
		props: route.props().clone(),
		url: format!("{pathname}{search}"),
		params,
		query,
		search,
		pathname,
		is_active: false,
	}
}
