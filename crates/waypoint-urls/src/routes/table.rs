//! Route table and its validating builder.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use super::definition::RouteDefinition;
use crate::error::ConfigError;

/// Name of the fallback route for unmatched URLs and invalid payloads.
pub const NOT_FOUND: &str = "notFound";

/// Name of the fallback route for failed hooks and loaders.
pub const INTERNAL_ERROR: &str = "internalError";

/// An immutable, validated set of routes.
///
/// Routes keep their declaration order, which decides precedence between
/// dynamic routes during matching.
#[derive(Debug)]
pub struct RouteTable {
	routes: Vec<RouteDefinition>,
	by_name: HashMap<String, usize>,
	not_found: usize,
	internal_error: usize,
}

impl RouteTable {
	/// Starts building a table.
	pub fn builder() -> RouteTableBuilder {
		RouteTableBuilder::default()
	}

	/// Looks up a route by name.
	pub fn get(&self, name: &str) -> Option<&RouteDefinition> {
		self.by_name.get(name).map(|&index| &self.routes[index])
	}

	/// Returns whether a route with this name exists.
	pub fn contains(&self, name: &str) -> bool {
		self.by_name.contains_key(name)
	}

	/// Routes in declaration order.
	pub fn iter(&self) -> impl Iterator<Item = &RouteDefinition> {
		self.routes.iter()
	}

	/// Number of routes, reserved ones included.
	pub fn len(&self) -> usize {
		self.routes.len()
	}

	/// Always false for a built table; the reserved routes are present.
	pub fn is_empty(&self) -> bool {
		self.routes.is_empty()
	}

	/// The `notFound` route.
	pub fn not_found(&self) -> &RouteDefinition {
		&self.routes[self.not_found]
	}

	/// The `internalError` route.
	pub fn internal_error(&self) -> &RouteDefinition {
		&self.routes[self.internal_error]
	}
}

/// Collects route definitions and validates them on [`build`](Self::build).
#[derive(Debug, Default)]
pub struct RouteTableBuilder {
	routes: Vec<RouteDefinition>,
}

impl RouteTableBuilder {
	/// Appends a route.
	pub fn route(mut self, route: RouteDefinition) -> Self {
		self.routes.push(route);
		self
	}

	/// Appends several routes.
	pub fn routes(mut self, routes: impl IntoIterator<Item = RouteDefinition>) -> Self {
		self.routes.extend(routes);
		self
	}

	/// Validates the routes and freezes them into a table.
	pub fn build(self) -> Result<RouteTable, ConfigError> {
		let mut by_name = HashMap::with_capacity(self.routes.len());

		for (index, route) in self.routes.iter().enumerate() {
			validate_route(route)?;
			match by_name.entry(route.name().to_string()) {
				Entry::Occupied(_) => return Err(ConfigError::DuplicateRoute(route.name().to_string())),
				Entry::Vacant(slot) => {
					slot.insert(index);
				}
			}
		}

		let not_found = reserved_index(&self.routes, &by_name, NOT_FOUND)?;
		let internal_error = reserved_index(&self.routes, &by_name, INTERNAL_ERROR)?;

		tracing::debug!(routes = self.routes.len(), "route table built");

		Ok(RouteTable {
			routes: self.routes,
			by_name,
			not_found,
			internal_error,
		})
	}
}

fn validate_route(route: &RouteDefinition) -> Result<(), ConfigError> {
	let path = route.path().as_str();
	if !path.starts_with('/') {
		return Err(ConfigError::InvalidPath {
			route: route.name().to_string(),
			path: path.to_string(),
		});
	}

	if let Some(param) = route
		.param_names()
		.find(|param| !route.path().has_param(param))
	{
		return Err(ConfigError::UnknownParam {
			route: route.name().to_string(),
			param: param.to_string(),
		});
	}

	for param in route.path().param_names() {
		if route.param_validator(param).is_none() {
			tracing::warn!(
				target: "waypoint::config",
				route = route.name(),
				param,
				"placeholder has no validator; matching this route will fail"
			);
		}
	}

	Ok(())
}

fn reserved_index(
	routes: &[RouteDefinition],
	by_name: &HashMap<String, usize>,
	name: &'static str,
) -> Result<usize, ConfigError> {
	let index = *by_name
		.get(name)
		.ok_or(ConfigError::MissingReservedRoute(name))?;
	let route = &routes[index];

	let declared = if route.declares_params() {
		Some("params")
	} else if route.declares_query() {
		Some("query")
	} else if route.has_before_enter() {
		Some("beforeEnter")
	} else if route.has_before_leave() {
		Some("beforeLeave")
	} else {
		None
	};

	match declared {
		Some(what) => Err(ConfigError::ReservedRouteDeclares {
			route: name.to_string(),
			what,
		}),
		None => Ok(index),
	}
}
