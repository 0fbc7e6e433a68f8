//! URL-to-payload matching.
//!
//! Static routes are tried first, then dynamic routes in declaration
//! order. A dynamic route matches when it has the same number of
//! segments, every literal equals its decoded segment and every
//! placeholder value is non-empty, not `.` or `..`, and accepted by its
//! validator.

use url::Url;

use crate::encoding::{decode_path, is_dot_segment, parse_query};
use crate::error::{ConfigError, MatchError};
use crate::payload::{Params, Payload, Query};
use crate::routes::{NOT_FOUND, RouteDefinition, RouteTable, Segment};

/// Base URL relative inputs are resolved against.
pub const DEFAULT_BASE_URL: &str = "http://localhost";

impl RouteTable {
	/// Resolves `url` (absolute or relative to `base`) to a payload.
	pub fn try_url_to_payload(&self, url: &str, base: &str) -> Result<Payload, MatchError> {
		let parsed = Url::parse(base)
			.and_then(|base| base.join(url))
			.map_err(|source| MatchError::InvalidUrl {
				url: url.to_string(),
				source,
			})?;

		let segments = decode_path(parsed.path());
		let query = parse_query(parsed.query().unwrap_or_default());

		let statics = self.iter().filter(|route| route.path().is_static());
		for route in statics {
			if literals_match(route, &segments) {
				return Ok(to_payload(route, Params::new(), &query));
			}
		}

		let dynamics = self.iter().filter(|route| !route.path().is_static());
		for route in dynamics {
			if let Some(params) = match_dynamic(route, &segments)? {
				return Ok(to_payload(route, params, &query));
			}
		}

		Err(MatchError::NoMatch(parsed.path().to_string()))
	}

	/// Resolves `url` against [`DEFAULT_BASE_URL`], falling back to `notFound`.
	pub fn url_to_payload(&self, url: &str) -> Payload {
		self.url_to_payload_with_base(url, DEFAULT_BASE_URL)
	}

	/// Resolves `url` against `base`, falling back to `notFound`.
	pub fn url_to_payload_with_base(&self, url: &str, base: &str) -> Payload {
		match self.try_url_to_payload(url, base) {
			Ok(payload) => payload,
			Err(err) => {
				match &err {
					MatchError::Config(_) => {
						tracing::error!(target: "waypoint::config", error = %err, url, "route misconfigured")
					}
					MatchError::InvalidUrl { .. } => {
						tracing::warn!(error = %err, url, "unparseable URL, resolving to notFound")
					}
					_ => tracing::debug!(url, "no route matched, resolving to notFound"),
				}
				Payload::new(NOT_FOUND)
			}
		}
	}
}

fn literals_match(route: &RouteDefinition, segments: &[String]) -> bool {
	let template = route.path().segments();
	template.len() == segments.len()
		&& template.iter().zip(segments).all(|(expected, actual)| match expected {
			Segment::Literal(literal) => literal == actual,
			Segment::Param(_) => false,
		})
}

fn match_dynamic(route: &RouteDefinition, segments: &[String]) -> Result<Option<Params>, MatchError> {
	let template = route.path().segments();
	if template.len() != segments.len() {
		return Ok(None);
	}

	let mut captured = Vec::new();
	for (expected, actual) in template.iter().zip(segments) {
		match expected {
			Segment::Literal(literal) if literal != actual => return Ok(None),
			Segment::Literal(_) => {}
			Segment::Param(_) if actual.is_empty() || is_dot_segment(actual) => return Ok(None),
			Segment::Param(name) => captured.push((name, actual)),
		}
	}

	let mut params = Params::new();
	for (name, value) in captured {
		let validator = route
			.param_validator(name)
			.ok_or_else(|| ConfigError::MissingValidator {
				route: route.name().to_string(),
				param: name.clone(),
			})?;
		if !validator(value.as_str()) {
			return Ok(None);
		}
		params.insert(name.clone(), value.clone());
	}

	Ok(Some(params))
}

fn to_payload(route: &RouteDefinition, params: Params, query: &[(String, String)]) -> Payload {
	let query = route.declares_query().then(|| {
		query
			.iter()
			.filter(|(key, value)| route.query_validator(key).is_some_and(|accepts| accepts(value.as_str())))
			.cloned()
			.collect::<Query>()
	});

	Payload {
		name: route.name().to_string(),
		params: route.declares_params().then_some(params),
		query,
		replace: false,
	}
}
