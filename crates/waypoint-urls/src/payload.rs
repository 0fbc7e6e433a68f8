//! Navigation payloads: the caller-facing navigation intent.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Path params keyed by placeholder name.
pub type Params = BTreeMap<String, String>;

/// Query entries keyed by query key.
pub type Query = BTreeMap<String, String>;

/// A request to navigate to a named route.
///
/// `params` is present iff the target route declares params. `query` is
/// always optional, even when the route declares query validators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
	/// Target route name.
	pub name: String,
	/// Path params.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub params: Option<Params>,
	/// Query entries.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub query: Option<Query>,
	/// Replace the current history entry instead of pushing a new one.
	#[serde(default, skip_serializing_if = "std::ops::Not::not")]
	pub replace: bool,
}

impl Payload {
	/// Creates a payload for `name` with no params or query.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Self::default()
		}
	}

	/// Adds a path param.
	pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.params
			.get_or_insert_with(Params::new)
			.insert(key.into(), value.into());
		self
	}

	/// Adds a query entry.
	pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.query
			.get_or_insert_with(Query::new)
			.insert(key.into(), value.into());
		self
	}

	/// Sets the history write mode.
	pub fn replacing(mut self, replace: bool) -> Self {
		self.replace = replace;
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_payload_builder() {
		let payload = Payload::new("user")
			.with_param("id", "42")
			.with_query("tab", "posts")
			.replacing(true);

		assert_eq!(payload.name, "user");
		assert_eq!(payload.params.unwrap().get("id").map(String::as_str), Some("42"));
		assert_eq!(payload.query.unwrap().get("tab").map(String::as_str), Some("posts"));
		assert!(payload.replace);
	}

	#[rstest]
	fn test_payload_serialization_skips_absent_fields() {
		let json = serde_json::to_string(&Payload::new("home")).unwrap();

		assert_eq!(json, r#"{"name":"home"}"#);
	}

	#[rstest]
	fn test_payload_deserialization_defaults() {
		let payload: Payload = serde_json::from_str(r#"{"name":"user","params":{"id":"7"}}"#).unwrap();

		assert_eq!(payload, Payload::new("user").with_param("id", "7"));
	}
}
