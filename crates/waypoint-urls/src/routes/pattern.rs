//! Path templates with `:name` placeholders.
//!
//! Supports patterns like:
//! - `/users` - Static path
//! - `/users/:id` - Single placeholder
//! - `/users/:user_id/posts/:post_id` - Multiple placeholders
//!
//! A placeholder always spans exactly one segment.

use std::fmt;

use crate::encoding::{encode_segment, split_path};
use crate::payload::Params;

/// One `/`-separated piece of a path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
	/// Must equal the decoded URL segment.
	Literal(String),
	/// Accepts any decoded value its validator accepts.
	Param(String),
}

/// A parsed path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
	raw: String,
	segments: Vec<Segment>,
}

impl PathTemplate {
	/// Parses a template such as `/users/:id`.
	pub fn parse(raw: &str) -> Self {
		let segments = split_path(raw)
			.map(|segment| match segment.strip_prefix(':') {
				Some(name) => Segment::Param(name.to_string()),
				None => Segment::Literal(segment.to_string()),
			})
			.collect();

		Self {
			raw: raw.to_string(),
			segments,
		}
	}

	/// Returns the original template string.
	pub fn as_str(&self) -> &str {
		&self.raw
	}

	/// Returns the parsed segments.
	pub fn segments(&self) -> &[Segment] {
		&self.segments
	}

	/// Returns whether the template has no placeholders.
	pub fn is_static(&self) -> bool {
		self.param_names().next().is_none()
	}

	/// Placeholder names in template order.
	pub fn param_names(&self) -> impl Iterator<Item = &str> {
		self.segments.iter().filter_map(|segment| match segment {
			Segment::Param(name) => Some(name.as_str()),
			Segment::Literal(_) => None,
		})
	}

	/// Returns whether the template declares `:name`.
	pub fn has_param(&self, name: &str) -> bool {
		self.param_names().any(|param| param == name)
	}

	/// Builds an encoded pathname, substituting every placeholder.
	///
	/// Returns `None` if a placeholder has no value.
	pub fn reverse(&self, params: &Params) -> Option<String> {
		let mut encoded = Vec::with_capacity(self.segments.len());
		for segment in &self.segments {
			let value = match segment {
				Segment::Literal(literal) => literal.as_str(),
				Segment::Param(name) => params.get(name)?.as_str(),
			};
			encoded.push(encode_segment(value));
		}

		let mut pathname = format!("/{}", encoded.join("/"));
		if self.raw.len() > 1 && self.raw.ends_with('/') {
			pathname.push('/');
		}
		Some(pathname)
	}
}

impl fmt::Display for PathTemplate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.raw)
	}
}
