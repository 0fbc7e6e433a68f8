//! Percent-encoding canonicalization.
//!
//! Path segments are decoded leniently: well-formed `%XX` escapes are
//! decoded, anything else (`%2`, `%zz`, a lone `%`) is kept as literal
//! text. Re-encoding always escapes `%`, so an ambiguous input such as
//! `%2` comes back out as `%252` and re-parses to the same value.

use std::borrow::Cow;

use url::form_urlencoded;

/// Decodes one path segment.
///
/// Falls back to the raw segment when the decoded bytes are not UTF-8.
pub fn decode_segment(segment: &str) -> String {
	match urlencoding::decode_binary(segment.as_bytes()) {
		Cow::Borrowed(_) => segment.to_string(),
		Cow::Owned(bytes) => String::from_utf8(bytes).unwrap_or_else(|_| {
			tracing::debug!(segment, "path segment is not UTF-8 after decoding, keeping it raw");
			segment.to_string()
		}),
	}
}

/// Encodes one path segment (everything except `A-Z a-z 0-9 - _ . ~`).
pub fn encode_segment(segment: &str) -> String {
	urlencoding::encode(segment).into_owned()
}

/// Whether a param value would be collapsed as a `.` or `..` path segment.
pub fn is_dot_segment(value: &str) -> bool {
	matches!(value, "." | "..")
}

/// Splits a pathname into decoded segments.
///
/// A trailing slash is ignored (except for the root path), so `/a/b/` and
/// `/a/b` produce the same segments. The root path yields one empty segment.
pub fn decode_path(pathname: &str) -> Vec<String> {
	split_path(pathname).map(decode_segment).collect()
}

/// Splits a path into raw segments, ignoring the leading and any trailing
/// slash.
pub(crate) fn split_path(path: &str) -> impl Iterator<Item = &str> {
	let trimmed = match path.strip_suffix('/') {
		Some(rest) if !rest.is_empty() => rest,
		_ => path,
	};
	let trimmed = trimmed.strip_prefix('/').unwrap_or(trimmed);
	trimmed.split('/')
}

/// Parses an `application/x-www-form-urlencoded` query string.
///
/// The first occurrence of a key wins and empty values are skipped.
pub fn parse_query(query: &str) -> Vec<(String, String)> {
	let mut pairs: Vec<(String, String)> = Vec::new();
	for (key, value) in form_urlencoded::parse(query.as_bytes()) {
		if value.is_empty() || pairs.iter().any(|(seen, _)| *seen == key) {
			continue;
		}
		pairs.push((key.into_owned(), value.into_owned()));
	}
	pairs
}

/// Serializes query pairs, returning `""` or `"?k=v&..."`.
pub fn encode_query<'a, I>(pairs: I) -> String
where
	I: IntoIterator<Item = (&'a str, &'a str)>,
{
	let mut serializer = form_urlencoded::Serializer::new(String::new());
	let mut empty = true;
	for (key, value) in pairs {
		serializer.append_pair(key, value);
		empty = false;
	}
	if empty {
		String::new()
	} else {
		format!("?{}", serializer.finish())
	}
}
