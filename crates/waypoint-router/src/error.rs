//! Router error types.

use thiserror::Error;

/// Raised instead of following an `EnterAction::Redirect` in
/// [`NavigationMode::Server`](crate::NavigationMode::Server).
///
/// Nothing was committed. A request handler turns this into a protocol
/// level redirect to `url`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("redirect to {url}")]
pub struct RedirectSignal {
	/// Canonical URL of the redirect target.
	pub url: String,
}

/// Router options could not be parsed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OptionsError {
	/// The TOML document is malformed or has wrongly typed fields.
	#[error("invalid router options: {0}")]
	Toml(#[from] toml::de::Error),
}

/// A history backend rejected a write.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum HistoryError {
	/// The platform history API is not reachable (no window, sandboxed frame).
	#[error("history API unavailable: {0}")]
	Unavailable(String),

	/// The platform refused the entry.
	#[error("history write rejected: {0}")]
	Rejected(String),
}
