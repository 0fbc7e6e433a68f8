//! Router options.
//!
//! Options can be built in code or read from TOML:
//!
//! ```toml
//! mode = "server"
//! max_redirects = 8
//! base_url = "https://example.com"
//! ```
//!
//! Every field is optional.

use serde::{Deserialize, Serialize};
use waypoint_urls::DEFAULT_BASE_URL;

use crate::error::OptionsError;

/// How `EnterAction::Redirect` is handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationMode {
	/// Follow redirects in place; the chain commits once.
	#[default]
	Interactive,
	/// Abort with a [`RedirectSignal`](crate::RedirectSignal) carrying the target URL.
	Server,
}

/// Router configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterOptions {
	/// Redirect handling.
	pub mode: NavigationMode,
	/// Longest redirect chain followed before giving up with `internalError`.
	pub max_redirects: usize,
	/// Base relative URLs are resolved against.
	pub base_url: String,
}

impl Default for RouterOptions {
	fn default() -> Self {
		Self {
			mode: NavigationMode::Interactive,
			max_redirects: 16,
			base_url: DEFAULT_BASE_URL.to_string(),
		}
	}
}

impl RouterOptions {
	/// Options for a request handler.
	pub fn server() -> Self {
		Self {
			mode: NavigationMode::Server,
			..Self::default()
		}
	}

	/// Parses options from a TOML document.
	pub fn from_toml_str(source: &str) -> Result<Self, OptionsError> {
		Ok(toml::from_str(source)?)
	}

	/// Sets the redirect handling mode.
	pub fn with_mode(mut self, mode: NavigationMode) -> Self {
		self.mode = mode;
		self
	}

	/// Sets the redirect chain limit.
	pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
		self.max_redirects = max_redirects;
		self
	}

	/// Sets the base URL.
	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = base_url.into();
		self
	}
}
