// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Session client configuration section.

use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_CSRF_HEADER: &str = "X-CSRF-Token";
pub const DEFAULT_LOGIN_PATH: &str = "login";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Session client configuration (runtime, fully resolved).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthClientConfig {
	/// Server base URL. Session commands are unavailable without it.
	pub base_url: Option<String>,
	pub request_timeout: Duration,
	/// Header carrying the CSRF token, both in responses and requests.
	pub csrf_header: String,
	/// Console login entry point used for re-authentication redirects.
	pub login_path: String,
}

impl Default for AuthClientConfig {
	fn default() -> Self {
		AuthConfigLayer::default().finalize()
	}
}

/// Session client configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct AuthConfigLayer {
	#[serde(default)]
	pub base_url: Option<String>,
	#[serde(default)]
	pub request_timeout_secs: Option<u64>,
	#[serde(default)]
	pub csrf_header: Option<String>,
	#[serde(default)]
	pub login_path: Option<String>,
}

impl AuthConfigLayer {
	pub fn merge(&mut self, other: AuthConfigLayer) {
		if other.base_url.is_some() {
			self.base_url = other.base_url;
		}
		if other.request_timeout_secs.is_some() {
			self.request_timeout_secs = other.request_timeout_secs;
		}
		if other.csrf_header.is_some() {
			self.csrf_header = other.csrf_header;
		}
		if other.login_path.is_some() {
			self.login_path = other.login_path;
		}
	}

	pub fn finalize(self) -> AuthClientConfig {
		AuthClientConfig {
			base_url: self.base_url,
			request_timeout: Duration::from_secs(
				self.request_timeout_secs
					.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
			),
			csrf_header: self
				.csrf_header
				.unwrap_or_else(|| DEFAULT_CSRF_HEADER.to_string()),
			login_path: self
				.login_path
				.unwrap_or_else(|| DEFAULT_LOGIN_PATH.to_string()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let config = AuthConfigLayer::default().finalize();
		assert!(config.base_url.is_none());
		assert_eq!(config.request_timeout, Duration::from_secs(30));
		assert_eq!(config.csrf_header, "X-CSRF-Token");
		assert_eq!(config.login_path, "login");
	}

	#[test]
	fn test_custom_values() {
		let layer = AuthConfigLayer {
			base_url: Some("https://factory.example.com/XynaBlackEdition".to_string()),
			request_timeout_secs: Some(5),
			..Default::default()
		};
		let config = layer.finalize();
		assert_eq!(
			config.base_url.as_deref(),
			Some("https://factory.example.com/XynaBlackEdition")
		);
		assert_eq!(config.request_timeout, Duration::from_secs(5));
	}
}
