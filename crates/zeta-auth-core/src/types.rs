// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shared auth value types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The deployment scope a right is valid in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuntimeContext {
	/// A named workspace.
	Workspace { name: String },
	/// A deployed application version.
	Application { name: String, version: String },
}

impl RuntimeContext {
	pub fn workspace(name: impl Into<String>) -> Self {
		RuntimeContext::Workspace { name: name.into() }
	}

	pub fn application(name: impl Into<String>, version: impl Into<String>) -> Self {
		RuntimeContext::Application {
			name: name.into(),
			version: version.into(),
		}
	}

	pub fn name(&self) -> &str {
		match self {
			RuntimeContext::Workspace { name } | RuntimeContext::Application { name, .. } => name,
		}
	}
}

impl fmt::Display for RuntimeContext {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			RuntimeContext::Workspace { name } => write!(f, "{name}"),
			RuntimeContext::Application { name, version } => write!(f, "{name} {version}"),
		}
	}
}

/// Authentication state of the console.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthState {
	#[default]
	Unauthenticated,
	Authenticated,
}

impl AuthState {
	pub fn is_authenticated(&self) -> bool {
		matches!(self, AuthState::Authenticated)
	}
}

impl fmt::Display for AuthState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			AuthState::Unauthenticated => write!(f, "unauthenticated"),
			AuthState::Authenticated => write!(f, "authenticated"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_runtime_context_display() {
		assert_eq!(RuntimeContext::workspace("default").to_string(), "default");
		assert_eq!(
			RuntimeContext::application("Base", "1.0.3").to_string(),
			"Base 1.0.3"
		);
		assert_eq!(RuntimeContext::application("Base", "1.0.3").name(), "Base");
	}

	#[test]
	fn test_runtime_context_serde() {
		let json = serde_json::to_value(RuntimeContext::application("Base", "1.0")).unwrap();
		assert_eq!(
			json,
			serde_json::json!({ "type": "application", "name": "Base", "version": "1.0" })
		);
		let parsed: RuntimeContext =
			serde_json::from_value(serde_json::json!({ "type": "workspace", "name": "ws" }))
				.unwrap();
		assert_eq!(parsed, RuntimeContext::workspace("ws"));
	}

	#[test]
	fn test_auth_state_default_is_unauthenticated() {
		assert_eq!(AuthState::default(), AuthState::Unauthenticated);
		assert!(!AuthState::default().is_authenticated());
		assert!(AuthState::Authenticated.is_authenticated());
	}
}
