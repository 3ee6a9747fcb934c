// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Notifications published by the session client.

use std::fmt;

/// A fire-once session notification.
///
/// Subscribers only see events sent after they subscribed. The current
/// session itself is available through
/// [`SessionClient::subscribe_session`](crate::SessionClient::subscribe_session).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
	/// The installed session was replaced or cleared.
	SessionChanged,
	/// A login variant succeeded.
	Login,
	/// An explicit logout completed.
	Logout,
	/// The user must log in again. `login_target` is the login entry point,
	/// carrying the post-login redirect as a query parameter when known.
	AuthenticationRequired { login_target: String },
	/// The server answered 403 for `path`.
	InsufficientRights { path: String },
}

impl SessionEvent {
	pub fn name(&self) -> &'static str {
		match self {
			SessionEvent::SessionChanged => "session_changed",
			SessionEvent::Login => "login",
			SessionEvent::Logout => "logout",
			SessionEvent::AuthenticationRequired { .. } => "authentication_required",
			SessionEvent::InsufficientRights { .. } => "insufficient_rights",
		}
	}
}

impl fmt::Display for SessionEvent {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SessionEvent::AuthenticationRequired { login_target } => {
				write!(f, "{} ({login_target})", self.name())
			}
			SessionEvent::InsufficientRights { path } => write!(f, "{} ({path})", self.name()),
			_ => f.write_str(self.name()),
		}
	}
}

/// Visibility of the host surface. A hidden to visible transition triggers a
/// session refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Visibility {
	#[default]
	Visible,
	Hidden,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_event_display() {
		assert_eq!(SessionEvent::Login.to_string(), "login");
		assert_eq!(
			SessionEvent::InsufficientRights {
				path: "api/orders".to_string()
			}
			.to_string(),
			"insufficient_rights (api/orders)"
		);
	}

	#[test]
	fn test_visibility_defaults_to_visible() {
		assert_eq!(Visibility::default(), Visibility::Visible);
	}
}
