// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Login and password-change requests.
//!
//! Passwords are held in [`Password`], which never shows up in `Debug` or
//! `Display` output and is zeroized on drop. The cleartext only leaves the
//! type when a request body is serialized for the wire.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// The redaction placeholder used in all output.
pub const REDACTED: &str = "[REDACTED]";

/// A password that prevents accidental exposure.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct Password {
	inner: String,
}

impl Password {
	pub fn new(password: impl Into<String>) -> Self {
		Self {
			inner: password.into(),
		}
	}

	/// Explicitly access the cleartext.
	pub fn expose(&self) -> &str {
		&self.inner
	}

	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}
}

impl Clone for Password {
	fn clone(&self) -> Self {
		Self::new(self.inner.clone())
	}
}

impl fmt::Debug for Password {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Password").field(&REDACTED).finish()
	}
}

impl fmt::Display for Password {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl PartialEq for Password {
	fn eq(&self, other: &Self) -> bool {
		self.inner == other.inner
	}
}

impl Eq for Password {}

impl From<String> for Password {
	fn from(value: String) -> Self {
		Self::new(value)
	}
}

impl From<&str> for Password {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}

/// Username/password login (`POST auth/login`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRequest {
	pub username: String,
	pub password: Password,
	/// Take over an existing session of the same user.
	pub force: bool,
	/// Console path the login was started from.
	pub path: Option<String>,
}

impl LoginRequest {
	pub fn new(username: impl Into<String>, password: impl Into<Password>) -> Self {
		Self {
			username: username.into(),
			password: password.into(),
			force: false,
			path: None,
		}
	}

	pub fn path(mut self, path: impl Into<String>) -> Self {
		self.path = Some(path.into());
		self
	}

	/// The same request with `force` set, used after
	/// [`AuthError::SessionExists`](crate::AuthError::SessionExists).
	pub fn forced(mut self) -> Self {
		self.force = true;
		self
	}

	pub(crate) fn payload(&self) -> LoginPayload<'_> {
		LoginPayload {
			username: &self.username,
			password: self.password.expose(),
			force: self.force,
			path: self.path.as_deref(),
		}
	}
}

/// Smart card / external user login (`POST auth/externalUserLogin`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalLoginRequest {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub domain: Option<String>,
	pub force: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub path: Option<String>,
}

impl ExternalLoginRequest {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn domain(mut self, domain: impl Into<String>) -> Self {
		self.domain = Some(domain.into());
		self
	}

	pub fn path(mut self, path: impl Into<String>) -> Self {
		self.path = Some(path.into());
		self
	}

	pub fn forced(mut self) -> Self {
		self.force = true;
		self
	}
}

/// Join a session shared by another console (`POST auth/sharedlogin`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedLoginRequest {
	pub username: String,
	pub session_id: String,
	pub force: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub path: Option<String>,
}

impl SharedLoginRequest {
	pub fn new(username: impl Into<String>, session_id: impl Into<String>) -> Self {
		Self {
			username: username.into(),
			session_id: session_id.into(),
			force: false,
			path: None,
		}
	}

	pub fn path(mut self, path: impl Into<String>) -> Self {
		self.path = Some(path.into());
		self
	}

	pub fn forced(mut self) -> Self {
		self.force = true;
		self
	}
}

/// Password change for the current user (`POST auth/changepassword`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangePasswordRequest {
	pub username: String,
	pub old_password: Password,
	pub new_password: Password,
}

impl ChangePasswordRequest {
	pub fn new(
		username: impl Into<String>,
		old_password: impl Into<Password>,
		new_password: impl Into<Password>,
	) -> Self {
		Self {
			username: username.into(),
			old_password: old_password.into(),
			new_password: new_password.into(),
		}
	}

	pub(crate) fn payload(&self) -> ChangePasswordPayload<'_> {
		ChangePasswordPayload {
			username: &self.username,
			old_password: self.old_password.expose(),
			new_password: self.new_password.expose(),
		}
	}
}

/// What the server offers for external user login
/// (`GET auth/externalUserLoginInformation`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExternalUserLoginInformation {
	pub username: Option<String>,
	pub domains: Vec<String>,
}

#[derive(Serialize)]
pub(crate) struct LoginPayload<'a> {
	username: &'a str,
	password: &'a str,
	force: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	path: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ChangePasswordPayload<'a> {
	username: &'a str,
	old_password: &'a str,
	new_password: &'a str,
}
