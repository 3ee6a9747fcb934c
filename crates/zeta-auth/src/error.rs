// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the session client.

use thiserror::Error;

/// Result type for session client operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Errors that can occur when using the session client.
#[derive(Debug, Error)]
pub enum AuthError {
	/// Invalid or missing base URL.
	#[error("invalid or missing base URL")]
	InvalidBaseUrl,

	/// The configured CSRF header name is not a valid header name.
	#[error("invalid CSRF header name: {0}")]
	InvalidHeaderName(String),

	/// The server already holds a session for this user. Resubmit the login
	/// with `force` set to take it over.
	#[error("a session already exists for this user")]
	SessionExists,

	/// The server rejected the request as unauthenticated. The session has
	/// been cleared.
	#[error("authentication required")]
	Unauthorized,

	/// The session lacks the rights for this request. The session is kept.
	#[error("insufficient rights for {path}")]
	Forbidden { path: String },

	/// HTTP request failed.
	#[error("HTTP request failed: {0}")]
	RequestFailed(#[from] reqwest::Error),

	/// Server returned an error response.
	#[error("server error (HTTP {status}): {message}")]
	ServerError { status: u16, message: String },

	/// JSON serialization/deserialization error.
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}
