// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for translation resolution and loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the translation service.
#[derive(Debug, Error)]
pub enum I18nError {
	/// No translation exists and the not-found policy is `ThrowError`.
	#[error("no translation found for key '{key}' in language '{language}'")]
	NotFound { language: String, key: String },

	/// Fetching a translation file over HTTP failed.
	#[error("failed to fetch translations for '{language}': {source}")]
	Fetch {
		language: String,
		#[source]
		source: reqwest::Error,
	},

	/// The translation asset endpoint answered with a non-success status.
	#[error("translation source returned status {status} for '{language}'")]
	SourceStatus { language: String, status: u16 },

	/// Reading a translation file from disk failed.
	#[error("failed to read translation file {path}: {source}")]
	FileRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// A translation file is not valid JSON or has the wrong shape.
	#[error("invalid translation file: {0}")]
	Parse(#[from] serde_json::Error),
}

/// Result type alias for i18n operations.
pub type Result<T> = std::result::Result<T, I18nError>;
