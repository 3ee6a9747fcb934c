// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for right-string parsing.

use thiserror::Error;

/// Why a right string did not produce a start order matcher.
#[derive(Debug, Error)]
pub enum RightParseError {
	/// The right does not belong to the start order namespace.
	#[error("not a start order right: {0}")]
	NotStartOrderRight(String),

	/// Fewer fields than `<namespace>:<orderTypeExpr>:<scope>`.
	#[error("start order right has too few fields: {0}")]
	TooFewFields(String),

	/// The workspace / application part is empty or has too many fields.
	#[error("malformed scope in start order right: {0}")]
	MalformedScope(String),

	/// The order type expression uses none of the supported syntaxes.
	#[error("unsupported order type expression '{0}'")]
	UnsupportedExpression(String),

	/// A `/pattern/` expression is not a valid regular expression.
	#[error("invalid order type pattern '{pattern}': {source}")]
	InvalidPattern {
		pattern: String,
		#[source]
		source: regex::Error,
	},
}
