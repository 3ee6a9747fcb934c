// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Behavior switches of the translation service.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::locale::DEFAULT_LOCALE;

/// What a lookup yields when no translation matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotFoundPolicy {
	/// Return the lookup key unchanged.
	#[default]
	ReturnKey,
	/// Return the last dot-separated segment of the key.
	ReturnLastPartOfKey,
	/// Return an empty string.
	ReturnEmptyString,
	/// Fail with [`crate::I18nError::NotFound`].
	ThrowError,
}

impl NotFoundPolicy {
	/// Fallback text for `key`, or `None` when the lookup has to fail.
	pub fn fallback(&self, key: &str) -> Option<String> {
		match self {
			NotFoundPolicy::ReturnKey => Some(key.to_string()),
			NotFoundPolicy::ReturnLastPartOfKey => {
				Some(key.rsplit('.').next().unwrap_or(key).to_string())
			}
			NotFoundPolicy::ReturnEmptyString => Some(String::new()),
			NotFoundPolicy::ThrowError => None,
		}
	}
}

impl fmt::Display for NotFoundPolicy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			NotFoundPolicy::ReturnKey => write!(f, "return_key"),
			NotFoundPolicy::ReturnLastPartOfKey => write!(f, "return_last_part_of_key"),
			NotFoundPolicy::ReturnEmptyString => write!(f, "return_empty_string"),
			NotFoundPolicy::ThrowError => write!(f, "throw_error"),
		}
	}
}

impl FromStr for NotFoundPolicy {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"return_key" => Ok(NotFoundPolicy::ReturnKey),
			"return_last_part_of_key" => Ok(NotFoundPolicy::ReturnLastPartOfKey),
			"return_empty_string" => Ok(NotFoundPolicy::ReturnEmptyString),
			"throw_error" => Ok(NotFoundPolicy::ThrowError),
			_ => Err(format!("unknown not-found policy '{s}'")),
		}
	}
}

/// Which lookup results are kept in the per-language cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheBehavior {
	/// Cache only keys that resolved to a translation.
	#[default]
	CacheResolved,
	/// Cache every result, including not-found fallbacks.
	CacheAll,
	/// Never cache.
	NoCache,
}

impl CacheBehavior {
	pub fn is_enabled(&self) -> bool {
		!matches!(self, CacheBehavior::NoCache)
	}

	pub(crate) fn should_cache(&self, resolved: bool) -> bool {
		match self {
			CacheBehavior::CacheResolved => resolved,
			CacheBehavior::CacheAll => true,
			CacheBehavior::NoCache => false,
		}
	}
}

impl fmt::Display for CacheBehavior {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			CacheBehavior::CacheResolved => write!(f, "cache_resolved"),
			CacheBehavior::CacheAll => write!(f, "cache_all"),
			CacheBehavior::NoCache => write!(f, "no_cache"),
		}
	}
}

impl FromStr for CacheBehavior {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"cache_resolved" => Ok(CacheBehavior::CacheResolved),
			"cache_all" => Ok(CacheBehavior::CacheAll),
			"no_cache" => Ok(CacheBehavior::NoCache),
			_ => Err(format!("unknown cache behavior '{s}'")),
		}
	}
}

/// Options of an [`crate::I18nService`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct I18nOptions {
	/// Language that is active right after construction.
	pub default_language: String,
	pub not_found: NotFoundPolicy,
	pub cache_behavior: CacheBehavior,
	/// Retry shorter context suffixes when the full key is unknown.
	pub dismantle_context: bool,
}

impl Default for I18nOptions {
	fn default() -> Self {
		Self {
			default_language: DEFAULT_LOCALE.to_string(),
			not_found: NotFoundPolicy::default(),
			cache_behavior: CacheBehavior::default(),
			dismantle_context: true,
		}
	}
}
