// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Translation service configuration section.

use std::path::PathBuf;

use serde::Deserialize;
use zeta_common_i18n::{
	CacheBehavior, I18nOptions, NotFoundPolicy, DEFAULT_ASSET_PATH, DEFAULT_LOCALE,
};

/// Translation configuration (runtime, fully resolved).
#[derive(Debug, Clone, PartialEq)]
pub struct I18nConfig {
	pub default_language: String,
	pub not_found: NotFoundPolicy,
	pub cache_behavior: CacheBehavior,
	pub dismantle_context: bool,
	/// Base URL translation files are fetched from.
	pub source_url: Option<String>,
	pub asset_path: String,
	/// Local directory holding `<language>.json` files.
	pub translations_dir: Option<PathBuf>,
}

impl I18nConfig {
	pub fn options(&self) -> I18nOptions {
		I18nOptions {
			default_language: self.default_language.clone(),
			not_found: self.not_found,
			cache_behavior: self.cache_behavior,
			dismantle_context: self.dismantle_context,
		}
	}
}

impl Default for I18nConfig {
	fn default() -> Self {
		I18nConfigLayer::default().finalize()
	}
}

/// Translation configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct I18nConfigLayer {
	#[serde(default)]
	pub default_language: Option<String>,
	#[serde(default)]
	pub not_found: Option<NotFoundPolicy>,
	#[serde(default)]
	pub cache_behavior: Option<CacheBehavior>,
	#[serde(default)]
	pub dismantle_context: Option<bool>,
	#[serde(default)]
	pub source_url: Option<String>,
	#[serde(default)]
	pub asset_path: Option<String>,
	#[serde(default)]
	pub translations_dir: Option<PathBuf>,
}

impl I18nConfigLayer {
	pub fn merge(&mut self, other: I18nConfigLayer) {
		if other.default_language.is_some() {
			self.default_language = other.default_language;
		}
		if other.not_found.is_some() {
			self.not_found = other.not_found;
		}
		if other.cache_behavior.is_some() {
			self.cache_behavior = other.cache_behavior;
		}
		if other.dismantle_context.is_some() {
			self.dismantle_context = other.dismantle_context;
		}
		if other.source_url.is_some() {
			self.source_url = other.source_url;
		}
		if other.asset_path.is_some() {
			self.asset_path = other.asset_path;
		}
		if other.translations_dir.is_some() {
			self.translations_dir = other.translations_dir;
		}
	}

	pub fn finalize(self) -> I18nConfig {
		I18nConfig {
			default_language: self
				.default_language
				.unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
			not_found: self.not_found.unwrap_or_default(),
			cache_behavior: self.cache_behavior.unwrap_or_default(),
			dismantle_context: self.dismantle_context.unwrap_or(true),
			source_url: self.source_url,
			asset_path: self
				.asset_path
				.unwrap_or_else(|| DEFAULT_ASSET_PATH.to_string()),
			translations_dir: self.translations_dir,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults_match_service_defaults() {
		let config = I18nConfigLayer::default().finalize();
		assert_eq!(config.default_language, "en-US");
		assert_eq!(config.options(), I18nOptions::default());
		assert_eq!(config.asset_path, DEFAULT_ASSET_PATH);
		assert!(config.source_url.is_none());
	}

	#[test]
	fn test_merge_overrides_set_fields_only() {
		let mut base = I18nConfigLayer {
			default_language: Some("de-DE".to_string()),
			not_found: Some(NotFoundPolicy::ReturnEmptyString),
			..Default::default()
		};
		base.merge(I18nConfigLayer {
			not_found: Some(NotFoundPolicy::ThrowError),
			dismantle_context: Some(false),
			..Default::default()
		});
		let config = base.finalize();
		assert_eq!(config.default_language, "de-DE");
		assert_eq!(config.not_found, NotFoundPolicy::ThrowError);
		assert!(!config.dismantle_context);
	}

	#[test]
	fn test_layer_from_toml() {
		let layer: I18nConfigLayer = toml::from_str(
			r#"
			not_found = "return_last_part_of_key"
			cache_behavior = "no_cache"
			"#,
		)
		.unwrap();
		assert_eq!(layer.not_found, Some(NotFoundPolicy::ReturnLastPartOfKey));
		assert_eq!(layer.cache_behavior, Some(CacheBehavior::NoCache));
	}
}
