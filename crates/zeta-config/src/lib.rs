// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Centralized configuration management for the zeta console.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Type-safe configuration with validation
//! - Consistent environment variable naming (`ZETA_<SECTION>_<FIELD>`)
//!
//! # Usage
//!
//! ```no_run
//! use zeta_config::load_config;
//!
//! let config = load_config()?;
//! println!("translations default to {}", config.i18n.default_language);
//! # Ok::<(), zeta_config::ConfigError>(())
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::ZetaConfigLayer;
pub use sections::*;
pub use sources::{
	default_config_path, ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource,
};

use tracing::{debug, info};

/// Fully resolved console configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZetaConfig {
	pub i18n: I18nConfig,
	pub auth: AuthClientConfig,
	pub logging: LoggingConfig,
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`ZETA_*`)
/// 2. Config file (`~/.config/zeta/config.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<ZetaConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::user()),
		Box::new(EnvSource),
	])
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<ZetaConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

/// Merge `sources` in precedence order and finalize the result.
pub fn load_from_sources(
	mut sources: Vec<Box<dyn ConfigSource>>,
) -> Result<ZetaConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = ZetaConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
fn finalize(layer: ZetaConfigLayer) -> Result<ZetaConfig, ConfigError> {
	let i18n = layer.i18n.unwrap_or_default().finalize();
	let auth = layer.auth.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();

	validate_config(&i18n, &auth)?;

	info!(
		default_language = %i18n.default_language,
		not_found = %i18n.not_found,
		cache_behavior = %i18n.cache_behavior,
		auth_configured = auth.base_url.is_some(),
		log_format = %logging.format,
		"Console configuration loaded"
	);

	Ok(ZetaConfig {
		i18n,
		auth,
		logging,
	})
}

/// Validate cross-field configuration rules.
fn validate_config(i18n: &I18nConfig, auth: &AuthClientConfig) -> Result<(), ConfigError> {
	if let Some(base_url) = &auth.base_url {
		validate_http_url("auth.base_url", base_url)?;
	}
	if let Some(source_url) = &i18n.source_url {
		validate_http_url("i18n.source_url", source_url)?;
	}
	if auth.request_timeout.is_zero() {
		return Err(ConfigError::Validation(
			"auth.request_timeout_secs must be greater than zero".to_string(),
		));
	}
	if auth.csrf_header.trim().is_empty() {
		return Err(ConfigError::Validation(
			"auth.csrf_header must not be empty".to_string(),
		));
	}
	if i18n.default_language.trim().is_empty() {
		return Err(ConfigError::Validation(
			"i18n.default_language must not be empty".to_string(),
		));
	}

	Ok(())
}

fn validate_http_url(key: &str, value: &str) -> Result<(), ConfigError> {
	let url = url::Url::parse(value).map_err(|e| ConfigError::InvalidValue {
		key: key.to_string(),
		message: e.to_string(),
	})?;
	match url.scheme() {
		"http" | "https" => Ok(()),
		scheme => Err(ConfigError::InvalidValue {
			key: key.to_string(),
			message: format!("unsupported scheme '{scheme}'"),
		}),
	}
}
