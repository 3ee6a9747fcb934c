// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: environment variables and TOML files.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::ZetaConfigLayer;
use crate::sections::{AuthConfigLayer, I18nConfigLayer, LoggingConfigLayer};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<ZetaConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ZetaConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(ZetaConfigLayer::default())
	}
}

/// TOML file configuration source.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	/// `~/.config/zeta/config.toml` (platform config dir).
	pub fn user() -> Self {
		Self::new(default_config_path())
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

/// Per-user config file location.
pub fn default_config_path() -> PathBuf {
	dirs::config_dir()
		.unwrap_or_else(|| PathBuf::from("."))
		.join("zeta")
		.join("config.toml")
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<ZetaConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(ZetaConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: ZetaConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: ZETA_<SECTION>_<FIELD>
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ZetaConfigLayer, ConfigError> {
		debug!("loading environment variables");
		load_from(&|name| std::env::var(name).ok())
	}
}

type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

fn load_from(lookup: Lookup<'_>) -> Result<ZetaConfigLayer, ConfigError> {
	Ok(ZetaConfigLayer {
		i18n: Some(load_i18n(lookup)?),
		auth: Some(load_auth(lookup)?),
		logging: Some(load_logging(lookup)?),
	})
}

fn env_var(lookup: Lookup<'_>, name: &str) -> Option<String> {
	lookup(name).filter(|s| !s.is_empty())
}

fn env_bool(lookup: Lookup<'_>, name: &str) -> Option<bool> {
	env_var(lookup, name).map(|v| v.eq_ignore_ascii_case("true") || v == "1")
}

fn env_parse<T>(lookup: Lookup<'_>, name: &str) -> Result<Option<T>, ConfigError>
where
	T: FromStr,
	T::Err: std::fmt::Display,
{
	match env_var(lookup, name) {
		Some(v) => v.parse().map(Some).map_err(|e| ConfigError::InvalidValue {
			key: name.to_string(),
			message: format!("invalid value '{v}': {e}"),
		}),
		None => Ok(None),
	}
}

fn load_i18n(lookup: Lookup<'_>) -> Result<I18nConfigLayer, ConfigError> {
	Ok(I18nConfigLayer {
		default_language: env_var(lookup, "ZETA_I18N_DEFAULT_LANGUAGE"),
		not_found: env_parse(lookup, "ZETA_I18N_NOT_FOUND")?,
		cache_behavior: env_parse(lookup, "ZETA_I18N_CACHE_BEHAVIOR")?,
		dismantle_context: env_bool(lookup, "ZETA_I18N_DISMANTLE_CONTEXT"),
		source_url: env_var(lookup, "ZETA_I18N_SOURCE_URL"),
		asset_path: env_var(lookup, "ZETA_I18N_ASSET_PATH"),
		translations_dir: env_var(lookup, "ZETA_I18N_TRANSLATIONS_DIR").map(PathBuf::from),
	})
}

fn load_auth(lookup: Lookup<'_>) -> Result<AuthConfigLayer, ConfigError> {
	Ok(AuthConfigLayer {
		base_url: env_var(lookup, "ZETA_AUTH_BASE_URL"),
		request_timeout_secs: env_parse(lookup, "ZETA_AUTH_REQUEST_TIMEOUT_SECS")?,
		csrf_header: env_var(lookup, "ZETA_AUTH_CSRF_HEADER"),
		login_path: env_var(lookup, "ZETA_AUTH_LOGIN_PATH"),
	})
}

fn load_logging(lookup: Lookup<'_>) -> Result<LoggingConfigLayer, ConfigError> {
	Ok(LoggingConfigLayer {
		level: env_var(lookup, "ZETA_LOGGING_LEVEL"),
		format: env_parse(lookup, "ZETA_LOGGING_FORMAT")?,
	})
}
