// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `zeta translate` and `zeta translate-error`.

use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use tracing::{debug, instrument};
use zeta_common_i18n::{
	FileTranslationSource, HttpTranslationSource, I18nService, Param, TranslationFile,
};
use zeta_config::I18nConfig;

/// Build a service for `language`, seeded from `file` or from the configured
/// translation source.
#[instrument(skip(config))]
pub async fn load_service(
	config: &I18nConfig,
	file: Option<&Path>,
	language: &str,
) -> Result<I18nService> {
	let service = I18nService::new(config.options());
	service.set_language(language);

	let count = if let Some(file) = file {
		let content = tokio::fs::read_to_string(file)
			.await
			.with_context(|| format!("failed to read {}", file.display()))?;
		let translations = TranslationFile::from_json(&content)
			.with_context(|| format!("invalid translation file {}", file.display()))?
			.into_translations();
		let count = translations.len();
		service.set_translations(language, translations);
		count
	} else if let Some(dir) = &config.translations_dir {
		service
			.load(&FileTranslationSource::new(dir), language)
			.await
			.context("failed to load translations")?
	} else if let Some(url) = &config.source_url {
		let source = HttpTranslationSource::new(url.as_str())?.asset_path(config.asset_path.as_str());
		service
			.load(&source, language)
			.await
			.context("failed to fetch translations")?
	} else {
		bail!("no translations: pass --file or configure i18n.translations_dir or i18n.source_url");
	};

	debug!(count, language, "translations loaded");
	Ok(service)
}

/// Parse a `KEY=VALUE` substitution parameter.
pub fn parse_param(raw: &str) -> Result<Param> {
	let (key, value) = raw
		.split_once('=')
		.ok_or_else(|| anyhow!("parameter '{raw}' is not KEY=VALUE"))?;
	if key.is_empty() {
		bail!("parameter '{raw}' has an empty key");
	}
	Ok(Param::new(key, value))
}

pub fn translate(service: &I18nService, key: &str, raw_params: &[String]) -> Result<String> {
	let params = raw_params
		.iter()
		.map(|raw| parse_param(raw))
		.collect::<Result<Vec<_>>>()?;
	Ok(service.translate(key, &params)?)
}

pub fn translate_error(service: &I18nService, message: &str) -> Result<String> {
	Ok(service.translate_error_code(message)?)
}
