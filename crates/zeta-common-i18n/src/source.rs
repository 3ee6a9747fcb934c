// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Where translation files come from.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::error::{I18nError, Result};
use crate::translation::TranslationFile;

/// Default asset path below the console base URL.
pub const DEFAULT_ASSET_PATH: &str = "assets/i18n";

/// A provider of per-language translation files.
#[async_trait]
pub trait TranslationSource: Send + Sync {
	fn name(&self) -> &'static str;

	async fn fetch(&self, language: &str) -> Result<TranslationFile>;
}

/// Fetches `<base_url>/<asset_path>/<language>.json`.
pub struct HttpTranslationSource {
	client: Client,
	base_url: String,
	asset_path: String,
}

impl HttpTranslationSource {
	pub fn new(base_url: impl Into<String>) -> Result<Self> {
		let client = Client::builder()
			.timeout(Duration::from_secs(30))
			.build()
			.map_err(|source| I18nError::Fetch {
				language: String::new(),
				source,
			})?;
		Ok(Self::with_client(client, base_url))
	}

	pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
		Self {
			client,
			base_url: base_url.into().trim_end_matches('/').to_string(),
			asset_path: DEFAULT_ASSET_PATH.to_string(),
		}
	}

	pub fn asset_path(mut self, path: impl Into<String>) -> Self {
		self.asset_path = path.into().trim_matches('/').to_string();
		self
	}

	fn url(&self, language: &str) -> String {
		format!("{}/{}/{}.json", self.base_url, self.asset_path, language)
	}
}

#[async_trait]
impl TranslationSource for HttpTranslationSource {
	fn name(&self) -> &'static str {
		"http"
	}

	#[instrument(skip(self), fields(base_url = %self.base_url))]
	async fn fetch(&self, language: &str) -> Result<TranslationFile> {
		let url = self.url(language);
		debug!(url = %url, "fetching translation file");

		let fetch_error = |source| I18nError::Fetch {
			language: language.to_string(),
			source,
		};

		let response = self.client.get(&url).send().await.map_err(fetch_error)?;
		if !response.status().is_success() {
			return Err(I18nError::SourceStatus {
				language: language.to_string(),
				status: response.status().as_u16(),
			});
		}

		let body = response.text().await.map_err(fetch_error)?;
		TranslationFile::from_json(&body)
	}
}

/// Reads `<dir>/<language>.json` from disk.
pub struct FileTranslationSource {
	dir: PathBuf,
}

impl FileTranslationSource {
	pub fn new(dir: impl Into<PathBuf>) -> Self {
		Self { dir: dir.into() }
	}

	pub fn path_for(&self, language: &str) -> PathBuf {
		self.dir.join(format!("{language}.json"))
	}
}

#[async_trait]
impl TranslationSource for FileTranslationSource {
	fn name(&self) -> &'static str {
		"file"
	}

	async fn fetch(&self, language: &str) -> Result<TranslationFile> {
		let path = self.path_for(language);
		debug!(path = %path.display(), "reading translation file");

		let content = tokio::fs::read_to_string(&path)
			.await
			.map_err(|source| I18nError::FileRead { path, source })?;
		TranslationFile::from_json(&content)
	}
}
