// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Internationalization (i18n) support for the zeta console.
//!
//! This crate resolves lookup keys to localized text. Translations are seeded
//! per language (usually once per feature area at startup) and looked up
//! through a per-language cache.
//!
//! # Key Convention
//!
//! Keys are composed of an optional type, an optional dotted context and a
//! base key:
//!
//! ```text
//! [type ":"] [context "."] key
//! ```
//!
//! Example: `tooltip:xmom.dataflow.remove`
//!
//! With context dismantling enabled, a lookup for `xmom.dataflow.remove`
//! that has no direct entry retries `dataflow.remove`, then `remove`.
//!
//! # Example
//!
//! ```
//! use zeta_common_i18n::{I18nOptions, I18nService, Param, Translation};
//!
//! let i18n = I18nService::new(I18nOptions::default());
//! i18n.set_translations("en-US", [Translation::new("greet", "Hello $0")]);
//!
//! let text = i18n.translate("greet", &[Param::new("$0", "World")]).unwrap();
//! assert_eq!(text, "Hello World");
//! ```

mod cache;
mod error;
mod error_code;
mod locale;
mod policy;
mod resolve;
mod service;
mod source;
mod translation;

pub use cache::{CacheStats, CachedTranslation};
pub use error::{I18nError, Result};
pub use locale::{available_locales, is_rtl, is_supported, locale_info, Direction, LocaleInfo};
pub use policy::{CacheBehavior, I18nOptions, NotFoundPolicy};
pub use resolve::resolve_locale;
pub use service::I18nService;
pub use source::{
	FileTranslationSource, HttpTranslationSource, TranslationSource, DEFAULT_ASSET_PATH,
};
pub use translation::{compose_key, Param, Translation, TranslationFile, TranslationRecord};

pub use locale::{DEFAULT_LOCALE, LOCALES};
