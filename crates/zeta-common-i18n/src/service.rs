// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The translation service: per-language maps, lookup and caching.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, trace, warn};

use crate::cache::{CacheStats, TranslationCache};
use crate::error::{I18nError, Result};
use crate::error_code;
use crate::policy::{CacheBehavior, I18nOptions, NotFoundPolicy};
use crate::source::TranslationSource;
use crate::translation::{substitute, Param, Translation};

/// Resolves lookup keys to translations of the active language.
///
/// One instance is shared (behind an `Arc`) by everything that renders text.
/// Internal locks are never held while calling back into the service, so a
/// lookup issued while another caller seeds translations is safe.
pub struct I18nService {
	translations: RwLock<HashMap<String, HashMap<String, Translation>>>,
	cache: Mutex<TranslationCache>,
	language: RwLock<String>,
	options: RwLock<I18nOptions>,
	hits: AtomicU64,
	misses: AtomicU64,
}

impl std::fmt::Debug for I18nService {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("I18nService").finish_non_exhaustive()
	}
}

impl I18nService {
	pub fn new(options: I18nOptions) -> Self {
		Self {
			translations: RwLock::new(HashMap::new()),
			cache: Mutex::new(TranslationCache::default()),
			language: RwLock::new(options.default_language.clone()),
			options: RwLock::new(options),
			hits: AtomicU64::new(0),
			misses: AtomicU64::new(0),
		}
	}

	/// The active language.
	pub fn language(&self) -> String {
		self.language.read().clone()
	}

	/// Switch the active language. Caches of other languages are kept.
	pub fn set_language(&self, language: impl Into<String>) {
		let language = language.into();
		info!(language = %language, "active language changed");
		*self.language.write() = language;
	}

	pub fn options(&self) -> I18nOptions {
		self.options.read().clone()
	}

	pub fn set_not_found_policy(&self, policy: NotFoundPolicy) {
		self.options.write().not_found = policy;
	}

	pub fn set_cache_behavior(&self, behavior: CacheBehavior) {
		self.options.write().cache_behavior = behavior;
	}

	pub fn set_dismantle_context(&self, enabled: bool) {
		self.options.write().dismantle_context = enabled;
	}

	/// Insert or overwrite translations of `language`.
	///
	/// The language's cache is dropped so no lookup keeps serving a value that
	/// was overwritten here.
	pub fn set_translations<I>(&self, language: &str, entries: I)
	where
		I: IntoIterator<Item = Translation>,
	{
		// Collected up front: a lazy iterator may itself call into the service.
		let entries: Vec<Translation> = entries.into_iter().collect();
		let count = entries.len();

		{
			let mut translations = self.translations.write();
			let map = translations.entry(language.to_string()).or_default();
			for translation in entries {
				map.insert(translation.key.clone(), translation);
			}
		}

		self.cache.lock().clear_language(language);
		debug!(language, count, "translations set");
	}

	/// Fetch `language` from `source` and merge it into the service.
	pub async fn load(&self, source: &dyn TranslationSource, language: &str) -> Result<usize> {
		let file = source.fetch(language).await?;
		let translations = file.into_translations();
		let count = translations.len();
		self.set_translations(language, translations);
		info!(language, source = source.name(), count, "translations loaded");
		Ok(count)
	}

	/// Translate `key` in the active language.
	pub fn translate(&self, key: &str, params: &[Param]) -> Result<String> {
		self.get_translation(key, params).map(|t| t.value)
	}

	/// Translate `key` in an explicit language.
	pub fn translate_in(&self, language: &str, key: &str, params: &[Param]) -> Result<String> {
		self.get_translation_in(language, key, params)
			.map(|t| t.value)
	}

	/// Resolve `key` in the active language, returning the full record.
	pub fn get_translation(&self, key: &str, params: &[Param]) -> Result<Translation> {
		let language = self.language();
		self.get_translation_in(&language, key, params)
	}

	/// Resolve `key` in `language`.
	///
	/// Order: cache, source map (with context dismantling if enabled), then
	/// the not-found policy. `params` are applied to a copy of the result.
	pub fn get_translation_in(
		&self,
		language: &str,
		key: &str,
		params: &[Param],
	) -> Result<Translation> {
		let options = self.options();
		let now = Utc::now();

		// Read before the source map so a concurrent overwrite invalidates
		// whatever this lookup resolves.
		let generation = if options.cache_behavior.is_enabled() {
			let (generation, cached) = {
				let mut cache = self.cache.lock();
				(cache.generation(language), cache.get(language, key, now))
			};
			if let Some(cached) = cached {
				self.hits.fetch_add(1, Ordering::Relaxed);
				trace!(language, key, "translation served from cache");
				return Ok(substitute(&cached, params));
			}
			self.misses.fetch_add(1, Ordering::Relaxed);
			generation
		} else {
			0
		};

		let (translation, resolved) = match self.lookup(language, key, options.dismantle_context) {
			Some(translation) => (translation, true),
			None => {
				let Some(value) = options.not_found.fallback(key) else {
					debug!(language, key, "no translation found");
					return Err(I18nError::NotFound {
						language: language.to_string(),
						key: key.to_string(),
					});
				};
				debug!(
					language,
					key,
					policy = %options.not_found,
					"no translation found, using fallback"
				);
				(Translation::new(key, value), false)
			}
		};

		if options.cache_behavior.should_cache(resolved)
			&& !self
				.cache
				.lock()
				.insert(language, key, translation.clone(), now, generation)
		{
			trace!(language, key, "translations replaced during lookup, not caching");
		}

		Ok(substitute(&translation, params))
	}

	/// Whether the active language has an entry for exactly `key`.
	///
	/// Neither the cache nor the not-found policy are consulted.
	pub fn has_translation(&self, key: &str) -> bool {
		let language = self.language();
		self.translations
			.read()
			.get(&language)
			.is_some_and(|map| map.contains_key(key))
	}

	/// Drop the caches of all languages.
	pub fn clear_cache(&self) {
		self.cache.lock().clear();
		debug!("translation cache cleared");
	}

	/// Evict entries of the active language not accessed within `max_age`.
	pub fn remove_old_cache_entries(&self, max_age: Duration) -> usize {
		let language = self.language();
		let cutoff = chrono::Duration::from_std(max_age)
			.ok()
			.and_then(|age| Utc::now().checked_sub_signed(age))
			.unwrap_or(DateTime::<Utc>::MIN_UTC);
		let evicted = self.cache.lock().evict_older_than(&language, cutoff);
		debug!(language = %language, evicted, "old cache entries removed");
		evicted
	}

	/// Number of cached lookups for `language`.
	pub fn cached_entries(&self, language: &str) -> usize {
		self.cache.lock().len(language)
	}

	pub fn stats(&self) -> CacheStats {
		CacheStats {
			hits: self.hits.load(Ordering::Relaxed),
			misses: self.misses.load(Ordering::Relaxed),
		}
	}

	/// Translate a server message that may embed an `EC-...` error code.
	///
	/// The code is translated with its arguments (each translated as well)
	/// bound to `$0`, `$1`, ... A message without code is translated as a
	/// whole. Arguments without a translation are bound verbatim, whatever
	/// the not-found policy; only the code's own lookup may fail.
	pub fn translate_error_code(&self, message: &str) -> Result<String> {
		match error_code::extract(message) {
			Ok(Some(found)) => {
				let params = found
					.args
					.iter()
					.enumerate()
					.map(|(index, arg)| {
						let value = match self.translate(arg, &[]) {
							Ok(value) => value,
							Err(I18nError::NotFound { .. }) => arg.to_string(),
							Err(e) => return Err(e),
						};
						Ok(Param::new(format!("${index}"), value))
					})
					.collect::<Result<Vec<_>>>()?;
				self.translate(found.code, &params)
			}
			Ok(None) => self.translate(message, &[]),
			Err(_) => {
				warn!(message, "unterminated error code arguments, translating whole message");
				self.translate(message, &[])
			}
		}
	}

	fn lookup(&self, language: &str, key: &str, dismantle: bool) -> Option<Translation> {
		let translations = self.translations.read();
		let map = translations.get(language)?;

		if !dismantle {
			return map.get(key).cloned();
		}

		lookup_candidates(key)
			.into_iter()
			.find_map(|candidate| map.get(candidate.as_ref()).cloned())
	}
}

impl Default for I18nService {
	fn default() -> Self {
		Self::new(I18nOptions::default())
	}
}

/// Keys tried for `key` when dismantling, most specific first.
///
/// Leading context segments are stripped one by one while keeping the type
/// prefix; then the same is repeated without the type prefix.
fn lookup_candidates(key: &str) -> Vec<Cow<'_, str>> {
	match split_kind(key) {
		(Some(kind), body) => suffixes(body)
			.map(|suffix| Cow::Owned(format!("{kind}:{suffix}")))
			.chain(suffixes(body).map(Cow::Borrowed))
			.collect(),
		(None, body) => suffixes(body).map(Cow::Borrowed).collect(),
	}
}

fn split_kind(key: &str) -> (Option<&str>, &str) {
	match key.split_once(':') {
		Some((kind, body)) if !kind.is_empty() && !kind.contains('.') => (Some(kind), body),
		_ => (None, key),
	}
}

fn suffixes(body: &str) -> impl Iterator<Item = &str> {
	std::iter::successors(Some(body), |current| {
		current
			.split_once('.')
			.map(|(_, tail)| tail)
			.filter(|tail| !tail.is_empty())
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	fn service_with(options: I18nOptions, entries: &[(&str, &str)]) -> I18nService {
		let service = I18nService::new(options);
		service.set_translations(
			"en-US",
			entries.iter().map(|(k, v)| Translation::new(*k, *v)),
		);
		service
	}

	fn with_policy(policy: NotFoundPolicy) -> I18nService {
		service_with(
			I18nOptions {
				not_found: policy,
				..Default::default()
			},
			&[],
		)
	}

	#[test]
	fn test_candidates_without_type() {
		let candidates: Vec<_> = lookup_candidates("x.a.b").into_iter().collect();
		assert_eq!(candidates, vec!["x.a.b", "a.b", "b"]);
	}

	#[test]
	fn test_candidates_with_type() {
		let candidates: Vec<_> = lookup_candidates("tooltip:x.a")
			.into_iter()
			.map(|c| c.into_owned())
			.collect();
		assert_eq!(candidates, vec!["tooltip:x.a", "tooltip:a", "x.a", "a"]);
	}

	#[test]
	fn test_colon_after_dot_is_not_a_type() {
		assert_eq!(split_kind("a.b:c"), (None, "a.b:c"));
		assert_eq!(split_kind(":a"), (None, ":a"));
	}

	#[test]
	fn test_translates_direct_key() {
		let service = service_with(I18nOptions::default(), &[("save", "Save")]);
		assert_eq!(service.translate("save", &[]).unwrap(), "Save");
	}

	#[test]
	fn test_dismantles_context() {
		let service = service_with(I18nOptions::default(), &[("a.b", "AB")]);
		assert_eq!(
			service.translate("x.a.b", &[]).unwrap(),
			service.translate("a.b", &[]).unwrap()
		);
	}

	#[test]
	fn test_dismantles_type_prefix_as_second_pass() {
		let service = service_with(I18nOptions::default(), &[("remove", "Remove")]);
		assert_eq!(
			service.translate("tooltip:xmom.remove", &[]).unwrap(),
			"Remove"
		);
	}

	#[test]
	fn test_typed_entry_wins_over_untyped() {
		let service = service_with(
			I18nOptions::default(),
			&[("tooltip:remove", "Remove this"), ("remove", "Remove")],
		);
		assert_eq!(
			service.translate("tooltip:xmom.remove", &[]).unwrap(),
			"Remove this"
		);
	}

	#[test]
	fn test_no_dismantling_when_disabled() {
		let service = service_with(
			I18nOptions {
				dismantle_context: false,
				..Default::default()
			},
			&[("a.b", "AB")],
		);
		assert_eq!(service.translate("x.a.b", &[]).unwrap(), "x.a.b");
	}

	#[test]
	fn test_not_found_policies() {
		assert_eq!(
			with_policy(NotFoundPolicy::ReturnKey)
				.translate("missing.key", &[])
				.unwrap(),
			"missing.key"
		);
		assert_eq!(
			with_policy(NotFoundPolicy::ReturnLastPartOfKey)
				.translate("missing.key", &[])
				.unwrap(),
			"key"
		);
		assert_eq!(
			with_policy(NotFoundPolicy::ReturnEmptyString)
				.translate("missing.key", &[])
				.unwrap(),
			""
		);
		let err = with_policy(NotFoundPolicy::ThrowError)
			.translate("missing.key", &[])
			.unwrap_err();
		assert!(matches!(err, I18nError::NotFound { ref key, .. } if key == "missing.key"));
	}

	#[test]
	fn test_substitution_does_not_mutate_base() {
		let service = service_with(I18nOptions::default(), &[("greet", "Hello $0")]);

		let text = service
			.translate("greet", &[Param::new("$0", "World")])
			.unwrap();

		assert_eq!(text, "Hello World");
		assert_eq!(service.translate("greet", &[]).unwrap(), "Hello $0");
		assert_eq!(
			service.get_translation("greet", &[]).unwrap().value,
			"Hello $0"
		);
	}

	#[test]
	fn test_second_lookup_is_served_from_cache() {
		let service = service_with(I18nOptions::default(), &[("save", "Save")]);

		let first = service.translate("save", &[]).unwrap();
		let second = service.translate("save", &[]).unwrap();

		assert_eq!(first, second);
		assert_eq!(service.stats(), CacheStats { hits: 1, misses: 1 });
	}

	#[test]
	fn test_cache_resolved_skips_fallbacks() {
		let service = service_with(I18nOptions::default(), &[]);
		service.translate("missing", &[]).unwrap();
		assert_eq!(service.cached_entries("en-US"), 0);
	}

	#[test]
	fn test_cache_all_keeps_fallbacks() {
		let service = service_with(
			I18nOptions {
				cache_behavior: CacheBehavior::CacheAll,
				..Default::default()
			},
			&[],
		);
		service.translate("missing", &[]).unwrap();
		assert_eq!(service.cached_entries("en-US"), 1);
	}

	#[test]
	fn test_no_cache_never_caches() {
		let service = service_with(
			I18nOptions {
				cache_behavior: CacheBehavior::NoCache,
				..Default::default()
			},
			&[("save", "Save")],
		);
		service.translate("save", &[]).unwrap();
		service.translate("save", &[]).unwrap();
		assert_eq!(service.cached_entries("en-US"), 0);
		assert_eq!(service.stats(), CacheStats::default());
	}

	#[test]
	fn test_overwrite_is_visible_after_caching() {
		let service = service_with(I18nOptions::default(), &[("save", "Save")]);
		assert_eq!(service.translate("save", &[]).unwrap(), "Save");

		service.set_translations("en-US", [Translation::new("save", "Store")]);

		assert_eq!(service.translate("save", &[]).unwrap(), "Store");
	}

	#[test]
	fn test_seeding_another_language_keeps_cache() {
		let service = service_with(I18nOptions::default(), &[("save", "Save")]);
		service.translate("save", &[]).unwrap();

		service.set_translations("de-DE", [Translation::new("save", "Speichern")]);

		assert_eq!(service.cached_entries("en-US"), 1);
	}

	#[test]
	fn test_languages_are_independent() {
		let service = service_with(I18nOptions::default(), &[("save", "Save")]);
		service.set_translations("de-DE", [Translation::new("save", "Speichern")]);

		assert_eq!(service.translate("save", &[]).unwrap(), "Save");
		service.set_language("de-DE");
		assert_eq!(service.translate("save", &[]).unwrap(), "Speichern");
		assert_eq!(
			service.translate_in("en-US", "save", &[]).unwrap(),
			"Save"
		);
	}

	#[test]
	fn test_has_translation_ignores_cache_and_fallback() {
		let service = service_with(
			I18nOptions {
				cache_behavior: CacheBehavior::CacheAll,
				..Default::default()
			},
			&[("a.b", "AB")],
		);
		service.translate("missing", &[]).unwrap();
		service.translate("x.a.b", &[]).unwrap();

		assert!(service.has_translation("a.b"));
		assert!(!service.has_translation("missing"));
		assert!(!service.has_translation("x.a.b"));
	}

	#[test]
	fn test_clear_cache_wipes_all_languages() {
		let service = service_with(I18nOptions::default(), &[("save", "Save")]);
		service.set_translations("de-DE", [Translation::new("save", "Speichern")]);
		service.translate("save", &[]).unwrap();
		service.translate_in("de-DE", "save", &[]).unwrap();

		service.clear_cache();

		assert_eq!(service.cached_entries("en-US"), 0);
		assert_eq!(service.cached_entries("de-DE"), 0);
	}

	#[test]
	fn test_remove_old_cache_entries_respects_age() {
		let service = service_with(I18nOptions::default(), &[("save", "Save")]);
		service.translate("save", &[]).unwrap();

		assert_eq!(service.remove_old_cache_entries(Duration::from_secs(3600)), 0);
		assert_eq!(service.cached_entries("en-US"), 1);

		std::thread::sleep(Duration::from_millis(5));
		assert_eq!(service.remove_old_cache_entries(Duration::ZERO), 1);
		assert_eq!(service.cached_entries("en-US"), 0);
	}

	#[test]
	fn test_translate_error_code_binds_translated_args() {
		let service = service_with(
			I18nOptions::default(),
			&[
				("EC-XMOM.INVALID.NAME", "Name $0 is invalid in $1"),
				("workspace", "Arbeitsbereich"),
			],
		);

		let text = service
			.translate_error_code("Save failed: EC-XMOM.INVALID.NAME [Foo, workspace]")
			.unwrap();

		assert_eq!(text, "Name Foo is invalid in Arbeitsbereich");
	}

	#[test]
	fn test_translate_error_code_keeps_untranslated_args_under_throw_error() {
		let service = service_with(
			I18nOptions {
				not_found: NotFoundPolicy::ThrowError,
				..Default::default()
			},
			&[("EC-XMOM.INVALID.NAME", "Name $0 is invalid")],
		);

		assert_eq!(
			service
				.translate_error_code("EC-XMOM.INVALID.NAME [MyType]")
				.unwrap(),
			"Name MyType is invalid"
		);
		let err = service
			.translate_error_code("EC-XMOM.UNKNOWN [MyType]")
			.unwrap_err();
		assert!(matches!(err, I18nError::NotFound { ref key, .. } if key == "EC-XMOM.UNKNOWN"));
	}

	#[test]
	fn test_translate_error_code_without_code_translates_message() {
		let service = service_with(I18nOptions::default(), &[("Connection lost", "Verbindung weg")]);
		assert_eq!(
			service.translate_error_code("Connection lost").unwrap(),
			"Verbindung weg"
		);
	}

	#[test]
	fn test_translate_error_code_degrades_on_unterminated_args() {
		let service = service_with(I18nOptions::default(), &[("EC-A", "A")]);
		assert_eq!(
			service.translate_error_code("EC-A [x, y").unwrap(),
			"EC-A [x, y"
		);
	}

	#[test]
	fn test_policy_can_change_at_runtime() {
		let service = service_with(I18nOptions::default(), &[]);
		service.set_not_found_policy(NotFoundPolicy::ReturnEmptyString);
		assert_eq!(service.translate("missing", &[]).unwrap(), "");
	}

	#[test]
	fn test_concurrent_overwrite_never_leaves_stale_cache_entry() {
		use std::sync::atomic::AtomicBool;
		use std::sync::Arc;

		let service = Arc::new(service_with(I18nOptions::default(), &[("save", "v0")]));
		let done = Arc::new(AtomicBool::new(false));

		let readers: Vec<_> = (0..4)
			.map(|_| {
				let service = Arc::clone(&service);
				let done = Arc::clone(&done);
				std::thread::spawn(move || {
					while !done.load(Ordering::Relaxed) {
						let _ = service.translate("save", &[]);
					}
				})
			})
			.collect();

		for round in 1..=200 {
			service.set_translations("en-US", [Translation::new("save", format!("v{round}"))]);
		}
		done.store(true, Ordering::Relaxed);
		for reader in readers {
			reader.join().unwrap();
		}

		assert_eq!(service.translate("save", &[]).unwrap(), "v200");
	}

	proptest! {
		#[test]
		fn test_last_set_value_wins(
			key in "[a-z]{1,8}(\\.[a-z]{1,8}){0,3}",
			values in prop::collection::vec("[A-Za-z ]{0,12}", 1..5),
		) {
			let service = I18nService::default();
			for value in &values {
				service.set_translations("en-US", [Translation::new(key.clone(), value.clone())]);
				// exercise the cache between overwrites
				let _ = service.translate(&key, &[]);
			}
			prop_assert_eq!(service.translate(&key, &[]).unwrap(), values.last().unwrap().clone());
		}

		#[test]
		fn test_translate_is_idempotent(key in "[a-z]{1,8}(\\.[a-z]{1,8}){0,3}") {
			let service = service_with(I18nOptions::default(), &[("a.b", "AB")]);
			let first = service.translate(&key, &[]).unwrap();
			let second = service.translate(&key, &[]).unwrap();
			prop_assert_eq!(first, second);
		}
	}
}
