// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-language lookup cache with last-access tracking.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::translation::Translation;

/// A cached lookup result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedTranslation {
	pub translation: Translation,
	pub last_access: DateTime<Utc>,
}

/// Cache counters since construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
	pub hits: u64,
	pub misses: u64,
}

/// Lookup key → cached result, bucketed by language.
///
/// Each language carries a generation that moves on every
/// [`clear_language`](Self::clear_language). An insert tagged with an older
/// generation resolved against replaced translations and is dropped.
#[derive(Debug, Default)]
pub(crate) struct TranslationCache {
	languages: HashMap<String, HashMap<String, CachedTranslation>>,
	generations: HashMap<String, u64>,
}

impl TranslationCache {
	pub fn generation(&self, language: &str) -> u64 {
		self.generations.get(language).copied().unwrap_or_default()
	}

	/// Return a hit and refresh its access time.
	pub fn get(&mut self, language: &str, key: &str, now: DateTime<Utc>) -> Option<Translation> {
		let entry = self.languages.get_mut(language)?.get_mut(key)?;
		entry.last_access = now;
		Some(entry.translation.clone())
	}

	/// Store a lookup result unless `language` was cleared since
	/// `generation` was read. Returns whether the entry was stored.
	pub fn insert(
		&mut self,
		language: &str,
		key: &str,
		translation: Translation,
		now: DateTime<Utc>,
		generation: u64,
	) -> bool {
		if generation != self.generation(language) {
			return false;
		}
		self.languages
			.entry(language.to_string())
			.or_default()
			.insert(
				key.to_string(),
				CachedTranslation {
					translation,
					last_access: now,
				},
			);
		true
	}

	pub fn clear_language(&mut self, language: &str) {
		self.languages.remove(language);
		*self.generations.entry(language.to_string()).or_default() += 1;
	}

	pub fn clear(&mut self) {
		self.languages.clear();
	}

	/// Drop entries of `language` last accessed before `cutoff`.
	pub fn evict_older_than(&mut self, language: &str, cutoff: DateTime<Utc>) -> usize {
		let Some(bucket) = self.languages.get_mut(language) else {
			return 0;
		};
		let before = bucket.len();
		bucket.retain(|_, entry| entry.last_access >= cutoff);
		before - bucket.len()
	}

	pub fn len(&self, language: &str) -> usize {
		self.languages.get(language).map_or(0, HashMap::len)
	}

	pub fn entry(&self, language: &str, key: &str) -> Option<&CachedTranslation> {
		self.languages.get(language)?.get(key)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::Duration;

	fn at(secs: i64) -> DateTime<Utc> {
		DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap()
	}

	#[test]
	fn test_get_refreshes_last_access() {
		let mut cache = TranslationCache::default();
		cache.insert("en-US", "a", Translation::new("a", "A"), at(0), 0);

		assert_eq!(cache.get("en-US", "a", at(10)).unwrap().value, "A");
		assert_eq!(cache.entry("en-US", "a").unwrap().last_access, at(10));
	}

	#[test]
	fn test_languages_are_separate() {
		let mut cache = TranslationCache::default();
		cache.insert("en-US", "a", Translation::new("a", "A"), at(0), 0);

		assert!(cache.get("de-DE", "a", at(1)).is_none());
		assert_eq!(cache.len("en-US"), 1);
		assert_eq!(cache.len("de-DE"), 0);
	}

	#[test]
	fn test_evicts_only_stale_entries_of_one_language() {
		let mut cache = TranslationCache::default();
		cache.insert("en-US", "old", Translation::new("old", "Old"), at(0), 0);
		cache.insert("en-US", "new", Translation::new("new", "New"), at(100), 0);
		cache.insert("de-DE", "old", Translation::new("old", "Alt"), at(0), 0);

		let evicted = cache.evict_older_than("en-US", at(100) - Duration::seconds(50));

		assert_eq!(evicted, 1);
		assert!(cache.entry("en-US", "old").is_none());
		assert!(cache.entry("en-US", "new").is_some());
		assert!(cache.entry("de-DE", "old").is_some());
	}

	#[test]
	fn test_evicting_missing_language_is_noop() {
		let mut cache = TranslationCache::default();
		assert_eq!(cache.evict_older_than("fr-FR", at(0)), 0);
	}

	#[test]
	fn test_insert_from_before_clear_language_is_dropped() {
		let mut cache = TranslationCache::default();
		let generation = cache.generation("en-US");

		cache.clear_language("en-US");

		assert!(!cache.insert("en-US", "a", Translation::new("a", "Old"), at(0), generation));
		assert_eq!(cache.len("en-US"), 0);
		assert!(cache.insert(
			"en-US",
			"a",
			Translation::new("a", "New"),
			at(0),
			cache.generation("en-US")
		));
		assert_eq!(cache.len("en-US"), 1);
	}

	#[test]
	fn test_clear_language_leaves_other_generations() {
		let mut cache = TranslationCache::default();
		cache.clear_language("en-US");
		assert_eq!(cache.generation("en-US"), 1);
		assert_eq!(cache.generation("de-DE"), 0);
	}

	#[test]
	fn test_clear_drops_everything() {
		let mut cache = TranslationCache::default();
		cache.insert("en-US", "a", Translation::new("a", "A"), at(0), 0);
		cache.insert("de-DE", "a", Translation::new("a", "A"), at(0), 0);
		cache.clear();
		assert_eq!(cache.len("en-US"), 0);
		assert_eq!(cache.len("de-DE"), 0);
	}
}
