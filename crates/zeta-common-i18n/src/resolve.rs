// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale resolution logic.

use crate::locale::{locale_info, DEFAULT_LOCALE, LOCALES};

/// Resolve the effective console language from a user preference and a
/// configured default.
///
/// Resolution order (highest to lowest priority):
/// 1. User preference, exact tag or primary language ("de" → "de-DE")
/// 2. Configured default, same matching
/// 3. `en-US`
///
/// # Example
///
/// ```
/// use zeta_common_i18n::resolve_locale;
///
/// assert_eq!(resolve_locale(Some("de-DE"), "en-US"), "de-DE");
/// assert_eq!(resolve_locale(Some("de-AT"), "en-US"), "de-DE");
/// assert_eq!(resolve_locale(None, "de"), "de-DE");
/// assert_eq!(resolve_locale(Some("xx"), "yy"), "en-US");
/// ```
pub fn resolve_locale(user_locale: Option<&str>, default_locale: &str) -> &'static str {
	user_locale
		.and_then(match_locale)
		.or_else(|| match_locale(default_locale))
		.unwrap_or(DEFAULT_LOCALE)
}

fn match_locale(requested: &str) -> Option<&'static str> {
	let requested = requested.trim();
	if requested.is_empty() {
		return None;
	}

	if let Some(info) = locale_info(requested) {
		return Some(info.code);
	}

	let primary = requested.split(['-', '_']).next()?;
	LOCALES
		.iter()
		.find(|l| l.primary_language().eq_ignore_ascii_case(primary))
		.map(|l| l.code)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_user_preference_takes_priority() {
		assert_eq!(resolve_locale(Some("de-DE"), "en-US"), "de-DE");
		assert_eq!(resolve_locale(Some("en-US"), "de-DE"), "en-US");
	}

	#[test]
	fn test_primary_language_match() {
		assert_eq!(resolve_locale(Some("de"), "en-US"), "de-DE");
		assert_eq!(resolve_locale(Some("DE_ch"), "en-US"), "de-DE");
		assert_eq!(resolve_locale(Some("en-GB"), "de-DE"), "en-US");
	}

	#[test]
	fn test_default_when_no_user_preference() {
		assert_eq!(resolve_locale(None, "de-DE"), "de-DE");
	}

	#[test]
	fn test_fallback_when_both_invalid() {
		assert_eq!(resolve_locale(Some("fr"), "ja"), "en-US");
		assert_eq!(resolve_locale(Some(""), ""), "en-US");
	}
}
