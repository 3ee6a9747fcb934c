// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale metadata and direction support.

/// Text direction for a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
	/// Left-to-right
	Ltr,
	/// Right-to-left
	Rtl,
}

impl Direction {
	/// Returns the HTML `dir` attribute value.
	pub fn as_html_dir(&self) -> &'static str {
		match self {
			Direction::Ltr => "ltr",
			Direction::Rtl => "rtl",
		}
	}
}

/// Metadata about a console language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleInfo {
	/// BCP 47 tag (e.g., "en-US")
	pub code: &'static str,
	/// English name of the language
	pub name: &'static str,
	/// Native name of the language
	pub native_name: &'static str,
	pub direction: Direction,
}

impl LocaleInfo {
	/// The primary language subtag ("en" for "en-US").
	pub fn primary_language(&self) -> &'static str {
		self.code.split('-').next().unwrap_or(self.code)
	}
}

/// Language active when nothing else is configured.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Languages the console ships translation files for.
pub const LOCALES: &[LocaleInfo] = &[
	LocaleInfo {
		code: "en-US",
		name: "English",
		native_name: "English",
		direction: Direction::Ltr,
	},
	LocaleInfo {
		code: "de-DE",
		name: "German",
		native_name: "Deutsch",
		direction: Direction::Ltr,
	},
];

/// Get metadata for a locale.
pub fn locale_info(locale: &str) -> Option<&'static LocaleInfo> {
	LOCALES.iter().find(|l| l.code == locale)
}

pub fn is_rtl(locale: &str) -> bool {
	locale_info(locale).is_some_and(|info| info.direction == Direction::Rtl)
}

pub fn is_supported(locale: &str) -> bool {
	locale_info(locale).is_some()
}

pub fn available_locales() -> &'static [LocaleInfo] {
	LOCALES
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_locale_info_found() {
		let info = locale_info("de-DE").unwrap();
		assert_eq!(info.native_name, "Deutsch");
		assert_eq!(info.primary_language(), "de");
		assert_eq!(info.direction.as_html_dir(), "ltr");
	}

	#[test]
	fn test_locale_info_not_found() {
		assert!(locale_info("xx").is_none());
		assert!(locale_info("de").is_none());
	}

	#[test]
	fn test_is_supported() {
		assert!(is_supported("en-US"));
		assert!(is_supported("de-DE"));
		assert!(!is_supported("en"));
		assert!(!is_supported(""));
	}

	#[test]
	fn test_no_rtl_console_languages() {
		assert!(available_locales().iter().all(|l| !is_rtl(l.code)));
	}

	#[test]
	fn test_default_locale_is_available() {
		assert!(is_supported(DEFAULT_LOCALE));
	}
}
