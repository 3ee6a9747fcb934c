// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use zeta_common_i18n::{available_locales, resolve_locale, DEFAULT_LOCALE};

/// The console language for this user: the operating system locale when it
/// is supported, otherwise `configured`.
pub fn detect_language(configured: &str) -> String {
	let system_locale = sys_locale::get_locale();
	match system_locale.as_deref() {
		Some(locale) if resolves(locale) => resolve_locale(Some(locale), configured).to_string(),
		_ => configured.to_string(),
	}
}

fn resolves(locale: &str) -> bool {
	let primary = locale.split(['_', '-']).next().unwrap_or(locale);
	available_locales()
		.iter()
		.any(|info| info.primary_language().eq_ignore_ascii_case(primary))
}

/// One line per supported locale, the default marked with `*`.
pub fn describe_locales() -> Vec<String> {
	available_locales()
		.iter()
		.map(|info| {
			let marker = if info.code == DEFAULT_LOCALE { "*" } else { " " };
			format!(
				"{marker} {:<6} {} ({}, {})",
				info.code,
				info.name,
				info.native_name,
				info.direction.as_html_dir()
			)
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_detect_language_is_never_empty() {
		assert!(!detect_language("en-US").is_empty());
	}

	#[test]
	fn test_resolves_by_primary_subtag() {
		assert!(resolves("de_AT"));
		assert!(resolves("EN"));
		assert!(!resolves("fr-FR"));
	}

	#[test]
	fn test_describe_locales_marks_default() {
		let lines = describe_locales();
		assert_eq!(lines.len(), available_locales().len());
		assert!(lines.iter().any(|line| line.starts_with("* en-US")));
	}
}
