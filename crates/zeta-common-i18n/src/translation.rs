// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Translation records, translation files and parameter substitution.

use serde::{Deserialize, Serialize};

/// A single localized text, identified by its composite key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
	pub key: String,
	pub value: String,
	/// Language the value should be pronounced in by screen readers, if it
	/// differs from the language it is filed under.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub pronunciation_language: Option<String>,
}

impl Translation {
	pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			value: value.into(),
			pronunciation_language: None,
		}
	}

	pub fn with_pronunciation_language(mut self, language: impl Into<String>) -> Self {
		self.pronunciation_language = Some(language.into());
		self
	}
}

/// Build a composite lookup key from its parts.
///
/// ```
/// use zeta_common_i18n::compose_key;
///
/// assert_eq!(compose_key(None, None, "save"), "save");
/// assert_eq!(compose_key(None, Some("xmom.toolbar"), "save"), "xmom.toolbar.save");
/// assert_eq!(compose_key(Some("tooltip"), Some("xmom"), "save"), "tooltip:xmom.save");
/// ```
pub fn compose_key(kind: Option<&str>, context: Option<&str>, key: &str) -> String {
	let mut composed = String::with_capacity(key.len() + 16);
	if let Some(kind) = kind.filter(|k| !k.is_empty()) {
		composed.push_str(kind);
		composed.push(':');
	}
	if let Some(context) = context.filter(|c| !c.is_empty()) {
		composed.push_str(context);
		composed.push('.');
	}
	composed.push_str(key);
	composed
}

/// One record of a translation file, before its key is composed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRecord {
	pub key: String,
	pub value: String,
	#[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
	pub kind: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub context: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub pronunciation_language: Option<String>,
}

impl TranslationRecord {
	pub fn into_translation(self) -> Translation {
		Translation {
			key: compose_key(self.kind.as_deref(), self.context.as_deref(), &self.key),
			value: self.value,
			pronunciation_language: self.pronunciation_language,
		}
	}
}

/// A per-language translation document as shipped with the console assets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationFile {
	#[serde(default)]
	pub translations: Vec<TranslationRecord>,
}

impl TranslationFile {
	pub fn from_json(json: &str) -> crate::Result<Self> {
		Ok(serde_json::from_str(json)?)
	}

	pub fn into_translations(self) -> Vec<Translation> {
		self.translations
			.into_iter()
			.map(TranslationRecord::into_translation)
			.collect()
	}
}

/// A textual placeholder and its replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
	pub key: String,
	pub value: String,
}

impl Param {
	pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			value: value.into(),
		}
	}
}

impl<K: Into<String>, V: Into<String>> From<(K, V)> for Param {
	fn from((key, value): (K, V)) -> Self {
		Self::new(key, value)
	}
}

/// Apply `params` to a copy of `translation`. The input is never modified.
///
/// Placeholders are matched literally; an empty placeholder is ignored.
pub(crate) fn substitute(translation: &Translation, params: &[Param]) -> Translation {
	let mut copy = translation.clone();
	for param in params.iter().filter(|p| !p.key.is_empty()) {
		if copy.value.contains(&param.key) {
			copy.value = copy.value.replace(&param.key, &param.value);
		}
	}
	copy
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_compose_key_skips_empty_parts() {
		assert_eq!(compose_key(Some(""), Some(""), "save"), "save");
		assert_eq!(compose_key(Some("label"), None, "save"), "label:save");
	}

	#[test]
	fn test_record_into_translation_composes_key() {
		let record = TranslationRecord {
			key: "remove".to_string(),
			value: "Entfernen".to_string(),
			kind: Some("tooltip".to_string()),
			context: Some("xmom.dataflow".to_string()),
			pronunciation_language: Some("de-DE".to_string()),
		};
		let translation = record.into_translation();
		assert_eq!(translation.key, "tooltip:xmom.dataflow.remove");
		assert_eq!(translation.value, "Entfernen");
		assert_eq!(translation.pronunciation_language.as_deref(), Some("de-DE"));
	}

	#[test]
	fn test_parses_translation_file() {
		let json = r#"{
			"translations": [
				{ "key": "save", "value": "Speichern" },
				{ "key": "close", "value": "Schließen", "context": "dialog", "type": "button" },
				{ "key": "help", "value": "Help", "pronunciationLanguage": "en-US" }
			]
		}"#;
		let translations = TranslationFile::from_json(json).unwrap().into_translations();
		assert_eq!(translations.len(), 3);
		assert_eq!(translations[0].key, "save");
		assert_eq!(translations[1].key, "button:dialog.close");
		assert_eq!(
			translations[2].pronunciation_language.as_deref(),
			Some("en-US")
		);
	}

	#[test]
	fn test_empty_document_has_no_translations() {
		let file = TranslationFile::from_json("{}").unwrap();
		assert!(file.translations.is_empty());
	}

	#[test]
	fn test_invalid_document_is_an_error() {
		assert!(TranslationFile::from_json("{\"translations\": 5}").is_err());
	}

	#[test]
	fn test_substitute_replaces_every_occurrence() {
		let base = Translation::new("k", "$0 and $0 and $1");
		let result = substitute(&base, &[Param::new("$0", "a"), Param::new("$1", "b")]);
		assert_eq!(result.value, "a and a and b");
		assert_eq!(base.value, "$0 and $0 and $1");
	}

	#[test]
	fn test_substitute_treats_placeholders_literally() {
		let base = Translation::new("k", "cost: (.*) $");
		let result = substitute(&base, &[Param::new("(.*)", "5"), Param::new("$", "EUR")]);
		assert_eq!(result.value, "cost: 5 EUR");
	}

	#[test]
	fn test_substitute_ignores_empty_placeholder() {
		let base = Translation::new("k", "abc");
		let result = substitute(&base, &[Param::new("", "x")]);
		assert_eq!(result.value, "abc");
	}

	#[test]
	fn test_param_from_tuple() {
		let param: Param = ("$0", "World").into();
		assert_eq!(param, Param::new("$0", "World"));
	}
}
