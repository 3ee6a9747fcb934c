// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Loading translation files over HTTP.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zeta_common_i18n::{HttpTranslationSource, I18nError, I18nService, TranslationSource};

#[tokio::test]
async fn test_loads_translation_file_from_assets() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path("/assets/i18n/de-DE.json"))
		.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
			"translations": [
				{ "key": "save", "value": "Speichern" },
				{ "key": "remove", "value": "Entfernen", "type": "tooltip", "context": "xmom" }
			]
		})))
		.expect(1)
		.mount(&server)
		.await;

	let source = HttpTranslationSource::new(server.uri()).unwrap();
	let service = I18nService::default();
	service.set_language("de-DE");

	let count = service.load(&source, "de-DE").await.unwrap();

	assert_eq!(count, 2);
	assert_eq!(service.translate("save", &[]).unwrap(), "Speichern");
	assert_eq!(
		service.translate("tooltip:xmom.remove", &[]).unwrap(),
		"Entfernen"
	);
}

#[tokio::test]
async fn test_missing_asset_reports_status() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.respond_with(ResponseTemplate::new(404))
		.mount(&server)
		.await;

	let source = HttpTranslationSource::new(server.uri()).unwrap();
	let err = source.fetch("fr-FR").await.unwrap_err();

	assert!(matches!(err, I18nError::SourceStatus { status: 404, .. }));
}

#[tokio::test]
async fn test_malformed_asset_is_a_parse_error() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path("/static/lang/en-US.json"))
		.respond_with(ResponseTemplate::new(200).set_body_string("not json"))
		.mount(&server)
		.await;

	let source = HttpTranslationSource::new(server.uri())
		.unwrap()
		.asset_path("static/lang");
	let service = I18nService::default();

	let err = service.load(&source, "en-US").await.unwrap_err();

	assert!(matches!(err, I18nError::Parse(_)));
	assert!(!service.has_translation("save"));
}
