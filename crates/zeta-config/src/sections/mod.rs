// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections.

mod auth;
mod i18n;
mod logging;

pub use auth::{
	AuthClientConfig, AuthConfigLayer, DEFAULT_CSRF_HEADER, DEFAULT_LOGIN_PATH,
	DEFAULT_REQUEST_TIMEOUT_SECS,
};
pub use i18n::{I18nConfig, I18nConfigLayer};
pub use logging::{LogFormat, LoggingConfig, LoggingConfigLayer};
