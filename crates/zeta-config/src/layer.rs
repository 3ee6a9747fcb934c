// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration layer for merging from multiple sources.

use serde::Deserialize;

use crate::sections::{AuthConfigLayer, I18nConfigLayer, LoggingConfigLayer};

/// Console configuration layer - all fields are Option for merging.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ZetaConfigLayer {
	#[serde(default)]
	pub i18n: Option<I18nConfigLayer>,
	#[serde(default)]
	pub auth: Option<AuthConfigLayer>,
	#[serde(default)]
	pub logging: Option<LoggingConfigLayer>,
}

impl ZetaConfigLayer {
	/// Merge another layer into this one. Other layer takes precedence.
	pub fn merge(&mut self, other: ZetaConfigLayer) {
		merge_option(&mut self.i18n, other.i18n, I18nConfigLayer::merge);
		merge_option(&mut self.auth, other.auth, AuthConfigLayer::merge);
		merge_option(&mut self.logging, other.logging, LoggingConfigLayer::merge);
	}
}

fn merge_option<T, F>(target: &mut Option<T>, source: Option<T>, merge_fn: F)
where
	F: FnOnce(&mut T, T),
{
	match (target.as_mut(), source) {
		(Some(t), Some(s)) => merge_fn(t, s),
		(None, Some(s)) => *target = Some(s),
		_ => {}
	}
}
