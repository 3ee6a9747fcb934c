// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Session info as returned by the server and the installed session snapshot.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::rights::has_right;
use crate::start_order::StartOrderRights;
use crate::types::RuntimeContext;

/// Session document returned by login and `auth/info`.
///
/// Timestamps are epoch milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
	pub username: String,
	#[serde(default)]
	pub role: String,
	#[serde(default)]
	pub rights: Vec<String>,
	#[serde(default)]
	pub session_id: String,
	#[serde(default)]
	pub start_time: i64,
	#[serde(default)]
	pub last_interaction: i64,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub server_time: Option<i64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub server_id: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub xyna_version: Option<String>,
}

impl SessionInfo {
	pub fn start_time(&self) -> Option<DateTime<Utc>> {
		DateTime::from_timestamp_millis(self.start_time)
	}

	pub fn last_interaction(&self) -> Option<DateTime<Utc>> {
		DateTime::from_timestamp_millis(self.last_interaction)
	}
}

/// An installed session.
///
/// The server time offset and the start order matchers are derived when the
/// session is built and never change afterwards. Replacing the session means
/// building a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
	info: SessionInfo,
	server_time_offset: Duration,
	start_order_rights: StartOrderRights,
}

impl Session {
	/// Install `info` using the current client clock.
	pub fn new(info: SessionInfo) -> Self {
		Self::at(info, Utc::now())
	}

	/// Install `info` as if received at `client_now`.
	///
	/// Without a server time the clocks are assumed to agree.
	pub fn at(info: SessionInfo, client_now: DateTime<Utc>) -> Self {
		let server_time_offset = info
			.server_time
			.and_then(|server_time| {
				Duration::try_milliseconds(server_time.saturating_sub(client_now.timestamp_millis()))
			})
			.unwrap_or_else(Duration::zero);
		let start_order_rights = StartOrderRights::derive(&info.rights);
		Self {
			info,
			server_time_offset,
			start_order_rights,
		}
	}

	pub fn info(&self) -> &SessionInfo {
		&self.info
	}

	pub fn username(&self) -> &str {
		&self.info.username
	}

	pub fn role(&self) -> &str {
		&self.info.role
	}

	pub fn rights(&self) -> &[String] {
		&self.info.rights
	}

	pub fn session_id(&self) -> &str {
		&self.info.session_id
	}

	/// `serverTime - clientTime` at install time.
	pub fn server_time_offset(&self) -> Duration {
		self.server_time_offset
	}

	/// Current time on the server clock.
	pub fn server_now(&self) -> DateTime<Utc> {
		self.server_time_at(Utc::now())
	}

	/// Server clock reading for a given client time.
	pub fn server_time_at(&self, client_now: DateTime<Utc>) -> DateTime<Utc> {
		client_now
			.checked_add_signed(self.server_time_offset)
			.unwrap_or(client_now)
	}

	pub fn start_order_rights(&self) -> &StartOrderRights {
		&self.start_order_rights
	}

	/// Plain right check against the server-issued rights. Dynamic rights
	/// are tracked by the session client.
	pub fn has_right(&self, right: &str) -> bool {
		has_right(&self.info.rights, right)
	}

	pub fn has_start_order_right(&self, order_type: &str, scope: Option<&RuntimeContext>) -> bool {
		self.start_order_rights.allows(order_type, scope)
	}
}
