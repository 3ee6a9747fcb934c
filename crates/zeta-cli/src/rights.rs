// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `zeta rights check`: evaluate a start order against a rights list offline.

use zeta_auth_core::{RuntimeContext, StartOrderRights};

/// Outcome of a start order check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
	/// A start order right matched.
	Matched { right: String },
	/// Allowed by the wildcard right because no start order right exists.
	Wildcard,
	Denied,
}

impl Decision {
	pub fn is_allowed(&self) -> bool {
		!matches!(self, Decision::Denied)
	}

	pub fn describe(&self, order_type: &str) -> String {
		match self {
			Decision::Matched { right } => format!("allowed: {order_type} (matched {right})"),
			Decision::Wildcard => format!("allowed: {order_type} (wildcard)"),
			Decision::Denied => format!("denied: {order_type}"),
		}
	}
}

pub fn scope_from_args(
	workspace: Option<String>,
	application: Option<String>,
	version: Option<String>,
) -> Option<RuntimeContext> {
	match (workspace, application, version) {
		(Some(name), _, _) => Some(RuntimeContext::workspace(name)),
		(None, Some(name), Some(version)) => Some(RuntimeContext::application(name, version)),
		_ => None,
	}
}

pub fn check(rights: &[String], order_type: &str, scope: Option<&RuntimeContext>) -> Decision {
	let derived = StartOrderRights::derive(rights);
	if !derived.allows(order_type, scope) {
		return Decision::Denied;
	}
	if derived.is_empty() {
		return Decision::Wildcard;
	}

	// Report the raw right string that produced the first matching matcher.
	let matched = rights
		.iter()
		.find(|raw| {
			zeta_auth_core::parse_start_order_right(raw)
				.is_ok_and(|right| right.matches(order_type, scope))
		})
		.cloned()
		.unwrap_or_default();
	Decision::Matched { right: matched }
}

#[cfg(test)]
mod tests {
	use super::*;

	fn rights(raw: &[&str]) -> Vec<String> {
		raw.iter().map(|r| r.to_string()).collect()
	}

	#[test]
	fn test_prefix_match_reports_right() {
		let rights = rights(&[
			"xprc.xpce.StartOrder:xact.device.*:MyWorkspace",
			"START_ORDER",
		]);
		let decision = check(&rights, "xact.device.get", None);
		assert_eq!(
			decision,
			Decision::Matched {
				right: "xprc.xpce.StartOrder:xact.device.*:MyWorkspace".to_string()
			}
		);
		assert!(!check(&rights, "xact.user.get", None).is_allowed());
	}

	#[test]
	fn test_wildcard_only() {
		let decision = check(&rights(&["START_ORDER"]), "anything", None);
		assert_eq!(decision, Decision::Wildcard);
		assert_eq!(decision.describe("anything"), "allowed: anything (wildcard)");
	}

	#[test]
	fn test_scope_mismatch_is_denied() {
		let rights = rights(&["xprc.xpce.StartOrder:[a.B]:Base:1.0"]);
		let scope = scope_from_args(None, Some("Base".to_string()), Some("2.0".to_string()));
		assert_eq!(check(&rights, "a.B", scope.as_ref()), Decision::Denied);
	}

	#[test]
	fn test_scope_from_args() {
		assert_eq!(
			scope_from_args(Some("ws".to_string()), None, None),
			Some(RuntimeContext::workspace("ws"))
		);
		assert_eq!(scope_from_args(None, Some("app".to_string()), None), None);
	}
}
