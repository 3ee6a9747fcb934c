// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Start order rights.
//!
//! A start order right grants starting orders of matching order types within
//! one runtime context:
//!
//! ```text
//! xprc.xpce.StartOrder:<orderTypeExpr>:<workspace>
//! xprc.xpce.StartOrder:<orderTypeExpr>:<application>:<version>
//! ```
//!
//! `<orderTypeExpr>` is one of:
//!
//! | Syntax        | Matcher                                     |
//! |---------------|---------------------------------------------|
//! | `/pattern/`   | [`OrderTypeMatcher::Regex`] (unanchored)    |
//! | `[a,b,c]`     | [`OrderTypeMatcher::OptionSet`]             |
//! | `prefix.*`    | [`OrderTypeMatcher::PrefixString`]          |

use regex::Regex;
use tracing::debug;

use crate::error::RightParseError;
use crate::types::RuntimeContext;

/// Namespace of start order rights.
pub const START_ORDER_NAMESPACE: &str = "xprc.xpce.StartOrder";

/// Right that allows every order type while no start order right is present.
pub const START_ORDER_WILDCARD: &str = "START_ORDER";

/// How an order type is matched.
#[derive(Debug, Clone)]
pub enum OrderTypeMatcher {
	Regex(Regex),
	OptionSet(Vec<String>),
	PrefixString(String),
}

impl OrderTypeMatcher {
	/// Parse an order type expression.
	pub fn parse(expr: &str) -> Result<Self, RightParseError> {
		if let Some(pattern) = expr
			.strip_prefix('/')
			.and_then(|rest| rest.strip_suffix('/'))
		{
			return Regex::new(pattern)
				.map(OrderTypeMatcher::Regex)
				.map_err(|source| RightParseError::InvalidPattern {
					pattern: pattern.to_string(),
					source,
				});
		}

		if let Some(list) = expr
			.strip_prefix('[')
			.and_then(|rest| rest.strip_suffix(']'))
		{
			let options: Vec<String> = list
				.split(',')
				.map(str::trim)
				.filter(|option| !option.is_empty())
				.map(str::to_string)
				.collect();
			if options.is_empty() {
				return Err(RightParseError::UnsupportedExpression(expr.to_string()));
			}
			return Ok(OrderTypeMatcher::OptionSet(options));
		}

		if let Some(prefix) = expr.strip_suffix('*') {
			return Ok(OrderTypeMatcher::PrefixString(prefix.to_string()));
		}

		Err(RightParseError::UnsupportedExpression(expr.to_string()))
	}

	pub fn matches(&self, order_type: &str) -> bool {
		match self {
			OrderTypeMatcher::Regex(regex) => regex.is_match(order_type),
			OrderTypeMatcher::OptionSet(options) => options.iter().any(|o| o == order_type),
			OrderTypeMatcher::PrefixString(prefix) => order_type.starts_with(prefix.as_str()),
		}
	}
}

impl PartialEq for OrderTypeMatcher {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(OrderTypeMatcher::Regex(a), OrderTypeMatcher::Regex(b)) => a.as_str() == b.as_str(),
			(OrderTypeMatcher::OptionSet(a), OrderTypeMatcher::OptionSet(b)) => a == b,
			(OrderTypeMatcher::PrefixString(a), OrderTypeMatcher::PrefixString(b)) => a == b,
			_ => false,
		}
	}
}

impl Eq for OrderTypeMatcher {}

/// One parsed start order right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartOrderRight {
	scope: RuntimeContext,
	matcher: OrderTypeMatcher,
}

impl StartOrderRight {
	pub fn new(scope: RuntimeContext, matcher: OrderTypeMatcher) -> Self {
		Self { scope, matcher }
	}

	pub fn scope(&self) -> &RuntimeContext {
		&self.scope
	}

	pub fn matcher(&self) -> &OrderTypeMatcher {
		&self.matcher
	}

	/// Whether `order_type` is covered. A given `scope` must equal the
	/// right's own scope.
	pub fn matches(&self, order_type: &str, scope: Option<&RuntimeContext>) -> bool {
		if scope.is_some_and(|scope| *scope != self.scope) {
			return false;
		}
		self.matcher.matches(order_type)
	}
}

/// Parse a single right string into a [`StartOrderRight`].
pub fn parse_start_order_right(right: &str) -> Result<StartOrderRight, RightParseError> {
	let rest = match right.strip_prefix(START_ORDER_NAMESPACE) {
		Some("") => return Err(RightParseError::TooFewFields(right.to_string())),
		Some(rest) => rest
			.strip_prefix(':')
			.ok_or_else(|| RightParseError::NotStartOrderRight(right.to_string()))?,
		None => return Err(RightParseError::NotStartOrderRight(right.to_string())),
	};

	let (expr, scope) = split_expression(rest)
		.ok_or_else(|| RightParseError::TooFewFields(right.to_string()))?;
	let scope = parse_scope(scope).ok_or_else(|| RightParseError::MalformedScope(right.to_string()))?;
	let matcher = OrderTypeMatcher::parse(expr)?;

	Ok(StartOrderRight { scope, matcher })
}

/// Split `<orderTypeExpr>:<scope>`. A regex may itself contain `:`, so it
/// ends at the last `/:`.
fn split_expression(rest: &str) -> Option<(&str, &str)> {
	if rest.starts_with('/') {
		let end = rest.rfind("/:").filter(|&index| index > 0)?;
		return Some((&rest[..=end], &rest[end + 2..]));
	}
	rest.split_once(':')
}

fn parse_scope(scope: &str) -> Option<RuntimeContext> {
	let mut fields = scope.split(':');
	let name = fields.next().filter(|name| !name.is_empty())?;
	let version = fields.next();
	if fields.next().is_some() {
		return None;
	}
	match version {
		None => Some(RuntimeContext::workspace(name)),
		Some(version) if !version.is_empty() => Some(RuntimeContext::application(name, version)),
		Some(_) => None,
	}
}

/// The start order matchers derived from a session's rights list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartOrderRights {
	fallback_allow: bool,
	rights: Vec<StartOrderRight>,
}

impl StartOrderRights {
	/// Derive matchers from raw right strings. Malformed start order rights
	/// are skipped.
	pub fn derive<S: AsRef<str>>(rights: &[S]) -> Self {
		let mut derived = Self::default();

		for right in rights.iter().map(AsRef::as_ref) {
			if right == START_ORDER_WILDCARD {
				derived.fallback_allow = true;
				continue;
			}
			if !right.starts_with(START_ORDER_NAMESPACE) {
				continue;
			}
			match parse_start_order_right(right) {
				Ok(parsed) => derived.rights.push(parsed),
				Err(e) => debug!(right, error = %e, "skipping malformed start order right"),
			}
		}

		derived
	}

	/// Whether starting `order_type` (optionally within `scope`) is allowed.
	///
	/// The wildcard right only applies while no matcher exists.
	pub fn allows(&self, order_type: &str, scope: Option<&RuntimeContext>) -> bool {
		if self.rights.is_empty() {
			return self.fallback_allow;
		}
		self.rights
			.iter()
			.any(|right| right.matches(order_type, scope))
	}

	pub fn fallback_allow(&self) -> bool {
		self.fallback_allow
	}

	pub fn len(&self) -> usize {
		self.rights.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rights.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &StartOrderRight> {
		self.rights.iter()
	}
}
