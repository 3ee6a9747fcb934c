// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Plain right checks and client-side dynamic rights.

use std::collections::HashSet;

/// Everything up to the first `:`.
pub fn leading_segment(right: &str) -> &str {
	right.split_once(':').map_or(right, |(head, _)| head)
}

/// Whether `right` is held by a session with `session_rights`.
///
/// Only leading segments are compared, so `xmcp.xfm.Read:*` is held when the
/// session carries `xmcp.xfm.Read` and vice versa.
pub fn has_right<S: AsRef<str>>(session_rights: &[S], right: &str) -> bool {
	let wanted = leading_segment(right);
	session_rights
		.iter()
		.any(|held| leading_segment(held.as_ref()) == wanted)
}

/// Rights granted at runtime outside the server-issued rights list.
///
/// Independent of the session: logging out does not clear them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DynamicRights {
	rights: HashSet<String>,
}

impl DynamicRights {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns `true` if the right was not present yet.
	pub fn add(&mut self, right: impl Into<String>) -> bool {
		self.rights.insert(right.into())
	}

	/// Returns `true` if the right was present.
	pub fn delete(&mut self, right: &str) -> bool {
		self.rights.remove(right)
	}

	pub fn clear(&mut self) {
		self.rights.clear();
	}

	pub fn contains(&self, right: &str) -> bool {
		self.rights.contains(right)
	}

	pub fn len(&self) -> usize {
		self.rights.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rights.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.rights.iter().map(String::as_str)
	}
}

impl<S: Into<String>> FromIterator<S> for DynamicRights {
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		Self {
			rights: iter.into_iter().map(Into::into).collect(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn test_leading_segment_stops_at_first_colon() {
		assert_eq!(leading_segment("a.b:c:d"), "a.b");
		assert_eq!(leading_segment("a.b"), "a.b");
		assert_eq!(leading_segment(":x"), "");
	}

	#[test]
	fn test_has_right_compares_leading_segments() {
		let rights = ["xmcp.xfm.Read:*", "xfmg.xfctrl.Deploy"];
		assert!(has_right(&rights, "xmcp.xfm.Read"));
		assert!(has_right(&rights, "xfmg.xfctrl.Deploy:ws"));
		assert!(!has_right(&rights, "xmcp.xfm"));
		assert!(!has_right(&rights, "xmcp.xfm.ReadWrite"));
	}

	#[test]
	fn test_has_right_on_empty_list() {
		assert!(!has_right::<&str>(&[], "anything"));
	}

	#[test]
	fn test_dynamic_rights_lifecycle() {
		let mut dynamic = DynamicRights::new();
		assert!(dynamic.add("feature.beta"));
		assert!(!dynamic.add("feature.beta"));
		assert!(dynamic.contains("feature.beta"));
		assert_eq!(dynamic.len(), 1);

		assert!(dynamic.delete("feature.beta"));
		assert!(!dynamic.delete("feature.beta"));
		assert!(dynamic.is_empty());

		let mut dynamic: DynamicRights = ["a", "b"].into_iter().collect();
		dynamic.clear();
		assert!(dynamic.is_empty());
	}

	proptest! {
		#[test]
		fn test_right_holds_itself_with_any_suffix(
			head in "[a-zA-Z.]{1,20}",
			suffix in "(:[a-zA-Z*.]{0,8}){0,3}",
		) {
			let held = [format!("{head}{suffix}")];
			prop_assert!(has_right(&held, &head));
		}
	}
}
