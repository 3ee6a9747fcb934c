// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Extraction of structured error codes from server messages.
//!
//! Server messages may embed a code such as `EC-XMOM.INVALID.NAME` optionally
//! followed by a bracketed argument list:
//!
//! ```text
//! Saving failed: EC-XMOM.INVALID.NAME [MyType, xmom.types]
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

static ERROR_CODE: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"EC-[A-Za-z0-9]+(?:\.[A-Za-z0-9]+)*").expect("valid error code regex"));

/// An error code and its raw arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ErrorCode<'a> {
	pub code: &'a str,
	pub args: Vec<&'a str>,
}

/// The argument list after a code was opened but never closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UnterminatedArgs;

/// Find the first error code in `message`.
pub(crate) fn extract(message: &str) -> Result<Option<ErrorCode<'_>>, UnterminatedArgs> {
	let Some(found) = ERROR_CODE.find(message) else {
		return Ok(None);
	};

	let rest = message[found.end()..].trim_start();
	let args = match rest.strip_prefix('[') {
		Some(list) => {
			let end = list.find(']').ok_or(UnterminatedArgs)?;
			list[..end]
				.split(',')
				.map(str::trim)
				.filter(|arg| !arg.is_empty())
				.collect()
		}
		None => Vec::new(),
	};

	Ok(Some(ErrorCode {
		code: found.as_str(),
		args,
	}))
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn test_extracts_code_without_args() {
		let found = extract("Something failed: EC-XMOM.NOT.FOUND").unwrap().unwrap();
		assert_eq!(found.code, "EC-XMOM.NOT.FOUND");
		assert!(found.args.is_empty());
	}

	#[test]
	fn test_extracts_code_with_args() {
		let found = extract("EC-XMOM.INVALID.NAME [MyType,  xmom.types ]")
			.unwrap()
			.unwrap();
		assert_eq!(found.code, "EC-XMOM.INVALID.NAME");
		assert_eq!(found.args, vec!["MyType", "xmom.types"]);
	}

	#[test]
	fn test_message_without_code() {
		assert_eq!(extract("plain failure"), Ok(None));
		assert_eq!(extract("EC-"), Ok(None));
	}

	#[test]
	fn test_unterminated_args_are_reported() {
		assert_eq!(extract("EC-A.B [x, y"), Err(UnterminatedArgs));
	}

	#[test]
	fn test_trailing_dot_is_not_part_of_code() {
		let found = extract("failed with EC-A.B.").unwrap().unwrap();
		assert_eq!(found.code, "EC-A.B");
	}

	proptest! {
		#[test]
		fn test_code_is_found_anywhere(prefix in "[a-z ]{0,20}", segments in prop::collection::vec("[A-Z0-9]{1,6}", 1..4)) {
			let code = format!("EC-{}", segments.join("."));
			let message = format!("{prefix} {code}");
			let found = extract(&message).unwrap().unwrap();
			prop_assert_eq!(found.code, code.as_str());
		}
	}
}
