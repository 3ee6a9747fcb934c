// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core session and rights model for the zeta console.
//!
//! This crate has no I/O. It provides:
//!
//! - [`SessionInfo`]: the session document returned by the server
//! - [`Session`]: an installed session with its derived server time offset
//!   and start order matchers, built in a single step
//! - [`StartOrderRight`] / [`StartOrderRights`]: right strings of the form
//!   `xprc.xpce.StartOrder:<orderTypeExpr>:<workspaceOrApp>[:<version>]`
//!   parsed into one of three matchers
//! - [`DynamicRights`]: rights granted client-side at runtime
//!
//! # Example
//!
//! ```
//! use zeta_auth_core::{StartOrderRights, START_ORDER_WILDCARD};
//!
//! let rights = StartOrderRights::derive(&[
//!     "xprc.xpce.StartOrder:xact.device.*:MyWorkspace",
//!     START_ORDER_WILDCARD,
//! ]);
//! assert!(rights.allows("xact.device.get", None));
//! assert!(!rights.allows("xact.user.get", None));
//! ```

mod error;
mod rights;
mod session;
mod start_order;
mod types;

pub use error::RightParseError;
pub use rights::{has_right, leading_segment, DynamicRights};
pub use session::{Session, SessionInfo};
pub use start_order::{
	parse_start_order_right, OrderTypeMatcher, StartOrderRight, StartOrderRights,
	START_ORDER_NAMESPACE, START_ORDER_WILDCARD,
};
pub use types::{AuthState, RuntimeContext};
