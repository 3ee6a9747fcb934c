// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Session client for the zeta console.
//!
//! [`SessionClient`] talks to the server's `auth/*` endpoints and holds the
//! installed [`Session`]:
//!
//! - login variants (`login`, `smart_card_login`, `shared_login`) install
//!   the returned session info and emit [`SessionEvent::Login`]
//! - `logout` clears it and emits [`SessionEvent::Logout`]
//! - any authenticated request answered with 401 clears the session and emits
//!   [`SessionEvent::AuthenticationRequired`]; a 403 emits
//!   [`SessionEvent::InsufficientRights`] and keeps the session
//! - a hidden to visible [`Visibility`] transition re-fetches the session info
//!
//! The current session is published with replay through
//! [`SessionClient::subscribe_session`]; events are fire-once through
//! [`SessionClient::subscribe_events`].

mod client;
mod credentials;
mod error;
mod events;

pub use client::{SessionClient, SessionClientBuilder, SESSION_EXISTS_ERROR_CODE};
pub use credentials::{
	ChangePasswordRequest, ExternalLoginRequest, ExternalUserLoginInformation, LoginRequest,
	Password, SharedLoginRequest, REDACTED,
};
pub use error::{AuthError, Result};
pub use events::{SessionEvent, Visibility};

pub use zeta_auth_core::{AuthState, RuntimeContext, Session, SessionInfo};
