// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `zeta session info|login|logout`.

use anyhow::{bail, Context, Result};
use tracing::info;
use zeta_auth::{AuthError, LoginRequest, Password, Session, SessionClient};
use zeta_config::AuthClientConfig;

/// Environment variable the login password is read from.
pub const PASSWORD_ENV: &str = "ZETA_PASSWORD";

pub fn client(config: &AuthClientConfig) -> Result<SessionClient> {
	if config.base_url.is_none() {
		bail!("no server configured: set auth.base_url or ZETA_AUTH_BASE_URL");
	}
	SessionClient::from_config(config).context("failed to create session client")
}

pub fn password_from_env() -> Result<Password> {
	let password = std::env::var(PASSWORD_ENV)
		.with_context(|| format!("{PASSWORD_ENV} is not set"))?;
	Ok(Password::new(password))
}

pub async fn login(client: &SessionClient, username: &str, force: bool) -> Result<String> {
	let mut request = LoginRequest::new(username, password_from_env()?);
	if force {
		request = request.forced();
	}

	match client.login(&request).await {
		Ok(session) => Ok(describe(&session)),
		Err(AuthError::SessionExists) => {
			bail!("a session already exists for {username}; rerun with --force to take it over")
		}
		Err(e) => Err(e).context("login failed"),
	}
}

pub async fn info(client: &SessionClient) -> Result<String> {
	match client.refresh_session_info().await {
		Ok(Some(session)) => Ok(describe(&session)),
		Ok(None) | Err(AuthError::Unauthorized) => Ok("not authenticated".to_string()),
		Err(e) => Err(e).context("failed to fetch session info"),
	}
}

pub async fn logout(client: &SessionClient) -> Result<String> {
	client.logout().await.context("logout failed")?;
	info!("session closed");
	Ok("logged out".to_string())
}

pub fn describe(session: &Session) -> String {
	let info = session.info();
	let mut lines = vec![
		format!("user:        {}", session.username()),
		format!("role:        {}", session.role()),
		format!("session:     {}", session.session_id()),
		format!("rights:      {}", session.rights().len()),
		format!(
			"start order: {} matcher(s){}",
			session.start_order_rights().len(),
			if session.start_order_rights().fallback_allow() {
				", wildcard"
			} else {
				""
			}
		),
		format!(
			"clock skew:  {} ms",
			session.server_time_offset().num_milliseconds()
		),
	];
	if let Some(version) = &info.xyna_version {
		lines.push(format!("version:     {version}"));
	}
	if let Some(server_id) = &info.server_id {
		lines.push(format!("server:      {server_id}"));
	}
	lines.join("\n")
}
