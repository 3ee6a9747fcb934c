// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Session client for the console's `auth/*` endpoints.

use std::sync::Arc;
use std::time::Duration;

use http::{HeaderName, Method, StatusCode};
use parking_lot::{Mutex, RwLock};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, watch};
use tracing::{debug, error, info, instrument, trace, warn};
use url::Url;
use zeta_auth_core::{AuthState, DynamicRights, RuntimeContext, Session, SessionInfo};
use zeta_config::{AuthClientConfig, DEFAULT_CSRF_HEADER, DEFAULT_LOGIN_PATH};

use crate::credentials::{
	ChangePasswordRequest, ExternalLoginRequest, ExternalUserLoginInformation, LoginRequest,
	SharedLoginRequest,
};
use crate::error::{AuthError, Result};
use crate::events::{SessionEvent, Visibility};

/// Error code the server answers with when the user already has a session.
pub const SESSION_EXISTS_ERROR_CODE: &str = "XYNA-SESSION-EXISTS";

const EVENT_CHANNEL_CAPACITY: usize = 64;

const INFO_PATH: &str = "auth/info";
const LOGIN_PATH: &str = "auth/login";
const EXTERNAL_LOGIN_PATH: &str = "auth/externalUserLogin";
const SHARED_LOGIN_PATH: &str = "auth/sharedlogin";
const LOGOUT_PATH: &str = "auth/logout";
const CHANGE_PASSWORD_PATH: &str = "auth/changepassword";
const EXTERNAL_LOGIN_INFORMATION_PATH: &str = "auth/externalUserLoginInformation";

/// Builder for constructing a SessionClient.
pub struct SessionClientBuilder {
	base_url: Option<String>,
	request_timeout: Duration,
	csrf_header: String,
	login_path: String,
}

impl SessionClientBuilder {
	/// Creates a new builder with default settings.
	pub fn new() -> Self {
		Self {
			base_url: None,
			request_timeout: Duration::from_secs(30),
			csrf_header: DEFAULT_CSRF_HEADER.to_string(),
			login_path: DEFAULT_LOGIN_PATH.to_string(),
		}
	}

	/// Sets the server base URL the `auth/*` paths are resolved against.
	///
	/// Example: `https://factory.example.com/XynaBlackEdition`
	pub fn base_url(mut self, url: impl Into<String>) -> Self {
		self.base_url = Some(url.into());
		self
	}

	/// Sets the HTTP request timeout.
	pub fn request_timeout(mut self, timeout: Duration) -> Self {
		self.request_timeout = timeout;
		self
	}

	/// Sets the header the CSRF token is read from and sent in.
	pub fn csrf_header(mut self, header: impl Into<String>) -> Self {
		self.csrf_header = header.into();
		self
	}

	/// Sets the console login entry point used for re-authentication.
	pub fn login_path(mut self, path: impl Into<String>) -> Self {
		self.login_path = path.into();
		self
	}

	/// Builds the SessionClient.
	pub fn build(self) -> Result<SessionClient> {
		let base_url = self.base_url.ok_or(AuthError::InvalidBaseUrl)?;
		let base_url = base_url.trim_end_matches('/').to_string();

		let parsed = Url::parse(&base_url).map_err(|_| AuthError::InvalidBaseUrl)?;
		if !matches!(parsed.scheme(), "http" | "https") {
			return Err(AuthError::InvalidBaseUrl);
		}

		let csrf_header = HeaderName::from_bytes(self.csrf_header.as_bytes())
			.map_err(|_| AuthError::InvalidHeaderName(self.csrf_header.clone()))?;

		let http_client = Client::builder()
			.timeout(self.request_timeout)
			.build()
			.map_err(AuthError::RequestFailed)?;

		let (session, _) = watch::channel(None);
		let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

		let inner = Arc::new(SessionClientInner {
			base_url: base_url.clone(),
			login_path: self.login_path,
			csrf_header,
			http_client,
			session,
			events,
			csrf_token: Mutex::new(None),
			dynamic_rights: RwLock::new(DynamicRights::new()),
			visibility: Mutex::new(Visibility::Visible),
		});

		info!(base_url = %base_url, "Session client initialized");

		Ok(SessionClient { inner })
	}
}

impl Default for SessionClientBuilder {
	fn default() -> Self {
		Self::new()
	}
}

/// Internal client state.
struct SessionClientInner {
	base_url: String,
	login_path: String,
	csrf_header: HeaderName,
	http_client: Client,
	session: watch::Sender<Option<Arc<Session>>>,
	events: broadcast::Sender<SessionEvent>,
	csrf_token: Mutex<Option<String>>,
	dynamic_rights: RwLock<DynamicRights>,
	visibility: Mutex<Visibility>,
}

/// Client holding the console session.
///
/// The installed [`Session`] is replaced in a single step, so the derived
/// start order matchers always belong to the rights that are visible through
/// the same snapshot. Observers are notified only after the replacement.
///
/// Dropping a returned future before it completes leaves the session
/// untouched.
///
/// # Example
///
/// ```no_run
/// use zeta_auth::{AuthError, LoginRequest, SessionClient};
///
/// # async fn run() -> Result<(), AuthError> {
/// let client = SessionClient::builder()
///     .base_url("https://factory.example.com/XynaBlackEdition")
///     .build()?;
///
/// let request = LoginRequest::new("admin", "secret");
/// let session = match client.login(&request).await {
///     Err(AuthError::SessionExists) => client.login(&request.clone().forced()).await?,
///     other => other?,
/// };
///
/// if client.has_start_order_right("xact.device.get", None) {
///     println!("{} may start xact.device.get", session.username());
/// }
///
/// client.logout().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SessionClient {
	inner: Arc<SessionClientInner>,
}

impl std::fmt::Debug for SessionClient {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SessionClient").finish_non_exhaustive()
	}
}

impl SessionClient {
	/// Creates a new builder for constructing a SessionClient.
	pub fn builder() -> SessionClientBuilder {
		SessionClientBuilder::new()
	}

	/// Builds a client from the `[auth]` configuration section.
	pub fn from_config(config: &AuthClientConfig) -> Result<Self> {
		let base_url = config.base_url.clone().ok_or(AuthError::InvalidBaseUrl)?;
		SessionClientBuilder::new()
			.base_url(base_url)
			.request_timeout(config.request_timeout)
			.csrf_header(config.csrf_header.clone())
			.login_path(config.login_path.clone())
			.build()
	}

	pub fn base_url(&self) -> &str {
		&self.inner.base_url
	}

	// ------------------------------------------------------------------
	// Session state
	// ------------------------------------------------------------------

	/// The installed session, if any.
	pub fn session(&self) -> Option<Arc<Session>> {
		self.inner.session.borrow().clone()
	}

	pub fn is_authenticated(&self) -> bool {
		self.inner.session.borrow().is_some()
	}

	pub fn auth_state(&self) -> AuthState {
		if self.is_authenticated() {
			AuthState::Authenticated
		} else {
			AuthState::Unauthenticated
		}
	}

	/// Current session with replay: the receiver starts at the installed value.
	pub fn subscribe_session(&self) -> watch::Receiver<Option<Arc<Session>>> {
		self.inner.session.subscribe()
	}

	/// Fire-once session events sent after this call.
	pub fn subscribe_events(&self) -> broadcast::Receiver<SessionEvent> {
		self.inner.events.subscribe()
	}

	// ------------------------------------------------------------------
	// Rights
	// ------------------------------------------------------------------

	/// Whether the session or the dynamic rights hold `right`.
	pub fn has_right(&self, right: &str) -> bool {
		let held_by_session = self
			.session()
			.is_some_and(|session| session.has_right(right));
		held_by_session || self.inner.dynamic_rights.read().contains(right)
	}

	/// Whether the session may start `order_type`, optionally within `scope`.
	pub fn has_start_order_right(&self, order_type: &str, scope: Option<&RuntimeContext>) -> bool {
		self.session()
			.is_some_and(|session| session.has_start_order_right(order_type, scope))
	}

	pub fn add_dynamic_right(&self, right: impl Into<String>) {
		let right = right.into();
		debug!(right = %right, "adding dynamic right");
		self.inner.dynamic_rights.write().add(right);
	}

	pub fn delete_dynamic_right(&self, right: &str) {
		debug!(right, "deleting dynamic right");
		self.inner.dynamic_rights.write().delete(right);
	}

	pub fn clear_dynamic_rights(&self) {
		debug!("clearing dynamic rights");
		self.inner.dynamic_rights.write().clear();
	}

	pub fn dynamic_rights(&self) -> Vec<String> {
		let mut rights: Vec<String> = self
			.inner
			.dynamic_rights
			.read()
			.iter()
			.map(str::to_string)
			.collect();
		rights.sort();
		rights
	}

	// ------------------------------------------------------------------
	// Lifecycle
	// ------------------------------------------------------------------

	/// Username/password login.
	///
	/// Fails with [`AuthError::SessionExists`] when the user already holds a
	/// session; resubmit with [`LoginRequest::forced`] to take it over.
	#[instrument(skip_all, fields(username = %request.username, force = request.force))]
	pub async fn login(&self, request: &LoginRequest) -> Result<Arc<Session>> {
		let response = self
			.send(Method::POST, LOGIN_PATH, Some(&request.payload()))
			.await?;
		self.complete_login(response).await
	}

	/// Smart card / external user login.
	#[instrument(skip_all, fields(domain = ?request.domain, force = request.force))]
	pub async fn smart_card_login(&self, request: &ExternalLoginRequest) -> Result<Arc<Session>> {
		let response = self
			.send(Method::POST, EXTERNAL_LOGIN_PATH, Some(request))
			.await?;
		self.complete_login(response).await
	}

	/// Join a session shared by another console.
	#[instrument(skip_all, fields(username = %request.username, force = request.force))]
	pub async fn shared_login(&self, request: &SharedLoginRequest) -> Result<Arc<Session>> {
		let response = self
			.send(Method::POST, SHARED_LOGIN_PATH, Some(request))
			.await?;
		self.complete_login(response).await
	}

	/// Log out on the server, then clear the local session.
	///
	/// The local session is cleared even when the server rejects the request.
	#[instrument(skip_all)]
	pub async fn logout(&self) -> Result<()> {
		let outcome = match self.send(Method::POST, LOGOUT_PATH, None::<&()>).await {
			Ok(response)
				if response.status().is_success()
					|| response.status() == StatusCode::UNAUTHORIZED =>
			{
				Ok(())
			}
			Ok(response) => Err(server_error(response, "logout").await),
			Err(e) => Err(e),
		};

		if self.clear_session() {
			info!("Logged out");
			self.emit(SessionEvent::Logout);
		}

		outcome
	}

	/// Re-fetch the session info.
	///
	/// An empty answer means the server dropped the session: the local
	/// session is cleared and `Ok(None)` is returned.
	#[instrument(skip_all)]
	pub async fn refresh_session_info(&self) -> Result<Option<Arc<Session>>> {
		let response = self.send(Method::GET, INFO_PATH, None::<&()>).await?;
		let response = self.intercept(response, INFO_PATH).await?;

		let csrf_token = self.csrf_from(&response);
		let body = response.bytes().await?;
		let info = parse_session_info(&body)?;

		match info {
			Some(info) => {
				if csrf_token.is_some() {
					*self.inner.csrf_token.lock() = csrf_token;
				}
				let session = self.install(info);
				debug!(username = %session.username(), "Session info refreshed");
				Ok(Some(session))
			}
			None => {
				if self.clear_session() {
					info!("Server reported no session");
				}
				Ok(None)
			}
		}
	}

	/// Change the password of the current user.
	#[instrument(skip_all, fields(username = %request.username))]
	pub async fn change_password(&self, request: &ChangePasswordRequest) -> Result<()> {
		let response = self
			.send(Method::POST, CHANGE_PASSWORD_PATH, Some(&request.payload()))
			.await?;
		self.intercept(response, CHANGE_PASSWORD_PATH).await?;
		info!("Password changed");
		Ok(())
	}

	/// What the server offers for external user login.
	#[instrument(skip_all)]
	pub async fn external_user_login_information(&self) -> Result<ExternalUserLoginInformation> {
		let response = self
			.send(Method::GET, EXTERNAL_LOGIN_INFORMATION_PATH, None::<&()>)
			.await?;
		if !response.status().is_success() {
			return Err(server_error(response, "external user login information").await);
		}
		let body = response.bytes().await?;
		Ok(serde_json::from_slice(&body)?)
	}

	/// Drop the session and ask for a new login.
	///
	/// Returns the login target, which carries `redirect` as a query
	/// parameter when given.
	pub fn require_authentication(&self, redirect: Option<&str>) -> String {
		self.clear_session();
		let login_target = self.login_target(redirect);
		info!(login_target = %login_target, "Authentication required");
		self.emit(SessionEvent::AuthenticationRequired {
			login_target: login_target.clone(),
		});
		login_target
	}

	/// Report a visibility change of the host surface. Becoming visible after
	/// being hidden re-fetches the session info.
	pub async fn set_visibility(&self, visibility: Visibility) -> Result<()> {
		let previous = std::mem::replace(&mut *self.inner.visibility.lock(), visibility);
		if previous == Visibility::Hidden && visibility == Visibility::Visible {
			debug!("Surface became visible, refreshing session");
			self.refresh_session_info().await?;
		}
		Ok(())
	}

	// ------------------------------------------------------------------
	// Authenticated requests
	// ------------------------------------------------------------------

	/// GET `path` and decode the JSON answer.
	///
	/// A 401 clears the session and requests authentication. A 403 emits
	/// [`SessionEvent::InsufficientRights`] and keeps the session.
	pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
		let response = self.send(Method::GET, path, None::<&()>).await?;
		let response = self.intercept(response, path).await?;
		let body = response.bytes().await?;
		Ok(serde_json::from_slice(&body)?)
	}

	/// POST `body` to `path` and decode the JSON answer. Same status handling
	/// as [`SessionClient::get_json`].
	pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
	where
		B: Serialize + ?Sized,
		T: DeserializeOwned,
	{
		let response = self.send(Method::POST, path, Some(body)).await?;
		let response = self.intercept(response, path).await?;
		let body = response.bytes().await?;
		Ok(serde_json::from_slice(&body)?)
	}

	// ------------------------------------------------------------------
	// Internals
	// ------------------------------------------------------------------

	fn url(&self, path: &str) -> String {
		format!("{}/{}", self.inner.base_url, path.trim_start_matches('/'))
	}

	fn login_target(&self, redirect: Option<&str>) -> String {
		match redirect {
			Some(redirect) if !redirect.is_empty() => {
				let query = url::form_urlencoded::Serializer::new(String::new())
					.append_pair("redirect", redirect)
					.finish();
				format!("{}?{}", self.inner.login_path, query)
			}
			_ => self.inner.login_path.clone(),
		}
	}

	async fn send<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Response>
	where
		B: Serialize + ?Sized,
	{
		let url = self.url(path);
		trace!(method = %method, url = %url, "sending request");

		let csrf_token = if method == Method::GET {
			None
		} else {
			self.inner.csrf_token.lock().clone()
		};

		let mut request = self.inner.http_client.request(method, &url);
		if let Some(token) = csrf_token {
			request = request.header(self.inner.csrf_header.clone(), token);
		}
		if let Some(body) = body {
			request = request.json(body);
		}

		Ok(request.send().await?)
	}

	async fn intercept(&self, response: Response, path: &str) -> Result<Response> {
		match response.status() {
			StatusCode::UNAUTHORIZED => {
				warn!(path, "Request rejected as unauthenticated");
				self.require_authentication(None);
				Err(AuthError::Unauthorized)
			}
			StatusCode::FORBIDDEN => {
				warn!(path, "Insufficient rights");
				self.emit(SessionEvent::InsufficientRights {
					path: path.to_string(),
				});
				Err(AuthError::Forbidden {
					path: path.to_string(),
				})
			}
			status if !status.is_success() => Err(server_error(response, path).await),
			_ => Ok(response),
		}
	}

	async fn complete_login(&self, response: Response) -> Result<Arc<Session>> {
		let status = response.status();
		if !status.is_success() {
			let message = error_body(response).await;
			if is_session_exists(&message) {
				info!("Session already exists");
				return Err(AuthError::SessionExists);
			}
			error!(status = status.as_u16(), message = %message, "Login failed");
			return Err(AuthError::ServerError {
				status: status.as_u16(),
				message,
			});
		}

		let csrf_token = self.csrf_from(&response);
		let body = response.bytes().await?;
		let info: SessionInfo = serde_json::from_slice(&body)?;

		*self.inner.csrf_token.lock() = csrf_token;
		let session = self.install(info);
		info!(username = %session.username(), role = %session.role(), "Logged in");
		self.emit(SessionEvent::Login);

		Ok(session)
	}

	/// Replace the session, then notify.
	fn install(&self, info: SessionInfo) -> Arc<Session> {
		let session = Arc::new(Session::new(info));
		self.inner.session.send_replace(Some(Arc::clone(&session)));
		self.emit(SessionEvent::SessionChanged);
		session
	}

	/// Returns whether a session was installed.
	fn clear_session(&self) -> bool {
		*self.inner.csrf_token.lock() = None;
		let previous = self.inner.session.send_replace(None);
		if previous.is_some() {
			self.emit(SessionEvent::SessionChanged);
			true
		} else {
			false
		}
	}

	fn emit(&self, event: SessionEvent) {
		if self.inner.events.send(event).is_err() {
			trace!("no session event subscribers");
		}
	}

	fn csrf_from(&self, response: &Response) -> Option<String> {
		response
			.headers()
			.get(&self.inner.csrf_header)
			.and_then(|value| value.to_str().ok())
			.filter(|value| !value.is_empty())
			.map(str::to_string)
	}
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
	#[serde(default)]
	error_code: Option<String>,
}

fn is_session_exists(body: &str) -> bool {
	serde_json::from_str::<ErrorBody>(body)
		.ok()
		.and_then(|body| body.error_code)
		.is_some_and(|code| code == SESSION_EXISTS_ERROR_CODE)
}

/// `None` for an empty, `null` or username-less session document.
fn parse_session_info(body: &[u8]) -> Result<Option<SessionInfo>> {
	let text = String::from_utf8_lossy(body);
	let text = text.trim();
	if text.is_empty() || text == "null" || text == "{}" {
		return Ok(None);
	}
	let info: SessionInfo = serde_json::from_str(text)?;
	if info.username.is_empty() {
		return Ok(None);
	}
	Ok(Some(info))
}

/// Body of an error response. A body that cannot be read is reported as
/// empty.
async fn error_body(response: Response) -> String {
	let status = response.status().as_u16();
	match response.text().await {
		Ok(text) => text,
		Err(e) => {
			debug!(status, error = %e, "Failed to read error response body");
			String::new()
		}
	}
}

async fn server_error(response: Response, context: &str) -> AuthError {
	let status = response.status().as_u16();
	let message = error_body(response).await;
	error!(status, message = %message, context, "Server returned an error");
	AuthError::ServerError { status, message }
}
