// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Cookie-based session management for the wg-easy API.
//!
//! wg-easy authenticates with a session cookie obtained from `POST
//! /api/session`. The cookie itself lives in the reqwest cookie store; this
//! module owns the credentials and an `authenticated` flag recording that a
//! login has succeeded. The flag is a claim, not a guarantee: the server
//! can expire the session at any time, which the executor detects as a 401
//! and answers by forcing a re-login here.

use tokio::sync::Mutex;
use tracing::{debug, warn};
use wgeasy_core::SecretString;

use crate::error::{body_excerpt, Result, WgEasyError};

/// Fixed login endpoint.
const SESSION_PATH: &str = "/api/session";

/// Owns credentials and the authenticated flag for one client instance.
///
/// The flag is guarded by an async mutex held across the whole
/// check-then-login sequence, so any number of concurrent callers produce
/// exactly one login request. The lock is never held across a normal
/// request round-trip.
pub(crate) struct Session {
	http: reqwest::Client,
	endpoint: String,
	username: String,
	password: SecretString,
	authenticated: Mutex<bool>,
}

impl Session {
	pub(crate) fn new(
		http: reqwest::Client,
		endpoint: String,
		username: String,
		password: SecretString,
	) -> Self {
		Self {
			http,
			endpoint,
			username,
			password,
			authenticated: Mutex::new(false),
		}
	}

	/// Logs in if no successful login is on record.
	///
	/// Callers that arrive while a login is in flight wait on the lock and
	/// then observe the completed result instead of issuing a duplicate
	/// login.
	pub(crate) async fn ensure_authenticated(&self) -> Result<()> {
		let mut authenticated = self.authenticated.lock().await;
		if *authenticated {
			return Ok(());
		}
		self.login().await?;
		*authenticated = true;
		Ok(())
	}

	/// Drops the authenticated claim and performs a fresh login.
	///
	/// Used by the executor after a 401: the old cookie is evidently no
	/// longer accepted, whatever the flag says.
	pub(crate) async fn reauthenticate(&self) -> Result<()> {
		let mut authenticated = self.authenticated.lock().await;
		*authenticated = false;
		self.login().await?;
		*authenticated = true;
		Ok(())
	}

	/// Forces the authenticated flag off without logging in again.
	pub(crate) async fn invalidate(&self) {
		let mut authenticated = self.authenticated.lock().await;
		*authenticated = false;
	}

	/// POSTs credentials to `/api/session`, relying on the cookie store to
	/// capture the session cookie.
	async fn login(&self) -> Result<()> {
		debug!(endpoint = %self.endpoint, username = %self.username, "logging in to wg-easy");

		let body = serde_json::json!({
			"username": self.username,
			"password": self.password.expose(),
			"remember": true,
		});

		let response = self
			.http
			.post(format!("{}{}", self.endpoint, SESSION_PATH))
			.header(reqwest::header::ACCEPT, "application/json")
			.json(&body)
			.send()
			.await?;

		let status = response.status();
		if status != reqwest::StatusCode::OK {
			let body = response.text().await.unwrap_or_default();
			warn!(status = status.as_u16(), "wg-easy login rejected");
			return Err(WgEasyError::Authentication {
				status: status.as_u16(),
				body: body_excerpt(&body),
			});
		}

		debug!("wg-easy login succeeded");
		Ok(())
	}
}
