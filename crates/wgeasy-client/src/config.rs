// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Client configuration.
//!
//! Endpoint and credentials can be given explicitly or resolved from the
//! `WGEASY_ENDPOINT`, `WGEASY_USERNAME`, and `WGEASY_PASSWORD` environment
//! variables; explicit values win over the environment.

use std::time::Duration;

use wgeasy_core::SecretString;

use crate::error::{Result, WgEasyError};

/// Environment variable holding the wg-easy endpoint URL.
pub const ENV_ENDPOINT: &str = "WGEASY_ENDPOINT";
/// Environment variable holding the wg-easy account username.
pub const ENV_USERNAME: &str = "WGEASY_USERNAME";
/// Environment variable holding the wg-easy account password.
pub const ENV_PASSWORD: &str = "WGEASY_PASSWORD";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for [`WgEasyClient`](crate::WgEasyClient).
///
/// ```
/// use wgeasy_client::WgEasyConfig;
///
/// let config = WgEasyConfig::new("https://vpn.example.com", "admin", "secret");
/// ```
#[derive(Debug, Clone)]
pub struct WgEasyConfig {
	pub(crate) endpoint: String,
	pub(crate) username: String,
	pub(crate) password: SecretString,
	pub(crate) timeout: Duration,
}

impl WgEasyConfig {
	/// Creates a configuration with explicit endpoint and credentials.
	///
	/// A trailing slash on the endpoint is stripped so request paths can be
	/// appended verbatim.
	pub fn new(
		endpoint: impl Into<String>,
		username: impl Into<String>,
		password: impl Into<SecretString>,
	) -> Self {
		Self {
			endpoint: strip_trailing_slash(endpoint.into()),
			username: username.into(),
			password: password.into(),
			timeout: DEFAULT_TIMEOUT,
		}
	}

	/// Resolves endpoint and credentials from the `WGEASY_*` environment
	/// variables.
	pub fn from_env() -> Result<Self> {
		Self::from_env_with(|name| std::env::var(name).ok())
	}

	/// Like [`from_env`](Self::from_env), with an injectable variable
	/// lookup.
	pub fn from_env_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
		let endpoint = lookup(ENV_ENDPOINT)
			.filter(|v| !v.is_empty())
			.ok_or(WgEasyError::Config(ENV_ENDPOINT))?;
		let username = lookup(ENV_USERNAME)
			.filter(|v| !v.is_empty())
			.ok_or(WgEasyError::Config(ENV_USERNAME))?;
		let password = lookup(ENV_PASSWORD)
			.filter(|v| !v.is_empty())
			.ok_or(WgEasyError::Config(ENV_PASSWORD))?;
		Ok(Self::new(endpoint, username, password))
	}

	/// Sets the per-request timeout (default 30s).
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	/// The normalized endpoint URL, without trailing slash.
	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}
}

fn strip_trailing_slash(endpoint: String) -> String {
	endpoint.trim_end_matches('/').to_string()
}
