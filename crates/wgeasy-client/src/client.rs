// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Typed resource operations against the wg-easy REST API.
//!
//! [`WgEasyClient`] layers three things over one reqwest client: the
//! cookie-backed session (login on demand), a request executor that answers
//! a 401 with exactly one re-login-and-retry cycle, and the peer CRUD
//! operations with their decoding and not-found semantics. The high-level
//! `*_from_desired` operations add the fetch, reconcile, write, re-read
//! flow a declarative caller needs.

use reqwest::header::ACCEPT;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use tracing::{debug, error, instrument, warn};
use wgeasy_core::{
	build_update_request, needs_followup_update, CreatePeerRequest, CreatePeerResponse,
	DesiredPeer, Peer, PeerId, UpdatePeerRequest,
};

use crate::config::WgEasyConfig;
use crate::error::{body_excerpt, Result, WgEasyError};
use crate::session::Session;

/// Fixed user-agent sent with every request.
pub const USER_AGENT: &str = concat!("wgeasy-rs/", env!("CARGO_PKG_VERSION"));

/// Collection endpoint for peers.
const CLIENTS_PATH: &str = "/api/client";

/// Async client for managing peers on a wg-easy instance.
///
/// One instance holds one session; it is safe to share across tasks.
/// Concurrent operations never duplicate logins, and unrelated requests do
/// not contend on the session lock.
pub struct WgEasyClient {
	http: reqwest::Client,
	endpoint: String,
	session: Session,
}

impl WgEasyClient {
	/// Creates a client from an explicit configuration.
	pub fn new(config: WgEasyConfig) -> Result<Self> {
		let http = reqwest::Client::builder()
			.user_agent(USER_AGENT)
			.cookie_store(true)
			.timeout(config.timeout)
			.build()?;

		let session = Session::new(
			http.clone(),
			config.endpoint.clone(),
			config.username,
			config.password,
		);

		Ok(Self {
			http,
			endpoint: config.endpoint,
			session,
		})
	}

	/// Creates a client from the `WGEASY_*` environment variables.
	pub fn from_env() -> Result<Self> {
		Self::new(WgEasyConfig::from_env()?)
	}

	/// Drops the session's authenticated claim; the next operation logs in
	/// again.
	pub async fn invalidate_session(&self) {
		self.session.invalidate().await;
	}

	/// Lists all peers on the server.
	#[instrument(skip(self))]
	pub async fn list_peers(&self) -> Result<Vec<Peer>> {
		let response = self.execute::<()>(Method::GET, CLIENTS_PATH, None).await?;

		let status = response.status();
		if status != StatusCode::OK {
			let body = response.text().await.unwrap_or_default();
			error!(status = status.as_u16(), "listing peers failed");
			return Err(WgEasyError::UnexpectedStatus {
				status: status.as_u16(),
				body: body_excerpt(&body),
			});
		}

		let body = response.text().await?;
		let peers: Vec<Peer> = serde_json::from_str(&body).map_err(|e| WgEasyError::Decode {
			message: e.to_string(),
			excerpt: body_excerpt(&body),
		})?;

		debug!(count = peers.len(), "listed peers");
		Ok(peers)
	}

	/// Fetches a single peer by its canonical ID.
	///
	/// wg-easy has no single-item read endpoint, so this lists the
	/// collection and scans for the ID. The error for an absent ID carries
	/// every ID that was found, which makes stale-reference mistakes
	/// obvious in the message.
	#[instrument(skip(self))]
	pub async fn get_peer(&self, id: &str) -> Result<Peer> {
		let peers = self.list_peers().await?;

		let mut known_ids = Vec::with_capacity(peers.len());
		for peer in peers {
			if peer.id == id {
				return Ok(peer);
			}
			known_ids.push(peer.id.to_string());
		}

		Err(WgEasyError::NotFound {
			id: id.to_string(),
			known_ids,
		})
	}

	/// Creates a peer and returns its server-assigned ID.
	///
	/// The create endpoint only accepts a name and an optional expiry;
	/// anything else needs a follow-up [`update_peer`](Self::update_peer).
	#[instrument(skip(self, request), fields(name = %request.name))]
	pub async fn create_peer(&self, request: &CreatePeerRequest) -> Result<PeerId> {
		let response = self
			.execute(Method::POST, CLIENTS_PATH, Some(request))
			.await?;

		let status = response.status();
		if status != StatusCode::OK && status != StatusCode::CREATED {
			let body = response.text().await.unwrap_or_default();
			error!(status = status.as_u16(), "creating peer failed");
			return Err(WgEasyError::UnexpectedStatus {
				status: status.as_u16(),
				body: body_excerpt(&body),
			});
		}

		let body = response.text().await?;
		let envelope: CreatePeerResponse =
			serde_json::from_str(&body).map_err(|e| WgEasyError::Decode {
				message: e.to_string(),
				excerpt: body_excerpt(&body),
			})?;

		if envelope.client_id.is_empty() {
			return Err(WgEasyError::Decode {
				message: "create response missing clientId".to_string(),
				excerpt: body_excerpt(&body),
			});
		}

		debug!(id = %envelope.client_id, "created peer");
		Ok(envelope.client_id)
	}

	/// Writes a complete peer record and returns the server-authoritative
	/// result.
	///
	/// The server has no partial-update semantics; `request` must carry
	/// every field. The write response body is not trusted as the new
	/// state, so the record is re-fetched after a successful write.
	#[instrument(skip(self, request))]
	pub async fn update_peer(&self, id: &str, request: &UpdatePeerRequest) -> Result<Peer> {
		let path = format!("{CLIENTS_PATH}/{id}");
		let response = self.execute(Method::POST, &path, Some(request)).await?;

		let status = response.status();
		if status == StatusCode::NOT_FOUND {
			return Err(WgEasyError::NotFound {
				id: id.to_string(),
				known_ids: Vec::new(),
			});
		}
		if status != StatusCode::OK {
			let body = response.text().await.unwrap_or_default();
			error!(status = status.as_u16(), "updating peer failed");
			return Err(WgEasyError::UnexpectedStatus {
				status: status.as_u16(),
				body: body_excerpt(&body),
			});
		}

		debug!("peer updated, reading back authoritative state");
		self.get_peer(id).await
	}

	/// Deletes a peer. An already-absent ID is success, not an error.
	#[instrument(skip(self))]
	pub async fn delete_peer(&self, id: &str) -> Result<()> {
		let path = format!("{CLIENTS_PATH}/{id}");
		let response = self.execute::<()>(Method::DELETE, &path, None).await?;

		let status = response.status();
		match status {
			StatusCode::OK | StatusCode::NO_CONTENT => {
				debug!("deleted peer");
				Ok(())
			}
			StatusCode::NOT_FOUND => {
				debug!("peer already gone");
				Ok(())
			}
			_ => {
				let body = response.text().await.unwrap_or_default();
				error!(status = status.as_u16(), "deleting peer failed");
				Err(WgEasyError::UnexpectedStatus {
					status: status.as_u16(),
					body: body_excerpt(&body),
				})
			}
		}
	}

	/// Creates a peer from a desired-state record.
	///
	/// Two-phase: the minimal create first, then a reconciled full update
	/// if the record carries fields the create endpoint does not accept.
	/// Either way the returned record is a fresh read-back.
	#[instrument(skip(self, desired))]
	pub async fn create_from_desired(&self, desired: &DesiredPeer) -> Result<Peer> {
		let name = desired
			.name
			.as_set()
			.ok_or(WgEasyError::InvalidDesiredState("name must be set"))?;

		let request = CreatePeerRequest {
			name: name.clone(),
			expires_at: desired.expires_at.as_set().cloned().flatten(),
		};
		let id = self.create_peer(&request).await?;

		if needs_followup_update(desired) {
			debug!(id = %id, "applying follow-up update for fields create does not accept");
			let current = self.get_peer(id.as_str()).await?;
			let update = build_update_request(desired, &current);
			return self.update_peer(id.as_str(), &update).await;
		}

		self.get_peer(id.as_str()).await
	}

	/// Applies a desired-state record to an existing peer.
	///
	/// Fetches current state, builds the full reconciled payload, writes
	/// it, and returns the read-back record. A failed write leaves the
	/// remote state unknown; callers must re-read before retrying.
	#[instrument(skip(self, desired))]
	pub async fn update_from_desired(&self, id: &str, desired: &DesiredPeer) -> Result<Peer> {
		let current = self.get_peer(id).await?;
		let update = build_update_request(desired, &current);
		self.update_peer(id, &update).await
	}

	/// Executes one logical API request with login-on-demand and a single
	/// re-login-and-retry on 401.
	///
	/// A 401 is treated as session-expiry evidence rather than a normal
	/// error: the session is re-established (serialized with every other
	/// login) and the original request is sent exactly once more. A second
	/// 401 surfaces as-is. Transport failures surface immediately; only
	/// authorization failure takes the retry path.
	async fn execute<B: Serialize + ?Sized>(
		&self,
		method: Method,
		path: &str,
		body: Option<&B>,
	) -> Result<reqwest::Response> {
		self.session.ensure_authenticated().await?;

		let response = self.send_once(method.clone(), path, body).await?;
		if response.status() != StatusCode::UNAUTHORIZED {
			return Ok(response);
		}

		warn!(path, "got 401 on an authenticated session, re-logging in");
		self.session.reauthenticate().await?;
		self.send_once(method, path, body).await
	}

	async fn send_once<B: Serialize + ?Sized>(
		&self,
		method: Method,
		path: &str,
		body: Option<&B>,
	) -> Result<reqwest::Response> {
		let mut request = self
			.http
			.request(method, format!("{}{}", self.endpoint, path))
			.header(ACCEPT, "application/json");
		if let Some(body) = body {
			request = request.json(body);
		}
		Ok(request.send().await?)
	}
}
