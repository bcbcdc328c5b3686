// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Async client for the wg-easy REST API.
//!
//! This crate manages WireGuard peers ("clients") on a remote wg-easy
//! instance: cookie-based session lifecycle with transparent re-login on
//! expiry, typed CRUD operations, and reconciliation of partial desired
//! state against the server's full-record update contract.
//!
//! # Example
//!
//! ```no_run
//! use wgeasy_client::{DesiredPeer, Field, WgEasyClient, WgEasyConfig};
//!
//! # async fn run() -> wgeasy_client::Result<()> {
//! let client = WgEasyClient::new(WgEasyConfig::new(
//!     "https://vpn.example.com",
//!     "admin",
//!     "secret",
//! ))?;
//!
//! let desired = DesiredPeer {
//!     dns: Field::Set(vec!["1.1.1.1".to_string()]),
//!     ..DesiredPeer::named("laptop")
//! };
//! let peer = client.create_from_desired(&desired).await?;
//! println!("created peer {}", peer.id);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
mod session;

pub use client::{WgEasyClient, USER_AGENT};
pub use config::{WgEasyConfig, ENV_ENDPOINT, ENV_PASSWORD, ENV_USERNAME};
pub use error::{Result, WgEasyError};

// Re-export the core model so callers need only one crate.
pub use wgeasy_core::{
	build_update_request, needs_followup_update, CreatePeerRequest, CreatePeerResponse,
	DesiredPeer, Field, Peer, PeerId, SecretString, UpdatePeerRequest,
};
