// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Wire model for wg-easy clients ("peers").
//!
//! Field names match the wg-easy REST API exactly. Three nullability
//! conventions coexist on this record and the distinction is load-bearing:
//!
//! - always-present scalars (`name`, `enabled`, `mtu`, the hook commands,
//!   the jitter parameters): never null on the wire;
//! - nullable scalars (`expiresAt`, `serverEndpoint`, `i1`..`i5`): JSON
//!   null means "not set" and is distinct from any string value;
//! - list fields: an empty `allowedIps`/`serverAllowedIps` is expressed as
//!   null on write ("use the server default"), while `dns` sends a literal
//!   `[]`. `serverAllowedIps` must never be written as null at all, so
//!   [`UpdatePeerRequest`] types it as a plain `Vec`.
//!
//! `privateKey`, `preSharedKey`, and `oneTimeLink` are server-generated and
//! read-only; they never appear in outbound payloads.

use serde::{Deserialize, Serialize};

use crate::field::Field;
use crate::id::PeerId;

/// A peer record as returned by `GET /api/client`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Peer {
	pub id: PeerId,
	pub user_id: i64,
	pub interface_id: String,
	pub name: String,
	pub enabled: bool,
	pub ipv4_address: String,
	pub ipv6_address: String,
	pub public_key: String,
	pub private_key: String,
	pub pre_shared_key: String,
	pub expires_at: Option<String>,
	pub allowed_ips: Option<Vec<String>>,
	pub server_allowed_ips: Option<Vec<String>>,
	pub dns: Option<Vec<String>>,
	pub mtu: i64,
	pub persistent_keepalive: i64,
	pub server_endpoint: Option<String>,
	pub pre_up: String,
	pub post_up: String,
	pub pre_down: String,
	pub post_down: String,
	#[serde(rename = "jC")]
	pub jc: i64,
	pub j_min: i64,
	pub j_max: i64,
	pub i1: Option<String>,
	pub i2: Option<String>,
	pub i3: Option<String>,
	pub i4: Option<String>,
	pub i5: Option<String>,
	pub one_time_link: Option<String>,
	pub created_at: String,
	pub updated_at: String,
}

/// Body for `POST /api/client`.
///
/// The create endpoint accepts only a name and an optional expiry; every
/// other attribute requires a follow-up full update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePeerRequest {
	pub name: String,
	pub expires_at: Option<String>,
}

/// Response envelope from `POST /api/client`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePeerResponse {
	pub status: String,
	pub client_id: PeerId,
}

/// Body for `POST /api/client/{id}`.
///
/// The server has no partial-update semantics: every field listed here is
/// required on every write. Nullable fields serialize as JSON null when
/// `None`; `server_allowed_ips` is a plain `Vec` because the server rejects
/// null for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePeerRequest {
	pub name: String,
	pub enabled: bool,
	pub ipv4_address: String,
	pub ipv6_address: String,
	pub server_allowed_ips: Vec<String>,
	pub mtu: i64,
	pub persistent_keepalive: i64,
	pub pre_up: String,
	pub post_up: String,
	pub pre_down: String,
	pub post_down: String,
	#[serde(rename = "jC")]
	pub jc: i64,
	pub j_min: i64,
	pub j_max: i64,
	pub expires_at: Option<String>,
	pub allowed_ips: Option<Vec<String>>,
	pub dns: Option<Vec<String>>,
	pub server_endpoint: Option<String>,
	pub i1: Option<String>,
	pub i2: Option<String>,
	pub i3: Option<String>,
	pub i4: Option<String>,
	pub i5: Option<String>,
}

/// A partial desired state for a peer, as supplied by a declarative caller.
///
/// Every field is tri-state (see [`Field`]): unset fields preserve the
/// current server value during reconciliation. For the nullable scalars,
/// `Field::Set(None)` is an explicit clear; for the list fields,
/// `Field::Set(vec![])` means "use the server default" on the allowed-IP
/// fields but "literally no DNS servers" on `dns`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DesiredPeer {
	pub name: Field<String>,
	pub enabled: Field<bool>,
	pub expires_at: Field<Option<String>>,
	pub allowed_ips: Field<Vec<String>>,
	pub server_allowed_ips: Field<Vec<String>>,
	pub dns: Field<Vec<String>>,
	pub mtu: Field<i64>,
	pub persistent_keepalive: Field<i64>,
	pub server_endpoint: Field<Option<String>>,
	pub pre_up: Field<String>,
	pub post_up: Field<String>,
	pub pre_down: Field<String>,
	pub post_down: Field<String>,
	pub jc: Field<i64>,
	pub j_min: Field<i64>,
	pub j_max: Field<i64>,
	pub i1: Field<Option<String>>,
	pub i2: Field<Option<String>>,
	pub i3: Field<Option<String>>,
	pub i4: Field<Option<String>>,
	pub i5: Field<Option<String>>,
}

impl DesiredPeer {
	/// A desired state that only names the peer, the minimum for creation.
	pub fn named(name: impl Into<String>) -> Self {
		Self {
			name: Field::Set(name.into()),
			..Self::default()
		}
	}
}
