// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Reconciliation of desired state against current server state.
//!
//! wg-easy has no partial-update endpoint: `POST /api/client/{id}` requires
//! the complete record on every write. [`build_update_request`] therefore
//! starts from the current server record and overlays only the fields the
//! caller explicitly set, honoring each field's nullability class. Pure
//! functions, no I/O.

use crate::field::Field;
use crate::peer::{DesiredPeer, Peer, UpdatePeerRequest};

/// Builds a complete write payload from a partial desired state and the
/// full current server record.
///
/// Overlay rules, per field class:
/// - always-present scalars: overwritten when set, otherwise preserved;
/// - nullable scalars: the whole `Option` is overwritten when set, so
///   `Field::Set(None)` is an explicit clear;
/// - `allowed_ips` / `server_allowed_ips`: a set non-empty list overwrites;
///   a set empty list becomes the "use server default" sentinel (null on
///   the wire) instead of copying the current value;
/// - `dns`: any set value, including the empty list, is sent verbatim;
///   `[]` is a real desired state here, not a default marker.
///
/// The asymmetry between the allowed-IP fields and `dns` is a server
/// contract, preserved field by field. `server_allowed_ips` ends up as a
/// plain `Vec` in the payload: the server rejects null for it, so an unset
/// or cleared value is coerced to `[]`.
pub fn build_update_request(desired: &DesiredPeer, current: &Peer) -> UpdatePeerRequest {
	let mut req = UpdatePeerRequest {
		name: current.name.clone(),
		enabled: current.enabled,
		ipv4_address: current.ipv4_address.clone(),
		ipv6_address: current.ipv6_address.clone(),
		server_allowed_ips: current.server_allowed_ips.clone().unwrap_or_default(),
		mtu: current.mtu,
		persistent_keepalive: current.persistent_keepalive,
		pre_up: current.pre_up.clone(),
		post_up: current.post_up.clone(),
		pre_down: current.pre_down.clone(),
		post_down: current.post_down.clone(),
		jc: current.jc,
		j_min: current.j_min,
		j_max: current.j_max,
		expires_at: current.expires_at.clone(),
		allowed_ips: current.allowed_ips.clone(),
		dns: current.dns.clone(),
		server_endpoint: current.server_endpoint.clone(),
		i1: current.i1.clone(),
		i2: current.i2.clone(),
		i3: current.i3.clone(),
		i4: current.i4.clone(),
		i5: current.i5.clone(),
	};

	desired.name.apply_to(&mut req.name);
	desired.enabled.apply_to(&mut req.enabled);
	desired.mtu.apply_to(&mut req.mtu);
	desired.persistent_keepalive.apply_to(&mut req.persistent_keepalive);
	desired.pre_up.apply_to(&mut req.pre_up);
	desired.post_up.apply_to(&mut req.post_up);
	desired.pre_down.apply_to(&mut req.pre_down);
	desired.post_down.apply_to(&mut req.post_down);
	desired.jc.apply_to(&mut req.jc);
	desired.j_min.apply_to(&mut req.j_min);
	desired.j_max.apply_to(&mut req.j_max);

	desired.expires_at.apply_to(&mut req.expires_at);
	desired.server_endpoint.apply_to(&mut req.server_endpoint);
	desired.i1.apply_to(&mut req.i1);
	desired.i2.apply_to(&mut req.i2);
	desired.i3.apply_to(&mut req.i3);
	desired.i4.apply_to(&mut req.i4);
	desired.i5.apply_to(&mut req.i5);

	if let Field::Set(ips) = &desired.allowed_ips {
		// Empty means "fall back to the server's global config": null on
		// the wire, not a copy of the current value.
		req.allowed_ips = if ips.is_empty() { None } else { Some(ips.clone()) };
	}

	if let Field::Set(ips) = &desired.server_allowed_ips {
		req.server_allowed_ips = ips.clone();
	}

	if let Field::Set(dns) = &desired.dns {
		req.dns = Some(dns.clone());
	}

	req
}

/// Returns true when a desired record carries anything the create endpoint
/// does not accept, requiring a follow-up full update after `POST
/// /api/client`.
///
/// Creation only takes a name and an optional expiry; a fresh peer comes
/// back enabled with server defaults everywhere else. A list field set to
/// empty matches those defaults already and does not force the second
/// write.
pub fn needs_followup_update(desired: &DesiredPeer) -> bool {
	let set_non_empty = |field: &Field<Vec<String>>| {
		field.as_set().is_some_and(|v| !v.is_empty())
	};

	set_non_empty(&desired.allowed_ips)
		|| set_non_empty(&desired.server_allowed_ips)
		|| set_non_empty(&desired.dns)
		|| desired.mtu.is_set()
		|| desired.persistent_keepalive.is_set()
		|| desired.server_endpoint.is_set()
		|| desired.pre_up.is_set()
		|| desired.post_up.is_set()
		|| desired.pre_down.is_set()
		|| desired.post_down.is_set()
		|| desired.jc.is_set()
		|| desired.j_min.is_set()
		|| desired.j_max.is_set()
		|| desired.i1.is_set()
		|| desired.i2.is_set()
		|| desired.i3.is_set()
		|| desired.i4.is_set()
		|| desired.i5.is_set()
		|| desired.enabled.as_set() == Some(&false)
}
