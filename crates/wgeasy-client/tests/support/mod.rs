// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared fixtures for the wiremock-backed integration tests.

#![allow(dead_code)]

use serde_json::json;
use wgeasy_client::{WgEasyClient, WgEasyConfig};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "secret";

/// A client pointed at the mock server with the fixture credentials.
pub fn client_for(server: &MockServer) -> WgEasyClient {
	WgEasyClient::new(WgEasyConfig::new(server.uri(), USERNAME, PASSWORD))
		.expect("client should build")
}

/// A login mock that only matches the exact wg-easy login protocol:
/// credentials plus the `remember` flag, answered with a session cookie.
pub fn login_ok() -> Mock {
	Mock::given(method("POST"))
		.and(path("/api/session"))
		.and(body_json(json!({
			"username": USERNAME,
			"password": PASSWORD,
			"remember": true,
		})))
		.respond_with(
			ResponseTemplate::new(200)
				.insert_header("set-cookie", "connect.sid=test-session; Path=/; HttpOnly"),
		)
}

/// A complete peer record as `GET /api/client` returns it.
///
/// `id` is a raw JSON value on purpose: the API transmits IDs as strings or
/// numbers depending on version, and tests exercise both shapes.
pub fn peer_json(id: serde_json::Value, name: &str) -> serde_json::Value {
	json!({
		"id": id,
		"userId": 1,
		"interfaceId": "wg0",
		"name": name,
		"enabled": true,
		"ipv4Address": "10.8.0.2",
		"ipv6Address": "fdcc::2",
		"publicKey": "pub",
		"privateKey": "priv",
		"preSharedKey": "psk",
		"expiresAt": null,
		"allowedIps": ["10.0.0.1/32"],
		"serverAllowedIps": null,
		"dns": ["1.1.1.1"],
		"mtu": 1420,
		"persistentKeepalive": 25,
		"serverEndpoint": null,
		"preUp": "",
		"postUp": "",
		"preDown": "",
		"postDown": "",
		"jC": 0,
		"jMin": 0,
		"jMax": 0,
		"i1": null,
		"i2": null,
		"i3": null,
		"i4": null,
		"i5": null,
		"oneTimeLink": null,
		"createdAt": "2025-01-01T00:00:00.000Z",
		"updatedAt": "2025-01-01T00:00:00.000Z"
	})
}
