// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Peer CRUD and reconciliation-flow integration tests.
//!
//! This suite covers:
//! - The 401 re-login-and-retry protocol (success and bounded failure)
//! - ID normalization across string and numeric wire forms
//! - Not-found and idempotent-delete semantics
//! - The exact write payload produced by the reconciliation flow
//! - Two-phase creation from desired state

mod support;

use serde_json::json;
use support::{client_for, login_ok, peer_json};
use wgeasy_client::{DesiredPeer, Field, WgEasyError};
use wiremock::matchers::{body_json, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// One 401 with a healthy login path: the target endpoint is hit exactly
/// twice (failed attempt + retry), one extra login happens, and the final
/// result matches what a valid session would have returned.
#[tokio::test]
async fn expired_session_is_recovered_with_a_single_retry() {
	let server = MockServer::start().await;

	login_ok().expect(2).mount(&server).await;

	// First mounted wins while active: one 401, then the real response.
	Mock::given(method("GET"))
		.and(path("/api/client"))
		.respond_with(ResponseTemplate::new(401))
		.up_to_n_times(1)
		.expect(1)
		.named("expired-session")
		.mount(&server)
		.await;
	Mock::given(method("GET"))
		.and(path("/api/client"))
		.respond_with(
			ResponseTemplate::new(200).set_body_json(json!([peer_json(json!(42), "laptop")])),
		)
		.expect(1)
		.named("healthy-session")
		.mount(&server)
		.await;

	let client = client_for(&server);
	let peers = client.list_peers().await.expect("retry should recover");
	assert_eq!(peers.len(), 1);
	assert_eq!(peers[0].id, "42");
	assert_eq!(peers[0].name, "laptop");
}

/// A 401 on the retried attempt surfaces as an error with no third attempt.
#[tokio::test]
async fn persistent_401_is_not_retried_a_second_time() {
	let server = MockServer::start().await;

	login_ok().expect(2).mount(&server).await;
	Mock::given(method("GET"))
		.and(path("/api/client"))
		.respond_with(ResponseTemplate::new(401).set_body_string("still unauthorized"))
		.expect(2)
		.mount(&server)
		.await;

	let client = client_for(&server);
	let err = client.list_peers().await.expect_err("should give up after one retry");
	assert!(matches!(err, WgEasyError::UnexpectedStatus { status: 401, .. }));
}

/// String and numeric wire IDs normalize to the same canonical form.
#[tokio::test]
async fn numeric_and_string_ids_normalize_identically() {
	let server = MockServer::start().await;

	login_ok().mount(&server).await;
	Mock::given(method("GET"))
		.and(path("/api/client"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!([
			peer_json(json!(42), "from-number"),
			peer_json(json!("43"), "from-string"),
		])))
		.mount(&server)
		.await;

	let client = client_for(&server);
	let by_number = client.get_peer("42").await.expect("numeric id should resolve");
	assert_eq!(by_number.name, "from-number");
	let by_string = client.get_peer("43").await.expect("string id should resolve");
	assert_eq!(by_string.name, "from-string");
}

/// A missing ID produces a not-found error listing every ID that was seen.
#[tokio::test]
async fn get_of_unknown_id_reports_known_ids() {
	let server = MockServer::start().await;

	login_ok().mount(&server).await;
	Mock::given(method("GET"))
		.and(path("/api/client"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!([
			peer_json(json!(1), "one"),
			peer_json(json!("abc"), "two"),
		])))
		.mount(&server)
		.await;

	let client = client_for(&server);
	let err = client.get_peer("zzz").await.expect_err("id is absent");
	match err {
		WgEasyError::NotFound { id, known_ids } => {
			assert_eq!(id, "zzz");
			assert_eq!(known_ids, vec!["1".to_string(), "abc".to_string()]);
		}
		other => panic!("expected NotFound, got {other:?}"),
	}
}

/// Deleting an already-absent peer is success, not an error.
#[tokio::test]
async fn delete_of_missing_peer_is_idempotent_success() {
	let server = MockServer::start().await;

	login_ok().mount(&server).await;
	Mock::given(method("DELETE"))
		.and(path("/api/client/99"))
		.respond_with(ResponseTemplate::new(404))
		.expect(1)
		.mount(&server)
		.await;

	let client = client_for(&server);
	client.delete_peer("99").await.expect("404 on delete is success");
}

/// A 204 delete succeeds; any other failure status surfaces with its body.
#[tokio::test]
async fn delete_distinguishes_success_from_server_errors() {
	let server = MockServer::start().await;

	login_ok().mount(&server).await;
	Mock::given(method("DELETE"))
		.and(path("/api/client/1"))
		.respond_with(ResponseTemplate::new(204))
		.mount(&server)
		.await;
	Mock::given(method("DELETE"))
		.and(path("/api/client/2"))
		.respond_with(ResponseTemplate::new(500).set_body_string("db locked"))
		.mount(&server)
		.await;

	let client = client_for(&server);
	client.delete_peer("1").await.expect("204 is success");

	let err = client.delete_peer("2").await.expect_err("500 must surface");
	match err {
		WgEasyError::UnexpectedStatus { status, body } => {
			assert_eq!(status, 500);
			assert!(body.contains("db locked"));
		}
		other => panic!("expected UnexpectedStatus, got {other:?}"),
	}
}

/// Creation decodes the response envelope and returns the normalized ID.
#[tokio::test]
async fn create_returns_normalized_id_from_envelope() {
	let server = MockServer::start().await;

	login_ok().mount(&server).await;
	Mock::given(method("POST"))
		.and(path("/api/client"))
		.and(body_json(json!({"name": "laptop", "expiresAt": null})))
		.respond_with(
			ResponseTemplate::new(201).set_body_json(json!({"status": "OK", "clientId": 7})),
		)
		.expect(1)
		.mount(&server)
		.await;

	let client = client_for(&server);
	let request = wgeasy_client::CreatePeerRequest {
		name: "laptop".to_string(),
		expires_at: None,
	};
	let id = client.create_peer(&request).await.expect("create should succeed");
	assert_eq!(id.as_str(), "7");
}

/// An empty client ID in the create envelope is a decode failure, not a
/// silently empty handle.
#[tokio::test]
async fn create_with_empty_id_in_envelope_fails() {
	let server = MockServer::start().await;

	login_ok().mount(&server).await;
	Mock::given(method("POST"))
		.and(path("/api/client"))
		.respond_with(
			ResponseTemplate::new(200).set_body_json(json!({"status": "OK", "clientId": ""})),
		)
		.mount(&server)
		.await;

	let client = client_for(&server);
	let request = wgeasy_client::CreatePeerRequest {
		name: "laptop".to_string(),
		expires_at: None,
	};
	let err = client.create_peer(&request).await.expect_err("empty id must fail");
	match err {
		WgEasyError::Decode { message, .. } => {
			assert!(message.contains("missing clientId"));
		}
		other => panic!("expected Decode, got {other:?}"),
	}
}

/// Updating an unknown ID maps the server's 404 to the not-found error.
#[tokio::test]
async fn update_of_unknown_id_maps_404_to_not_found() {
	let server = MockServer::start().await;

	login_ok().mount(&server).await;
	Mock::given(method("POST"))
		.and(path("/api/client/zzz"))
		.respond_with(ResponseTemplate::new(404))
		.mount(&server)
		.await;

	let client = client_for(&server);
	let current: wgeasy_client::Peer =
		serde_json::from_value(peer_json(json!("zzz"), "ghost")).unwrap();
	let request = wgeasy_client::build_update_request(&DesiredPeer::default(), &current);
	let err = client.update_peer("zzz", &request).await.expect_err("404 must surface");
	assert!(err.is_not_found());
}

/// The full reconciliation flow sends exactly the right payload: an
/// explicitly-emptied allowed-IP list goes out as null, unset DNS is
/// preserved from current state, and `serverAllowedIps` is an array even
/// though the server reported null.
#[tokio::test]
async fn update_from_desired_sends_the_reconciled_full_record() {
	let server = MockServer::start().await;

	login_ok().mount(&server).await;
	Mock::given(method("GET"))
		.and(path("/api/client"))
		.respond_with(
			ResponseTemplate::new(200).set_body_json(json!([peer_json(json!(42), "laptop")])),
		)
		.expect(2) // current-state fetch + post-write read-back
		.mount(&server)
		.await;

	let expected_body = json!({
		"name": "laptop",
		"enabled": true,
		"ipv4Address": "10.8.0.2",
		"ipv6Address": "fdcc::2",
		"serverAllowedIps": [],
		"mtu": 1420,
		"persistentKeepalive": 25,
		"preUp": "",
		"postUp": "",
		"preDown": "",
		"postDown": "",
		"jC": 0,
		"jMin": 0,
		"jMax": 0,
		"expiresAt": null,
		"allowedIps": null,
		"dns": ["1.1.1.1"],
		"serverEndpoint": null,
		"i1": null,
		"i2": null,
		"i3": null,
		"i4": null,
		"i5": null,
	});
	Mock::given(method("POST"))
		.and(path("/api/client/42"))
		.and(body_json(expected_body))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "OK"})))
		.expect(1)
		.mount(&server)
		.await;

	let desired = DesiredPeer {
		allowed_ips: Field::Set(vec![]),
		..DesiredPeer::default()
	};
	let client = client_for(&server);
	let peer = client
		.update_from_desired("42", &desired)
		.await
		.expect("update flow should succeed");
	assert_eq!(peer.name, "laptop");
}

/// A desired record with fields the create endpoint cannot accept triggers
/// the two-phase create: minimal POST, then exactly one reconciled update,
/// then a read-back.
#[tokio::test]
async fn create_from_desired_runs_the_two_phase_flow() {
	let server = MockServer::start().await;

	login_ok().mount(&server).await;
	Mock::given(method("POST"))
		.and(path("/api/client"))
		.and(body_json(json!({"name": "road-warrior", "expiresAt": null})))
		.respond_with(
			ResponseTemplate::new(200).set_body_json(json!({"status": "OK", "clientId": 7})),
		)
		.expect(1)
		.mount(&server)
		.await;
	Mock::given(method("GET"))
		.and(path("/api/client"))
		.respond_with(
			ResponseTemplate::new(200).set_body_json(json!([peer_json(json!(7), "road-warrior")])),
		)
		.expect(2) // current-state fetch + post-update read-back
		.mount(&server)
		.await;
	Mock::given(method("POST"))
		.and(path("/api/client/7"))
		.and(body_partial_json(json!({"dns": ["9.9.9.9"]})))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "OK"})))
		.expect(1)
		.mount(&server)
		.await;

	let desired = DesiredPeer {
		dns: Field::Set(vec!["9.9.9.9".to_string()]),
		..DesiredPeer::named("road-warrior")
	};
	let client = client_for(&server);
	let peer = client
		.create_from_desired(&desired)
		.await
		.expect("two-phase create should succeed");
	assert_eq!(peer.id, "7");
	assert_eq!(peer.name, "road-warrior");
}

/// A name-only desired record creates without any follow-up update.
#[tokio::test]
async fn plain_create_from_desired_skips_the_followup_update() {
	let server = MockServer::start().await;

	login_ok().mount(&server).await;
	Mock::given(method("POST"))
		.and(path("/api/client"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({
			"status": "OK",
			"clientId": "abc-123",
		})))
		.expect(1)
		.mount(&server)
		.await;
	Mock::given(method("GET"))
		.and(path("/api/client"))
		.respond_with(
			ResponseTemplate::new(200).set_body_json(json!([peer_json(json!("abc-123"), "plain")])),
		)
		.expect(1)
		.mount(&server)
		.await;
	Mock::given(method("POST"))
		.and(path("/api/client/abc-123"))
		.respond_with(ResponseTemplate::new(200))
		.expect(0)
		.named("unwanted follow-up update")
		.mount(&server)
		.await;

	let client = client_for(&server);
	let peer = client
		.create_from_desired(&DesiredPeer::named("plain"))
		.await
		.expect("plain create should succeed");
	assert_eq!(peer.id, "abc-123");
}

/// A desired record without a name is rejected locally, before any request.
#[tokio::test]
async fn create_from_desired_requires_a_name() {
	let server = MockServer::start().await;
	// No mocks: nothing must be sent.

	let client = client_for(&server);
	let err = client
		.create_from_desired(&DesiredPeer::default())
		.await
		.expect_err("nameless desired state is invalid");
	assert!(matches!(err, WgEasyError::InvalidDesiredState(_)));
	assert!(server.received_requests().await.unwrap().is_empty());
}

/// Malformed JSON in a listing surfaces as a decode error with an excerpt
/// of the offending payload.
#[tokio::test]
async fn malformed_listing_surfaces_a_decode_error() {
	let server = MockServer::start().await;

	login_ok().mount(&server).await;
	Mock::given(method("GET"))
		.and(path("/api/client"))
		.respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
		.mount(&server)
		.await;

	let client = client_for(&server);
	let err = client.list_peers().await.expect_err("html is not a peer list");
	match err {
		WgEasyError::Decode { excerpt, .. } => {
			assert!(excerpt.contains("not json"));
		}
		other => panic!("expected Decode, got {other:?}"),
	}
}

/// Unexpected statuses carry a bounded body excerpt for diagnosis.
#[tokio::test]
async fn unexpected_status_carries_a_bounded_body_excerpt() {
	let server = MockServer::start().await;

	login_ok().mount(&server).await;
	Mock::given(method("GET"))
		.and(path("/api/client"))
		.respond_with(ResponseTemplate::new(502).set_body_string("x".repeat(5000)))
		.mount(&server)
		.await;

	let client = client_for(&server);
	let err = client.list_peers().await.expect_err("502 must surface");
	match err {
		WgEasyError::UnexpectedStatus { status, body } => {
			assert_eq!(status, 502);
			assert!(body.len() <= 503);
			assert!(body.ends_with("..."));
		}
		other => panic!("expected UnexpectedStatus, got {other:?}"),
	}
}
