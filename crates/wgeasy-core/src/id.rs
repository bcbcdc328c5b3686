// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Canonical peer identifiers.
//!
//! wg-easy is inconsistent about how it transmits client IDs: depending on
//! the server version and endpoint, the `id`/`clientId` field arrives as a
//! JSON string or as a JSON number. [`PeerId`] absorbs both shapes at the
//! deserialization boundary and normalizes them to a single string form, so
//! every comparison, map key, and log field in the rest of the workspace
//! deals with exactly one representation.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A server-assigned peer identifier, normalized to its canonical string
/// form.
///
/// `42` and `"42"` on the wire deserialize to the same `PeerId`. Any other
/// JSON shape is rejected with a decode error naming the offending value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PeerId(String);

impl PeerId {
	/// Creates a peer ID from an already-canonical string.
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	/// Returns the canonical string form.
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Returns true for the empty ID, which the API never legitimately
	/// produces.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl fmt::Display for PeerId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for PeerId {
	fn from(id: &str) -> Self {
		Self(id.to_string())
	}
}

impl From<String> for PeerId {
	fn from(id: String) -> Self {
		Self(id)
	}
}

impl PartialEq<str> for PeerId {
	fn eq(&self, other: &str) -> bool {
		self.0 == other
	}
}

impl PartialEq<&str> for PeerId {
	fn eq(&self, other: &&str) -> bool {
		self.0 == *other
	}
}

impl Serialize for PeerId {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&self.0)
	}
}

struct PeerIdVisitor;

impl Visitor<'_> for PeerIdVisitor {
	type Value = PeerId;

	fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("a string or a number")
	}

	fn visit_str<E: de::Error>(self, v: &str) -> Result<PeerId, E> {
		Ok(PeerId(v.to_string()))
	}

	fn visit_u64<E: de::Error>(self, v: u64) -> Result<PeerId, E> {
		Ok(PeerId(v.to_string()))
	}

	fn visit_i64<E: de::Error>(self, v: i64) -> Result<PeerId, E> {
		Ok(PeerId(v.to_string()))
	}

	fn visit_f64<E: de::Error>(self, v: f64) -> Result<PeerId, E> {
		// Matches the server's own integer IDs; fractional IDs do not occur.
		Ok(PeerId((v as i64).to_string()))
	}
}

impl<'de> Deserialize<'de> for PeerId {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		deserializer.deserialize_any(PeerIdVisitor)
	}
}
