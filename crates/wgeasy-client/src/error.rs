// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Error types for the wg-easy API client.

use thiserror::Error;

/// Maximum number of bytes of a response body carried inside an error.
const BODY_EXCERPT_LIMIT: usize = 500;

/// Errors that can occur when interacting with the wg-easy API.
#[derive(Debug, Error)]
pub enum WgEasyError {
	/// The server rejected the login credentials.
	#[error("authentication failed: status {status}: {body}")]
	Authentication { status: u16, body: String },

	/// The requested peer ID is absent from the collection.
	#[error("peer {id} not found (known IDs: {known_ids:?})")]
	NotFound { id: String, known_ids: Vec<String> },

	/// The server returned an unexpected HTTP status.
	#[error("unexpected status {status}: {body}")]
	UnexpectedStatus { status: u16, body: String },

	/// A response body could not be decoded.
	#[error("decoding response: {message} (body: {excerpt})")]
	Decode { message: String, excerpt: String },

	/// Transport-level failure (connection, timeout, DNS). Never retried.
	#[error("network error: {0}")]
	Network(#[from] reqwest::Error),

	/// A desired-state record failed local validation before any request
	/// was issued.
	#[error("invalid desired state: {0}")]
	InvalidDesiredState(&'static str),

	/// Client configuration is incomplete.
	#[error("missing configuration: {0}")]
	Config(&'static str),
}

impl WgEasyError {
	/// True for the "peer already gone" condition that reads and deletes
	/// treat as recoverable.
	pub fn is_not_found(&self) -> bool {
		matches!(self, WgEasyError::NotFound { .. })
	}
}

/// Result type alias for wg-easy client operations.
pub type Result<T> = std::result::Result<T, WgEasyError>;

/// Bounds a response body for inclusion in an error message.
///
/// Bodies can be arbitrarily large (or HTML error pages); errors carry at
/// most [`BODY_EXCERPT_LIMIT`] bytes, cut on a char boundary.
pub(crate) fn body_excerpt(body: &str) -> String {
	if body.len() <= BODY_EXCERPT_LIMIT {
		return body.to_string();
	}
	let mut end = BODY_EXCERPT_LIMIT;
	while !body.is_char_boundary(end) {
		end -= 1;
	}
	format!("{}...", &body[..end])
}
