// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Core types for managing wg-easy peers.
//!
//! This crate holds everything about the wg-easy client model that does not
//! touch the network: the wire-faithful peer record, canonical ID
//! normalization, tri-state desired-state fields, and the reconciliation
//! builder that turns a partial desired change plus the full current record
//! into a complete write payload. The HTTP session and resource operations
//! live in `wgeasy-client`.
//!
//! # Example
//!
//! ```
//! use wgeasy_core::{DesiredPeer, Field};
//!
//! let desired = DesiredPeer {
//!     dns: Field::Set(vec!["1.1.1.1".to_string()]),
//!     ..DesiredPeer::named("laptop")
//! };
//! assert!(wgeasy_core::needs_followup_update(&desired));
//! ```

pub mod field;
pub mod id;
pub mod peer;
pub mod reconcile;
pub mod secret;

pub use field::Field;
pub use id::PeerId;
pub use peer::{CreatePeerRequest, CreatePeerResponse, DesiredPeer, Peer, UpdatePeerRequest};
pub use reconcile::{build_update_request, needs_followup_update};
pub use secret::{SecretString, REDACTED};
