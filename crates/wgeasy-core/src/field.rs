// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Tri-state desired-state fields.
//!
//! A plain `Option<T>` cannot distinguish "the caller did not mention this
//! field" from "the caller explicitly cleared it". Desired-state records use
//! [`Field<T>`] for the former axis, keeping the field's own nullability
//! (an inner `Option`) or emptiness (an inner `Vec`) as the second axis.
//! `Field<Option<String>>` therefore has three meaningful states: unset,
//! explicitly null, and explicitly some value.

/// A desired-state field that is either left untouched or explicitly set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Field<T> {
	/// The caller did not mention this field; the current server value is
	/// preserved.
	#[default]
	Unset,
	/// The caller explicitly requested this value.
	Set(T),
}

impl<T> Field<T> {
	/// Returns true if the field carries an explicit value.
	pub fn is_set(&self) -> bool {
		matches!(self, Field::Set(_))
	}

	/// Returns the explicit value, if any.
	pub fn as_set(&self) -> Option<&T> {
		match self {
			Field::Set(v) => Some(v),
			Field::Unset => None,
		}
	}

	/// Overwrites `target` with the explicit value, leaving it untouched
	/// when the field is unset.
	pub fn apply_to(&self, target: &mut T)
	where
		T: Clone,
	{
		if let Field::Set(v) = self {
			*target = v.clone();
		}
	}
}

impl<T> From<T> for Field<T> {
	fn from(value: T) -> Self {
		Field::Set(value)
	}
}
