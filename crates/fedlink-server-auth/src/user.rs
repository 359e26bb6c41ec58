// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Local user records and username normalization.

use crate::types::{ProviderKind, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MAX_USERNAME_LEN: usize = 64;

/// Names that collide with chat mentions or system accounts.
pub const RESERVED_USERNAMES: &[&str] = &[
	"all", "channel", "here", "everyone", "system", "root", "noreply", "no-reply",
];

pub fn is_username_reserved(username: &str) -> bool {
	let lower = username.to_lowercase();
	RESERVED_USERNAMES.iter().any(|&reserved| reserved == lower)
}

/// Normalizes an upstream login into a local username.
///
/// Lower-cases, keeps `[a-z0-9._-]`, replaces everything else with `-`,
/// trims punctuation from both ends and truncates. A result that does not
/// start with a letter gets a `u` prefix. Returns `None` when nothing usable
/// remains or the result is reserved.
pub fn clean_username(raw: &str) -> Option<String> {
	let mapped: String = raw
		.trim()
		.to_lowercase()
		.chars()
		.map(|c| {
			if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
				c
			} else {
				'-'
			}
		})
		.collect();

	let trimmed = mapped.trim_matches(|c: char| matches!(c, '.' | '_' | '-'));
	if trimmed.is_empty() {
		return None;
	}

	let mut name = if trimmed.starts_with(|c: char| c.is_ascii_lowercase()) {
		trimmed.to_string()
	} else {
		format!("u{trimmed}")
	};
	name.truncate(MAX_USERNAME_LEN);
	let name = name
		.trim_end_matches(|c: char| matches!(c, '.' | '_' | '-'))
		.to_string();

	if is_username_reserved(&name) {
		None
	} else {
		Some(name)
	}
}

/// Random 12-character username for identities with no usable login.
pub fn generate_fallback_username() -> String {
	let id = Uuid::new_v4().simple().to_string();
	format!("u{}", &id[..11])
}

/// Fields required to create a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
	pub username: String,
	pub email: String,
	pub first_name: String,
	pub last_name: String,
	pub auth_service: ProviderKind,
	pub auth_data: String,
}

/// A local user.
///
/// `auth_data` holds the provider's stable key for this person and must be
/// stripped with [`User::sanitize`] before the record leaves the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
	pub id: UserId,
	pub username: String,
	pub email: String,
	pub first_name: String,
	pub last_name: String,
	pub auth_service: ProviderKind,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub auth_data: Option<String>,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl User {
	pub fn from_new(new: NewUser) -> Self {
		let now = Utc::now();
		Self {
			id: UserId::generate(),
			username: new.username,
			email: new.email,
			first_name: new.first_name,
			last_name: new.last_name,
			auth_service: new.auth_service,
			auth_data: Some(new.auth_data),
			created_at: now,
			updated_at: now,
		}
	}

	pub fn display_name(&self) -> String {
		match (self.first_name.is_empty(), self.last_name.is_empty()) {
			(false, false) => format!("{} {}", self.first_name, self.last_name),
			(false, true) => self.first_name.clone(),
			(true, false) => self.last_name.clone(),
			(true, true) => self.username.clone(),
		}
	}

	/// Removes provider credentials before the record is returned to a client.
	pub fn sanitize(&mut self) {
		self.auth_data = None;
	}

	pub fn sanitized(mut self) -> Self {
		self.sanitize();
		self
	}

	/// Two users are the same federated person iff their provider keys match.
	pub fn is_same_identity(&self, other: &User) -> bool {
		self.auth_service == other.auth_service
			&& self.auth_data.is_some()
			&& self.auth_data == other.auth_data
	}
}
