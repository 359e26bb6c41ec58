// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Id newtypes and small enums used across the crate.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// =============================================================================
// ID Newtypes
// =============================================================================

macro_rules! define_id_type {
	($name:ident, $doc:expr) => {
		#[doc = $doc]
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(Uuid);

		impl $name {
			pub fn new(id: Uuid) -> Self {
				Self(id)
			}

			pub fn generate() -> Self {
				Self(Uuid::new_v4())
			}

			pub fn into_inner(self) -> Uuid {
				self.0
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				write!(f, "{}", self.0)
			}
		}

		impl From<Uuid> for $name {
			fn from(id: Uuid) -> Self {
				Self(id)
			}
		}
	};
}

define_id_type!(UserId, "Unique identifier for a local user.");
define_id_type!(TeamId, "Unique identifier for a local team.");
define_id_type!(SessionId, "Unique identifier for a local session.");

// =============================================================================
// Providers
// =============================================================================

/// External identity source a user was federated from.
///
/// The string form is stored as the user's auth service tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
	/// Odoo over JSON-RPC.
	Odoo,
	/// Any OpenID Connect provider via UserInfo claims.
	OpenId,
}

impl ProviderKind {
	pub fn all() -> &'static [ProviderKind] {
		&[ProviderKind::Odoo, ProviderKind::OpenId]
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			ProviderKind::Odoo => "odoo",
			ProviderKind::OpenId => "openid",
		}
	}
}

impl fmt::Display for ProviderKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for ProviderKind {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"odoo" => Ok(ProviderKind::Odoo),
			"openid" => Ok(ProviderKind::OpenId),
			other => Err(format!("unknown identity provider: {other}")),
		}
	}
}

// =============================================================================
// Team Roles
// =============================================================================

/// Role within a single team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamRole {
	Member,
	Admin,
}

impl TeamRole {
	/// Returns true if this role has at least the permissions of `other`.
	pub fn has_permission_of(&self, other: TeamRole) -> bool {
		matches!(
			(self, other),
			(TeamRole::Admin, _) | (TeamRole::Member, TeamRole::Member)
		)
	}
}

impl fmt::Display for TeamRole {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			TeamRole::Member => write!(f, "member"),
			TeamRole::Admin => write!(f, "admin"),
		}
	}
}
