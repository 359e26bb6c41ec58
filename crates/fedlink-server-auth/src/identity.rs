// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Provider-agnostic view of an authenticated external person.
//!
//! Each provider decodes its own payload (an Odoo account record, an OIDC
//! UserInfo document) and hands provisioning a [`RemoteIdentity`]. A fresh
//! value is built for every login attempt and never cached.

use crate::types::ProviderKind;
use crate::user::{clean_username, generate_fallback_username};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
	/// Neither a subject nor an email was supplied.
	#[error("identity payload carries neither a subject nor an email")]
	MissingIdentity,

	/// The upstream id is zero or otherwise unusable.
	#[error("invalid external user id: {0}")]
	InvalidExternalId(String),
}

// =============================================================================
// Organizations
// =============================================================================

/// An upstream organization (Odoo company) the person belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrganizationRef {
	pub external_id: i64,
	pub name: String,
}

impl OrganizationRef {
	pub fn new(external_id: i64, name: impl Into<String>) -> Self {
		Self {
			external_id,
			name: name.into(),
		}
	}
}

/// Drops entries with a zero id or blank name and repeated ids, keeping the
/// first occurrence and the input order.
pub fn dedupe_organizations<I>(orgs: I) -> Vec<OrganizationRef>
where
	I: IntoIterator<Item = OrganizationRef>,
{
	let mut seen = HashSet::new();
	orgs
		.into_iter()
		.filter(|org| org.external_id != 0 && !org.name.trim().is_empty())
		.filter(|org| seen.insert(org.external_id))
		.collect()
}

// =============================================================================
// RemoteIdentity
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteIdentity {
	pub provider: ProviderKind,
	/// Provider-scoped id: the Odoo uid or the OIDC subject.
	pub external_id: String,
	/// Upstream admin flag.
	pub is_privileged: bool,
	/// Upstream system/settings flag.
	pub is_system_privileged: bool,
	pub display_name: String,
	pub login_name: String,
	/// Resolved email; may be synthesized by the provider.
	pub email: String,
	pub first_name: String,
	pub last_name: String,
	/// Stable key stored as the local user's auth data.
	pub auth_key: String,
	organizations: Vec<OrganizationRef>,
}

impl RemoteIdentity {
	pub fn new(
		provider: ProviderKind,
		external_id: impl Into<String>,
		email: impl Into<String>,
	) -> Result<Self, IdentityError> {
		let external_id = external_id.into();
		let email = email.into();
		if external_id.is_empty() || external_id == "0" {
			return Err(IdentityError::InvalidExternalId(external_id));
		}
		if email.is_empty() {
			return Err(IdentityError::MissingIdentity);
		}
		Ok(Self {
			provider,
			auth_key: external_id.clone(),
			external_id,
			is_privileged: false,
			is_system_privileged: false,
			display_name: String::new(),
			login_name: String::new(),
			email,
			first_name: String::new(),
			last_name: String::new(),
			organizations: Vec::new(),
		})
	}

	pub fn organizations(&self) -> &[OrganizationRef] {
		&self.organizations
	}

	/// Replaces the organization list, applying [`dedupe_organizations`].
	pub fn set_organizations<I>(&mut self, orgs: I)
	where
		I: IntoIterator<Item = OrganizationRef>,
	{
		self.organizations = dedupe_organizations(orgs);
	}

	/// Team admin is granted only when both upstream flags hold.
	pub fn grants_team_admin(&self) -> bool {
		self.is_privileged && self.is_system_privileged
	}

	/// Local username for a newly created user: the login name up to any `@`,
	/// cleaned, or a generated name when nothing usable remains.
	pub fn local_username(&self) -> String {
		let base = self.login_name.split('@').next().unwrap_or_default();
		clean_username(base).unwrap_or_else(generate_fallback_username)
	}
}

/// A provider that can turn its own payload into a [`RemoteIdentity`].
pub trait IdentitySource {
	type Payload;

	fn kind(&self) -> ProviderKind;

	fn normalize(&self, payload: Self::Payload) -> Result<RemoteIdentity, IdentityError>;
}
