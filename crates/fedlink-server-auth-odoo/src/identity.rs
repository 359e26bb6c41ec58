// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use fedlink_server_auth::{IdentityError, IdentitySource, ProviderKind, RemoteIdentity};

use crate::account::OdooAccount;

pub const SYNTHETIC_EMAIL_DOMAIN: &str = "odoo.local";

/// A completed Odoo login plus the identifier the user typed.
#[derive(Debug, Clone)]
pub struct OdooLogin {
	pub account: OdooAccount,
	pub identifier: String,
}

/// Maps Odoo accounts onto [`RemoteIdentity`].
///
/// The local email is always synthesized from the uid
/// (`odoo_<uid>@odoo.local`); the address stored in Odoo is ignored so that
/// an email change upstream never forks the local account.
#[derive(Debug, Clone, Copy, Default)]
pub struct OdooIdentitySource;

impl OdooIdentitySource {
	pub fn synthetic_email(uid: i64) -> String {
		format!("{}_{uid}@{SYNTHETIC_EMAIL_DOMAIN}", ProviderKind::Odoo)
	}
}

impl IdentitySource for OdooIdentitySource {
	type Payload = OdooLogin;

	fn kind(&self) -> ProviderKind {
		ProviderKind::Odoo
	}

	fn normalize(&self, payload: OdooLogin) -> Result<RemoteIdentity, IdentityError> {
		let OdooLogin {
			account,
			identifier,
		} = payload;
		if account.uid <= 0 {
			return Err(IdentityError::InvalidExternalId(account.uid.to_string()));
		}

		let mut identity = RemoteIdentity::new(
			self.kind(),
			account.uid.to_string(),
			Self::synthetic_email(account.uid),
		)?;
		identity.login_name = if account.login.trim().is_empty() {
			identifier
		} else {
			account.login
		};
		identity.display_name = account.name.clone();
		identity.first_name = account.name;
		identity.is_privileged = account.is_admin;
		identity.is_system_privileged = account.is_system;
		identity.set_organizations(account.companies);
		Ok(identity)
	}
}
