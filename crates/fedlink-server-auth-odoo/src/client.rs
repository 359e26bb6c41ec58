// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use fedlink_common_secret::SecretString;
use fedlink_jsonrpc::{RpcClient, RpcReply, RpcRequest, RpcResponse};
use fedlink_server_auth::OrganizationRef;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::account::{CompanyRow, MembershipRow, OdooAccount, ProfileRow, SessionInfo};
use crate::classify::{classify, Classification};
use crate::config::OdooSettings;
use crate::error::{OdooError, Step};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
	Authenticated(OdooAccount),
	/// Odoo rejected the identifier/password pair. Callers may try another
	/// provider.
	InvalidCredentials,
}

/// Runs the Odoo login sequence against one database.
#[derive(Debug, Clone)]
pub struct OdooAuthenticator {
	settings: OdooSettings,
	rpc: RpcClient,
}

struct Memberships {
	companies: Vec<OrganizationRef>,
	is_system: bool,
	is_admin: bool,
}

impl OdooAuthenticator {
	pub fn new(settings: OdooSettings) -> Self {
		let rpc = RpcClient::new(settings.timeout);
		Self { settings, rpc }
	}

	/// Authenticates `identifier` / `secret` and gathers the account details.
	///
	/// Returns [`LoginOutcome::InvalidCredentials`] without making any further
	/// call when Odoo rejects the credentials.
	#[tracing::instrument(skip(self, secret), fields(db = %self.settings.database))]
	pub async fn login(
		&self,
		identifier: &str,
		secret: &SecretString,
	) -> Result<LoginOutcome, OdooError> {
		let Some(session) = self.authenticate(identifier, secret).await? else {
			warn!("odoo rejected credentials");
			return Ok(LoginOutcome::InvalidCredentials);
		};
		let uid = session.uid();

		let profile = self.fetch_profile(uid, secret).await?;

		let memberships = if self.settings.sync_organizations {
			let fetched = self.fetch_memberships(uid, secret).await?;
			Memberships {
				companies: fetched.companies,
				is_system: fetched.is_system || session.is_system(),
				is_admin: fetched.is_admin || session.is_admin(),
			}
		} else {
			Memberships {
				companies: session.allowed_companies(),
				is_system: session.is_system(),
				is_admin: session.is_admin(),
			}
		};

		// An empty login is replaced by the typed identifier during normalization.
		let login = profile.login.as_text().unwrap_or_default().to_string();
		let name = profile.name.as_text().unwrap_or_default().to_string();

		info!(
			uid,
			is_system = memberships.is_system,
			is_admin = memberships.is_admin,
			companies = memberships.companies.len(),
			"odoo login succeeded"
		);

		Ok(LoginOutcome::Authenticated(OdooAccount {
			uid,
			login,
			name,
			email: profile.email.as_text().map(str::to_string),
			is_admin: memberships.is_admin,
			is_system: memberships.is_system,
			companies: memberships.companies,
		}))
	}

	/// Step A. `None` means rejected credentials.
	async fn authenticate(
		&self,
		identifier: &str,
		secret: &SecretString,
	) -> Result<Option<SessionInfo>, OdooError> {
		let step = Step::Authenticate;
		let request = RpcRequest::call(
			json!({
				"db": self.settings.database,
				"login": identifier,
				"password": secret.expose(),
			}),
			step.request_id(),
		);

		let endpoint = self.settings.authenticate_url();
		let (status, response) = match self.send(step, &endpoint, &request).await? {
			RpcReply::Denied(status) => {
				debug!(%status, "authenticate denied by status");
				return Ok(None);
			}
			RpcReply::Envelope { status, response } => (status, response),
		};

		if let Some(error) = response.error.as_ref() {
			return match classify(status, Some(error)) {
				Classification::InvalidCredentials => Ok(None),
				Classification::UpstreamFailure => Err(OdooError::Protocol {
					step,
					message: error.message.clone(),
				}),
			};
		}

		let Some(result) = response.usable_result() else {
			return match classify(status, None) {
				Classification::InvalidCredentials => Ok(None),
				Classification::UpstreamFailure => Err(OdooError::Protocol {
					step,
					message: "empty authenticate result".to_string(),
				}),
			};
		};

		match SessionInfo::from_result(result) {
			Some(session) if session.uid() > 0 => {
				debug!(uid = session.uid(), "authenticate succeeded");
				Ok(Some(session))
			}
			_ => Ok(None),
		}
	}

	/// Step B.
	async fn fetch_profile(&self, uid: i64, secret: &SecretString) -> Result<ProfileRow, OdooError> {
		let rows: Option<Vec<ProfileRow>> = self
			.execute_kw(
				Step::FetchProfile,
				uid,
				secret,
				"res.users",
				json!([[["id", "=", uid]]]),
				&["id", "name", "login", "email"],
			)
			.await?;

		rows
			.and_then(|rows| rows.into_iter().next())
			.ok_or(OdooError::UserNotFound { uid })
	}

	/// Step C.
	async fn fetch_memberships(
		&self,
		uid: i64,
		secret: &SecretString,
	) -> Result<Memberships, OdooError> {
		let step = Step::FetchMemberships;
		let rows: Option<Vec<MembershipRow>> = self
			.execute_kw(
				step,
				uid,
				secret,
				"res.users",
				json!([[["id", "=", uid]]]),
				&["id", "company_ids", "is_system", "is_admin", "groups_id"],
			)
			.await?;
		let row = rows
			.and_then(|rows| rows.into_iter().next())
			.ok_or_else(|| OdooError::Protocol {
				step,
				message: format!("no membership row for uid {uid}"),
			})?;

		let company_ids = row.company_ids.as_id_list();
		let companies = if company_ids.is_empty() {
			Vec::new()
		} else {
			let step = Step::FetchOrganizations;
			let rows: Option<Vec<CompanyRow>> = self
				.execute_kw(
					step,
					uid,
					secret,
					"res.company",
					json!([[["id", "in", company_ids]]]),
					&["id", "name"],
				)
				.await?;
			rows.unwrap_or_default()
				.into_iter()
				.filter_map(CompanyRow::into_organization)
				.collect()
		};

		Ok(Memberships {
			companies,
			is_system: row.is_system.as_flag(),
			is_admin: row.is_admin.as_flag(),
		})
	}

	/// `object.execute_kw(db, uid, password, model, "search_read", domain, {fields})`.
	///
	/// Any RPC error is an upstream failure here. A missing or empty result
	/// yields `Ok(None)`; a result that is not a list of `T` is a protocol error
	/// for every step except the profile fetch, which reports it as `None`.
	async fn execute_kw<T: DeserializeOwned>(
		&self,
		step: Step,
		uid: i64,
		secret: &SecretString,
		model: &str,
		domain: Value,
		fields: &[&str],
	) -> Result<Option<Vec<T>>, OdooError> {
		let request = RpcRequest::call(
			json!({
				"service": "object",
				"method": "execute_kw",
				"args": [
					self.settings.database,
					uid,
					secret.expose(),
					model,
					"search_read",
					domain,
					{"fields": fields},
				],
			}),
			step.request_id(),
		);

		let response = match self.send(step, &self.settings.rpc_url(), &request).await? {
			RpcReply::Denied(status) => {
				return Err(OdooError::Protocol {
					step,
					message: format!("HTTP {status}"),
				});
			}
			RpcReply::Envelope { response, .. } => response,
		};

		if let Some(error) = response.error {
			return Err(OdooError::Protocol {
				step,
				message: error.message,
			});
		}

		decode_rows(step, response)
	}

	async fn send(
		&self,
		step: Step,
		endpoint: &str,
		request: &RpcRequest,
	) -> Result<RpcReply, OdooError> {
		self.rpc.call(endpoint, request).await.map_err(|source| {
			warn!(step = %step, error = %source, timeout = source.is_timeout(), "odoo request failed");
			OdooError::Transport { step, source }
		})
	}
}

fn decode_rows<T: DeserializeOwned>(
	step: Step,
	response: RpcResponse,
) -> Result<Option<Vec<T>>, OdooError> {
	let Some(result) = response.result else {
		return Ok(None);
	};
	match serde_json::from_value::<Vec<T>>(result) {
		Ok(rows) if rows.is_empty() => Ok(None),
		Ok(rows) => Ok(Some(rows)),
		Err(_) if step == Step::FetchProfile => Ok(None),
		Err(e) => Err(OdooError::Protocol {
			step,
			message: format!("unexpected result shape: {e}"),
		}),
	}
}
