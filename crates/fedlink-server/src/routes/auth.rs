// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authentication HTTP handlers.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use fedlink_common_secret::SecretString;
use fedlink_server_auth::{IdentitySource, ProviderKind, Session, UserId};
use fedlink_server_auth_odoo::{LoginOutcome, OdooIdentitySource, OdooLogin};
use fedlink_server_config::SessionConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::api::AppState;
use crate::client_info::client_context;
use crate::error::ServerError;

#[derive(Debug, Deserialize)]
pub struct OdooLoginRequest {
	#[serde(default)]
	pub identifier: String,
	#[serde(default, alias = "password")]
	pub secret: Option<SecretString>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
	pub user_id: UserId,
	pub username: String,
	pub email: String,
	/// True when this login created the local user.
	pub create: bool,
	pub updated_fields: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProvidersResponse {
	pub providers: Vec<ProviderKind>,
}

/// GET /auth/providers
pub async fn get_providers(State(state): State<AppState>) -> Json<ProvidersResponse> {
	Json(ProvidersResponse {
		providers: state.providers.enabled(state.entitlements.as_ref()),
	})
}

/// POST /auth/odoo/login
#[instrument(skip_all)]
pub async fn login_odoo(
	State(state): State<AppState>,
	headers: HeaderMap,
	body: Bytes,
) -> Result<Response, ServerError> {
	let authenticator = state.providers.odoo.as_ref().map_err(|e| e.clone())?;

	let request: OdooLoginRequest = serde_json::from_slice(&body)
		.map_err(|e| ServerError::Validation(format!("malformed login body: {e}")))?;
	let identifier = request.identifier.trim().to_string();
	if identifier.is_empty() {
		return Err(ServerError::Validation("identifier is required".to_string()));
	}
	let secret = request
		.secret
		.filter(|s| !s.is_blank())
		.ok_or_else(|| ServerError::Validation("secret is required".to_string()))?;

	let account = match authenticator.login(&identifier, &secret).await? {
		LoginOutcome::Authenticated(account) => account,
		LoginOutcome::InvalidCredentials => return Err(ServerError::InvalidCredentials),
	};

	let identity = OdooIdentitySource.normalize(OdooLogin {
		account,
		identifier,
	})?;
	let client = client_context(&headers);
	let provisioned = state.provisioning.provision(&identity, &client).await?;

	let user = provisioned.user.sanitized();
	info!(
		user_id = %user.id,
		created = provisioned.created,
		teams = provisioned.synced_teams.len(),
		"odoo login succeeded"
	);

	let cookie = session_cookie(&state.session, &provisioned.session);
	let body = LoginResponse {
		user_id: user.id,
		username: user.username,
		email: user.email,
		create: provisioned.created,
		updated_fields: Vec::new(),
	};
	Ok((StatusCode::OK, [(header::SET_COOKIE, cookie)], Json(body)).into_response())
}

fn session_cookie(config: &SessionConfig, session: &Session) -> String {
	let secure = if config.cookie_secure { "; Secure" } else { "" };
	format!(
		"{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}{secure}",
		config.cookie_name,
		session.token.expose(),
		session.max_age_seconds()
	)
}
