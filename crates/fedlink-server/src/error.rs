// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP error mapping for login failures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use fedlink_server_auth::IdentityError;
use fedlink_server_auth_odoo::{ConfigError as OdooConfigError, OdooError};
use fedlink_server_provisioning::{ProvisioningError, StoreError};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
	pub error: String,
	pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	#[error("invalid request: {0}")]
	Validation(String),

	#[error("invalid credentials")]
	InvalidCredentials,

	#[error(transparent)]
	Configuration(#[from] OdooConfigError),

	#[error(transparent)]
	Odoo(#[from] OdooError),

	#[error(transparent)]
	Identity(#[from] IdentityError),

	#[error(transparent)]
	Provisioning(#[from] ProvisioningError),
}

impl ServerError {
	pub fn status(&self) -> StatusCode {
		match self {
			ServerError::Validation(_) => StatusCode::BAD_REQUEST,
			ServerError::InvalidCredentials | ServerError::Identity(_) => StatusCode::UNAUTHORIZED,
			ServerError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
			ServerError::Odoo(OdooError::UserNotFound { .. }) => StatusCode::UNAUTHORIZED,
			ServerError::Odoo(_) => StatusCode::BAD_GATEWAY,
			ServerError::Provisioning(e) => match e.store_error() {
				StoreError::Conflict(_) => StatusCode::CONFLICT,
				StoreError::NotFound(_) => StatusCode::NOT_FOUND,
				StoreError::Invalid(_) => StatusCode::BAD_REQUEST,
				StoreError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
			},
		}
	}

	/// Machine-readable code for the `error` field.
	pub fn code(&self) -> &'static str {
		match self {
			ServerError::Validation(_) => "invalid_request",
			ServerError::InvalidCredentials | ServerError::Identity(_) => "invalid_credentials",
			ServerError::Configuration(_) => "configuration_error",
			ServerError::Odoo(OdooError::UserNotFound { .. }) => "user_not_found",
			ServerError::Odoo(OdooError::Transport { .. }) => "upstream_unavailable",
			ServerError::Odoo(OdooError::Protocol { .. }) => "upstream_error",
			ServerError::Provisioning(_) => "store_error",
		}
	}
}

impl IntoResponse for ServerError {
	fn into_response(self) -> Response {
		let status = self.status();
		let step = match &self {
			ServerError::Odoo(e) => Some(e.step().as_str()),
			_ => None,
		};
		if status.is_server_error() {
			error!(error = %self, status = status.as_u16(), step, "login failed");
		} else {
			warn!(error = %self, status = status.as_u16(), step, "login rejected");
		}

		let message = match &self {
			// Upstream and store details stay in the logs.
			ServerError::Odoo(OdooError::Transport { step, .. }) => {
				format!("Odoo is unreachable ({step})")
			}
			ServerError::Odoo(OdooError::Protocol { step, .. }) => {
				format!("Odoo returned an unusable response ({step})")
			}
			ServerError::Provisioning(_) => "Failed to provision the local account".to_string(),
			ServerError::Identity(_) => "invalid credentials".to_string(),
			other => other.to_string(),
		};

		let body = ErrorResponse {
			error: self.code().to_string(),
			message,
		};
		(status, Json(body)).into_response()
	}
}
