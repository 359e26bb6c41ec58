// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Health HTTP handler.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::{api::AppState, version::VERSION};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
	pub status: String,
	pub version: String,
	/// Whether the Odoo provider has a usable configuration.
	pub odoo_configured: bool,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
	Json(HealthResponse {
		status: "healthy".to_string(),
		version: VERSION.to_string(),
		odoo_configured: state.providers.odoo.is_ok(),
	})
}
