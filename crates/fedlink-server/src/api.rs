// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Application state and router.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use fedlink_server_auth::ProviderKind;
use fedlink_server_auth_odoo::{ConfigError as OdooConfigError, OdooAuthenticator, OdooSettings};
use fedlink_server_auth_oidc::{resolve_endpoints, OidcEndpoints};
use fedlink_server_config::{ServerConfig, SessionConfig};
use fedlink_server_provisioning::{MemoryStore, ProvisioningService};
use tracing::{info, warn};

use crate::license::{Entitlements, OpenSourceEntitlements, FEATURE_OPENID};
use crate::routes;

/// Provider table, built once at startup.
#[derive(Debug, Clone)]
pub struct Providers {
	/// Configuration problems are reported per request rather than at startup.
	pub odoo: Result<Arc<OdooAuthenticator>, OdooConfigError>,
	pub oidc: Option<OidcEndpoints>,
}

impl Providers {
	pub fn from_config(config: &ServerConfig) -> Self {
		let odoo = OdooSettings::from_config(&config.odoo).map(|settings| {
			info!(base_url = %settings.base_url, database = %settings.database, "odoo provider configured");
			Arc::new(OdooAuthenticator::new(settings))
		});
		if let Err(e) = &odoo {
			warn!(error = %e, "odoo provider is not configured");
		}

		let oidc = config
			.oidc
			.enabled
			.then(|| OidcEndpoints::from(&config.oidc));

		Self { odoo, oidc }
	}

	/// Fills missing OIDC endpoints from the discovery document. A failed
	/// lookup keeps the configured endpoints.
	pub async fn resolve_oidc(mut self) -> Self {
		if let Some(endpoints) = self.oidc.take() {
			self.oidc = Some(match resolve_endpoints(endpoints.clone()).await {
				Ok(resolved) => resolved,
				Err(e) => {
					warn!(error = %e, "OIDC discovery failed, using configured endpoints");
					endpoints
				}
			});
		}
		self
	}

	/// Providers to advertise to clients.
	pub fn enabled(&self, entitlements: &dyn Entitlements) -> Vec<ProviderKind> {
		let mut enabled = Vec::new();
		if self.odoo.is_ok() {
			enabled.push(ProviderKind::Odoo);
		}
		if self.oidc.is_some() && entitlements.has_feature(FEATURE_OPENID) {
			enabled.push(ProviderKind::OpenId);
		}
		enabled
	}
}

#[derive(Clone)]
pub struct AppState {
	pub providers: Arc<Providers>,
	pub provisioning: ProvisioningService,
	pub entitlements: Arc<dyn Entitlements>,
	pub session: SessionConfig,
}

impl AppState {
	/// State backed by an in-memory store and open-source entitlements.
	pub fn new(providers: Providers, store: Arc<MemoryStore>, config: &ServerConfig) -> Self {
		Self {
			providers: Arc::new(providers),
			provisioning: ProvisioningService::with_store(store),
			entitlements: Arc::new(OpenSourceEntitlements),
			session: config.session.clone(),
		}
	}

	pub fn with_entitlements(mut self, entitlements: Arc<dyn Entitlements>) -> Self {
		self.entitlements = entitlements;
		self
	}
}

pub fn create_router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(routes::health::health_check))
		.route("/auth/providers", get(routes::auth::get_providers))
		.route("/auth/odoo/login", post(routes::auth::login_odoo))
		.with_state(state)
}
