// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::time::Duration;

use fedlink_server_config::OidcConfig;
use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

pub const DISCOVERY_TIMEOUT: Duration = Duration::from_secs(10);

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum OidcError {
	#[error("invalid discovery endpoint {url}: {source}")]
	InvalidEndpoint {
		url: String,
		#[source]
		source: url::ParseError,
	},

	#[error("discovery request failed: {0}")]
	Discovery(#[from] reqwest::Error),

	#[error("discovery endpoint returned HTTP {0}")]
	DiscoveryStatus(reqwest::StatusCode),
}

// =============================================================================
// Endpoints
// =============================================================================

/// Endpoints used by the SSO flow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OidcEndpoints {
	pub discovery_endpoint: Option<String>,
	pub authorization_endpoint: Option<String>,
	pub token_endpoint: Option<String>,
	pub userinfo_endpoint: Option<String>,
}

impl OidcEndpoints {
	pub fn is_complete(&self) -> bool {
		self.authorization_endpoint.is_some()
			&& self.token_endpoint.is_some()
			&& self.userinfo_endpoint.is_some()
	}
}

impl From<&OidcConfig> for OidcEndpoints {
	fn from(config: &OidcConfig) -> Self {
		Self {
			discovery_endpoint: config.discovery_endpoint.clone(),
			authorization_endpoint: config.authorization_endpoint.clone(),
			token_endpoint: config.token_endpoint.clone(),
			userinfo_endpoint: config.userinfo_endpoint.clone(),
		}
	}
}

#[derive(Debug, Default, Deserialize)]
struct DiscoveryDocument {
	#[serde(default)]
	authorization_endpoint: String,
	#[serde(default)]
	token_endpoint: String,
	#[serde(default)]
	userinfo_endpoint: String,
}

/// Fills missing endpoints from the discovery document.
///
/// Configured endpoints are never overwritten. When all three are already
/// set, or there is no discovery endpoint, the input is returned unchanged
/// without any network call.
#[tracing::instrument(skip_all, fields(discovery = ?endpoints.discovery_endpoint))]
pub async fn resolve_endpoints(endpoints: OidcEndpoints) -> Result<OidcEndpoints, OidcError> {
	if endpoints.is_complete() {
		debug!("oidc endpoints fully configured");
		return Ok(endpoints);
	}
	let Some(discovery_url) = endpoints.discovery_endpoint.clone() else {
		debug!("no discovery endpoint configured");
		return Ok(endpoints);
	};
	let url = Url::parse(&discovery_url).map_err(|source| OidcError::InvalidEndpoint {
		url: discovery_url.clone(),
		source,
	})?;

	let client = fedlink_common_http::builder()
		.timeout(DISCOVERY_TIMEOUT)
		.build()?;
	let response = client.get(url).send().await?;
	let status = response.status();
	if !status.is_success() {
		return Err(OidcError::DiscoveryStatus(status));
	}
	let doc: DiscoveryDocument = response.json().await?;

	let fill = |current: Option<String>, discovered: String| {
		current.or_else(|| Some(discovered).filter(|s| !s.is_empty()))
	};
	let resolved = OidcEndpoints {
		authorization_endpoint: fill(endpoints.authorization_endpoint, doc.authorization_endpoint),
		token_endpoint: fill(endpoints.token_endpoint, doc.token_endpoint),
		userinfo_endpoint: fill(endpoints.userinfo_endpoint, doc.userinfo_endpoint),
		discovery_endpoint: endpoints.discovery_endpoint,
	};
	info!(
		authorization = ?resolved.authorization_endpoint,
		token = ?resolved.token_endpoint,
		userinfo = ?resolved.userinfo_endpoint,
		"oidc endpoints resolved from discovery"
	);
	Ok(resolved)
}
