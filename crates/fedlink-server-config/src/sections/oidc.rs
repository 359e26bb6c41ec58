// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! OpenID Connect provider endpoints.

use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OidcConfig {
	pub enabled: bool,
	pub discovery_endpoint: Option<String>,
	pub authorization_endpoint: Option<String>,
	pub token_endpoint: Option<String>,
	pub userinfo_endpoint: Option<String>,
}

impl OidcConfig {
	/// True when every endpoint is known without discovery.
	pub fn is_fully_specified(&self) -> bool {
		self.authorization_endpoint.is_some()
			&& self.token_endpoint.is_some()
			&& self.userinfo_endpoint.is_some()
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OidcConfigLayer {
	#[serde(default)]
	pub enabled: Option<bool>,
	#[serde(default)]
	pub discovery_endpoint: Option<String>,
	#[serde(default)]
	pub authorization_endpoint: Option<String>,
	#[serde(default)]
	pub token_endpoint: Option<String>,
	#[serde(default)]
	pub userinfo_endpoint: Option<String>,
}

impl OidcConfigLayer {
	pub fn merge(&mut self, other: OidcConfigLayer) {
		if other.enabled.is_some() {
			self.enabled = other.enabled;
		}
		if other.discovery_endpoint.is_some() {
			self.discovery_endpoint = other.discovery_endpoint;
		}
		if other.authorization_endpoint.is_some() {
			self.authorization_endpoint = other.authorization_endpoint;
		}
		if other.token_endpoint.is_some() {
			self.token_endpoint = other.token_endpoint;
		}
		if other.userinfo_endpoint.is_some() {
			self.userinfo_endpoint = other.userinfo_endpoint;
		}
	}

	pub fn finalize(self) -> OidcConfig {
		let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
		OidcConfig {
			enabled: self.enabled.unwrap_or(false),
			discovery_endpoint: non_empty(self.discovery_endpoint),
			authorization_endpoint: non_empty(self.authorization_endpoint),
			token_endpoint: non_empty(self.token_endpoint),
			userinfo_endpoint: non_empty(self.userinfo_endpoint),
		}
	}
}
