// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Odoo JSON-RPC provider configuration.
//!
//! The base URL and database are optional here so the server can start
//! without them; the login endpoint reports a configuration error per request
//! until both are set.

use serde::Deserialize;

pub const DEFAULT_JSONRPC_PATH: &str = "/jsonrpc";
pub const DEFAULT_TIMEOUT_MS: u64 = 8000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OdooConfig {
	/// Without a trailing `/`.
	pub base_url: Option<String>,
	pub database: Option<String>,
	pub jsonrpc_path: String,
	pub timeout_ms: u64,
	/// Fetch companies and admin flags with extra RPC calls after login.
	pub sync_organizations: bool,
}

impl Default for OdooConfig {
	fn default() -> Self {
		OdooConfigLayer::default().finalize()
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OdooConfigLayer {
	#[serde(default)]
	pub base_url: Option<String>,
	#[serde(default)]
	pub database: Option<String>,
	#[serde(default)]
	pub jsonrpc_path: Option<String>,
	#[serde(default)]
	pub timeout_ms: Option<i64>,
	#[serde(default)]
	pub sync_organizations: Option<bool>,
}

impl OdooConfigLayer {
	pub fn merge(&mut self, other: OdooConfigLayer) {
		if other.base_url.is_some() {
			self.base_url = other.base_url;
		}
		if other.database.is_some() {
			self.database = other.database;
		}
		if other.jsonrpc_path.is_some() {
			self.jsonrpc_path = other.jsonrpc_path;
		}
		if other.timeout_ms.is_some() {
			self.timeout_ms = other.timeout_ms;
		}
		if other.sync_organizations.is_some() {
			self.sync_organizations = other.sync_organizations;
		}
	}

	pub fn finalize(self) -> OdooConfig {
		let base_url = self
			.base_url
			.map(|url| url.trim().trim_end_matches('/').to_string())
			.filter(|url| !url.is_empty());
		let database = self
			.database
			.map(|db| db.trim().to_string())
			.filter(|db| !db.is_empty());
		let jsonrpc_path = self
			.jsonrpc_path
			.filter(|p| !p.trim().is_empty())
			.map(|p| {
				if p.starts_with('/') {
					p
				} else {
					format!("/{p}")
				}
			})
			.unwrap_or_else(|| DEFAULT_JSONRPC_PATH.to_string());
		let timeout_ms = match self.timeout_ms {
			Some(ms) if ms > 0 => ms as u64,
			_ => DEFAULT_TIMEOUT_MS,
		};

		OdooConfig {
			base_url,
			database,
			jsonrpc_path,
			timeout_ms,
			sync_organizations: self.sync_organizations.unwrap_or(true),
		}
	}
}
