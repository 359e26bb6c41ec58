// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::time::Duration;

use fedlink_server_config::OdooConfig;

const AUTHENTICATE_PATH: &str = "/web/session/authenticate";

/// Odoo settings that are missing at request time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
	#[error("Odoo base URL is not configured (FEDLINK_SERVER_ODOO_BASE_URL)")]
	MissingBaseUrl,

	#[error("Odoo database is not configured (FEDLINK_SERVER_ODOO_DB)")]
	MissingDatabase,
}

/// Validated connection settings for one Odoo database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OdooSettings {
	pub base_url: String,
	pub database: String,
	pub jsonrpc_path: String,
	pub timeout: Duration,
	pub sync_organizations: bool,
}

impl OdooSettings {
	pub fn from_config(config: &OdooConfig) -> Result<Self, ConfigError> {
		let base_url = config.base_url.clone().ok_or(ConfigError::MissingBaseUrl)?;
		let database = config.database.clone().ok_or(ConfigError::MissingDatabase)?;
		Ok(Self {
			base_url,
			database,
			jsonrpc_path: config.jsonrpc_path.clone(),
			timeout: Duration::from_millis(config.timeout_ms),
			sync_organizations: config.sync_organizations,
		})
	}

	pub fn authenticate_url(&self) -> String {
		format!("{}{AUTHENTICATE_PATH}", self.base_url)
	}

	pub fn rpc_url(&self) -> String {
		format!("{}{}", self.base_url, self.jsonrpc_path)
	}
}
