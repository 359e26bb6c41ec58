// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Layered configuration for the fedlink server.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Consistent environment variable naming (`FEDLINK_SERVER_*`)
//!
//! # Usage
//!
//! ```ignore
//! use fedlink_server_config::load_config;
//!
//! let config = load_config()?;
//! println!("Server listening on {}", config.socket_addr());
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::ServerConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use tracing::{debug, info};

/// Fully resolved server configuration.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
	pub http: HttpConfig,
	pub logging: LoggingConfig,
	pub odoo: OdooConfig,
	pub oidc: OidcConfig,
	pub session: SessionConfig,
}

impl ServerConfig {
	/// Get the socket address string for binding.
	pub fn socket_addr(&self) -> String {
		format!("{}:{}", self.http.host, self.http.port)
	}
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`FEDLINK_SERVER_*`)
/// 2. Config file (`/etc/fedlink/server.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<ServerConfig, ConfigError> {
	let sources: Vec<Box<dyn ConfigSource>> = vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	];
	load_from_sources(sources)
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<ServerConfig, ConfigError> {
	let sources: Vec<Box<dyn ConfigSource>> = vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	];
	load_from_sources(sources)
}

fn load_from_sources(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<ServerConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = ServerConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
pub fn finalize(layer: ServerConfigLayer) -> Result<ServerConfig, ConfigError> {
	let http = layer.http.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();
	let odoo = layer.odoo.unwrap_or_default().finalize();
	let oidc = layer.oidc.unwrap_or_default().finalize();
	let session = layer.session.unwrap_or_default().finalize();

	validate_config(&oidc)?;

	info!(
		host = %http.host,
		port = http.port,
		odoo_configured = odoo.base_url.is_some() && odoo.database.is_some(),
		odoo_timeout_ms = odoo.timeout_ms,
		odoo_sync_organizations = odoo.sync_organizations,
		oidc_enabled = oidc.enabled,
		"Server configuration loaded"
	);

	Ok(ServerConfig {
		http,
		logging,
		odoo,
		oidc,
		session,
	})
}

/// Validate cross-field configuration rules.
fn validate_config(oidc: &OidcConfig) -> Result<(), ConfigError> {
	if oidc.enabled && oidc.discovery_endpoint.is_none() && !oidc.is_fully_specified() {
		return Err(ConfigError::Validation(
			"FEDLINK_SERVER_OIDC_ENABLED is set but neither a discovery endpoint nor all of the \
			 authorization, token and userinfo endpoints are configured"
				.to_string(),
		));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn finalize_empty_layer_uses_defaults() {
		let config = finalize(ServerConfigLayer::default()).unwrap();
		assert_eq!(config.socket_addr(), "0.0.0.0:8080");
		assert_eq!(config.odoo.jsonrpc_path, DEFAULT_JSONRPC_PATH);
		assert_eq!(config.session.cookie_name, DEFAULT_COOKIE_NAME);
		assert!(!config.oidc.enabled);
	}

	#[test]
	fn enabled_oidc_without_endpoints_fails_validation() {
		let layer = ServerConfigLayer {
			oidc: Some(OidcConfigLayer {
				enabled: Some(true),
				..Default::default()
			}),
			..Default::default()
		};
		assert!(matches!(finalize(layer), Err(ConfigError::Validation(_))));
	}

	#[test]
	fn enabled_oidc_with_discovery_is_valid() {
		let layer = ServerConfigLayer {
			oidc: Some(OidcConfigLayer {
				enabled: Some(true),
				discovery_endpoint: Some(
					"https://idp.example.com/.well-known/openid-configuration".to_string(),
				),
				..Default::default()
			}),
			..Default::default()
		};
		assert!(finalize(layer).unwrap().oidc.enabled);
	}

	#[test]
	fn file_layer_is_overridden_by_later_sources() {
		struct Fixed(Precedence, ServerConfigLayer);
		impl ConfigSource for Fixed {
			fn name(&self) -> &'static str {
				"fixed"
			}
			fn precedence(&self) -> Precedence {
				self.0
			}
			fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
				Ok(self.1.clone())
			}
		}

		let layer = |db: &str| ServerConfigLayer {
			odoo: Some(OdooConfigLayer {
				database: Some(db.to_string()),
				..Default::default()
			}),
			..Default::default()
		};

		let sources: Vec<Box<dyn ConfigSource>> = vec![
			Box::new(Fixed(Precedence::Environment, layer("from-env"))),
			Box::new(Fixed(Precedence::ConfigFile, layer("from-file"))),
		];
		let config = load_from_sources(sources).unwrap();
		assert_eq!(config.odoo.database.as_deref(), Some("from-env"));
	}
}
