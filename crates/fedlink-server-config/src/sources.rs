// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: environment variables and TOML files.

use std::path::PathBuf;

use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::ServerConfigLayer;
use crate::sections::{
	HttpConfigLayer, LoggingConfigLayer, OdooConfigLayer, OidcConfigLayer, SessionConfigLayer,
};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<ServerConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(ServerConfigLayer::default())
	}
}

/// TOML file configuration source.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn system() -> Self {
		Self::new("/etc/fedlink/server.toml")
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(ServerConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: ServerConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: FEDLINK_SERVER_<SECTION>_<FIELD>
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading environment variables");
		load_from_lookup(&|name| std::env::var(name).ok())
	}
}

type Lookup<'a> = dyn Fn(&str) -> Option<String> + 'a;

fn load_from_lookup(lookup: &Lookup<'_>) -> Result<ServerConfigLayer, ConfigError> {
	let env = EnvReader { lookup };
	Ok(ServerConfigLayer {
		http: Some(HttpConfigLayer {
			host: env.var("FEDLINK_SERVER_HOST"),
			port: env.parse("FEDLINK_SERVER_PORT")?,
		}),
		logging: Some(LoggingConfigLayer {
			level: env.var("FEDLINK_SERVER_LOG_LEVEL"),
		}),
		odoo: Some(OdooConfigLayer {
			base_url: env.var("FEDLINK_SERVER_ODOO_BASE_URL"),
			database: env.var("FEDLINK_SERVER_ODOO_DB"),
			jsonrpc_path: env.var("FEDLINK_SERVER_ODOO_JSONRPC_PATH"),
			timeout_ms: env.parse("FEDLINK_SERVER_ODOO_TIMEOUT_MS")?,
			sync_organizations: env.bool("FEDLINK_SERVER_ODOO_SYNC_ORGANIZATIONS"),
		}),
		oidc: Some(OidcConfigLayer {
			enabled: env.bool("FEDLINK_SERVER_OIDC_ENABLED"),
			discovery_endpoint: env.var("FEDLINK_SERVER_OIDC_DISCOVERY_ENDPOINT"),
			authorization_endpoint: env.var("FEDLINK_SERVER_OIDC_AUTHORIZATION_ENDPOINT"),
			token_endpoint: env.var("FEDLINK_SERVER_OIDC_TOKEN_ENDPOINT"),
			userinfo_endpoint: env.var("FEDLINK_SERVER_OIDC_USERINFO_ENDPOINT"),
		}),
		session: Some(SessionConfigLayer {
			cookie_name: env.var("FEDLINK_SERVER_SESSION_COOKIE_NAME"),
			cookie_secure: env.bool("FEDLINK_SERVER_SESSION_COOKIE_SECURE"),
		}),
	})
}

struct EnvReader<'a, 'b> {
	lookup: &'a Lookup<'b>,
}

impl EnvReader<'_, '_> {
	fn var(&self, name: &str) -> Option<String> {
		(self.lookup)(name).filter(|s| !s.is_empty())
	}

	fn bool(&self, name: &str) -> Option<bool> {
		self.var(name)
			.map(|v| v.eq_ignore_ascii_case("true") || v == "1")
	}

	fn parse<T: std::str::FromStr>(&self, name: &str) -> Result<Option<T>, ConfigError> {
		match self.var(name) {
			Some(v) => v
				.trim()
				.parse()
				.map(Some)
				.map_err(|_| ConfigError::InvalidValue {
					key: name.to_string(),
					message: format!("invalid {} value '{v}'", std::any::type_name::<T>()),
				}),
			None => Ok(None),
		}
	}
}
