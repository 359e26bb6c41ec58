// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Session cookie configuration.

use serde::Deserialize;

pub const DEFAULT_COOKIE_NAME: &str = "FEDLINKAUTHTOKEN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
	pub cookie_name: String,
	pub cookie_secure: bool,
}

impl Default for SessionConfig {
	fn default() -> Self {
		Self {
			cookie_name: DEFAULT_COOKIE_NAME.to_string(),
			cookie_secure: false,
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionConfigLayer {
	#[serde(default)]
	pub cookie_name: Option<String>,
	#[serde(default)]
	pub cookie_secure: Option<bool>,
}

impl SessionConfigLayer {
	pub fn merge(&mut self, other: SessionConfigLayer) {
		if other.cookie_name.is_some() {
			self.cookie_name = other.cookie_name;
		}
		if other.cookie_secure.is_some() {
			self.cookie_secure = other.cookie_secure;
		}
	}

	pub fn finalize(self) -> SessionConfig {
		SessionConfig {
			cookie_name: self
				.cookie_name
				.filter(|n| !n.is_empty())
				.unwrap_or_else(|| DEFAULT_COOKIE_NAME.to_string()),
			cookie_secure: self.cookie_secure.unwrap_or(false),
		}
	}
}
