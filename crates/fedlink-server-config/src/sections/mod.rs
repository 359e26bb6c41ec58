// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

mod http;
mod logging;
mod odoo;
mod oidc;
mod session;

pub use http::{HttpConfig, HttpConfigLayer};
pub use logging::{LoggingConfig, LoggingConfigLayer};
pub use odoo::{OdooConfig, OdooConfigLayer, DEFAULT_JSONRPC_PATH, DEFAULT_TIMEOUT_MS};
pub use oidc::{OidcConfig, OidcConfigLayer};
pub use session::{SessionConfig, SessionConfigLayer, DEFAULT_COOKIE_NAME};
