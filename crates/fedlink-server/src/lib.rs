// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! fedlink HTTP server.
//!
//! Exposes the Odoo password login, the provider listing and a health check.
//! Logins are authenticated upstream, normalized into a
//! [`fedlink_server_auth::RemoteIdentity`] and provisioned locally through
//! [`fedlink_server_provisioning::ProvisioningService`].

pub mod api;
pub mod client_info;
pub mod error;
pub mod license;
pub mod routes;
pub mod version;

pub use api::{create_router, AppState, Providers};
pub use error::{ErrorResponse, ServerError};
pub use fedlink_server_config::ServerConfig;
pub use license::{Entitlements, OpenSourceEntitlements};
