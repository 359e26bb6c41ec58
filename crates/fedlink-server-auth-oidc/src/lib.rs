// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! OpenID Connect support for fedlink.
//!
//! Two pieces are provided:
//!
//! - [`OidcIdentitySource`] maps a UserInfo claims document ([`OidcUserInfo`])
//!   onto the canonical [`fedlink_server_auth::RemoteIdentity`].
//! - [`resolve_endpoints`] fills in missing authorization, token and userinfo
//!   endpoints from the provider's discovery document.
//!
//! The authorization code exchange itself is not handled here.

mod claims;
mod discovery;

pub use claims::{OidcIdentitySource, OidcUserInfo, SYNTHETIC_EMAIL_DOMAIN};
pub use discovery::{resolve_endpoints, OidcEndpoints, OidcError, DISCOVERY_TIMEOUT};
