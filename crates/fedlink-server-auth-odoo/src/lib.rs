// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Odoo authentication over JSON-RPC.
//!
//! A login is a short, strictly sequential chain of RPC calls:
//!
//! 1. **Authenticate**: `POST {base}/web/session/authenticate` with the
//!    database, login and password. A zero or missing uid means the
//!    credentials were rejected and nothing else is called.
//! 2. **Profile**: `res.users.search_read` for the uid (`id`, `name`,
//!    `login`, `email`). No rows means the account is not visible.
//! 3. **Organizations** (optional): the user's `company_ids` and admin
//!    flags, then the matching `res.company` names.
//!
//! Upstream errors are split by [`classify`] into rejected credentials and
//! upstream failures. The resulting [`OdooAccount`] is turned into a
//! [`fedlink_server_auth::RemoteIdentity`] by [`OdooIdentitySource`].
//!
//! # Example
//!
//! ```rust,no_run
//! use fedlink_common_secret::SecretString;
//! use fedlink_server_auth_odoo::{LoginOutcome, OdooAuthenticator, OdooSettings};
//!
//! # async fn example(settings: OdooSettings) -> Result<(), Box<dyn std::error::Error>> {
//! let authenticator = OdooAuthenticator::new(settings);
//! let password = SecretString::new("pw123".to_string());
//! match authenticator.login("bob", &password).await? {
//!     LoginOutcome::Authenticated(account) => println!("uid {}", account.uid),
//!     LoginOutcome::InvalidCredentials => println!("rejected"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Security Considerations
//!
//! - The password is only ever held in a [`fedlink_common_secret::SecretString`].
//! - Tracing instrumentation skips the password on every call.

mod account;
mod classify;
mod client;
mod config;
mod error;
mod identity;

pub use account::OdooAccount;
pub use classify::{classify, Classification};
pub use client::{LoginOutcome, OdooAuthenticator};
pub use config::{ConfigError, OdooSettings};
pub use error::{OdooError, Step};
pub use identity::{OdooIdentitySource, OdooLogin, SYNTHETIC_EMAIL_DOMAIN};
