// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Local login sessions.
//!
//! A session is created exactly once per successful federated login. The
//! token is 32 random bytes, hex encoded, and is only ever held inside a
//! [`SecretString`].

use crate::types::{SessionId, UserId};
use chrono::{DateTime, Duration, Utc};
use fedlink_common_secret::SecretString;
use tracing::instrument;

pub const SESSION_EXPIRY_DAYS: i64 = 30;

/// Request metadata passed to session issuance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientContext {
	pub ip_address: Option<String>,
	pub user_agent: Option<String>,
	pub is_mobile: bool,
}

#[derive(Debug, Clone)]
pub struct Session {
	pub id: SessionId,
	pub user_id: UserId,
	pub token: SecretString,
	pub is_mobile: bool,
	pub ip_address: Option<String>,
	pub user_agent: Option<String>,
	pub created_at: DateTime<Utc>,
	pub expires_at: DateTime<Utc>,
}

impl Session {
	#[instrument(level = "debug", skip(user_id, client), fields(user_id = %user_id, is_mobile = client.is_mobile))]
	pub fn issue(user_id: UserId, client: &ClientContext) -> Self {
		let now = Utc::now();
		Self {
			id: SessionId::generate(),
			user_id,
			token: SecretString::new(generate_session_token()),
			is_mobile: client.is_mobile,
			ip_address: client.ip_address.clone(),
			user_agent: client.user_agent.clone(),
			created_at: now,
			expires_at: now + Duration::days(SESSION_EXPIRY_DAYS),
		}
	}

	/// Seconds until expiry, floored at zero.
	pub fn max_age_seconds(&self) -> i64 {
		(self.expires_at - Utc::now()).num_seconds().max(0)
	}
}

/// Generates a cryptographically secure random session token.
pub fn generate_session_token() -> String {
	use rand::Rng;
	let mut rng = rand::thread_rng();
	let bytes: [u8; 32] = rng.gen();
	hex::encode(bytes)
}
