// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::fmt;

use fedlink_jsonrpc::RpcClientError;

/// RPC step a failure originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
	Authenticate,
	FetchProfile,
	FetchMemberships,
	FetchOrganizations,
}

impl Step {
	pub fn as_str(&self) -> &'static str {
		match self {
			Step::Authenticate => "authenticate",
			Step::FetchProfile => "fetch_profile",
			Step::FetchMemberships => "fetch_memberships",
			Step::FetchOrganizations => "fetch_organizations",
		}
	}

	/// JSON-RPC request id used for this step.
	pub fn request_id(&self) -> i64 {
		match self {
			Step::Authenticate => 1,
			Step::FetchProfile => 2,
			Step::FetchMemberships => 3,
			Step::FetchOrganizations => 4,
		}
	}
}

impl fmt::Display for Step {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Fatal Odoo login failures. Rejected credentials are not an error; see
/// [`crate::LoginOutcome::InvalidCredentials`].
#[derive(Debug, thiserror::Error)]
pub enum OdooError {
	/// Connect, timeout or undecodable body.
	#[error("odoo {step} request failed: {source}")]
	Transport {
		step: Step,
		#[source]
		source: RpcClientError,
	},

	/// Odoo answered, but with an error or a payload we cannot use.
	#[error("odoo {step} failed: {message}")]
	Protocol { step: Step, message: String },

	/// Authentication succeeded but the user record is not readable.
	#[error("odoo user {uid} not found")]
	UserNotFound { uid: i64 },
}

impl OdooError {
	pub fn step(&self) -> Step {
		match self {
			OdooError::Transport { step, .. } | OdooError::Protocol { step, .. } => *step,
			OdooError::UserNotFound { .. } => Step::FetchProfile,
		}
	}
}
