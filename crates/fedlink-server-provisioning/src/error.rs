// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

/// Errors reported by store collaborators.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
	/// A uniqueness constraint was violated.
	#[error("conflict: {0}")]
	Conflict(String),

	#[error("not found: {0}")]
	NotFound(String),

	#[error("invalid: {0}")]
	Invalid(String),

	#[error("store unavailable: {0}")]
	Unavailable(String),
}

/// Fatal provisioning failures. Organization sync failures are logged and
/// never surface here.
#[derive(Debug, thiserror::Error)]
pub enum ProvisioningError {
	#[error("{operation} failed: {source}")]
	Store {
		operation: &'static str,
		#[source]
		source: StoreError,
	},
}

impl ProvisioningError {
	pub(crate) fn store(operation: &'static str) -> impl FnOnce(StoreError) -> Self {
		move |source| ProvisioningError::Store { operation, source }
	}

	pub fn store_error(&self) -> &StoreError {
		match self {
			ProvisioningError::Store { source, .. } => source,
		}
	}
}
