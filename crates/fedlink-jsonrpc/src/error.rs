// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use reqwest::StatusCode;

/// Failures below the JSON-RPC layer. An RPC `error` member is not an error
/// here; it is returned inside [`crate::RpcReply::Envelope`].
#[derive(Debug, thiserror::Error)]
pub enum RpcClientError {
	/// Connect, timeout or body-read failure.
	#[error("transport failure calling {endpoint}: {source}")]
	Transport {
		endpoint: String,
		#[source]
		source: reqwest::Error,
	},

	/// The body was not a JSON-RPC envelope.
	#[error("undecodable response from {endpoint} (HTTP {status}): {source}")]
	Decode {
		endpoint: String,
		status: StatusCode,
		#[source]
		source: serde_json::Error,
	},
}

impl RpcClientError {
	pub fn is_timeout(&self) -> bool {
		matches!(self, Self::Transport { source, .. } if source.is_timeout())
	}
}
