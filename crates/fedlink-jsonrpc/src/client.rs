// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::envelope::{RpcRequest, RpcResponse};
use crate::error::RpcClientError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(8000);

/// Outcome of one round-trip that reached the server.
#[derive(Debug, Clone)]
pub enum RpcReply {
	/// HTTP 401 or 403. The body is not inspected.
	Denied(StatusCode),
	/// Any other status with a decodable envelope.
	Envelope {
		status: StatusCode,
		response: RpcResponse,
	},
}

/// Single-shot JSON-RPC client. Each call is one POST bounded by the client
/// timeout; nothing is retried.
#[derive(Debug, Clone)]
pub struct RpcClient {
	http: Client,
}

impl RpcClient {
	pub fn new(timeout: Duration) -> Self {
		Self {
			http: fedlink_common_http::new_client_with_timeout(timeout),
		}
	}

	#[tracing::instrument(skip(self, request), fields(method = %request.method, id = request.id))]
	pub async fn call(
		&self,
		endpoint: &str,
		request: &RpcRequest,
	) -> Result<RpcReply, RpcClientError> {
		let transport = |source: reqwest::Error| RpcClientError::Transport {
			endpoint: endpoint.to_string(),
			source,
		};

		let response = self
			.http
			.post(endpoint)
			.json(request)
			.send()
			.await
			.map_err(transport)?;

		let status = response.status();
		if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
			debug!(%status, "rpc endpoint denied request");
			return Ok(RpcReply::Denied(status));
		}

		let body = response.bytes().await.map_err(transport)?;
		let decoded: RpcResponse =
			serde_json::from_slice(&body).map_err(|source| RpcClientError::Decode {
				endpoint: endpoint.to_string(),
				status,
				source,
			})?;

		debug!(%status, has_error = decoded.error.is_some(), "rpc reply decoded");
		Ok(RpcReply::Envelope {
			status,
			response: decoded,
		})
	}
}

impl Default for RpcClient {
	fn default() -> Self {
		Self::new(DEFAULT_TIMEOUT)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;
	use wiremock::matchers::{body_partial_json, method, path};
	use wiremock::{Mock, MockServer, ResponseTemplate};

	fn endpoint(server: &MockServer) -> String {
		format!("{}/jsonrpc", server.uri())
	}

	#[tokio::test]
	async fn posts_envelope_and_decodes_result() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.and(path("/jsonrpc"))
			.and(body_partial_json(json!({"jsonrpc": "2.0", "method": "call", "id": 7})))
			.respond_with(
				ResponseTemplate::new(200).set_body_json(json!({"jsonrpc": "2.0", "id": 7, "result": [1]})),
			)
			.expect(1)
			.mount(&server)
			.await;

		let client = RpcClient::default();
		let reply = client
			.call(&endpoint(&server), &RpcRequest::call(json!({}), 7))
			.await
			.unwrap();

		match reply {
			RpcReply::Envelope { status, response } => {
				assert_eq!(status, StatusCode::OK);
				assert_eq!(response.result, Some(json!([1])));
			}
			other => panic!("unexpected reply: {other:?}"),
		}
	}

	#[tokio::test]
	async fn forbidden_is_denied_without_decoding() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.respond_with(ResponseTemplate::new(403).set_body_string("<html>nope</html>"))
			.mount(&server)
			.await;

		let reply = RpcClient::default()
			.call(&endpoint(&server), &RpcRequest::call(json!({}), 1))
			.await
			.unwrap();
		assert!(matches!(reply, RpcReply::Denied(StatusCode::FORBIDDEN)));
	}

	#[tokio::test]
	async fn html_body_is_decode_error() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
			.mount(&server)
			.await;

		let err = RpcClient::default()
			.call(&endpoint(&server), &RpcRequest::call(json!({}), 1))
			.await
			.unwrap_err();
		match err {
			RpcClientError::Decode { status, .. } => assert_eq!(status, StatusCode::BAD_GATEWAY),
			other => panic!("unexpected error: {other:?}"),
		}
	}

	#[tokio::test]
	async fn slow_server_is_timeout() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.respond_with(
				ResponseTemplate::new(200)
					.set_body_json(json!({"result": true}))
					.set_delay(Duration::from_millis(500)),
			)
			.mount(&server)
			.await;

		let err = RpcClient::new(Duration::from_millis(50))
			.call(&endpoint(&server), &RpcRequest::call(json!({}), 1))
			.await
			.unwrap_err();
		assert!(err.is_timeout());
	}
}
