// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const JSONRPC_VERSION: &str = "2.0";

/// Outbound call envelope.
#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest {
	pub jsonrpc: &'static str,
	pub method: String,
	pub params: Value,
	pub id: i64,
}

impl RpcRequest {
	pub fn new(method: impl Into<String>, params: Value, id: i64) -> Self {
		Self {
			jsonrpc: JSONRPC_VERSION,
			method: method.into(),
			params,
			id,
		}
	}

	/// The `"call"` method used by Odoo for both session and object endpoints.
	pub fn call(params: Value, id: i64) -> Self {
		Self::new("call", params, id)
	}
}

/// Inbound reply envelope. Exactly one of `result` / `error` is normally set,
/// but both are optional so a bare `{}` still decodes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RpcResponse {
	#[serde(default)]
	pub jsonrpc: Option<String>,
	#[serde(default)]
	pub id: Option<Value>,
	#[serde(default)]
	pub result: Option<Value>,
	#[serde(default)]
	pub error: Option<RpcErrorObject>,
}

impl RpcResponse {
	/// The result, treating JSON `null`, `false`, `{}`, `[]` and `""` as absent.
	pub fn usable_result(&self) -> Option<&Value> {
		match self.result.as_ref()? {
			Value::Null | Value::Bool(false) => None,
			Value::Object(map) if map.is_empty() => None,
			Value::Array(items) if items.is_empty() => None,
			Value::String(s) if s.is_empty() => None,
			other => Some(other),
		}
	}
}

/// The `error` member of a reply.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RpcErrorObject {
	#[serde(default)]
	pub code: i64,
	#[serde(default)]
	pub message: String,
	#[serde(default)]
	pub data: Option<Value>,
}

impl RpcErrorObject {
	/// A string member of the nested `data` object, if present.
	pub fn data_str(&self, key: &str) -> Option<&str> {
		self.data.as_ref()?.get(key)?.as_str()
	}
}
