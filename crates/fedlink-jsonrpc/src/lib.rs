// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! JSON-RPC 2.0 over HTTP.
//!
//! This crate provides:
//! - [`RpcRequest`] / [`RpcResponse`] envelopes (`{"jsonrpc":"2.0","method","params","id"}`)
//! - [`LooseValue`] for fields whose JSON type varies between server versions
//! - [`RpcClient`], which issues exactly one POST per call and never retries

mod client;
mod envelope;
mod error;
mod value;

pub use client::{RpcClient, RpcReply, DEFAULT_TIMEOUT};
pub use envelope::{RpcErrorObject, RpcRequest, RpcResponse, JSONRPC_VERSION};
pub use error::RpcClientError;
pub use reqwest::StatusCode;
pub use value::LooseValue;
