// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request metadata recorded on issued sessions.

use axum::http::HeaderMap;
use fedlink_server_auth::ClientContext;

const MOBILE_MARKERS: &[&str] = &["mobile", "android", "iphone", "ipad"];

/// Builds the session client context from request headers.
///
/// The IP comes from the first `x-forwarded-for` entry, then `x-real-ip`,
/// then `cf-connecting-ip`.
pub fn client_context(headers: &HeaderMap) -> ClientContext {
	let ip_address = header_str(headers, "x-forwarded-for")
		.and_then(|s| s.split(',').next())
		.map(|s| s.trim().to_string())
		.filter(|s| !s.is_empty())
		.or_else(|| header_str(headers, "x-real-ip").map(|s| s.trim().to_string()))
		.or_else(|| header_str(headers, "cf-connecting-ip").map(|s| s.trim().to_string()));

	let user_agent = header_str(headers, "user-agent").map(str::to_string);
	let is_mobile = user_agent.as_deref().is_some_and(is_mobile_user_agent);

	ClientContext {
		ip_address,
		user_agent,
		is_mobile,
	}
}

pub fn is_mobile_user_agent(user_agent: &str) -> bool {
	let ua = user_agent.to_lowercase();
	MOBILE_MARKERS.iter().any(|marker| ua.contains(marker))
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
	headers.get(name).and_then(|v| v.to_str().ok())
}
