// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Outbound HTTP clients for talking to identity providers.
//!
//! Every client built here carries the same `fedlink/<version>` User-Agent so
//! upstream logs can attribute traffic to this service.

use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Creates a client builder with the standard User-Agent header.
///
/// # Example
/// ```ignore
/// let client = fedlink_common_http::builder()
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// ```
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

/// Creates a client whose every request is bounded by `timeout`.
pub fn new_client_with_timeout(timeout: Duration) -> Client {
	builder()
		.timeout(timeout)
		.build()
		.expect("failed to build HTTP client")
}

/// Format: `fedlink/{crate_version}`
pub fn user_agent() -> String {
	format!("fedlink/{}", env!("CARGO_PKG_VERSION"))
}
