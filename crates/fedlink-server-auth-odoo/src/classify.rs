// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Decides whether an upstream failure means "wrong password" or "Odoo is
//! broken".
//!
//! Odoo reports bad credentials in several shapes depending on version and
//! deployment: an HTTP 401/403 from a proxy, an RPC error whose message
//! mentions the password, or an `AccessDenied` exception name buried in
//! `error.data`. Only these signals count as rejected credentials; every
//! other error is an upstream failure and surfaces as a gateway error.

use fedlink_jsonrpc::{RpcErrorObject, StatusCode};

/// Lower-case fragments that mark an RPC error message as a credential rejection.
const REJECTION_KEYWORDS: &[&str] = &[
	"wrong",
	"password",
	"access denied",
	"invalid",
	"authentication failed",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
	InvalidCredentials,
	UpstreamFailure,
}

/// Classifies one authenticate round-trip.
///
/// `error` is the RPC `error` member, or `None` when the call returned no
/// error but also no usable identity.
pub fn classify(status: StatusCode, error: Option<&RpcErrorObject>) -> Classification {
	if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
		return Classification::InvalidCredentials;
	}

	let Some(error) = error else {
		return Classification::InvalidCredentials;
	};

	let message = error.message.to_lowercase();
	if REJECTION_KEYWORDS.iter().any(|k| message.contains(k)) {
		return Classification::InvalidCredentials;
	}

	if let Some(name) = error.data_str("name") {
		if name.to_lowercase().contains("accessdenied") {
			return Classification::InvalidCredentials;
		}
	}

	if let Some(detail) = error.data_str("message") {
		let detail = detail.to_lowercase();
		if detail.contains("access denied") || detail.contains("invalid") {
			return Classification::InvalidCredentials;
		}
	}

	Classification::UpstreamFailure
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn rpc_error(message: &str, data: Option<serde_json::Value>) -> RpcErrorObject {
		RpcErrorObject {
			code: 200,
			message: message.to_string(),
			data,
		}
	}

	#[test]
	fn denied_status_is_invalid_credentials() {
		assert_eq!(
			classify(StatusCode::UNAUTHORIZED, None),
			Classification::InvalidCredentials
		);
		let err = rpc_error("Internal Server Error", None);
		assert_eq!(
			classify(StatusCode::FORBIDDEN, Some(&err)),
			Classification::InvalidCredentials
		);
	}

	#[test]
	fn message_keywords_are_case_insensitive() {
		let err = rpc_error("Wrong login/PASSWORD", None);
		assert_eq!(
			classify(StatusCode::OK, Some(&err)),
			Classification::InvalidCredentials
		);
	}

	#[test]
	fn access_denied_exception_name_in_data() {
		let err = rpc_error(
			"Odoo Server Error",
			Some(json!({"name": "odoo.exceptions.AccessDenied", "message": ""})),
		);
		assert_eq!(
			classify(StatusCode::OK, Some(&err)),
			Classification::InvalidCredentials
		);
	}

	#[test]
	fn data_message_keywords() {
		let err = rpc_error(
			"Odoo Server Error",
			Some(json!({"name": "odoo.exceptions.UserError", "message": "Access Denied"})),
		);
		assert_eq!(
			classify(StatusCode::OK, Some(&err)),
			Classification::InvalidCredentials
		);
	}

	#[test]
	fn unrelated_error_is_upstream_failure() {
		let err = rpc_error(
			"Odoo Server Error",
			Some(json!({"name": "psycopg2.OperationalError", "message": "database \"prod\" does not exist"})),
		);
		assert_eq!(
			classify(StatusCode::OK, Some(&err)),
			Classification::UpstreamFailure
		);
		let err = rpc_error("Odoo Server Error", Some(json!("traceback")));
		assert_eq!(
			classify(StatusCode::INTERNAL_SERVER_ERROR, Some(&err)),
			Classification::UpstreamFailure
		);
	}

	#[test]
	fn no_error_and_no_identity_is_invalid_credentials() {
		assert_eq!(classify(StatusCode::OK, None), Classification::InvalidCredentials);
	}

	mod proptests {
		use super::*;
		use proptest::prelude::*;

		fn random_case(s: &str, mask: &[bool]) -> String {
			s.chars()
				.zip(mask.iter().cycle())
				.map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c })
				.collect()
		}

		proptest! {
			#[test]
			fn keyword_in_any_case_is_invalid_credentials(
				idx in 0..REJECTION_KEYWORDS.len(),
				mask in prop::collection::vec(any::<bool>(), 1..8),
				prefix in "[ a-z]{0,12}",
				suffix in "[ a-z]{0,12}",
			) {
				let keyword = random_case(REJECTION_KEYWORDS[idx], &mask);
				let err = rpc_error(&format!("{prefix}{keyword}{suffix}"), None);
				prop_assert_eq!(classify(StatusCode::OK, Some(&err)), Classification::InvalidCredentials);
			}

			#[test]
			fn message_without_keywords_is_upstream_failure(message in "[0-9 :_.]{0,40}") {
				let err = rpc_error(&message, None);
				prop_assert_eq!(classify(StatusCode::OK, Some(&err)), Classification::UpstreamFailure);
			}
		}
	}
}
