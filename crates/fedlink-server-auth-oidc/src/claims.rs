// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use fedlink_server_auth::{IdentityError, IdentitySource, ProviderKind, RemoteIdentity, User};
use serde::{Deserialize, Serialize};

pub const SYNTHETIC_EMAIL_DOMAIN: &str = "oidc.local";

/// Standard claims returned from the UserInfo endpoint.
///
/// See <https://openid.net/specs/openid-connect-core-1_0.html#StandardClaims>
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OidcUserInfo {
	#[serde(default)]
	pub sub: String,
	#[serde(default)]
	pub email: String,
	#[serde(default)]
	pub email_verified: Option<bool>,
	#[serde(default)]
	pub preferred_username: String,
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub given_name: String,
	#[serde(default)]
	pub family_name: String,
}

impl OidcUserInfo {
	/// preferred_username, else the email local part, else the subject.
	fn username_source(&self) -> &str {
		if !self.preferred_username.is_empty() {
			return &self.preferred_username;
		}
		match self.email.find('@') {
			Some(at) if at > 0 => &self.email[..at],
			_ => &self.sub,
		}
	}

	fn resolved_email(&self) -> String {
		if self.email.is_empty() {
			format!("oidc_{}@{SYNTHETIC_EMAIL_DOMAIN}", self.sub).to_lowercase()
		} else {
			self.email.to_lowercase()
		}
	}

	/// given/family when either is present, otherwise a whitespace split of `name`.
	fn split_name(&self) -> (String, String) {
		if !self.given_name.is_empty() || !self.family_name.is_empty() {
			return (self.given_name.clone(), self.family_name.clone());
		}
		let mut parts = self.name.split_whitespace();
		match parts.next() {
			Some(first) => {
				let rest: Vec<&str> = parts.collect();
				if rest.is_empty() {
					(self.name.clone(), String::new())
				} else {
					(first.to_string(), rest.join(" "))
				}
			}
			None => (self.name.clone(), String::new()),
		}
	}
}

/// Maps UserInfo claims onto [`RemoteIdentity`].
///
/// OIDC identities never carry organizations or privilege flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct OidcIdentitySource;

impl OidcIdentitySource {
	/// Two local users are the same OIDC person iff their auth keys match.
	pub fn is_same_user(existing: &User, incoming: &User) -> bool {
		existing.is_same_identity(incoming)
	}
}

impl IdentitySource for OidcIdentitySource {
	type Payload = OidcUserInfo;

	fn kind(&self) -> ProviderKind {
		ProviderKind::OpenId
	}

	fn normalize(&self, claims: OidcUserInfo) -> Result<RemoteIdentity, IdentityError> {
		if claims.sub.is_empty() && claims.email.is_empty() {
			return Err(IdentityError::MissingIdentity);
		}

		let email = claims.resolved_email();
		let auth_key = if claims.sub.is_empty() {
			email.clone()
		} else {
			claims.sub.clone()
		};

		let mut identity = RemoteIdentity::new(self.kind(), auth_key.clone(), email)?;
		identity.auth_key = auth_key;
		identity.login_name = claims.username_source().to_string();
		let (first, last) = claims.split_name();
		identity.display_name = if claims.name.is_empty() {
			format!("{first} {last}").trim().to_string()
		} else {
			claims.name.clone()
		};
		identity.first_name = first;
		identity.last_name = last;
		Ok(identity)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn claims(sub: &str, email: &str) -> OidcUserInfo {
		OidcUserInfo {
			sub: sub.to_string(),
			email: email.to_string(),
			..Default::default()
		}
	}

	#[test]
	fn missing_subject_and_email_is_rejected() {
		let err = OidcIdentitySource.normalize(claims("", "")).unwrap_err();
		assert_eq!(err, IdentityError::MissingIdentity);
	}

	#[test]
	fn preferred_username_wins() {
		let mut info = claims("abc", "alice@x.com");
		info.preferred_username = "alice".to_string();
		let identity = OidcIdentitySource.normalize(info).unwrap();
		assert_eq!(identity.local_username(), "alice");
		assert_eq!(identity.email, "alice@x.com");
	}

	#[test]
	fn email_local_part_then_subject() {
		let identity = OidcIdentitySource
			.normalize(claims("abc", "Carol.D@Example.com"))
			.unwrap();
		assert_eq!(identity.login_name, "Carol.D");
		assert_eq!(identity.email, "carol.d@example.com");

		let identity = OidcIdentitySource.normalize(claims("user-77", "@nolocal")).unwrap();
		assert_eq!(identity.login_name, "user-77");
	}

	#[test]
	fn synthesizes_email_from_subject() {
		let identity = OidcIdentitySource.normalize(claims("ABC123", "")).unwrap();
		assert_eq!(identity.email, "oidc_abc123@oidc.local");
		assert_eq!(identity.auth_key, "ABC123");
	}

	#[test]
	fn auth_key_falls_back_to_email() {
		let identity = OidcIdentitySource.normalize(claims("", "Dan@X.com")).unwrap();
		assert_eq!(identity.auth_key, "dan@x.com");
		assert_eq!(identity.external_id, "dan@x.com");
	}

	#[test]
	fn given_and_family_names_take_priority() {
		let mut info = claims("s", "");
		info.given_name = "Ada".to_string();
		info.name = "Countess Ada Lovelace".to_string();
		let identity = OidcIdentitySource.normalize(info).unwrap();
		assert_eq!(identity.first_name, "Ada");
		assert_eq!(identity.last_name, "");
	}

	#[test]
	fn full_name_is_split_on_whitespace() {
		let mut info = claims("s", "");
		info.name = "Grace  Brewster Hopper".to_string();
		let identity = OidcIdentitySource.normalize(info).unwrap();
		assert_eq!(identity.first_name, "Grace");
		assert_eq!(identity.last_name, "Brewster Hopper");

		let mut info = claims("s", "");
		info.name = "Prince".to_string();
		let identity = OidcIdentitySource.normalize(info).unwrap();
		assert_eq!(identity.first_name, "Prince");
		assert_eq!(identity.last_name, "");
	}

	#[test]
	fn no_organizations_or_privileges() {
		let identity = OidcIdentitySource.normalize(claims("s", "e@x")).unwrap();
		assert!(identity.organizations().is_empty());
		assert!(!identity.grants_team_admin());
		assert_eq!(identity.provider, ProviderKind::OpenId);
	}

	#[test]
	fn claims_decode_with_missing_fields() {
		let info: OidcUserInfo =
			serde_json::from_str(r#"{"sub": "248289761001", "email_verified": true}"#).unwrap();
		assert_eq!(info.sub, "248289761001");
		assert!(info.email.is_empty());
		assert_eq!(info.email_verified, Some(true));
	}

	mod proptests {
		use super::*;
		use proptest::prelude::*;

		proptest! {
			#[test]
			fn email_is_always_lowercase(sub in "[A-Za-z0-9]{1,16}", email in "([A-Za-z]{1,8}@[A-Za-z]{1,8}\\.com)?") {
				let identity = OidcIdentitySource.normalize(claims(&sub, &email)).unwrap();
				prop_assert_eq!(identity.email.clone(), identity.email.to_lowercase());
				prop_assert!(!identity.auth_key.is_empty());
			}
		}
	}
}
