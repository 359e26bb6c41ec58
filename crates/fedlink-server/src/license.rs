// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Feature entitlements.

/// Feature gating the OpenID Connect provider.
pub const FEATURE_OPENID: &str = "openid";

pub trait Entitlements: Send + Sync {
	fn has_feature(&self, feature: &str) -> bool;
}

/// Grants every feature.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenSourceEntitlements;

impl Entitlements for OpenSourceEntitlements {
	fn has_feature(&self, _feature: &str) -> bool {
		true
	}
}
