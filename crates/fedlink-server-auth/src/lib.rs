// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Domain types shared by the identity providers and the provisioning pipeline.
//!
//! - [`types`]: id newtypes, provider tags and team roles
//! - [`identity`]: the provider-agnostic [`RemoteIdentity`] and the
//!   [`IdentitySource`] trait every provider implements
//! - [`user`], [`team`], [`session`]: the local records that provisioning
//!   reads and creates

pub mod identity;
pub mod session;
pub mod team;
pub mod types;
pub mod user;

pub use identity::{IdentityError, IdentitySource, OrganizationRef, RemoteIdentity};
pub use session::{generate_session_token, ClientContext, Session, SESSION_EXPIRY_DAYS};
pub use team::{NewTeam, Team, TeamMembership};
pub use types::{ProviderKind, SessionId, TeamId, TeamRole, UserId};
pub use user::{clean_username, generate_fallback_username, NewUser, User};
