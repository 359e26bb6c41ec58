// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Capabilities provisioning needs from the rest of the system.

use async_trait::async_trait;
use fedlink_server_auth::{
	ClientContext, NewTeam, NewUser, Session, Team, TeamId, TeamMembership, TeamRole, User, UserId,
};

use crate::error::StoreError;

#[async_trait]
pub trait UserStore: Send + Sync {
	async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

	/// Must fail with [`StoreError::Conflict`] when the email or username is taken.
	async fn create_user(&self, user: NewUser) -> Result<User, StoreError>;
}

#[async_trait]
pub trait TeamStore: Send + Sync {
	async fn find_team_by_name(&self, name: &str) -> Result<Option<Team>, StoreError>;

	/// Must fail with [`StoreError::Conflict`] when the name is taken.
	async fn create_team(&self, team: NewTeam) -> Result<Team, StoreError>;

	/// Idempotent: adding an existing member returns the current membership.
	async fn add_user_to_team(
		&self,
		team_id: TeamId,
		user_id: UserId,
	) -> Result<TeamMembership, StoreError>;

	async fn set_team_role(
		&self,
		team_id: TeamId,
		user_id: UserId,
		role: TeamRole,
	) -> Result<(), StoreError>;
}

#[async_trait]
pub trait SessionIssuer: Send + Sync {
	async fn issue_session(&self, user: &User, client: &ClientContext)
		-> Result<Session, StoreError>;
}
