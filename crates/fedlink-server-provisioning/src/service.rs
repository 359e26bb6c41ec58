// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Turns an authenticated [`RemoteIdentity`] into a local user, a session and
//! team memberships.
//!
//! Steps run in order and nothing is rolled back: a user created before a
//! failed session issue stays created. Organization sync is best effort.

use std::sync::Arc;

use fedlink_server_auth::{
	generate_fallback_username, ClientContext, NewTeam, NewUser, OrganizationRef, RemoteIdentity,
	Session, Team, TeamRole, User,
};
use tracing::{debug, info, warn};

use crate::error::{ProvisioningError, StoreError};
use crate::slug::slugify;
use crate::store::{SessionIssuer, TeamStore, UserStore};

/// Result of a successful provisioning run.
#[derive(Debug, Clone)]
pub struct Provisioned {
	pub user: User,
	/// True when the user was created by this run.
	pub created: bool,
	pub session: Session,
	/// Slugs of the teams the user is a member of after sync.
	pub synced_teams: Vec<String>,
}

#[derive(Clone)]
pub struct ProvisioningService {
	users: Arc<dyn UserStore>,
	teams: Arc<dyn TeamStore>,
	sessions: Arc<dyn SessionIssuer>,
}

impl ProvisioningService {
	pub fn new(
		users: Arc<dyn UserStore>,
		teams: Arc<dyn TeamStore>,
		sessions: Arc<dyn SessionIssuer>,
	) -> Self {
		Self {
			users,
			teams,
			sessions,
		}
	}

	/// Uses one store for all three capabilities.
	pub fn with_store<S>(store: Arc<S>) -> Self
	where
		S: UserStore + TeamStore + SessionIssuer + 'static,
	{
		Self::new(store.clone(), store.clone(), store)
	}

	#[tracing::instrument(
		skip_all,
		fields(provider = %identity.provider, external_id = %identity.external_id)
	)]
	pub async fn provision(
		&self,
		identity: &RemoteIdentity,
		client: &ClientContext,
	) -> Result<Provisioned, ProvisioningError> {
		let (user, created) = self.find_or_create_user(identity).await?;

		let session = self
			.sessions
			.issue_session(&user, client)
			.await
			.map_err(ProvisioningError::store("issue session"))?;
		debug!(user_id = %user.id, session_id = %session.id, "session issued");

		let synced_teams = self.sync_organizations(&user, identity).await;

		Ok(Provisioned {
			user,
			created,
			session,
			synced_teams,
		})
	}

	async fn find_or_create_user(
		&self,
		identity: &RemoteIdentity,
	) -> Result<(User, bool), ProvisioningError> {
		if let Some(user) = self.find_user(&identity.email).await? {
			debug!(user_id = %user.id, "found existing user");
			return Ok((user, false));
		}

		let new_user = NewUser {
			username: identity.local_username(),
			email: identity.email.clone(),
			first_name: identity.first_name.clone(),
			last_name: identity.last_name.clone(),
			auth_service: identity.provider,
			auth_data: identity.auth_key.clone(),
		};

		match self.users.create_user(new_user.clone()).await {
			Ok(user) => {
				info!(user_id = %user.id, username = %user.username, "created user");
				Ok((user, true))
			}
			Err(StoreError::Conflict(reason)) => {
				// A concurrent login for the same email won the race.
				if let Some(user) = self.find_user(&identity.email).await? {
					debug!(user_id = %user.id, "user created concurrently");
					return Ok((user, false));
				}

				warn!(username = %new_user.username, %reason, "username taken, retrying with a generated one");
				let retry = NewUser {
					username: generate_fallback_username(),
					..new_user
				};
				let user = self
					.users
					.create_user(retry)
					.await
					.map_err(ProvisioningError::store("create user"))?;
				info!(user_id = %user.id, username = %user.username, "created user");
				Ok((user, true))
			}
			Err(e) => Err(ProvisioningError::store("create user")(e)),
		}
	}

	async fn find_user(&self, email: &str) -> Result<Option<User>, ProvisioningError> {
		self
			.users
			.find_user_by_email(email)
			.await
			.map_err(ProvisioningError::store("find user"))
	}

	async fn sync_organizations(&self, user: &User, identity: &RemoteIdentity) -> Vec<String> {
		let grant_admin = identity.grants_team_admin();
		let mut synced = Vec::new();

		for org in identity.organizations() {
			let slug = slugify(&org.name);
			if slug.is_empty() {
				debug!(org_id = org.external_id, "organization name has no usable slug");
				continue;
			}

			let team = match self.find_or_create_team(&slug, org).await {
				Ok(team) => team,
				Err(e) => {
					warn!(team = %slug, error = %e, "organization sync failed");
					continue;
				}
			};

			let membership = match self.teams.add_user_to_team(team.id, user.id).await {
				Ok(membership) => membership,
				Err(e) => {
					warn!(team = %slug, error = %e, "failed to add user to team");
					continue;
				}
			};
			synced.push(slug.clone());

			if grant_admin && !membership.role.has_permission_of(TeamRole::Admin) {
				if let Err(e) = self
					.teams
					.set_team_role(team.id, user.id, TeamRole::Admin)
					.await
				{
					warn!(team = %slug, error = %e, "failed to grant team admin");
				}
			}
		}

		synced
	}

	async fn find_or_create_team(
		&self,
		slug: &str,
		org: &OrganizationRef,
	) -> Result<Team, ProvisioningError> {
		if let Some(team) = self
			.teams
			.find_team_by_name(slug)
			.await
			.map_err(ProvisioningError::store("find team"))?
		{
			return Ok(team);
		}

		match self.teams.create_team(NewTeam::open(slug, &org.name)).await {
			Ok(team) => {
				info!(team = %team.name, org_id = org.external_id, "created team");
				Ok(team)
			}
			Err(StoreError::Conflict(_)) => self
				.teams
				.find_team_by_name(slug)
				.await
				.map_err(ProvisioningError::store("find team"))?
				.ok_or_else(|| {
					ProvisioningError::store("create team")(StoreError::Conflict(slug.to_string()))
				}),
			Err(e) => Err(ProvisioningError::store("create team")(e)),
		}
	}
}
