// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-memory implementation of every provisioning collaborator.
//!
//! All state sits behind one lock, so uniqueness checks and inserts are
//! atomic with respect to concurrent logins.

use std::collections::HashMap;

use async_trait::async_trait;
use fedlink_server_auth::{
	ClientContext, NewTeam, NewUser, Session, SessionId, Team, TeamId, TeamMembership, TeamRole,
	User, UserId,
};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::StoreError;
use crate::store::{SessionIssuer, TeamStore, UserStore};

#[derive(Default)]
struct Inner {
	users: HashMap<UserId, User>,
	teams: HashMap<TeamId, Team>,
	memberships: HashMap<(TeamId, UserId), TeamMembership>,
	sessions: HashMap<SessionId, Session>,
}

#[derive(Default)]
pub struct MemoryStore {
	inner: Mutex<Inner>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub async fn user_count(&self) -> usize {
		self.inner.lock().await.users.len()
	}

	pub async fn session_count(&self) -> usize {
		self.inner.lock().await.sessions.len()
	}

	/// Memberships of the team with slug `name`.
	pub async fn team_members(&self, name: &str) -> Vec<TeamMembership> {
		let inner = self.inner.lock().await;
		let Some(team) = inner.teams.values().find(|t| t.name == name) else {
			return Vec::new();
		};
		inner
			.memberships
			.values()
			.filter(|m| m.team_id == team.id)
			.cloned()
			.collect()
	}

	pub async fn team_names(&self) -> Vec<String> {
		let mut names: Vec<String> = self
			.inner
			.lock()
			.await
			.teams
			.values()
			.map(|t| t.name.clone())
			.collect();
		names.sort();
		names
	}
}

#[async_trait]
impl UserStore for MemoryStore {
	async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
		let inner = self.inner.lock().await;
		Ok(inner
			.users
			.values()
			.find(|u| u.email.eq_ignore_ascii_case(email))
			.cloned())
	}

	async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
		if user.username.is_empty() || user.email.is_empty() {
			return Err(StoreError::Invalid("username and email are required".to_string()));
		}

		let mut inner = self.inner.lock().await;
		if inner
			.users
			.values()
			.any(|u| u.email.eq_ignore_ascii_case(&user.email))
		{
			return Err(StoreError::Conflict(format!("email {} is taken", user.email)));
		}
		if inner.users.values().any(|u| u.username == user.username) {
			return Err(StoreError::Conflict(format!(
				"username {} is taken",
				user.username
			)));
		}

		let user = User::from_new(user);
		inner.users.insert(user.id, user.clone());
		debug!(user_id = %user.id, "stored user");
		Ok(user)
	}
}

#[async_trait]
impl TeamStore for MemoryStore {
	async fn find_team_by_name(&self, name: &str) -> Result<Option<Team>, StoreError> {
		let inner = self.inner.lock().await;
		Ok(inner.teams.values().find(|t| t.name == name).cloned())
	}

	async fn create_team(&self, team: NewTeam) -> Result<Team, StoreError> {
		if team.name.is_empty() {
			return Err(StoreError::Invalid("team name is required".to_string()));
		}

		let mut inner = self.inner.lock().await;
		if inner.teams.values().any(|t| t.name == team.name) {
			return Err(StoreError::Conflict(format!("team {} exists", team.name)));
		}

		let team = Team::from_new(team);
		inner.teams.insert(team.id, team.clone());
		Ok(team)
	}

	async fn add_user_to_team(
		&self,
		team_id: TeamId,
		user_id: UserId,
	) -> Result<TeamMembership, StoreError> {
		let mut inner = self.inner.lock().await;
		if !inner.teams.contains_key(&team_id) {
			return Err(StoreError::NotFound(format!("team {team_id}")));
		}
		if !inner.users.contains_key(&user_id) {
			return Err(StoreError::NotFound(format!("user {user_id}")));
		}
		Ok(inner
			.memberships
			.entry((team_id, user_id))
			.or_insert_with(|| TeamMembership::member(team_id, user_id))
			.clone())
	}

	async fn set_team_role(
		&self,
		team_id: TeamId,
		user_id: UserId,
		role: TeamRole,
	) -> Result<(), StoreError> {
		let mut inner = self.inner.lock().await;
		let membership = inner
			.memberships
			.get_mut(&(team_id, user_id))
			.ok_or_else(|| StoreError::NotFound(format!("membership {team_id}/{user_id}")))?;
		membership.role = role;
		Ok(())
	}
}

#[async_trait]
impl SessionIssuer for MemoryStore {
	async fn issue_session(
		&self,
		user: &User,
		client: &ClientContext,
	) -> Result<Session, StoreError> {
		let mut inner = self.inner.lock().await;
		if !inner.users.contains_key(&user.id) {
			return Err(StoreError::NotFound(format!("user {}", user.id)));
		}
		let session = Session::issue(user.id, client);
		inner.sessions.insert(session.id, session.clone());
		Ok(session)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use fedlink_server_auth::ProviderKind;

	fn new_user(username: &str, email: &str) -> NewUser {
		NewUser {
			username: username.to_string(),
			email: email.to_string(),
			first_name: String::new(),
			last_name: String::new(),
			auth_service: ProviderKind::Odoo,
			auth_data: "1".to_string(),
		}
	}

	#[tokio::test]
	async fn email_and_username_are_unique() {
		let store = MemoryStore::new();
		store.create_user(new_user("bob", "b@x")).await.unwrap();
		assert!(matches!(
			store.create_user(new_user("bob2", "B@X")).await,
			Err(StoreError::Conflict(_))
		));
		assert!(matches!(
			store.create_user(new_user("bob", "other@x")).await,
			Err(StoreError::Conflict(_))
		));
		assert_eq!(store.user_count().await, 1);
	}

	#[tokio::test]
	async fn find_by_email_ignores_case() {
		let store = MemoryStore::new();
		let user = store.create_user(new_user("bob", "bob@x")).await.unwrap();
		let found = store.find_user_by_email("BOB@X").await.unwrap().unwrap();
		assert_eq!(found.id, user.id);
		assert!(store.find_user_by_email("nobody@x").await.unwrap().is_none());
	}

	#[tokio::test]
	async fn membership_is_idempotent_and_role_updates() {
		let store = MemoryStore::new();
		let user = store.create_user(new_user("bob", "bob@x")).await.unwrap();
		let team = store.create_team(NewTeam::open("co-ltd", "Co Ltd")).await.unwrap();

		store.add_user_to_team(team.id, user.id).await.unwrap();
		store.add_user_to_team(team.id, user.id).await.unwrap();
		store
			.set_team_role(team.id, user.id, TeamRole::Admin)
			.await
			.unwrap();
		let again = store.add_user_to_team(team.id, user.id).await.unwrap();
		assert_eq!(again.role, TeamRole::Admin);
		assert_eq!(store.team_members("co-ltd").await.len(), 1);
	}

	#[tokio::test]
	async fn duplicate_team_name_conflicts() {
		let store = MemoryStore::new();
		store.create_team(NewTeam::open("acme", "Acme")).await.unwrap();
		assert!(matches!(
			store.create_team(NewTeam::open("acme", "ACME")).await,
			Err(StoreError::Conflict(_))
		));
	}

	#[tokio::test]
	async fn session_requires_known_user() {
		let store = MemoryStore::new();
		let stranger = User::from_new(new_user("ghost", "g@x"));
		assert!(matches!(
			store.issue_session(&stranger, &ClientContext::default()).await,
			Err(StoreError::NotFound(_))
		));

		let user = store.create_user(new_user("bob", "bob@x")).await.unwrap();
		store
			.issue_session(&user, &ClientContext::default())
			.await
			.unwrap();
		assert_eq!(store.session_count().await, 1);
	}
}
