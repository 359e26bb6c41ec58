// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Local teams and memberships.

use crate::types::{TeamId, TeamRole, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fields required to create a team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTeam {
	/// Identifier-safe slug; unique across teams.
	pub name: String,
	pub display_name: String,
}

impl NewTeam {
	pub fn open(name: impl Into<String>, display_name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			display_name: display_name.into(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
	pub id: TeamId,
	pub name: String,
	pub display_name: String,
	pub created_at: DateTime<Utc>,
}

impl Team {
	pub fn from_new(new: NewTeam) -> Self {
		Self {
			id: TeamId::generate(),
			name: new.name,
			display_name: new.display_name,
			created_at: Utc::now(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMembership {
	pub team_id: TeamId,
	pub user_id: UserId,
	pub role: TeamRole,
	pub joined_at: DateTime<Utc>,
}

impl TeamMembership {
	pub fn member(team_id: TeamId, user_id: UserId) -> Self {
		Self {
			team_id,
			user_id,
			role: TeamRole::Member,
			joined_at: Utc::now(),
		}
	}
}
