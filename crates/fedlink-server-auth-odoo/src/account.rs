// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Odoo payload shapes.
//!
//! Every field is decoded as [`LooseValue`] because Odoo encodes unset
//! fields as `false` and ids may arrive as floats.

use fedlink_jsonrpc::LooseValue;
use fedlink_server_auth::OrganizationRef;
use serde::Deserialize;
use serde_json::Value;

/// What a successful login learned about the Odoo user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OdooAccount {
	pub uid: i64,
	/// `res.users.login`; may be empty.
	pub login: String,
	pub name: String,
	/// Email stored in Odoo. Not used for the local account.
	pub email: Option<String>,
	pub is_admin: bool,
	pub is_system: bool,
	pub companies: Vec<OrganizationRef>,
}

/// `result` of `/web/session/authenticate`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SessionInfo {
	#[serde(default)]
	uid: LooseValue,
	#[serde(default)]
	is_system: LooseValue,
	#[serde(default)]
	is_admin: LooseValue,
	#[serde(default)]
	user_companies: Value,
}

impl SessionInfo {
	/// `None` when the result is not an object.
	pub(crate) fn from_result(result: &Value) -> Option<Self> {
		serde_json::from_value(result.clone()).ok()
	}

	/// Zero when absent, `false` or non-numeric.
	pub(crate) fn uid(&self) -> i64 {
		self.uid.as_id().unwrap_or(0)
	}

	pub(crate) fn is_system(&self) -> bool {
		self.is_system.as_flag()
	}

	pub(crate) fn is_admin(&self) -> bool {
		self.is_admin.as_flag()
	}

	/// `user_companies.allowed_companies`, either a map keyed by id or a list.
	pub(crate) fn allowed_companies(&self) -> Vec<OrganizationRef> {
		self.user_companies
			.get("allowed_companies")
			.map(parse_company_collection)
			.unwrap_or_default()
	}
}

fn parse_company_collection(value: &Value) -> Vec<OrganizationRef> {
	match value {
		Value::Object(map) => map.values().filter_map(parse_company_entry).collect(),
		Value::Array(items) => items.iter().filter_map(parse_company_entry).collect(),
		_ => Vec::new(),
	}
}

/// `{"id": 1, "name": "Acme"}` or `[1, "Acme"]`.
fn parse_company_entry(value: &Value) -> Option<OrganizationRef> {
	let (id, name) = match value {
		Value::Object(map) => (map.get("id")?, map.get("name")?),
		Value::Array(pair) if pair.len() >= 2 => (&pair[0], &pair[1]),
		_ => return None,
	};
	let id = LooseValue::from(id).as_id()?;
	let name = name.as_str()?.trim();
	Some(OrganizationRef::new(id, name))
}

/// One `res.users` row from the profile fetch.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ProfileRow {
	#[serde(default)]
	pub(crate) name: LooseValue,
	#[serde(default)]
	pub(crate) login: LooseValue,
	#[serde(default)]
	pub(crate) email: LooseValue,
}

/// One `res.users` row from the membership fetch.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct MembershipRow {
	#[serde(default)]
	pub(crate) company_ids: LooseValue,
	#[serde(default)]
	pub(crate) is_system: LooseValue,
	#[serde(default)]
	pub(crate) is_admin: LooseValue,
}

/// One `res.company` row.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct CompanyRow {
	#[serde(default)]
	id: LooseValue,
	#[serde(default)]
	name: LooseValue,
}

impl CompanyRow {
	pub(crate) fn into_organization(self) -> Option<OrganizationRef> {
		let id = self.id.as_id()?;
		let name = self.name.as_text()?.trim().to_string();
		Some(OrganizationRef::new(id, name))
	}
}
