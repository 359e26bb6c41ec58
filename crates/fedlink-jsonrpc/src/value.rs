// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::Deserialize;
use serde_json::Value;

/// A JSON scalar whose exact type is not guaranteed by the remote server.
///
/// Odoo returns record ids as integers, but some proxies re-encode them as
/// floats, and missing relational fields come back as `false`. Payloads are
/// decoded into this type once, and [`LooseValue::as_id`] is the single place
/// that turns them into an integer identifier.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LooseValue {
	Integer(i64),
	Float(f64),
	Bool(bool),
	String(String),
	#[default]
	Null,
	Other(Value),
}

impl LooseValue {
	/// Integer id, accepting whole floats. Strings, booleans and null yield `None`.
	pub fn as_id(&self) -> Option<i64> {
		match self {
			Self::Integer(i) => Some(*i),
			Self::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(*f as i64),
			// many2one fields are encoded as `[id, "display name"]`
			Self::Other(Value::Array(pair)) => pair.first().and_then(|v| Self::from(v).as_id()),
			_ => None,
		}
	}

	/// Flag value; anything that is not a JSON boolean counts as unset.
	pub fn as_flag(&self) -> bool {
		matches!(self, Self::Bool(true))
	}

	/// Ids from a JSON array of numbers, skipping anything that does not coerce.
	pub fn as_id_list(&self) -> Vec<i64> {
		match self {
			Self::Other(Value::Array(items)) => items
				.iter()
				.filter_map(|v| Self::from(v).as_id())
				.collect(),
			_ => Vec::new(),
		}
	}

	/// Non-empty string content.
	pub fn as_text(&self) -> Option<&str> {
		match self {
			Self::String(s) if !s.is_empty() => Some(s),
			_ => None,
		}
	}
}

impl From<&Value> for LooseValue {
	fn from(value: &Value) -> Self {
		match value {
			Value::Null => Self::Null,
			Value::Bool(b) => Self::Bool(*b),
			Value::Number(n) => match n.as_i64() {
				Some(i) => Self::Integer(i),
				None => n.as_f64().map(Self::Float).unwrap_or(Self::Null),
			},
			Value::String(s) => Self::String(s.clone()),
			other => Self::Other(other.clone()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn decodes_each_scalar_shape() {
		let decoded: Vec<LooseValue> =
			serde_json::from_value(json!([42, 42.0, 1.5, true, "x", null, [1, 2]])).unwrap();
		assert_eq!(decoded[0], LooseValue::Integer(42));
		assert_eq!(decoded[1], LooseValue::Float(42.0));
		assert_eq!(decoded[3], LooseValue::Bool(true));
		assert_eq!(decoded[4], LooseValue::String("x".into()));
		assert_eq!(decoded[5], LooseValue::Null);
		assert!(matches!(decoded[6], LooseValue::Other(_)));
	}

	#[test]
	fn ids_accept_integers_and_whole_floats() {
		assert_eq!(LooseValue::Integer(42).as_id(), Some(42));
		assert_eq!(LooseValue::Float(42.0).as_id(), Some(42));
		assert_eq!(LooseValue::Float(1.5).as_id(), None);
		assert_eq!(LooseValue::String("42".into()).as_id(), None);
		assert_eq!(LooseValue::Bool(false).as_id(), None);
		assert_eq!(LooseValue::Null.as_id(), None);
	}

	#[test]
	fn many2one_pair_yields_its_id() {
		let partner = LooseValue::from(&json!([7, "Bob B"]));
		assert_eq!(partner.as_id(), Some(7));
	}

	#[test]
	fn id_list_skips_non_numeric_entries() {
		let ids = LooseValue::from(&json!([1, 2.0, "3", null, 4]));
		assert_eq!(ids.as_id_list(), vec![1, 2, 4]);
		assert!(LooseValue::Bool(false).as_id_list().is_empty());
	}

	#[test]
	fn flags_require_literal_true() {
		assert!(LooseValue::Bool(true).as_flag());
		assert!(!LooseValue::Integer(1).as_flag());
		assert!(!LooseValue::Null.as_flag());
	}

	mod proptests {
		use super::*;
		use proptest::prelude::*;

		proptest! {
			#[test]
			fn integer_ids_survive_json(id in any::<i64>()) {
				let decoded: LooseValue = serde_json::from_value(json!(id)).unwrap();
				prop_assert_eq!(decoded.as_id(), Some(id));
			}

			#[test]
			fn whole_floats_coerce(id in -1_000_000i64..1_000_000) {
				prop_assert_eq!(LooseValue::Float(id as f64).as_id(), Some(id));
			}
		}
	}
}
