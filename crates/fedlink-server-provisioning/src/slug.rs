// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

/// Turns an organization name into a team name.
///
/// Lower-cases, maps whitespace and `_` to `-`, drops anything outside
/// `[a-z0-9-]`, collapses dash runs and trims dashes from both ends. The
/// output is empty or matches `[a-z0-9]+(-[a-z0-9]+)*`, and
/// `slugify(slugify(x)) == slugify(x)`.
pub fn slugify(name: &str) -> String {
	let mut slug = String::with_capacity(name.len());
	for c in name.trim().to_lowercase().chars() {
		let c = if c == '_' || c.is_whitespace() { '-' } else { c };
		if c.is_ascii_lowercase() || c.is_ascii_digit() {
			slug.push(c);
		} else if c == '-' && !slug.is_empty() && !slug.ends_with('-') {
			slug.push('-');
		}
	}
	while slug.ends_with('-') {
		slug.pop();
	}
	slug
}
