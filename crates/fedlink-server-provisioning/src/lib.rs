// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Provisioning of federated identities into local users, sessions and teams.
//!
//! [`ProvisioningService`] is the single code path every identity provider
//! goes through after authentication. Persistence is reached only through
//! the [`UserStore`], [`TeamStore`] and [`SessionIssuer`] traits;
//! [`MemoryStore`] implements all three in memory.

mod error;
mod memory;
mod service;
mod slug;
mod store;

pub use error::{ProvisioningError, StoreError};
pub use memory::MemoryStore;
pub use service::{Provisioned, ProvisioningService};
pub use slug::slugify;
pub use store::{SessionIssuer, TeamStore, UserStore};
