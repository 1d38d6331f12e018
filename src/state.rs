// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::{PathAllowlist, TokenService};
use crate::store::CredentialStore;

/// Shared application state.
///
/// Every collaborator is passed in explicitly at startup; handlers and
/// middleware receive the same immutable wiring for the process lifetime.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CredentialStore>,
    pub tokens: TokenService,
    pub open_paths: Arc<PathAllowlist>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        tokens: TokenService,
        open_paths: PathAllowlist,
    ) -> Self {
        Self {
            store,
            tokens,
            open_paths: Arc::new(open_paths),
        }
    }
}

#[cfg(test)]
impl AppState {
    /// Fresh state with an empty in-memory store, a fixed test secret and
    /// the default open paths.
    pub fn for_tests() -> Self {
        use crate::config::DEFAULT_OPEN_PATHS;
        use crate::store::InMemoryStore;

        Self::new(
            Arc::new(InMemoryStore::new()),
            TokenService::new("test_secret_key_for_testing_purposes_only", 30),
            PathAllowlist::new(DEFAULT_OPEN_PATHS.iter().map(ToString::to_string).collect()),
        )
    }
}
