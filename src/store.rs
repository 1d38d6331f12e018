// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Credential store: the system of record for user identities.
//!
//! The gateway depends on the [`CredentialStore`] trait only; the in-memory
//! implementation here backs tests and single-node deployments. A database
//! implementation would satisfy the same contract with a unique index on
//! the email column.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::RwLock;

use thiserror::Error;

use crate::auth::Role;
use crate::models::User;

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    /// The email is already registered.
    #[error("email {0} is already registered")]
    EmailTaken(String),
}

/// A user record about to be persisted (id not yet assigned).
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// Contract of the external credential store.
///
/// `save` must enforce email uniqueness atomically: two concurrent saves of
/// the same email may not both succeed. An `exists_by_email` check followed
/// by a save is inherently racy and is no substitute.
pub trait CredentialStore: Send + Sync {
    /// Look up a user by exact (case-sensitive) email.
    fn find_by_email(&self, email: &str) -> Option<User>;

    /// Whether a user with this exact email exists.
    fn exists_by_email(&self, email: &str) -> bool;

    /// Persist a new user, assigning its id. Fails with
    /// [`StoreError::EmailTaken`] if the email is already registered.
    fn save(&self, user: NewUser) -> Result<User, StoreError>;
}

/// In-memory credential store.
///
/// Uniqueness is guaranteed by performing the existence check and the insert
/// inside one write-lock critical section.
#[derive(Default)]
pub struct InMemoryStore {
    users: RwLock<HashMap<String, User>>,
    next_id: AtomicI64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for InMemoryStore {
    fn find_by_email(&self, email: &str) -> Option<User> {
        self.users
            .read()
            .expect("users lock poisoned")
            .get(email)
            .cloned()
    }

    fn exists_by_email(&self, email: &str) -> bool {
        self.users
            .read()
            .expect("users lock poisoned")
            .contains_key(email)
    }

    fn save(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write().expect("users lock poisoned");
        if users.contains_key(&new_user.email) {
            return Err(StoreError::EmailTaken(new_user.email));
        }

        let user = User {
            id: self.next_id.fetch_add(1, Ordering::Relaxed) + 1,
            email: new_user.email.clone(),
            password_hash: new_user.password_hash,
            role: new_user.role,
        };
        users.insert(new_user.email, user.clone());
        Ok(user)
    }
}
