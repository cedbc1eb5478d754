//! In-memory user store
//!
//! An ordered collection of users shared between request tasks. All reads
//! and writes go through a single `RwLock`, so each mutation (including id
//! assignment) is atomic with respect to other requests.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::{seed_users, User, UserPatch, UserPayload};

/// A user located by id, with its position at lookup time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserRef {
    pub id: u32,
    pub index: usize,
}

#[derive(Clone, Default)]
pub struct UserStore {
    users: Arc<RwLock<Vec<User>>>,
}

impl UserStore {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }

    /// Store holding the default seed users (ids 1 to 6)
    pub fn seeded() -> Self {
        Self::new(seed_users())
    }

    pub async fn list(&self) -> Vec<User> {
        self.users.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Users whose username contains `value` (case-sensitive)
    pub async fn search(&self, value: &str) -> Vec<User> {
        self.users
            .read()
            .await
            .iter()
            .filter(|user| user.username.contains(value))
            .cloned()
            .collect()
    }

    /// Find the position of the user with `id`
    pub async fn resolve(&self, id: u32) -> Option<UserRef> {
        let users = self.users.read().await;
        position_of(&users, id).map(|index| UserRef { id, index })
    }

    pub async fn get(&self, user: UserRef) -> Option<User> {
        let users = self.users.read().await;
        locate(&users, user).map(|index| users[index].clone())
    }

    /// Append a new user with the next free id and return the whole collection
    pub async fn create(&self, payload: UserPayload) -> Vec<User> {
        let mut users = self.users.write().await;
        let id = next_id(&users);

        users.push(User {
            id,
            username: payload.username,
            display_name: payload.display_name,
        });

        tracing::info!(user_id = id, total = users.len(), "User created");
        users.clone()
    }

    /// Replace every field but the id
    pub async fn replace(&self, user: UserRef, payload: UserPayload) -> Option<User> {
        let mut users = self.users.write().await;
        let index = locate(&users, user)?;

        users[index] = User {
            id: user.id,
            username: payload.username,
            display_name: payload.display_name,
        };

        tracing::debug!(user_id = user.id, "User replaced");
        Some(users[index].clone())
    }

    /// Overwrite only the fields present in `patch`
    pub async fn merge(&self, user: UserRef, patch: UserPatch) -> Option<User> {
        let mut users = self.users.write().await;
        let index = locate(&users, user)?;
        let existing = &mut users[index];

        if let Some(username) = patch.username {
            existing.username = username;
        }
        if let Some(display_name) = patch.display_name {
            existing.display_name = display_name;
        }

        tracing::debug!(user_id = user.id, "User updated");
        Some(existing.clone())
    }

    pub async fn remove(&self, user: UserRef) -> Option<User> {
        let mut users = self.users.write().await;
        let index = locate(&users, user)?;
        let removed = users.remove(index);

        tracing::info!(user_id = user.id, total = users.len(), "User deleted");
        Some(removed)
    }
}

fn position_of(users: &[User], id: u32) -> Option<usize> {
    users.iter().position(|user| user.id == id)
}

/// Trust the recorded index while it still holds the same id; the collection
/// may have shifted since the user was resolved.
fn locate(users: &[User], user: UserRef) -> Option<usize> {
    match users.get(user.index) {
        Some(found) if found.id == user.id => Some(user.index),
        _ => position_of(users, user.id),
    }
}

fn next_id(users: &[User]) -> u32 {
    users.iter().map(|user| user.id).max().map_or(1, |max| max + 1)
}
