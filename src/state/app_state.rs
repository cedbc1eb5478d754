//! Application state shared across handlers

use axum::extract::FromRef;

use crate::config::QueryValidation;
use crate::store::UserStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub users: UserStore,
    pub query_validation: QueryValidation,
}

impl AppState {
    pub fn new(users: UserStore, query_validation: QueryValidation) -> Self {
        Self {
            users,
            query_validation,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(UserStore::seeded(), QueryValidation::default())
    }
}

impl FromRef<AppState> for UserStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.users.clone()
    }
}
