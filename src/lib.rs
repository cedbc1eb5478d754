//! Mock Users API Library
//!
//! CRUD endpoints over an in-memory user collection plus a read-only
//! product listing, served with axum.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
pub mod validation;

pub use routes::create_router;
pub use state::AppState;
pub use store::UserStore;
