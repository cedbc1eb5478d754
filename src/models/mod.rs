//! Data models for the users API

use serde::{Deserialize, Serialize};

/// User record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u32,
    pub username: String,
    pub display_name: String,
}

/// Product listing entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub product: String,
    pub price: f64,
}

// ============================================================================
// Request DTOs
// ============================================================================

/// Body for creating or fully replacing a user.
///
/// Only the schema fields survive deserialization; any other keys in the
/// request body are dropped.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    pub username: String,
    pub display_name: String,
}

/// Body for a partial user update
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    pub username: Option<String>,
    pub display_name: Option<String>,
}

/// Query string accepted by the user listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserListQuery {
    pub filter: Option<String>,
    pub value: Option<String>,
}

/// Greeting served at the root path
#[derive(Debug, Serialize)]
pub struct Greeting {
    pub msg: &'static str,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub users: usize,
    pub version: &'static str,
}

/// The users every fresh process starts with
pub fn seed_users() -> Vec<User> {
    [
        (1, "anson", "Anson"),
        (2, "jack", "Jack"),
        (3, "adam", "Adam"),
        (4, "tina", "Tina"),
        (5, "jason", "Jason"),
        (6, "henry", "Henry"),
    ]
    .into_iter()
    .map(|(id, username, display_name)| User {
        id,
        username: username.to_string(),
        display_name: display_name.to_string(),
    })
    .collect()
}

/// The fixed product catalogue
pub fn products() -> Vec<Product> {
    vec![Product {
        id: 1,
        product: "Chicken Shwarma".to_string(),
        price: 90.0,
    }]
}
