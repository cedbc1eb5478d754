//! User HTTP handlers
//!
//! Routes taking an `:id` resolve it through [`ResolvedUser`] before the
//! handler body runs. Request bodies are checked against a rule list as raw
//! JSON first, so every failing field is reported, and only then
//! deserialized. Creation applies the full user schema; replace and merge
//! only check that the fields have the right shape.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    Json,
};
use serde_json::{Map, Value};

use crate::config::QueryValidation;
use crate::error::{ApiError, ApiResult};
use crate::middleware::ResolvedUser;
use crate::models::{User, UserListQuery, UserPatch, UserPayload};
use crate::state::AppState;
use crate::validation::{
    validate, validate_present, Location, Rule, USER_FILTER_QUERY, USER_SCHEMA, USER_SHAPE,
};

/// GET /api/users - List users, optionally narrowed by `filter` and `value`
pub async fn list_users(
    State(state): State<AppState>,
    query: Result<Query<UserListQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<User>>> {
    let Query(query) = query?;

    if let Some(filter) = &query.filter {
        let mut params = Map::new();
        params.insert("filter".to_string(), Value::String(filter.clone()));

        if let Err(errors) = validate(USER_FILTER_QUERY, &Value::Object(params), Location::Query) {
            match state.query_validation {
                QueryValidation::Enforce => return Err(ApiError::Validation(errors)),
                QueryValidation::Log => {
                    tracing::warn!(?errors, "User listing query failed validation");
                }
            }
        }
    }

    let filter = query.filter.as_deref().filter(|s| !s.is_empty());
    let value = query.value.as_deref().filter(|s| !s.is_empty());

    let users = match (filter, value) {
        (Some(_), Some(value)) => state.users.search(value).await,
        _ => state.users.list().await,
    };

    Ok(Json(users))
}

/// GET /api/users/:id - Fetch a single user
pub async fn get_user(
    State(state): State<AppState>,
    ResolvedUser(user): ResolvedUser,
) -> ApiResult<Json<User>> {
    state
        .users
        .get(user)
        .await
        .map(Json)
        .ok_or_else(|| user_gone(user.id))
}

/// POST /api/users - Create a user and return the whole collection
pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Vec<User>>> {
    let Json(body) = body?;
    let payload: UserPayload = checked_body(body, USER_SCHEMA, false)?;

    Ok(Json(state.users.create(payload).await))
}

/// PUT /api/users/:id - Replace every field of a user except its id
pub async fn replace_user(
    State(state): State<AppState>,
    ResolvedUser(user): ResolvedUser,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Json(body) = body?;
    let payload: UserPayload = checked_body(body, USER_SHAPE, false)?;

    state
        .users
        .replace(user, payload)
        .await
        .ok_or_else(|| user_gone(user.id))?;

    Ok(StatusCode::OK)
}

/// PATCH /api/users/:id - Merge the given fields into a user
pub async fn patch_user(
    State(state): State<AppState>,
    ResolvedUser(user): ResolvedUser,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Json(body) = body?;
    let patch: UserPatch = checked_body(body, USER_SHAPE, true)?;

    state
        .users
        .merge(user, patch)
        .await
        .ok_or_else(|| user_gone(user.id))?;

    Ok(StatusCode::OK)
}

/// DELETE /api/users/:id - Remove a user
pub async fn delete_user(
    State(state): State<AppState>,
    ResolvedUser(user): ResolvedUser,
) -> ApiResult<StatusCode> {
    state
        .users
        .remove(user)
        .await
        .ok_or_else(|| user_gone(user.id))?;

    Ok(StatusCode::OK)
}

/// Validate a JSON object against `rules` and deserialize it.
/// With `partial`, rules for absent fields are skipped.
fn checked_body<T: serde::de::DeserializeOwned>(
    body: Value,
    rules: &[Rule],
    partial: bool,
) -> ApiResult<T> {
    if !body.is_object() {
        return Err(ApiError::BadRequest(
            "Request body must be a JSON object".to_string(),
        ));
    }

    if partial {
        validate_present(rules, &body, Location::Body)?;
    } else {
        validate(rules, &body, Location::Body)?;
    }

    Ok(serde_json::from_value(body)?)
}

// The user was resolved but removed before the handler got the lock
fn user_gone(id: u32) -> ApiError {
    ApiError::NotFound(format!("User {} does not exist", id))
}
