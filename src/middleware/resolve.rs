//! User resolution from the `:id` path parameter
//!
//! Handlers that take a [`ResolvedUser`] only run once the id has parsed and
//! matched a stored user. A non-numeric id halts the request with 400. A
//! numeric id with no matching user (including one too large or negative to
//! ever be assigned) halts it with 404.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::ApiError;
use crate::store::{UserRef, UserStore};

/// A stored user located by the request path
#[derive(Debug, Clone, Copy)]
pub struct ResolvedUser(pub UserRef);

#[async_trait]
impl<S> FromRequestParts<S> for ResolvedUser
where
    UserStore: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw_id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::BadRequest("Missing user ID".to_string()))?;

        let store = UserStore::from_ref(state);
        let user = match parse_id(&raw_id)? {
            Some(id) => store.resolve(id).await,
            None => None,
        }
        .ok_or_else(|| ApiError::NotFound(format!("User {} does not exist", raw_id.trim())))?;

        tracing::debug!(user_id = user.id, index = user.index, "Resolved user");
        Ok(ResolvedUser(user))
    }
}

/// Accepts an optionally signed run of ASCII digits, surrounding whitespace
/// ignored. Anything else is a bad request. `None` means the id is numeric
/// but outside the range ids are assigned from.
fn parse_id(raw: &str) -> Result<Option<u32>, ApiError> {
    let trimmed = raw.trim();
    let digits = trimmed
        .strip_prefix(|c| c == '-' || c == '+')
        .unwrap_or(trimmed);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::BadRequest(format!("Invalid ID '{}'", raw)));
    }

    Ok(trimmed.parse::<u32>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_accepts_integers() {
        assert_eq!(parse_id("7").unwrap(), Some(7));
        assert_eq!(parse_id("+7").unwrap(), Some(7));
        assert_eq!(parse_id(" 7 ").unwrap(), Some(7));
        assert_eq!(parse_id("007").unwrap(), Some(7));
    }

    #[test]
    fn test_parse_id_out_of_range_is_numeric() {
        assert_eq!(parse_id("-1").unwrap(), None);
        assert_eq!(parse_id("4294967296").unwrap(), None);
        assert_eq!(parse_id("99999999999999999999").unwrap(), None);
    }

    #[test]
    fn test_parse_id_rejects_non_numeric() {
        for raw in ["abc", "7abc", "1.5", "", "-", "+", "1e3", "--1"] {
            assert!(
                matches!(parse_id(raw), Err(ApiError::BadRequest(_))),
                "{raw:?} should be rejected"
            );
        }
    }
}
