//! User route definitions

use axum::{routing::get, Router};

use crate::handlers::user;
use crate::state::AppState;

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/api/users", get(user::list_users).post(user::create_user))
        .route(
            "/api/users/:id",
            get(user::get_user)
                .put(user::replace_user)
                .patch(user::patch_user)
                .delete(user::delete_user),
        )
}
