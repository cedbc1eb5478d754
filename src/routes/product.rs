//! Product route definitions

use axum::{routing::get, Router};

use crate::handlers::list_products;
use crate::state::AppState;

pub fn product_routes() -> Router<AppState> {
    Router::new().route("/api/products", get(list_products))
}
