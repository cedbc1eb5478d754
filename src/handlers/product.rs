//! Product listing handler

use axum::Json;

use crate::models::{products, Product};

/// GET /api/products - The fixed product catalogue
pub async fn list_products() -> Json<Vec<Product>> {
    Json(products())
}
