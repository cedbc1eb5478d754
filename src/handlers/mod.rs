//! API handlers for the users API

pub mod product;
pub mod system;
pub mod user;

pub use product::list_products;
pub use system::{health_check, root};
pub use user::{create_user, delete_user, get_user, list_users, patch_user, replace_user};
