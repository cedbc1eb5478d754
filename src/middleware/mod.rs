//! Middleware for the users API
//!
//! Request tracing and security headers wrap every route; the user resolver
//! runs per request as an extractor on the `/api/users/:id` routes.

mod request_log;
pub mod resolve;
mod security;

pub use request_log::request_tracing;
pub use resolve::ResolvedUser;
pub use security::security_headers;
