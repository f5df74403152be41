//! Middleware for the tutor API server.

pub mod cors;

pub use cors::{AllowedHeaders, AllowedOrigins, CorsLayer, CorsMiddleware, CorsPolicy};
