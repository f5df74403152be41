//! CORS (Cross-Origin Resource Sharing) middleware.

pub mod config;
pub mod layer;

pub use config::{AllowedHeaders, AllowedOrigins, CorsPolicy};
pub use layer::{CorsLayer, CorsMiddleware};
