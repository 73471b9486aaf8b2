// Middleware modules for PhishGuard Backend

pub mod cors;

pub use cors::{dynamic_cors_middleware, resolve_allowed_origin, AllowedOrigin};
