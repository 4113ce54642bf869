//! Permissive CORS headers for browser callers.
//!
//! Any origin is allowed. The allowed request headers are the ones the
//! platform's browser SDK sends.

use axum::http::{header, HeaderName};

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// Headers attached to every endpoint response, including errors and pre-flight.
pub fn headers() -> [(HeaderName, &'static str); 2] {
    [
        (header::ACCESS_CONTROL_ALLOW_ORIGIN, ALLOW_ORIGIN),
        (header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOW_HEADERS),
    ]
}
