//! CORS (Cross-Origin Resource Sharing) middleware configuration

use std::time::Duration;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::config::CorsConfig;

/// Any origin, method and header is accepted. They are mirrored back from
/// the request rather than answered with `*`, which browsers refuse when
/// credentials are allowed.
pub fn cors_layer_from_config(config: &CorsConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(config.allow_credentials)
        .max_age(Duration::from_secs(config.max_age_seconds))
}
