use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};

/// Restricts browsers to `origin` when configured, otherwise allows any.
pub fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match origin.and_then(|o| HeaderValue::from_str(o).ok()) {
        Some(origin) => layer.allow_origin(origin),
        None => {
            if origin.is_some() {
                tracing::warn!("CORS_ORIGIN is not a valid header value; allowing any origin");
            }
            layer.allow_origin(Any)
        }
    }
}
