use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::server::handlers::{
    app_detail, categories, category_page, featured, health, list_apps, refresh, search, submit,
};
use crate::server::state::AppState;

/// Response headers added to every response unless a handler already set them
pub fn security_headers() -> Vec<(HeaderName, HeaderValue)> {
    vec![
        (header::X_DNS_PREFETCH_CONTROL, HeaderValue::from_static("on")),
        (
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=63072000; includeSubDomains; preload"),
        ),
        (header::X_FRAME_OPTIONS, HeaderValue::from_static("SAMEORIGIN")),
        (header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff")),
        (header::X_XSS_PROTECTION, HeaderValue::from_static("1; mode=block")),
        (header::REFERRER_POLICY, HeaderValue::from_static("origin-when-cross-origin")),
        (
            HeaderName::from_static("permissions-policy"),
            HeaderValue::from_static("camera=(), microphone=(), geolocation=()"),
        ),
    ]
}

pub fn app_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/health", get(health))
        .route("/api/apps", get(list_apps))
        .route("/api/apps/:slug", get(app_detail))
        .route("/api/featured", get(featured))
        .route("/api/categories", get(categories))
        .route("/api/categories/:category", get(category_page))
        .route("/api/search", get(search))
        .route("/api/submissions", post(submit))
        .route("/api/admin/refresh", post(refresh));

    for (name, value) in security_headers() {
        router = router.layer(SetResponseHeaderLayer::if_not_present(name, value));
    }

    router.layer(cors).with_state(state)
}
