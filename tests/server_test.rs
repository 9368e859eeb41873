mod common;

use anyhow::Result;
use app_directory::server::{app_router, AppState};
use app_directory::service::CatalogService;
use app_directory::storage::InMemoryStore;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use common::sample_records;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

const ADMIN_TOKEN: &str = "test-admin-token";

fn router_with(store: InMemoryStore) -> Router {
    let service = CatalogService::new(Arc::new(store), Duration::from_secs(900));
    app_router(AppState::new(service, Some(ADMIN_TOKEN.to_string())))
}

fn sample_router() -> Router {
    router_with(InMemoryStore::with_records(sample_records()))
}

async fn get(router: Router, uri: &str) -> Result<(StatusCode, Value)> {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty())?)
        .await?;
    let status = response.status();
    let bytes = hyper::body::to_bytes(response.into_body()).await?;
    Ok((status, serde_json::from_slice(&bytes)?))
}

async fn post_json(router: Router, uri: &str, body: Value) -> Result<(StatusCode, Value)> {
    post_json_as(router, uri, body, None).await
}

async fn post_json_as(
    router: Router,
    uri: &str,
    body: Value,
    bearer: Option<&str>,
) -> Result<(StatusCode, Value)> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = builder.body(Body::from(body.to_string()))?;
    let response = router.oneshot(request).await?;
    let status = response.status();
    let bytes = hyper::body::to_bytes(response.into_body()).await?;
    Ok((status, serde_json::from_slice(&bytes)?))
}

fn app_names(body: &Value) -> Vec<String> {
    body["apps"]
        .as_array()
        .map(|apps| {
            apps.iter()
                .filter_map(|a| a["name"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::test]
async fn health_reports_ok() -> Result<()> {
    let (status, body) = get(sample_router(), "/health").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    Ok(())
}

#[tokio::test]
async fn responses_carry_security_headers() -> Result<()> {
    let response = sample_router()
        .oneshot(Request::builder().uri("/health").body(Body::empty())?)
        .await?;
    let headers = response.headers();
    assert_eq!(headers["x-frame-options"], "SAMEORIGIN");
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["referrer-policy"], "origin-when-cross-origin");
    assert_eq!(
        headers["strict-transport-security"],
        "max-age=63072000; includeSubDomains; preload"
    );
    assert_eq!(
        headers["permissions-policy"],
        "camera=(), microphone=(), geolocation=()"
    );
    Ok(())
}

#[tokio::test]
async fn lists_whole_catalog_without_filters() -> Result<()> {
    let (status, body) = get(sample_router(), "/api/apps").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], sample_records().len());
    Ok(())
}

#[tokio::test]
async fn filters_by_platform_and_url_type() -> Result<()> {
    let (_, body) = get(sample_router(), "/api/apps?platforms=iOS&url_types=App%20Store").await?;
    assert_eq!(app_names(&body), vec!["TickTick", "ProtonVPN", "Signal"]);
    Ok(())
}

#[tokio::test]
async fn unknown_filter_values_match_nothing() -> Result<()> {
    let (status, body) = get(sample_router(), "/api/apps?platforms=Android").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
    Ok(())
}

#[tokio::test]
async fn unknown_category_param_is_rejected() -> Result<()> {
    let (status, body) = get(sample_router(), "/api/apps?category=games").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap_or_default().contains("games"));
    Ok(())
}

#[tokio::test]
async fn app_detail_includes_category_and_related() -> Result<()> {
    let (status, body) = get(sample_router(), "/api/apps/figma").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["app"]["name"], "Figma");
    assert_eq!(body["category"]["id"], "design");
    assert_eq!(body["category"]["name"], "Design");
    assert_eq!(app_names(&json!({ "apps": body["related"] })), vec!["Photopea"]);
    Ok(())
}

#[tokio::test]
async fn missing_app_is_not_found() -> Result<()> {
    let (status, _) = get(sample_router(), "/api/apps/does-not-exist").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn featured_is_capped() -> Result<()> {
    let (_, body) = get(sample_router(), "/api/featured").await?;
    assert_eq!(body["count"], 5);
    Ok(())
}

#[tokio::test]
async fn categories_list_counts() -> Result<()> {
    let (_, body) = get(sample_router(), "/api/categories").await?;
    let categories = body.as_array().cloned().unwrap_or_default();
    assert_eq!(categories.len(), 7);
    assert_eq!(categories[0]["id"], "design");
    assert_eq!(categories[0]["count"], 2);
    Ok(())
}

#[tokio::test]
async fn category_page_applies_filters_after_category() -> Result<()> {
    let (status, body) = get(sample_router(), "/api/categories/productivity?platforms=Web").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    assert_eq!(app_names(&body), vec!["TickTick"]);

    let (status, _) = get(sample_router(), "/api/categories/games").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn search_is_case_insensitive() -> Result<()> {
    let (_, body) = get(sample_router(), "/api/search?q=PASSWORD").await?;
    assert_eq!(body["query"], "PASSWORD");
    assert_eq!(app_names(&body), vec!["Bitwarden"]);
    Ok(())
}

#[tokio::test]
async fn submission_round_trip() -> Result<()> {
    let store = InMemoryStore::new();
    let router = router_with(store.clone());

    let (status, body) = post_json(
        router,
        "/api/submissions",
        json!({
            "appName": "Raycast",
            "url": "https://www.raycast.com",
            "shortDescription": "Launcher",
            "whyGreat": "Fast",
            "email": "someone@example.com",
            "platform": ["macOS"]
        }),
    )
    .await?;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(store.len(), 1);
    Ok(())
}

#[tokio::test]
async fn incomplete_submission_is_unprocessable() -> Result<()> {
    let store = InMemoryStore::new();
    let router = router_with(store.clone());

    let (status, body) = post_json(
        router,
        "/api/submissions",
        json!({
            "appName": "",
            "url": "https://www.raycast.com",
            "shortDescription": "Launcher",
            "whyGreat": "Fast",
            "email": "someone@example.com"
        }),
    )
    .await?;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
    assert!(store.is_empty());
    Ok(())
}

#[tokio::test]
async fn refresh_picks_up_new_records() -> Result<()> {
    let store = InMemoryStore::with_records(sample_records());
    let router = router_with(store.clone());

    let (_, before) = get(router.clone(), "/api/apps").await?;
    assert_eq!(before["count"], 12);

    let mut extra = sample_records().remove(0);
    extra.id = "recExtra".to_string();
    extra.fields.app_name = Some("Figma Mirror".to_string());
    extra.fields.slug = Some("figma-mirror".to_string());
    app_directory::storage::CatalogStore::create_record(&store, &extra.fields).await?;

    let (_, cached) = get(router.clone(), "/api/apps").await?;
    assert_eq!(cached["count"], 12);

    let (status, refreshed) =
        post_json_as(router.clone(), "/api/admin/refresh", json!({}), Some(ADMIN_TOKEN)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(refreshed["count"], 13);

    let (_, after) = get(router, "/api/apps").await?;
    assert_eq!(after["count"], 13);
    Ok(())
}

#[tokio::test]
async fn refresh_requires_admin_token() -> Result<()> {
    let store = InMemoryStore::with_records(sample_records());
    let router = router_with(store.clone());

    let (status, body) = post_json(router.clone(), "/api/admin/refresh", json!({})).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let (status, _) =
        post_json_as(router, "/api/admin/refresh", json!({}), Some("wrong-token")).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn refresh_is_disabled_without_configured_token() -> Result<()> {
    let service = CatalogService::new(
        Arc::new(InMemoryStore::with_records(sample_records())),
        Duration::from_secs(900),
    );
    let router = app_router(AppState::new(service, None));

    let (status, _) = post_json_as(router, "/api/admin/refresh", json!({}), Some(ADMIN_TOKEN)).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    Ok(())
}
