use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{info, warn};

use crate::domain::{Category, Submission};
use crate::server::models::{
    AppDetail, AppList, CategoryPage, CategorySummary, ListParams, RefreshResult, SearchResults,
    SubmissionResult,
};
use crate::server::state::AppState;

/// Error response with a JSON `{ "error": ... }` body
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn not_found(message: impl Into<String>) -> Self {
        Self { status: StatusCode::NOT_FOUND, message: message.into() }
    }

    fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: message.into() }
    }

    fn unauthorized() -> Self {
        Self { status: StatusCode::UNAUTHORIZED, message: "missing or invalid admin token".into() }
    }

    fn forbidden(message: impl Into<String>) -> Self {
        Self { status: StatusCode::FORBIDDEN, message: message.into() }
    }
}

/// Check `Authorization: Bearer <token>` against the configured admin token
fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let expected = state
        .admin_token
        .as_deref()
        .ok_or_else(|| ApiError::forbidden("admin routes are disabled"))?;
    let presented = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim);
    match presented {
        Some(token) if token == expected => Ok(()),
        _ => {
            warn!("Rejected admin request without a valid token");
            Err(ApiError::unauthorized())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

fn parse_category(raw: &str) -> Option<Category> {
    raw.parse().ok()
}

pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "app-directory",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// `GET /api/apps`: the published catalog, optionally narrowed by category and filters
pub async fn list_apps(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<AppList>, ApiError> {
    let category = match params.category.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        Some(raw) => Some(
            parse_category(raw).ok_or_else(|| ApiError::bad_request(format!("unknown category '{raw}'")))?,
        ),
        None => None,
    };

    let parsed = params.to_filter();
    if parsed.unsatisfiable {
        return Ok(Json(AppList::new(Vec::new())));
    }
    let apps = state.service.filter(category, &parsed.criteria).await;
    Ok(Json(AppList::new(apps)))
}

/// `GET /api/apps/:slug`: one entry plus up to four related entries
pub async fn app_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<AppDetail>, ApiError> {
    let app = state
        .service
        .find_by_slug(&slug)
        .await
        .ok_or_else(|| ApiError::not_found(format!("no app with slug '{slug}'")))?;
    let related = state.service.related(&app).await;
    Ok(Json(AppDetail {
        category: app.category.info(),
        app,
        related,
    }))
}

pub async fn featured(State(state): State<AppState>) -> Json<AppList> {
    Json(AppList::new(state.service.featured().await))
}

pub async fn categories(State(state): State<AppState>) -> Json<Vec<CategorySummary>> {
    let summaries = state
        .service
        .category_counts()
        .await
        .into_iter()
        .map(|(category, count)| CategorySummary { info: category.info(), count })
        .collect();
    Json(summaries)
}

/// `GET /api/categories/:category`: category equality first, then platform/URL type filters
pub async fn category_page(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<Json<CategoryPage>, ApiError> {
    let category = parse_category(&raw)
        .ok_or_else(|| ApiError::not_found(format!("unknown category '{raw}'")))?;

    let total = state.service.by_category(category).await.len();
    let parsed = params.to_filter();
    let apps = if parsed.unsatisfiable {
        Vec::new()
    } else {
        state.service.filter(Some(category), &parsed.criteria).await
    };

    Ok(Json(CategoryPage {
        category: category.info(),
        total,
        count: apps.len(),
        apps,
    }))
}

/// `GET /api/search?q=...`: text search combined with platform/URL type filters
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Json<SearchResults> {
    let query = params.q.clone().unwrap_or_default();
    let parsed = params.to_filter();
    let text_only = parsed.criteria.platforms.is_none() && parsed.criteria.url_types.is_none();
    let apps = if parsed.unsatisfiable {
        Vec::new()
    } else if text_only {
        state.service.search(&query).await
    } else {
        state.service.filter(None, &parsed.criteria).await
    };
    Json(SearchResults {
        query,
        count: apps.len(),
        apps,
    })
}

/// `POST /api/submissions`
pub async fn submit(
    State(state): State<AppState>,
    Json(submission): Json<Submission>,
) -> impl IntoResponse {
    if let Err(e) = submission.validate() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(SubmissionResult { success: false, error: Some(e.to_string()) }),
        );
    }

    if state.service.submit(&submission).await {
        (
            StatusCode::CREATED,
            Json(SubmissionResult { success: true, error: None }),
        )
    } else {
        (
            StatusCode::BAD_GATEWAY,
            Json(SubmissionResult {
                success: false,
                error: Some("Something went wrong. Please try again later.".to_string()),
            }),
        )
    }
}

/// `POST /api/admin/refresh`: drop the cached catalog and refetch it.
/// Requires the admin bearer token.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<RefreshResult>, ApiError> {
    require_admin(&state, &headers)?;
    let catalog = state.service.refresh().await;
    let version = state.service.cache().version().await;
    info!("Catalog refreshed on request: {} entries", catalog.len());
    Ok(Json(RefreshResult {
        count: catalog.len(),
        version,
    }))
}
