use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::activity::{CategoryCounts, DEFAULT_ACTIVITY_LIMIT};
use crate::error::VaultError;
use crate::models::*;

/// How many log records the history endpoint returns by default.
const DEFAULT_LOG_LIMIT: usize = 50;

// ============================================================
// Error Handling
// ============================================================

/// Map a core error onto an HTTP status for the read endpoints.
/// Validation and lookup failures are safe to expose; anything else is
/// logged server-side and sanitized.
fn error_response(e: VaultError) -> (StatusCode, String) {
    match e {
        VaultError::InvalidInput(_) => (StatusCode::BAD_REQUEST, e.to_string()),
        VaultError::NotFound(_) => (StatusCode::NOT_FOUND, e.to_string()),
        VaultError::AlreadyExists(_) => (StatusCode::CONFLICT, e.to_string()),
        VaultError::Io(_) => {
            tracing::error!("Internal error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    }
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Dashboard reads
// ============================================================

/// Combined overview: counts, the recent-activity feed, and the optional
/// free-form `Dashboard.md` text (raw, unrendered).
#[derive(Debug, Serialize)]
pub struct DashboardOverview {
    pub counts: CategoryCounts,
    pub activity: Vec<ActivityEntry>,
    pub overview: Option<String>,
}

pub async fn dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardOverview>, (StatusCode, String)> {
    let counts = state.queries.counts().map_err(error_response)?;
    let activity = state
        .queries
        .recent_activity(DEFAULT_ACTIVITY_LIMIT)
        .map_err(error_response)?;
    Ok(Json(DashboardOverview {
        counts,
        activity,
        overview: state.queries.dashboard_text(),
    }))
}

pub async fn counts(
    State(state): State<AppState>,
) -> Result<Json<CategoryCounts>, (StatusCode, String)> {
    state.queries.counts().map(Json).map_err(error_response)
}

#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    /// Maximum number of entries to return. Defaults to 20.
    pub limit: Option<usize>,
}

pub async fn recent_activity(
    State(state): State<AppState>,
    Query(query): Query<ActivityQuery>,
) -> Result<Json<Vec<ActivityEntry>>, (StatusCode, String)> {
    state
        .queries
        .recent_activity(query.limit.unwrap_or(DEFAULT_ACTIVITY_LIMIT))
        .map(Json)
        .map_err(error_response)
}

pub async fn category_listing(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<ListedItem>>, (StatusCode, String)> {
    let category = Category::parse(&category).ok_or((
        StatusCode::BAD_REQUEST,
        format!("Unknown category: {}", category),
    ))?;
    state
        .queries
        .category_listing(category)
        .map(Json)
        .map_err(error_response)
}

pub async fn social_drafts(
    State(state): State<AppState>,
) -> Result<Json<Vec<ItemMeta>>, (StatusCode, String)> {
    state
        .queries
        .social_drafts()
        .map(Json)
        .map_err(error_response)
}

#[derive(Debug, Deserialize)]
pub struct LogsQuery {
    /// Maximum number of records to return. Defaults to 50.
    pub limit: Option<usize>,
}

pub async fn recent_logs(
    State(state): State<AppState>,
    Query(query): Query<LogsQuery>,
) -> Json<Vec<TransitionRecord>> {
    Json(state.audit.recent(query.limit.unwrap_or(DEFAULT_LOG_LIMIT)))
}

#[derive(Debug, Deserialize)]
pub struct ViewFileQuery {
    pub path: String,
}

/// Fetch one item's raw content. The path must sit inside the vault.
pub async fn view_file(
    State(state): State<AppState>,
    Query(query): Query<ViewFileQuery>,
) -> Result<Json<ItemContent>, (StatusCode, String)> {
    let path = std::path::Path::new(&query.path);
    if !state.config.contains(path) {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("Path is outside the vault: {}", query.path),
        ));
    }
    let content = state.store.read_item(path).map_err(error_response)?;
    Ok(Json(ItemContent {
        filename: path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string(),
        filepath: path.to_path_buf(),
        content,
    }))
}

// ============================================================
// Transitions
// ============================================================

/// Body accepted by every mutation endpoint.
#[derive(Debug, Deserialize)]
pub struct TransitionRequest {
    pub filepath: String,
}

/// The one contract the dashboard relies on: every transition request is
/// answered with this envelope, never an unhandled fault.
#[derive(Debug, Serialize, Deserialize)]
pub struct TransitionResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn run_transition(state: &AppState, action: ActionKind, filepath: &str) -> TransitionResponse {
    match state
        .engine
        .apply(action, filepath, action.destination())
    {
        Ok(_) => TransitionResponse {
            success: true,
            error: None,
        },
        Err(e) => {
            tracing::warn!("{} of {:?} failed: {}", action.as_str(), filepath, e);
            TransitionResponse {
                success: false,
                error: Some(e.to_string()),
            }
        }
    }
}

pub async fn approve(
    State(state): State<AppState>,
    Json(request): Json<TransitionRequest>,
) -> Json<TransitionResponse> {
    Json(run_transition(&state, ActionKind::Approve, &request.filepath))
}

pub async fn reject(
    State(state): State<AppState>,
    Json(request): Json<TransitionRequest>,
) -> Json<TransitionResponse> {
    Json(run_transition(&state, ActionKind::Reject, &request.filepath))
}

pub async fn send_for_approval(
    State(state): State<AppState>,
    Json(request): Json<TransitionRequest>,
) -> Json<TransitionResponse> {
    Json(run_transition(
        &state,
        ActionKind::SendForApproval,
        &request.filepath,
    ))
}
