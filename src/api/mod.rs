mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::activity::VaultQueries;
use crate::audit::AuditLog;
use crate::config::VaultConfig;
use crate::engine::TransitionEngine;
use crate::store::ItemStore;

/// Everything the handlers need, wired once from the vault config.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<VaultConfig>,
    pub store: ItemStore,
    pub audit: AuditLog,
    pub engine: TransitionEngine,
    pub queries: VaultQueries,
}

impl AppState {
    pub fn new(config: VaultConfig) -> Self {
        let config = Arc::new(config);
        let store = ItemStore::new(config.clone());
        let audit = AuditLog::new(config.clone());
        let engine = TransitionEngine::new(config.clone(), store.clone(), audit.clone());
        let queries = VaultQueries::new(config.clone(), store.clone());
        Self {
            config,
            store,
            audit,
            engine,
            queries,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        // Dashboard reads
        .route("/dashboard", get(handlers::dashboard))
        .route("/counts", get(handlers::counts))
        .route("/activity", get(handlers::recent_activity))
        .route("/categories/{category}", get(handlers::category_listing))
        .route("/social_drafts", get(handlers::social_drafts))
        .route("/logs", get(handlers::recent_logs))
        .route("/file", get(handlers::view_file))
        // Transitions
        .route("/approve", post(handlers::approve))
        .route("/reject", post(handlers::reject))
        .route("/send_for_approval", post(handlers::send_for_approval))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
