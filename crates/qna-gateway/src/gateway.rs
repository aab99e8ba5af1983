//! Main Gateway implementation
//!
//! Serves the RPC endpoint, the UI pages and the health/status probes from
//! one axum router.

use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use qna_core::{InMemoryStore, Procedures, QuestionStore};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::{rpc, ui, GatewayError, Result};

/// Gateway state shared across handlers
#[derive(Debug, Clone)]
pub struct GatewayState {
    pub config: GatewayConfig,
    pub procedures: Procedures,
    pub started_at: DateTime<Utc>,
    pub shutdown_tx: broadcast::Sender<()>,
}

impl GatewayState {
    pub fn new(config: GatewayConfig) -> Self {
        let store: Arc<dyn QuestionStore> = if config.seed {
            Arc::new(InMemoryStore::seeded())
        } else {
            Arc::new(InMemoryStore::new())
        };
        Self::with_store(config, store)
    }

    /// State over an explicit store, e.g. one shared with other components
    pub fn with_store(config: GatewayConfig, store: Arc<dyn QuestionStore>) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        let procedures = Procedures::new(store)
            .with_ids(config.ids.build())
            .with_rules(config.rules());

        Self {
            config,
            procedures,
            started_at: Utc::now(),
            shutdown_tx,
        }
    }
}

/// Main Gateway
#[derive(Debug)]
pub struct Gateway {
    state: Arc<GatewayState>,
}

impl Gateway {
    /// Create a new gateway with configuration
    pub fn new(config: GatewayConfig) -> Self {
        Self::from_state(GatewayState::new(config))
    }

    pub fn from_state(state: GatewayState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Get gateway state
    pub fn state(&self) -> Arc<GatewayState> {
        self.state.clone()
    }

    /// Build the Axum router
    pub fn build_router(&self) -> Router {
        Router::new()
            .route("/", get(ui::routes::handle_list).post(ui::routes::handle_create))
            .route("/q/:id", get(ui::routes::handle_question))
            .route("/q/:id/delete", post(ui::routes::handle_delete_question))
            .route("/q/:id/answers", post(ui::routes::handle_add_answer))
            .route(
                "/q/:id/answers/:answer_id/delete",
                post(ui::routes::handle_delete_answer),
            )
            .route(
                "/rpc/:procedure",
                get(rpc::handle_rpc_get).post(rpc::handle_rpc_post),
            )
            .route("/health", get(Self::handle_health))
            .route("/status", get(Self::handle_status))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Start the gateway server on the configured address
    pub async fn start(&self) -> Result<()> {
        let addr = self.state.config.socket_addr()?;
        let listener = TcpListener::bind(addr).await.map_err(GatewayError::Io)?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener until [`Gateway::shutdown`] is called
    pub async fn serve(&self, listener: TcpListener) -> Result<()> {
        let router = self.build_router();
        let mut shutdown_rx = self.state.shutdown_tx.subscribe();

        tracing::info!("QnA Gateway listening on {}", listener.local_addr()?);

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
            })
            .await
            .map_err(|e| GatewayError::Internal(e.to_string()))?;

        tracing::info!("Gateway stopped");
        Ok(())
    }

    /// Shutdown the gateway
    pub fn shutdown(&self) {
        let _ = self.state.shutdown_tx.send(());
        tracing::info!("Gateway shutdown initiated");
    }

    // HTTP handlers

    async fn handle_health() -> impl IntoResponse {
        axum::Json(serde_json::json!({
            "status": "healthy",
            "version": crate::VERSION
        }))
    }

    async fn handle_status(State(state): State<Arc<GatewayState>>) -> impl IntoResponse {
        axum::Json(serde_json::json!({
            "version": crate::VERSION,
            "questions": state.procedures.store().len(),
            "strictness": state.procedures.rules().strictness(),
            "started_at": state.started_at,
        }))
    }
}
