// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 blockflow contributors

//! HTTP interface
//!
//! A stateless axum service around the converter. `POST /generate-yaml`
//! takes an editor graph and answers with `{"yaml": ...}`; the editor
//! frontend can optionally be served from the same origin.

mod assets;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::errors::BlockflowError;
use crate::graph::{Block, Edge, PipelineGraph};
use crate::pipeline::{ConvertOptions, GraphConverter};

/// Shared, read-only request state
#[derive(Clone)]
pub struct AppState {
    converter: GraphConverter,
    static_dir: Option<Arc<PathBuf>>,
}

impl AppState {
    pub fn new(options: ConvertOptions, static_dir: Option<PathBuf>) -> Self {
        Self {
            converter: GraphConverter::new(options),
            static_dir: static_dir.map(Arc::new),
        }
    }
}

/// Request body of `POST /generate-yaml`
///
/// Unlike graph files, every field is required here; a block without
/// `data` or `position` is rejected by the extractor with 422.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    pub blocks: Vec<RequestBlock>,
    pub edges: Vec<Edge>,
}

/// A block as the editor submits it
#[derive(Debug, Clone, Deserialize)]
pub struct RequestBlock {
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: String,
    pub data: Map<String, Value>,
    pub position: Map<String, Value>,
}

impl From<RequestBlock> for Block {
    fn from(b: RequestBlock) -> Self {
        Block {
            id: b.id,
            block_type: b.block_type,
            data: b.data,
            position: b.position,
        }
    }
}

impl From<GenerateRequest> for PipelineGraph {
    fn from(req: GenerateRequest) -> Self {
        PipelineGraph::new(req.blocks.into_iter().map(Into::into).collect(), req.edges)
    }
}

/// Response body of `POST /generate-yaml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub yaml: String,
}

/// Error body for rejected graphs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub detail: String,
}

/// Converter failure rendered as an HTTP response
pub struct ApiError(BlockflowError);

impl From<BlockflowError> for ApiError {
    fn from(e: BlockflowError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_client_error() {
            StatusCode::UNPROCESSABLE_ENTITY
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        let body = ErrorBody {
            error: self.0.code().to_string(),
            detail: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Build the router
pub fn router(state: AppState) -> Router {
    let mut app = Router::new()
        .route("/generate-yaml", post(generate_yaml))
        .route("/health", get(health));

    if state.static_dir.is_some() {
        app = app.fallback(assets::serve_asset);
    }

    app.with_state(state)
}

async fn generate_yaml(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let graph = PipelineGraph::from(request);
    tracing::debug!(
        blocks = graph.blocks.len(),
        edges = graph.edges.len(),
        "generate-yaml request"
    );

    match state.converter.render_yaml(&graph) {
        Ok(yaml) => Ok(Json(GenerateResponse { yaml })),
        Err(e) => {
            tracing::warn!("rejected graph: {}", e);
            Err(e.into())
        }
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
    }))
}

/// A bound, not yet running server
pub struct Server {
    listener: TcpListener,
    state: AppState,
}

impl Server {
    /// Bind the configured address
    pub async fn bind(config: &ServerConfig, options: ConvertOptions) -> Result<Self, BlockflowError> {
        let address = config.address();
        let listener = TcpListener::bind(&address)
            .await
            .map_err(|e| BlockflowError::BindFailed {
                address: address.clone(),
                error: e.to_string(),
            })?;

        if let Some(dir) = &config.static_dir {
            if !dir.is_dir() {
                tracing::warn!("static directory {} does not exist", dir.display());
            }
        }

        Ok(Self {
            listener,
            state: AppState::new(options, config.static_dir.clone()),
        })
    }

    /// Address actually bound (resolves port 0)
    pub fn local_addr(&self) -> Result<SocketAddr, BlockflowError> {
        self.listener.local_addr().map_err(Into::into)
    }

    /// Serve until the future resolves
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), BlockflowError>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr = self.local_addr()?;
        tracing::info!("blockflow server listening on http://{}", addr);

        axum::serve(self.listener, router(self.state))
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(Into::into)
    }

    /// Serve until Ctrl+C
    pub async fn run(self) -> Result<(), BlockflowError> {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("failed to listen for shutdown signal: {e}");
                std::future::pending::<()>().await;
            }
            tracing::info!("shutting down");
        })
        .await
    }
}
