//! Router construction and server lifecycle.

use std::any::Any;
use std::net::SocketAddr;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::handlers;
use crate::state::AppState;

/// Build the Axum router with all routes.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route(
            "/api/media/fetch-stock-media",
            post(handlers::fetch_stock_media),
        )
        .route("/api/media/health", get(handlers::health))
        .route("/metrics", get(handlers::render_metrics))
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "internal server error".to_string()
    };
    ApiError::Internal(message).into_response()
}

/// Bind and start serving. Returns a handle to shut it down.
pub async fn start(config: ServerConfig, state: AppState) -> std::io::Result<ServerHandle> {
    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    let local_addr = listener.local_addr()?;
    let router = build_router(state, &config);

    let token = CancellationToken::new();
    let shutdown = token.clone();
    let server = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router)
            .with_graceful_shutdown(shutdown.cancelled_owned())
            .await
        {
            warn!(error = %e, "server stopped with error");
        }
    });

    info!(addr = %local_addr, "storyreel server started");
    Ok(ServerHandle {
        addr: local_addr,
        token,
        server,
    })
}

/// Handle returned by [`start`].
pub struct ServerHandle {
    addr: SocketAddr,
    token: CancellationToken,
    server: JoinHandle<()>,
}

impl ServerHandle {
    /// Bound address, with the real port when `0` was requested.
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Bound port.
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Stop accepting connections and wait for in-flight requests.
    pub async fn shutdown(self) {
        self.token.cancel();
        if let Err(e) = self.server.await {
            warn!(error = %e, "server task failed during shutdown");
        }
        info!("storyreel server stopped");
    }
}
