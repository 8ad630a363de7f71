use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

/// Trading app HTTP server.
pub struct TappServer {
    state: AppState,
}

impl TappServer {
    /// Initialise stores from `config`.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        Ok(Self {
            state: AppState::from_config(config)?,
        })
    }

    /// Serve over stores the caller already built.
    pub fn with_state(state: AppState) -> Self {
        Self { state }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.state.config
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone())
    }

    /// Serve requests until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        let addr = self.state.config.bind_addr;
        let app = self.router();
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("trading app listening on {}", listener.local_addr()?);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;
        tracing::info!("server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
