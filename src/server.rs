use std::time::Duration;

use axum::{Router, extract::Request, http::StatusCode};
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;

use jsonbind::config::ServerConfig;

pub struct Server {
    config: &'static ServerConfig,
}

impl Server {
    pub fn new(config: &'static ServerConfig) -> Self {
        Self { config }
    }

    pub async fn start(&self, router: Router) -> anyhow::Result<()> {
        let router = self.build_router(router);
        let port = self.config.port();

        let listener = TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

        tracing::info!("Listening on {}", listener.local_addr()?);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }

    fn build_router(&self, router: Router) -> Router {
        let tracing_layer = tower_http::trace::TraceLayer::new_for_http().make_span_with(
            |request: &Request| {
                tracing::info_span!("Http Request", method = %request.method(), uri = %request.uri())
            },
        );

        let timeout_layer = {
            let timeout = Duration::from_secs(self.config.timeout_seconds());
            TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
        };

        router.layer(timeout_layer).layer(tracing_layer)
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
