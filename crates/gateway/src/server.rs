use {
    axum::{Router, routing::get},
    scribe_config::ServerConfig,
    scribe_graphql::ScribeSchema,
    tokio::net::TcpListener,
    tower_http::trace::TraceLayer,
    tracing::info,
};

use crate::graphql_routes::{graphql_get_handler, graphql_handler};

// ── Shared app state ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct AppState {
    pub schema: ScribeSchema,
    /// Serve GraphiQL on a bare `GET /`.
    pub graphiql: bool,
}

// ── Server startup ───────────────────────────────────────────────────────────

/// Build the router (shared between production startup and tests).
pub fn build_app(schema: ScribeSchema, graphiql: bool) -> Router {
    let state = AppState { schema, graphiql };

    Router::new()
        .route("/", get(graphql_get_handler).post(graphql_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `config.bind:config.port` and serve until `shutdown` resolves.
pub async fn serve(
    config: &ServerConfig,
    schema: ScribeSchema,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let listener = TcpListener::bind((config.bind.as_str(), config.port)).await?;
    let local = listener.local_addr()?;
    info!(addr = %local, "GraphQL Sandbox started on port: {}", local.port());

    let app = build_app(schema, config.graphiql);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("server stopped");
    Ok(())
}

/// Resolves on ctrl-c, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            },
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("shutdown signal received");
}
