use anyhow::Result;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Router,
};
use serde::Deserialize;
use tokio::net::TcpListener;

use crate::app::{App, DEFAULT_VALUE};

#[derive(Debug, Deserialize)]
pub struct AddParams {
    val: Option<String>,
}

impl AddParams {
    /// The value to store, falling back to the default when absent or empty.
    fn into_value(self) -> String {
        match self.val {
            Some(val) if !val.is_empty() => val,
            _ => DEFAULT_VALUE.to_string(),
        }
    }
}

/// Builds the router with `/add` and `/display`. Anything else is a 404.
pub fn router(app: App) -> Router {
    Router::new()
        .route("/add", get(add))
        .route("/display", get(display))
        .with_state(app)
}

async fn add(
    State(app): State<App>,
    params: Result<Query<AddParams>, QueryRejection>,
) -> String {
    let val = match params {
        Ok(Query(params)) => params.into_value(),
        Err(e) => {
            tracing::debug!(error = %e, "unparseable query, using default value");
            DEFAULT_VALUE.to_string()
        }
    };

    tracing::debug!(%val, "add");
    let body = format!("Added: {}", val);
    app.add(val);
    body
}

async fn display(State(app): State<App>) -> String {
    let rendered = app.render();
    tracing::debug!(len = app.len(), "display");
    rendered
}

/// Serves requests until Ctrl-C, then drains in-flight connections.
pub async fn serve(listener: TcpListener, app: App) -> Result<()> {
    axum::serve(listener, router(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Received Ctrl-C, shutting down"),
        Err(e) => {
            // Without a signal handler, run until killed
            tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    }
}
