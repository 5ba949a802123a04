//! HTTP JSON API for the todo list.
//!
//! # Overview
//! Five operations over an in-memory item store: list, get, create, update
//! and delete, served under `/api/todoItems`. Ids are generated by the
//! server, descriptions must be non-empty and unique, and request bodies may
//! never name an id.
//!
//! # Design
//! - Storage is injected as `Arc<dyn TodoStore>`; `MemoryStore` is the only
//!   backend and holds nothing across restarts.
//! - Error bodies are plain text, mirrored exactly by `ApiError`'s `Display`.
//! - A handler panic is caught and answered with 500 and the panic message.

use std::{any::Any, sync::Arc, time::Duration};

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Response, StatusCode},
    response::IntoResponse,
    Router,
};
use tokio::{net::TcpListener, signal};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, Any as AnyOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};

pub mod config;
pub mod error;
pub mod ids;
pub mod logging;
pub mod payload;
pub mod routes;
pub mod store;

pub use config::Config;
pub use error::{ApiError, StoreError};
pub use routes::{AppState, API_BASE_PATH, API_BASE_PATH_LOWER};
pub use store::{MemoryStore, NewItem, TodoItem, TodoStore};

/// Router over a fresh `MemoryStore` with default settings.
pub fn app() -> Router {
    build_app(Arc::new(MemoryStore::new()), &Config::default())
}

/// Router over the given store, with CORS, tracing and panic handling.
pub fn build_app(store: Arc<dyn TodoStore>, config: &Config) -> Router {
    routes::router(AppState { store })
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config))
}

/// Serve `app()` on an already-bound listener until the process exits.
pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Bind according to `config` and serve until Ctrl-C or SIGTERM.
pub async fn serve(config: Config) -> Result<(), std::io::Error> {
    let app = build_app(Arc::new(MemoryStore::new()), &config);

    let address = config.address();
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on http://{address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origin = match &config.allowed_origin {
        Some(origin) => AllowOrigin::exact(origin.clone()),
        None => AllowOrigin::from(AnyOrigin),
    };
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60))
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    };
    error!("handler panicked: {message}");
    (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("failed to listen for Ctrl-C: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => error!("failed to listen for SIGTERM: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutting down");
}
