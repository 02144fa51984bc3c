use crate::db::Database;
use axum::{
    Router,
    routing::{get, put},
};
use std::sync::{Arc, Mutex, MutexGuard};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

mod errors;
mod handlers;

pub use errors::AppError;

/// Shared application state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Mutex<Database>>,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        AppState {
            db: Arc::new(Mutex::new(db)),
        }
    }

    fn db(&self) -> Result<MutexGuard<'_, Database>, AppError> {
        self.db
            .lock()
            .map_err(|e| AppError::Internal(format!("database lock poisoned: {e}")))
    }
}

/// Build the axum router serving the `/todos` resource.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/todos",
            get(handlers::list_todos).post(handlers::create_todo),
        )
        .route(
            "/todos/{id}",
            put(handlers::update_todo).delete(handlers::delete_todo),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the server on the given port and run until Ctrl-C.
pub async fn serve(db_path: &std::path::Path, port: u16) -> Result<(), String> {
    let db = Database::open(db_path)?;
    let app = create_router(AppState::new(db));
    let addr = format!("127.0.0.1:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| format!("failed to bind to {addr}: {e}"))?;
    tracing::info!(%addr, db = %db_path.display(), "serving /todos");
    println!("tasklist API: http://{addr}/todos");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(tokio::signal::ctrl_c()))
        .await
        .map_err(|e| format!("server error: {e}"))
}

/// Resolve once `signal` fires. If the handler could not be installed the
/// server keeps running instead of stopping straight away.
async fn shutdown_signal(signal: impl Future<Output = std::io::Result<()>>) {
    match signal.await {
        Ok(()) => tracing::info!("shutting down"),
        Err(e) => {
            tracing::error!(
                error = %e,
                "failed to listen for Ctrl-C; graceful shutdown disabled"
            );
            std::future::pending::<()>().await;
        }
    }
}
