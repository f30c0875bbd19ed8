use std::{future::Future, sync::Arc};

use axum::{http::Method, Router};
use configs::AppConfig;
use service::{runtime, PersonStore};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::routes;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PersonStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn PersonStore>) -> Self {
        Self { store }
    }
}

/// `Access-Control-Allow-Origin: *` on every response.
pub fn build_cors() -> CorsLayer {
    CorsLayer::new().allow_origin(Any).allow_methods([Method::GET])
}

pub fn build_app(store: Arc<dyn PersonStore>) -> Router {
    routes::build_router(AppState::new(store), build_cors())
}

/// Build the store and router from `cfg`, bind, and serve until `shutdown` resolves.
pub async fn run_with_config<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let store = runtime::build_store(&cfg.storage).await?;
    let app = build_app(store);

    let addr = cfg.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(addr = %listener.local_addr()?, "starting person_db server");
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("server stopped");
    Ok(())
}
