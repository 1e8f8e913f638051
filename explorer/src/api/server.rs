//! API server implementation

use axum::{
    Router,
    http::Method,
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::TraceLayer;
use std::sync::Arc;
use crate::api::routes;
use crate::cache::Cache;
use crate::database::Database;
use crate::error::Result;
use crate::policy::NetworkPolicy;

pub struct ApiServer {
    database: Arc<Database>,
    cache: Option<Arc<Cache>>,
    policy: NetworkPolicy,
    bind_address: String,
    port: u16,
}

impl ApiServer {
    pub fn new(
        database: Arc<Database>,
        cache: Option<Arc<Cache>>,
        policy: NetworkPolicy,
        bind_address: &str,
        port: u16,
    ) -> Self {
        Self {
            database,
            cache,
            policy,
            bind_address: bind_address.to_string(),
            port,
        }
    }

    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers(Any);

        Router::new()
            .nest("/api/v1", Router::new()
                .merge(routes::statistics::routes(self.database.clone(), self.cache.clone()))
                .merge(routes::hashrate::routes(self.database.clone(), self.policy))
            )
            .layer(CompressionLayer::new())
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    pub async fn start(&self) -> Result<()> {
        let app = self.router();
        let addr = format!("{}:{}", self.bind_address, self.port);
        let listener = tokio::net::TcpListener::bind(&addr).await
            .map_err(|e| crate::error::ExplorerError::Internal(format!("Failed to bind: {}", e)))?;

        tracing::info!("API server listening on {}", addr);

        axum::serve(listener, app).await
            .map_err(|e| crate::error::ExplorerError::Internal(format!("Server error: {}", e)))?;

        Ok(())
    }
}
