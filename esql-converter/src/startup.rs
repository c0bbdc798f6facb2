use crate::config::ConverterConfig;
use crate::handlers;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    middleware::from_fn,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics_middleware, request_id_middleware, security_headers_middleware, REQUEST_ID_HEADER,
};
use std::any::Any;
use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::time::Instant;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: ConverterConfig,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: ConverterConfig) -> Self {
        Self {
            config,
            started_at: Instant::now(),
        }
    }
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::InternalError(anyhow::anyhow!("Handler panicked: {}", detail)).into_response()
}

pub fn build_router(state: AppState) -> Router {
    let max_upload_bytes = state.config.upload.max_bytes;

    Router::new()
        .route("/", get(handlers::api_info))
        .route("/api/health", get(handlers::health_check))
        .route("/api/convert", post(handlers::convert_esql))
        .route("/metrics", get(handlers::metrics_endpoint))
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(AnyOrigin)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([
                    header::CONTENT_TYPE,
                    header::HeaderName::from_static(REQUEST_ID_HEADER),
                ]),
        )
        .with_state(state)
}

pub struct Application {
    port: u16,
    server: Box<dyn Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    /// Binds the listener and prepares the server. Port 0 picks a free port.
    pub async fn build(config: ConverterConfig) -> Result<Self, AppError> {
        Self::build_with_shutdown(config, std::future::pending::<()>()).await
    }

    pub async fn build_with_shutdown<F>(
        config: ConverterConfig,
        shutdown: F,
    ) -> Result<Self, AppError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            port,
            max_upload_bytes = config.upload.max_bytes,
            template = config.conversion.template.as_str(),
            "Listening on {}",
            port
        );

        let app = build_router(AppState::new(config));
        let server = axum::serve(listener, app).with_graceful_shutdown(shutdown);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
