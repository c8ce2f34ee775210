mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::{database, middleware, openapi, telemetry};
use crate::features::complaints::{routes as complaints_routes, ComplaintService, PgComplaintRepository};
use crate::features::pages::routes as pages_routes;
use crate::modules::storage::{BlobStore, S3BlobStore};
use crate::modules::webhook::HttpWebhookNotifier;
use crate::shared::views::TemplateRenderer;
use axum::Router;
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    telemetry::init(config.telemetry.log_format);

    tracing::info!(
        "System info: tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );
    tracing::info!("Configuration loaded successfully");

    // Database
    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    tracing::info!("Running database migrations...");
    database::run_migrations(&pool).await?;
    tracing::info!("Database migrations completed successfully");

    // Blob storage
    let blob_store = Arc::new(
        S3BlobStore::new(config.storage.clone())
            .map_err(|e| anyhow::anyhow!("Failed to initialize blob store: {}", e))?,
    );
    blob_store
        .ensure_container_exists()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to ensure storage container exists: {}", e))?;
    tracing::info!(
        "Blob store initialized for container: {}",
        blob_store.container_name()
    );

    // Webhook
    let notifier = Arc::new(
        HttpWebhookNotifier::new(&config.webhook)
            .map_err(|e| anyhow::anyhow!("Failed to initialize webhook client: {}", e))?,
    );
    tracing::info!(
        "Webhook notifier initialized (timeout: {:?})",
        config.webhook.timeout
    );

    let complaint_service = Arc::new(ComplaintService::new(
        Arc::new(PgComplaintRepository::new(pool.clone())),
        blob_store,
        notifier,
    ));
    tracing::info!("Complaint service initialized");

    let renderer = Arc::new(
        TemplateRenderer::new().map_err(|e| anyhow::anyhow!("Failed to load templates: {}", e))?,
    );
    tracing::info!("Loaded views: {}", renderer.names().join(", "));

    let swagger =
        SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi::build(&config.swagger));

    // Simple health check endpoint
    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }

    let app = Router::new()
        .merge(swagger)
        .merge(complaints_routes(complaint_service))
        .merge(pages_routes(renderer))
        .route("/health", axum::routing::get(health_check))
        .layer(middleware::cors_layer(&config.app.cors_allowed_origins))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
