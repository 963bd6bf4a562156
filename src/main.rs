mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::admin::{routes as admin_routes, AdminService};
use crate::features::audit_logs::{routes as audit_logs_routes, AuditLogService};
use crate::features::auth;
use crate::features::auth::clients::SupabaseAuthClient;
use crate::features::auth::routes as auth_routes;
use crate::features::auth::services::AuthService;
use crate::features::comments::{routes as comments_routes, CommentService};
use crate::features::departments::{routes as departments_routes, DepartmentService, StaffService};
use crate::features::feedback::{routes as feedback_routes, FeedbackService};
use crate::features::geocoding::{routes as geocoding_routes, GeocodingService};
use crate::features::issues::{routes as issues_routes, DuplicateService, IssueService};
use crate::features::media::{routes as media_routes, MediaService};
use crate::features::notifications::{routes as notifications_routes, NotificationService};
use crate::modules::storage::SupabaseStorageClient;
use axum::{middleware::from_fn, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
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

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "System info: tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );
    tracing::info!("Configuration loaded successfully");

    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    tracing::info!("Running database migrations...");
    database::run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    // Token verification: project JWT secret if configured, JWKS otherwise
    let jwt_validator = Arc::new(match config.auth.jwt_secret.as_deref() {
        Some(secret) => {
            tracing::info!("Verifying access tokens with the project JWT secret");
            auth::JwtValidator::with_secret(
                secret,
                config.auth.issuer(),
                config.auth.audience.clone(),
                config.auth.jwt_leeway,
            )
        }
        None => {
            tracing::info!("Verifying access tokens against {}", config.auth.jwks_url());
            let jwks_client = Arc::new(auth::JwksClient::new(
                &config.auth.jwks_url(),
                config.auth.jwks_cache_ttl,
            ));
            auth::JwtValidator::with_jwks(
                jwks_client,
                config.auth.issuer(),
                config.auth.audience.clone(),
                config.auth.jwt_leeway,
            )
        }
    });

    let auth_client = Arc::new(SupabaseAuthClient::new(&config.auth));
    let auth_service = Arc::new(AuthService::new(auth_client));
    tracing::info!("Auth service initialized");

    let storage_client = Arc::new(
        SupabaseStorageClient::new(&config.storage)
            .map_err(|e| anyhow::anyhow!("Failed to initialize storage client: {}", e))?,
    );
    let media_service = Arc::new(MediaService::new(pool.clone(), Arc::clone(&storage_client)));
    tracing::info!(
        "Media service initialized for bucket: {}",
        storage_client.bucket_name()
    );

    let geocoding_service = Arc::new(
        GeocodingService::new(&config.geocoding)
            .map_err(|e| anyhow::anyhow!("Failed to initialize geocoding service: {}", e))?,
    );
    tracing::info!(
        "Geocoding service initialized ({})",
        config.geocoding.nominatim_url
    );

    let issue_service = Arc::new(IssueService::new(pool.clone()));
    let duplicate_service = Arc::new(DuplicateService::new(pool.clone()));
    let comment_service = Arc::new(CommentService::new(pool.clone()));
    let feedback_service = Arc::new(FeedbackService::new(pool.clone()));
    let notification_service = Arc::new(NotificationService::new(pool.clone()));
    let department_service = Arc::new(DepartmentService::new(pool.clone()));
    let staff_service = Arc::new(StaffService::new(pool.clone()));
    let audit_log_service = Arc::new(AuditLogService::new(pool.clone()));
    let admin_service = Arc::new(AdminService::new(pool.clone()));
    tracing::info!("Issue services initialized");

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };
    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    // Protected routes (require a Supabase access token)
    let protected_routes = Router::new()
        .merge(auth_routes::protected_routes(Arc::clone(&auth_service)))
        .merge(issues_routes::routes(
            Arc::clone(&issue_service),
            Arc::clone(&duplicate_service),
        ))
        .merge(comments_routes::routes(comment_service))
        .merge(feedback_routes::routes(Arc::clone(&feedback_service)))
        .merge(notifications_routes::routes(notification_service))
        .merge(departments_routes::routes(
            Arc::clone(&department_service),
            Arc::clone(&staff_service),
        ))
        .merge(media_routes::routes(media_service))
        .merge(geocoding_routes::routes(geocoding_service))
        .merge(departments_routes::admin_routes(
            department_service,
            staff_service,
        ))
        .merge(audit_logs_routes::admin_routes(audit_log_service))
        .merge(feedback_routes::admin_routes(feedback_service))
        .nest(
            "/api/admin",
            admin_routes::routes(admin_service, issue_service),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            jwt_validator.clone(),
            middleware::auth_middleware,
        ));

    // Simple health check endpoint (no auth required)
    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }

    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    let public_routes = Router::new().merge(auth_routes::public_routes(auth_service));

    let app = Router::new()
        .merge(swagger)
        .merge(protected_routes)
        .merge(public_routes)
        .merge(health_route)
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // X-Request-Id: generated as UUID v7 unless the client sent one,
        // recorded on the request span and echoed on the response
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(middleware::MakeSpanWithRequestId)
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(PropagateRequestIdLayer::x_request_id()),
        );

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    socket.set_recv_buffer_size(256 * 1024)?;
    socket.set_send_buffer_size(256 * 1024)?;

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
    socket.listen(65535)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));
    tracing::info!(
        "Swagger UI available at {}",
        format!("http://{}/swagger-ui/", addr)
    );

    axum::serve(listener, app).await?;

    Ok(())
}
