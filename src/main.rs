use axum::{
    extract::State,
    http::StatusCode,
    middleware as axum_middleware,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use memo_api::config::AppConfig;
use memo_api::handlers::{auth, memos};
use memo_api::middleware::require_session;
use memo_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "memo_api=info,tower_http=info".into()),
        )
        .init();

    let config = AppConfig::from_env();
    config.validate()?;

    tracing::info!(
        environment = ?config.environment,
        database = %config.redacted_database_url(),
        "starting memo-api"
    );

    let state = AppState::new(config)?;

    // The pool is lazy, so a dead database surfaces here rather than at
    // connect time. Keep serving; health reports degraded until it is back.
    if let Err(e) = state.run_migrations().await {
        tracing::warn!("migrations not applied (database unreachable?): {}", e);
    }

    let bind_addr = format!("0.0.0.0:{}", state.config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("memo-api listening on http://{}", bind_addr);

    axum::serve(listener, app(state.clone()))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.close().await;
    tracing::info!("shutdown complete");

    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Account and session endpoints
        .merge(auth_routes(state.clone()))
        // Memo CRUD behind the session guard
        .merge(memo_routes(state.clone()))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_routes(state: AppState) -> Router<AppState> {
    let guarded = Router::new()
        .route("/api/auth/session", get(auth::session_get))
        .route_layer(axum_middleware::from_fn_with_state(state, require_session));

    Router::new()
        .route("/api/auth/signup", post(auth::signup_post))
        .route("/api/auth/signin", post(auth::signin_post))
        .route("/api/auth/signout", post(auth::signout_post))
        .merge(guarded)
}

fn memo_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/memos", get(memos::memos_get).post(memos::memos_post))
        .route(
            "/api/memos/:id",
            get(memos::memo_get)
                .put(memos::memo_put)
                .delete(memos::memo_delete),
        )
        .route_layer(axum_middleware::from_fn_with_state(state, require_session))
}

async fn root() -> Json<Value> {
    Json(json!({
        "name": "memo-api",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health (public)",
            "auth": "/api/auth/signup, /api/auth/signin, /api/auth/signout (public)",
            "session": "/api/auth/session (session required)",
            "memos": "/api/memos, /api/memos/:id (session required)",
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    if state.database_healthy().await {
        (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "database": "ok",
                "timestamp": now,
            })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "database": "unreachable",
                "timestamp": now,
            })),
        )
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
