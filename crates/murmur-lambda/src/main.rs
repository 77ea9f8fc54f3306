use std::env;

use axum::middleware as axum_mw;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

mod error;
mod middleware;
mod routes;
mod state;

use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let table = env::var("MURMUR_TABLE").unwrap_or_else(|_| "murmur-messages".to_string());
    let issuer = env::var("AUTH_ISSUER")
        .map_err(|_| eyre::eyre!("AUTH_ISSUER must be set to the identity provider issuer URL"))?;
    let public_key_pem = env::var("AUTH_PUBLIC_KEY_PEM")
        .map_err(|_| eyre::eyre!("AUTH_PUBLIC_KEY_PEM must be set"))?;
    let decoding_key = murmur_auth::jwt::DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
        .map_err(|e| eyre::eyre!("invalid AUTH_PUBLIC_KEY_PEM: {e}"))?;

    let default_model_id = env::var("MURMUR_DEFAULT_MODEL_ID")
        .unwrap_or_else(|_| "us.anthropic.claude-3-5-haiku-20241022-v1:0".to_string());
    let search_model_id =
        env::var("MURMUR_SEARCH_MODEL_ID").unwrap_or_else(|_| default_model_id.clone());

    let config = murmur_store::client::load_config().await;
    let db = murmur_store::client::build_client(&config);

    let state = AppState {
        config,
        db,
        table,
        decoding_key,
        issuer,
        default_model_id,
        search_model_id,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Every store accessor and the chat endpoint sit behind the identity
    // gate; a request with no valid bearer token is rejected before its
    // body is read.
    let protected = Router::new()
        .route(
            "/api/messages",
            get(routes::messages::list_messages)
                .post(routes::messages::add_user_message)
                .delete(routes::messages::clear_messages),
        )
        .route("/api/messages/count", get(routes::messages::messages_count))
        .route("/api/chat", post(routes::chat::chat))
        .route_layer(axum_mw::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    let app = Router::new()
        // Health (no auth)
        .route("/health", get(routes::health::health_check))
        // Deprecated shims — fail with a pointer to the current API
        .route(
            "/api/numbers",
            get(routes::numbers::list_numbers).post(routes::numbers::add_number),
        )
        .route(
            "/api/messages/legacy",
            post(routes::messages::add_message_legacy),
        )
        .merge(protected)
        .layer(axum_mw::from_fn(middleware::log::request_log))
        .layer(cors)
        .with_state(state);

    lambda_http::run_with_streaming_response(app)
        .await
        .map_err(|e| eyre::eyre!(e))
}
