use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    create_conversation_handler, finalize_audio_handler, get_conversation_handler, health_handler,
    ingest_text_handler, list_messages_handler, presign_audio_handler, search_handler,
    summarize_handler,
};
use crate::presentation::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/conversations", post(create_conversation_handler))
        .route("/api/conversations/{id}", get(get_conversation_handler))
        .route(
            "/api/conversations/{id}/messages",
            get(list_messages_handler),
        )
        .route(
            "/api/conversations/{id}/summary",
            post(summarize_handler),
        )
        .route("/api/messages/text", post(ingest_text_handler))
        .route("/api/messages/audio/finalize", post(finalize_audio_handler))
        .route("/api/audio/presign", post(presign_audio_handler))
        .route("/api/search", get(search_handler))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
