mod health;
mod rank;
mod search;
mod songs;
mod stats;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;

use crate::state::AppState;

pub(crate) fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::ready))
        .route("/api/search", get(search::search_songs))
        .route("/api/suggest", get(search::suggest_songs))
        .route("/api/rank", get(rank::rank_songs))
        .route("/api/stats", get(stats::get_stats))
        .route("/api/songs/{name}", get(songs::song_detail))
        .route("/api/songs/{name}/export", get(songs::export_song_history))
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(tracing::Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(tracing::Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
        .with_state(state)
}
