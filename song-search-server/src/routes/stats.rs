use axum::{extract::State, Json};
use serde::Serialize;

use crate::{error::Result, state::AppState};

#[derive(Serialize)]
pub struct StatsResponse {
    total_performances: usize,
    distinct_songs: usize,
}

pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    let store = state.store().await?;
    Ok(Json(StatsResponse {
        total_performances: store.len(),
        distinct_songs: store.distinct_song_count(),
    }))
}
