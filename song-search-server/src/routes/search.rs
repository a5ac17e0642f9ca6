use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, Result},
    state::AppState,
};
use models::PerformanceRecord;

#[derive(Deserialize)]
pub struct SearchQuery {
    q: String,
}

#[derive(Serialize)]
pub struct SearchResponse {
    /// Distinct song names (either column) across the matched records, in
    /// pinyin order. Shown as a pick-list when a term matches several songs.
    songs: Vec<String>,
    records: Vec<PerformanceRecord>,
}

pub async fn search_songs(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<SearchResponse>> {
    let term = params.q.trim();
    if term.is_empty() {
        return Err(AppError::BadRequest(
            "search term must not be empty".to_string(),
        ));
    }

    let store = state.store().await?;
    let records = store.search(term);
    let songs = models::matched_names(&records);

    Ok(Json(SearchResponse { songs, records }))
}

pub async fn suggest_songs(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<String>>> {
    let partial = params.q.trim();
    if partial.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let store = state.store().await?;
    Ok(Json(store.suggest(partial)))
}
