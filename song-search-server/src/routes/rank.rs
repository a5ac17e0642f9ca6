use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::{error::Result, state::AppState};
use models::{SongTally, SortOrder};

#[derive(Deserialize)]
pub struct RankQuery {
    #[serde(default)]
    order: SortOrder,
}

pub async fn rank_songs(
    State(state): State<AppState>,
    Query(params): Query<RankQuery>,
) -> Result<Json<Vec<SongTally>>> {
    let store = state.store().await?;
    Ok(Json(store.rank(params.order)))
}
