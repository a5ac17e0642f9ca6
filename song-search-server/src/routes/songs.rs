use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue},
    Json,
};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::{
    error::{AppError, Result},
    state::AppState,
};
use models::PerformanceRecord;

#[derive(Serialize)]
pub struct DetailDate {
    date: NaiveDate,
    formatted: String,
}

#[derive(Serialize)]
pub struct SongDetailResponse {
    name: String,
    count: usize,
    dates: Vec<DetailDate>,
    records: Vec<PerformanceRecord>,
}

pub async fn song_detail(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<SongDetailResponse>> {
    let store = state.store().await?;
    let records = store.detail(&name);
    if records.is_empty() {
        return Err(AppError::NotFound(format!(
            "no performances found for song '{name}'"
        )));
    }

    let dates = records
        .iter()
        .map(|r| DetailDate {
            date: r.performance_date,
            formatted: format_display_date(r.performance_date),
        })
        .collect();

    Ok(Json(SongDetailResponse {
        name,
        count: records.len(),
        dates,
        records,
    }))
}

pub async fn export_song_history(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<(HeaderMap, Vec<u8>)> {
    let store = state.store().await?;
    let records = store.detail(&name);
    if records.is_empty() {
        return Err(AppError::NotFound(format!(
            "no performances found for song '{name}'"
        )));
    }

    let body = export_csv(&records)?;

    let filename = format!("{name}_performance-history.csv");
    let disposition = format!(
        "attachment; filename*=UTF-8''{}",
        urlencoding::encode(&filename)
    );

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition)
            .map_err(|e| AppError::Internal(format!("invalid export filename: {e}")))?,
    );

    Ok((headers, body))
}

/// Serialize drill-down rows as CSV, UTF-8 with a byte-order mark so common
/// spreadsheet tools pick up the encoding.
fn export_csv(records: &[PerformanceRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["simplified_name", "traditional_name", "performance_date"])?;
    for record in records {
        let date = record.performance_date.to_string();
        writer.write_record([
            record.simplified_name.as_deref().unwrap_or(""),
            record.traditional_name.as_deref().unwrap_or(""),
            date.as_str(),
        ])?;
    }
    let data = writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("finalize export: {e}")))?;

    let mut body = Vec::with_capacity(data.len() + 3);
    body.extend_from_slice(b"\xef\xbb\xbf");
    body.extend_from_slice(&data);
    Ok(body)
}

fn format_display_date(date: NaiveDate) -> String {
    format!(
        "{}年{:02}月{:02}日",
        date.year(),
        date.month(),
        date.day()
    )
}
