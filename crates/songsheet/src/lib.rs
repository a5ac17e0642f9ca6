use chrono::{Datelike, NaiveDate};
use eyre::WrapErr;
use models::PerformanceRecord;
use serde::Deserialize;

/// Performances older than this many calendar years (relative to the year
/// observed at load time) are dropped.
pub const RETENTION_YEARS: i32 = 5;

const REQUIRED_COLUMNS: [&str; 5] = [
    "Year",
    "Month",
    "Day",
    "Simplified Chinese",
    "Traditional Chinese",
];

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "Month")]
    month: Option<String>,
    #[serde(rename = "Day")]
    day: Option<String>,
    #[serde(rename = "Simplified Chinese")]
    simplified: Option<String>,
    #[serde(rename = "Traditional Chinese")]
    traditional: Option<String>,
}

/// Download the weekly report sheet and parse it into performance records.
///
/// Transport failures, non-success statuses, and schema problems fail the
/// whole load with a human-readable cause; rows whose date cells cannot be
/// composed into a valid calendar date are skipped, not errored.
pub async fn fetch_records(
    client: &reqwest::Client,
    url: &str,
    current_year: i32,
) -> eyre::Result<Vec<PerformanceRecord>> {
    let resp = client
        .get(url)
        .send()
        .await
        .wrap_err("request performance sheet")?;
    if !resp.status().is_success() {
        eyre::bail!("performance sheet fetch failed: HTTP {}", resp.status());
    }
    let bytes = resp
        .bytes()
        .await
        .wrap_err("read performance sheet body")?;
    parse_records(&bytes, current_year)
}

/// Parse CSV sheet bytes (UTF-8, optional byte-order mark) into records,
/// keeping only performances within the trailing [`RETENTION_YEARS`] window.
pub fn parse_records(bytes: &[u8], current_year: i32) -> eyre::Result<Vec<PerformanceRecord>> {
    let bytes = bytes.strip_prefix(b"\xef\xbb\xbf".as_slice()).unwrap_or(bytes);
    let mut reader = csv::Reader::from_reader(bytes);

    let headers = reader.headers().wrap_err("read sheet header row")?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h.trim() == column) {
            eyre::bail!("performance sheet is missing required column: {column}");
        }
    }

    let cutoff_year = current_year - RETENTION_YEARS;
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for row in reader.deserialize::<RawRow>() {
        let row = row.wrap_err("malformed sheet row")?;
        match record_from_row(row, cutoff_year) {
            Some(record) => records.push(record),
            None => skipped += 1,
        }
    }

    tracing::info!(
        "Loaded {} performance records ({} rows outside the window or undated)",
        records.len(),
        skipped
    );
    Ok(records)
}

fn record_from_row(row: RawRow, cutoff_year: i32) -> Option<PerformanceRecord> {
    let year: i32 = parse_component(row.year.as_deref())?;
    let month: u32 = parse_component(row.month.as_deref())?;
    let day: u32 = parse_component(row.day.as_deref())?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    if date.year() < cutoff_year {
        return None;
    }
    Some(PerformanceRecord {
        simplified_name: clean_name(row.simplified),
        traditional_name: clean_name(row.traditional),
        performance_date: date,
    })
}

fn parse_component<T: std::str::FromStr>(value: Option<&str>) -> Option<T> {
    value?.trim().parse().ok()
}

fn clean_name(value: Option<String>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Year,Month,Day,Simplified Chinese,Traditional Chinese";

    fn sheet(rows: &[&str]) -> String {
        let mut out = String::from(HEADER);
        for row in rows {
            out.push('\n');
            out.push_str(row);
        }
        out
    }

    #[test]
    fn parses_rows_and_composes_dates() {
        let data = sheet(&["2023,1,1,恩典,恩典", "2023,6,1,恩典,恩典"]);
        let records = parse_records(data.as_bytes(), 2025).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].simplified_name.as_deref(), Some("恩典"));
        assert_eq!(
            records[0].performance_date,
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
        );
    }

    #[test]
    fn drops_rows_with_unparseable_dates() {
        let data = sheet(&[
            "2023,2,30,恩典,恩典",
            "2023,,1,恩典,恩典",
            "not-a-year,1,1,恩典,恩典",
            "2023.0,1,1,恩典,恩典",
            "2023,5,14,平安夜,平安夜",
        ]);
        let records = parse_records(data.as_bytes(), 2025).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].simplified_name.as_deref(), Some("平安夜"));
    }

    #[test]
    fn drops_rows_older_than_the_retention_window() {
        let data = sheet(&["2019,12,24,平安夜,平安夜", "2020,12,24,平安夜,平安夜"]);
        let records = parse_records(data.as_bytes(), 2025).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].performance_date.year(), 2020);
    }

    #[test]
    fn trims_names_and_treats_blank_cells_as_absent() {
        let data = sheet(&["2023,1,1, 恩典 ,", "2023,1,8,,恩典"]);
        let records = parse_records(data.as_bytes(), 2025).unwrap();

        assert_eq!(records[0].simplified_name.as_deref(), Some("恩典"));
        assert_eq!(records[0].traditional_name, None);
        assert_eq!(records[1].simplified_name, None);
        assert_eq!(records[1].traditional_name.as_deref(), Some("恩典"));
    }

    #[test]
    fn strips_a_leading_byte_order_mark() {
        let data = format!("\u{feff}{}", sheet(&["2023,1,1,恩典,恩典"]));
        let records = parse_records(data.as_bytes(), 2025).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn missing_required_column_is_a_load_error() {
        let data = "Year,Month,Simplified Chinese,Traditional Chinese\n2023,1,恩典,恩典";
        let err = parse_records(data.as_bytes(), 2025).unwrap_err();
        assert!(err.to_string().contains("Day"));
    }
}
