use chrono::NaiveDate;
use models::{matched_names, pinyin_sort_key, PerformanceRecord, RecordStore, SortOrder};

fn record(
    simplified: Option<&str>,
    traditional: Option<&str>,
    y: i32,
    m: u32,
    d: u32,
) -> PerformanceRecord {
    PerformanceRecord {
        simplified_name: simplified.map(str::to_string),
        traditional_name: traditional.map(str::to_string),
        performance_date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
    }
}

fn scenario_store() -> RecordStore {
    RecordStore::new(vec![
        record(Some("恩典"), Some("恩典"), 2023, 1, 1),
        record(Some("恩典"), Some("恩典"), 2023, 6, 1),
        record(None, Some("平安夜"), 2022, 12, 24),
    ])
}

#[test]
fn search_finds_matches_in_either_column() {
    let store = scenario_store();
    assert_eq!(store.search("恩典").len(), 2);
    assert_eq!(store.search("平安").len(), 1);
    assert_eq!(store.search("哈利路亚").len(), 0);
}

#[test]
fn search_does_not_duplicate_records_matching_both_columns() {
    // Both columns carry the same name, so both match; the record must still
    // appear exactly once.
    let store = RecordStore::new(vec![record(Some("恩典"), Some("恩典"), 2023, 1, 1)]);
    assert_eq!(store.search("恩典").len(), 1);
}

#[test]
fn search_is_case_insensitive() {
    let store = RecordStore::new(vec![
        record(Some("Grace Alone"), None, 2024, 3, 10),
        record(None, Some("AMAZING GRACE"), 2024, 4, 7),
    ]);
    let lower = store.search("grace");
    let upper = store.search("GRACE");
    assert_eq!(lower.len(), 2);
    assert_eq!(lower, upper);
}

#[test]
fn rank_by_frequency_is_non_increasing_and_counts_every_named_record() {
    let store = scenario_store();
    let tallies = store.rank(SortOrder::FrequencyDesc);

    for pair in tallies.windows(2) {
        assert!(pair[0].count >= pair[1].count);
    }

    let named_records = store
        .records()
        .iter()
        .filter(|r| r.canonical_name().is_some())
        .count();
    let total: usize = tallies.iter().map(|t| t.count).sum();
    assert_eq!(total, named_records);
}

#[test]
fn rank_keeps_traditional_only_songs_visible() {
    let store = scenario_store();
    let tallies = store.rank(SortOrder::FrequencyDesc);

    assert_eq!(tallies.len(), 2);
    assert_eq!(tallies[0].name, "恩典");
    assert_eq!(tallies[0].count, 2);
    assert_eq!(tallies[1].name, "平安夜");
    assert_eq!(tallies[1].count, 1);
}

#[test]
fn rank_frequency_ties_keep_first_seen_order() {
    let store = RecordStore::new(vec![
        record(Some("欢欣"), None, 2024, 1, 7),
        record(Some("安静"), None, 2024, 1, 14),
    ]);
    let tallies = store.rank(SortOrder::FrequencyDesc);
    assert_eq!(tallies[0].name, "欢欣");
    assert_eq!(tallies[1].name, "安静");
}

#[test]
fn rank_by_pinyin_is_non_decreasing_in_the_sort_key() {
    let store = RecordStore::new(vec![
        record(Some("平安夜"), None, 2024, 12, 24),
        record(Some("恩典"), None, 2024, 1, 7),
        record(Some("安静"), None, 2024, 1, 14),
    ]);
    let tallies = store.rank(SortOrder::PinyinAsc);
    let keys: Vec<String> = tallies.iter().map(|t| pinyin_sort_key(&t.name)).collect();

    for pair in keys.windows(2) {
        assert!(pair[0] <= pair[1]);
    }
    assert_eq!(tallies[0].name, "安静");
}

#[test]
fn suggest_matches_case_insensitively_and_deduplicates() {
    let store = RecordStore::new(vec![
        record(Some("Grace Alone"), None, 2024, 3, 10),
        record(Some("Grace Alone"), None, 2024, 5, 12),
        record(None, Some("AMAZING GRACE"), 2024, 4, 7),
    ]);
    let suggestions = store.suggest("grace");
    assert_eq!(suggestions.len(), 2);
    for s in &suggestions {
        assert!(s.to_lowercase().contains("grace"));
    }
}

#[test]
fn suggest_is_capped_and_deterministic() {
    let records: Vec<PerformanceRecord> = (1..=12)
        .map(|i| {
            let name = format!("诗歌{i:02}");
            record(Some(name.as_str()), None, 2024, 1, i)
        })
        .collect();
    let store = RecordStore::new(records);

    let suggestions = store.suggest("诗歌");
    assert_eq!(suggestions.len(), 10);
    // Sorted by (pinyin key, name): the numeric suffixes order the set.
    let expected: Vec<String> = (1..=10).map(|i| format!("诗歌{i:02}")).collect();
    assert_eq!(suggestions, expected);
}

#[test]
fn detail_filters_on_exact_name_and_sorts_newest_first() {
    let store = scenario_store();
    let rows = store.detail("恩典");

    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[0].performance_date,
        NaiveDate::from_ymd_opt(2023, 6, 1).unwrap()
    );
    assert_eq!(
        rows[1].performance_date,
        NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
    );

    // Substrings of a name are not an identity.
    assert!(store.detail("恩").is_empty());
}

#[test]
fn empty_store_yields_empty_results_everywhere() {
    let store = RecordStore::new(Vec::new());
    assert!(store.search("恩典").is_empty());
    assert!(store.suggest("恩").is_empty());
    assert!(store.rank(SortOrder::FrequencyDesc).is_empty());
    assert!(store.rank(SortOrder::PinyinAsc).is_empty());
    assert!(store.detail("恩典").is_empty());
    assert_eq!(store.distinct_song_count(), 0);
}

#[test]
fn matched_names_unions_both_columns() {
    let store = RecordStore::new(vec![
        record(Some("赞美"), Some("讚美"), 2024, 2, 4),
        record(Some("赞美"), Some("讚美"), 2024, 2, 11),
    ]);
    let names = matched_names(&store.search("赞美"));
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"赞美".to_string()));
    assert!(names.contains(&"讚美".to_string()));
}

#[test]
fn sort_order_round_trips_wire_values() {
    use std::str::FromStr;
    assert_eq!(
        SortOrder::from_str("frequency").unwrap(),
        SortOrder::FrequencyDesc
    );
    assert_eq!(SortOrder::from_str("pinyin").unwrap(), SortOrder::PinyinAsc);
    assert_eq!(SortOrder::FrequencyDesc.as_str(), "frequency");
    assert_eq!(SortOrder::PinyinAsc.to_string(), "pinyin");
    assert_eq!(SortOrder::default(), SortOrder::FrequencyDesc);
}

#[test]
fn records_serialize_dates_in_iso_format() {
    let r = record(Some("恩典"), None, 2023, 6, 1);
    let json = serde_json::to_value(&r).unwrap();
    assert_eq!(json["performance_date"], "2023-06-01");
    assert_eq!(json["traditional_name"], serde_json::Value::Null);
}

#[test]
fn distinct_song_count_uses_canonical_names() {
    let store = scenario_store();
    assert_eq!(store.distinct_song_count(), 2);

    // A record with no name at all contributes to len() but not the count.
    let mut records = store.records().to_vec();
    records.push(record(None, None, 2023, 3, 5));
    let store = RecordStore::new(records);
    assert_eq!(store.len(), 4);
    assert_eq!(store.distinct_song_count(), 2);
}
