use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

mod romanize;

pub use romanize::pinyin_sort_key;

/// Upper bound on autocomplete suggestions returned per query.
pub const MAX_SUGGESTIONS: usize = 10;

/// One performance event from the weekly report sheet. A song may carry a
/// simplified-Chinese name, a traditional-Chinese name, or both; rows with
/// neither are kept for the totals but can never match a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    pub simplified_name: Option<String>,
    pub traditional_name: Option<String>,
    pub performance_date: NaiveDate,
}

impl PerformanceRecord {
    /// Grouping identity: the simplified name when present, otherwise the
    /// traditional one. Traditional-only rows therefore stay visible in the
    /// leaderboard instead of being dropped.
    pub fn canonical_name(&self) -> Option<&str> {
        self.simplified_name
            .as_deref()
            .or(self.traditional_name.as_deref())
    }

    fn matches(&self, needle_lower: &str) -> bool {
        column_matches(self.simplified_name.as_deref(), needle_lower)
            || column_matches(self.traditional_name.as_deref(), needle_lower)
    }

    fn named(&self, name: &str) -> bool {
        self.simplified_name.as_deref() == Some(name)
            || self.traditional_name.as_deref() == Some(name)
    }
}

fn column_matches(value: Option<&str>, needle_lower: &str) -> bool {
    value.is_some_and(|v| v.to_lowercase().contains(needle_lower))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
pub enum SortOrder {
    #[serde(rename = "frequency")]
    #[strum(serialize = "frequency")]
    FrequencyDesc,
    #[serde(rename = "pinyin")]
    #[strum(serialize = "pinyin")]
    PinyinAsc,
}

impl SortOrder {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FrequencyDesc => "frequency",
            Self::PinyinAsc => "pinyin",
        }
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        Self::FrequencyDesc
    }
}

/// One leaderboard row: a canonical song name and how often it was performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongTally {
    pub name: String,
    pub count: usize,
}

/// In-memory, read-only collection of performance records. Every query is a
/// full scan; at the sheet's scale (thousands of rows) that is cheaper than
/// maintaining an index.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<PerformanceRecord>,
}

impl RecordStore {
    pub fn new(records: Vec<PerformanceRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[PerformanceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Case-insensitive substring search over both name columns. A record is
    /// included when either column matches; each record is tested once, so
    /// the result carries no duplicates. `term` must be non-empty (callers
    /// gate on that before dispatching).
    pub fn search(&self, term: &str) -> Vec<PerformanceRecord> {
        let needle = term.to_lowercase();
        self.records
            .iter()
            .filter(|r| r.matches(&needle))
            .cloned()
            .collect()
    }

    /// Autocomplete candidates: the set union of both name columns' values
    /// that substring-match `partial`, sorted by pinyin key and truncated to
    /// [`MAX_SUGGESTIONS`].
    pub fn suggest(&self, partial: &str) -> Vec<String> {
        let needle = partial.to_lowercase();
        let mut seen = HashSet::new();
        for record in &self.records {
            for name in [
                record.simplified_name.as_deref(),
                record.traditional_name.as_deref(),
            ]
            .into_iter()
            .flatten()
            {
                if name.to_lowercase().contains(&needle) {
                    seen.insert(name.to_string());
                }
            }
        }

        let mut names: Vec<String> = seen.into_iter().collect();
        sort_by_pinyin(&mut names);
        names.truncate(MAX_SUGGESTIONS);
        names
    }

    /// Performance tally per canonical song name. `FrequencyDesc` sorts by
    /// count, ties keeping first-seen grouping order (the sort is stable);
    /// `PinyinAsc` sorts by the transliteration key.
    pub fn rank(&self, order: SortOrder) -> Vec<SongTally> {
        let mut positions: HashMap<&str, usize> = HashMap::new();
        let mut tallies: Vec<SongTally> = Vec::new();

        for record in &self.records {
            let Some(name) = record.canonical_name() else {
                continue;
            };
            match positions.get(name) {
                Some(&i) => tallies[i].count += 1,
                None => {
                    positions.insert(name, tallies.len());
                    tallies.push(SongTally {
                        name: name.to_string(),
                        count: 1,
                    });
                }
            }
        }

        match order {
            SortOrder::FrequencyDesc => {
                tallies.sort_by(|a, b| b.count.cmp(&a.count));
            }
            SortOrder::PinyinAsc => {
                tallies.sort_by_cached_key(|t| (pinyin_sort_key(&t.name), t.name.clone()));
            }
        }
        tallies
    }

    /// Drill-down for a selected song: rows where either name column equals
    /// `name` exactly, newest performance first.
    pub fn detail(&self, name: &str) -> Vec<PerformanceRecord> {
        let mut rows: Vec<PerformanceRecord> = self
            .records
            .iter()
            .filter(|r| r.named(name))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.performance_date.cmp(&a.performance_date));
        rows
    }

    /// Number of distinct canonical song names in the store.
    pub fn distinct_song_count(&self) -> usize {
        self.records
            .iter()
            .filter_map(|r| r.canonical_name())
            .collect::<HashSet<_>>()
            .len()
    }
}

/// Deduplicated union of both name columns across a match result, in pinyin
/// order. This is the pick-list shown when a search term matches more than
/// one song.
pub fn matched_names(records: &[PerformanceRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    for record in records {
        for name in [
            record.simplified_name.as_deref(),
            record.traditional_name.as_deref(),
        ]
        .into_iter()
        .flatten()
        {
            seen.insert(name.to_string());
        }
    }
    let mut names: Vec<String> = seen.into_iter().collect();
    sort_by_pinyin(&mut names);
    names
}

fn sort_by_pinyin(names: &mut [String]) {
    names.sort_by_cached_key(|name| (pinyin_sort_key(name), name.clone()));
}
