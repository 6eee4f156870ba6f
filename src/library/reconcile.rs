//! Pure reconciliation of a stored show against a fresh info payload.
//!
//! Nothing here touches storage: the reconciler computes the next
//! [`ShowRecord`] value and hands it to the repository in one call.

use crate::library::titles::canonical_text;
use crate::models::info::ShowInfo;
use crate::models::show::{ShowRecord, TitleRecord};
use serde_json::Value;

/// Air-day bitmask lookup. Names map to fixed values; `Daily` is its own
/// entry rather than something derived from the day bits.
pub const DAYS_OF_WEEK: &[(&str, i32)] = &[
    ("Monday", 1),
    ("Tuesday", 2),
    ("Wednesday", 4),
    ("Thursday", 8),
    ("Friday", 16),
    ("Saturday", 32),
    ("Sunday", 64),
    ("Daily", 127),
];

/// Bitmask for an air-day name; unknown or missing names map to 0.
#[must_use]
pub fn airs_dayofweek(day: Option<&str>) -> i32 {
    day.and_then(|name| DAYS_OF_WEEK.iter().find(|(known, _)| *known == name))
        .map_or(0, |(_, bits)| *bits)
}

/// `lastupdated` from the payload, or `now` when it is missing or not an integer.
#[must_use]
pub fn parse_last_updated(info: &ShowInfo, now: i64) -> i64 {
    info.last_updated().unwrap_or(now)
}

/// Builds the replacement title rows from a raw payload title list.
///
/// Empty and non-string entries are skipped; `i` counts kept titles. A title
/// is flagged default when any of these hold:
///
/// 1. `default_title` is empty and `i == 0`
/// 2. exactly one title survives skipping
/// 3. it matches `default_title` case-insensitively
/// 4. `default_title` is empty and it equals the first raw entry
///
/// The clauses are independent, so several rows can end up flagged.
#[must_use]
pub fn build_titles(raw: &[Value], default_title: &str) -> Vec<TitleRecord> {
    let first_raw = raw.first().and_then(Value::as_str);
    let kept: Vec<&str> = raw
        .iter()
        .filter_map(Value::as_str)
        .filter(|title| !title.is_empty())
        .collect();

    let only_one = kept.len() == 1;
    let no_preference = default_title.is_empty();
    let wanted = canonical_text(default_title).to_lowercase();

    kept.iter()
        .enumerate()
        .map(|(i, title)| {
            let is_default = (no_preference && i == 0)
                || only_one
                || canonical_text(title).to_lowercase() == wanted
                || (no_preference && first_raw == Some(*title));
            TitleRecord::new(title, is_default)
        })
        .collect()
}

/// Computes the refreshed record. Scalars are overwritten unconditionally,
/// `info` is merged (new keys win, old keys survive), titles are replaced
/// wholesale, and files are carried over untouched.
#[must_use]
pub fn apply_info(
    record: &ShowRecord,
    info: &ShowInfo,
    default_title: &str,
    done_status_id: i32,
    now: i64,
) -> ShowRecord {
    let mut merged = record.info.clone();
    for (key, value) in info.fields() {
        merged.insert(key.clone(), value.clone());
    }

    ShowRecord {
        plot: Some(canonical_text(info.text("plot"))),
        tagline: Some(canonical_text(info.text("tagline"))),
        year: info.year(),
        status_id: done_status_id,
        show_status: Some(canonical_text(&info.text("status").to_lowercase())),
        airs_time: info.airs_time(),
        airs_dayofweek: airs_dayofweek(info.airs_dayofweek()),
        last_updated: Some(parse_last_updated(info, now)),
        info: merged,
        titles: build_titles(info.raw_titles(), default_title),
        ..record.clone()
    }
}
