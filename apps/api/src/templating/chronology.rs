//! Chronology: most-recent-first ordering for experience and education.
//!
//! Ordering rules:
//! 1. An entry ending "Present" sorts before one that does not.
//! 2. Two "Present" experiences are ordered by start date, newest first.
//! 3. Parsed end dates sort newest first; an unparsable end sorts after every
//!    parsable one, and two unparsable ends compare equal.
//! 4. Equal parsed end dates fall back to start date (experience only).
//!
//! Each rule is encoded in a sort key whose derived `Ord` is a total order,
//! so the comparators below are consistent and `sort_by` stays stable.

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::models::history::PRESENT;
use crate::models::{Education, Experience};

pub fn is_present(marker: &str) -> bool {
    marker.trim().eq_ignore_ascii_case(PRESENT)
}

/// Parses `"Month YYYY"` (full or abbreviated month, any case) to the first
/// of that month.
pub fn parse_month_year(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(&format!("1 {value}"), "%d %B %Y").ok()
}

/// Like [`parse_month_year`], but also accepts a bare four-digit year
/// (read as January of that year).
pub fn parse_graduation(value: &str) -> Option<NaiveDate> {
    parse_month_year(value).or_else(|| {
        let value = value.trim();
        if value.len() != 4 || !value.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        value
            .parse::<i32>()
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
    })
}

/// Ascending key; callers reverse it for most-recent-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum EndKey {
    Unparsed,
    Dated(NaiveDate),
    Present,
}

fn end_key(marker: &str, parse: fn(&str) -> Option<NaiveDate>) -> EndKey {
    if is_present(marker) {
        EndKey::Present
    } else {
        parse(marker).map_or(EndKey::Unparsed, EndKey::Dated)
    }
}

/// Full experience key. The start date only participates when the end
/// markers tie and are not both unparsable.
fn experience_key(entry: &Experience) -> (EndKey, Option<NaiveDate>) {
    let end = end_key(&entry.end, parse_month_year);
    let start = match end {
        EndKey::Unparsed => None,
        _ => parse_month_year(&entry.start),
    };
    (end, start)
}

fn education_key(entry: &Education) -> EndKey {
    end_key(&entry.graduation_year, parse_graduation)
}

/// Most-recent-first comparator for experience entries.
pub fn compare_experience(a: &Experience, b: &Experience) -> Ordering {
    experience_key(b).cmp(&experience_key(a))
}

/// Most-recent-first comparator for education entries.
pub fn compare_education(a: &Education, b: &Education) -> Ordering {
    education_key(b).cmp(&education_key(a))
}

/// Stable most-recent-first sort; nothing is dropped.
pub fn sort_experience(entries: &mut [Experience]) {
    entries.sort_by(compare_experience);
}

pub fn sort_education(entries: &mut [Education]) {
    entries.sort_by(compare_education);
}

/// Included entries only, most recent first.
pub fn included_experience(entries: &[Experience]) -> Vec<Experience> {
    let mut included: Vec<Experience> = entries.iter().filter(|e| e.include).cloned().collect();
    sort_experience(&mut included);
    included
}

pub fn included_education(entries: &[Education]) -> Vec<Education> {
    let mut included: Vec<Education> = entries.iter().filter(|e| e.include).cloned().collect();
    sort_education(&mut included);
    included
}
