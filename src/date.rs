use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

/// MLA month abbreviations, January first. May, June and July are written out.
const MONTHS: [&str; 12] = [
    "Jan.", "Feb.", "Mar.", "Apr.", "May", "June", "July", "Aug.", "Sept.", "Oct.", "Nov.", "Dec.",
];

/// Format a date the MLA way, e.g. "6 July 2015".
pub fn mla_date(date: NaiveDate) -> String {
    format!("{} {} {}", date.day(), MONTHS[date.month0() as usize], date.year())
}

/// Parse a strict `YYYY-MM-DD` string.
///
/// Exactly three `-`-separated numeric parts are required; range checking is left to
/// [`NaiveDate`].
pub fn parse_iso_date(s: &str) -> Result<NaiveDate> {
    let err = |reason: &str| Error::DateParse {
        input: s.to_string(),
        reason: reason.to_string(),
    };

    let parts: Vec<&str> = s.split('-').collect();
    let [year, month, day] = parts.as_slice() else {
        return Err(err(&format!("expected 3 parts, found {}", parts.len())));
    };
    let year: i32 = year.trim().parse().map_err(|_| err("year is not a number"))?;
    let month: u32 = month.trim().parse().map_err(|_| err("month is not a number"))?;
    let day: u32 = day.trim().parse().map_err(|_| err("day is not a number"))?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| err("no such calendar date"))
}

/// Render a date as `YYYY-MM-DD`.
pub fn to_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// The local calendar date.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Formats tried, in order, against a date found in page metadata.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%b. %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%d %b. %Y",
    "%A, %B %d, %Y",
    "%m/%d/%Y",
    "%Y%m%d",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%B %d, %Y %H:%M",
    "%B %d, %Y %I:%M %p",
];

/// Best-effort parse of a publication date as pages write it.
///
/// Handles RFC 3339/2822 timestamps, a handful of common written forms, and finally any string
/// that starts with an ISO date. Returns `None` when nothing fits.
pub fn parse_loose_date(s: &str) -> Option<NaiveDate> {
    let t = s.trim();
    if t.is_empty() {
        return None;
    }
    // chrono's `%b` knows "Sep" but not the MLA "Sept".
    static SEPT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bsept\b").unwrap());
    let normalized = SEPT_RE.replace(t, "Sep");
    let t: &str = &normalized;

    if let Ok(dt) = DateTime::parse_from_rfc3339(t) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(t) {
        return Some(dt.date_naive());
    }
    if let Some(d) = DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(t, f).ok())
    {
        return Some(d);
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(t, f).ok())
    {
        return Some(dt.date());
    }

    // e.g. "2020-01-02T10:00:00 EST" or "2020/01/02 (updated)"
    static ISO_PREFIX: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^(\d{4})[-/](\d{1,2})[-/](\d{1,2})\b").unwrap());
    let caps = ISO_PREFIX.captures(t)?;
    NaiveDate::from_ymd_opt(
        caps[1].parse().ok()?,
        caps[2].parse().ok()?,
        caps[3].parse().ok()?,
    )
}
