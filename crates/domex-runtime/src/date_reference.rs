//! Symbolic date descriptors
//!
//! A descriptor is either a date spelled out directly (RFC 3339,
//! `YYYY-MM-DD`, `YYYY-MM`, `YYYY`, or a date-time without offset), or
//!
//! ```text
//! date.<this|prev|next>.<day|week|month|quarter|semester|year>[.<first|last>]
//! ```
//!
//! (case-insensitive), resolved relative to "now". Grammar dates fall on
//! local midnight. Descriptors that fit neither form resolve to "now".

use chrono::{
    DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc,
};

/// A point in time resolved from a descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateReference {
    date: DateTime<Local>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchor {
    First,
    Last,
}

impl DateReference {
    /// Resolve `descriptor` against the system clock
    pub fn new(descriptor: &str) -> Self {
        Self::at(descriptor, Local::now())
    }

    /// Resolve `descriptor` against a given "now"
    pub fn at(descriptor: &str, now: DateTime<Local>) -> Self {
        if descriptor.is_empty() {
            return Self { date: now };
        }

        if let Some(date) = parse_native(descriptor) {
            return Self { date };
        }

        let date = resolve_grammar(&descriptor.to_lowercase(), now).unwrap_or(now);
        Self { date }
    }

    pub fn date(&self) -> DateTime<Local> {
        self.date
    }

    /// UTC, millisecond precision, `Z` suffix (e.g. `2024-05-01T00:00:00.000Z`)
    pub fn to_iso_string(&self) -> String {
        self.date
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Dates the descriptor spells out directly: RFC 3339, `YYYY-MM-DD`,
/// `YYYY-MM` and `YYYY` (first day, UTC midnight), and date-times without an
/// offset, which are local.
fn parse_native(descriptor: &str) -> Option<DateTime<Local>> {
    let s = descriptor.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }

    if let Some(date) = parse_calendar_date(s) {
        let midnight = date.and_hms_opt(0, 0, 0)?;
        return Some(Utc.from_utc_datetime(&midnight).with_timezone(&Local));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Local.from_local_datetime(&naive).earliest();
        }
    }

    None
}

/// `YYYY-MM-DD`, or a shorter `YYYY-MM` / `YYYY` pinned to the first day
fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    fn digits(part: &str, len: usize) -> bool {
        part.len() == len && part.bytes().all(|b| b.is_ascii_digit())
    }

    let padded = match s.split('-').collect::<Vec<_>>().as_slice() {
        [year] if digits(year, 4) => format!("{}-01-01", year),
        [year, month] if digits(year, 4) && digits(month, 2) => format!("{}-{}-01", year, month),
        _ => s.to_string(),
    };
    NaiveDate::parse_from_str(&padded, "%Y-%m-%d").ok()
}

/// Resolve the `date.` grammar. `None` leaves the caller at "now".
fn resolve_grammar(descriptor: &str, now: DateTime<Local>) -> Option<DateTime<Local>> {
    if !descriptor.starts_with("date.") {
        return None;
    }

    let parts: Vec<&str> = descriptor.split('.').collect();
    if parts.len() < 3 {
        tracing::debug!("Date descriptor '{}' has no unit", descriptor);
        return None;
    }

    let offset: i64 = match parts[1] {
        "prev" => -1,
        "next" => 1,
        _ => 0,
    };
    let anchor = match parts.get(3) {
        Some(&"last") => Anchor::Last,
        _ => Anchor::First,
    };
    let today = now.date_naive();

    let target = match parts[2] {
        "day" => today.checked_add_signed(Duration::days(offset)),
        "week" => {
            let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
            let start = monday.checked_add_signed(Duration::days(offset * 7));
            match anchor {
                Anchor::First => start,
                Anchor::Last => start.and_then(|d| d.checked_add_signed(Duration::days(6))),
            }
        }
        "month" => month_bound(today.year(), today.month0() as i64 + offset, anchor),
        "year" => {
            let year = today.year() + offset as i32;
            match anchor {
                Anchor::First => NaiveDate::from_ymd_opt(year, 1, 1),
                Anchor::Last => NaiveDate::from_ymd_opt(year, 12, 31),
            }
        }
        "quarter" | "semester" => {
            tracing::debug!("Date unit '{}' is not supported, using now", parts[2]);
            return None;
        }
        other => {
            tracing::debug!("Unknown date unit '{}', using now", other);
            return None;
        }
    }?;

    local_midnight(target)
}

/// First or last day of the month `month0` months after January of `year`
fn month_bound(year: i32, month0: i64, anchor: Anchor) -> Option<NaiveDate> {
    let total = year as i64 * 12 + month0;
    let first = NaiveDate::from_ymd_opt(
        total.div_euclid(12) as i32,
        total.rem_euclid(12) as u32 + 1,
        1,
    )?;

    match anchor {
        Anchor::First => Some(first),
        Anchor::Last => {
            let next = total + 1;
            NaiveDate::from_ymd_opt(next.div_euclid(12) as i32, next.rem_euclid(12) as u32 + 1, 1)?
                .pred_opt()
        }
    }
}

fn local_midnight(date: NaiveDate) -> Option<DateTime<Local>> {
    Local.from_local_datetime(&date.and_hms_opt(0, 0, 0)?).earliest()
}
