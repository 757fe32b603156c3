use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone};
use itertools::Itertools;

use crate::model::PointsRow;

const CLOCK_FORMAT: &str = "%-I:%M %p";

/// Collapse whitespace runs (including thin spaces) to single spaces and
/// trim the ends.
pub(crate) fn collapse_ws(raw: &str) -> String {
    raw.split_whitespace().join(" ")
}

fn month_number(name: &str) -> Option<u32> {
    // Same three-letter table the site renders; anything else is a miss.
    match name {
        "Jan" => Some(1),
        "Feb" => Some(2),
        "Mar" => Some(3),
        "Apr" => Some(4),
        "May" => Some(5),
        "Jun" => Some(6),
        "Jul" => Some(7),
        "Aug" => Some(8),
        "Sep" => Some(9),
        "Oct" => Some(10),
        "Nov" => Some(11),
        "Dec" => Some(12),
        _ => None,
    }
}

/// Parse a year-less date range like `"Jan 9 – 11"` or `"Jan 30 – Feb 2"`
/// (en-dash or hyphen) into start and end dates in the current calendar
/// year. A non-matching string yields `(None, None)`.
pub(crate) fn parse_date_range(raw: &str) -> (Option<NaiveDate>, Option<NaiveDate>) {
    parse_date_range_in_year(raw, Local::now().year())
}

/// Year-pinned variant of [`parse_date_range`]. The source text never
/// carries a year, so ranges scraped near a December→January boundary can
/// land in the wrong year; callers that know better can pin one here.
pub(crate) fn parse_date_range_in_year(
    raw: &str,
    year: i32,
) -> (Option<NaiveDate>, Option<NaiveDate>) {
    let cleaned = collapse_ws(&raw.replace('\u{2009}', " "));

    let Some((left, right)) = cleaned
        .split_once('\u{2013}')
        .or_else(|| cleaned.split_once('-'))
    else {
        return (None, None);
    };

    let Some((start_month, start_day)) = parse_month_day(left) else {
        return (None, None);
    };

    let right_tokens: Vec<&str> = right.split_whitespace().collect();
    let end = match right_tokens.as_slice() {
        [day] => day.parse().ok().map(|d| (start_month, d)),
        [month, day] => month_number(month).and_then(|m| day.parse().ok().map(|d| (m, d))),
        _ => None,
    };
    let Some((end_month, end_day)) = end else {
        return (None, None);
    };

    let start = NaiveDate::from_ymd_opt(year, start_month, start_day);
    let end = NaiveDate::from_ymd_opt(year, end_month, end_day);
    match (start, end) {
        (Some(start), Some(end)) => (Some(start), Some(end)),
        _ => (None, None),
    }
}

fn parse_month_day(raw: &str) -> Option<(u32, u32)> {
    let (month, day) = raw.split_whitespace().collect_tuple()?;
    Some((month_number(month)?, day.parse().ok()?))
}

/// Parse a single year-less `"<Mon> <day>"` heading into a date in `year`.
pub(crate) fn parse_heading_date(raw: &str, year: i32) -> Option<NaiveDate> {
    let cleaned = collapse_ws(&raw.replace('\u{2009}', " "));
    let (month, day) = parse_month_day(&cleaned)?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Convert a machine-readable RFC 3339 timestamp into 12-hour clock text in
/// the viewer's local zone. Callers fall back to the human-authored page
/// text when this returns `None`.
pub(crate) fn clock_time(datetime_attr: &str) -> Option<String> {
    DateTime::parse_from_rfc3339(datetime_attr.trim())
        .ok()
        .map(|dt| format_clock(&dt.with_timezone(&Local)))
}

fn format_clock<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    dt.format(CLOCK_FORMAT).to_string()
}

/// Leading integer of a placement label ("8th" → 8). `None` when the label
/// does not start with a digit.
pub(crate) fn leading_int(label: &str) -> Option<i64> {
    let digits: String = label
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

/// Turn raw `(placement, points)` table cells into typed rows: mis-captured
/// header rows are dropped, the rest sorted ascending by the leading
/// integer of the placement label (unparsable labels sort last).
pub(crate) fn clean_points_rows(raw: Vec<(String, String)>) -> Vec<PointsRow> {
    let mut rows: Vec<PointsRow> = raw
        .into_iter()
        .filter(|(placement, points)| {
            !placement.to_lowercase().contains("placement")
                && !points.to_lowercase().contains("points")
        })
        .map(|(placement, points)| PointsRow {
            points: points.trim().parse().unwrap_or_default(),
            placement,
        })
        .collect();
    rows.sort_by_key(|row| leading_int(&row.placement).unwrap_or(i64::MAX));
    rows
}

/// Split a combined "nickname main-character" cell.
///
/// The default split is on the last space. When that leaves the `#` marker
/// in the nickname half, the split is recomputed around the
/// word-boundary-delimited substring holding the first `#`: that word is the
/// character field, the remainder the nickname. Best-effort: a cell with
/// multiple `#` markers or no space at all has no unambiguous answer.
pub(crate) fn split_nickname(combined: &str) -> (String, String) {
    let combined = collapse_ws(combined);
    let Some((head, tail)) = combined.rsplit_once(' ') else {
        return (combined, String::new());
    };
    if tail.contains('#') || !head.contains('#') {
        return (head.to_string(), tail.to_string());
    }

    let Some(hash) = combined.find('#') else {
        return (head.to_string(), tail.to_string());
    };
    let start = combined[..hash].rfind(' ').map(|i| i + 1).unwrap_or(0);
    let end = combined[hash..]
        .find(' ')
        .map(|i| hash + i)
        .unwrap_or(combined.len());
    let main_char = combined[start..end].to_string();
    let nickname = collapse_ws(&format!("{} {}", &combined[..start], &combined[end..]));
    (nickname, main_char)
}
