use chrono::NaiveDate;
use sessreport_records::Session;

use crate::error::ReportError;

/// Calendar layouts accepted for session dates.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d.%m.%Y",
    "%d-%m-%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

/// Parse a calendar date. A trailing time part (`2016-10-01T10:00:00`,
/// `2016-10-01 10:00`) is ignored.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let mut candidates = vec![value];
    if let Some((day, _)) = value.split_once('T') {
        candidates.push(day);
    }
    if let Some(first) = value.split_whitespace().next() {
        candidates.push(first);
    }

    candidates.into_iter().find_map(parse_date_only)
}

fn parse_date_only(value: &str) -> Option<NaiveDate> {
    if value.len() == 8 && value.bytes().all(|b| b.is_ascii_digit()) {
        let year = value[..4].parse().ok()?;
        let month = value[4..6].parse().ok()?;
        let day = value[6..].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

/// The session's date as `YYYY-MM-DD`.
pub fn iso_date(session: &Session) -> Result<String, ReportError> {
    parse_date(&session.date)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .ok_or_else(|| ReportError::DateParseFailure {
            session_id: session.session_id.clone(),
            value: session.date.clone(),
        })
}
