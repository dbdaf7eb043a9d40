use chrono::{DateTime, FixedOffset, NaiveDate};

/// Parse an ISO8601 timestamp (`Z` suffix included). None on any failure;
/// timestamp problems never propagate as errors.
pub fn parse(ts: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(ts).ok()
}

/// Readable rendering: `HH:MM`, or `YYYY-MM-DD HH:MM` with `include_date`.
pub fn format_timestamp(ts: &str, include_date: bool) -> Option<String> {
    let dt = parse(ts)?;
    let fmt = if include_date { "%Y-%m-%d %H:%M" } else { "%H:%M" };
    Some(dt.format(fmt).to_string())
}

/// Calendar date (`YYYY-MM-DD`) of the timestamp.
pub fn date(ts: &str) -> Option<String> {
    parse(ts).map(|dt| dt.format("%Y-%m-%d").to_string())
}

/// True when first and last fall on different calendar dates. Compares
/// dates as written, not instants; unparseable ends never span.
pub fn spans_multiple_days(first: Option<&str>, last: Option<&str>) -> bool {
    match (first.and_then(calendar_date), last.and_then(calendar_date)) {
        (Some(a), Some(b)) => a != b,
        _ => false,
    }
}

fn calendar_date(ts: &str) -> Option<NaiveDate> {
    parse(ts).map(|dt| dt.date_naive())
}
