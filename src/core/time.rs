use chrono::{DateTime, NaiveDate, Utc};

/// Date reported for breaches whose source gives no usable date.
pub fn sentinel_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).expect("sentinel date is valid")
}

/// Parse the date shapes breach sources emit: `YYYY-MM-DD`, RFC 3339
/// timestamps, or month precision `YYYY-MM` (first of the month).
pub fn parse_loose_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }
    if let Some(day) = trimmed.get(..10) {
        if let Ok(date) = NaiveDate::parse_from_str(day, "%Y-%m-%d") {
            return Some(date);
        }
    }
    NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d").ok()
}

pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
