use chrono::{DateTime, NaiveDate, Utc};

/// Render the snapshot `last_sync` value. RFC 3339 timestamps become
/// `SYNC 2024-05-01 14:03 UTC`; anything else is shown verbatim.
pub fn format_sync_label(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return "SYNC UNKNOWN".to_string();
    }
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => format!(
            "SYNC {}",
            dt.with_timezone(&Utc).format("%Y-%m-%d %H:%M UTC")
        ),
        Err(_) => raw.to_string(),
    }
}

/// Tournament dates arrive as ISO dates or datetimes; display them as
/// `May 01, 2024`.
pub fn format_event_date(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%b %d, %Y").to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%b %d, %Y").to_string();
    }
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        .map(|date| date.format("%b %d, %Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_label_from_timestamp() {
        assert_eq!(
            format_sync_label("2024-05-01T16:03:00+02:00"),
            "SYNC 2024-05-01 14:03 UTC"
        );
    }

    #[test]
    fn sync_label_passes_through_free_text() {
        assert_eq!(format_sync_label("Last sync: yesterday"), "Last sync: yesterday");
        assert_eq!(format_sync_label("  "), "SYNC UNKNOWN");
    }

    #[test]
    fn event_dates() {
        assert_eq!(format_event_date("2024-05-01"), "May 01, 2024");
        assert_eq!(format_event_date("2024-05-01T10:00:00"), "May 01, 2024");
        assert_eq!(format_event_date("TBD"), "TBD");
    }
}
