use chrono::{DateTime, Local, NaiveDateTime};

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render a backend timestamp for display.
///
/// The backend emits either RFC 3339 or naive ISO 8601 (`datetime.isoformat()`
/// without an offset). Anything else is shown verbatim.
pub fn display_timestamp(raw: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.with_timezone(&Local).format(DISPLAY_FORMAT).to_string();
    }

    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return parsed.format(DISPLAY_FORMAT).to_string();
    }

    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naive_iso_timestamp() {
        assert_eq!(
            display_timestamp("2024-03-05T14:07:09.123456"),
            "2024-03-05 14:07:09"
        );
        assert_eq!(display_timestamp("2024-03-05T14:07:09"), "2024-03-05 14:07:09");
    }

    #[test]
    fn test_unparseable_is_verbatim() {
        assert_eq!(display_timestamp("yesterday"), "yesterday");
        assert_eq!(display_timestamp(""), "");
    }
}
