/// Inclusive bounds for a numeric form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericRange {
    pub min: i64,
    pub max: i64,
}

impl Default for NumericRange {
    // Bounds assumed when a field declares none
    fn default() -> Self {
        Self { min: 0, max: 1000 }
    }
}

impl NumericRange {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: i64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Whether `text` should be flagged. Text with no leading integer is not
    /// flagged here; it is reported when the form is collected.
    pub fn is_out_of_range(&self, text: &str) -> bool {
        match parse_int_prefix(text) {
            Some(value) => !self.contains(value),
            None => false,
        }
    }
}

/// Lenient integer parsing: skips leading whitespace, accepts one sign and
/// reads digits up to the first non-digit (`"12abc"` is 12).
pub fn parse_int_prefix(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int_prefix() {
        assert_eq!(parse_int_prefix("42"), Some(42));
        assert_eq!(parse_int_prefix("  7"), Some(7));
        assert_eq!(parse_int_prefix("-3"), Some(-3));
        assert_eq!(parse_int_prefix("+15"), Some(15));
        assert_eq!(parse_int_prefix("12abc"), Some(12));
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("-"), None);
    }

    #[test]
    fn test_default_bounds() {
        let range = NumericRange::default();
        assert!(!range.is_out_of_range("0"));
        assert!(!range.is_out_of_range("1000"));
        assert!(range.is_out_of_range("1001"));
        assert!(range.is_out_of_range("-1"));
    }

    #[test]
    fn test_unparseable_is_not_flagged() {
        let range = NumericRange::new(1, 100);
        assert!(!range.is_out_of_range(""));
        assert!(!range.is_out_of_range("abc"));
        assert!(range.is_out_of_range("0"));
    }
}
