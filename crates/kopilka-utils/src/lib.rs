//! Utility functions and helpers

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Group a string of ASCII digits into thousands with the given separator
///
/// `group_digits("1234567", ' ')` gives `"1 234 567"`. Non-digit input is
/// grouped as-is, callers strip the sign beforehand.
pub fn group_digits(digits: &str, separator: &str) -> String {
    let len = digits.chars().count();
    let mut result = String::with_capacity(digits.len() + len / 3 * separator.len());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push_str(separator);
        }
        result.push(c);
    }
    result
}

/// Escape text for embedding in HTML element content or quoted attributes
pub fn escape_html(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

static LAST_ID: AtomicU64 = AtomicU64::new(0);

/// Generate a unique timestamp-derived ID
///
/// Based on the current time in milliseconds. Two calls in the same
/// millisecond (or a clock going backwards) still get distinct, increasing
/// values within the process.
pub fn generate_id() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let mut last = LAST_ID.load(Ordering::Relaxed);
    loop {
        let next = if now > last { now } else { last + 1 };
        match LAST_ID.compare_exchange_weak(last, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return next.to_string(),
            Err(actual) => last = actual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits("0", " "), "0");
        assert_eq!(group_digits("980", " "), "980");
        assert_eq!(group_digits("2340", " "), "2 340");
        assert_eq!(group_digits("1234567", ","), "1,234,567");
        assert_eq!(group_digits("100000", "\u{a0}"), "100\u{a0}000");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("Пятёрочка"), "Пятёрочка");
        assert_eq!(
            escape_html("<script>alert('x')</script> & \"q\""),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; &quot;q&quot;"
        );
    }

    #[test]
    fn test_generate_id_is_unique() {
        let ids: HashSet<String> = (0..1000).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_generate_id_is_numeric() {
        let id = generate_id();
        assert!(id.parse::<u64>().is_ok());
    }
}
