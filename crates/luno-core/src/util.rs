//! Shared utility functions used across multiple modules.

/// Normalize optional text by trimming whitespace and removing empties.
///
/// Returns `None` when the input is `None` or the trimmed value is empty.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    let value = value?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Turn free text into a URL-safe slug.
///
/// ASCII letters and digits are kept (lowercased); every other run of
/// characters collapses into a single `-`. Leading and trailing dashes are
/// dropped, so text without any ASCII alphanumerics yields an empty slug.
///
/// ```
/// use luno_core::util::slugify;
///
/// assert_eq!(slugify("Rust Basics: Part 1"), "rust-basics-part-1");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Current Unix timestamp in milliseconds.
pub fn unix_millis_now() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Format a Unix millisecond timestamp as a `YYYY-MM-DD` date (UTC).
pub fn format_date(timestamp_ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(timestamp_ms).map_or_else(
        || timestamp_ms.to_string(),
        |date_time| date_time.format("%Y-%m-%d").to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_text_option_rejects_empty() {
        assert_eq!(normalize_text_option(None), None);
        assert_eq!(normalize_text_option(Some("   ".to_string())), None);
    }

    #[test]
    fn normalize_text_option_trims_value() {
        assert_eq!(
            normalize_text_option(Some(" rust-basics ".to_string())),
            Some("rust-basics".to_string())
        );
    }

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("  Hello,   World!  "), "hello-world");
        assert_eq!(slugify("already-a-slug"), "already-a-slug");
        assert_eq!(slugify("C++ & Rust"), "c-rust");
    }

    #[test]
    fn slugify_drops_non_ascii() {
        assert_eq!(slugify("مقاله پایتون"), "");
        assert_eq!(slugify("Python مقاله 2"), "python-2");
    }

    #[test]
    fn format_date_uses_utc_day() {
        assert_eq!(format_date(0), "1970-01-01");
        assert_eq!(format_date(1_700_000_000_000), "2023-11-14");
    }
}
