//! String utilities used by search and compact rendering.

/// Converts a blank (empty or whitespace-only) string to `None`, otherwise
/// returns the trimmed value.
///
/// # Examples
///
/// ```
/// use glimpse_domain::common::none_if_blank;
///
/// assert_eq!(none_if_blank("  Lisbon "), Some("Lisbon".to_string()));
/// assert_eq!(none_if_blank("   "), None);
/// ```
pub fn none_if_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Case-insensitive substring match.
///
/// # Examples
///
/// ```
/// use glimpse_domain::common::contains_ignore_case;
///
/// assert!(contains_ignore_case("Sunset at the Pier", "pier"));
/// assert!(!contains_ignore_case("Sunset", "dawn"));
/// ```
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Truncates to at most `max_chars` characters, appending `...` when cut.
///
/// Counts chars rather than bytes so multi-byte text is never split.
///
/// # Examples
///
/// ```
/// use glimpse_domain::common::truncate_with_ellipsis;
///
/// assert_eq!(truncate_with_ellipsis("hello world", 5), "hello...");
/// assert_eq!(truncate_with_ellipsis("hi", 5), "hi");
/// ```
pub fn truncate_with_ellipsis(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let cut: String = value.chars().take(max_chars).collect();
    format!("{}...", cut)
}
