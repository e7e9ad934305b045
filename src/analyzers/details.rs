//! Best-effort extraction of the affected line and in-text clock time.

use std::sync::LazyLock;

use regex::Regex;

pub const NOT_AVAILABLE: &str = "N/A";

/// Line codes such as `HOB-WTC`, `JSQ-33` or `33-JSQ`.
static LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(([A-Z]{3,4}|\d{1,2})-([A-Z]{3,4}|\d{1,2}))\b").expect("line pattern is valid")
});

/// Clock times such as `10:53 AM` or `9:05PM`.
static TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{1,2}:\d{2}\s*(?:AM|PM))\b").expect("time pattern is valid")
});

/// Returns `(line, time)`; either is [`NOT_AVAILABLE`] when not found.
///
/// The first match in the text wins for each.
pub fn extract_details(text: &str) -> (String, String) {
    (
        first_capture(&LINE_PATTERN, text),
        first_capture(&TIME_PATTERN, text),
    )
}

fn first_capture(pattern: &Regex, text: &str) -> String {
    pattern
        .captures(text)
        .and_then(|c| c.get(1))
        .map_or_else(|| NOT_AVAILABLE.to_string(), |m| m.as_str().to_string())
}
