//! Formatting helpers shared by the report and the CLI.

/// `"s"` unless `count` is exactly one.
#[must_use]
pub fn plural_suffix(count: u64) -> &'static str {
    if count == 1 { "" } else { "s" }
}

/// Formats whole seconds in words, e.g. 3602 -> "1 hour, 2 seconds".
///
/// Zero-valued units are left out; a zero duration is "0 seconds".
#[must_use]
pub fn format_elapsed(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    let parts: Vec<String> = [(hours, "hour"), (minutes, "minute"), (seconds, "second")]
        .into_iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, unit)| format!("{value} {unit}{}", plural_suffix(value)))
        .collect();

    if parts.is_empty() {
        "0 seconds".to_string()
    } else {
        parts.join(", ")
    }
}
