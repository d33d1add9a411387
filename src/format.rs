//! Pure formatting helpers shared by the page builders.

use chrono::{DateTime, FixedOffset};
use std::path::Path;

/// Display format for every timestamp on generated pages.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Formats a timestamp as `YYYY-MM-DD HH:MM` in its own UTC offset.
///
/// Uses the offset recorded in the commit, never the host's local zone.
pub fn format_time(time: DateTime<FixedOffset>) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Removes a single trailing newline from a commit message.
///
/// Embedded newlines and any further trailing newlines are kept.
pub fn trim_message(message: &str) -> &str {
    message.strip_suffix('\n').unwrap_or(message)
}

/// Renders a count as a plain decimal without separators or units.
pub fn format_count(count: usize) -> String {
    count.to_string()
}

/// Renders a blob size in bytes as a plain decimal.
pub fn format_size(bytes: u64) -> String {
    bytes.to_string()
}

/// Short display name of a reference: everything after the last `/`.
///
/// `refs/heads/main` becomes `main`; `refs/heads/feature/x` becomes `x`.
pub fn short_ref_name(full_name: &str) -> &str {
    match full_name.rfind('/') {
        Some(idx) => &full_name[idx + 1..],
        None => full_name,
    }
}

/// Repository name without its trailing extension (`foo.git` -> `foo`).
pub fn strip_extension(name: &str) -> &str {
    Path::new(name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(name)
}
