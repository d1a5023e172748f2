//! Display formatting for primitive field values.
//!
//! Everything here is a pure function of its inputs. Malformed values are
//! passed through rather than rejected so a half-typed date never breaks the
//! preview.

use unicode_normalization::UnicodeNormalization;

/// Text shown for an open-ended or missing date.
pub const PRESENT: &str = "Present";

/// Joiner between the start and end of a date range.
pub const RANGE_SEPARATOR: &str = " – ";

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Format a `YYYY-MM` date as `Mon YYYY`.
///
/// An empty date is open-ended and renders as [`PRESENT`]. Values with fewer
/// than two dash-separated parts, or a month outside 1-12, come back
/// unchanged.
///
/// ```
/// use resumake::format::format_date;
///
/// assert_eq!(format_date("2023-06"), "Jun 2023");
/// assert_eq!(format_date(""), "Present");
/// assert_eq!(format_date("2023"), "2023");
/// ```
pub fn format_date(date: &str) -> String {
    let date = date.trim();
    if date.is_empty() {
        return PRESENT.to_string();
    }

    let mut parts = date.split('-');
    let (Some(year), Some(month)) = (parts.next(), parts.next()) else {
        return date.to_string();
    };

    match month.trim().parse::<usize>() {
        Ok(m) if (1..=12).contains(&m) => format!("{} {}", MONTHS[m - 1], year),
        _ => date.to_string(),
    }
}

/// Format a start/end pair as `Start – End`.
///
/// `current` forces the end to [`PRESENT`] whatever `end` holds.
pub fn format_date_range(start: &str, end: &str, current: bool) -> String {
    let start = format_date(start);
    let end = if current {
        PRESENT.to_string()
    } else {
        format_date(end)
    };
    format!("{}{}{}", start, RANGE_SEPARATOR, end)
}

/// Split a comma-separated list, trimming items and dropping empty ones.
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Truncate text to at most `max_chars` characters, appending `...`.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let head: String = text.chars().take(max_chars).collect();
    format!("{}...", head.trim_end())
}

/// Escape the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

/// Derive a download file stem from a person's name.
///
/// Accents are folded first (`José` → `Jose`), then anything that is not an
/// ASCII letter, digit or space is stripped and whitespace runs collapse to a
/// single `_`. Falls back to `Resume` when nothing survives.
pub fn filename_stem(name: &str) -> String {
    let folded: String = name
        .nfkd()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();
    let stem = folded.split_whitespace().collect::<Vec<_>>().join("_");
    if stem.is_empty() {
        "Resume".to_string()
    } else {
        stem
    }
}
