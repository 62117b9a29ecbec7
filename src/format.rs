// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Text helpers shared by both banner layouts.

use chrono::{Datelike, NaiveDate};

/// Suffix appended to truncated repository names.
pub const ELLIPSIS: &str = "...";

/// Formats a count, abbreviating values of a thousand or more.
///
/// Values below 1000 are printed as-is. Larger values are rounded to one
/// decimal place of thousands with a trailing `.0` removed.
///
/// # Examples
///
/// ```
/// use repo_banner::format_number;
///
/// assert_eq!(format_number(999), "999");
/// assert_eq!(format_number(1000), "1k");
/// assert_eq!(format_number(2549), "2.5k");
/// assert_eq!(format_number(12000), "12k");
/// ```
pub fn format_number(value: u64) -> String {
    if value < 1000 {
        return value.to_string();
    }

    // Round half up on hundreds without overflowing near u64::MAX.
    let tenths = value / 100 + u64::from(value % 100 >= 50);
    let whole = tenths / 10;
    let fraction = tenths % 10;

    if fraction == 0 {
        format!("{whole}k")
    } else {
        format!("{whole}.{fraction}k")
    }
}

/// Formats a count with en-GB thousands separators.
///
/// # Examples
///
/// ```
/// use repo_banner::format_grouped;
///
/// assert_eq!(format_grouped(121570), "121,570");
/// assert_eq!(format_grouped(42), "42");
/// ```
pub fn format_grouped(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    grouped
}

/// Returns `unit` for a count of one and its plural otherwise.
///
/// # Examples
///
/// ```
/// use repo_banner::pluralize;
///
/// assert_eq!(pluralize(1, "repo"), "repo");
/// assert_eq!(pluralize(0, "repo"), "repos");
/// ```
pub fn pluralize(count: u64, unit: &str) -> String {
    if count == 1 {
        unit.to_owned()
    } else {
        format!("{unit}s")
    }
}

/// Shortens `name` to `max_chars` characters followed by [`ELLIPSIS`].
///
/// Names at or under the limit are returned unchanged. Lengths are counted in
/// characters, not bytes.
pub fn truncate_name(name: &str, max_chars: usize) -> String {
    match name.char_indices().nth(max_chars) {
        Some((cut, _)) => {
            let mut truncated = String::with_capacity(cut + ELLIPSIS.len());
            truncated.push_str(&name[..cut]);
            truncated.push_str(ELLIPSIS);
            truncated
        }
        None => name.to_owned()
    }
}

/// Builds the footer line, e.g. `Generated on october 19th 2026`.
pub fn generated_on(date: NaiveDate) -> String {
    let month = date.format("%B").to_string().to_lowercase();
    let day = date.day();
    format!(
        "Generated on {month} {day}{} {}",
        ordinal_suffix(day),
        date.year()
    )
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th"
    }
}
