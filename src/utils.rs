// src/utils.rs
use chrono::{DateTime, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// `November 10, 2023`
    Long,
    /// `Nov 10, 2023`
    Short,
    /// `11/10/2023`
    Numeric,
}

/// Render a server date (`YYYY-MM-DD` or RFC 3339). Unparseable input is
/// returned unchanged.
pub fn format_date(raw: &str, style: DateStyle) -> String {
    let raw = raw.trim();
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|d| d.date_naive()))
        .or_else(|| {
            raw.get(..10)
                .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        });

    match date {
        Some(date) => match style {
            DateStyle::Long => date.format("%B %-d, %Y").to_string(),
            DateStyle::Short => date.format("%b %-d, %Y").to_string(),
            DateStyle::Numeric => date.format("%m/%d/%Y").to_string(),
        },
        None => raw.to_string(),
    }
}

/// First letter of each word, upper-cased: `"sarah j smith"` -> `"SJS"`.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// The stored avatar, or a stable placeholder seeded by the user id.
pub fn avatar_or_placeholder(avatar_url: &str, seed: impl std::fmt::Display) -> String {
    if avatar_url.trim().is_empty() {
        format!("https://picsum.photos/seed/{}/400/400", seed)
    } else {
        avatar_url.to_string()
    }
}

/// `total / count` rounded to the nearest integer; 0 when `count` is 0.
pub fn average_rounded(total: u64, count: usize) -> u64 {
    if count == 0 {
        return 0;
    }
    (total as f64 / count as f64).round() as u64
}

/// Shape check only: something before and after a single `@`, and a dot in
/// the domain.
pub fn looks_like_email(value: &str) -> bool {
    let value = value.trim();
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.contains(char::is_whitespace)
        }
        None => false,
    }
}
