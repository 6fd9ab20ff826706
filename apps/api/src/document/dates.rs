//! Long-form date labels for the rendered document.

use chrono::{DateTime, NaiveDate};

/// Formats a stored date as `"<Month> <Year>"`, e.g. `"June 2023"`.
///
/// Accepts `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, RFC 3339 timestamps and `"Month YYYY"`.
/// Anything else formats to an empty string.
pub fn format_date(input: &str) -> String {
    parse_date(input.trim())
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_default()
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    if s.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(d) = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(d) = NaiveDate::parse_from_str(&format!("1 {s}"), "%d %B %Y") {
        return Some(d);
    }
    if s.len() == 4 && s.chars().all(|c| c.is_ascii_digit()) {
        return NaiveDate::parse_from_str(&format!("{s}-01-01"), "%Y-%m-%d").ok();
    }
    None
}

/// `"<start> - <end>"` from whichever ends format to something. The separator only
/// appears when both do.
pub fn date_range(started: &str, ended: &str) -> String {
    [format_date(started), format_date(ended)]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" - ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_input_formats_long() {
        assert_eq!(format_date("2023-06"), "June 2023");
        assert_eq!(format_date("2023-06-15"), "June 2023");
        assert_eq!(format_date("2021-01-05T08:00:00Z"), "January 2021");
        assert_eq!(format_date("March 2020"), "March 2020");
        assert_eq!(format_date("2019"), "January 2019");
    }

    #[test]
    fn test_invalid_dates_format_empty() {
        assert_eq!(format_date("not-a-date"), "");
        assert_eq!(format_date("2023-13"), "");
        assert_eq!(format_date(" "), "");
    }

    #[test]
    fn test_range_drops_separator_for_missing_end() {
        assert_eq!(date_range("2019-06", "2023-05"), "June 2019 - May 2023");
        assert_eq!(date_range("2019-06", " "), "June 2019");
        assert_eq!(date_range("", "2023-05"), "May 2023");
        assert_eq!(date_range("garbage", ""), "");
    }
}
