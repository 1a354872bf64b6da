// src/util/text.rs
use crate::constants::{EXCERPT_ELLIPSIS, EXCERPT_MAX_CHARS};
use chrono::{DateTime, TimeZone, Utc};

/// Shorten a note body for a sidebar row.
///
/// Bodies longer than `EXCERPT_MAX_CHARS` characters are cut to exactly that
/// many characters and suffixed with `EXCERPT_ELLIPSIS`; shorter ones are
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use notesapp::util::text::excerpt;
///
/// assert_eq!(excerpt("short"), "short");
/// assert_eq!(excerpt(&"x".repeat(61)), format!("{}...", "x".repeat(60)));
/// ```
pub fn excerpt(body: &str) -> String {
    match body.char_indices().nth(EXCERPT_MAX_CHARS) {
        Some((cut, _)) => format!("{}{}", &body[..cut], EXCERPT_ELLIPSIS),
        None => body.to_string(),
    }
}

/// Human-readable timestamp in the given zone, e.g. `Monday, June 3, 2024 at 2:05 PM`.
pub fn format_updated<Tz: TimeZone>(updated: &DateTime<Utc>, zone: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    updated
        .with_timezone(zone)
        .format("%A, %B %-d, %Y at %-I:%M %p")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "")]
    #[case("Take note...", "Take note...")]
    fn given_body_within_budget_when_excerpting_then_returns_unchanged(
        #[case] body: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(excerpt(body), expected);
    }

    #[test]
    fn given_body_of_exactly_sixty_chars_when_excerpting_then_has_no_ellipsis() {
        let body = "a".repeat(60);

        assert_eq!(excerpt(&body), body);
    }

    #[test]
    fn given_body_over_budget_when_excerpting_then_cuts_to_sixty_chars_plus_ellipsis() {
        let body = format!("{}{}", "b".repeat(60), "tail");

        let result = excerpt(&body);

        assert_eq!(result, format!("{}...", "b".repeat(60)));
    }

    #[test]
    fn given_multibyte_body_when_excerpting_then_counts_characters_not_bytes() {
        let body = "é".repeat(61);

        let result = excerpt(&body);

        assert_eq!(result.chars().count(), 63);
        assert!(result.starts_with(&"é".repeat(60)));
        assert!(result.ends_with("..."));
    }

    #[test]
    fn given_utc_zone_when_formatting_updated_then_uses_long_date_and_short_time() {
        let updated = Utc.with_ymd_and_hms(2024, 6, 3, 14, 5, 0).unwrap();

        assert_eq!(
            format_updated(&updated, &Utc),
            "Monday, June 3, 2024 at 2:05 PM"
        );
    }
}
