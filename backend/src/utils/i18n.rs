//! Culture negotiation helpers
//!
//! Maps request headers onto entries of the supported-culture table.

use crate::models::{CultureOption, SUPPORTED_CULTURES};

/// Look up a culture by exact, case-sensitive code.
pub fn find_culture(code: &str) -> Option<&'static CultureOption> {
    SUPPORTED_CULTURES.iter().find(|c| c.code == code)
}

/// Match a single language tag against the table.
/// Accepts: "ar-SA", "ar_sa", "AR", "en-GB" (falls back to "en-US"), etc.
fn match_tag(tag: &str) -> Option<&'static CultureOption> {
    let tag = tag.trim().replace('_', "-");
    if tag.is_empty() || tag == "*" {
        return None;
    }

    if let Some(exact) = SUPPORTED_CULTURES.iter().find(|c| c.code.eq_ignore_ascii_case(&tag)) {
        return Some(exact);
    }

    let primary = tag.split('-').next().unwrap_or_default();
    SUPPORTED_CULTURES.iter().find(|c| c.language().eq_ignore_ascii_case(primary))
}

/// Parse one Accept-Language entry into its tag and q-value.
fn parse_entry(entry: &str) -> Option<(&str, f32)> {
    let mut parts = entry.split(';');
    let tag = parts.next()?.trim();
    if tag.is_empty() {
        return None;
    }

    let mut quality = 1.0;
    for param in parts {
        if let Some(q) = param.trim().strip_prefix("q=") {
            quality = q.trim().parse().ok()?;
        }
    }

    (quality > 0.0).then_some((tag, quality))
}

/// Pick the best supported culture for an Accept-Language header value.
///
/// Entries are ranked by q-value; equal weights keep header order.
pub fn negotiate_accept_language(header_value: Option<&str>) -> Option<&'static CultureOption> {
    let mut entries: Vec<(&str, f32)> = header_value?.split(',').filter_map(parse_entry).collect();
    entries.sort_by(|a, b| b.1.total_cmp(&a.1));
    entries.into_iter().find_map(|(tag, _)| match_tag(tag))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_culture_is_exact() {
        assert_eq!(find_culture("ar-SA").map(|c| c.name), Some("العربية"));
        assert!(find_culture("ar-sa").is_none());
        assert!(find_culture("ar").is_none());
        assert!(find_culture("").is_none());
    }

    #[test]
    fn test_match_tag() {
        assert_eq!(match_tag("ar-SA").map(|c| c.code), Some("ar-SA"));
        assert_eq!(match_tag("ar_sa").map(|c| c.code), Some("ar-SA"));
        assert_eq!(match_tag("AR").map(|c| c.code), Some("ar-SA"));
        assert_eq!(match_tag("en-GB").map(|c| c.code), Some("en-US"));
        assert_eq!(match_tag("fr-FR"), None);
        assert_eq!(match_tag("*"), None);
        assert_eq!(match_tag(""), None);
    }

    #[test]
    fn test_negotiate_respects_quality() {
        let header = "fr-FR, en;q=0.5, ar;q=0.8";
        assert_eq!(negotiate_accept_language(Some(header)).map(|c| c.code), Some("ar-SA"));

        let header = "en-US,ar-SA";
        assert_eq!(negotiate_accept_language(Some(header)).map(|c| c.code), Some("en-US"));
    }

    #[test]
    fn test_negotiate_skips_unusable_entries() {
        assert_eq!(negotiate_accept_language(Some("ar;q=0, en;q=0.1")).map(|c| c.code), Some("en-US"));
        assert_eq!(negotiate_accept_language(Some("ar;q=abc")), None);
        assert_eq!(negotiate_accept_language(Some("de, fr")), None);
        assert_eq!(negotiate_accept_language(None), None);
    }
}
