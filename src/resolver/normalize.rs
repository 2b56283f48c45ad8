//! Locator normalization: URL slug or free text into a title-cased country name.

use crate::error::{GuideError, Result};
use once_cell::sync::Lazy;
use percent_encoding::percent_decode_str;
use regex::Regex;

/// Runs of slug separators and whitespace. `%` is included so that a
/// normalized name never carries an escape sequence a second decode could
/// expand.
static SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-_%\s]+").expect("separator pattern is valid"));

/// Decode percent-escapes and trim. Invalid UTF-8 is replaced, never rejected.
pub fn decode_locator(locator: &str) -> String {
    percent_decode_str(locator)
        .decode_utf8_lossy()
        .trim()
        .to_string()
}

/// Turn a raw locator into a `NormalizedName`.
///
/// `united-states` -> `United States`, `south_korea` -> `South Korea`,
/// `  france ` -> `France`. Idempotent for every input.
pub fn normalize(locator: &str) -> String {
    let decoded = percent_decode_str(locator).decode_utf8_lossy();
    SEPARATORS
        .split(&decoded)
        .filter(|token| !token.is_empty())
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(token: &str) -> String {
    let mut chars = token.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut out = String::with_capacity(token.len());
    // Characters whose uppercase form expands (e.g. 'ß') are kept as-is so a
    // second pass sees the same token.
    let mut upper = first.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(single), None) => out.push(single),
        _ => out.push(first),
    }
    out.extend(chars.flat_map(char::to_lowercase));
    out
}

/// A caller-supplied locator paired with its normalized form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    raw: String,
    name: String,
}

impl Locator {
    /// Build a locator without validation. An empty name simply never matches.
    pub fn new(input: &str) -> Self {
        Self {
            raw: decode_locator(input),
            name: normalize(input),
        }
    }

    /// Build a locator, rejecting input that normalizes to nothing.
    pub fn parse(input: &str) -> Result<Self> {
        let locator = Self::new(input);
        if locator.name.is_empty() {
            return Err(GuideError::InputMissing(
                "Country parameter is required".to_string(),
            ));
        }
        Ok(locator)
    }

    /// Decoded, trimmed input as received.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The `NormalizedName`.
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_slugs() {
        assert_eq!(normalize("united-states"), "United States");
        assert_eq!(normalize("south_korea"), "South Korea");
        assert_eq!(normalize("  france "), "France");
        assert_eq!(normalize("JAPAN"), "Japan");
        assert_eq!(normalize("bosnia--and__herzegovina"), "Bosnia And Herzegovina");
    }

    #[test]
    fn test_normalize_decodes_percent_escapes() {
        assert_eq!(normalize("united%20kingdom"), "United Kingdom");
        assert_eq!(normalize("C%C3%B4te-d'ivoire"), "Côte D'ivoire");
        assert_eq!(decode_locator("%20new%20zealand "), "new zealand");
    }

    #[test]
    fn test_normalize_degenerate_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("---"), "");
        assert_eq!(normalize("%20%20"), "");
        assert_eq!(normalize("%zz"), "Zz");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            "united-states",
            "south_korea",
            "  france ",
            "%2541",
            "straße",
            "ǆungla",
            "İstanbul",
            "ΣΙΣΥΦΟΣ",
            "a%ff%fe-b",
            "new\tzealand\n",
            "São_Tomé-and-Príncipe",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_locator_parse_rejects_empty() {
        assert!(matches!(
            Locator::parse("  - "),
            Err(GuideError::InputMissing(_))
        ));
        let locator = Locator::parse("united-states").unwrap();
        assert_eq!(locator.raw(), "united-states");
        assert_eq!(locator.name(), "United States");
    }
}
