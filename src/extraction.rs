//! Chain name extraction from command lines.
//!
//! A launch line carries the chain name as `-ac_name=<NAME>`, where `<NAME>`
//! is a run of ASCII word characters. The extractor captures that run.
//!
//! Lines are matched as raw bytes; the rest of a line may be in any encoding.

use regex::bytes::Regex;

use crate::error::GenError;

/// Marker preceding the chain name on a launch line
pub const DEFAULT_MARKER: &str = "-ac_name=";

/// Captures the identifier that follows a literal marker
#[derive(Debug, Clone)]
pub struct NameExtractor {
    marker: String,
    pattern: Regex,
}

impl NameExtractor {
    /// Build an extractor for the given marker.
    ///
    /// The marker is matched literally; regex metacharacters in it are escaped.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use assetchain_gen::NameExtractor;
    ///
    /// let extractor = NameExtractor::new("-ac_name=")?;
    /// assert_eq!(extractor.extract(b"./komodod -ac_name=BEER &"), Some("BEER"));
    /// ```
    pub fn new(marker: &str) -> Result<Self, GenError> {
        if marker.is_empty() {
            return Err(GenError::Config("Name marker must not be empty".to_string()));
        }

        // ASCII-only word class: identifiers become file names
        let pattern = Regex::new(&format!("{}([0-9A-Za-z_]+)", regex::escape(marker)))
            .map_err(|e| GenError::Config(format!("Failed to build name pattern: {}", e)))?;

        Ok(Self {
            marker: marker.to_string(),
            pattern,
        })
    }

    /// Return the identifier captured on `line`, if any.
    ///
    /// Only the first occurrence of the marker followed by a word character counts.
    pub fn extract<'a>(&self, line: &'a [u8]) -> Option<&'a str> {
        let capture = self.pattern.captures(line)?.get(1)?;

        // The capture class is ASCII, so this never fails
        std::str::from_utf8(capture.as_bytes()).ok()
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }
}

impl Default for NameExtractor {
    fn default() -> Self {
        let pattern = Regex::new(r"-ac_name=([0-9A-Za-z_]+)").expect("static pattern is valid");
        Self {
            marker: DEFAULT_MARKER.to_string(),
            pattern,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_chain_name() {
        let extractor = NameExtractor::default();
        let line = b"./komodod -pubkey=$pubkey -ac_name=SUPERNET -ac_supply=816061 &";

        assert_eq!(extractor.extract(line), Some("SUPERNET"));
    }

    #[test]
    fn test_no_marker_no_match() {
        let extractor = NameExtractor::default();

        assert_eq!(extractor.extract(b"echo hello"), None);
        assert_eq!(extractor.extract(b"./komodod -ac_supply=100 &"), None);
    }

    #[test]
    fn test_marker_without_identifier() {
        let extractor = NameExtractor::default();

        assert_eq!(extractor.extract(b"./komodod -ac_name= -ac_supply=1"), None);
    }

    #[test]
    fn test_identifier_stops_at_non_word_character() {
        let extractor = NameExtractor::default();

        assert_eq!(extractor.extract(b"-ac_name=MGW/../etc"), Some("MGW"));
        assert_eq!(extractor.extract(b"-ac_name=coin_2-x"), Some("coin_2"));
        assert_eq!(extractor.extract("-ac_name=ÅBC".as_bytes()), None);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let extractor = NameExtractor::default();

        assert_eq!(extractor.extract(b"-ac_name=ONE -ac_name=TWO"), Some("ONE"));
    }

    #[test]
    fn test_match_in_non_utf8_line() {
        let extractor = NameExtractor::default();

        assert_eq!(extractor.extract(b"\xff -ac_name=LAT -ac_comment=caf\xe9"), Some("LAT"));
    }

    #[test]
    fn test_custom_marker_is_escaped() {
        let extractor = NameExtractor::new("--chain.name=").unwrap();

        assert_eq!(extractor.extract(b"run --chain.name=PIZZA"), Some("PIZZA"));
        assert_eq!(extractor.extract(b"run --chainXname=PIZZA"), None);
        assert_eq!(extractor.marker(), "--chain.name=");
    }

    #[test]
    fn test_empty_marker_rejected() {
        assert!(NameExtractor::new("").is_err());
    }
}
