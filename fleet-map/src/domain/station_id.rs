//! Station identifier type.

use std::fmt;

use serde::Serialize;

/// Identifier of a charging station as reported by the ChargePoint API
/// (e.g. `"1:123456"`).
///
/// Unlike most identifiers this one is not validated: the API occasionally
/// omits `stationID`, and such rows are carried under the empty identifier
/// so that grouping never fails. Use [`StationId::is_empty`] to detect them.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct StationId(String);

impl StationId {
    /// Create an identifier from raw text, trimming surrounding whitespace.
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_string())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the catch-all identifier used when the API sent none.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StationId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_whitespace() {
        let id = StationId::new("  1:1234 \n");
        assert_eq!(id.as_str(), "1:1234");
    }

    #[test]
    fn empty_identifier() {
        assert!(StationId::new("").is_empty());
        assert!(StationId::new("   ").is_empty());
        assert!(!StationId::new("1:1").is_empty());
    }

    #[test]
    fn display_and_debug() {
        let id = StationId::from("1:42");
        assert_eq!(id.to_string(), "1:42");
        assert_eq!(format!("{id:?}"), "StationId(1:42)");
    }

    #[test]
    fn ordering_is_lexicographic() {
        let mut ids = vec![
            StationId::from("1:300"),
            StationId::from(""),
            StationId::from("1:1000"),
        ];
        ids.sort();
        let ids: Vec<_> = ids.iter().map(StationId::as_str).collect();
        assert_eq!(ids, vec!["", "1:1000", "1:300"]);
    }
}
