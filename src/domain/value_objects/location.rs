use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A report location, compared case-insensitively.
///
/// Surrounding whitespace is trimmed and inner runs of whitespace collapse to a
/// single space. The first spelling seen is kept for display; equality,
/// ordering and hashing go through the lowercase [`Location::key`].
#[derive(Debug, Clone)]
pub struct Location {
    display: String,
    key: String,
}

impl Location {
    /// Normalizes a raw location string. Returns `None` when it is blank.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let display = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        if display.is_empty() {
            return None;
        }
        let key = display.to_lowercase();
        Some(Self { display, key })
    }

    /// Rebuilds a location from a stored key and display form.
    #[must_use]
    pub fn from_parts(key: String, display: String) -> Self {
        Self { display, key }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.display
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Location {}

impl Hash for Location {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for Location {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Location {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display)
    }
}

impl Serialize for Location {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.display)
    }
}

impl<'de> Deserialize<'de> for Location {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).ok_or_else(|| serde::de::Error::custom("location must not be blank"))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn parse_trims_and_collapses_whitespace() {
        let loc = Location::parse("  New   Delhi ").expect("location");
        assert_eq!(loc.as_str(), "New Delhi");
        assert_eq!(loc.key(), "new delhi");
    }

    #[test]
    fn blank_is_rejected() {
        assert!(Location::parse("   ").is_none());
        assert!(Location::parse("").is_none());
    }

    #[test]
    fn equality_ignores_case() {
        let a = Location::parse("Mumbai").expect("location");
        let b = Location::parse("MUMBAI").expect("location");
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        set.insert(b);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn serializes_display_form() {
        let loc = Location::parse("Chennai").expect("location");
        assert_eq!(serde_json::to_string(&loc).expect("serialize"), "\"Chennai\"");
        let back: Location = serde_json::from_str("\"chennai\"").expect("deserialize");
        assert_eq!(back, loc);
        assert!(serde_json::from_str::<Location>("\"  \"").is_err());
    }
}
