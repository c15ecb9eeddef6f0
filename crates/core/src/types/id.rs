//! Product identifier.
//!
//! The backend hands out opaque string IDs (e.g. `"v4sLtEcMpzabRyfx"`).
//! Wrapping them keeps product IDs from being confused with usernames,
//! tokens, or search text.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Opaque product identifier assigned by the backend.
///
/// # Example
///
/// ```rust
/// # use qkart_core::ProductId;
/// let id = ProductId::new("upLK9JbQ4rMhTwt4");
/// assert_eq!(id.as_str(), "upLK9JbQ4rMhTwt4");
/// assert_eq!(id, "upLK9JbQ4rMhTwt4");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new ID from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the ID and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ProductId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ProductId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_is_transparent() {
        let id = ProductId::new("KCRwjF7lN97HnEaY");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"KCRwjF7lN97HnEaY\"");

        let parsed: ProductId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_display() {
        let id = ProductId::from("BW0jAAeDJmlZCF8i");
        assert_eq!(format!("{id}"), "BW0jAAeDJmlZCF8i");
    }

    #[test]
    fn test_str_comparison() {
        let id = ProductId::from(String::from("abc"));
        assert_eq!(id, "abc");
        assert!(id != "abd");
    }
}
