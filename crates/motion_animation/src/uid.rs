// SPDX-License-Identifier: MIT OR Apache-2.0
//! Unique identifiers shared by keyframes, scene objects and scenes.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// String-backed unique identifier.
///
/// Freshly generated ids are random v4 UUIDs, but any string read back from a
/// saved project is accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uid(String);

impl Uid {
    /// Create a new random ID
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// View the raw string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Uid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Uid {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for Uid {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for Uid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_ids_are_distinct() {
        let a = Uid::new();
        let b = Uid::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let uid = Uid::from("uid-1700000000000-0");
        let json = serde_json::to_string(&uid).unwrap();
        assert_eq!(json, "\"uid-1700000000000-0\"");
        let back: Uid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, uid);
    }
}
