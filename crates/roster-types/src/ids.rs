//! Type-safe identifier for user records.
//!
//! Ids are plain positive integers handed out by the registry counter.
//! They are never reused, so a deleted record's id stays retired for the
//! lifetime of the process.

use core::num::ParseIntError;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Unique identifier for a user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct UserId(#[ts(type = "number")] pub u64);

impl UserId {
    /// The id handed to the first record of an empty registry.
    pub const FIRST: Self = Self(1);

    /// Wrap a raw integer id.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Return the inner integer value.
    pub const fn into_inner(self) -> u64 {
        self.0
    }

    /// The id that follows this one, or `None` once the id space is spent.
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(raw) => Some(Self(raw)),
            None => None,
        }
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::FIRST
    }
}

impl core::fmt::Display for UserId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}

impl From<u64> for UserId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<UserId> for u64 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_increments() {
        assert_eq!(UserId::new(4).next(), Some(UserId::new(5)));
    }

    #[test]
    fn next_stops_at_max() {
        assert_eq!(UserId::new(u64::MAX).next(), None);
    }

    #[test]
    fn parses_from_path_segment() {
        assert_eq!("12".parse::<UserId>().ok(), Some(UserId::new(12)));
        assert!("abc".parse::<UserId>().is_err());
        assert!("-1".parse::<UserId>().is_err());
    }

    #[test]
    fn serializes_as_bare_number() {
        let json = serde_json::to_string(&UserId::new(7)).unwrap_or_default();
        assert_eq!(json, "7");
    }
}
