//! Strongly-typed expense identifier
//!
//! Wraps a random UUID. The full hyphenated form is what gets persisted;
//! users refer to expenses by any prefix of it, usually the first 8 characters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Number of characters shown when an id is displayed in short form
pub const SHORT_ID_LEN: usize = 8;

/// Unique identifier of an expense record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(Uuid);

impl ExpenseId {
    /// Create a new random ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Parse an ID from its full textual form
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    /// The first characters of the id, as shown in listings
    pub fn short(&self) -> String {
        self.0.to_string()[..SHORT_ID_LEN].to_string()
    }

    /// Whether the persisted form of this id starts with `prefix`
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.to_string().starts_with(prefix)
    }
}

impl Default for ExpenseId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.as_hyphenated())
    }
}

impl From<Uuid> for ExpenseId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl FromStr for ExpenseId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
