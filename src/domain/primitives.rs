//! Domain primitives: DriverId.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Driver identifier (opaque non-empty string).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DriverId(pub String);

/// Error returned when a driver id fails the non-empty contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DriverIdError {
    #[error("driver id must not be empty")]
    Empty,
}

impl DriverId {
    /// Create a DriverId from a string known to be non-empty.
    pub fn new(id: String) -> Self {
        DriverId(id)
    }

    /// Parse a DriverId from untrusted input, rejecting empty or
    /// whitespace-only strings.
    pub fn parse(raw: &str) -> Result<Self, DriverIdError> {
        if raw.trim().is_empty() {
            return Err(DriverIdError::Empty);
        }
        Ok(DriverId(raw.to_string()))
    }

    /// Get the id as a string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DriverId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DriverId {
    type Err = DriverIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
