//! Unique identifier types for engine entities
//!
//! Order ids are allocated by the lifecycle manager from a strictly
//! increasing counter and are never reused; account ids use UUID v7 and are
//! supplied by the environment.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an order
///
/// A monotonically increasing sequence number. Ids are issued exactly once;
/// a cancelled order's id is never resurrected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u64);

impl OrderId {
    /// Create from a raw sequence value
    pub fn from_u64(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw sequence value
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for an account (order owner)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trading pair identifier
///
/// Format: "BASE/QUOTE" (e.g., "BTC/USDT", "ETH/USDC"). The two tokens must
/// be non-empty and distinct; an order trading a token against itself is
/// rejected before it can reach a book.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PairId(String);

impl PairId {
    /// Create a new PairId from a string
    ///
    /// # Panics
    /// Panics if the format is invalid (use `try_new` for fallible parsing)
    pub fn new(symbol: impl Into<String>) -> Self {
        Self::try_new(symbol).expect("PairId must be in BASE/QUOTE format with distinct tokens")
    }

    /// Try to create a PairId, returning None if invalid
    pub fn try_new(symbol: impl Into<String>) -> Option<Self> {
        let s = symbol.into();
        let (base, quote) = s.split_once('/')?;
        Self::from_tokens(base, quote)
    }

    /// Build a PairId from separate base and quote tokens
    pub fn from_tokens(base: &str, quote: &str) -> Option<Self> {
        if base.is_empty()
            || quote.is_empty()
            || base == quote
            || base.contains('/')
            || quote.contains('/')
        {
            return None;
        }
        Some(Self(format!("{}/{}", base, quote)))
    }

    /// Get the pair string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split into base and quote tokens
    pub fn split(&self) -> (&str, &str) {
        // Constructors guarantee exactly one separator
        self.0.split_once('/').unwrap_or((&self.0, ""))
    }
}

impl fmt::Display for PairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
