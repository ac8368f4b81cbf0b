//! Engagement ID - 64-bit unique identifier for comments and replies
//!
//! Structure:
//! - Bits 63-22: Timestamp (milliseconds since custom epoch)
//! - Bits 21-12: Worker ID (0-1023)
//! - Bits 11-0:  Sequence number (0-4095)
//!
//! Ids are serialized as decimal strings both on the wire and inside the
//! stored engagement document.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Unique identifier for a comment or reply (64-bit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct EngagementId(i64);

impl EngagementId {
    /// Custom epoch: 2025-01-01 00:00:00 UTC (milliseconds)
    pub const EPOCH: i64 = 1735689600000;

    /// Create a new EngagementId from a raw i64 value
    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner i64 value
    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Check if the id is zero (uninitialized)
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Extract timestamp (milliseconds since Unix epoch)
    #[inline]
    pub fn timestamp(&self) -> i64 {
        (self.0 >> 22) + Self::EPOCH
    }

    /// Extract worker ID (0-1023)
    #[inline]
    pub fn worker_id(&self) -> u16 {
        ((self.0 >> 12) & 0x3FF) as u16
    }

    /// Extract sequence number (0-4095)
    #[inline]
    pub fn sequence(&self) -> u16 {
        (self.0 & 0xFFF) as u16
    }

    /// Parse from string representation
    pub fn parse(s: &str) -> Result<Self, EngagementIdParseError> {
        s.parse::<i64>()
            .map(EngagementId)
            .map_err(|_| EngagementIdParseError::InvalidFormat)
    }
}

/// Error when parsing an EngagementId from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EngagementIdParseError {
    #[error("invalid engagement id format")]
    InvalidFormat,
}

impl fmt::Display for EngagementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for EngagementId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<EngagementId> for i64 {
    fn from(id: EngagementId) -> Self {
        id.0
    }
}

impl std::str::FromStr for EngagementId {
    type Err = EngagementIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EngagementId::parse(s)
    }
}

// Serialize as string for JSON (JavaScript BigInt safety)
impl Serialize for EngagementId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

// Deserialize from string or number
impl<'de> Deserialize<'de> for EngagementId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct EngagementIdVisitor;

        impl<'de> Visitor<'de> for EngagementIdVisitor {
            type Value = EngagementId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or integer representing an engagement id")
            }

            fn visit_i64<E>(self, value: i64) -> Result<EngagementId, E>
            where
                E: de::Error,
            {
                Ok(EngagementId(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<EngagementId, E>
            where
                E: de::Error,
            {
                Ok(EngagementId(value as i64))
            }

            fn visit_str<E>(self, value: &str) -> Result<EngagementId, E>
            where
                E: de::Error,
            {
                value
                    .parse::<i64>()
                    .map(EngagementId)
                    .map_err(|_| de::Error::custom("invalid engagement id string"))
            }
        }

        deserializer.deserialize_any(EngagementIdVisitor)
    }
}

/// Thread-safe EngagementId generator
///
/// Generates unique ids at up to 4096 per millisecond per worker using a
/// single lock-free CAS loop over packed (timestamp, sequence) state.
pub struct EngagementIdGenerator {
    worker_id: u16,
    /// Packed state: (millis since EPOCH) << 22 | sequence
    state: AtomicI64,
}

impl EngagementIdGenerator {
    /// Create a new generator with the given worker ID
    ///
    /// # Panics
    /// Panics if worker_id >= 1024
    pub fn new(worker_id: u16) -> Self {
        assert!(worker_id < 1024, "Worker ID must be < 1024");
        Self {
            worker_id,
            state: AtomicI64::new(0),
        }
    }

    /// Generate a new unique EngagementId
    pub fn generate(&self) -> EngagementId {
        loop {
            let now = Self::current_timestamp() - EngagementId::EPOCH;
            let prev = self.state.load(Ordering::Acquire);
            let prev_ts = prev >> 22;

            let next = if now > prev_ts {
                now << 22
            } else {
                // Same millisecond (or clock went backwards): bump the sequence
                let seq = (prev & 0xFFF) + 1;
                if seq > 0xFFF {
                    // Sequence exhausted, wait for the next millisecond
                    std::hint::spin_loop();
                    continue;
                }
                (prev_ts << 22) | seq
            };

            if self
                .state
                .compare_exchange(prev, next, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                return EngagementId::new(next | (i64::from(self.worker_id) << 12));
            }
            // Another thread won the race, retry
        }
    }

    /// Get current timestamp in milliseconds since Unix epoch
    #[inline]
    fn current_timestamp() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0)
    }

    /// Get the worker ID of this generator
    pub fn worker_id(&self) -> u16 {
        self.worker_id
    }
}

impl Default for EngagementIdGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}
