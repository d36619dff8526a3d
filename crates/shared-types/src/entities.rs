//! # Core Domain Entities
//!
//! Entities shared by every postshortly subsystem.
//!
//! ## Lifecycle of an update
//!
//! - **`CandidateUpdate`**: decoded from the wire, nothing checked yet
//! - **`VerifiedUpdate`**: sanitized, size-checked and signature-checked
//! - **`StatusUpdate`**: persisted, id and timestamp assigned, immutable
//!
//! ## Derived views
//!
//! - `RequestCounters`, `ProlificKey`, `StatisticsSnapshot`

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// =============================================================================
// LIMITS
// =============================================================================

/// Maximum body size in bytes, measured after sanitization.
pub const BODY_MAX_SIZE: usize = 256;

/// Maximum link size in bytes, measured after sanitization.
pub const LINK_MAX_SIZE: usize = 256;

/// Ed25519 public key size.
pub const PUBKEY_SIZE: usize = 32;

/// Ed25519 signature size.
pub const SIGNATURE_SIZE: usize = 64;

/// Number of keys reported in `StatisticsSnapshot::top_prolific_pubkeys`.
pub const TOP_PROLIFIC_LIMIT: usize = 10;

/// Nanoseconds since the UNIX epoch.
pub type TimestampNanos = u64;

// =============================================================================
// KEY MATERIAL
// =============================================================================

/// A 32-byte Ed25519 public key.
///
/// Serialized as lowercase hex in JSON.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PublicKey(pub [u8; PUBKEY_SIZE]);

impl PublicKey {
    /// Build from a slice, `None` unless exactly 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        <[u8; PUBKEY_SIZE]>::try_from(bytes).ok().map(Self)
    }

    /// Decode a hex string that must hold exactly 32 bytes.
    pub fn from_hex(s: &str) -> Option<Self> {
        hex::decode(s).ok().and_then(|b| Self::from_slice(&b))
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; PUBKEY_SIZE] {
        &self.0
    }

    /// Lowercase hex encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

/// A 64-byte Ed25519 signature.
///
/// Serialized as lowercase hex in JSON.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SignatureBytes(pub [u8; SIGNATURE_SIZE]);

impl SignatureBytes {
    /// Build from a slice, `None` unless exactly 64 bytes.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        <[u8; SIGNATURE_SIZE]>::try_from(bytes).ok().map(Self)
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_SIZE] {
        &self.0
    }

    /// Lowercase hex encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for SignatureBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SignatureBytes({})", self.to_hex())
    }
}

macro_rules! impl_hex_serde {
    ($ty:ident, $len:expr) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
                $ty::from_slice(&bytes).ok_or_else(|| {
                    serde::de::Error::custom(format!(
                        "expected {} bytes, got {}",
                        $len,
                        bytes.len()
                    ))
                })
            }
        }
    };
}

impl_hex_serde!(PublicKey, PUBKEY_SIZE);
impl_hex_serde!(SignatureBytes, SIGNATURE_SIZE);

// =============================================================================
// UPDATES
// =============================================================================

/// A decoded but unvalidated submission.
///
/// Key and signature are kept as raw byte vectors: their lengths are checked
/// by the verifier, not by the decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateUpdate {
    pub body: String,
    pub link: Option<String>,
    pub pubkey: Vec<u8>,
    pub signature: Vec<u8>,
}

/// A sanitized update whose signature verified against its own key.
///
/// `body` and `link` are the sanitized values, which are also the bytes the
/// signature covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedUpdate {
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub pubkey: PublicKey,
    pub signature: SignatureBytes,
}

/// A persisted update.
///
/// Ids start at 1 and increase by one per accepted update; timestamps are
/// non-decreasing in id order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub id: u64,
    pub timestamp: TimestampNanos,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub pubkey: PublicKey,
    pub signature: SignatureBytes,
}

impl StatusUpdate {
    /// Attach server-assigned fields to a verified update.
    pub fn from_verified(update: VerifiedUpdate, id: u64, timestamp: TimestampNanos) -> Self {
        Self {
            id,
            timestamp,
            body: update.body,
            link: update.link,
            pubkey: update.pubkey,
            signature: update.signature,
        }
    }
}

// =============================================================================
// STATISTICS
// =============================================================================

/// Running request counters, process lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestCounters {
    pub successful: u64,
    pub failed: u64,
}

impl RequestCounters {
    /// successful + failed
    pub fn total(&self) -> u64 {
        self.successful + self.failed
    }
}

/// One entry of the most-prolific ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProlificKey {
    pub pubkey: PublicKey,
    pub count: u64,
}

/// Derived aggregate view over all stored updates.
///
/// Never mutated by hand: always recomputed from the stored collection and
/// the request counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSnapshot {
    pub total_posts: u64,
    pub unique_pubkeys: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub total_requests: u64,
    pub body_max_size: usize,
    pub link_max_size: usize,
    pub pubkey_max_size: usize,
    pub signature_max_size: usize,
    pub top_prolific_pubkeys: Vec<ProlificKey>,
    pub average_posts_per_pubkey: f64,
    pub most_recent_post_timestamp: TimestampNanos,
    pub oldest_post_timestamp: TimestampNanos,
    pub rate_limit_requests_per_second: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pubkey_hex_roundtrip_is_lowercase() {
        let key = PublicKey([0xAB; 32]);
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, format!("\"{}\"", "ab".repeat(32)));
        let back: PublicKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }

    #[test]
    fn test_pubkey_from_hex_rejects_wrong_length() {
        assert!(PublicKey::from_hex(&"aa".repeat(31)).is_none());
        assert!(PublicKey::from_hex(&"aa".repeat(33)).is_none());
        assert!(PublicKey::from_hex("zz").is_none());
        assert!(PublicKey::from_hex(&"aa".repeat(32)).is_some());
    }

    #[test]
    fn test_signature_deserialize_rejects_short() {
        let json = format!("\"{}\"", "00".repeat(63));
        assert!(serde_json::from_str::<SignatureBytes>(&json).is_err());
    }

    #[test]
    fn test_status_update_omits_absent_link() {
        let update = StatusUpdate {
            id: 1,
            timestamp: 42,
            body: "hello".into(),
            link: None,
            pubkey: PublicKey([1; 32]),
            signature: SignatureBytes([2; 64]),
        };
        let value = serde_json::to_value(&update).unwrap();
        assert!(value.get("link").is_none());
        assert_eq!(value["id"], 1);
        assert_eq!(value["timestamp"], 42);
    }

    #[test]
    fn test_request_counters_total() {
        let counters = RequestCounters {
            successful: 3,
            failed: 2,
        };
        assert_eq!(counters.total(), 5);
    }
}
