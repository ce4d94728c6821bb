use chrono::Utc;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::canonical::{Canonical, ObjectWriter, sha256_hex};
use super::{GENESIS_PREVIOUS_HASH, GENESIS_PROOF};
use crate::transaction::Transaction;

/// Link to the preceding block.
///
/// Every block after genesis carries the hex digest of its predecessor. The
/// genesis block has no predecessor and carries a bare number instead, which
/// serializes as a JSON number rather than a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PreviousHash {
    Sentinel(u64),
    Digest(String),
}

// Read through `Value`: an untagged derive cannot see numbers once
// serde_json keeps their source text.
impl<'de> Deserialize<'de> for PreviousHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(hash) => Ok(PreviousHash::Digest(hash)),
            Value::Number(n) => n
                .as_u64()
                .map(PreviousHash::Sentinel)
                .ok_or_else(|| de::Error::custom(format!("invalid previous_hash {n}"))),
            other => Err(de::Error::custom(format!("invalid previous_hash {other}"))),
        }
    }
}

impl Canonical for PreviousHash {
    fn write_canonical(&self, out: &mut String) {
        match self {
            PreviousHash::Sentinel(n) => n.write_canonical(out),
            PreviousHash::Digest(hash) => hash.write_canonical(out),
        }
    }
}

impl fmt::Display for PreviousHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreviousHash::Sentinel(n) => write!(f, "{n}"),
            PreviousHash::Digest(hash) => f.write_str(hash),
        }
    }
}

/// A sealed block of the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: f64, // seconds since the Unix epoch, microsecond precision
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: PreviousHash,
}

impl Block {
    /// The first block: no transactions, the bootstrap proof and the sentinel link.
    pub fn genesis() -> Self {
        Self::new(
            1,
            Vec::new(),
            GENESIS_PROOF,
            PreviousHash::Sentinel(GENESIS_PREVIOUS_HASH),
        )
    }

    /// Build a block stamped with the current wall-clock time.
    pub fn new(
        index: u64,
        transactions: Vec<Transaction>,
        proof: u64,
        previous_hash: PreviousHash,
    ) -> Self {
        Self {
            index,
            timestamp: now_secs(),
            transactions,
            proof,
            previous_hash,
        }
    }

    /// SHA-256 of the block's canonical encoding, as lowercase hex.
    pub fn compute_hash(&self) -> String {
        sha256_hex(&self.canonical_bytes())
    }
}

impl Canonical for Block {
    fn write_canonical(&self, out: &mut String) {
        let mut obj = ObjectWriter::begin(out);
        obj.field("index", &self.index);
        obj.field("previous_hash", &self.previous_hash);
        obj.field("proof", &self.proof);
        obj.field("timestamp", &self.timestamp);
        obj.field("transactions", &self.transactions);
        obj.end();
    }
}

fn now_secs() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}
