use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::blockchain::canonical::{Canonical, ObjectWriter};
use crate::blockchain::{MINING_REWARD, REWARD_SENDER};

/// A transfer waiting in the pool or sealed inside a block.
///
/// `amount` keeps the JSON number exactly as submitted (integer or float),
/// so the block hash sees the same text the submitter sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub recipient: String,
    pub amount: Number,
}

impl Transaction {
    pub fn new(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: impl Into<Number>,
    ) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            amount: amount.into(),
        }
    }

    /// The reward credited to the node that found a block's proof.
    pub fn reward(recipient: impl Into<String>) -> Self {
        Self::new(REWARD_SENDER, recipient, MINING_REWARD)
    }
}

impl Canonical for Transaction {
    fn write_canonical(&self, out: &mut String) {
        let mut obj = ObjectWriter::begin(out);
        obj.field("amount", &self.amount);
        obj.field("recipient", &self.recipient);
        obj.field("sender", &self.sender);
        obj.end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::canonical::sha256_hex;

    #[test]
    fn canonical_form_sorts_keys() {
        let tx = Transaction::new("A", "B", 5u64);
        assert_eq!(
            tx.canonical_string(),
            r#"{"amount": 5, "recipient": "B", "sender": "A"}"#
        );
    }

    #[test]
    fn float_amount_is_kept_as_float() {
        let tx = Transaction::new("café \u{1F980}", "x\"\n", Number::from_f64(2.5).unwrap());
        assert_eq!(
            tx.canonical_string(),
            r#"{"amount": 2.5, "recipient": "x\"\n", "sender": "caf\u00e9 \ud83e\udd80"}"#
        );
    }

    #[test]
    fn reward_uses_sentinel_sender() {
        let tx = Transaction::reward("node-1");
        assert_eq!(tx.sender, "0");
        assert_eq!(tx.recipient, "node-1");
        assert_eq!(tx.amount, Number::from(1u64));
    }

    #[test]
    fn json_round_trip_preserves_amount_kind() {
        let tx: Transaction =
            serde_json::from_str(r#"{"sender":"A","recipient":"B","amount":5}"#).unwrap();
        assert!(tx.amount.is_u64());
        let tx: Transaction =
            serde_json::from_str(r#"{"sender":"A","recipient":"B","amount":5.0}"#).unwrap();
        assert!(tx.amount.is_f64());
        assert_eq!(tx.canonical_string(), r#"{"amount": 5.0, "recipient": "B", "sender": "A"}"#);
    }

    #[test]
    fn oversized_integer_amount_hashes_like_python() {
        let tx: Transaction = serde_json::from_str(
            r#"{"sender":"A","recipient":"B","amount":100000000000000000000}"#,
        )
        .unwrap();
        assert!(!tx.amount.is_f64());
        assert_eq!(
            tx.canonical_string(),
            r#"{"amount": 100000000000000000000, "recipient": "B", "sender": "A"}"#
        );
        assert_eq!(
            sha256_hex(&tx.canonical_bytes()),
            "9b8779c6379c198e9556abe80ed3fb86ddbb8639a65c5df10b2aabc80050fd6b"
        );
    }
}
