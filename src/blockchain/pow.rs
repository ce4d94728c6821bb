use tokio_util::sync::CancellationToken;

use super::canonical::sha256_hex;
use super::{DEFAULT_DIFFICULTY, MAX_DIFFICULTY};

/// How many candidates are tried between two cancellation checks.
const CANCEL_POLL_INTERVAL: u64 = 1024;

/// Proof-of-Work puzzle: find `p` such that `sha256("{last_proof}{p}")`
/// starts with `difficulty` zero hex characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofOfWork {
    difficulty: usize,
    target_prefix: String,
}

impl Default for ProofOfWork {
    fn default() -> Self {
        Self {
            difficulty: DEFAULT_DIFFICULTY,
            target_prefix: "0".repeat(DEFAULT_DIFFICULTY),
        }
    }
}

impl ProofOfWork {
    /// `None` unless `1 <= difficulty <= 64`.
    pub fn with_difficulty(difficulty: usize) -> Option<Self> {
        if !(1..=MAX_DIFFICULTY).contains(&difficulty) {
            return None;
        }
        Some(Self {
            difficulty,
            target_prefix: "0".repeat(difficulty),
        })
    }

    pub fn difficulty(&self) -> usize {
        self.difficulty
    }

    /// Check a candidate against the previous block's proof.
    ///
    /// Both integers are joined as decimal text with no separator before
    /// hashing, e.g. `(100, 35293)` hashes the bytes `"10035293"`.
    pub fn is_valid(&self, last_proof: u64, candidate: u64) -> bool {
        let guess = format!("{last_proof}{candidate}");
        sha256_hex(guess.as_bytes()).starts_with(&self.target_prefix)
    }

    /// Smallest non-negative proof valid for `last_proof`. Blocks until found.
    pub fn find_proof(&self, last_proof: u64) -> u64 {
        let mut proof = 0u64;
        while !self.is_valid(last_proof, proof) {
            proof += 1;
        }
        proof
    }

    /// Same search as [`find_proof`](Self::find_proof), giving up with `None`
    /// once `cancel` fires. The token is polled synchronously, so this can run
    /// on a blocking thread while an async task cancels it.
    pub fn find_proof_cancellable(
        &self,
        last_proof: u64,
        cancel: &CancellationToken,
    ) -> Option<u64> {
        let mut proof = 0u64;
        loop {
            if proof % CANCEL_POLL_INTERVAL == 0 && cancel.is_cancelled() {
                return None;
            }
            if self.is_valid(last_proof, proof) {
                return Some(proof);
            }
            proof += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn default_difficulty_is_four() {
        assert_eq!(ProofOfWork::default().difficulty(), 4);
        assert_eq!(
            ProofOfWork::with_difficulty(4),
            Some(ProofOfWork::default())
        );
    }

    #[test]
    fn difficulty_bounds() {
        assert!(ProofOfWork::with_difficulty(0).is_none());
        assert!(ProofOfWork::with_difficulty(65).is_none());
        assert!(ProofOfWork::with_difficulty(1).is_some());
        assert!(ProofOfWork::with_difficulty(64).is_some());
    }

    #[test]
    fn known_proof_after_genesis() {
        // sha256("10035293") = 0000c415...
        let pow = ProofOfWork::default();
        assert!(pow.is_valid(100, 35293));
        assert!(!pow.is_valid(100, 35292));
        assert_eq!(pow.find_proof(100), 35293);
    }

    #[test]
    fn found_proof_is_always_valid() {
        let pow = ProofOfWork::with_difficulty(2).unwrap();
        for last in [0u64, 1, 100, 35293, u64::MAX] {
            let proof = pow.find_proof(last);
            assert!(pow.is_valid(last, proof));
            // First match: nothing below it passes.
            assert!((0..proof).all(|p| !pow.is_valid(last, p)));
        }
    }

    #[test]
    fn harder_prefix_needs_more_attempts() {
        let easy = ProofOfWork::with_difficulty(1).unwrap();
        let medium = ProofOfWork::with_difficulty(2).unwrap();
        let hard = ProofOfWork::with_difficulty(3).unwrap();

        assert_eq!(easy.find_proof(100), 16);
        assert_eq!(medium.find_proof(100), 226);
        assert_eq!(hard.find_proof(100), 6016);

        // Attempts made = proof + 1, since the search starts at 0.
        let attempts = |pow: &ProofOfWork| -> u64 { (0..20u64).map(|l| pow.find_proof(l) + 1).sum() };
        let (a, b, c) = (attempts(&easy), attempts(&medium), attempts(&hard));
        assert!(a < b, "{a} !< {b}");
        assert!(b < c, "{b} !< {c}");

        // A proof valid at a harder prefix is valid at every easier one.
        for l in 0..20u64 {
            assert!(easy.find_proof(l) <= medium.find_proof(l));
        }
    }

    #[test]
    fn cancelled_search_returns_none() {
        let pow = ProofOfWork::with_difficulty(64).unwrap();
        let token = CancellationToken::new();
        token.cancel();
        assert_eq!(pow.find_proof_cancellable(100, &token), None);
    }

    #[test]
    fn cancel_from_another_thread_stops_search() {
        let pow = ProofOfWork::with_difficulty(64).unwrap();
        let token = CancellationToken::new();
        let canceller = {
            let token = token.clone();
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(20));
                token.cancel();
            })
        };
        assert_eq!(pow.find_proof_cancellable(7, &token), None);
        canceller.join().unwrap();
    }

    #[test]
    fn uncancelled_search_matches_plain_search() {
        let pow = ProofOfWork::with_difficulty(3).unwrap();
        let token = CancellationToken::new();
        assert_eq!(pow.find_proof_cancellable(100, &token), Some(6016));
    }

    #[test]
    fn child_token_follows_parent_only() {
        let pow = ProofOfWork::with_difficulty(64).unwrap();
        let root = CancellationToken::new();

        let cycle = root.child_token();
        cycle.cancel();
        assert!(!root.is_cancelled());

        let next = root.child_token();
        root.cancel();
        assert!(next.is_cancelled());
        assert_eq!(pow.find_proof_cancellable(100, &next), None);
    }
}
