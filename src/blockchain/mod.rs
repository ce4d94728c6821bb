pub mod block;
pub mod canonical;
pub mod model;
pub mod pow;

pub use block::{Block, PreviousHash};
pub use model::{ChainSnapshot, Ledger};
pub use pow::ProofOfWork;

/// Proof stamped on the genesis block.
pub const GENESIS_PROOF: u64 = 100;

/// Sentinel stored as the genesis block's `previous_hash` (a number, not a digest).
pub const GENESIS_PREVIOUS_HASH: u64 = 1;

/// Default Proof-of-Work difficulty (number of leading zero hex characters).
pub const DEFAULT_DIFFICULTY: usize = 4;

/// A SHA-256 hex digest has 64 characters, so no prefix can be longer.
pub const MAX_DIFFICULTY: usize = 64;

/// Sender recorded on the reward transaction credited to the miner.
pub const REWARD_SENDER: &str = "0";

/// Amount credited to the miner for each sealed block.
pub const MINING_REWARD: u64 = 1;
