use crate::blockchain::{Block, Ledger, PreviousHash, ProofOfWork};
use crate::config::Settings;
use crate::error::ApiError;
use crate::node::NodeIdentity;
use crate::transaction::Transaction;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::sync::Mutex;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Shared application state: the ledger (with its pool) and mining setup.
///
/// `ledger` guards every read and mutation of the chain and pool.
/// `mining` is held for a whole mining cycle so that two cycles never race
/// on the same tip; the ledger lock is released while the proof is searched.
pub struct AppState {
    pub ledger: Mutex<Ledger>,
    pub mining: Mutex<()>,
    pub pow: ProofOfWork,
    pub node_id: NodeIdentity,
    pub mine_timeout: Option<Duration>,
    /// Fired on shutdown. Each mining cycle searches under a child of it.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(pow: ProofOfWork, node_id: NodeIdentity, mine_timeout: Option<Duration>) -> Self {
        Self {
            ledger: Mutex::new(Ledger::genesis()),
            mining: Mutex::new(()),
            pow,
            node_id,
            mine_timeout,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.pow.clone(),
            settings.node_id.clone(),
            settings.mine_timeout,
        )
    }

    /// Run one mining cycle: search a proof for the current tip, credit the
    /// reward and seal the pool. Blocks the calling thread.
    ///
    /// `cancel` stops the search; pass a child of [`shutdown`](Self::shutdown)
    /// so that shutdown reaches it. Reward and seal happen under one lock, so a
    /// cancelled search leaves the pool exactly as it was.
    pub fn mine_next_block(&self, cancel: &CancellationToken) -> Result<Block, ApiError> {
        let _cycle = self.mining.lock().expect("mutex poisoned");

        let last_proof = {
            let ledger = self.ledger.lock().expect("mutex poisoned");
            ledger.last_block().proof
        };

        let Some(proof) = self.pow.find_proof_cancellable(last_proof, cancel) else {
            warn!("MINER - search for proof after {} cancelled", last_proof);
            return Err(ApiError::MiningCancelled);
        };

        let mut ledger = self.ledger.lock().expect("mutex poisoned");
        ledger.credit_reward(self.node_id.as_str());
        let block = ledger.seal_next_block(proof).clone();
        info!(
            "MINER - sealed block #{} (proof={}, txs={}, previous_hash={})",
            block.index,
            block.proof,
            block.transactions.len(),
            block.previous_hash
        );
        Ok(block)
    }
}

/* ---------- TX API Models ---------- */

/// Every field is optional here so a missing one can be reported as
/// `Missing values` instead of a generic deserialization error.
#[derive(Deserialize)]
pub struct NewTxRequest {
    pub sender: Option<String>,
    pub recipient: Option<String>,
    pub amount: Option<Number>,
}

#[derive(Serialize)]
pub struct NewTxResponse {
    pub message: String,
    pub index: u64,
}

#[derive(Serialize)]
pub struct PendingResponse<'a> {
    pub size: usize,
    pub transactions: Vec<&'a Transaction>,
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct MineResponse {
    pub message: &'static str,
    pub index: u64,
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: PreviousHash,
}

impl From<Block> for MineResponse {
    fn from(block: Block) -> Self {
        Self {
            message: "New Block Forged",
            index: block.index,
            transactions: block.transactions,
            proof: block.proof,
            previous_hash: block.previous_hash,
        }
    }
}
