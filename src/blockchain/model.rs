use log::debug;
use serde::Serialize;
use serde_json::Number;

use super::{Block, PreviousHash};
use crate::transaction::{Transaction, TransactionPool};

/// Append-only chain of blocks plus the pool feeding the next one.
#[derive(Debug)]
pub struct Ledger {
    chain: Vec<Block>,
    pool: TransactionPool,
}

/// Read-only copy of the chain for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct ChainSnapshot {
    pub chain: Vec<Block>,
    pub length: usize,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::genesis()
    }
}

impl Ledger {
    /// Initialize a new ledger holding only the genesis block.
    pub fn genesis() -> Self {
        Self {
            chain: vec![Block::genesis()],
            pool: TransactionPool::new(),
        }
    }

    /// Return the last sealed block.
    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("Ledger should always have at least the genesis block")
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Always `false`: the genesis block is never removed.
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn pending(&self) -> &TransactionPool {
        &self.pool
    }

    /// Queue a transfer and return the index of the block expected to hold it.
    ///
    /// The index is a prediction (`last index + 1`); it is only right if
    /// exactly one block is sealed before the transfer is looked up.
    pub fn submit_transaction(
        &mut self,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: impl Into<Number>,
    ) -> u64 {
        self.pool.push(Transaction::new(sender, recipient, amount));
        let predicted = self.last_block().index + 1;
        debug!(
            "pool size {} (predicted block {})",
            self.pool.len(),
            predicted
        );
        predicted
    }

    /// Queue the mining reward for `recipient`.
    pub fn credit_reward(&mut self, recipient: impl Into<String>) {
        self.pool.push(Transaction::reward(recipient));
    }

    /// Seal the pool into a new block linked to the current tip.
    ///
    /// This is the only way a block enters the chain.
    pub fn seal_next_block(&mut self, proof: u64) -> &Block {
        let previous_hash = PreviousHash::Digest(self.last_block().compute_hash());
        let index = self.len() as u64 + 1;
        let transactions = self.pool.drain();

        debug!(
            "sealing block #{} with {} txs (proof={})",
            index,
            transactions.len(),
            proof
        );

        self.chain
            .push(Block::new(index, transactions, proof, previous_hash));
        self.last_block()
    }

    pub fn snapshot(&self) -> ChainSnapshot {
        ChainSnapshot {
            chain: self.chain.clone(),
            length: self.chain.len(),
        }
    }
}
