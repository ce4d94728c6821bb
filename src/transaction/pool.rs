use super::Transaction;

/// Transfers submitted since the last sealed block, in arrival order.
#[derive(Debug, Default)]
pub struct TransactionPool {
    pending: Vec<Transaction>,
}

impl TransactionPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tx: Transaction) {
        self.pending.push(tx);
    }

    /// Hand over every pending transaction and leave the pool empty.
    pub fn drain(&mut self) -> Vec<Transaction> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.pending.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_returns_arrival_order_and_empties() {
        let mut pool = TransactionPool::new();
        pool.push(Transaction::new("A", "B", 1u64));
        pool.push(Transaction::new("B", "C", 2u64));
        assert_eq!(pool.len(), 2);

        let drained = pool.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].sender, "A");
        assert_eq!(drained[1].sender, "B");
        assert!(pool.is_empty());
        assert!(pool.drain().is_empty());
    }

    #[test]
    fn no_validation_on_contents() {
        let mut pool = TransactionPool::new();
        pool.push(Transaction::new("", "", -10i64));
        assert_eq!(pool.iter().count(), 1);
    }
}
