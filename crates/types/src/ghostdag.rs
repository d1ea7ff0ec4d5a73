use crate::block::BlockHash;
use crate::transaction::DomainTransaction;
use serde::{Deserialize, Serialize};

/// GHOSTDAG ordering data computed for a block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GhostdagData {
    pub blue_score: u64,
    pub blue_work: u128,
    pub selected_parent: BlockHash,
    /// Blue blocks of the merge set, selected parent first.
    pub merge_set_blues: Vec<BlockHash>,
    pub merge_set_reds: Vec<BlockHash>,
}

impl GhostdagData {
    pub fn new(
        blue_score: u64,
        blue_work: u128,
        selected_parent: BlockHash,
        merge_set_blues: Vec<BlockHash>,
        merge_set_reds: Vec<BlockHash>,
    ) -> Self {
        Self {
            blue_score,
            blue_work,
            selected_parent,
            merge_set_blues,
            merge_set_reds,
        }
    }

    /// Total number of blocks in the merge set.
    pub fn merge_set_size(&self) -> usize {
        self.merge_set_blues.len() + self.merge_set_reds.len()
    }

    /// Merge set in ordering position: blues first, then reds.
    pub fn merge_set(&self) -> impl Iterator<Item = &BlockHash> {
        self.merge_set_blues.iter().chain(self.merge_set_reds.iter())
    }
}

/// Acceptance verdict for a single transaction of a merged block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionAcceptanceData {
    pub transaction: DomainTransaction,
    pub fee: u64,
    pub is_accepted: bool,
}

/// Acceptance data for one merged block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockAcceptanceData {
    pub block_hash: BlockHash,
    pub transaction_acceptance_data: Vec<TransactionAcceptanceData>,
}

impl BlockAcceptanceData {
    /// Sum of the fees of accepted transactions, `None` on overflow.
    pub fn accepted_fees(&self) -> Option<u64> {
        self.transaction_acceptance_data
            .iter()
            .filter(|tx| tx.is_accepted)
            .try_fold(0u64, |total, tx| total.checked_add(tx.fee))
    }
}

/// Acceptance data of a chain block, ordered like its merge set (blues then reds).
pub type AcceptanceData = Vec<BlockAcceptanceData>;

/// Change of the selected parent chain between two chain blocks.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectedChainPath {
    /// Blocks leaving the chain, from the old tip downwards.
    pub removed: Vec<BlockHash>,
    /// Blocks joining the chain, from just above the common ancestor upwards.
    pub added: Vec<BlockHash>,
}

impl SelectedChainPath {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty()
    }
}
