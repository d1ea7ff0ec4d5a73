//! Store contracts and backends for consensus data.
//!
//! Every read takes the caller's [`StagingArea`] and checks it before the
//! committed state. Writes only ever land in a staging area; a backend
//! applies one atomically with [`ConsensusStorage::commit`].

mod memory;
mod sled_store;
mod staging;

pub use memory::MemoryStorage;
pub use sled_store::SledStorage;
pub use staging::StagingArea;

use kdag_types::{AcceptanceData, Block, BlockHash, BlockHeader, GhostdagData};

/// Storage errors
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("{store}: key {key} not found")]
    NotFound { store: &'static str, key: String },
    #[error("Database error: {0}")]
    Database(#[from] sled::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    pub fn not_found(store: &'static str, key: &BlockHash) -> Self {
        StoreError::NotFound {
            store,
            key: hex::encode(key),
        }
    }

    /// Whether the key is simply absent, as opposed to a backend failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

pub const BLOCK_HEADER_STORE: &str = "block header store";
pub const BLOCK_STORE: &str = "block store";
pub const GHOSTDAG_DATA_STORE: &str = "ghostdag data store";
pub const ACCEPTANCE_DATA_STORE: &str = "acceptance data store";
pub const DAA_SCORE_STORE: &str = "daa score store";
pub const DAA_ADDED_BLOCKS_STORE: &str = "daa added blocks store";

pub trait BlockHeaderStore {
    fn block_header(&self, staging: &StagingArea, hash: &BlockHash) -> StoreResult<BlockHeader>;
    fn stage_block_header(&self, staging: &mut StagingArea, hash: BlockHash, header: BlockHeader) {
        staging.headers.insert(hash, header);
    }
}

pub trait BlockStore {
    fn block(&self, staging: &StagingArea, hash: &BlockHash) -> StoreResult<Block>;
    fn stage_block(&self, staging: &mut StagingArea, hash: BlockHash, block: Block) {
        staging.blocks.insert(hash, block);
    }
}

/// GHOSTDAG data is kept twice: trusted (imported with a pruning proof) and
/// untrusted (computed locally).
pub trait GhostdagDataStore {
    fn ghostdag_data(
        &self,
        staging: &StagingArea,
        hash: &BlockHash,
        is_trusted: bool,
    ) -> StoreResult<GhostdagData>;
    fn stage_ghostdag_data(
        &self,
        staging: &mut StagingArea,
        hash: BlockHash,
        data: GhostdagData,
        is_trusted: bool,
    ) {
        staging.ghostdag.insert((hash, is_trusted), data);
    }
}

pub trait AcceptanceDataStore {
    fn acceptance_data(&self, staging: &StagingArea, hash: &BlockHash)
        -> StoreResult<AcceptanceData>;
    fn stage_acceptance_data(
        &self,
        staging: &mut StagingArea,
        hash: BlockHash,
        data: AcceptanceData,
    ) {
        staging.acceptance_data.insert(hash, data);
    }
}

pub trait DaaBlocksStore {
    fn daa_score(&self, staging: &StagingArea, hash: &BlockHash) -> StoreResult<u64>;
    /// Blocks of the merge set that entered the DAA window of `hash`.
    fn daa_added_blocks(&self, staging: &StagingArea, hash: &BlockHash)
        -> StoreResult<Vec<BlockHash>>;
    fn stage_daa_score(&self, staging: &mut StagingArea, hash: BlockHash, daa_score: u64) {
        staging.daa_scores.insert(hash, daa_score);
    }
    fn stage_daa_added_blocks(
        &self,
        staging: &mut StagingArea,
        hash: BlockHash,
        added: Vec<BlockHash>,
    ) {
        staging.daa_added_blocks.insert(hash, added);
    }
}

/// A backend serving every store consensus reads from.
pub trait ConsensusStorage:
    BlockHeaderStore
    + BlockStore
    + GhostdagDataStore
    + AcceptanceDataStore
    + DaaBlocksStore
    + Send
    + Sync
    + 'static
{
    /// Apply every staged write. The staging area is consumed.
    fn commit(&self, staging: StagingArea) -> StoreResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_distinguishable() {
        let err = StoreError::not_found(GHOSTDAG_DATA_STORE, &[0xab; 32]);
        assert!(err.is_not_found());
        assert!(err.to_string().starts_with("ghostdag data store: key abab"));

        let err = StoreError::from(serde_json::from_str::<u64>("x").unwrap_err());
        assert!(!err.is_not_found());
    }
}
